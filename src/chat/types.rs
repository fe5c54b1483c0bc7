use crate::history::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub user_message: String,
    pub assistant_message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageRecord {
    pub id: Option<i64>,
    pub session_id: String,
    pub role: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageRecord {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id(),
            session_id: message.session_id().to_string(),
            role: message.role().to_string(),
            message: message.message().to_string(),
            timestamp: message.timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    pub session_id: String,
    pub messages: Vec<ChatMessageRecord>,
}
