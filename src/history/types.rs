use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Messages kept in the prompt transcript by default.
pub const DEFAULT_CONTEXT_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(Error::validation(format!(
                "role must be 'user' or 'assistant', got '{other}'"
            ))),
        }
    }
}

pub fn validate_session_id(session_id: &str) -> Result<()> {
    if session_id.trim().is_empty() {
        return Err(Error::validation("session_id must not be empty"));
    }
    Ok(())
}

pub fn validate_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(Error::validation("message must not be empty"));
    }
    Ok(())
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    id: Option<i64>,
    session_id: String,
    role: Role,
    message: String,
    timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        session_id: impl Into<String>,
        role: Role,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        let session_id = session_id.into();
        let message = message.into();
        validate_session_id(&session_id)?;
        validate_message(&message)?;

        Ok(Self {
            id: None,
            session_id,
            role,
            message,
            timestamp,
        })
    }

    /// Builds a message from an untyped role, as read from storage.
    pub fn parse(
        session_id: impl Into<String>,
        role: &str,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        Self::new(session_id, role.parse()?, message, timestamp)
    }

    pub fn user(
        session_id: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        Self::new(session_id, Role::User, message, timestamp)
    }

    pub fn assistant(
        session_id: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        Self::new(session_id, Role::Assistant, message, timestamp)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_from_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_from_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Recent conversation turns, oldest first, as fed into the prompt.
#[derive(Debug, Clone)]
pub struct ChatContext {
    messages: Vec<ChatMessage>,
    max_messages: usize,
}

impl ChatContext {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self::with_max_messages(messages, DEFAULT_CONTEXT_WINDOW)
    }

    pub fn with_max_messages(messages: Vec<ChatMessage>, max_messages: usize) -> Self {
        Self {
            messages,
            max_messages,
        }
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// The trailing window of at most `max_messages` messages.
    pub fn recent_messages(&self) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(self.max_messages);
        &self.messages[start..]
    }

    pub fn format_for_prompt(&self) -> String {
        self.recent_messages()
            .iter()
            .map(|msg| {
                let speaker = if msg.is_from_user() {
                    "Usuario"
                } else {
                    "Asistente"
                };
                format!("{speaker}: {}", msg.message())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
