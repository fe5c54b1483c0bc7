use super::types::{ChatHistory, ChatMessageRecord, ChatRequest, ChatResponse};
use crate::{
    Result,
    assistant::SalesAssistant,
    catalog::ProductRepository,
    history::{
        ChatContext, ChatMessage, ChatRepository, DEFAULT_CONTEXT_WINDOW, validate_message,
        validate_session_id,
    },
};
use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Most messages returned by [`ChatService::get_history`].
pub const HISTORY_LIMIT: usize = 100;

pub struct ChatService {
    products: Arc<dyn ProductRepository>,
    history: Arc<dyn ChatRepository>,
    assistant: Arc<SalesAssistant>,
}

impl ChatService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        history: Arc<dyn ChatRepository>,
        assistant: Arc<SalesAssistant>,
    ) -> Self {
        Self {
            products,
            history,
            assistant,
        }
    }

    /// Answers one user message and records both turns of the exchange.
    ///
    /// The two messages are saved one after the other without a transaction:
    /// a failure on the second save leaves only the user turn stored.
    pub async fn process_message(&self, request: ChatRequest) -> Result<ChatResponse> {
        validate_session_id(&request.session_id)?;
        validate_message(&request.message)?;

        let products = self.products.get_all().await?;
        let recent = self
            .history
            .get_recent(&request.session_id, DEFAULT_CONTEXT_WINDOW)
            .await?;
        debug!(
            "Session {} has {} recent messages, catalog has {} products",
            request.session_id,
            recent.len(),
            products.len()
        );
        let context = ChatContext::new(recent);

        let assistant_message = self
            .assistant
            .generate_response(&request.message, &products, &context)
            .await;

        // Both turns share one instant; microseconds is what the store keeps.
        let now = Utc::now().trunc_subsecs(6);

        let user_chat = ChatMessage::user(&request.session_id, &request.message, now)?;
        let assistant_chat = ChatMessage::assistant(&request.session_id, &assistant_message, now)?;

        self.history.save(user_chat).await?;
        self.history.save(assistant_chat).await?;

        info!("Processed chat message for session: {}", request.session_id);

        Ok(ChatResponse {
            session_id: request.session_id,
            user_message: request.message,
            assistant_message,
            timestamp: now,
        })
    }

    pub async fn get_history(&self, session_id: &str) -> Result<ChatHistory> {
        let messages = self.history.get_recent(session_id, HISTORY_LIMIT).await?;

        Ok(ChatHistory {
            session_id: session_id.to_string(),
            messages: messages.into_iter().map(ChatMessageRecord::from).collect(),
        })
    }
}
