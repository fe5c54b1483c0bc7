use super::ChatMessage;
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{Connection, params};
use tracing::debug;

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// The last `limit` messages of a session, oldest first.
    async fn get_recent(&self, session_id: &str, limit: usize) -> Result<Vec<ChatMessage>>;

    /// Persists a message and returns it with its assigned id.
    async fn save(&self, message: ChatMessage) -> Result<ChatMessage>;
}

pub struct LibsqlChatRepository {
    conn: Connection,
}

impl LibsqlChatRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

// Fixed-width UTC so that lexical order in SQL matches chronological order.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::internal(format!("Failed to parse timestamp: {e}")))
}

#[async_trait]
impl ChatRepository for LibsqlChatRepository {
    async fn get_recent(&self, session_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut rows = self
            .conn
            .query(
                "SELECT id, session_id, role, message, timestamp FROM chat_memory WHERE session_id = ? ORDER BY timestamp DESC, id DESC LIMIT ?",
                params![session_id, limit],
            )
            .await?;

        let mut messages = Vec::new();
        while let Some(row) = rows.next().await? {
            let id: i64 = row.get(0)?;
            let session_id: String = row.get(1)?;
            let role: String = row.get(2)?;
            let message: String = row.get(3)?;
            let timestamp: String = row.get(4)?;

            let message = ChatMessage::parse(session_id, &role, message, parse_timestamp(&timestamp)?)
                .map_err(|e| Error::internal(format!("Invalid chat_memory row {id}: {e}")))?;
            messages.push(message.with_id(id));
        }
        messages.reverse();

        debug!(
            "Retrieved {} messages from database for session: {}",
            messages.len(),
            session_id
        );
        Ok(messages)
    }

    async fn save(&self, message: ChatMessage) -> Result<ChatMessage> {
        self.conn
            .execute(
                "INSERT INTO chat_memory (session_id, role, message, timestamp) VALUES (?, ?, ?, ?)",
                params![
                    message.session_id(),
                    message.role().as_str(),
                    message.message(),
                    format_timestamp(message.timestamp())
                ],
            )
            .await?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "Message {} saved to database: {}",
            id,
            message.session_id()
        );
        Ok(message.with_id(id))
    }
}
