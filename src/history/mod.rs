mod storage;
mod types;

pub use storage::{ChatRepository, LibsqlChatRepository};
pub use types::*;
