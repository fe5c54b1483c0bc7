mod service;
mod types;

pub use service::{ChatService, HISTORY_LIMIT};
pub use types::*;
