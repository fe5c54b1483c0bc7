pub mod assistant;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
