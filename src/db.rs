use crate::Result;
use libsql::{Builder, Connection};
use std::path::Path;
use tracing::{debug, info};

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        brand TEXT NOT NULL,
        category TEXT NOT NULL,
        size TEXT NOT NULL,
        color TEXT NOT NULL,
        price REAL NOT NULL,
        stock INTEGER NOT NULL,
        description TEXT NOT NULL
    )
"#;

const CREATE_CHAT_MEMORY: &str = r#"
    CREATE TABLE IF NOT EXISTS chat_memory (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id TEXT NOT NULL,
        role TEXT NOT NULL,
        message TEXT NOT NULL,
        timestamp TEXT NOT NULL
    )
"#;

const CREATE_CHAT_MEMORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_chat_memory_session_id ON chat_memory (session_id)";

/// libSQL database with the schema applied.
///
/// A single connection is kept open and shared, so `:memory:` databases
/// survive across repository calls.
pub struct Database {
    _db: libsql::Database,
    conn: Connection,
}

impl Database {
    pub async fn open(db_path: &str) -> Result<Self> {
        if db_path != ":memory:" {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        let db = Builder::new_local(db_path).build().await?;
        let conn = db.connect()?;

        let database = Self { _db: db, conn };
        database.migrate().await?;

        info!("Database initialized successfully: {}", db_path);
        Ok(database)
    }

    pub async fn in_memory() -> Result<Self> {
        Self::open(":memory:").await
    }

    async fn migrate(&self) -> Result<()> {
        for statement in [CREATE_PRODUCTS, CREATE_CHAT_MEMORY, CREATE_CHAT_MEMORY_INDEX] {
            self.conn.execute(statement, ()).await?;
        }
        debug!("Database schema is up to date");
        Ok(())
    }

    pub fn connection(&self) -> Connection {
        self.conn.clone()
    }
}
