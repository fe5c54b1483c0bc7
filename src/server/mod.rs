pub mod handlers;
pub mod types;

use crate::{
    Result,
    assistant::SalesAssistant,
    catalog::{LibsqlProductRepository, ProductService, seed_catalog},
    chat::ChatService,
    config::Config,
    db::Database,
    history::LibsqlChatRepository,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Wires the stores, the assistant and the services over an opened database.
pub async fn build_state(config: &Config, db: &Database) -> Result<AppState> {
    let products = Arc::new(LibsqlProductRepository::new(db.connection()));
    let history = Arc::new(LibsqlChatRepository::new(db.connection()));

    if config.database.seed_catalog {
        seed_catalog(products.as_ref()).await?;
    }

    let assistant = Arc::new(SalesAssistant::new(&config.llm));

    Ok(AppState {
        products: Arc::new(ProductService::new(products.clone())),
        chat: Arc::new(ChatService::new(products, history, assistant)),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/products", get(handlers::list_products))
        .route("/products/:product_id", get(handlers::get_product))
        .route("/chat", post(handlers::chat))
        .route("/chat/history/:session_id", get(handlers::chat_history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let db = Database::open(&config.database.path).await?;
    let app = router(build_state(&config, &db).await?);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} ({} environment)",
        addr, config.environment
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
