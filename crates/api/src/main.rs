use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clearcare_api::config::ServerConfig;
use clearcare_api::router::build_app_router;
use clearcare_api::state::AppState;
use clearcare_core::completion::TextCompletion;
use clearcare_core::store::{MemoryStore, RecordStore};
use clearcare_llm::{AnthropicClient, CompletionConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "clearcare_api=debug,clearcare_db=debug,clearcare_llm=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Record store ---
    let store: Arc<dyn RecordStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = clearcare_db::create_pool(database_url, config.db_max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            clearcare_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            clearcare_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(clearcare_db::PgRecordStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, conversations are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    // --- Completion client ---
    let completion_config = CompletionConfig::from_env();
    if completion_config.api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY not set, coaching endpoints will return fallback text");
    }
    let client = AnthropicClient::new(&completion_config).expect("Failed to build HTTP client");
    tracing::info!(model = client.model(), "Completion client ready");
    let completion: Arc<dyn TextCompletion> = Arc::new(client);

    // --- Router ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(store, completion, config);
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
