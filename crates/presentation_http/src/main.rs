//! Mailsmith HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    ClassifierService, DraftService, EmailService,
    ports::{CompletionPort, EmailStore},
};
use infrastructure::{AppConfig, OpenAiCompletionAdapter, SqliteEmailStore, create_pool};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailsmith_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("📬 Mailsmith v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.completion.model,
        "Configuration loaded"
    );

    if config.completion.api_key.is_empty() {
        tracing::warn!("⚠️  No OpenAI API key configured, drafts will use local fallbacks");
    }

    // Initialize persistence
    let pool = create_pool(&config.database)
        .map_err(|e| anyhow::anyhow!("Failed to initialize database: {e}"))?;
    let store: Arc<dyn EmailStore> = Arc::new(SqliteEmailStore::new(Arc::new(pool)));

    // Initialize completion client
    let adapter = OpenAiCompletionAdapter::new(config.completion.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize completion client: {e}"))?;
    let completion: Arc<dyn CompletionPort> = Arc::new(adapter);

    // Initialize services
    let email_service = EmailService::new(store);
    let classifier = ClassifierService::new(Arc::clone(&completion));
    let draft_service = DraftService::new(completion, classifier);

    let state = AppState {
        email_service: Arc::new(email_service),
        draft_service: Arc::new(draft_service),
    };

    // Build router with middleware
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/docs", addr);

    // Graceful shutdown configuration
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
    // Note: The actual connection draining is handled by axum's graceful_shutdown
}
