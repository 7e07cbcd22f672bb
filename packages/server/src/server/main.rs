// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use extraction::{PdfExtractor, SourceExtractor, UrlExtractor};
use server_core::{
    kernel::{CompletionAI, MemoryStore, PostgresStore, ServerDeps},
    server::{build_app, AppSettings},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lead Research API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(model = %config.completion_model, "Configuration loaded");

    let ai = Arc::new(CompletionAI::connect(
        config.mistral_api_key.clone(),
        &config.completion_base_url,
        config.completion_model.clone(),
        config.generation_timeout,
    ));

    let url_extractor = UrlExtractor::new()
        .context("Failed to build HTTP client")?
        .with_timeout(config.fetch_timeout);
    let extractor = Arc::new(SourceExtractor::from_parts(
        url_extractor,
        PdfExtractor::new(),
    ));

    // Connect to database (connect also runs migrations)
    let postgres = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = PostgresStore::connect(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected, migrations complete");
            Some(Arc::new(store))
        }
        None => None,
    };

    let deps = match &postgres {
        Some(store) => ServerDeps::new(ai, extractor, store.clone(), store.clone()),
        None => {
            tracing::warn!("DATABASE_URL not set, usage and reports are kept in memory");
            let store = Arc::new(MemoryStore::new());
            ServerDeps::new(ai, extractor, store.clone(), store)
        }
    };

    // Build application
    let app = build_app(deps, &AppSettings::from(&config));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/api/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(store) = postgres {
        store.close().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler, wait forever rather than exit at once
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
