use std::sync::Arc;

use query_bridge::channels::{WEBHOOK_PATH, create_router};
use query_bridge::config::BridgeConfig;
use query_bridge::error::{ConfigError, Error};
use query_bridge::llm::create_provider;
use query_bridge::pipeline::{IntentClassifier, QueryProcessor, ResponseGenerator};
use query_bridge::store::{LibSqlBackend, RecordStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Install rustls crypto provider before any TLS usage
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Warning: rustls crypto provider was already installed");
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BridgeConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        // Names the key variable of the selected backend.
        if let ConfigError::MissingEnvVar(var) = &e {
            eprintln!("  export {}=...", var);
        }
        std::process::exit(1);
    });
    let addr = config.bind_addr()?;

    eprintln!("📨 Query Bridge v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {} ({:?})", config.llm.model, config.llm.backend);
    eprintln!("   Webhook: http://{}{}", addr, WEBHOOK_PATH);

    // ── LLM ──────────────────────────────────────────────────────────────
    let llm = create_provider(&config.llm)?;

    // ── Database ─────────────────────────────────────────────────────────
    let store: Arc<dyn RecordStore> = Arc::new(LibSqlBackend::new_local(&config.db_path).await?);
    eprintln!("   Database: {}", config.db_path.display());

    // ── Pipeline ─────────────────────────────────────────────────────────
    let mut processor = QueryProcessor::new(
        IntentClassifier::new(Arc::clone(&llm)),
        ResponseGenerator::new(llm).with_max_tokens(config.max_reply_tokens),
        store,
    );
    if let Some(summary) = config.org_summary.clone() {
        eprintln!("   Organisation summary: custom ({} chars)", summary.len());
        processor = processor.with_org_summary(summary);
    }

    // ── HTTP ─────────────────────────────────────────────────────────────
    let app = create_router(Arc::new(processor));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
