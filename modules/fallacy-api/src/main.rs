use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fallacy_api::{router, AppState};
use fallacy_common::Config;
use fallacy_scout::{build_sources, Aggregator, Corpus, Scheduler};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("fallacy=info".parse()?);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env()?;
    config.log_redacted();

    let sources = build_sources(&config).context("Failed to build sources")?;
    let corpus = Arc::new(Corpus::seeded(config.corpus_capacity, Utc::now()));
    let aggregator = Arc::new(Aggregator::from_config(&config, sources, corpus.clone()));

    // First run completes before the listener is bound.
    let (initial, scheduler) = Scheduler::new(aggregator, config.run_interval).start().await;
    info!("{initial}");

    let state = Arc::new(AppState {
        corpus,
        run_interval: config.run_interval,
        embed: config.embed.clone(),
    });
    let app = router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Fallacy API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, waiting for scheduler");
    scheduler.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
