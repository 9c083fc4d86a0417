use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use locale_switch::config::Config;
use locale_switch::services::SessionPurgeTask;
use locale_switch::utils::ScheduledExecutor;
use locale_switch::{AppState, build_router, logging};

#[derive(Debug, Parser)]
#[command(name = "locale-switch", version, about = "Session-backed locale switching server")]
struct Args {
    /// Path to config.toml (defaults to conf/config.toml or ./config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    let _log_guard = logging::init(&config.logging)?;

    tracing::info!(
        "Locales: default='{}', validate={}, available=[{}]",
        config.locale.default,
        config.locale.validate,
        config
            .locale
            .available
            .iter()
            .map(|l| l.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let state = Arc::new(AppState::new(config.clone()));

    let purge_task = Arc::new(SessionPurgeTask::new(Arc::clone(&state.sessions)));
    let purge_shutdown = purge_task.shutdown_handle();
    let purge_handle = ScheduledExecutor::new(
        "session-purge",
        Duration::from_secs(config.session.purge_interval),
    )
    .spawn(purge_task);

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    purge_shutdown.store(true, std::sync::atomic::Ordering::Relaxed);
    purge_handle.abort();
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
