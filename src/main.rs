use anyhow::Result;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alphawatch::config::Config;
use alphawatch::feed::AlphaFeedClient;
use alphawatch::monitor::AlphaMonitor;
use alphawatch::notify::TelegramNotifier;
use alphawatch::store::SnapshotStore;

fn init_tracing() -> Result<()> {
    // Create logs directory if it doesn't exist
    std::fs::create_dir_all("logs")?;

    // Create file appender for logs
    let file_appender = tracing_appender::rolling::daily("logs", "alphawatch.log");
    let (non_blocking_file, _guard) = tracing_appender::non_blocking(file_appender);

    // Create console layer with formatting
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .compact();

    // Create file layer with JSON formatting
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .json()
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Leak the guard to prevent the file appender from being dropped
    std::mem::forget(_guard);

    Ok(())
}

#[cfg(unix)]
async fn terminate_signal() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!("Failed to register SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await;
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    info!("🛰  Alphawatch - Airdrop Schedule Monitor");
    info!("========================================");

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = Config::load_or_default(&config_path)?;

    let feed = AlphaFeedClient::new(&config.feed)?;
    let notifier = TelegramNotifier::new(config.telegram.clone())?;
    let store = SnapshotStore::new(&config.state.snapshot_file);
    let monitor = AlphaMonitor::new(feed, notifier, store, config.poll.clone());

    let (shutdown_tx, _) = broadcast::channel(16);
    let monitor_shutdown = shutdown_tx.subscribe();
    let monitor_task = tokio::spawn(async move {
        match monitor.run(monitor_shutdown).await {
            Ok(()) => info!("Monitor loop completed"),
            Err(e) => error!("Monitor loop error: {}", e),
        }
    });

    info!("🎯 Monitoring started, press Ctrl+C to shut down");

    tokio::select! {
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => info!("🛑 Shutdown signal received"),
                Err(e) => error!("Failed to listen for shutdown signal: {}", e),
            }
        }
        _ = terminate_signal() => {
            info!("🛑 Termination signal received");
        }
    }

    // The flush save happens inside the monitor before its task ends.
    let _ = shutdown_tx.send(());
    if let Err(e) = monitor_task.await {
        error!("Monitor task failed: {}", e);
    }

    info!("👋 Alphawatch shutdown complete");
    Ok(())
}
