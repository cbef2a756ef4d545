use anyhow::Result;
use tracing_subscriber::EnvFilter;
mod services;
mod state;

use crate::state::AppState;

fn build_time() -> String {
    let build_time_raw = option_env!("BUILD_TIME").unwrap_or("unknown");
    build_time_raw
        .parse::<i64>()
        .ok()
        .and_then(|epoch| chrono::DateTime::from_timestamp(epoch, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| build_time_raw.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        "🚀 Starting scalping alert bot (commit {} on {}, built {})",
        option_env!("GIT_HASH").unwrap_or("unknown"),
        option_env!("GIT_BRANCH").unwrap_or("unknown"),
        build_time()
    );

    let app_state = AppState::new()?;
    tracing::info!(
        "AppState initialized: {} mode, top {} {} pairs every {:?}",
        app_state.config.signal_mode,
        app_state.config.top_symbols,
        app_state.config.quote_asset,
        app_state.config.check_every
    );

    let mut scanner = app_state.build_scanner()?;
    tracing::info!("Signals are logged to {}", app_state.config.log_file.display());

    tokio::select! {
        _ = scanner.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl-C received, shutting down");
        }
    }

    Ok(())
}
