use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rtp_core::ThreadSource;
use rtp_server::{app, AppState, Config, BIND_ADDR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    // validate before anything is bound; a bad RTP exits non-zero here
    let state = AppState::from_config(&config, ThreadSource)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let params = config.params();
    info!(
        mode = ?config.mode,
        rtp = params.target_rtp,
        low = params.low_payout,
        high = params.high_payout,
        sensitivity = params.sensitivity,
        win_probability = params.win_probability(),
        "generator ready"
    );
    if params.is_probability_clamped() {
        warn!(
            raw = params.raw_win_probability(),
            "derived win probability left [0, 1] and was clamped; realized RTP cannot reach target"
        );
    }

    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    info!("listening on {BIND_ADDR}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
