use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use rtp_core::{build_generator, ConfigResult, PayoutGenerator, PayoutParams, RandomSource};
use rtp_shared::{Mode, PayoutResponse};

pub const BIND_ADDR: &str = "0.0.0.0:64333";

#[derive(Debug, Parser)]
#[command(
    name = "rtp-server",
    about = "Serves payout multipliers tuned to a target RTP",
    allow_negative_numbers = true
)]
pub struct Config {
    /// Target RTP in (0, 1]
    #[arg(long, env = "RTP_TARGET")]
    pub rtp: f64,
    #[arg(long, value_enum, default_value_t = Mode::Stateful)]
    pub mode: Mode,
    #[arg(long, env = "RTP_LOW", default_value_t = PayoutParams::DEFAULT_LOW)]
    pub low: f64,
    #[arg(long, env = "RTP_HIGH", default_value_t = PayoutParams::DEFAULT_HIGH)]
    pub high: f64,
    /// Balance feedback strength (stateful mode only)
    #[arg(long, env = "RTP_SENSITIVITY", default_value_t = PayoutParams::DEFAULT_SENSITIVITY)]
    pub sensitivity: f64,
}

impl Config {
    pub fn params(&self) -> PayoutParams {
        PayoutParams::new(self.rtp)
            .with_payouts(self.low, self.high)
            .with_sensitivity(self.sensitivity)
    }
}

#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn PayoutGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn PayoutGenerator>) -> Self {
        Self { generator }
    }

    pub fn from_config<S>(config: &Config, source: S) -> ConfigResult<Self>
    where
        S: RandomSource + 'static,
    {
        let generator = build_generator(config.mode.into(), config.params(), source)?;
        Ok(Self::new(Arc::from(generator)))
    }
}

async fn route_get(State(state): State<AppState>) -> Response {
    let multiplier = state.generator.next();
    debug!(multiplier, "draw");
    match serde_json::to_vec(&PayoutResponse { result: multiplier }) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/get", get(route_get))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
