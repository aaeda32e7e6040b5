use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use rtp_core::GeneratorMode;

/// `--mode` flag shared by the server and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Stateful,
    Stateless,
}

impl From<Mode> for GeneratorMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Stateful => GeneratorMode::Stateful,
            Mode::Stateless => GeneratorMode::Stateless,
        }
    }
}

/// Body of `GET /get`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PayoutResponse {
    pub result: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParamsReport {
    pub target_rtp: f64,
    pub low_payout: f64,
    pub high_payout: f64,
    pub sensitivity: f64,
    pub raw_win_probability: f64,
    pub win_probability: f64,
    pub probability_clamped: bool,
    pub max_balance: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub mode: String,
    pub seed_hash: String,
    pub target_rtp: f64,
    pub draws: u64,
    pub high_payouts: u64,
    pub total_payout: f64,
    pub realized_rtp: f64,
}

/// One CSV row of a stateful draw trace.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DrawRecord {
    pub index: u64,
    pub probability: f64,
    pub multiplier: f64,
    pub balance: f64,
}
