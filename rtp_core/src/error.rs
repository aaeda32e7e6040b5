#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("target RTP must be in (0, 1], got {0}")]
    InvalidRtp(f64),
    #[error("payouts must satisfy 0 <= low < high, got low={low} high={high}")]
    InvalidPayouts { low: f64, high: f64 },
    #[error("sensitivity must be a finite value >= 0, got {0}")]
    InvalidSensitivity(f64),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
