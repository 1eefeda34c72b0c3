use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Failures at the edges of the decoder. The tick path itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("invalid tick period: {0} seconds")]
    InvalidTickPeriod(f32),
    #[error("signal {index} has invalid duration {seconds}")]
    InvalidSignal { index: usize, seconds: f32 },
    #[error("invalid WPM: {0}")]
    InvalidWpm(i32),
}
