use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no source media bound")]
    NoSource,

    #[error("range end {end} is not after start {start}")]
    EmptyRange { start: f64, end: f64 },

    #[error("range [{start}, {end}) falls outside source duration {duration}")]
    RangeOutOfBounds { start: f64, end: f64, duration: f64 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
