use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid deck count: {0} (the shoe needs at least one deck)")]
    InvalidDeckCount(u8),
}
