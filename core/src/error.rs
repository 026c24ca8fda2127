use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("Step index is outside the loaded path")]
    OutOfRange,
}

pub type Result<T> = core::result::Result<T, ReplayError>;
