use thiserror::Error;

/// Errors raised while validating device identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid MAC address: {0}")]
    InvalidMac(String),
}
