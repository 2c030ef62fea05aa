//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! a missing or unusable map view state, invalid configuration, and activations
//! that no longer point at a card or spot of the current layout pass.
use thiserror::Error;

use crate::layout::CardId;
use crate::spot::SpotId;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("map view state is not available")]
    ViewStateUnavailable,

    #[error("invalid map view state: {0}")]
    InvalidViewState(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no card bound for {card}")]
    UnknownCard { card: CardId },

    #[error("unknown spot '{id}'")]
    UnknownSpot { id: SpotId },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
