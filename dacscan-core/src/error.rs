use alloc::{collections::TryReserveError, string::String};
use thiserror::Error;

/// Reason discovery of an interface could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterfaceError {
    #[error("interface is busy")]
    Busy,

    #[error("interface does not exist")]
    NotFound,

    #[error("interface appears to be disconnected or uninitialised")]
    Disconnected,

    #[error("interface could not be configured: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("unable to grow the configuration set store: {0}")]
    Allocation(TryReserveError),
}

impl From<TryReserveError> for DiscoveryError {
    fn from(e: TryReserveError) -> Self {
        DiscoveryError::Allocation(e)
    }
}
