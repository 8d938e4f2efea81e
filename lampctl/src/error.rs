//! High-level error types

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Kind of request guarded by an in-flight flag
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Lamp switch (`set_power`)
    Control,
    
    /// Status page poll (`refresh`)
    Poll,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Control => f.write_str("control"),
            Self::Poll => f.write_str("poll"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Same kind of request already in flight, nothing was sent
    #[error("A {0} request is already in flight")]
    Busy(Operation),
    
    /// Device answered with a non-2xx status
    #[error("Device rejected the request (HTTP {status})")]
    DeviceRejected { status: u16 },
    
    /// Request never completed: timeout, refused connection, DNS failure
    #[error("Device unreachable: {0}")]
    Unreachable(#[from] lampctl_transport::Error),
    
    #[error("Invalid address: {0}")]
    Address(#[from] lampctl_types::Error),
    
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
    
    /// Check if the device was reached and refused the request
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::DeviceRejected { .. })
    }
    
    /// Check if the device could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}
