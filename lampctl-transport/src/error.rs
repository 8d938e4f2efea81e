//! Transport errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),
    
    #[error("Connection failed: {0}")]
    Connect(String),
    
    #[error("Request failed: {0}")]
    Request(String),
    
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl Error {
    /// Check if the request never reached the device
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
    
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
