//! Transport layer for the lamp controller
//!
//! Provides HTTP communication with the device.

pub mod error;
pub mod http;

pub use error::{Error, Result};
pub use http::HttpTransport;

use async_trait::async_trait;

/// Response to a device request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    
    /// Body decoded as text
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
    
    /// Check if the device accepted the request (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait for different communication methods
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a `GET` for a request path such as `/lampada/on`
    async fn get(&self, path: &str) -> Result<Response>;
    
    /// Get base URL of the device
    fn base_url(&self) -> String;
}
