//! # lampctl
//!
//! Client for ESP32 lamp controllers that expose a relay and a DHT22
//! temperature/humidity sensor over plain HTTP.
//!
//! ## Features
//!
//! - Switch the lamp with `GET /lampada/on` and `GET /lampada/off`
//! - Scrape temperature, humidity and relay state from the status page
//! - Owned state snapshot with change notifications
//! - Interval polling with cancellation
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lampctl::{ClientConfig, DeviceControlClient, PowerState};
//!
//! #[tokio::main]
//! async fn main() -> lampctl::Result<()> {
//!     let config = ClientConfig::from_env()?.with_refresh_after_control(true);
//!     let client = Arc::new(DeviceControlClient::from_config(config));
//!     
//!     // Keep sensor values fresh
//!     let poller = client.spawn_poller();
//!     
//!     // Switch the lamp on
//!     client.set_power(PowerState::On).await?;
//!     println!("{}", client.snapshot().reading);
//!     
//!     poller.stop().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poller;

// Re-exports
pub use client::DeviceControlClient;
pub use config::ClientConfig;
pub use error::{Error, Operation, Result};
pub use poller::{PollHandle, Poller};

// Re-export types
pub use lampctl_core::{Command, DeviceStatus};
pub use lampctl_transport::{HttpTransport, Response, Transport};
pub use lampctl_types::{
    ClientSnapshot, DeviceAddress, EnvironmentReading, PowerState, RequestState,
};
