//! Type definitions for lampctl

pub mod address;
pub mod error;
pub mod power;
pub mod reading;
pub mod snapshot;

pub use address::DeviceAddress;
pub use error::{Error, Result};
pub use power::PowerState;
pub use reading::EnvironmentReading;
pub use snapshot::{ClientSnapshot, RequestState};
