//! # lampctl-core
//!
//! Primitives for the HTTP surface of the ESP32 lamp controller:
//! - Commands and the request paths they map to
//! - Status page scraping (temperature, humidity, relay state)
//! - Device constants

pub mod command;
pub mod constants;
pub mod status_page;

pub use command::Command;
pub use status_page::DeviceStatus;
