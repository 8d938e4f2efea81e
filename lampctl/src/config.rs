//! Client configuration

use std::time::Duration;

use lampctl_core::constants::{DEFAULT_DEVICE_IP, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT};
use lampctl_types::DeviceAddress;

use crate::error::{Error, Result};

/// Environment variable holding the device address
pub const ENV_DEVICE_IP: &str = "DEVICE_IP";

/// Environment variable holding the request timeout in milliseconds
pub const ENV_TIMEOUT_MS: &str = "DEVICE_TIMEOUT_MS";

/// Environment variable holding the polling interval in milliseconds
pub const ENV_POLL_INTERVAL_MS: &str = "DEVICE_POLL_INTERVAL_MS";

/// Environment variable enabling the refresh after a lamp switch
pub const ENV_REFRESH_AFTER_CONTROL: &str = "DEVICE_REFRESH_AFTER_CONTROL";

/// Settings for a [`DeviceControlClient`](crate::DeviceControlClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Device address, fixed for the lifetime of the client
    pub address: DeviceAddress,

    /// Timeout of a single request
    pub timeout: Duration,

    /// Interval between status page polls
    pub poll_interval: Duration,

    /// Refresh the status page once after every successful lamp switch
    pub refresh_after_control: bool,
}

impl ClientConfig {
    /// Configuration with default timings for `address`
    pub fn new(address: DeviceAddress) -> Self {
        Self {
            address,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            refresh_after_control: false,
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Refresh sensor values after each successful lamp switch
    pub fn with_refresh_after_control(mut self, enabled: bool) -> Self {
        self.refresh_after_control = enabled;
        self
    }

    /// Read configuration from `DEVICE_*` environment variables
    ///
    /// Unset variables fall back to the defaults, `DEVICE_IP` to the address
    /// the firmware ships with.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ip = lookup(ENV_DEVICE_IP).unwrap_or_else(|| DEFAULT_DEVICE_IP.to_string());
        let mut config = Self::new(DeviceAddress::new(ip)?);

        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            config.timeout = parse_millis(ENV_TIMEOUT_MS, &ms)?;
        }

        if let Some(ms) = lookup(ENV_POLL_INTERVAL_MS) {
            config.poll_interval = parse_millis(ENV_POLL_INTERVAL_MS, &ms)?;
        }

        if let Some(flag) = lookup(ENV_REFRESH_AFTER_CONTROL) {
            config.refresh_after_control = parse_flag(ENV_REFRESH_AFTER_CONTROL, &flag)?;
        }

        Ok(config)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    let ms = value
        .trim()
        .parse::<u64>()
        .map_err(|e| Error::Config(format!("{}={:?}: {}", key, value, e)))?;

    if ms == 0 {
        return Err(Error::Config(format!("{} must be greater than 0", key)));
    }

    Ok(Duration::from_millis(ms))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{}={:?}: expected a boolean", key, value))),
    }
}
