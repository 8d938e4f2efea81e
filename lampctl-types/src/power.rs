//! Lamp relay state

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Last known relay state
///
/// This is what the client observed, not a guarantee about the hardware: the
/// device acknowledges a switch with nothing more than an HTTP 2xx.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum PowerState {
    On,
    #[default]
    Off,
}

impl PowerState {
    /// Token used by the device in paths and on its status page
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl FromStr for PowerState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(Error::Parse(format!("unknown power state: {:?}", other))),
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
