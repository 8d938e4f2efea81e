//! Device command definitions

use std::fmt;

use lampctl_types::PowerState;

use crate::constants::paths;

/// Requests understood by the lamp controller
///
/// Every command is a plain `GET` without body, headers or authentication.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Switch the relay on
    LampOn,

    /// Switch the relay off
    LampOff,

    /// Fetch the HTML status page
    Status,
}

impl Command {
    /// Request path on the device
    pub fn path(self) -> &'static str {
        match self {
            Self::LampOn => paths::LAMP_ON,
            Self::LampOff => paths::LAMP_OFF,
            Self::Status => paths::STATUS,
        }
    }
}

impl From<PowerState> for Command {
    fn from(state: PowerState) -> Self {
        match state {
            PowerState::On => Self::LampOn,
            PowerState::Off => Self::LampOff,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.path())
    }
}
