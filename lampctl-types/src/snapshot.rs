//! Client state snapshot

use chrono::{DateTime, Utc};

use crate::power::PowerState;
use crate::reading::EnvironmentReading;

/// In-flight state of one kind of request
///
/// Moves `Idle -> Pending -> Idle`. A request may only start from `Idle`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
}

impl RequestState {
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Everything the client knows about the device
///
/// Owned by the client. Callers receive copies and never mutate the
/// client's state through them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientSnapshot {
    /// Last known relay state
    pub power: PowerState,

    /// Last scraped sensor values
    pub reading: EnvironmentReading,

    /// Time of the last successful request, `None` before the first one
    pub last_updated: Option<DateTime<Utc>>,

    /// Lamp switch request in flight
    pub control: RequestState,

    /// Status page request in flight
    pub poll: RequestState,
}

impl ClientSnapshot {
    /// Whether the lamp controls should be disabled
    pub fn is_control_pending(&self) -> bool {
        self.control.is_pending()
    }

    pub fn is_poll_pending(&self) -> bool {
        self.poll.is_pending()
    }
}
