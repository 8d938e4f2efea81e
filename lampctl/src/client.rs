//! High-level device client

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use lampctl_core::{Command, DeviceStatus};
use lampctl_transport::{HttpTransport, Response, Transport};
use lampctl_types::{ClientSnapshot, DeviceAddress, EnvironmentReading, PowerState, RequestState};

use crate::config::ClientConfig;
use crate::error::{Error, Operation, Result};
use crate::poller::{PollHandle, Poller};

/// Lamp controller client
///
/// Switches the lamp relay and scrapes sensor values from the device status
/// page. The client owns a [`ClientSnapshot`] of everything it learned;
/// callers read copies with [`snapshot`](Self::snapshot) or watch changes
/// with [`subscribe`](Self::subscribe).
///
/// At most one lamp switch and one status poll are in flight at a time. A
/// second call of the same kind fails with [`Error::Busy`] without touching
/// the network; a switch and a poll may run concurrently.
///
/// # Examples
///
/// ```no_run
/// use lampctl::{DeviceAddress, DeviceControlClient, PowerState};
///
/// #[tokio::main]
/// async fn main() -> lampctl::Result<()> {
///     let client = DeviceControlClient::new(DeviceAddress::new("192.168.0.53")?);
///
///     client.set_power(PowerState::On).await?;
///
///     let status = client.refresh().await?;
///     println!("{}", status.reading);
///     Ok(())
/// }
/// ```
pub struct DeviceControlClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    state: watch::Sender<ClientSnapshot>,
}

impl DeviceControlClient {
    /// Create a client with default settings (HTTP transport)
    pub fn new(address: DeviceAddress) -> Self {
        Self::from_config(ClientConfig::new(address))
    }

    /// Create a client from configuration (HTTP transport)
    pub fn from_config(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(config.address.clone()).with_timeout(config.timeout);
        Self::with_transport(config, Box::new(transport))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: Box<dyn Transport>) -> Self {
        let (state, _) = watch::channel(ClientSnapshot::default());

        Self {
            config,
            transport,
            state,
        }
    }

    pub fn address(&self) -> &DeviceAddress {
        &self.config.address
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ClientSnapshot {
        self.state.borrow().clone()
    }

    /// Last known relay state
    pub fn power_state(&self) -> PowerState {
        self.state.borrow().power
    }

    /// Last scraped sensor values
    pub fn reading(&self) -> EnvironmentReading {
        self.state.borrow().reading
    }

    /// Watch state changes, in-flight flags included
    pub fn subscribe(&self) -> watch::Receiver<ClientSnapshot> {
        self.state.subscribe()
    }

    /// Switch the lamp relay
    ///
    /// Returns the new state once the device acknowledged it with a 2xx. On
    /// failure the stored state is left as it was. There are no retries.
    ///
    /// # Errors
    ///
    /// - [`Error::Busy`] if another switch is in flight
    /// - [`Error::DeviceRejected`] if the device answered with a non-2xx status
    /// - [`Error::Unreachable`] if the request failed in transport
    pub async fn set_power(&self, desired: PowerState) -> Result<PowerState> {
        let guard = self.begin(Operation::Control)?;

        let command = Command::from(desired);
        info!("Switching lamp {} at {}...", desired, self.config.address);

        self.send(command).await?;

        self.state.send_modify(|state| {
            state.power = desired;
            state.last_updated = Some(Utc::now());
        });

        info!("Lamp switched {}", desired);

        // Release the control flag before resynchronising
        drop(guard);

        if self.config.refresh_after_control {
            match self.refresh().await {
                Ok(_) => {}
                Err(Error::Busy(_)) => debug!("Status poll already in flight, skipping refresh"),
                Err(e) => warn!("Refresh after switching lamp failed: {}", e),
            }
        }

        Ok(desired)
    }

    /// Poll the status page and scrape its values
    ///
    /// Any subset of temperature, humidity and relay state may be missing from
    /// the page; missing sensor values become unknown, a missing relay state
    /// keeps the stored one. A reported relay state overrides the stored one.
    ///
    /// # Errors
    ///
    /// - [`Error::Busy`] if another poll is in flight
    /// - [`Error::DeviceRejected`] if the device answered with a non-2xx status
    /// - [`Error::Unreachable`] if the request failed in transport
    pub async fn refresh(&self) -> Result<DeviceStatus> {
        let _guard = self.begin(Operation::Poll)?;

        debug!("Polling status page at {}...", self.config.address);

        let response = self.send(Command::Status).await?;
        let status = DeviceStatus::parse(&response.body);

        self.state.send_modify(|state| {
            if let Some(power) = status.power {
                state.power = power;
            }
            state.reading = status.reading;
            state.last_updated = Some(Utc::now());
        });

        debug!("Device status: lamp={:?}, {}", status.power, status.reading);

        Ok(status)
    }

    /// Start polling the status page every configured interval
    ///
    /// See [`Poller::spawn`].
    pub fn spawn_poller(self: &Arc<Self>) -> PollHandle {
        Poller::spawn(Arc::clone(self), self.config.poll_interval)
    }

    // Helper methods

    fn begin(&self, operation: Operation) -> Result<InFlight<'_>> {
        let acquired = self.state.send_if_modified(|state| {
            let flag = flag_mut(state, operation);
            if flag.is_pending() {
                return false;
            }
            *flag = RequestState::Pending;
            true
        });

        if !acquired {
            debug!("Rejecting {} request: already in flight", operation);
            return Err(Error::Busy(operation));
        }

        Ok(InFlight {
            state: &self.state,
            operation,
        })
    }

    async fn send(&self, command: Command) -> Result<Response> {
        let response = self.transport.get(command.path()).await.map_err(|e| {
            warn!("{} to {} failed: {}", command, self.transport.base_url(), e);
            Error::Unreachable(e)
        })?;

        if !response.is_success() {
            warn!("{} rejected by device: HTTP {}", command, response.status);
            return Err(Error::DeviceRejected {
                status: response.status,
            });
        }

        Ok(response)
    }
}

fn flag_mut(state: &mut ClientSnapshot, operation: Operation) -> &mut RequestState {
    match operation {
        Operation::Control => &mut state.control,
        Operation::Poll => &mut state.poll,
    }
}

/// Pending in-flight flag, reset to idle on drop
///
/// Dropping also covers cancelled futures, so a flag can never stay pending.
struct InFlight<'a> {
    state: &'a watch::Sender<ClientSnapshot>,
    operation: Operation,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| {
            *flag_mut(state, self.operation) = RequestState::Idle;
        });
    }
}
