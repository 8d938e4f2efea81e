//! Sensor monitor example
//!
//! Polls the status page and prints every change for `MONITOR_SECS` seconds
//! (default 60).

use std::sync::Arc;
use std::time::Duration;

use lampctl::{ClientConfig, DeviceControlClient};

#[tokio::main]
async fn main() -> lampctl::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let secs = std::env::var("MONITOR_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60);

    let config = ClientConfig::from_env()?;
    println!("Monitoring {} every {:?}...", config.address, config.poll_interval);

    let client = Arc::new(DeviceControlClient::from_config(config));
    let mut updates = client.subscribe();
    let poller = client.spawn_poller();

    let deadline = tokio::time::sleep(Duration::from_secs(secs));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }

                let snapshot = updates.borrow_and_update().clone();
                if snapshot.is_poll_pending() {
                    continue;
                }

                println!(
                    "[{}] lamp {} | {} | {}",
                    snapshot
                        .last_updated
                        .map(|t| t.format("%H:%M:%S").to_string())
                        .unwrap_or_else(|| "--:--:--".to_string()),
                    snapshot.power.as_str().to_uppercase(),
                    snapshot.reading.temperature_label(),
                    snapshot.reading.humidity_label(),
                );
            }
        }
    }

    poller.stop().await;
    println!("Done!");

    Ok(())
}
