//! Lamp switch example
//!
//! Usage: `DEVICE_IP=192.168.0.53 cargo run --example lamp_control -- on|off|toggle`

use lampctl::{ClientConfig, DeviceControlClient, Error, PowerState};

#[tokio::main]
async fn main() -> lampctl::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let action = std::env::args().nth(1).unwrap_or_else(|| "toggle".to_string());

    let config = ClientConfig::from_env()?.with_refresh_after_control(true);
    let client = DeviceControlClient::from_config(config);

    // Learn the current relay state first so toggle has something to flip
    if let Err(e) = client.refresh().await {
        println!("Could not read status page: {}", e);
    }

    let desired = match action.as_str() {
        "toggle" => client.power_state().toggled(),
        other => other
            .parse::<PowerState>()
            .map_err(|e| Error::Config(e.to_string()))?,
    };

    match client.set_power(desired).await {
        Ok(state) => println!("✓ Lamp {}", state),
        Err(e) if e.is_rejected() => println!("✗ Device refused to switch the lamp: {}", e),
        Err(e @ Error::Unreachable(_)) => {
            println!("✗ Device unreachable, is it online on the same network? {}", e)
        }
        Err(e) => return Err(e),
    }

    let snapshot = client.snapshot();
    println!("Lamp:        {}", snapshot.power.as_str().to_uppercase());
    println!("Temperature: {}", snapshot.reading.temperature_label());
    println!("Humidity:    {}", snapshot.reading.humidity_label());

    Ok(())
}
