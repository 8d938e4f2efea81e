//! Device surface constants

/// Address the firmware is flashed with
pub const DEFAULT_DEVICE_IP: &str = "192.168.0.53";

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT: u64 = 5;

/// Default status page polling interval (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Request paths served by the firmware
pub mod paths {
    /// Switches the relay on
    pub const LAMP_ON: &str = "/lampada/on";

    /// Switches the relay off
    pub const LAMP_OFF: &str = "/lampada/off";

    /// HTML status page with sensor values and relay state
    pub const STATUS: &str = "/";
}

/// Labels the firmware prints on its status page
pub mod labels {
    pub const TEMPERATURE: &str = "Temperatura: ";
    pub const HUMIDITY: &str = "Umidade: ";
    pub const POWER: &str = "Estado: ";

    /// Celsius unit as the firmware writes it, HTML-escaped
    pub const CELSIUS_ENTITY: &str = " &deg;C";

    /// Celsius unit as it appears once the entity is decoded
    pub const CELSIUS: &str = " °C";

    pub const PERCENT: &str = " %";
}
