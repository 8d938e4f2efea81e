//! Environment sensor readings

use std::fmt;

/// Placeholder rendered for a value the status page did not provide
pub const UNKNOWN: &str = "--";

/// Temperature and humidity scraped from the device status page
///
/// Each value is independently optional. `None` means the page did not
/// contain a recognisable value, which is not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentReading {
    /// Temperature in degrees Celsius
    pub temperature: Option<f64>,

    /// Relative humidity in percent
    pub humidity: Option<f64>,
}

impl EnvironmentReading {
    pub fn new(temperature: Option<f64>, humidity: Option<f64>) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    /// Both values unknown
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none()
    }

    /// Temperature with one fractional digit, e.g. `23.5 °C`, or `--`
    pub fn temperature_label(&self) -> String {
        label(self.temperature, "°C")
    }

    /// Humidity with one fractional digit, e.g. `61.2 %`, or `--`
    pub fn humidity_label(&self) -> String {
        label(self.humidity, "%")
    }
}

fn label(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{:.1} {}", value, unit),
        None => UNKNOWN.to_string(),
    }
}

impl fmt::Display for EnvironmentReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temperature: {}, humidity: {}",
            self.temperature_label(),
            self.humidity_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown() {
        let reading = EnvironmentReading::unknown();
        assert!(reading.is_empty());
        assert_eq!(reading.temperature_label(), "--");
        assert_eq!(reading.humidity_label(), "--");
    }

    #[test]
    fn test_labels_use_one_fractional_digit() {
        let reading = EnvironmentReading::new(Some(21.0), Some(55.26));
        assert_eq!(reading.temperature_label(), "21.0 °C");
        assert_eq!(reading.humidity_label(), "55.3 %");
        assert_eq!(reading.to_string(), "temperature: 21.0 °C, humidity: 55.3 %");
    }

    #[test]
    fn test_partial() {
        let reading = EnvironmentReading::new(None, Some(40.0));
        assert!(!reading.is_empty());
        assert_eq!(reading.temperature_label(), "--");
        assert_eq!(reading.humidity_label(), "40.0 %");
    }
}
