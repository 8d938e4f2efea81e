//! Status page scraping
//!
//! The firmware does not serve structured data. Its root page is HTML with
//! lines such as:
//!
//! ```text
//! <p>Temperatura: 23.5 &deg;C</p>
//! <p>Umidade: 61.2 %</p>
//! <p>Estado: on</p>
//! ```
//!
//! Each value is looked up on its own. A value that cannot be found is
//! reported as unknown instead of failing the whole page.

use lampctl_types::{EnvironmentReading, PowerState};
use tracing::trace;

use crate::constants::labels;

/// Values scraped from one status page
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceStatus {
    /// Relay state reported by the device, when the page contains one
    pub power: Option<PowerState>,

    /// Sensor values, each possibly unknown
    pub reading: EnvironmentReading,
}

impl DeviceStatus {
    /// Scrape a status page body
    ///
    /// Never fails: unmatched fields are `None`.
    pub fn parse(body: &str) -> Self {
        let temperature = scrape_number(
            body,
            labels::TEMPERATURE,
            &[labels::CELSIUS_ENTITY, labels::CELSIUS],
        );
        let humidity = scrape_number(body, labels::HUMIDITY, &[labels::PERCENT]);
        let power = scrape_power(body);

        let status = Self {
            power,
            reading: EnvironmentReading::new(temperature, humidity),
        };

        trace!("Scraped status page ({} bytes): {:?}", body.len(), status);

        status
    }
}

/// First `{label}{number}{unit}` occurrence in `body`
fn scrape_number(body: &str, label: &str, units: &[&str]) -> Option<f64> {
    body.match_indices(label).find_map(|(idx, _)| {
        let rest = &body[idx + label.len()..];
        let len = number_len(rest)?;
        let (number, tail) = rest.split_at(len);

        if units.iter().any(|unit| tail.starts_with(unit)) {
            number.parse().ok()
        } else {
            None
        }
    })
}

/// Length of the decimal number at the start of `s`
///
/// Accepts an optional `-`, one or more digits, then optionally `.` and more
/// digits.
fn number_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = usize::from(bytes.first() == Some(&b'-'));

    let digits_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }

    if i == digits_start {
        return None;
    }

    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }

    Some(i)
}

/// First `Estado: on|off` occurrence in `body`
fn scrape_power(body: &str) -> Option<PowerState> {
    body.match_indices(labels::POWER).find_map(|(idx, _)| {
        let rest = &body[idx + labels::POWER.len()..];

        [PowerState::On, PowerState::Off]
            .into_iter()
            .find(|state| {
                rest.strip_prefix(state.as_str())
                    .is_some_and(|tail| !tail.starts_with(|c: char| c.is_alphanumeric()))
            })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    const FIRMWARE_PAGE: &str = "<!DOCTYPE html><html><head><title>ESP32</title></head><body>\
        <h1>Controle ESP32</h1>\
        <p>Temperatura: 23.5 &deg;C</p>\
        <p>Umidade: 61.2 %</p>\
        <p>Estado: off</p>\
        <a href=\"/lampada/on\">Ligar</a> <a href=\"/lampada/off\">Desligar</a>\
        </body></html>";

    #[test]
    fn test_parse_firmware_page() {
        let status = DeviceStatus::parse(FIRMWARE_PAGE);

        assert_eq!(
            status,
            DeviceStatus {
                power: Some(PowerState::Off),
                reading: EnvironmentReading::new(Some(23.5), Some(61.2)),
            }
        );
    }

    #[test]
    fn test_parse_with_power_on() {
        let body = "... Temperatura: 21.0 &deg;C ... Umidade: 55.0 % ... Estado: on</p> ...";
        let status = DeviceStatus::parse(body);

        assert_eq!(status.reading.temperature, Some(21.0));
        assert_eq!(status.reading.humidity, Some(55.0));
        assert_eq!(status.power, Some(PowerState::On));
    }

    #[test]
    fn test_parse_nothing_matches() {
        let status = DeviceStatus::parse("<html><body>Sensor error</body></html>");

        assert_eq!(status, DeviceStatus::default());
        assert!(status.reading.is_empty());
    }

    #[test]
    fn test_parse_empty_body() {
        assert_eq!(DeviceStatus::parse(""), DeviceStatus::default());
    }

    #[test]
    fn test_fields_are_independent() {
        let status = DeviceStatus::parse("<p>Umidade: 48 %</p>");

        assert_eq!(status.reading.temperature, None);
        assert_eq!(status.reading.humidity, Some(48.0));
        assert_eq!(status.power, None);
    }

    #[test]
    fn test_decoded_degree_sign() {
        let status = DeviceStatus::parse("Temperatura: 19.25 °C");
        assert_eq!(status.reading.temperature, Some(19.25));
    }

    #[test]
    fn test_negative_temperature() {
        let status = DeviceStatus::parse("Temperatura: -3.5 &deg;C");
        assert_eq!(status.reading.temperature, Some(-3.5));
    }

    #[test]
    fn test_integer_and_trailing_dot() {
        assert_eq!(
            DeviceStatus::parse("Temperatura: 22 &deg;C").reading.temperature,
            Some(22.0)
        );
        assert_eq!(
            DeviceStatus::parse("Umidade: 50. %").reading.humidity,
            Some(50.0)
        );
    }

    #[test]
    fn test_failed_sensor_read_is_unknown() {
        // DHT22 read failures are printed as "nan"
        let status = DeviceStatus::parse("<p>Temperatura: nan &deg;C</p><p>Umidade: nan %</p>");
        assert!(status.reading.is_empty());
    }

    #[test]
    fn test_unit_must_follow_number() {
        let status = DeviceStatus::parse("Temperatura: 23.5 K Umidade: 40%");
        assert!(status.reading.is_empty());
    }

    #[test]
    fn test_first_complete_match_wins() {
        let body = "Temperatura: -- &deg;C Temperatura: 18.0 &deg;C Temperatura: 30.0 &deg;C";
        assert_eq!(DeviceStatus::parse(body).reading.temperature, Some(18.0));
    }

    #[test]
    fn test_power_token_must_end() {
        assert_eq!(DeviceStatus::parse("Estado: online").power, None);
        assert_eq!(DeviceStatus::parse("Estado: offline").power, None);
        assert_eq!(DeviceStatus::parse("Estado: off").power, Some(PowerState::Off));
        assert_eq!(DeviceStatus::parse("Estado: on<br>").power, Some(PowerState::On));
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let status = DeviceStatus::parse("temperatura: 20.0 &deg;C umidade: 30.0 % estado: on");
        assert_eq!(status, DeviceStatus::default());
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(body in ".*") {
            let _ = DeviceStatus::parse(&body);
        }

        #[test]
        fn prop_values_survive_surrounding_markup(
            temperature in -40.0f64..80.0,
            humidity in 0.0f64..100.0,
            on in any::<bool>(),
            prefix in "[a-z<>/ ]{0,40}",
            suffix in "[a-z<>/ ]{0,40}",
        ) {
            let power = PowerState::from(on);
            let body = format!(
                "{}<p>Temperatura: {:.1} &deg;C</p><p>Umidade: {:.1} %</p><p>Estado: {}</p>{}",
                prefix, temperature, humidity, power, suffix
            );

            let status = DeviceStatus::parse(&body);
            let expected_temperature: f64 = format!("{:.1}", temperature).parse().unwrap();
            let expected_humidity: f64 = format!("{:.1}", humidity).parse().unwrap();

            prop_assert_eq!(status.reading.temperature, Some(expected_temperature));
            prop_assert_eq!(status.reading.humidity, Some(expected_humidity));
            prop_assert_eq!(status.power, Some(power));
        }
    }
}
