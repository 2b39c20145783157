// Hardware temperature readings
//
// Readings come from two external tools:
// - Storage temperature via S.M.A.R.T. (smartctl)
// - Chip/board sensors via lm-sensors (`sensors -f`)
//
// Both end up as `TemperatureReading`s in degrees Fahrenheit, shaped the way
// PRTG expects a result channel.

pub mod lm_sensors;
pub mod smart;

pub use lm_sensors::{parse_sensors_output, read_system_temperatures};
pub use smart::{parse_temperature, read_drive_temperature, SmartctlStatus};

use serde::{Deserialize, Serialize};

/// Unit symbol attached to every channel
pub const FAHRENHEIT_SYMBOL: &str = "°F";

/// Convert Celsius to Fahrenheit
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// PRTG channel unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Free-form unit, labelled by `customunit`
    Custom,
}

/// One temperature channel.
///
/// `value` is `None` when the temperature could not be determined; it is
/// serialized as `null`, never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub channel: String,
    pub value: Option<f64>,
    pub unit: Unit,
    pub customunit: String,
    pub float: bool,
}

impl TemperatureReading {
    /// Reading in degrees Fahrenheit
    pub fn fahrenheit(channel: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            channel: channel.into(),
            value,
            unit: Unit::Custom,
            customunit: FAHRENHEIT_SYMBOL.to_string(),
            float: true,
        }
    }

    /// Reading converted from degrees Celsius
    pub fn from_celsius(channel: impl Into<String>, celsius: Option<f64>) -> Self {
        Self::fahrenheit(channel, celsius.map(celsius_to_fahrenheit))
    }
}
