use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// one validated telemetry sample from the tank sensor
///
/// immutable once built: handlers hand out copies, never references into
/// the history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// sensor output voltage in volts
    pub voltage: f64,
    /// gauge pressure in kPa
    pub pressure_kpa: f64,
    /// water column height in metres
    pub water_depth_m: f64,
    /// derived tank volume in litres
    pub volume_liters: f64,
    /// server wall-clock time at receipt, never supplied by the device
    pub timestamp: DateTime<Local>,
}

impl Reading {
    pub fn new(
        voltage: f64,
        pressure_kpa: f64,
        water_depth_m: f64,
        volume_liters: f64,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            voltage,
            pressure_kpa,
            water_depth_m,
            volume_liters,
            timestamp,
        }
    }
}

/// console form, e.g. `V=3.300V, P=12.500kPa, D=1.200m, Vol=450.00L`
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V={:.3}V, P={:.3}kPa, D={:.3}m, Vol={:.2}L",
            self.voltage, self.pressure_kpa, self.water_depth_m, self.volume_liters
        )
    }
}

/// body returned to the device after a successful ingest
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    pub message: String,
    pub data: Reading,
}

impl IngestResponse {
    pub fn accepted(data: Reading) -> Self {
        Self {
            status: "success".to_string(),
            message: "Sensor data received".to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_matches_log_format() {
        let reading = Reading::new(3.3, 12.5, 1.2, 450.0, Local::now());
        let value = serde_json::to_value(reading).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["pressure_kpa", "timestamp", "voltage", "volume_liters", "water_depth_m"]
        );
        assert_eq!(obj["voltage"], 3.3);
        assert!(obj["timestamp"].is_string());
    }

    #[test]
    fn display_uses_console_precision() {
        let reading = Reading::new(3.3, 12.5, 1.2, 450.0, Local::now());
        assert_eq!(
            reading.to_string(),
            "V=3.300V, P=12.500kPa, D=1.200m, Vol=450.00L"
        );
    }
}
