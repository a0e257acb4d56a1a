//! turns device query parameters into a [`Reading`]
//!
//! a missing (or blank) parameter defaults to `0`, while a present value that
//! does not parse is rejected. both halves of that asymmetry are relied upon
//! by deployed devices.

use chrono::{DateTime, Local};

use crate::domain::Reading;
use crate::error::ApiError;

pub const VOLTAGE: &str = "voltage";
pub const PRESSURE_KPA: &str = "pressure_kpa";
pub const WATER_DEPTH_M: &str = "water_depth_m";
pub const VOLUME_LITERS: &str = "volume_liters";

/// build a reading from decoded `name=value` pairs, stamped with `received_at`
///
/// nothing is committed here; the caller appends only on `Ok`.
pub fn parse_reading(
    params: &[(String, String)],
    received_at: DateTime<Local>,
) -> Result<Reading, ApiError> {
    Ok(Reading::new(
        field(params, VOLTAGE)?,
        field(params, PRESSURE_KPA)?,
        field(params, WATER_DEPTH_M)?,
        field(params, VOLUME_LITERS)?,
        received_at,
    ))
}

/// first non-blank value for `name`, or `"0"`
fn first_value<'a>(params: &'a [(String, String)], name: &str) -> &'a str {
    params
        .iter()
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.as_str())
        .unwrap_or("0")
}

fn field(params: &[(String, String)], name: &'static str) -> Result<f64, ApiError> {
    let raw = first_value(params, name);
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ApiError::InvalidParameter {
            name,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_all_four_fields() {
        let now = Local::now();
        let params = pairs(&[
            ("voltage", "3.3"),
            ("pressure_kpa", "12.5"),
            ("water_depth_m", "1.2"),
            ("volume_liters", "450.0"),
        ]);

        let reading = parse_reading(&params, now).unwrap();
        assert_eq!(reading, Reading::new(3.3, 12.5, 1.2, 450.0, now));
    }

    #[test]
    fn missing_field_defaults_to_zero() {
        let params = pairs(&[("voltage", "3.3"), ("water_depth_m", "1.2"), ("volume_liters", "450")]);
        let reading = parse_reading(&params, Local::now()).unwrap();
        assert_eq!(reading.pressure_kpa, 0.0);
        assert_eq!(reading.voltage, 3.3);
    }

    #[test]
    fn empty_request_is_all_zeros() {
        let reading = parse_reading(&[], Local::now()).unwrap();
        assert_eq!(
            (reading.voltage, reading.pressure_kpa, reading.water_depth_m, reading.volume_liters),
            (0.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let params = pairs(&[("voltage", ""), ("voltage", "2.5")]);
        let reading = parse_reading(&params, Local::now()).unwrap();
        assert_eq!(reading.voltage, 2.5);

        let reading = parse_reading(&pairs(&[("pressure_kpa", "")]), Local::now()).unwrap();
        assert_eq!(reading.pressure_kpa, 0.0);
    }

    #[test]
    fn first_value_wins() {
        let params = pairs(&[("voltage", "1.0"), ("voltage", "9.0")]);
        let reading = parse_reading(&params, Local::now()).unwrap();
        assert_eq!(reading.voltage, 1.0);
    }

    #[test]
    fn non_numeric_is_rejected() {
        let params = pairs(&[("voltage", "abc"), ("pressure_kpa", "12.5")]);
        match parse_reading(&params, Local::now()) {
            Err(ApiError::InvalidParameter { name, value }) => {
                assert_eq!(name, VOLTAGE);
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn later_bad_value_is_ignored_when_first_is_good() {
        let params = pairs(&[("volume_liters", "10"), ("volume_liters", "oops")]);
        assert!(parse_reading(&params, Local::now()).is_ok());
    }

    #[test]
    fn non_finite_is_rejected() {
        for bad in ["nan", "inf", "-infinity", "1e999"] {
            let params = pairs(&[("water_depth_m", bad)]);
            assert!(
                matches!(
                    parse_reading(&params, Local::now()),
                    Err(ApiError::InvalidParameter { name: WATER_DEPTH_M, .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn tolerates_whitespace_and_exponents() {
        let params = pairs(&[("voltage", " 3.3 "), ("volume_liters", "4.5e2"), ("extra", "x")]);
        let reading = parse_reading(&params, Local::now()).unwrap();
        assert_eq!(reading.voltage, 3.3);
        assert_eq!(reading.volume_liters, 450.0);
    }
}
