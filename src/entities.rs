//! Row types mirroring the instrumentation schema
//!
//! One plain record per table, shaped like the generated database rows the
//! configuration backend exposes. These carry no validation or lifecycle
//! logic; they are the read shapes the console displays.
//!
//! Join tables (`PlatformContainsLogger`, `PlatformContainsDeckUnit`,
//! `LoggerContainsSensor`, `LoggerAllocatesDeckUnit`) have no surrogate id:
//! a join row is identified by its pair of foreign keys plus the start of
//! its validity interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A data-logging device. Contains sensors and allocates deck units
/// through the corresponding join tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Logger {
    pub id: i64,
    pub name: String,
    pub serial_number: String,
    pub firmware_version: Option<String>,
    pub notes: Option<String>,
}

/// A measurement sensor, categorized by a [`SensorType`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: i64,
    pub sensor_type_id: i64,
    pub name: String,
    pub serial_number: String,
    pub notes: Option<String>,
}

/// Category and metadata shared by sensors of the same kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorType {
    pub id: i64,
    pub name: String,
    pub manufacturer: Option<String>,
    pub description: Option<String>,
}

/// A deployment platform (e.g. a mooring) hosting loggers and deck units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    pub platform_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

/// Shipboard interface unit paired with a logger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckUnit {
    pub id: i64,
    pub name: String,
    pub serial_number: String,
    pub notes: Option<String>,
}

/// Numeric constant used to convert raw output of one sensor to
/// calibrated values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCoefficient {
    pub id: i64,
    pub sensor_id: i64,
    pub name: String,
    pub value: f64,
    pub calibrated_at: Option<DateTime<Utc>>,
}

/// A ship. Its links to platforms and devices are not part of the
/// visible schema, so none are modelled here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: i64,
    pub name: String,
    pub call_sign: Option<String>,
    pub home_port: Option<String>,
}

/// A person or organisation contact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub organisation: Option<String>,
}

/// A generic instrument or equipment record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub serial_number: Option<String>,
    pub description: Option<String>,
}

/// A measurement unit referenced for value interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
}

/// Time-boxed containment of a logger on a platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformContainsLogger {
    pub platform_id: i64,
    pub logger_id: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
}

/// Time-boxed containment of a deck unit on a platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformContainsDeckUnit {
    pub platform_id: i64,
    pub deck_unit_id: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
}

/// Time-boxed containment of a sensor in a logger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggerContainsSensor {
    pub logger_id: i64,
    pub sensor_id: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
}

/// Time-boxed allocation of a deck unit to a logger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggerAllocatesDeckUnit {
    pub logger_id: i64,
    pub deck_unit_id: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_logger_row_shape() {
        let row: Logger = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "MLOG-3",
                "serial_number": "ML-2021-003",
                "firmware_version": "1.4.2",
                "notes": null
            }"#,
        )
        .unwrap();
        assert_eq!(row.name, "MLOG-3");
        assert_eq!(row.firmware_version.as_deref(), Some("1.4.2"));
        assert_eq!(row.notes, None);
    }

    #[test]
    fn test_join_row_has_no_surrogate_id() {
        let row: LoggerContainsSensor = serde_json::from_str(
            r#"{
                "logger_id": 3,
                "sensor_id": 12,
                "valid_from": "2023-05-01T00:00:00Z",
                "valid_until": null
            }"#,
        )
        .unwrap();
        assert_eq!((row.logger_id, row.sensor_id), (3, 12));
        assert!(row.valid_until.is_none());
    }
}
