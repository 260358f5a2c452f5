//! Catalog loading and table projection
//!
//! The web original reads its rows straight out of the database; the console
//! reads them from a catalog document, one JSON array per table. [`Catalog`]
//! holds the deserialized rows, [`EntityKind`] enumerates the tables, and
//! [`TableData`] is the displayable projection (column keys, titles, cells)
//! that the home view renders and sorts.

use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::entities::{
    CalibrationCoefficient, Contact, DeckUnit, Device, Logger, LoggerAllocatesDeckUnit,
    LoggerContainsSensor, Platform, PlatformContainsDeckUnit, PlatformContainsLogger, Sensor,
    SensorType, Unit, Vessel,
};

/// The fourteen tables of the instrumentation schema.
///
/// `Display` yields the table name as the schema spells it, which is also
/// how tables are labelled in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum EntityKind {
    Logger,
    Sensor,
    SensorType,
    Platform,
    DeckUnit,
    CalibrationCoefficient,
    Vessel,
    Contact,
    Device,
    Unit,
    PlatformContainsLogger,
    PlatformContainsDeckUnit,
    LoggerContainsSensor,
    LoggerAllocatesDeckUnit,
}

impl EntityKind {
    pub fn columns(self) -> &'static [Column] {
        match self {
            EntityKind::Logger => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("serial_number", "Serial"),
                Column::new("firmware_version", "Firmware"),
                Column::new("notes", "Notes"),
            ] },
            EntityKind::Sensor => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("serial_number", "Serial"),
                Column::new("sensor_type_id", "Type"),
                Column::new("notes", "Notes"),
            ] },
            EntityKind::SensorType => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("manufacturer", "Manufacturer"),
                Column::new("description", "Description"),
            ] },
            EntityKind::Platform => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("platform_type", "Type"),
                Column::new("latitude", "Lat"),
                Column::new("longitude", "Lon"),
                Column::new("notes", "Notes"),
            ] },
            EntityKind::DeckUnit => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("serial_number", "Serial"),
                Column::new("notes", "Notes"),
            ] },
            EntityKind::CalibrationCoefficient => const { &[
                Column::new("id", "Id"),
                Column::new("sensor_id", "Sensor"),
                Column::new("name", "Name"),
                Column::new("value", "Value"),
                Column::new("calibrated_at", "Calibrated"),
            ] },
            EntityKind::Vessel => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("call_sign", "Call sign"),
                Column::new("home_port", "Home port"),
            ] },
            EntityKind::Contact => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("email", "Email"),
                Column::new("phone", "Phone"),
                Column::new("organisation", "Organisation"),
            ] },
            EntityKind::Device => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("serial_number", "Serial"),
                Column::new("description", "Description"),
            ] },
            EntityKind::Unit => const { &[
                Column::new("id", "Id"),
                Column::new("name", "Name"),
                Column::new("symbol", "Symbol"),
                Column::new("description", "Description"),
            ] },
            EntityKind::PlatformContainsLogger => const { &[
                Column::new("platform_id", "Platform"),
                Column::new("logger_id", "Logger"),
                Column::new("valid_from", "From"),
                Column::new("valid_until", "Until"),
            ] },
            EntityKind::PlatformContainsDeckUnit => const { &[
                Column::new("platform_id", "Platform"),
                Column::new("deck_unit_id", "Deck unit"),
                Column::new("valid_from", "From"),
                Column::new("valid_until", "Until"),
            ] },
            EntityKind::LoggerContainsSensor => const { &[
                Column::new("logger_id", "Logger"),
                Column::new("sensor_id", "Sensor"),
                Column::new("valid_from", "From"),
                Column::new("valid_until", "Until"),
            ] },
            EntityKind::LoggerAllocatesDeckUnit => const { &[
                Column::new("logger_id", "Logger"),
                Column::new("deck_unit_id", "Deck unit"),
                Column::new("valid_from", "From"),
                Column::new("valid_until", "Until"),
            ] },
        }
    }
}

/// A displayable column: the schema key used in sort selection strings and
/// the header title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
}

impl Column {
    pub const fn new(key: &'static str, title: &'static str) -> Self {
        Self { key, title }
    }
}

/// One table cell. Cells of the same column share a variant, except that
/// any cell may be `Missing` (a NULL in the row).
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Missing,
    Int(i64),
    Float(f64),
    Time(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Missing => 0,
            CellValue::Int(_) | CellValue::Float(_) => 1,
            CellValue::Time(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Total order: missing values first, numbers by value, timestamps by
    /// instant, text lexicographically. Mixed variants order by rank so the
    /// sort stays total even over irregular data.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Int(a), CellValue::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Float(a), CellValue::Int(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
            (CellValue::Time(a), CellValue::Time(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Time(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M")),
            CellValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::Time(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_owned())
    }
}

impl From<&String> for CellValue {
    fn from(v: &String) -> Self {
        CellValue::Text(v.clone())
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Missing, Into::into)
    }
}

impl<'a, T> From<&'a Option<T>> for CellValue
where
    &'a T: Into<CellValue>,
{
    fn from(v: &'a Option<T>) -> Self {
        v.as_ref().map_or(CellValue::Missing, Into::into)
    }
}

impl From<&DateTime<Utc>> for CellValue {
    fn from(v: &DateTime<Utc>) -> Self {
        CellValue::Time(*v)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Suffix of the header selection convention: `"<key>_up"` sorts
    /// ascending, `"<key>_down"` descending.
    pub fn suffix(self) -> &'static str {
        match self {
            SortDirection::Ascending => "_up",
            SortDirection::Descending => "_down",
        }
    }

    pub fn selection(self, key: &str) -> String {
        format!("{key}{}", self.suffix())
    }
}

/// The displayable projection of one table: columns plus one cell row per
/// entity row, in catalog order until sorted.
#[derive(Clone, Debug, PartialEq)]
pub struct TableData {
    pub kind: EntityKind,
    pub columns: &'static [Column],
    pub rows: Vec<Vec<CellValue>>,
}

impl TableData {
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Stable sort on one column. Unknown keys leave the rows untouched.
    pub fn sort_by(&mut self, key: &str, direction: SortDirection) {
        let Some(index) = self.column_index(key) else {
            log::warn!("ignoring sort on unknown column {key:?} of {}", self.kind);
            return;
        };
        match direction {
            SortDirection::Ascending => self.rows.sort_by(|a, b| a[index].compare(&b[index])),
            SortDirection::Descending => self.rows.sort_by(|a, b| b[index].compare(&a[index])),
        }
    }
}

/// All rows of the configuration catalog. Tables absent from the document
/// load as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub loggers: Vec<Logger>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    #[serde(default)]
    pub sensor_types: Vec<SensorType>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub deck_units: Vec<DeckUnit>,
    #[serde(default)]
    pub calibration_coefficients: Vec<CalibrationCoefficient>,
    #[serde(default)]
    pub vessels: Vec<Vessel>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub platform_contains_logger: Vec<PlatformContainsLogger>,
    #[serde(default)]
    pub platform_contains_deck_unit: Vec<PlatformContainsDeckUnit>,
    #[serde(default)]
    pub logger_contains_sensor: Vec<LoggerContainsSensor>,
    #[serde(default)]
    pub logger_allocates_deck_unit: Vec<LoggerAllocatesDeckUnit>,
}

impl Catalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("failed to open catalog {}", path.display()))?;
        let catalog = serde_json::from_reader(BufReader::new(file))
            .wrap_err_with(|| format!("failed to parse catalog {}", path.display()))?;
        Ok(catalog)
    }

    pub fn row_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Logger => self.loggers.len(),
            EntityKind::Sensor => self.sensors.len(),
            EntityKind::SensorType => self.sensor_types.len(),
            EntityKind::Platform => self.platforms.len(),
            EntityKind::DeckUnit => self.deck_units.len(),
            EntityKind::CalibrationCoefficient => self.calibration_coefficients.len(),
            EntityKind::Vessel => self.vessels.len(),
            EntityKind::Contact => self.contacts.len(),
            EntityKind::Device => self.devices.len(),
            EntityKind::Unit => self.units.len(),
            EntityKind::PlatformContainsLogger => self.platform_contains_logger.len(),
            EntityKind::PlatformContainsDeckUnit => self.platform_contains_deck_unit.len(),
            EntityKind::LoggerContainsSensor => self.logger_contains_sensor.len(),
            EntityKind::LoggerAllocatesDeckUnit => self.logger_allocates_deck_unit.len(),
        }
    }

    /// Project one table into its displayable cells, in catalog order.
    pub fn table(&self, kind: EntityKind) -> TableData {
        let rows = match kind {
            EntityKind::Logger => self
                .loggers
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.serial_number).into(),
                        (&r.firmware_version).into(),
                        (&r.notes).into(),
                    ]
                })
                .collect(),
            EntityKind::Sensor => self
                .sensors
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.serial_number).into(),
                        r.sensor_type_id.into(),
                        (&r.notes).into(),
                    ]
                })
                .collect(),
            EntityKind::SensorType => self
                .sensor_types
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.manufacturer).into(),
                        (&r.description).into(),
                    ]
                })
                .collect(),
            EntityKind::Platform => self
                .platforms
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.platform_type).into(),
                        r.latitude.into(),
                        r.longitude.into(),
                        (&r.notes).into(),
                    ]
                })
                .collect(),
            EntityKind::DeckUnit => self
                .deck_units
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.serial_number).into(),
                        (&r.notes).into(),
                    ]
                })
                .collect(),
            EntityKind::CalibrationCoefficient => self
                .calibration_coefficients
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        r.sensor_id.into(),
                        (&r.name).into(),
                        r.value.into(),
                        r.calibrated_at.into(),
                    ]
                })
                .collect(),
            EntityKind::Vessel => self
                .vessels
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.call_sign).into(),
                        (&r.home_port).into(),
                    ]
                })
                .collect(),
            EntityKind::Contact => self
                .contacts
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.email).into(),
                        (&r.phone).into(),
                        (&r.organisation).into(),
                    ]
                })
                .collect(),
            EntityKind::Device => self
                .devices
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.serial_number).into(),
                        (&r.description).into(),
                    ]
                })
                .collect(),
            EntityKind::Unit => self
                .units
                .iter()
                .map(|r| {
                    vec![
                        r.id.into(),
                        (&r.name).into(),
                        (&r.symbol).into(),
                        (&r.description).into(),
                    ]
                })
                .collect(),
            EntityKind::PlatformContainsLogger => self
                .platform_contains_logger
                .iter()
                .map(|r| {
                    vec![
                        r.platform_id.into(),
                        r.logger_id.into(),
                        r.valid_from.into(),
                        r.valid_until.into(),
                    ]
                })
                .collect(),
            EntityKind::PlatformContainsDeckUnit => self
                .platform_contains_deck_unit
                .iter()
                .map(|r| {
                    vec![
                        r.platform_id.into(),
                        r.deck_unit_id.into(),
                        r.valid_from.into(),
                        r.valid_until.into(),
                    ]
                })
                .collect(),
            EntityKind::LoggerContainsSensor => self
                .logger_contains_sensor
                .iter()
                .map(|r| {
                    vec![
                        r.logger_id.into(),
                        r.sensor_id.into(),
                        r.valid_from.into(),
                        r.valid_until.into(),
                    ]
                })
                .collect(),
            EntityKind::LoggerAllocatesDeckUnit => self
                .logger_allocates_deck_unit
                .iter()
                .map(|r| {
                    vec![
                        r.logger_id.into(),
                        r.deck_unit_id.into(),
                        r.valid_from.into(),
                        r.valid_until.into(),
                    ]
                })
                .collect(),
        };
        TableData {
            kind,
            columns: kind.columns(),
            rows,
        }
    }
}
