pub mod errors;
mod models;

use std::collections::HashSet;
use std::fs::read_to_string;
use chrono::{Datelike, NaiveDate};
use crate::manager_dataset::errors::LoadError;
use crate::manager_dataset::models::{RawLocality, RawDataset, RawRecord};
use crate::models::{DailyRecord, Dataset, Locality};

const DAYS_PER_WEEK: usize = 7;

/// Loads the weekly dataset from file
///
/// Meant to run once at startup, any error is fatal and the server must
/// not start serving
///
/// # Arguments
///
/// * 'path' - path to the dataset json file
pub fn load_dataset(path: &str) -> Result<Dataset, LoadError> {
    let json = read_to_string(path)
        .map_err(|e| LoadError(format!("{}: {}", path, e)))?;

    parse_dataset(&json)
}

/// Parses and validates the dataset json
///
/// Temperatures and dates are stored as text in the file and converted here,
/// so a malformed value fails the load rather than some later scan
///
/// # Arguments
///
/// * 'json' - the raw json document
pub fn parse_dataset(json: &str) -> Result<Dataset, LoadError> {
    let raw: RawDataset = serde_json::from_str(json)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut localities: Vec<Locality> = Vec::with_capacity(raw.localities.len());

    for loc in &raw.localities {
        if !seen.insert(loc.name.as_str()) {
            return Err(LoadError(format!("duplicate locality name '{}'", loc.name)));
        }
        localities.push(convert_locality(loc)?);
    }

    Ok(Dataset { localities })
}

fn convert_locality(raw: &RawLocality) -> Result<Locality, LoadError> {
    if raw.temperatures.len() != DAYS_PER_WEEK {
        return Err(LoadError(format!("locality '{}' has {} day records, expected {}",
            raw.name, raw.temperatures.len(), DAYS_PER_WEEK)));
    }

    let mut temperatures: Vec<DailyRecord> = Vec::with_capacity(DAYS_PER_WEEK);
    for (idx, rec) in raw.temperatures.iter().enumerate() {
        temperatures.push(convert_record(&raw.name, idx, rec)?);
    }

    Ok(Locality { name: raw.name.clone(), temperatures })
}

/// Converts one raw record, checking that the date lands on the weekday
/// its index claims, index 0 = Monday
fn convert_record(name: &str, idx: usize, raw: &RawRecord) -> Result<DailyRecord, LoadError> {
    let day = raw.day.parse::<NaiveDate>()
        .map_err(|e| LoadError(format!("locality '{}': day '{}': {}", name, raw.day, e)))?;

    if day.weekday().num_days_from_monday() as usize != idx {
        return Err(LoadError(format!("locality '{}': date {} does not match day index {}",
            name, raw.day, idx)));
    }

    let max = parse_temperature(name, "max", &raw.max)?;
    let min = parse_temperature(name, "min", &raw.min)?;

    Ok(DailyRecord { day, max, min })
}

fn parse_temperature(name: &str, field: &str, value: &str) -> Result<f64, LoadError> {
    let parsed = value.trim().parse::<f64>()
        .map_err(|_| LoadError(format!("locality '{}': {} temperature '{}' is not a number",
            name, field, value)))?;

    if !parsed.is_finite() {
        return Err(LoadError(format!("locality '{}': {} temperature '{}' is not finite",
            name, field, value)));
    }

    Ok(parsed)
}
