use chrono::NaiveDate;
use serde::Serialize;

/// One day of the reference week for a locality
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub day: NaiveDate,
    pub max: f64,
    pub min: f64,
}

/// A named locality and its week of temperature records, day 0 = Monday
#[derive(Serialize, Debug, Clone)]
pub struct Locality {
    pub name: String,
    pub temperatures: Vec<DailyRecord>,
}

/// The full week of temperatures for all localities
///
/// Built once at startup and never mutated, so shared references into it
/// are safe across concurrent request handlers
#[derive(Serialize, Debug, Clone)]
pub struct Dataset {
    pub localities: Vec<Locality>,
}

impl Dataset {
    /// Returns the locality names in dataset order
    pub fn locality_names(&self) -> Vec<String> {
        self.localities.iter().map(|loc| loc.name.clone()).collect()
    }

    /// Returns the locality with the given name, matched exactly and
    /// case sensitive
    pub fn find_locality(&self, name: &str) -> Option<&Locality> {
        self.localities.iter().find(|loc| loc.name == name)
    }
}
