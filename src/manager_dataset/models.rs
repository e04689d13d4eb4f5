use serde::Deserialize;

#[derive(Deserialize)]
pub struct RawDataset {
    pub localities: Vec<RawLocality>,
}

#[derive(Deserialize)]
pub struct RawLocality {
    pub name: String,
    pub temperatures: Vec<RawRecord>,
}

/// A record exactly as it appears in the data file, temperatures and
/// date still as text
#[derive(Deserialize)]
pub struct RawRecord {
    pub day: String,
    pub max: String,
    pub min: String,
}
