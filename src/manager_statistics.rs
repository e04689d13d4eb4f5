use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use chrono::NaiveDate;
use serde::Serialize;
use crate::models::Dataset;

#[derive(Debug)]
pub enum StatsError {
    NotFound(String),
    NoData(String),
    InvalidInput(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::NotFound(e)     => write!(f, "StatsError::NotFound: {}", e),
            StatsError::NoData(e)       => write!(f, "StatsError::NoData: {}", e),
            StatsError::InvalidInput(e) => write!(f, "StatsError::InvalidInput: {}", e),
        }
    }
}

/// Which side of the threshold a filter keeps
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdCondition {
    Above,
    Below,
}

impl FromStr for ThresholdCondition {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "above" => Ok(ThresholdCondition::Above),
            "below" => Ok(ThresholdCondition::Below),
            other => Err(StatsError::InvalidInput(format!("unknown condition '{}'", other))),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ThresholdMatch {
    pub locality: String,
    pub day: NaiveDate,
    pub max: f64,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct RangeExtreme {
    pub value: f64,
    pub locality: String,
}

/// Extremes over a date range, each side independently absent when no
/// record fell in range
#[derive(Serialize, Debug, PartialEq)]
pub struct RangeExtremes {
    pub max: Option<RangeExtreme>,
    pub min: Option<RangeExtreme>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

/// Rounds to two decimals, halves away from zero
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Returns the mean of the daily maximum over every record of every
/// locality, rounded to two decimals
pub fn global_average(data: &Dataset) -> Result<f64, StatsError> {
    let maxima: Vec<f64> = data.localities.iter()
        .flat_map(|loc| loc.temperatures.iter().map(|t| t.max))
        .collect();

    if maxima.is_empty() {
        return Err(StatsError::NoData("no temperatures available".to_string()));
    }

    Ok(round2(mean_of(&maxima)))
}

/// Returns the mean of one locality's daily maximums, rounded to two decimals
///
/// The mean is taken over however many records the locality actually has
///
/// # Arguments
///
/// * 'data' - the dataset to scan
/// * 'name' - locality name, exact match
pub fn locality_average(data: &Dataset, name: &str) -> Result<f64, StatsError> {
    let locality = data.find_locality(name)
        .ok_or_else(|| StatsError::NotFound(format!("locality '{}' not found", name)))?;

    let maxima: Vec<f64> = locality.temperatures.iter().map(|t| t.max).collect();
    if maxima.is_empty() {
        return Err(StatsError::NoData(format!("locality '{}' has no temperatures", name)));
    }

    Ok(round2(mean_of(&maxima)))
}

/// Returns the mean of the daily maximum at one day index across all
/// localities, rounded to two decimals
///
/// Localities without a record at that index are skipped rather than failing
///
/// # Arguments
///
/// * 'data' - the dataset to scan
/// * 'day_index' - 0 = Monday through 6 = Sunday
pub fn day_of_week_average(data: &Dataset, day_index: i64) -> Result<f64, StatsError> {
    if !(0..=6).contains(&day_index) {
        return Err(StatsError::InvalidInput(format!("day index {} out of range 0-6", day_index)));
    }
    let idx = day_index as usize;

    let maxima: Vec<f64> = data.localities.iter()
        .filter_map(|loc| loc.temperatures.get(idx).map(|t| t.max))
        .collect();

    if maxima.is_empty() {
        return Err(StatsError::NoData(format!("no temperatures for day index {}", day_index)));
    }

    Ok(round2(mean_of(&maxima)))
}

/// Returns every record whose daily maximum is strictly above or below the
/// threshold, in scan order: localities in dataset order, days 0 through 6
///
/// An empty result is valid, not an error
///
/// # Arguments
///
/// * 'data' - the dataset to scan
/// * 'threshold' - temperature to compare against, must be finite
/// * 'condition' - which side of the threshold to keep
pub fn threshold_filter(data: &Dataset, threshold: f64, condition: ThresholdCondition)
    -> Result<Vec<ThresholdMatch>, StatsError> {
    if !threshold.is_finite() {
        return Err(StatsError::InvalidInput("threshold is not a finite number".to_string()));
    }

    let mut matches: Vec<ThresholdMatch> = Vec::new();
    for loc in &data.localities {
        for record in &loc.temperatures {
            let keep = match condition {
                ThresholdCondition::Above => record.max > threshold,
                ThresholdCondition::Below => record.max < threshold,
            };
            if keep {
                matches.push(ThresholdMatch {
                    locality: loc.name.clone(),
                    day: record.day,
                    max: record.max,
                });
            }
        }
    }

    Ok(matches)
}

/// Returns the highest daily maximum and lowest daily minimum over all
/// records whose day lies in the closed date range, each tagged with the
/// owning locality
///
/// The endpoints are accepted in either order and normalized
/// chronologically. Ties keep the first locality in scan order.
///
/// # Arguments
///
/// * 'data' - the dataset to scan
/// * 'start' - one endpoint of the range, inclusive
/// * 'end' - the other endpoint, inclusive
pub fn date_range_extremes(data: &Dataset, start: NaiveDate, end: NaiveDate) -> RangeExtremes {
    let (from, to) = if start <= end { (start, end) } else { (end, start) };

    let mut max: Option<RangeExtreme> = None;
    let mut min: Option<RangeExtreme> = None;

    for loc in &data.localities {
        for record in &loc.temperatures {
            if record.day < from || record.day > to {
                continue;
            }
            if max.as_ref().map_or(true, |m| record.max > m.value) {
                max = Some(RangeExtreme { value: record.max, locality: loc.name.clone() });
            }
            if min.as_ref().map_or(true, |m| record.min < m.value) {
                min = Some(RangeExtreme { value: record.min, locality: loc.name.clone() });
            }
        }
    }

    RangeExtremes { max, min }
}

/// Returns one locality's week as day summaries in day order, where the
/// mean is (max + min) / 2 rounded to two decimals
///
/// # Arguments
///
/// * 'data' - the dataset to scan
/// * 'name' - locality name, exact match
pub fn weekly_summary(data: &Dataset, name: &str) -> Result<Vec<DaySummary>, StatsError> {
    let locality = data.find_locality(name)
        .ok_or_else(|| StatsError::NotFound(format!("locality '{}' not found", name)))?;

    Ok(locality.temperatures.iter()
        .map(|t| DaySummary {
            day: t.day,
            max: t.max,
            min: t.min,
            mean: round2((t.max + t.min) / 2.0),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use crate::models::{DailyRecord, Locality};

    // Monday of the fixture week
    fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn locality(name: &str, temps: &[(f64, f64)]) -> Locality {
        let temperatures = temps.iter().enumerate()
            .map(|(i, (max, min))| DailyRecord {
                day: week_start() + Days::new(i as u64),
                max: *max,
                min: *min,
            })
            .collect();

        Locality { name: name.to_string(), temperatures }
    }

    fn fixture() -> Dataset {
        Dataset {
            localities: vec![
                locality("Madrid", &[
                    (10.0, 2.0), (12.0, 3.0), (14.0, 4.0), (16.0, 5.0),
                    (18.0, 6.0), (20.0, 7.0), (22.0, 8.0),
                ]),
                locality("Bilbao", &[
                    (8.0, 1.0), (9.0, 2.0), (10.0, 3.0), (11.0, 4.0),
                    (12.0, 5.0), (13.0, 6.0), (14.0, 7.0),
                ]),
            ],
        }
    }

    #[test]
    fn global_average_over_all_maximums() {
        // (112 + 77) / 14
        assert_eq!(global_average(&fixture()).unwrap(), 13.5);
    }

    #[test]
    fn global_average_rounds_to_two_decimals() {
        let data = Dataset {
            localities: vec![
                locality("A", &[(10.0, 0.0), (20.0, 0.0)]),
                locality("B", &[(25.0, 0.0)]),
            ],
        };

        // 55 / 3 = 18.333...
        assert_eq!(global_average(&data).unwrap(), 18.33);
    }

    #[test]
    fn global_average_uneven_week_lengths() {
        let data = Dataset {
            localities: vec![
                locality("A", &[(10.0, 0.0), (20.0, 0.0)]),
                locality("B", &[(30.0, 0.0)]),
            ],
        };

        assert_eq!(global_average(&data).unwrap(), 20.0);
    }

    #[test]
    fn global_average_empty_dataset_is_no_data() {
        let data = Dataset { localities: vec![] };

        assert!(matches!(global_average(&data), Err(StatsError::NoData(_))));
    }

    #[test]
    fn locality_average_for_known_name() {
        // Madrid: 112 / 7
        assert_eq!(locality_average(&fixture(), "Madrid").unwrap(), 16.0);
    }

    #[test]
    fn locality_average_unknown_name_is_not_found() {
        let result = locality_average(&fixture(), "Atlantis");

        assert!(matches!(result, Err(StatsError::NotFound(_))));
    }

    #[test]
    fn locality_average_over_records_actually_present() {
        let data = Dataset {
            localities: vec![locality("Short", &[(10.0, 0.0), (20.0, 0.0)])],
        };

        assert_eq!(locality_average(&data, "Short").unwrap(), 15.0);
    }

    #[test]
    fn day_average_collects_one_index_across_localities() {
        // Monday: (10 + 8) / 2
        assert_eq!(day_of_week_average(&fixture(), 0).unwrap(), 9.0);
    }

    #[test]
    fn day_average_out_of_range_is_invalid_input() {
        assert!(matches!(day_of_week_average(&fixture(), 7), Err(StatsError::InvalidInput(_))));
        assert!(matches!(day_of_week_average(&fixture(), -1), Err(StatsError::InvalidInput(_))));
    }

    #[test]
    fn day_average_skips_localities_missing_the_index() {
        let data = Dataset {
            localities: vec![
                locality("Short", &[(10.0, 0.0)]),
                locality("Full", &[(1.0, 0.0), (30.0, 0.0)]),
            ],
        };

        assert_eq!(day_of_week_average(&data, 1).unwrap(), 30.0);
    }

    #[test]
    fn day_average_nothing_collected_is_no_data() {
        let data = Dataset { localities: vec![] };

        assert!(matches!(day_of_week_average(&data, 0), Err(StatsError::NoData(_))));
    }

    #[test]
    fn threshold_above_is_strict() {
        let matches = threshold_filter(&fixture(), 20.0, ThresholdCondition::Above).unwrap();

        // Madrid Saturday max is exactly 20 and must not match
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].locality, "Madrid");
        assert_eq!(matches[0].max, 22.0);
    }

    #[test]
    fn threshold_below_is_strict() {
        let matches = threshold_filter(&fixture(), 8.0, ThresholdCondition::Below).unwrap();

        // Bilbao Monday max is exactly 8 and must not match
        assert!(matches.is_empty());
    }

    #[test]
    fn threshold_scan_order_is_dataset_then_day() {
        let matches = threshold_filter(&fixture(), 12.0, ThresholdCondition::Above).unwrap();
        let names: Vec<&str> = matches.iter().map(|m| m.locality.as_str()).collect();

        assert_eq!(names, vec!["Madrid", "Madrid", "Madrid", "Madrid", "Madrid", "Bilbao", "Bilbao"]);
        assert_eq!(matches[0].max, 14.0);
        assert_eq!(matches[5].max, 13.0);
    }

    #[test]
    fn threshold_no_matches_is_empty_not_error() {
        let matches = threshold_filter(&fixture(), 100.0, ThresholdCondition::Above).unwrap();

        assert!(matches.is_empty());
    }

    #[test]
    fn threshold_non_finite_is_invalid_input() {
        let result = threshold_filter(&fixture(), f64::NAN, ThresholdCondition::Above);

        assert!(matches!(result, Err(StatsError::InvalidInput(_))));
    }

    #[test]
    fn condition_parses_external_spelling() {
        assert_eq!("above".parse::<ThresholdCondition>().unwrap(), ThresholdCondition::Above);
        assert_eq!("below".parse::<ThresholdCondition>().unwrap(), ThresholdCondition::Below);
        assert!("sideways".parse::<ThresholdCondition>().is_err());
    }

    #[test]
    fn range_extremes_over_the_full_week() {
        let extremes = date_range_extremes(&fixture(), week_start(), week_start() + Days::new(6));

        assert_eq!(extremes.max, Some(RangeExtreme { value: 22.0, locality: "Madrid".to_string() }));
        assert_eq!(extremes.min, Some(RangeExtreme { value: 1.0, locality: "Bilbao".to_string() }));
    }

    #[test]
    fn range_extremes_single_record() {
        let data = Dataset {
            localities: vec![locality("Lone", &[(15.0, 5.0)])],
        };
        let extremes = date_range_extremes(&data, week_start(), week_start());

        assert_eq!(extremes.max, Some(RangeExtreme { value: 15.0, locality: "Lone".to_string() }));
        assert_eq!(extremes.min, Some(RangeExtreme { value: 5.0, locality: "Lone".to_string() }));
    }

    #[test]
    fn range_extremes_endpoints_in_either_order() {
        let forward = date_range_extremes(&fixture(), week_start(), week_start() + Days::new(6));
        let reversed = date_range_extremes(&fixture(), week_start() + Days::new(6), week_start());

        assert_eq!(forward, reversed);
    }

    #[test]
    fn range_extremes_empty_range_reports_both_sides_absent() {
        let before = week_start() - Days::new(30);
        let extremes = date_range_extremes(&fixture(), before, before + Days::new(5));

        assert_eq!(extremes.max, None);
        assert_eq!(extremes.min, None);
    }

    #[test]
    fn range_extremes_tie_keeps_first_in_scan_order() {
        let data = Dataset {
            localities: vec![
                locality("First", &[(20.0, 5.0)]),
                locality("Second", &[(20.0, 5.0)]),
            ],
        };
        let extremes = date_range_extremes(&data, week_start(), week_start());

        assert_eq!(extremes.max.unwrap().locality, "First");
        assert_eq!(extremes.min.unwrap().locality, "First");
    }

    #[test]
    fn weekly_summary_means_per_day() {
        let summary = weekly_summary(&fixture(), "Madrid").unwrap();

        assert_eq!(summary.len(), 7);
        // Thursday: (16 + 5) / 2
        assert_eq!(summary[3].mean, 10.5);
        assert_eq!(summary[3].max, 16.0);
        assert_eq!(summary[3].min, 5.0);
        assert_eq!(summary[3].day, week_start() + Days::new(3));
    }

    #[test]
    fn weekly_summary_unknown_name_is_not_found() {
        assert!(matches!(weekly_summary(&fixture(), "Atlantis"), Err(StatsError::NotFound(_))));
    }
}
