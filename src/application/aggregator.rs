// Reading aggregation - per-pollutant AQI and dominant selection
use crate::domain::aqi::{SubIndex, compute_sub_index};
use crate::domain::breakpoints::{BreakpointTable, MAX_AQI};
use crate::domain::pollutant::Pollutant;
use crate::domain::reading::{AggregateResult, SensorReading};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("reading has no pollutant measurements")]
    EmptyReading,
    #[error("unknown pollutant key `{0}` in reading")]
    UnknownPollutant(String),
}

pub struct ReadingAggregator {
    table: BreakpointTable,
}

impl ReadingAggregator {
    pub fn new(table: BreakpointTable) -> Self {
        Self { table }
    }

    /// Compute the sub-index for every pollutant in the reading and select
    /// the dominant one. A key without a breakpoint scale fails the whole
    /// reading rather than silently defaulting; ties between equal
    /// sub-indices resolve to the lexicographically first pollutant.
    pub fn aggregate(&self, reading: &SensorReading) -> Result<AggregateResult, AggregateError> {
        if reading.measurements.is_empty() {
            return Err(AggregateError::EmptyReading);
        }

        let mut sub_indices = BTreeMap::new();
        for (key, &concentration) in &reading.measurements {
            let pollutant = Pollutant::from_key(key)
                .ok_or_else(|| AggregateError::UnknownPollutant(key.clone()))?;
            let sub_index = compute_sub_index(&self.table, pollutant, concentration);
            if sub_index == SubIndex::OutOfRange {
                tracing::warn!(
                    %pollutant,
                    concentration,
                    "concentration outside all breakpoint tiers, saturating to {MAX_AQI}"
                );
            }
            sub_indices.insert(pollutant, sub_index.aqi());
        }

        let mut dominant: Option<(Pollutant, u16)> = None;
        for (&pollutant, &aqi) in &sub_indices {
            match dominant {
                Some((_, best)) if aqi <= best => {}
                _ => dominant = Some((pollutant, aqi)),
            }
        }
        let (dominant, aqi) = dominant.ok_or(AggregateError::EmptyReading)?;

        Ok(AggregateResult {
            timestamp: reading.timestamp,
            aqi,
            dominant,
            sub_indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aqi::compute_aqi;

    fn aggregator() -> ReadingAggregator {
        ReadingAggregator::new(BreakpointTable::national())
    }

    fn reading(json: &str) -> SensorReading {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_dominant_is_maximum_sub_index() {
        let result = aggregator()
            .aggregate(&reading(r#"{"timestamp": 1000, "pm2_5": 35.0, "co2": 2500.0}"#))
            .unwrap();

        let table = BreakpointTable::national();
        let expected = compute_aqi(&table, Pollutant::Pm2_5, 35.0)
            .max(compute_aqi(&table, Pollutant::Co2, 2500.0));
        assert_eq!(result.aqi, expected);
        assert_eq!(result.dominant, Pollutant::Co2);
        assert_eq!(result.timestamp, 1000);
        assert_eq!(result.sub_indices.len(), 2);
    }

    #[test]
    fn test_tie_breaks_to_first_pollutant_key() {
        // pm2_5 at 30 µg/m³ and co2 at 450 ppm both score exactly 50
        let result = aggregator()
            .aggregate(&reading(r#"{"timestamp": 1000, "pm2_5": 30.0, "co2": 450.0}"#))
            .unwrap();
        assert_eq!(result.aqi, 50);
        assert_eq!(result.dominant, Pollutant::Co2);
    }

    #[test]
    fn test_dotted_particulate_key_is_normalized() {
        let result = aggregator()
            .aggregate(&reading(r#"{"timestamp": 1000, "pm2.5": 35.0}"#))
            .unwrap();
        assert_eq!(result.dominant, Pollutant::Pm2_5);
        assert_eq!(result.aqi, 58);
    }

    #[test]
    fn test_empty_reading_is_an_error() {
        let err = aggregator()
            .aggregate(&reading(r#"{"timestamp": 1000}"#))
            .unwrap_err();
        assert_eq!(err, AggregateError::EmptyReading);
    }

    #[test]
    fn test_unknown_pollutant_fails_with_key_name() {
        let err = aggregator()
            .aggregate(&reading(r#"{"timestamp": 1000, "pm10": 80.0}"#))
            .unwrap_err();
        assert_eq!(err, AggregateError::UnknownPollutant("pm10".to_string()));
    }

    #[test]
    fn test_out_of_range_concentration_saturates() {
        let result = aggregator()
            .aggregate(&reading(r#"{"timestamp": 1000, "pm2_5": -5.0}"#))
            .unwrap();
        assert_eq!(result.aqi, 500);
    }
}
