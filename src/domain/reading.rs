// Wire and archival models for sensor readings
use super::pollutant::Pollutant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One inbound sensor message: pollutant wire keys mapped to concentrations,
/// plus the emission timestamp (seconds since epoch). The ordered map keeps
/// key iteration lexicographic, which makes downstream tie-breaking
/// deterministic. Immutable once decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorReading {
    pub timestamp: i64,
    #[serde(flatten)]
    pub measurements: BTreeMap<String, f64>,
}

/// Aggregation outcome for one reading: the dominant (maximum) sub-index and
/// the full per-pollutant breakdown for diagnostics. Only the dominant
/// summary is archived.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub timestamp: i64,
    pub aqi: u16,
    pub dominant: Pollutant,
    pub sub_indices: BTreeMap<Pollutant, u16>,
}

/// The unit of archival, serialized as JSON under a timestamp-derived key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub timestamp: i64,
    pub aqi: u16,
}

impl ArchiveRecord {
    pub fn storage_key(&self) -> String {
        format!("air-quality-data/{}.json", self.timestamp)
    }
}

impl From<&AggregateResult> for ArchiveRecord {
    fn from(result: &AggregateResult) -> Self {
        ArchiveRecord {
            timestamp: result.timestamp,
            aqi: result.aqi,
        }
    }
}
