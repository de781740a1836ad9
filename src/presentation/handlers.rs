// HTTP request handlers
use crate::domain::aqi::compute_aqi;
use crate::domain::breakpoints::BreakpointTable;
use crate::domain::pollutant::Pollutant;
use crate::presentation::app_state::AppState;
use axum::{Json, extract::State};
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct PollutantSnapshot {
    pub id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub aqi: u16,
    pub threshold: Thresholds,
}

/// Dashboard-facing category boundaries, in the pollutant's wire unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub good: f64,
    pub moderate: f64,
    pub unhealthy: f64,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current synthetic per-pollutant readings with thresholds, consumed by the
/// external dashboard. Values are sampled from slightly below the good
/// threshold to slightly above the unhealthy one.
pub async fn current_readings(State(state): State<Arc<AppState>>) -> Json<Vec<PollutantSnapshot>> {
    let mut rng = rand::thread_rng();
    let snapshots = Pollutant::ALL
        .iter()
        .map(|&pollutant| {
            let threshold = thresholds_for(&state.table, pollutant);
            let value = rng.gen_range(threshold.good * 0.8..threshold.unhealthy * 1.2);
            let value = (value * 100.0).round() / 100.0;
            PollutantSnapshot {
                id: pollutant.key(),
                name: pollutant.display_name(),
                unit: pollutant.unit(),
                value,
                aqi: compute_aqi(&state.table, pollutant, value),
                threshold,
            }
        })
        .collect();
    Json(snapshots)
}

/// Derive dashboard thresholds from the breakpoint table: the upper bounds of
/// the first three tiers, converted to the wire unit where it differs from
/// the scale unit (benzene is reported in ppb, its scale is ppm).
fn thresholds_for(table: &BreakpointTable, pollutant: Pollutant) -> Thresholds {
    let scale = match pollutant {
        Pollutant::Benzene => 1000.0,
        _ => 1.0,
    };
    let tiers = table.tiers(pollutant);
    Thresholds {
        good: tiers[0].concentration_high * scale,
        moderate: tiers[1].concentration_high * scale,
        unhealthy: tiers[2].concentration_high * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_come_from_the_breakpoint_table() {
        let table = BreakpointTable::national();
        assert_eq!(
            thresholds_for(&table, Pollutant::Pm2_5),
            Thresholds {
                good: 30.0,
                moderate: 60.0,
                unhealthy: 90.0
            }
        );
    }

    #[test]
    fn test_benzene_thresholds_reported_in_ppb() {
        let table = BreakpointTable::national();
        assert_eq!(
            thresholds_for(&table, Pollutant::Benzene),
            Thresholds {
                good: 2.0,
                moderate: 5.0,
                unhealthy: 10.0
            }
        );
    }
}
