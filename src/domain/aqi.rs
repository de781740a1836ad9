// Piecewise-linear AQI sub-index computation
use super::breakpoints::{BreakpointTable, MAX_AQI};
use super::pollutant::Pollutant;

/// Outcome of one tier lookup. `OutOfRange` means the concentration fell
/// outside every tier (negative input, or above the top of the scale); it
/// reports the maximum index as a worst-case saturation policy. Keeping it a
/// separate variant lets callers tell saturation apart from a genuine
/// top-of-scale score instead of conflating the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubIndex {
    Scaled(u16),
    OutOfRange,
}

impl SubIndex {
    pub fn aqi(self) -> u16 {
        match self {
            SubIndex::Scaled(value) => value,
            SubIndex::OutOfRange => MAX_AQI,
        }
    }
}

/// Compute the sub-index for one pollutant concentration. Pure function of
/// the table and its inputs.
///
/// Benzene concentrations arrive in ppb and are divided by 1000 before the
/// lookup; every other scale uses the wire unit directly.
pub fn compute_sub_index(
    table: &BreakpointTable,
    pollutant: Pollutant,
    concentration: f64,
) -> SubIndex {
    let concentration = match pollutant {
        Pollutant::Benzene => concentration / 1000.0,
        _ => concentration,
    };
    for tier in table.tiers(pollutant) {
        if tier.concentration_low <= concentration && concentration <= tier.concentration_high {
            let slope = f64::from(tier.aqi_high - tier.aqi_low)
                / (tier.concentration_high - tier.concentration_low);
            let aqi = slope * (concentration - tier.concentration_low) + f64::from(tier.aqi_low);
            return SubIndex::Scaled(aqi.round() as u16);
        }
    }
    SubIndex::OutOfRange
}

/// Convenience wrapper collapsing `OutOfRange` to the saturation value.
pub fn compute_aqi(table: &BreakpointTable, pollutant: Pollutant, concentration: f64) -> u16 {
    compute_sub_index(table, pollutant, concentration).aqi()
}
