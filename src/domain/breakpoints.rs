// National AQI breakpoint tables (µg/m³ for particulates, ppm for gases)
use super::pollutant::Pollutant;

/// Top of the AQI scale; also the saturation value for out-of-range input.
pub const MAX_AQI: u16 = 500;

/// One concentration sub-range mapped linearly to an AQI sub-range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakpointTier {
    pub concentration_low: f64,
    pub concentration_high: f64,
    pub aqi_low: u16,
    pub aqi_high: u16,
}

const fn tier(
    concentration_low: f64,
    concentration_high: f64,
    aqi_low: u16,
    aqi_high: u16,
) -> BreakpointTier {
    BreakpointTier {
        concentration_low,
        concentration_high,
        aqi_low,
        aqi_high,
    }
}

// µg/m³, Indian national standard
const PM2_5_TIERS: [BreakpointTier; 6] = [
    tier(0.0, 30.0, 0, 50),      // Good
    tier(31.0, 60.0, 51, 100),   // Satisfactory
    tier(61.0, 90.0, 101, 200),  // Moderate
    tier(91.0, 120.0, 201, 300), // Poor
    tier(121.0, 250.0, 301, 400), // Very Poor
    tier(251.0, 500.0, 401, 500), // Severe
];

// ppm, WHO/ASHRAE thresholds (no Indian standard)
const CO2_TIERS: [BreakpointTier; 6] = [
    tier(0.0, 450.0, 0, 50),        // Good (outdoor avg)
    tier(451.0, 1000.0, 51, 100),   // Satisfactory (indoor threshold)
    tier(1001.0, 2000.0, 101, 200), // Moderate
    tier(2001.0, 5000.0, 201, 300), // Poor
    tier(5001.0, 10000.0, 301, 400), // Very Poor
    tier(10001.0, 50000.0, 401, 500), // Severe
];

// ppm, scaled from the Indian industrial standard (25 ppm over 8h)
const NH3_TIERS: [BreakpointTier; 6] = [
    tier(0.0, 0.1, 0, 50),     // Good
    tier(0.11, 0.5, 51, 100),  // Satisfactory
    tier(0.51, 1.0, 101, 200), // Moderate
    tier(1.1, 5.0, 201, 300),  // Poor
    tier(5.1, 15.0, 301, 400), // Very Poor
    tier(15.1, 35.0, 401, 500), // Severe
];

// ppm, ethanol (no national standard)
const ALCOHOL_TIERS: [BreakpointTier; 6] = [
    tier(0.0, 0.05, 0, 50),     // Good
    tier(0.051, 0.1, 51, 100),  // Satisfactory
    tier(0.101, 0.3, 101, 200), // Moderate
    tier(0.301, 1.0, 201, 300), // Poor
    tier(1.1, 5.0, 301, 400),   // Very Poor
    tier(5.1, 10.0, 401, 500),  // Severe
];

// ppm, Indian annual average standard is 0.005 ppm
const BENZENE_TIERS: [BreakpointTier; 6] = [
    tier(0.0, 0.002, 0, 50),       // Good
    tier(0.0021, 0.005, 51, 100),  // Satisfactory
    tier(0.0051, 0.01, 101, 200),  // Moderate
    tier(0.011, 0.1, 201, 300),    // Poor
    tier(0.101, 0.5, 301, 400),    // Very Poor
    tier(0.501, 5.0, 401, 500),    // Severe
];

// ppm, PM1 proxy (no national standard)
const SMOKE_TIERS: [BreakpointTier; 6] = [
    tier(0.0, 0.02, 0, 50),     // Good
    tier(0.021, 0.05, 51, 100), // Satisfactory
    tier(0.051, 0.1, 101, 200), // Moderate
    tier(0.101, 0.2, 201, 300), // Poor
    tier(0.201, 0.5, 301, 400), // Very Poor
    tier(0.501, 1.0, 401, 500), // Severe
];

/// Read-only mapping from pollutant to its ordered tier list. Constructed
/// once at startup and passed by reference into the aggregator. Adding a
/// pollutant means adding a tier list here; the exhaustive match makes a
/// missing list a compile error rather than a silent lookup miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakpointTable;

impl BreakpointTable {
    /// The Indian national breakpoint standard used by this pipeline.
    pub fn national() -> Self {
        BreakpointTable
    }

    pub fn tiers(&self, pollutant: Pollutant) -> &'static [BreakpointTier] {
        match pollutant {
            Pollutant::Alcohol => &ALCOHOL_TIERS,
            Pollutant::Benzene => &BENZENE_TIERS,
            Pollutant::Co2 => &CO2_TIERS,
            Pollutant::Nh3 => &NH3_TIERS,
            Pollutant::Pm2_5 => &PM2_5_TIERS,
            Pollutant::Smoke => &SMOKE_TIERS,
        }
    }
}
