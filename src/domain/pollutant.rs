// Pollutant identifiers and wire-key normalization
use std::fmt;

/// Pollutants with a breakpoint scale. Variants are ordered by canonical key
/// so ordered iteration (and dominant-pollutant tie-breaking) is lexicographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    Alcohol,
    Benzene,
    Co2,
    Nh3,
    Pm2_5,
    Smoke,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Alcohol,
        Pollutant::Benzene,
        Pollutant::Co2,
        Pollutant::Nh3,
        Pollutant::Pm2_5,
        Pollutant::Smoke,
    ];

    /// Resolve a wire key to a pollutant. This is the single place where key
    /// aliasing is handled: sensor gateways encode fine particulate with a
    /// literal decimal point (`pm2.5`), the canonical key uses an underscore.
    /// Returns `None` for keys with no breakpoint scale.
    pub fn from_key(key: &str) -> Option<Pollutant> {
        match key {
            "alcohol" => Some(Pollutant::Alcohol),
            "benzene" => Some(Pollutant::Benzene),
            "co2" => Some(Pollutant::Co2),
            "nh3" => Some(Pollutant::Nh3),
            "pm2_5" | "pm2.5" => Some(Pollutant::Pm2_5),
            "smoke" => Some(Pollutant::Smoke),
            _ => None,
        }
    }

    /// Canonical key, as used in breakpoint lookups and archive records.
    pub fn key(&self) -> &'static str {
        match self {
            Pollutant::Alcohol => "alcohol",
            Pollutant::Benzene => "benzene",
            Pollutant::Co2 => "co2",
            Pollutant::Nh3 => "nh3",
            Pollutant::Pm2_5 => "pm2_5",
            Pollutant::Smoke => "smoke",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Pollutant::Alcohol => "Alcohol",
            Pollutant::Benzene => "Benzene",
            Pollutant::Co2 => "CO2",
            Pollutant::Nh3 => "NH3",
            Pollutant::Pm2_5 => "PM2.5",
            Pollutant::Smoke => "Smoke",
        }
    }

    /// Unit the concentration arrives in on the wire. Benzene is reported in
    /// ppb even though its breakpoint scale is in ppm; the calculator converts.
    pub fn unit(&self) -> &'static str {
        match self {
            Pollutant::Pm2_5 => "µg/m³",
            Pollutant::Benzene => "ppb",
            _ => "ppm",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
