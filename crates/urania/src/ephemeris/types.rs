use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive (-90..=90)
    pub lat: f64,
    /// Longitude in degrees, east positive (-180..=180)
    pub lng: f64,
}

/// Bodies known to the chart engine.
///
/// Ordering follows the traditional planetary sequence, which is also the
/// order used when a chart is serialized or compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetId {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl PlanetId {
    /// Every canonically named body.
    pub const ALL: [PlanetId; 10] = [
        PlanetId::Sun,
        PlanetId::Moon,
        PlanetId::Mercury,
        PlanetId::Venus,
        PlanetId::Mars,
        PlanetId::Jupiter,
        PlanetId::Saturn,
        PlanetId::Uranus,
        PlanetId::Neptune,
        PlanetId::Pluto,
    ];

    /// Bodies the chart assembler asks the position provider for.
    /// The outer planets are named but not computed.
    pub const TRACKED: [PlanetId; 7] = [
        PlanetId::Sun,
        PlanetId::Moon,
        PlanetId::Mercury,
        PlanetId::Venus,
        PlanetId::Mars,
        PlanetId::Jupiter,
        PlanetId::Saturn,
    ];

    /// Lowercase key used in serialized charts ("sun", "moon", ...)
    pub fn key(self) -> &'static str {
        match self {
            PlanetId::Sun => "sun",
            PlanetId::Moon => "moon",
            PlanetId::Mercury => "mercury",
            PlanetId::Venus => "venus",
            PlanetId::Mars => "mars",
            PlanetId::Jupiter => "jupiter",
            PlanetId::Saturn => "saturn",
            PlanetId::Uranus => "uranus",
            PlanetId::Neptune => "neptune",
            PlanetId::Pluto => "pluto",
        }
    }

    /// Capitalized display name ("Sun", "Moon", ...)
    pub fn display_name(self) -> &'static str {
        match self {
            PlanetId::Sun => "Sun",
            PlanetId::Moon => "Moon",
            PlanetId::Mercury => "Mercury",
            PlanetId::Venus => "Venus",
            PlanetId::Mars => "Mars",
            PlanetId::Jupiter => "Jupiter",
            PlanetId::Saturn => "Saturn",
            PlanetId::Uranus => "Uranus",
            PlanetId::Neptune => "Neptune",
            PlanetId::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PlanetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PlanetId::ALL
            .iter()
            .copied()
            .find(|p| p.key() == lower)
            .ok_or_else(|| format!("Unknown planet ID: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_is_prefix_of_all() {
        assert_eq!(&PlanetId::ALL[..7], &PlanetId::TRACKED[..]);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Jupiter".parse::<PlanetId>().unwrap(), PlanetId::Jupiter);
        assert_eq!(" moon ".parse::<PlanetId>().unwrap(), PlanetId::Moon);
        assert!("chiron".parse::<PlanetId>().is_err());
    }

    #[test]
    fn test_serializes_as_lowercase_key() {
        let json = serde_json::to_string(&PlanetId::Saturn).unwrap();
        assert_eq!(json, "\"saturn\"");
    }
}
