use crate::ephemeris::provider::{EphemerisError, PositionProvider};
use crate::ephemeris::types::PlanetId;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, julday, set_ephe_path};

// Swiss Ephemeris body codes
const PLANET_CODES: &[(PlanetId, i32)] = &[
    (PlanetId::Sun, 0),
    (PlanetId::Moon, 1),
    (PlanetId::Mercury, 2),
    (PlanetId::Venus, 3),
    (PlanetId::Mars, 4),
    (PlanetId::Jupiter, 5),
    (PlanetId::Saturn, 6),
    (PlanetId::Uranus, 7),
    (PlanetId::Neptune, 8),
    (PlanetId::Pluto, 9),
];

const FLG_JPLEPH: i32 = 1;
const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const EPHEMERIS_MASK: i32 = FLG_JPLEPH | FLG_SWIEPH | FLG_MOSEPH;

/// True when the library answered from a different ephemeris than requested
fn ephemeris_substituted(requested: i32, returned: i32) -> bool {
    requested & EPHEMERIS_MASK != returned & EPHEMERIS_MASK
}

/// Position provider backed by the Swiss Ephemeris.
///
/// With a data directory the file-based ephemeris is requested; without one
/// the built-in analytical (Moshier) ephemeris is used.
pub struct SwissEphemerisProvider {
    ephemeris_path: Option<PathBuf>,
    flags: i32,
}

impl SwissEphemerisProvider {
    /// Create a provider. An explicit path, or `SWISS_EPHEMERIS_PATH`, must exist.
    ///
    /// The data directory is process-wide in the Swiss Ephemeris; the last
    /// provider created with a path wins.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.or_else(|| env::var("SWISS_EPHEMERIS_PATH").ok().map(PathBuf::from));

        let flags = match &path {
            Some(p) if !p.exists() => {
                return Err(EphemerisError::FileNotFound {
                    path: p.display().to_string(),
                    message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                });
            }
            // an existing path cannot contain NUL, so the C string conversion holds
            Some(p) => {
                let dir = p.to_string_lossy();
                set_ephe_path(&dir);
                log::debug!("Swiss Ephemeris data path set to {}", dir);
                FLG_SWIEPH
            }
            None => FLG_MOSEPH,
        };

        Ok(Self {
            ephemeris_path: path,
            flags,
        })
    }

    pub fn ephemeris_path(&self) -> Option<&PathBuf> {
        self.ephemeris_path.as_ref()
    }

    fn calc_longitude(&self, body: PlanetId, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let code = PLANET_CODES
            .iter()
            .find(|(id, _)| *id == body)
            .map(|(_, code)| *code)
            .ok_or(EphemerisError::UnsupportedBody {
                planet: body,
                datetime: at,
            })?;

        let jd = datetime_to_julian_day(at);
        let result = calc_ut(jd, code as u32, self.flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet: body,
                datetime: at,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        if ephemeris_substituted(self.flags, result.code) {
            log::warn!(
                "Swiss Ephemeris answered {} with flags {:#x} instead of {:#x}; data files missing from {:?}?",
                body,
                result.code,
                self.flags,
                self.ephemeris_path
            );
        }

        Ok(result.out[0])
    }
}

#[async_trait]
impl PositionProvider for SwissEphemerisProvider {
    async fn longitude(&self, body: PlanetId, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.calc_longitude(body, at)
    }
}

/// Convert UTC datetime to Julian Day (Gregorian calendar)
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}
