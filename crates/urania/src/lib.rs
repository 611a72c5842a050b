//! Whole-sign natal chart computation.
//!
//! Raw ecliptic longitudes come from a [`PositionProvider`]; everything
//! downstream of it (normalization, sign lookup, house assignment, the
//! approximated angles and the Part of Fortune) is pure arithmetic.

pub mod chart;
pub mod ephemeris;
pub mod western;

pub use chart::{compute_chart, parse_birth_date, BigThree, Chart, ChartError, ChartFailure};
pub use ephemeris::{FixedPositionProvider, GeoLocation, PlanetId, PositionProvider};
pub use western::{SignPlacement, ZodiacSign};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisProvider;
