//! Chart angles.
//!
//! The ascendant is a linear approximation from clock time and coordinates,
//! not a spherical-astronomy solution. House placement and the Part of
//! Fortune depend on this exact formula, so it must not be "corrected".

use crate::western::signs::normalize;
use chrono::{DateTime, Timelike, Utc};

/// Approximate ascendant: `(utc_hour / 24) * 360 + lng + lat * 0.5`, normalized.
///
/// The hour fraction uses hours and minutes only.
pub fn ascendant(at: DateTime<Utc>, lat: f64, lng: f64) -> f64 {
    let hour = at.hour() as f64 + at.minute() as f64 / 60.0;
    let time_angle = (hour / 24.0) * 360.0;
    normalize(time_angle + lng + lat * 0.5)
}

/// Midheaven, 90° ahead of the ascendant in this model
pub fn midheaven(ascendant: f64) -> f64 {
    normalize(ascendant + 90.0)
}

/// Part of Fortune: Ascendant + Moon - Sun
pub fn fortuna(ascendant: f64, moon: f64, sun: f64) -> f64 {
    normalize(ascendant + moon - sun)
}
