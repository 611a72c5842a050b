use crate::chart::error::ChartError;
use crate::chart::types::{Angles, BodyPosition, Chart, HouseAngles, HouseSystem};
use crate::ephemeris::{GeoLocation, PlanetId, PositionProvider};
use crate::western::{ascendant, fortuna, midheaven, normalize};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeMap;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse an ISO-8601 birth date.
///
/// Accepts RFC 3339 (any offset), a date-time without offset (taken as UTC)
/// or a bare date (midnight UTC).
pub fn parse_birth_date(input: &str) -> Result<DateTime<Utc>, ChartError> {
    let trimmed = input.trim();
    let invalid = || {
        ChartError::invalid_input(
            "Invalid birthDate format. Use ISO format (YYYY-MM-DD or YYYY-MM-DDTHH:mm:ss)",
        )
    };

    if trimmed.is_empty() {
        return Err(invalid());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(invalid)
}

fn validate_location(lat: f64, lng: f64) -> Result<GeoLocation, ChartError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ChartError::invalid_input(
            "Invalid latitude. Must be a number between -90 and 90.",
        ));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(ChartError::invalid_input(
            "Invalid longitude. Must be a number between -180 and 180.",
        ));
    }
    Ok(GeoLocation { lat, lng })
}

/// Compute a whole-sign chart for an instant and location.
///
/// Validation happens before any provider call; no partial chart is ever
/// returned. Provider failures come back as [`ChartError::Computation`].
pub async fn compute_chart<P>(
    provider: &P,
    at: DateTime<Utc>,
    lat: f64,
    lng: f64,
) -> Result<Chart, ChartError>
where
    P: PositionProvider + ?Sized,
{
    let location = validate_location(lat, lng)?;

    let asc = ascendant(at, lat, lng);
    let mc = midheaven(asc);

    let mut positions = BTreeMap::new();
    for body in PlanetId::TRACKED {
        let raw = provider
            .longitude(body, at)
            .await
            .map_err(|source| ChartError::Computation { body, source })?;
        if !raw.is_finite() {
            return Err(ChartError::Computation {
                body,
                source: crate::ephemeris::EphemerisError::CalculationFailed {
                    planet: body,
                    datetime: at,
                    message: format!("non-finite longitude {}", raw),
                },
            });
        }
        positions.insert(body, BodyPosition::locate(normalize(raw), asc));
    }

    let sun = positions[&PlanetId::Sun].longitude;
    let moon = positions[&PlanetId::Moon].longitude;
    let fortuna = BodyPosition::locate(fortuna(asc, moon, sun), asc);

    log::debug!(
        "chart computed for {} at ({}, {}): asc {:.2}, {} bodies",
        at,
        lat,
        lng,
        asc,
        positions.len()
    );

    Ok(Chart {
        timestamp: at,
        location,
        houses: HouseAngles {
            system: HouseSystem::WholeSign,
            angles: Angles {
                ascendant: asc,
                midheaven: mc,
            },
        },
        positions,
        fortuna,
    })
}
