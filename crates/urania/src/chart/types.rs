use crate::ephemeris::{GeoLocation, PlanetId};
use crate::western::{sign_of, whole_sign_house, SignPlacement, ZodiacSign};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// House system tag. Only whole-sign houses are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HouseSystem {
    #[default]
    #[serde(rename = "Whole Sign")]
    WholeSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub ascendant: f64,
    pub midheaven: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseAngles {
    pub system: HouseSystem,
    pub angles: Angles,
}

/// A normalized longitude with its sign placement and house
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPosition {
    pub sign: ZodiacSign,
    /// Ecliptic longitude, 0 <= x < 360
    #[serde(rename = "degree")]
    pub longitude: f64,
    pub degree_in_sign: f64,
    /// 1-12
    pub house: u8,
}

impl BodyPosition {
    /// Place a raw longitude relative to an ascendant
    pub fn locate(longitude: f64, ascendant: f64) -> Self {
        let placement = sign_of(longitude);
        Self {
            sign: placement.sign,
            longitude: crate::western::normalize(longitude),
            degree_in_sign: placement.degree_in_sign,
            house: whole_sign_house(longitude, ascendant),
        }
    }

    pub fn placement(&self) -> SignPlacement {
        SignPlacement {
            sign: self.sign,
            degree_in_sign: self.degree_in_sign,
        }
    }
}

/// Sun, Moon and rising signs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BigThree {
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
    pub rising_sign: ZodiacSign,
}

/// A computed whole-sign chart.
///
/// Built once by [`crate::compute_chart`]; fields are read-only afterwards.
/// Serializes as `{date, location, houses, planets, fortuna}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    #[serde(rename = "date")]
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) location: GeoLocation,
    pub(crate) houses: HouseAngles,
    #[serde(rename = "planets")]
    pub(crate) positions: BTreeMap<PlanetId, BodyPosition>,
    pub(crate) fortuna: BodyPosition,
}

impl Chart {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn houses(&self) -> &HouseAngles {
        &self.houses
    }

    pub fn ascendant(&self) -> f64 {
        self.houses.angles.ascendant
    }

    pub fn midheaven(&self) -> f64 {
        self.houses.angles.midheaven
    }

    /// Position of a body, if the chart tracks it
    pub fn position(&self, body: PlanetId) -> Option<&BodyPosition> {
        self.positions.get(&body)
    }

    /// Positions in planetary order
    pub fn positions(&self) -> impl Iterator<Item = (PlanetId, &BodyPosition)> {
        self.positions.iter().map(|(id, pos)| (*id, pos))
    }

    pub fn fortuna(&self) -> &BodyPosition {
        &self.fortuna
    }

    pub fn big_three(&self) -> Option<BigThree> {
        Some(BigThree {
            sun_sign: self.position(PlanetId::Sun)?.sign,
            moon_sign: self.position(PlanetId::Moon)?.sign,
            rising_sign: sign_of(self.ascendant()).sign,
        })
    }
}
