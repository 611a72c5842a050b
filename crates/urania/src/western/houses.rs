//! Whole-sign houses: the sign holding the ascendant is the first house,
//! each following sign the next house. All bodies in one sign share a house.

use crate::western::signs::sign_index;

/// House number (1-12) of a longitude for a given ascendant
pub fn whole_sign_house(longitude: f64, ascendant: f64) -> u8 {
    let body_sign = sign_index(longitude) as i32;
    let asc_sign = sign_index(ascendant) as i32;

    // difference of two sign indices lies in [-11, 11], one wrap is enough
    let mut house = body_sign - asc_sign + 1;
    if house < 1 {
        house += 12;
    }
    if house > 12 {
        house -= 12;
    }
    house as u8
}
