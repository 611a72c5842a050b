//! Western (tropical) geometry: signs, whole-sign houses and chart angles.

pub mod angles;
pub mod houses;
pub mod signs;

pub use angles::{ascendant, fortuna, midheaven};
pub use houses::whole_sign_house;
pub use signs::{normalize, sign_of, SignPlacement, ZodiacSign};
