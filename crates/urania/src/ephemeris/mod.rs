pub mod provider;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod swiss;

pub use provider::{EphemerisError, FixedPositionProvider, PositionProvider};
pub use types::{GeoLocation, PlanetId};

#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemerisProvider;
