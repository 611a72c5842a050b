pub mod assembler;
pub mod error;
pub mod types;

pub use assembler::{compute_chart, parse_birth_date};
pub use error::{ChartError, ChartFailure};
pub use types::{Angles, BigThree, BodyPosition, Chart, HouseAngles, HouseSystem};
