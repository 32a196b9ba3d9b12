//! Unit-safe scalar value types.

mod angle;
mod distance;

pub use angle::Angle;
pub use distance::Distance;
