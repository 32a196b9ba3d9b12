//! Surface and geodetic positions.

mod geodetic;
mod surface;

pub use geodetic::GeodeticPosition;
pub use surface::SurfacePosition;
