//! Unit-safe geodetic geometry and camera framing for tactical map displays.
//!
//! Angles and distances are opaque value types built through named unit
//! factories. Positions can be normalized, bounded, offset by ground distances
//! along a reference globe, and framed into a camera's view.

pub mod error;
pub mod extent;
pub mod framing;
pub mod geo;
pub mod globe;
mod offset;
pub mod position;
pub mod units;

pub use error::{GeoError, Result};
pub use extent::{bounding_extent, BoundingExtent};
pub use framing::{compute_framing, frame_camera, Camera, ConstrainingAxis, Framing};
pub use globe::{EllipsoidGlobe, Globe, SphericalGlobe};
pub use position::{GeodeticPosition, SurfacePosition};
pub use units::{Angle, Distance};
