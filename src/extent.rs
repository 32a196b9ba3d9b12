//! Axis-aligned geodetic bounding extents.
//!
//! Latitude, longitude and altitude extrema are tracked independently, so the
//! corners are synthetic: `min` and `max` generally do not coincide with any
//! input point. Longitudes are compared numerically, which means an extent
//! that straddles the antimeridian comes out as the complementary (wrong) box.

use rayon::prelude::*;

use crate::position::GeodeticPosition;
use crate::units::{Angle, Distance};

/// Inputs at least this large are folded in parallel.
const PARALLEL_THRESHOLD: usize = 4096;

/// Per-axis minimum and maximum corners over a set of positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingExtent {
    min: GeodeticPosition,
    max: GeodeticPosition,
}

impl BoundingExtent {
    #[inline]
    pub fn min(&self) -> GeodeticPosition {
        self.min
    }

    #[inline]
    pub fn max(&self) -> GeodeticPosition {
        self.max
    }

    /// Whether the normalized form of `point` lies inside the box, bounds inclusive.
    pub fn contains(&self, point: &GeodeticPosition) -> bool {
        let p = point.normalized();
        (self.min.latitude()..=self.max.latitude()).contains(&p.latitude())
            && (self.min.longitude()..=self.max.longitude()).contains(&p.longitude())
            && (self.min.altitude()..=self.max.altitude()).contains(&p.altitude())
    }
}

/// Running extrema in degrees and meters.
#[derive(Clone, Copy)]
struct Extrema {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
    min_alt: f64,
    max_alt: f64,
}

impl Extrema {
    const EMPTY: Extrema = Extrema {
        min_lat: f64::INFINITY,
        max_lat: f64::NEG_INFINITY,
        min_lon: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
        min_alt: f64::INFINITY,
        max_alt: f64::NEG_INFINITY,
    };

    #[inline]
    fn include(mut self, point: &GeodeticPosition) -> Self {
        let p = point.normalized();
        let lat = p.latitude().degrees();
        let lon = p.longitude().degrees();
        let alt = p.altitude().meters();

        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
        self.min_alt = self.min_alt.min(alt);
        self.max_alt = self.max_alt.max(alt);
        self
    }

    fn merge(self, other: Extrema) -> Self {
        Extrema {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
            min_alt: self.min_alt.min(other.min_alt),
            max_alt: self.max_alt.max(other.max_alt),
        }
    }

    fn into_extent(self) -> BoundingExtent {
        BoundingExtent {
            min: GeodeticPosition::from_valid(
                Angle::from_degrees(self.min_lat),
                Angle::from_degrees(self.min_lon),
                Distance::from_meters(self.min_alt),
            ),
            max: GeodeticPosition::from_valid(
                Angle::from_degrees(self.max_lat),
                Angle::from_degrees(self.max_lon),
                Distance::from_meters(self.max_alt),
            ),
        }
    }
}

/// Normalize every point and compute independent per-axis extrema.
///
/// Returns `None` for an empty input; that is a normal outcome, not an error.
pub fn bounding_extent(points: &[GeodeticPosition]) -> Option<BoundingExtent> {
    if points.is_empty() {
        return None;
    }

    let extrema = if points.len() >= PARALLEL_THRESHOLD {
        points
            .par_iter()
            .fold(|| Extrema::EMPTY, Extrema::include)
            .reduce(|| Extrema::EMPTY, Extrema::merge)
    } else {
        points.iter().fold(Extrema::EMPTY, Extrema::include)
    };

    Some(extrema.into_extent())
}
