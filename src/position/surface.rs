use std::fmt;

use crate::error::{GeoError, Result};
use crate::units::Angle;

/// A latitude/longitude pair on the reference surface.
///
/// Coordinates are stored as given. [`SurfacePosition::normalized`] folds
/// them into -90..=90 and -180..=180.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePosition {
    latitude: Angle,
    longitude: Angle,
}

impl SurfacePosition {
    /// Build a position, rejecting non-finite coordinates. A NaN coordinate is
    /// how a missing value arrives from a data source.
    pub fn new(latitude: Angle, longitude: Angle) -> Result<Self> {
        if !latitude.is_finite() {
            return Err(GeoError::invalid(
                "latitude",
                format!("expected a finite angle, got {}", latitude.degrees()),
            ));
        }
        if !longitude.is_finite() {
            return Err(GeoError::invalid(
                "longitude",
                format!("expected a finite angle, got {}", longitude.degrees()),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(Angle::from_degrees(latitude), Angle::from_degrees(longitude))
    }

    pub fn from_radians(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(Angle::from_radians(latitude), Angle::from_radians(longitude))
    }

    /// Caller guarantees both angles are finite.
    pub(crate) const fn from_valid(latitude: Angle, longitude: Angle) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[inline]
    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> Angle {
        self.longitude
    }

    pub fn is_normal(&self) -> bool {
        self.latitude.is_valid_latitude() && self.longitude.is_valid_longitude()
    }

    /// Equivalent position with both axes folded into their canonical ranges.
    pub fn normalized(&self) -> SurfacePosition {
        Self::from_valid(
            self.latitude.normalized_latitude(),
            self.longitude.normalized_longitude(),
        )
    }
}

impl fmt::Display for SurfacePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat = self.latitude.degrees();
        let lon = self.longitude.degrees();
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            lat.abs(),
            if lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" }
        )
    }
}
