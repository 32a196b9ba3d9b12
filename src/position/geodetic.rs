use std::fmt;

use crate::error::Result;
use crate::position::SurfacePosition;
use crate::units::{Angle, Distance};

/// A surface position plus an altitude relative to the reference globe.
///
/// Altitude is unconstrained and untouched by normalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticPosition {
    surface: SurfacePosition,
    altitude: Distance,
}

impl GeodeticPosition {
    pub fn new(latitude: Angle, longitude: Angle, altitude: Distance) -> Result<Self> {
        Ok(Self::from_surface(
            SurfacePosition::new(latitude, longitude)?,
            altitude,
        ))
    }

    pub fn from_degrees(latitude: f64, longitude: f64, altitude: Distance) -> Result<Self> {
        Ok(Self::from_surface(
            SurfacePosition::from_degrees(latitude, longitude)?,
            altitude,
        ))
    }

    pub const fn from_surface(surface: SurfacePosition, altitude: Distance) -> Self {
        Self { surface, altitude }
    }

    /// Caller guarantees both angles are finite.
    pub(crate) const fn from_valid(latitude: Angle, longitude: Angle, altitude: Distance) -> Self {
        Self::from_surface(SurfacePosition::from_valid(latitude, longitude), altitude)
    }

    #[inline]
    pub fn latitude(&self) -> Angle {
        self.surface.latitude()
    }

    #[inline]
    pub fn longitude(&self) -> Angle {
        self.surface.longitude()
    }

    #[inline]
    pub fn altitude(&self) -> Distance {
        self.altitude
    }

    #[inline]
    pub fn surface(&self) -> SurfacePosition {
        self.surface
    }

    pub fn with_latitude(&self, latitude: Angle) -> Result<Self> {
        Self::new(latitude, self.longitude(), self.altitude)
    }

    pub fn with_longitude(&self, longitude: Angle) -> Result<Self> {
        Self::new(self.latitude(), longitude, self.altitude)
    }

    pub fn with_altitude(&self, altitude: Distance) -> Self {
        Self::from_surface(self.surface, altitude)
    }

    pub fn with_surface(&self, surface: SurfacePosition) -> Self {
        Self::from_surface(surface, self.altitude)
    }

    pub fn is_normal(&self) -> bool {
        self.surface.is_normal()
    }

    /// Fold the surface component; altitude is carried over unchanged.
    pub fn normalized(&self) -> GeodeticPosition {
        self.with_surface(self.surface.normalized())
    }

    /// Exact equality of latitude, longitude and altitude. No tolerance is
    /// applied, so a point and its normalized form only match when the fold
    /// was a no-op.
    pub fn contains(&self, point: &GeodeticPosition) -> bool {
        self == point
    }
}

impl fmt::Display for GeodeticPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.1} m", self.surface, self.altitude.meters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lon: f64, alt_m: f64) -> GeodeticPosition {
        GeodeticPosition::from_degrees(lat, lon, Distance::from_meters(alt_m)).unwrap()
    }

    #[test]
    fn test_normalized_keeps_altitude() {
        let p = pos(100.0, 200.0, -35.0).normalized();
        assert_eq!(p.latitude().degrees(), 80.0);
        assert_eq!(p.longitude().degrees(), -160.0);
        assert_eq!(p.altitude().meters(), -35.0);
    }

    #[test]
    fn test_partial_updates() {
        let p = pos(10.0, 20.0, 30.0);
        let q = p.with_latitude(Angle::from_degrees(-5.0)).unwrap();
        assert_eq!(q.latitude().degrees(), -5.0);
        assert_eq!(q.longitude(), p.longitude());
        assert_eq!(q.altitude(), p.altitude());

        let r = p.with_altitude(Distance::from_feet(100.0));
        assert_eq!(r.surface(), p.surface());
        assert!(p.with_longitude(Angle::from_degrees(f64::NAN)).is_err());
    }

    #[test]
    fn test_contains_is_exact() {
        let p = pos(10.0, 20.0, 30.0);
        assert!(p.contains(&pos(10.0, 20.0, 30.0)));
        assert!(!p.contains(&pos(10.0, 20.0, 30.000_000_1)));

        let unfolded = pos(0.0, 190.0, 0.0);
        assert!(!unfolded.contains(&unfolded.normalized()));
    }
}
