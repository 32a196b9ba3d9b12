//! Reference globes that report a local radius.
//!
//! Offsets and framing never model flattening themselves; they take whatever
//! radius the globe reports at a position as authoritative.

use crate::position::SurfacePosition;
use crate::units::Distance;

/// Supplies the local radius of the reference surface.
pub trait Globe {
    fn radius_at(&self, position: &SurfacePosition) -> Distance;
}

/// A perfect sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalGlobe {
    radius: Distance,
}

impl SphericalGlobe {
    /// IUGG mean Earth radius.
    pub const EARTH: SphericalGlobe = SphericalGlobe::with_radius_meters(6_371_008.8);

    pub const fn with_radius_meters(meters: f64) -> Self {
        Self {
            radius: Distance::from_meters(meters),
        }
    }

    pub fn new(radius: Distance) -> Self {
        Self { radius }
    }
}

impl Globe for SphericalGlobe {
    fn radius_at(&self, _position: &SurfacePosition) -> Distance {
        self.radius
    }
}

/// An oblate ellipsoid of revolution. Reports the geocentric radius at the
/// position's latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipsoidGlobe {
    semi_major_m: f64,
    semi_minor_m: f64,
}

impl EllipsoidGlobe {
    pub const WGS84: EllipsoidGlobe = EllipsoidGlobe {
        semi_major_m: 6_378_137.0,
        semi_minor_m: 6_356_752.314_245,
    };

    pub fn new(semi_major: Distance, semi_minor: Distance) -> Self {
        Self {
            semi_major_m: semi_major.meters(),
            semi_minor_m: semi_minor.meters(),
        }
    }

    pub fn equatorial_radius(&self) -> Distance {
        Distance::from_meters(self.semi_major_m)
    }

    pub fn polar_radius(&self) -> Distance {
        Distance::from_meters(self.semi_minor_m)
    }
}

impl Globe for EllipsoidGlobe {
    fn radius_at(&self, position: &SurfacePosition) -> Distance {
        let lat = position.normalized().latitude();
        let (a, b) = (self.semi_major_m, self.semi_minor_m);
        let (cos_lat, sin_lat) = (lat.cos(), lat.sin());

        let num = (a * a * cos_lat).powi(2) + (b * b * sin_lat).powi(2);
        let den = (a * cos_lat).powi(2) + (b * sin_lat).powi(2);
        Distance::from_meters((num / den).sqrt())
    }
}
