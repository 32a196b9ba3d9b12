//! Moving a position by a ground distance along one cardinal direction.
//!
//! East/west moves follow the latitude circle through the start point, whose
//! radius shrinks with `cos(latitude)`; north/south moves follow a meridian,
//! which is a great circle. Combining the two is therefore order sensitive:
//! an east/west move must be taken at the original latitude, before the
//! north/south move changes it.

use tracing::trace;

use crate::error::{GeoError, Result};
use crate::globe::Globe;
use crate::position::GeodeticPosition;
use crate::units::{Angle, Distance};

fn check_arguments(distance: Distance, radius: Distance) -> Result<()> {
    if !radius.is_finite() || radius <= Distance::ZERO {
        return Err(GeoError::invalid(
            "radius",
            format!("expected a positive finite radius, got {} m", radius.meters()),
        ));
    }
    if !distance.is_finite() || distance.is_negative() {
        return Err(GeoError::invalid(
            "distance",
            format!("expected a non-negative finite distance, got {} m", distance.meters()),
        ));
    }
    Ok(())
}

impl GeodeticPosition {
    /// Move `distance` west along the latitude circle of a globe with local `radius`.
    pub fn west(&self, distance: Distance, radius: Distance) -> Result<GeodeticPosition> {
        self.along_latitude_circle(distance, radius, -1.0)
    }

    /// Move `distance` east along the latitude circle of a globe with local `radius`.
    pub fn east(&self, distance: Distance, radius: Distance) -> Result<GeodeticPosition> {
        self.along_latitude_circle(distance, radius, 1.0)
    }

    /// Move `distance` north along the meridian, stopping at the pole.
    pub fn north(&self, distance: Distance, radius: Distance) -> Result<GeodeticPosition> {
        self.along_meridian(distance, radius, 1.0)
    }

    /// Move `distance` south along the meridian, stopping at the pole.
    pub fn south(&self, distance: Distance, radius: Distance) -> Result<GeodeticPosition> {
        self.along_meridian(distance, radius, -1.0)
    }

    /// West, then south, each using the globe's radius at the point being moved.
    pub fn pad_south_west<G>(&self, distance: Distance, globe: &G) -> Result<GeodeticPosition>
    where
        G: Globe + ?Sized,
    {
        let moved = self.west(distance, globe.radius_at(&self.surface()))?;
        moved.south(distance, globe.radius_at(&moved.surface()))
    }

    /// East, then north, each using the globe's radius at the point being moved.
    pub fn pad_north_east<G>(&self, distance: Distance, globe: &G) -> Result<GeodeticPosition>
    where
        G: Globe + ?Sized,
    {
        let moved = self.east(distance, globe.radius_at(&self.surface()))?;
        moved.north(distance, globe.radius_at(&moved.surface()))
    }

    fn along_latitude_circle(
        &self,
        distance: Distance,
        radius: Distance,
        sign: f64,
    ) -> Result<GeodeticPosition> {
        check_arguments(distance, radius)?;

        let lat = self.latitude().normalized_latitude();
        if lat == Angle::POS90 || lat == Angle::NEG90 {
            // Zero-radius latitude circle: every longitude is the same point.
            trace!(%lat, "east/west move at a pole leaves longitude unchanged");
            return Ok(*self);
        }

        let circle_radius = radius * lat.cos();
        let delta = Angle::from_radians(distance.ratio_to(circle_radius)?);
        let longitude = self.longitude() + delta.multiplied_by(sign);

        Ok(GeodeticPosition::from_valid(
            self.latitude(),
            longitude,
            self.altitude(),
        ))
    }

    fn along_meridian(&self, distance: Distance, radius: Distance, sign: f64) -> Result<GeodeticPosition> {
        check_arguments(distance, radius)?;

        let delta = Angle::from_radians(distance.ratio_to(radius)?);
        let latitude = (self.latitude() + delta.multiplied_by(sign)).clamp(Angle::NEG90, Angle::POS90);

        Ok(GeodeticPosition::from_valid(
            latitude,
            self.longitude(),
            self.altitude(),
        ))
    }
}
