//! Great-circle helpers on the unit sphere.

use glam::DVec3;

use crate::position::SurfacePosition;
use crate::units::{Angle, Distance};

/// Upper bound on subdivisions visited by [`walk_great_circle`].
pub const MAX_WALK_STEPS: usize = 1 << 16;

/// Convert a surface position to a unit sphere vector (z toward the north pole).
#[inline(always)]
pub fn to_unit_vector(position: &SurfacePosition) -> DVec3 {
    let lat_rad = position.latitude().radians();
    let lon_rad = position.longitude().radians();
    DVec3::new(
        lat_rad.cos() * lon_rad.cos(),
        lat_rad.cos() * lon_rad.sin(),
        lat_rad.sin(),
    )
}

/// Convert a (not necessarily unit) vector back to a normalized surface position.
#[inline]
pub fn from_unit_vector(v: DVec3) -> SurfacePosition {
    let v = v.normalize_or_zero();
    let lat = v.z.clamp(-1.0, 1.0).asin();
    let lon = v.y.atan2(v.x);
    SurfacePosition::from_valid(Angle::from_radians(lat), Angle::from_radians(lon))
}

/// Central angle between two positions (haversine form, stable for short arcs).
pub fn great_circle_angle(a: &SurfacePosition, b: &SurfacePosition) -> Angle {
    let lat1 = a.latitude().radians();
    let lat2 = b.latitude().radians();
    let dlat = lat2 - lat1;
    let dlon = b.longitude().radians() - a.longitude().radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    Angle::from_radians(2.0 * h.clamp(0.0, 1.0).sqrt().asin())
}

/// Arc length between two positions on a sphere of the given radius.
pub fn great_circle_distance(a: &SurfacePosition, b: &SurfacePosition, radius: Distance) -> Distance {
    radius * great_circle_angle(a, b).radians()
}

/// Position a fraction `t` of the way from `a` to `b` along the great circle
/// joining them. Coincident or antipodal endpoints have no unique great
/// circle, so those fall back to linear interpolation of the coordinates.
pub fn interpolate_great_circle(a: &SurfacePosition, b: &SurfacePosition, t: f64) -> SurfacePosition {
    let va = to_unit_vector(a);
    let vb = to_unit_vector(b);

    let angle = va.dot(vb).clamp(-1.0, 1.0).acos();
    let sin_angle = angle.sin();
    if sin_angle.abs() < 1e-10 {
        let lat = a.latitude() + (b.latitude() - a.latitude()).multiplied_by(t);
        let lon = a.longitude() + (b.longitude() - a.longitude()).multiplied_by(t);
        return SurfacePosition::from_valid(lat, lon).normalized();
    }

    let sa = ((1.0 - t) * angle).sin() / sin_angle;
    let sb = (t * angle).sin() / sin_angle;
    from_unit_vector(va * sa + vb * sb)
}

/// Visit points every `step` along the great circle from `a` to `b`, ending
/// at `b`. Used to draw arcs without allocating.
///
/// A step that is not a positive finite angle visits `b` alone. The number of
/// subdivisions is capped at [`MAX_WALK_STEPS`].
pub fn walk_great_circle(
    a: &SurfacePosition,
    b: &SurfacePosition,
    step: Angle,
    mut visitor: impl FnMut(SurfacePosition),
) {
    if !step.is_finite() || step <= Angle::ZERO {
        visitor(*b);
        return;
    }

    let angle = great_circle_angle(a, b);
    let steps = ((angle.degrees() / step.degrees()).ceil() as usize).clamp(1, MAX_WALK_STEPS);
    for i in 1..=steps {
        visitor(interpolate_great_circle(a, b, i as f64 / steps as f64));
    }
}
