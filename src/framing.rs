//! Fit a padded set of positions into a camera's view.
//!
//! [`compute_framing`] is pure: it finds the bounding extent, pads it by a
//! ground margin, measures the padded spans, picks whichever axis constrains
//! the view for the camera's aspect ratio, and solves the right triangle
//! formed by the half-span, the half field of view and the eye distance.
//! [`frame_camera`] runs the same computation against a [`Camera`] and then
//! moves it.
//!
//! Extents that cross the antimeridian are not handled: the corner selection,
//! the padding directions and the longitude span all assume the extent does
//! not wrap, so such a set frames the complementary side of the globe.

use tracing::debug;

use crate::error::{GeoError, Result};
use crate::extent::bounding_extent;
use crate::geo::{great_circle_distance, interpolate_great_circle};
use crate::globe::Globe;
use crate::position::{GeodeticPosition, SurfacePosition};
use crate::units::{Angle, Distance};

/// The viewport side of framing. Implementations own the camera state and
/// must be driven from whichever thread owns the display.
pub trait Camera {
    /// Viewport height divided by width.
    fn aspect_ratio(&self) -> f64;

    /// Horizontal field of view.
    fn field_of_view(&self) -> Angle;

    /// Reset heading to zero and look down at `center` from `elevation`.
    fn look_at(&mut self, center: &GeodeticPosition, elevation: Distance);
}

/// Which extent limited the eye distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstrainingAxis {
    Horizontal,
    Vertical,
}

/// Camera placement produced by [`compute_framing`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    /// Look-at point: great-circle midpoint of the padded corners.
    pub center: GeodeticPosition,
    /// Eye distance from `center`.
    pub elevation: Distance,
    pub constraining_axis: ConstrainingAxis,
    /// East-west ground span of the padded extent.
    pub longitude_span: Distance,
    /// North-south ground span of the padded extent.
    pub latitude_span: Distance,
}

/// Compute the camera placement that fits `points`, padded by `margin` on every
/// side, into a viewport with the given aspect ratio and horizontal FOV.
///
/// Returns `Ok(None)` for an empty point set.
pub fn compute_framing<G>(
    points: &[GeodeticPosition],
    margin: Distance,
    aspect_ratio: f64,
    horizontal_fov: Angle,
    globe: &G,
) -> Result<Option<Framing>>
where
    G: Globe + ?Sized,
{
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(GeoError::invalid(
            "aspect_ratio",
            format!("expected a positive finite ratio, got {aspect_ratio}"),
        ));
    }
    if !(horizontal_fov > Angle::ZERO && horizontal_fov < Angle::POS180) {
        return Err(GeoError::invalid(
            "horizontal_fov",
            format!("expected an angle in (0°, 180°), got {horizontal_fov}"),
        ));
    }

    // Approximation, not a projection-correct vertical FOV.
    let vertical_fov = horizontal_fov.multiplied_by(aspect_ratio);
    if vertical_fov >= Angle::POS180 {
        return Err(GeoError::invalid(
            "aspect_ratio",
            format!("vertical field of view {vertical_fov} ({horizontal_fov} x {aspect_ratio}) must stay below 180°"),
        ));
    }

    let Some(extent) = bounding_extent(points) else {
        return Ok(None);
    };

    // Longitude first on each corner: it depends on the unpadded latitude.
    let padded_min = extent.min().pad_south_west(margin, globe)?;
    let padded_max = extent.max().pad_north_east(margin, globe)?;

    let corner = padded_min.surface();
    let radius = globe.radius_at(&corner);
    let longitude_span = span_or_zero(
        &corner,
        &SurfacePosition::from_valid(padded_min.latitude(), padded_max.longitude()),
        radius,
    );
    let latitude_span = span_or_zero(
        &corner,
        &SurfacePosition::from_valid(padded_max.latitude(), padded_min.longitude()),
        radius,
    );

    // Raw division on purpose: a zero longitude span reads as an infinitely
    // tall extent, and two zero spans compare false and fall to horizontal.
    let (span, fov, constraining_axis) =
        if latitude_span.meters() / longitude_span.meters() > aspect_ratio {
            (latitude_span, vertical_fov, ConstrainingAxis::Vertical)
        } else {
            (longitude_span, horizontal_fov, ConstrainingAxis::Horizontal)
        };

    let elevation = (span / 2.0) / fov.tan_half_angle();

    let center_surface = interpolate_great_circle(&padded_min.surface(), &padded_max.surface(), 0.5);
    let center_altitude = (padded_min.altitude() + padded_max.altitude()) / 2.0;
    let center = GeodeticPosition::from_surface(center_surface, center_altitude);

    debug!(
        points = points.len(),
        %longitude_span,
        %latitude_span,
        ?constraining_axis,
        %elevation,
        %center,
        "computed framing"
    );

    Ok(Some(Framing {
        center,
        elevation,
        constraining_axis,
        longitude_span,
        latitude_span,
    }))
}

/// Frame `points` with `margin` on `camera`, reading its current aspect ratio
/// and field of view, then move it. An empty point set leaves the camera
/// untouched.
pub fn frame_camera<C, G>(
    camera: &mut C,
    points: &[GeodeticPosition],
    margin: Distance,
    globe: &G,
) -> Result<Option<Framing>>
where
    C: Camera + ?Sized,
    G: Globe + ?Sized,
{
    let framing = compute_framing(
        points,
        margin,
        camera.aspect_ratio(),
        camera.field_of_view(),
        globe,
    )?;

    if let Some(framing) = &framing {
        camera.look_at(&framing.center, framing.elevation);
    }
    Ok(framing)
}

fn span_or_zero(from: &SurfacePosition, to: &SurfacePosition, radius: Distance) -> Distance {
    let span = great_circle_distance(from, to, radius);
    if span.is_finite() {
        span
    } else {
        Distance::ZERO
    }
}
