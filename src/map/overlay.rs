use geoframe::geo::walk_great_circle;
use geoframe::{Angle, BoundingExtent, GeodeticPosition, SurfacePosition};

use crate::braille::BrailleCanvas;
use crate::map::GlobeViewport;

/// Graticule spacing in degrees
const GRATICULE_STEP: i32 = 30;
/// Sampling step along graticule and extent edges, in degrees
const EDGE_SAMPLE_DEG: f64 = 2.0;

/// Rendered layers, back to front.
pub struct Overlay {
    pub graticule: BrailleCanvas,
    pub extent: BrailleCanvas,
    pub tracks: BrailleCanvas,
}

/// Draw the globe outline, graticule, extent box and positions for the viewport.
pub fn render_overlay(
    width: usize,
    height: usize,
    viewport: &GlobeViewport,
    positions: &[GeodeticPosition],
    extent: Option<&BoundingExtent>,
) -> Overlay {
    let mut graticule = BrailleCanvas::new(width, height);
    let mut extent_layer = BrailleCanvas::new(width, height);
    let mut tracks = BrailleCanvas::new(width, height);

    let cx = viewport.width as i32 / 2;
    let cy = viewport.height as i32 / 2;
    if viewport.radius < (viewport.width.max(viewport.height) * 4) as f64 {
        graticule.circle(cx, cy, viewport.radius as i32);
    }

    for lon in (-180..180).step_by(GRATICULE_STEP as usize) {
        let lon = lon as f64;
        draw_polyline(&mut graticule, viewport, sample(-90.0, 90.0, |lat| (lat, lon)));
    }
    for lat in (-60..=60).step_by(GRATICULE_STEP as usize) {
        let lat = lat as f64;
        draw_polyline(&mut graticule, viewport, sample(-180.0, 180.0, |lon| (lat, lon)));
    }

    if let Some(extent) = extent {
        let (s, w) = (extent.min().latitude().degrees(), extent.min().longitude().degrees());
        let (n, e) = (extent.max().latitude().degrees(), extent.max().longitude().degrees());
        draw_polyline(&mut extent_layer, viewport, sample(w, e, |lon| (s, lon)));
        draw_polyline(&mut extent_layer, viewport, sample(w, e, |lon| (n, lon)));
        draw_polyline(&mut extent_layer, viewport, sample(s, n, |lat| (lat, w)));
        draw_polyline(&mut extent_layer, viewport, sample(s, n, |lat| (lat, e)));
    }

    // Consecutive positions are joined along the great circle between them
    for pair in positions.windows(2) {
        let from = pair[0].surface().normalized();
        let mut arc = vec![from];
        walk_great_circle(
            &from,
            &pair[1].surface().normalized(),
            Angle::from_degrees(EDGE_SAMPLE_DEG),
            |p| arc.push(p),
        );
        draw_polyline(&mut tracks, viewport, arc.into_iter());
    }

    for position in positions {
        if let Some((px, py)) = viewport.project(&position.surface().normalized()) {
            if viewport.is_visible(px, py) {
                tracks.cross(px, py, 1);
            }
        }
    }

    Overlay {
        graticule,
        extent: extent_layer,
        tracks,
    }
}

/// Evenly spaced samples from `start` to `end` inclusive, mapped to (lat, lon) degrees.
fn sample(start: f64, end: f64, to_lat_lon: impl Fn(f64) -> (f64, f64)) -> impl Iterator<Item = SurfacePosition> {
    let steps = (((end - start).abs() / EDGE_SAMPLE_DEG).ceil() as usize).max(1);
    (0..=steps).filter_map(move |i| {
        let (lat, lon) = to_lat_lon(start + (end - start) * i as f64 / steps as f64);
        SurfacePosition::from_degrees(lat, lon).ok()
    })
}

/// Connect consecutive front-facing samples; hidden samples break the line.
fn draw_polyline(
    canvas: &mut BrailleCanvas,
    viewport: &GlobeViewport,
    points: impl Iterator<Item = SurfacePosition>,
) {
    let mut prev: Option<(i32, i32)> = None;
    for point in points {
        let projected = viewport.project(&point);
        if let (Some(a), Some(b)) = (prev, projected) {
            let on_screen = viewport.is_visible(a.0, a.1) || viewport.is_visible(b.0, b.1);
            if on_screen && within_reach(viewport, a) && within_reach(viewport, b) {
                canvas.line(a, b);
            }
        }
        prev = projected;
    }
}

/// Bounds Bresenham work when zoomed far in: segments reaching many screens
/// away are dropped rather than rasterized.
fn within_reach(viewport: &GlobeViewport, (x, y): (i32, i32)) -> bool {
    let reach_x = viewport.width as i32 * 8;
    let reach_y = viewport.height as i32 * 8;
    x.abs() < reach_x && y.abs() < reach_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoframe::{bounding_extent, Distance};

    #[test]
    fn test_positions_are_drawn() {
        let vp = GlobeViewport::world(
            &SurfacePosition::from_degrees(0.0, 0.0).unwrap(),
            40,
            40,
            Angle::from_degrees(45.0),
            Distance::from_meters(6_371_008.8),
        );
        let positions = [GeodeticPosition::from_degrees(0.0, 0.0, Distance::ZERO).unwrap()];
        let extent = bounding_extent(&positions);
        let overlay = render_overlay(20, 10, &vp, &positions, extent.as_ref());
        assert!(overlay.tracks.rows().any(|row| row.chars().any(|c| c != '\u{2800}')));
    }
}
