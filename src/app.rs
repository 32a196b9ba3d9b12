use anyhow::Result;
use clap::ValueEnum;
use geoframe::geo::interpolate_great_circle;
use geoframe::{
    bounding_extent, compute_framing, Angle, BoundingExtent, Distance, EllipsoidGlobe, Framing,
    Camera, GeodeticPosition, Globe, SphericalGlobe, SurfacePosition,
};
use tracing::{error, info};

use crate::map::GlobeViewport;

/// (lat, lon) shown when there is nothing to look at
const DEFAULT_CENTER: (f64, f64) = (20.0, 0.0);

/// Reference surface used for offsets and spans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum GlobeModel {
    /// Sphere with the mean Earth radius
    Sphere,
    /// WGS84 ellipsoid, radius varies with latitude
    #[default]
    Wgs84,
}

impl GlobeModel {
    pub fn globe(self) -> &'static dyn Globe {
        match self {
            GlobeModel::Sphere => &SphericalGlobe::EARTH,
            GlobeModel::Wgs84 => &EllipsoidGlobe::WGS84,
        }
    }
}

/// Viewer tunables resolved from the command line.
#[derive(Clone, Copy, Debug)]
pub struct ViewerSettings {
    pub margin: Distance,
    pub fov: Angle,
    pub globe: GlobeModel,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            margin: Distance::from_kilometers(25.0),
            fov: Angle::from_degrees(45.0),
            globe: GlobeModel::default(),
        }
    }
}

/// Application state
pub struct App {
    pub viewport: GlobeViewport,
    pub positions: Vec<GeodeticPosition>,
    pub extent: Option<BoundingExtent>,
    pub settings: ViewerSettings,
    pub last_framing: Option<Framing>,
    /// One-line feedback shown in the status bar
    pub message: Option<String>,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
}

impl App {
    pub fn new(
        width: usize,
        height: usize,
        positions: Vec<GeodeticPosition>,
        settings: ViewerSettings,
    ) -> Result<Self> {
        let (pixel_width, pixel_height) = pixel_size(width, height);
        let extent = bounding_extent(&positions);
        let start = match &extent {
            Some(e) => interpolate_great_circle(&e.min().surface(), &e.max().surface(), 0.5),
            None => SurfacePosition::from_degrees(DEFAULT_CENTER.0, DEFAULT_CENTER.1)?,
        };
        let ground_radius = settings.globe.globe().radius_at(&start);

        Ok(Self {
            viewport: GlobeViewport::world(&start, pixel_width, pixel_height, settings.fov, ground_radius),
            positions,
            extent,
            settings,
            last_framing: None,
            message: None,
            should_quit: false,
            last_mouse: None,
        })
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (pixel_width, pixel_height) = pixel_size(width, height);
        self.viewport.set_size(pixel_width, pixel_height);
    }

    /// Fit every loaded position, padded by the configured margin, into view.
    pub fn frame(&mut self) {
        let globe = self.settings.globe.globe();
        let framing = compute_framing(
            &self.positions,
            self.settings.margin,
            self.viewport.aspect_ratio(),
            self.viewport.field_of_view(),
            globe,
        );
        match framing {
            Ok(Some(framing)) => {
                // Pixel scale follows the surface under the new center
                self.viewport
                    .set_ground_radius(globe.radius_at(&framing.center.surface()));
                self.viewport.look_at(&framing.center, framing.elevation);
                info!(center = %framing.center, elevation = %framing.elevation, "framed positions");
                self.message = Some(format!(
                    "framed {} positions ({:?})",
                    self.positions.len(),
                    framing.constraining_axis
                ));
                self.last_framing = Some(framing);
            }
            Ok(None) => self.message = Some("nothing to frame".to_string()),
            Err(e) => {
                error!("framing failed: {e}");
                self.message = Some(format!("framing failed: {e}"));
            }
        }
    }

    /// Grow or shrink the framing margin by half, then reframe.
    pub fn adjust_margin(&mut self, grow: bool) {
        self.settings.margin = if grow {
            self.settings.margin * 1.5
        } else {
            self.settings.margin / 1.5
        };
        self.frame();
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.rotate_drag(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle mouse drag by rotating the globe
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            // Terminal cells are 2x4 braille pixels
            self.pan(dx * 2, dy * 4);
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn center_label(&self) -> String {
        self.viewport.center().to_string()
    }

    pub fn elevation_label(&self) -> String {
        self.viewport.elevation().to_string()
    }

    pub fn margin_label(&self) -> String {
        self.settings.margin.to_string()
    }
}

/// Braille pixel size of the map area for a terminal of `width` x `height`
/// cells: a 1-cell border on each side and a 1-row status bar.
fn pixel_size(width: usize, height: usize) -> (usize, usize) {
    let inner_width = width.saturating_sub(2);
    let inner_height = height.saturating_sub(3);
    (inner_width * 2, inner_height * 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_positions;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_moves_camera_over_positions() {
        let mut app = App::new(80, 24, sample_positions(), ViewerSettings::default()).unwrap();
        app.frame();

        let framing = app.last_framing.expect("sample track frames");
        let center = app.viewport.center();
        assert_relative_eq!(center.latitude().degrees(), framing.center.latitude().degrees(), epsilon = 1e-9);
        assert_relative_eq!(center.longitude().degrees(), framing.center.longitude().degrees(), epsilon = 1e-9);
        assert!(center.latitude().degrees() > 54.0 && center.latitude().degrees() < 56.0);
    }

    #[test]
    fn test_frame_without_positions_is_a_no_op() {
        let mut app = App::new(80, 24, Vec::new(), ViewerSettings::default()).unwrap();
        let before = app.viewport.radius;
        app.frame();
        assert!(app.last_framing.is_none());
        assert_eq!(app.viewport.radius, before);
        assert_eq!(app.message.as_deref(), Some("nothing to frame"));
    }

    #[test]
    fn test_larger_margin_raises_elevation() {
        let mut app = App::new(80, 24, sample_positions(), ViewerSettings::default()).unwrap();
        app.frame();
        let near = app.last_framing.unwrap().elevation;
        app.adjust_margin(true);
        let far = app.last_framing.unwrap().elevation;
        assert!(far > near);
    }

    #[test]
    fn test_frame_recalibrates_ground_radius_at_new_center() {
        let settings = ViewerSettings {
            globe: GlobeModel::Wgs84,
            ..ViewerSettings::default()
        };
        let positions = vec![
            GeodeticPosition::from_degrees(-5.0, 10.0, Distance::ZERO).unwrap(),
            GeodeticPosition::from_degrees(-1.0, 14.0, Distance::ZERO).unwrap(),
        ];
        let mut app = App::new(80, 24, positions, settings).unwrap();
        let start = app.viewport.ground_radius();

        app.viewport.set_ground_radius(Distance::from_meters(1.0));
        app.frame();

        let framing = app.last_framing.unwrap();
        let expected = EllipsoidGlobe::WGS84.radius_at(&framing.center.surface());
        assert_eq!(app.viewport.ground_radius(), expected);
        assert_relative_eq!(app.viewport.ground_radius().meters(), start.meters(), max_relative = 1e-4);
    }

    #[test]
    fn test_pixel_size_accounts_for_chrome() {
        assert_eq!(pixel_size(80, 24), (156, 84));
        assert_eq!(pixel_size(1, 1), (0, 0));
    }
}
