use geoframe::geo::{from_unit_vector, to_unit_vector};
use geoframe::{Angle, Camera, Distance, GeodeticPosition, SurfacePosition};
use glam::DVec3;

/// Smallest sphere radius as a fraction of canvas width (whole globe visible).
const MIN_RADIUS_FRACTION: f64 = 0.35;
/// Largest sphere radius as a multiple of canvas width (a few km across).
const MAX_RADIUS_FACTOR: f64 = 5000.0;

/// Globe camera using orthographic projection of a rotating sphere.
/// Orientation is stored as three orthonormal column vectors so points can be
/// projected with two dot products.
#[derive(Clone)]
pub struct GlobeViewport {
    /// Points from the globe center toward the look-at point
    forward: DVec3,
    /// Screen right (east at the center when heading is zero)
    right: DVec3,
    /// Screen up (north at the center when heading is zero)
    up: DVec3,
    /// Sphere radius in braille pixels (controls zoom)
    pub radius: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
    /// Horizontal field of view used to convert between zoom and eye distance
    fov: Angle,
    /// Ground radius the pixel scale is calibrated against
    ground_radius: Distance,
}

impl GlobeViewport {
    /// Build a north-up globe viewport centered on `center` with the given pixel radius.
    pub fn new(
        center: &SurfacePosition,
        radius: f64,
        width: usize,
        height: usize,
        fov: Angle,
        ground_radius: Distance,
    ) -> Self {
        let mut viewport = Self {
            forward: DVec3::X,
            right: DVec3::Y,
            up: DVec3::Z,
            radius,
            width,
            height,
            fov,
            ground_radius,
        };
        viewport.orient_north_up(center);
        viewport
    }

    /// Whole-globe view centered on the given position.
    pub fn world(center: &SurfacePosition, width: usize, height: usize, fov: Angle, ground_radius: Distance) -> Self {
        let radius = width as f64 * MIN_RADIUS_FRACTION;
        Self::new(center, radius, width, height, fov, ground_radius)
    }

    /// Point the camera at `center` with zero heading.
    fn orient_north_up(&mut self, center: &SurfacePosition) {
        let lat = center.latitude().radians();
        let lon = center.longitude().radians();
        let forward = to_unit_vector(center);

        // Derivative of forward w.r.t. latitude points north
        let raw_up = DVec3::new(-lat.sin() * lon.cos(), -lat.sin() * lon.sin(), lat.cos());

        let right = forward.cross(raw_up).normalize();
        self.up = right.cross(forward).normalize();
        self.right = right;
        self.forward = forward;
    }

    fn min_radius(&self) -> f64 {
        self.width as f64 * MIN_RADIUS_FRACTION
    }

    fn max_radius(&self) -> f64 {
        self.width as f64 * MAX_RADIUS_FACTOR
    }

    /// Position the globe is looking at.
    pub fn center(&self) -> SurfacePosition {
        from_unit_vector(self.forward)
    }

    /// Eye distance implied by the current zoom: the distance at which the
    /// field of view spans the canvas half-width on the ground.
    pub fn elevation(&self) -> Distance {
        let half_width_px = self.width as f64 / 2.0;
        let half_ground = self.ground_radius * (half_width_px / self.radius);
        half_ground / self.fov.tan_half_angle()
    }

    /// Project a position to screen pixels.
    /// Returns `None` for back-face points (behind the visible hemisphere).
    pub fn project(&self, position: &SurfacePosition) -> Option<(i32, i32)> {
        let p = to_unit_vector(position);
        if p.dot(self.forward) < 0.0 {
            return None;
        }

        let sx = p.dot(self.right);
        let sy = p.dot(self.up);

        let px = (self.width as f64 / 2.0 + sx * self.radius) as i32;
        let py = (self.height as f64 / 2.0 - sy * self.radius) as i32;
        Some((px, py))
    }

    /// Rotate the globe by a pixel drag delta.
    /// Positive dx = dragged left → center shifts east (surface follows cursor).
    pub fn rotate_drag(&mut self, dx: i32, dy: i32) {
        let angle_x = dx as f64 / self.radius;
        let angle_y = -(dy as f64) / self.radius;

        if angle_x.abs() > 1e-10 {
            let (sin_a, cos_a) = angle_x.sin_cos();
            let forward = self.forward * cos_a + self.right * sin_a;
            self.right = (self.right * cos_a - self.forward * sin_a).normalize();
            self.forward = forward.normalize();
        }

        if angle_y.abs() > 1e-10 {
            let (sin_a, cos_a) = angle_y.sin_cos();
            let forward = self.forward * cos_a + self.up * sin_a;
            self.up = (self.up * cos_a - self.forward * sin_a).normalize();
            self.forward = forward.normalize();
        }
    }

    pub fn zoom_in(&mut self) {
        self.radius = (self.radius * 1.5).min(self.max_radius());
    }

    pub fn zoom_out(&mut self) {
        self.radius = (self.radius / 1.5).max(self.min_radius());
    }

    /// Ground radius the pixel scale is calibrated against.
    pub fn ground_radius(&self) -> Distance {
        self.ground_radius
    }

    /// Recalibrate against the globe radius under a new look-at point.
    pub fn set_ground_radius(&mut self, ground_radius: Distance) {
        self.ground_radius = ground_radius;
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Check if a projected point is within the viewport (with a small margin).
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10 && px < self.width as i32 + 10 && py >= -10 && py < self.height as i32 + 10
    }
}

impl Camera for GlobeViewport {
    fn aspect_ratio(&self) -> f64 {
        self.height as f64 / self.width.max(1) as f64
    }

    fn field_of_view(&self) -> Angle {
        self.fov
    }

    fn look_at(&mut self, center: &GeodeticPosition, elevation: Distance) {
        self.orient_north_up(&center.surface().normalized());

        let half_ground = elevation * self.fov.tan_half_angle();
        let half_width_px = self.width as f64 / 2.0;
        self.radius = match half_ground.ratio_to(self.ground_radius) {
            Ok(half_angle) if half_angle > 0.0 => half_width_px / half_angle,
            _ => self.max_radius(),
        }
        .clamp(self.min_radius(), self.max_radius());
    }
}
