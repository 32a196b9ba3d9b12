use approx::{assert_abs_diff_eq, assert_relative_eq};
use geoframe::{
    compute_framing, frame_camera, Angle, Camera, ConstrainingAxis, Distance, EllipsoidGlobe,
    GeoError, GeodeticPosition, Globe, SphericalGlobe, SurfacePosition,
};

const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Camera that records every placement it is asked for.
struct RecordingCamera {
    aspect: f64,
    fov: Angle,
    placements: Vec<(GeodeticPosition, Distance)>,
}

impl RecordingCamera {
    fn new(aspect: f64, fov_degrees: f64) -> Self {
        Self {
            aspect,
            fov: Angle::from_degrees(fov_degrees),
            placements: Vec::new(),
        }
    }
}

impl Camera for RecordingCamera {
    fn aspect_ratio(&self) -> f64 {
        self.aspect
    }

    fn field_of_view(&self) -> Angle {
        self.fov
    }

    fn look_at(&mut self, center: &GeodeticPosition, elevation: Distance) {
        self.placements.push((*center, elevation));
    }
}

fn pos(lat: f64, lon: f64) -> GeodeticPosition {
    GeodeticPosition::from_degrees(lat, lon, Distance::ZERO).unwrap()
}

#[test]
fn test_meridian_pair_frames_on_the_equator() {
    let mut camera = RecordingCamera::new(0.5, 60.0);
    let points = [pos(-1.0, 0.0), pos(1.0, 0.0)];

    let framing = frame_camera(&mut camera, &points, Distance::ZERO, &SphericalGlobe::EARTH)
        .unwrap()
        .unwrap();

    assert_eq!(framing.constraining_axis, ConstrainingAxis::Vertical);
    assert!(framing.longitude_span.is_zero());
    assert_abs_diff_eq!(framing.center.latitude().degrees(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(framing.center.longitude().degrees(), 0.0, epsilon = 1e-9);

    // Vertical FOV is 60° x 0.5, so half of it is 15°.
    let latitude_span = 2.0_f64.to_radians() * EARTH_RADIUS_M;
    let expected = (latitude_span / 2.0) / 15.0_f64.to_radians().tan();
    assert_relative_eq!(framing.elevation.meters(), expected, max_relative = 1e-9);

    assert_eq!(camera.placements.len(), 1);
    let (center, elevation) = camera.placements[0];
    assert_eq!(center, framing.center);
    assert_eq!(elevation, framing.elevation);
}

#[test]
fn test_equatorial_pair_is_width_constrained() {
    let points = [pos(0.0, -1.0), pos(0.0, 1.0)];
    let framing = compute_framing(
        &points,
        Distance::ZERO,
        0.5,
        Angle::from_degrees(60.0),
        &SphericalGlobe::EARTH,
    )
    .unwrap()
    .unwrap();

    assert_eq!(framing.constraining_axis, ConstrainingAxis::Horizontal);
    let expected = 1.0_f64.to_radians() * EARTH_RADIUS_M / 30.0_f64.to_radians().tan();
    assert_relative_eq!(framing.elevation.meters(), expected, max_relative = 1e-9);
}

#[test]
fn test_empty_set_leaves_camera_alone() {
    let mut camera = RecordingCamera::new(1.0, 45.0);
    let framing = frame_camera(&mut camera, &[], Distance::from_kilometers(10.0), &EllipsoidGlobe::WGS84)
        .unwrap();
    assert!(framing.is_none());
    assert!(camera.placements.is_empty());
}

#[test]
fn test_bad_camera_parameters_are_reported_without_moving() {
    let mut camera = RecordingCamera::new(1.0, 0.0);
    let err = frame_camera(&mut camera, &[pos(10.0, 10.0)], Distance::ZERO, &SphericalGlobe::EARTH)
        .unwrap_err();
    assert!(matches!(err, GeoError::InvalidArgument { name: "horizontal_fov", .. }));
    assert!(camera.placements.is_empty());
}

#[test]
fn test_margin_widens_the_view() {
    let points = [pos(40.0, -4.0), pos(43.0, 3.0)];
    let frame = |margin| {
        compute_framing(&points, margin, 0.6, Angle::from_degrees(45.0), &EllipsoidGlobe::WGS84)
            .unwrap()
            .unwrap()
    };

    let tight = frame(Distance::ZERO);
    let padded = frame(Distance::from_nautical_miles(50.0));
    assert!(padded.elevation > tight.elevation);
    assert!(padded.latitude_span > tight.latitude_span);
    assert!(padded.longitude_span > tight.longitude_span);
}

#[test]
fn test_framing_through_a_trait_object_globe() {
    let globe: &dyn Globe = &SphericalGlobe::EARTH;
    let mut camera = RecordingCamera::new(0.75, 50.0);
    let points = [pos(51.5, -0.1), pos(48.9, 2.35), pos(50.8, 4.35)];

    let framing = frame_camera(&mut camera, &points, Distance::from_kilometers(20.0), globe)
        .unwrap()
        .unwrap();

    let center = framing.center;
    assert!(center.latitude().degrees() > 48.0 && center.latitude().degrees() < 52.5);
    assert!(center.longitude().degrees() > -0.5 && center.longitude().degrees() < 4.7);
    assert_eq!(camera.placements.len(), 1);
}

#[test]
fn test_out_of_range_coordinates_normalize() {
    let p = SurfacePosition::from_degrees(100.0, 200.0).unwrap().normalized();
    assert_relative_eq!(p.latitude().degrees(), 80.0, epsilon = 1e-12);
    assert_relative_eq!(p.longitude().degrees(), -160.0, epsilon = 1e-12);
}

#[test]
fn test_one_degree_west_along_the_equator() {
    let moved = pos(0.0, 0.0)
        .west(Distance::from_meters(111_200.0), Distance::from_meters(EARTH_RADIUS_M))
        .unwrap();
    assert_abs_diff_eq!(moved.latitude().degrees(), 0.0);
    assert_abs_diff_eq!(
        moved.longitude().degrees(),
        -1.0,
        epsilon = Angle::MINUTE.degrees()
    );
}

#[test]
fn test_imperial_margin_matches_metric() {
    let points = [pos(-1.0, 0.0), pos(1.0, 0.0)];
    let frame = |margin| {
        compute_framing(&points, margin, 1.0, Angle::from_degrees(45.0), &SphericalGlobe::EARTH)
            .unwrap()
            .unwrap()
    };

    let metric = frame(Distance::from_meters(1852.0));
    let nautical = frame(Distance::from_nautical_miles(1.0));
    assert_relative_eq!(metric.elevation.meters(), nautical.elevation.meters(), max_relative = 1e-12);
}

#[test]
fn test_antimeridian_extent_does_not_wrap() {
    let points = [pos(0.0, 179.0), pos(0.0, -179.0)];

    // The extent is the numeric box from -179° to 179°, not the 2° gap.
    let extent = geoframe::bounding_extent(&points).unwrap();
    assert_eq!(extent.min().longitude().degrees(), -179.0);
    assert_eq!(extent.max().longitude().degrees(), 179.0);

    let frame = |margin| {
        compute_framing(&points, margin, 0.5, Angle::from_degrees(60.0), &SphericalGlobe::EARTH)
            .unwrap()
            .unwrap()
    };

    // Spans are great-circle distances between the corners, so the short way
    // across the antimeridian is measured.
    let tight = frame(Distance::ZERO);
    assert_relative_eq!(
        tight.longitude_span.meters(),
        2.0_f64.to_radians() * EARTH_RADIUS_M,
        max_relative = 1e-9
    );
    assert_abs_diff_eq!(tight.center.longitude().degrees().abs(), 180.0, epsilon = 1e-9);

    // Padding pushes the corners west of -179° and east of 179°, which closes
    // the short-way gap instead of widening it.
    let padded = frame(Distance::from_kilometers(50.0));
    assert!(padded.longitude_span < tight.longitude_span);
    assert!(padded.latitude_span > tight.latitude_span);
}
