use anyhow::{Context, Result};
use geoframe::{Distance, GeodeticPosition};
use geojson::{GeoJson, Geometry, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load every coordinate in a GeoJSON file as a position.
///
/// GeoJSON stores `[lon, lat, alt?]`; a missing altitude is read as zero.
/// Coordinates that are too short or non-finite are skipped with a warning.
pub fn load_positions(path: &Path) -> Result<Vec<GeodeticPosition>> {
    let mut bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes)
        .with_context(|| format!("failed to parse GeoJSON in {}", path.display()))?;

    let mut positions = Vec::new();
    let mut skipped = 0usize;
    visit_geojson(&geojson, &mut |coords: &[f64]| match to_position(coords) {
        Some(position) => positions.push(position),
        None => skipped += 1,
    });

    if skipped > 0 {
        warn!(skipped, path = %path.display(), "skipped invalid coordinates");
    }
    info!(count = positions.len(), path = %path.display(), "loaded positions");
    Ok(positions)
}

fn to_position(coords: &[f64]) -> Option<GeodeticPosition> {
    let (lon, lat) = match coords {
        [lon, lat, ..] => (*lon, *lat),
        _ => return None,
    };
    let altitude = coords.get(2).copied().unwrap_or(0.0);
    if !altitude.is_finite() {
        return None;
    }
    GeodeticPosition::from_degrees(lat, lon, Distance::from_meters(altitude)).ok()
}

fn visit_geojson<F>(geojson: &GeoJson, visit: &mut F)
where
    F: FnMut(&[f64]),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    visit_geometry(geometry, visit);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                visit_geometry(geometry, visit);
            }
        }
        GeoJson::Geometry(geometry) => visit_geometry(geometry, visit),
    }
}

fn visit_geometry<F>(geometry: &Geometry, visit: &mut F)
where
    F: FnMut(&[f64]),
{
    match &geometry.value {
        Value::Point(coords) => visit(&coords[..]),
        Value::MultiPoint(points) | Value::LineString(points) => {
            points.iter().for_each(|c| visit(&c[..]));
        }
        Value::MultiLineString(lines) => {
            lines.iter().flatten().for_each(|c| visit(&c[..]));
        }
        // Exterior rings only; holes cannot widen an extent.
        Value::Polygon(rings) => {
            rings.iter().take(1).flatten().for_each(|c| visit(&c[..]));
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                rings.iter().take(1).flatten().for_each(|c| visit(&c[..]));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                visit_geometry(g, visit);
            }
        }
    }
}

/// Built-in patrol track used when no data file is given.
pub fn sample_positions() -> Vec<GeodeticPosition> {
    // (lat, lon, altitude m)
    const TRACK: [(f64, f64, f64); 10] = [
        (54.32, 10.14, 0.0),
        (54.55, 10.80, 0.0),
        (54.90, 11.60, 150.0),
        (55.20, 12.40, 300.0),
        (55.48, 12.95, 300.0),
        (55.70, 13.60, 1200.0),
        (55.30, 14.40, 2500.0),
        (54.95, 14.05, 2500.0),
        (54.60, 13.40, 600.0),
        (54.40, 12.20, 0.0),
    ];

    TRACK
        .iter()
        .filter_map(|&(lat, lon, alt)| {
            GeodeticPosition::from_degrees(lat, lon, Distance::from_meters(alt)).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("geoframe-{}-{name}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_points_and_lines() {
        let path = write_temp(
            "mixed.json",
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {},
                     "geometry": {"type": "Point", "coordinates": [10.5, 54.25, 120.0]}},
                    {"type": "Feature", "properties": {},
                     "geometry": {"type": "LineString", "coordinates": [[11, 55], [12, 56]]}}
                ]
            }"#,
        );

        let positions = load_positions(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0].latitude().degrees(), 54.25);
        assert_eq!(positions[0].longitude().degrees(), 10.5);
        assert_eq!(positions[0].altitude().meters(), 120.0);
        assert_eq!(positions[2].altitude(), Distance::ZERO);
    }

    #[test]
    fn test_polygon_uses_exterior_ring_only() {
        let path = write_temp(
            "polygon.json",
            r#"{"type": "Polygon", "coordinates": [
                [[0, 0], [4, 0], [4, 4], [0, 0]],
                [[1, 1], [2, 1], [2, 2], [1, 1]]
            ]}"#,
        );

        let positions = load_positions(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_positions(Path::new("/nonexistent/geoframe/tracks.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_short_coordinates_are_skipped() {
        assert!(to_position(&[1.0]).is_none());
        assert!(to_position(&[f64::NAN, 1.0]).is_none());
        assert!(to_position(&[1.0, 2.0, f64::INFINITY]).is_none());
        assert!(to_position(&[1.0, 2.0]).is_some());
    }

    #[test]
    fn test_sample_track_is_complete() {
        assert_eq!(sample_positions().len(), 10);
    }
}
