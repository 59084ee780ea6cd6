//! Properties every generator must hold across sites and configurations

use std::io::Write;

use rstest::rstest;
use tempfile::NamedTempFile;
use yantra::astronomy::solar_position;
use yantra::engine::{DialSide, SamratGeometry, Season, YantraPoint};
use yantra::geometry::{Cylinder, Plane, Ray};
use yantra::intersection::{ray_cylinder_intersection, ray_plane_intersection, DEFAULT_EPSILON};
use yantra::{
    Coordinates, EngineConfig, Vector3D, YantraError, YantraGeometry, YantraGeometryEngine,
    YantraKind,
};

fn samrat_points(samrat: &SamratGeometry) -> impl Iterator<Item = &YantraPoint> {
    samrat
        .seasonal_curves
        .values()
        .flat_map(|curves| curves.east.iter().chain(curves.west.iter()))
}

#[rstest]
#[case(-90.0)]
#[case(-66.5)]
#[case(-33.9)]
#[case(0.0)]
#[case(23.1765)]
#[case(51.48)]
#[case(66.5)]
#[case(89.9)]
#[case(90.0)]
fn generated_points_are_finite(#[case] latitude: f64) {
    let engine = YantraGeometryEngine::new();

    // The default gnomon height vanishes on the equator
    let gnomon_height = (latitude == 0.0).then_some(5.0);
    let samrat = engine.generate_samrat(latitude, 20.0, gnomon_height).unwrap();
    assert!(samrat_points(&samrat).all(YantraPoint::is_finite));
    assert!(samrat
        .accuracy_verification
        .iter()
        .all(|check| check.analytical_angle.is_finite()));

    let rama = engine.generate_rama(latitude, 8.0).unwrap();
    assert!(rama
        .altitude_circles
        .iter()
        .flat_map(|c| c.points.iter())
        .chain(rama.azimuth_lines.iter().flat_map(|l| l.points.iter()))
        .chain(rama.solar_tracks.values())
        .all(YantraPoint::is_finite));

    let jai_prakash = engine.generate_jai_prakash(latitude, 8.0).unwrap();
    assert!(jai_prakash
        .declination_circles
        .iter()
        .flat_map(|c| c.points.iter())
        .chain(jai_prakash.hour_circles.iter().flat_map(|c| c.points.iter()))
        .all(YantraPoint::is_finite));
}

#[rstest]
#[case(23.1765)]
#[case(-33.9)]
#[case(60.0)]
fn curves_are_ordered_by_hour(#[case] latitude: f64) {
    let samrat = YantraGeometryEngine::new()
        .generate_samrat(latitude, 20.0, None)
        .unwrap();

    for curves in samrat.seasonal_curves.values() {
        for side in [DialSide::East, DialSide::West] {
            assert!(curves
                .side(side)
                .windows(2)
                .all(|w| w[0].hour_angle < w[1].hour_angle));
        }
    }
    for side in [DialSide::East, DialSide::West] {
        assert!(samrat
            .hour_lines
            .side(side)
            .windows(2)
            .all(|w| w[0].hour < w[1].hour));
    }
    assert!(samrat
        .accuracy_verification
        .windows(2)
        .all(|w| w[0].hour <= w[1].hour));
}

#[rstest]
#[case(23.1765)]
#[case(-33.9)]
#[case(60.0)]
fn shadows_land_on_the_face_opposite_the_sun(#[case] latitude: f64) {
    let samrat = YantraGeometryEngine::new()
        .generate_samrat(latitude, 20.0, None)
        .unwrap();

    for (season, curves) in &samrat.seasonal_curves {
        for point in &curves.west {
            let sun = solar_position(latitude, season.declination(), point.hour_angle);
            assert!(sun.azimuth < 180.0);
            assert!(point.position_3d.x < 0.0);
        }
        for point in &curves.east {
            let sun = solar_position(latitude, season.declination(), point.hour_angle);
            assert!(sun.azimuth >= 180.0);
            assert!(point.position_3d.x > 0.0);
        }
    }
}

#[test]
fn all_three_seasons_are_reported() {
    let samrat = YantraGeometryEngine::new()
        .generate_samrat(23.1765, 20.0, None)
        .unwrap();
    let seasons: Vec<Season> = samrat.seasonal_curves.keys().copied().collect();
    assert_eq!(seasons, Season::ALL.to_vec());

    for (season, curves) in &samrat.seasonal_curves {
        assert!(!curves.is_empty(), "{:?} has no points", season);
        for point in curves.east.iter().chain(curves.west.iter()) {
            assert_eq!(point.declination, season.declination());
        }
    }
}

#[test]
fn sun_below_horizon_is_skipped_not_an_error() {
    // Winter at 60 N: the sun is down for the first and last few hours
    let latitude = 60.0;
    let samrat = YantraGeometryEngine::new()
        .generate_samrat(latitude, 20.0, None)
        .unwrap();
    let winter = &samrat.seasonal_curves[&Season::WinterSolstice];
    assert!(!winter.is_empty());
    for point in winter.east.iter().chain(winter.west.iter()) {
        let sun = solar_position(latitude, -23.44, point.hour_angle);
        assert!(sun.altitude > 0.0);
    }
    assert!(winter.len() < samrat.seasonal_curves[&Season::SummerSolstice].len());

    // Polar night: nothing to draw, still a valid result
    let polar = YantraGeometryEngine::new()
        .generate_samrat(-80.0, 20.0, None)
        .unwrap();
    assert!(polar.seasonal_curves[&Season::SummerSolstice].is_empty());
}

#[test]
fn equatorial_samrat_needs_an_explicit_gnomon() {
    let engine = YantraGeometryEngine::new();
    let site = Coordinates::from_lat_lon(0.0, 32.58).unwrap();
    assert!(matches!(
        engine.generate(&site, YantraKind::Samrat, None),
        Err(YantraError::InvalidDimension { name: "gnomon_height", .. })
    ));

    // Only a sun low in the sky keeps the tip's shadow above the base
    let samrat = engine.generate_samrat(0.0, 20.0, Some(5.0)).unwrap();
    let points: Vec<&YantraPoint> = samrat_points(&samrat).collect();
    assert!(!points.is_empty());
    assert!(points
        .iter()
        .all(|p| (p.position_3d.x.abs() - 10.0).abs() < 1e-9));
    assert!(points.iter().any(|p| p.position_3d.z > 0.0));
}

#[test]
fn geometric_non_events_return_none() {
    let dial = Plane::new(Vector3D::ZERO, Vector3D::EAST).unwrap();
    let parallel = Ray::new(Vector3D::new(1.0, 0.0, 1.0), Vector3D::UP);
    assert!(ray_plane_intersection(&parallel, &dial, DEFAULT_EPSILON).is_none());

    let wall = Cylinder::new(Vector3D::ZERO, 8.0, 3.0).unwrap();
    let along_axis = Ray::new(Vector3D::new(8.0, 0.0, 1.0), Vector3D::new(0.0, 0.0, -1.0));
    assert!(ray_cylinder_intersection(&along_axis, &wall, DEFAULT_EPSILON).is_none());

    let over_the_rim = Ray::new(Vector3D::new(0.0, 0.0, 2.0), Vector3D::new(1.0, 0.0, 1.0));
    assert!(ray_cylinder_intersection(&over_the_rim, &wall, DEFAULT_EPSILON).is_none());

    let night = solar_position(23.1765, 0.0, 180.0);
    assert!(night.altitude <= 0.0);
    assert!(yantra::engine::bowl_point(8.0, &night).is_none());
}

#[test]
fn invalid_inputs_fail_fast() {
    let engine = YantraGeometryEngine::new();
    assert!(matches!(
        engine.generate_samrat(-90.5, 20.0, None),
        Err(YantraError::InvalidLatitude(_))
    ));
    assert!(matches!(
        engine.generate_rama(20.0, f64::INFINITY),
        Err(YantraError::InvalidDimension { .. })
    ));
    assert!(matches!(
        Coordinates::new(20.0, 200.0, 0.0),
        Err(YantraError::InvalidLongitude(_))
    ));
}

#[test]
fn json_export_structure() {
    let engine = YantraGeometryEngine::new();
    let site = Coordinates::new(26.9124, 75.7873, 431.0).unwrap();

    let samrat = engine.generate(&site, YantraKind::Samrat, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&samrat.to_json(false).unwrap()).unwrap();
    assert_eq!(value["yantra_type"], "samrat");
    let curves = value["geometry"]["seasonal_curves"].as_object().unwrap();
    let keys: Vec<&str> = curves.keys().map(String::as_str).collect();
    assert_eq!(keys, ["equinox", "summer_solstice", "winter_solstice"]);
    let first_mark = &value["geometry"]["hour_lines"]["east"][0];
    assert!(first_mark["hour"].is_u64());
    assert_eq!(
        first_mark["point"]["surface_coords"].as_array().unwrap().len(),
        2
    );

    let rama = engine.generate(&site, YantraKind::Rama, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rama.to_json(true).unwrap()).unwrap();
    assert_eq!(value["yantra_type"], "rama");
    for hour in ["9", "12", "15"] {
        assert!(value["geometry"]["solar_tracks"].get(hour).is_some(), "no {}h track", hour);
    }

    let bowl = engine.generate(&site, YantraKind::JaiPrakash, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&bowl.to_json(false).unwrap()).unwrap();
    assert_eq!(value["yantra_type"], "jai_prakash");
    assert_eq!(value["site"]["elevation"], 431.0);
}

#[test]
fn config_file_changes_sampling() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"first_hour": 8, "last_hour": 15, "solstice_declination": 23.5}}"#)
        .unwrap();

    let config = EngineConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.first_hour, 8);
    assert_eq!(config.epsilon, DEFAULT_EPSILON);

    let engine = YantraGeometryEngine::with_config(config).unwrap();
    let samrat = engine.generate_samrat(23.1765, 20.0, None).unwrap();
    for mark in samrat.hour_lines.east.iter().chain(samrat.hour_lines.west.iter()) {
        assert!((8..=15).contains(&mark.hour));
    }
    for point in &samrat.seasonal_curves[&Season::SummerSolstice].east {
        assert_eq!(point.declination, 23.5);
    }

    let jai_prakash = engine.generate_jai_prakash(23.1765, 8.0).unwrap();
    assert_eq!(jai_prakash.hour_circles.len(), 8);
}

#[test]
fn missing_or_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        EngineConfig::from_json_file(dir.path().join("absent.json")),
        Err(YantraError::Io(_))
    ));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"epsilon": -1.0}}"#).unwrap();
    assert!(matches!(
        EngineConfig::from_json_file(file.path()),
        Err(YantraError::InvalidDimension { name: "epsilon", .. })
    ));
}

#[test]
fn generation_is_deterministic_across_threads() {
    let engine = YantraGeometryEngine::new();
    let latitudes = [-45.0, 8.5, 23.1765, 51.48];
    let sequential: Vec<SamratGeometry> = latitudes
        .iter()
        .map(|&lat| engine.generate_samrat(lat, 20.0, None).unwrap())
        .collect();

    let parallel: Vec<SamratGeometry> = std::thread::scope(|scope| {
        let handles: Vec<_> = latitudes
            .iter()
            .map(|&lat| {
                let engine = &engine;
                scope.spawn(move || engine.generate_samrat(lat, 20.0, None).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn dispatch_matches_direct_calls() {
    let engine = YantraGeometryEngine::new();
    let site = Coordinates::from_lat_lon(28.6139, 77.2090).unwrap();
    match engine.generate(&site, YantraKind::Rama, Some(5.0)).unwrap() {
        YantraGeometry::Rama { geometry, .. } => {
            assert_eq!(geometry, engine.generate_rama(site.latitude, 5.0).unwrap());
        }
        other => panic!("expected Rama geometry, got {}", other.kind()),
    }
}
