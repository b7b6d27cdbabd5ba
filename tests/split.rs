#![allow(clippy::unwrap_used)]

use std::f64::consts::{FRAC_PI_2, PI};

use spherical_paths::geometry::{GreatArc, GreatCircle, RegionLocation, SpherePoint, SplitLocation};
use spherical_paths::math::{Precision, Vector3};

const TOL: f64 = 1e-10;

fn precision() -> Precision {
    Precision::new(TOL)
}

fn sample_points() -> Vec<SpherePoint> {
    let mut points = Vec::new();
    for i in 0..6 {
        for j in 1..5 {
            points.push(SpherePoint::from_azimuth_polar(
                f64::from(i) * PI / 3.0 + 0.1,
                f64::from(j) * PI / 5.0,
            ));
        }
    }
    points
}

fn sample_arcs() -> Vec<GreatArc> {
    let points = sample_points();
    let mut arcs = Vec::new();
    for (i, a) in points.iter().enumerate() {
        for b in points.iter().skip(i + 1).step_by(3) {
            if let Ok(arc) = GreatArc::from_points(a, b, precision()) {
                arcs.push(arc);
            }
        }
    }
    arcs
}

fn splitters() -> Vec<GreatCircle> {
    [
        Vector3::x(),
        Vector3::y(),
        Vector3::z(),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(-1.0, 0.5, 2.0),
        Vector3::new(0.3, -2.0, 0.7),
    ]
    .iter()
    .map(|pole| GreatCircle::from_pole(pole, precision()).unwrap())
    .collect()
}

#[test]
fn split_parts_cover_the_arc() {
    for arc in sample_arcs() {
        for splitter in splitters() {
            let split = arc.split(&splitter);
            match split.location() {
                SplitLocation::Both => {
                    let minus = split.minus().unwrap();
                    let plus = split.plus().unwrap();
                    assert!(
                        (minus.size() + plus.size() - arc.size()).abs() < 1e-9,
                        "{arc} split by {:?}",
                        splitter.pole()
                    );
                    assert!(minus.circle().eq(arc.circle(), precision()));
                    assert!(plus.circle().eq(arc.circle(), precision()));
                }
                SplitLocation::Minus => assert_eq!(split.minus(), Some(&arc)),
                SplitLocation::Plus => assert_eq!(split.plus(), Some(&arc)),
                SplitLocation::Neither => {
                    assert!(arc.circle().coincides(&splitter, precision()));
                }
            }
        }
    }
}

#[test]
fn split_parts_lie_on_their_sides() {
    for arc in sample_arcs() {
        for splitter in splitters() {
            let split = arc.split(&splitter);
            if let Some(part) = split.minus() {
                let mid = part.midpoint().unwrap();
                assert!(splitter.offset(&mid) < TOL, "{part} should be on the minus side");
            }
            if let Some(part) = split.plus() {
                let mid = part.midpoint().unwrap();
                assert!(splitter.offset(&mid) > -TOL, "{part} should be on the plus side");
            }
        }
    }
}

#[test]
fn inside_points_land_in_one_part() {
    for arc in sample_arcs() {
        for splitter in splitters() {
            let split = arc.split(&splitter);
            if split.location() != SplitLocation::Both {
                continue;
            }
            let start = arc.circle().azimuth(&arc.start_point().unwrap());
            for step in 1..20 {
                let az = start + arc.size() * f64::from(step) / 20.0;
                let point = arc.circle().point_at(az);
                assert_eq!(arc.classify(&point), RegionLocation::Inside);

                let locations =
                    [split.minus().unwrap(), split.plus().unwrap()].map(|p| p.classify(&point));
                if locations.contains(&RegionLocation::Boundary) {
                    continue;
                }
                let inside = locations.iter().filter(|l| **l == RegionLocation::Inside).count();
                assert_eq!(inside, 1, "{point} on {arc}");
            }
        }
    }
}

#[test]
fn classification_is_stable_under_reverse() {
    let probes = sample_points();
    for arc in sample_arcs() {
        let reversed = arc.reverse();
        let ends = [arc.start_point().unwrap(), arc.end_point().unwrap()];
        for point in probes.iter().chain(ends.iter()) {
            let location = arc.classify(point);
            assert_eq!(location, arc.classify(point));
            assert_eq!(location, reversed.classify(point), "{point} on {arc}");
        }
    }
}

#[test]
fn meridian_split_by_equator() {
    let arc = GreatArc::from_points(
        &SpherePoint::PLUS_K,
        &SpherePoint::MINUS_K.antipode(),
        precision(),
    );
    assert!(arc.is_err());

    let arc = GreatArc::from_points(
        &SpherePoint::from_azimuth_polar(0.0, 0.2),
        &SpherePoint::from_azimuth_polar(0.0, PI - 0.2),
        precision(),
    )
    .unwrap();
    let equator = GreatCircle::from_pole(&Vector3::z(), precision()).unwrap();
    let split = arc.split(&equator);

    assert_eq!(split.location(), SplitLocation::Both);
    let minus = split.minus().unwrap();
    let plus = split.plus().unwrap();
    assert!(minus.start_point().unwrap().polar() < FRAC_PI_2);
    assert!(plus.end_point().unwrap().polar() > FRAC_PI_2);
    assert!(minus.end_point().unwrap().eq(&SpherePoint::PLUS_I, precision()));
}
