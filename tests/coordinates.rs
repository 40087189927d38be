use nightflight::geo::{self, NORTH_POLE, SOUTH_POLE, to_lat_long, to_nvec};
use nightflight::vector;

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} != {b} (tol {tol})");
}

#[test]
fn greenwich_equator_is_x_axis() {
    let n = to_nvec(0.0, 0.0);
    assert_eq!(n, [1.0, 0.0, 0.0]);
}

#[test]
fn nvecs_have_unit_length() {
    for &(lat, lon) in &[(51.38, -2.72), (-37.67, 144.84), (89.9, 179.9), (-90.0, -180.0)] {
        let n = to_nvec(lat, lon);
        assert_close(vector::norm(&n), 1.0, 1e-12);
        assert!(geo::is_valid_nvec(&n));
    }
}

#[test]
fn lat_long_round_trip_resolves_quadrants() {
    for &(lat, lon) in &[(51.38, -2.72), (-37.67, 144.84), (35.76, 140.39), (-33.9, -70.7)] {
        let (lat2, lon2) = to_lat_long(&to_nvec(lat, lon));
        assert_close(lat2, lat, 1e-9);
        assert_close(lon2, lon, 1e-9);
    }
}

#[test]
fn poles_map_to_zero_longitude() {
    assert_eq!(to_lat_long(&NORTH_POLE), (90.0, 0.0));
    assert_eq!(to_lat_long(&SOUTH_POLE), (-90.0, 0.0));
}

#[test]
fn coordinate_validation_rejects_out_of_range() {
    assert!(geo::valid_lat_long(90.0, -180.0));
    assert!(!geo::valid_lat_long(90.5, 0.0));
    assert!(!geo::valid_lat_long(0.0, 181.0));
    assert!(!geo::valid_lat_long(f64::NAN, 0.0));
    assert!(!geo::is_valid_nvec(&[1.0, 1.0, 0.0]));
    assert!(!geo::is_valid_nvec(&[f64::NAN, 0.0, 1.0]));
}
