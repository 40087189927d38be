use nightflight::geo::{Nvec, angle_between, to_nvec};
use nightflight::geodesic::{antipodal_bisector, bisect, midpoint, point_count};
use nightflight::vector;
use proptest::prelude::*;

const BRS: Nvec = [0.623412838407546, -0.02960757915593101, 0.781332083153618];
const FNC: Nvec = [0.8057218146558248, -0.24287052944161466, 0.5402094624462576];

fn assert_nvec_close(a: &Nvec, b: &Nvec, tol: f64) {
    for c in 0..3 {
        assert!((a[c] - b[c]).abs() <= tol, "{a:?} != {b:?}");
    }
}

#[test]
fn pole_to_pole_runs_down_greenwich() {
    let a = 1.0 / 2f64.sqrt();
    let expected: [Nvec; 5] = [
        [0.0, 0.0, 1.0],
        [a, 0.0, a],
        [1.0, 0.0, 0.0],
        [a, 0.0, -a],
        [0.0, 0.0, -1.0],
    ];
    let points = bisect(&[0.0, 0.0, 1.0], &[0.0, 0.0, -1.0], 1);
    assert_eq!(points, expected);
}

#[test]
fn equatorial_antipodes_route_west() {
    let a = 1.0 / 2f64.sqrt();
    let expected: [Nvec; 5] = [
        [1.0, 0.0, 0.0],
        [a, -a, 0.0],
        [0.0, -1.0, 0.0],
        [-a, -a, 0.0],
        [-1.0, 0.0, 0.0],
    ];
    let points = bisect(&[1.0, 0.0, 0.0], &[-1.0, 0.0, 0.0], 1);
    assert_eq!(points, expected);
}

#[test]
fn antipodal_bisector_is_perpendicular_and_normalized() {
    let a = to_nvec(40.0, 30.0);
    let b = vector::scale(&a, -1.0);
    let mid = midpoint(&a, &b);
    assert_eq!(mid, antipodal_bisector(&a));
    assert!((vector::norm(&mid) - 1.0).abs() < 1e-12);
    assert!(vector::dot(&a, &mid).abs() < 1e-12);
    assert_eq!(mid[2], 0.0);
}

#[test]
fn bristol_to_madeira_matches_reference_plot() {
    let expected: [Nvec; 9] = [
        [0.623412838407546, -0.02960757915593101, 0.781332083153618],
        [0.6515088582562976, -0.05710789453359362, 0.7564885299827854],
        [0.6781957583848142, -0.08448469376968946, 0.730008801198649],
        [0.7034158188760655, -0.11167876479489419, 0.701950168636493],
        [0.7271144923756552, -0.13863129075465633, 0.6723733190728134],
        [0.7492405220698828, -0.1652839772215728, 0.6413422229685708],
        [0.7697460525468421, -0.19157917827783016, 0.6089239961103075],
        [0.7885867333007757, -0.2174600211950129, 0.5751887544483776],
        [0.8057218146558248, -0.24287052944161466, 0.5402094624462576],
    ];
    let points = bisect(&BRS, &FNC, 2);
    assert_eq!(points.len(), expected.len());
    for (got, want) in points.iter().zip(expected.iter()) {
        assert_nvec_close(got, want, 1e-12);
    }
}

#[test]
fn identical_endpoints_stay_put() {
    let points = bisect(&BRS, &BRS, 3);
    assert_eq!(points.len(), point_count(3));
    for p in &points {
        assert_nvec_close(p, &BRS, 1e-15);
    }
}

#[test]
fn near_antipodes_and_poles_stay_finite() {
    let cases: [(Nvec, Nvec); 4] = [
        ([0.0, 0.0, 1.0], [1e-300, 0.0, -1.0]),
        ([1e-170, 1e-170, 1.0], [-1e-170, -1e-170, -1.0]),
        (to_nvec(89.999999, 10.0), to_nvec(-89.999999, -170.0)),
        (to_nvec(0.0, 179.9999999), to_nvec(0.0, -0.0000001)),
    ];
    for (a, b) in cases {
        for p in bisect(&a, &b, 4) {
            assert!(p.iter().all(|c| c.is_finite()), "{p:?} from {a:?} -> {b:?}");
        }
    }
}

fn arb_nvec() -> impl Strategy<Value = Nvec> {
    (-89.9f64..89.9, -180.0f64..180.0).prop_map(|(lat, lon)| to_nvec(lat, lon))
}

proptest! {
    #[test]
    fn bisection_counts_endpoints_and_magnitudes(
        a in arb_nvec(),
        b in arb_nvec(),
        depth in 0u32..6,
    ) {
        prop_assume!(vector::norm(&vector::add(&a, &b)) > 1e-6);
        let points = bisect(&a, &b, depth);
        prop_assert_eq!(points.len(), (1usize << (depth + 1)) + 1);
        prop_assert_eq!(points[0], a);
        prop_assert_eq!(*points.last().unwrap(), b);
        for p in &points {
            prop_assert!((vector::norm(p) - 1.0).abs() < 1e-9, "{:?}", p);
        }
    }

    #[test]
    fn bisection_spacing_is_uniform(a in arb_nvec(), b in arb_nvec(), depth in 0u32..5) {
        prop_assume!(vector::norm(&vector::add(&a, &b)) > 1e-3);
        let points = bisect(&a, &b, depth);
        let step = angle_between(&a, &b) / (points.len() - 1) as f64;
        for pair in points.windows(2) {
            prop_assert!((angle_between(&pair[0], &pair[1]) - step).abs() < 1e-9);
        }
    }
}
