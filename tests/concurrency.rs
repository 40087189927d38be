use std::thread;

use nightflight::airports::AirportDirectory;
use nightflight::flight::{FlightLeg, parse_instant};
use nightflight::night::NightIntegrator;
use nightflight::sun::NoaaSun;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shared_types_are_send_and_sync() {
    assert_send_sync::<AirportDirectory>();
    assert_send_sync::<NoaaSun>();
    assert_send_sync::<NightIntegrator<NoaaSun>>();
}

fn leg(from: &str, to: &str, off: &str, on: &str) -> FlightLeg {
    FlightLeg {
        from: from.parse().unwrap(),
        to: to.parse().unwrap(),
        off: parse_instant(off).unwrap(),
        on: parse_instant(on).unwrap(),
    }
}

#[test]
fn threads_share_directory_and_integrator() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/airports.dat");
    let directory = AirportDirectory::from_path(path).expect("load airports");
    let integrator: NightIntegrator<NoaaSun> = NightIntegrator::default();

    let legs = vec![
        leg("BRS", "FNC", "2020-12-19 16:18", "2020-12-19 19:55"),
        leg("FNC", "BRS", "2020-12-19 21:07", "2020-12-20 00:44"),
        leg("GVA", "BRS", "2020-12-20 11:06", "2020-12-20 12:51"),
        leg("JFK", "LHR", "2021-01-15 01:00", "2021-01-15 07:30"),
        leg("BRS", "FNC", "2021-06-21 16:18", "2021-06-21 19:55"),
    ];

    let serial: Vec<u32> = legs
        .iter()
        .map(|leg| leg.night_minutes(&directory, &integrator).unwrap())
        .collect();

    let directory = &directory;
    let integrator = &integrator;
    let parallel: Vec<u32> = thread::scope(|scope| {
        let handles: Vec<_> = legs
            .iter()
            .map(|leg| scope.spawn(move || leg.night_minutes(directory, integrator).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(parallel, serial);
    assert_eq!(serial[1], 217);
    assert_eq!(serial[2], 0);
}
