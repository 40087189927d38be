use nightflight::export::logbook::{HEADER, Record, csv_writer, write_header, writer_for_path};
use nightflight::export::report::{NightReport, RulesSummary, write_json};
use std::fs;

#[test]
fn library_reports_version() {
    assert!(!nightflight::version().is_empty());
}

#[test]
fn logbook_rows_follow_the_header() {
    let mut writer = csv_writer(Vec::new());
    write_header(&mut writer).unwrap();
    for (from, to) in [("BRS", "51.5,-0.5"), ("say \"hi\"", "LHR")] {
        Record {
            from,
            to,
            off_utc: "2021-01-01 10:00",
            on_utc: "2021-01-01 11:00",
            block_minutes: 60,
            night_minutes: 0,
        }
        .write_to(&mut writer)
        .unwrap();
    }
    writer.flush().unwrap();
    let text = String::from_utf8(writer.get_ref().clone()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
    assert_eq!(
        lines.next(),
        Some("BRS,\"51.5,-0.5\",2021-01-01 10:00,2021-01-01 11:00,60,0")
    );
    assert_eq!(
        lines.next(),
        Some("\"say \"\"hi\"\"\",LHR,2021-01-01 10:00,2021-01-01 11:00,60,0")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn writer_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/dir/log.csv");
    let mut writer = writer_for_path(&path).unwrap();
    write_header(&mut writer).unwrap();
    writer.flush().unwrap();
    drop(writer);
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, format!("{}\n", HEADER.join(",")));
}

#[test]
fn report_serializes_all_fields() {
    let report = NightReport {
        from: "FNC".into(),
        to: "BRS".into(),
        off_utc: "2020-12-19 21:07".into(),
        on_utc: "2020-12-20 00:44".into(),
        block_minutes: 217,
        night_minutes: 217,
        day_minutes: 0,
        rules: RulesSummary {
            margin_minutes: 30.0,
            section_length_minutes: 10.0,
            terminal_section_minutes: 2.0,
            transition_night_fraction: 0.5,
        },
    };
    let mut out: Vec<u8> = Vec::new();
    write_json(&mut out, &report).unwrap();
    assert!(out.ends_with(b"\n"));
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["night_minutes"], 217);
    assert_eq!(value["rules"]["transition_night_fraction"], 0.5);
}
