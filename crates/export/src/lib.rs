//! Export helpers for logbook CSV rows and JSON night reports.

pub mod logbook {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use serde::Serialize;

    pub const HEADER: &[&str] = &[
        "from",
        "to",
        "off_utc",
        "on_utc",
        "block_minutes",
        "night_minutes",
    ];

    /// Wrap `inner` in a CSV writer; the header is written explicitly via [`write_header`].
    pub fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
        csv::WriterBuilder::new().has_headers(false).from_writer(inner)
    }

    /// Create a CSV writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<csv::Writer<Box<dyn Write>>> {
        if path == Path::new("-") {
            return Ok(csv_writer(Box::new(BufWriter::new(io::stdout()))));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(csv_writer(Box::new(BufWriter::new(file))))
    }

    /// Write the logbook CSV header.
    pub fn write_header<W: Write>(writer: &mut csv::Writer<W>) -> csv::Result<()> {
        writer.write_record(HEADER)
    }

    /// CSV row emitted for one flight leg, in [`HEADER`] order.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record<'a> {
        pub from: &'a str,
        pub to: &'a str,
        pub off_utc: &'a str,
        pub on_utc: &'a str,
        pub block_minutes: i64,
        pub night_minutes: u32,
    }

    impl Record<'_> {
        pub fn write_to<W: Write>(&self, writer: &mut csv::Writer<W>) -> csv::Result<()> {
            writer.serialize(self)
        }
    }
}

pub mod report {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    /// Night time summary for a single flight.
    #[derive(Debug, Clone, Serialize)]
    pub struct NightReport {
        pub from: String,
        pub to: String,
        pub off_utc: String,
        pub on_utc: String,
        pub block_minutes: i64,
        pub night_minutes: u32,
        pub day_minutes: i64,
        pub rules: RulesSummary,
    }

    /// Rule constants the report was computed with.
    #[derive(Debug, Clone, Serialize)]
    pub struct RulesSummary {
        pub margin_minutes: f64,
        pub section_length_minutes: f64,
        pub terminal_section_minutes: f64,
        pub transition_night_fraction: f64,
    }

    /// Write the report as pretty-printed JSON followed by a newline.
    pub fn write_json(writer: &mut dyn Write, report: &NightReport) -> io::Result<()> {
        to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)
    }
}
