use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use nightflight::airports::AirportDirectory;
use nightflight::config::{NightRules, load_rules};
use nightflight::export::logbook::{Record, write_header, writer_for_path};
use nightflight::flight::{FlightLeg, LegRecord, OUTPUT_FORMAT};
use nightflight::night::NightIntegrator;
use nightflight::sun::NoaaSun;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Annotate a logbook CSV (`from,to,off,on`) with block and night minutes.
#[derive(Parser, Debug)]
#[command(author, version, about = "Batch night flying time for logbook legs")]
struct Cli {
    /// Input CSV with a `from,to,off,on` header
    #[arg(long)]
    input: PathBuf,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// OpenFlights airports.dat file
    #[arg(long, default_value = "data/airports.dat")]
    airports: PathBuf,

    /// Night rules file (TOML or YAML); defaults apply when omitted
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Skip legs that fail instead of aborting the run
    #[arg(long, default_value_t = false)]
    skip_invalid: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let rules = match &cli.rules {
        Some(path) => load_rules(path)?,
        None => NightRules::default(),
    };
    let integrator = NightIntegrator::new(NoaaSun::default(), rules)?;
    let directory = AirportDirectory::from_path(&cli.airports)?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;
    let mut writer = writer_for_path(&cli.output)?;
    write_header(&mut writer)?;

    let mut written = 0usize;
    for (index, row) in reader.deserialize::<LegRecord>().enumerate() {
        let line = index + 2;
        let result = row
            .map_err(anyhow::Error::from)
            .and_then(|record| Ok(FlightLeg::try_from(record)?))
            .and_then(|leg| {
                let night = leg.night_minutes(&directory, &integrator)?;
                Ok((leg, night))
            });
        let (leg, night_minutes) = match result {
            Ok(value) => value,
            Err(err) if cli.skip_invalid => {
                warn!(line, error = %err, "skipping leg");
                continue;
            }
            Err(err) => return Err(err.context(format!("leg on line {line}"))),
        };

        let from = leg.from.to_string();
        let to = leg.to.to_string();
        let off_utc = leg.off.format(OUTPUT_FORMAT).to_string();
        let on_utc = leg.on.format(OUTPUT_FORMAT).to_string();
        Record {
            from: &from,
            to: &to,
            off_utc: &off_utc,
            on_utc: &on_utc,
            block_minutes: leg.block_minutes(),
            night_minutes,
        }
        .write_to(&mut writer)?;
        written += 1;
    }
    writer.flush()?;
    info!(legs = written, "logbook written");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
