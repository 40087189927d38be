use std::io;
use std::path::PathBuf;

use clap::Parser;
use nightflight::airports::AirportDirectory;
use nightflight::config::{NightRules, load_rules};
use nightflight::export::report::{NightReport, RulesSummary, write_json};
use nightflight::flight::{Endpoint, FlightLeg, OUTPUT_FORMAT, parse_instant};
use nightflight::night::NightIntegrator;
use nightflight::sun::NoaaSun;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Compute the night flying time of a single great-circle flight.
#[derive(Parser, Debug)]
#[command(author, version, about = "Night flying time for one flight leg")]
struct Cli {
    /// Departure airport code or `lat,lon`
    #[arg(long, allow_hyphen_values = true)]
    from: String,

    /// Arrival airport code or `lat,lon`
    #[arg(long, allow_hyphen_values = true)]
    to: String,

    /// Takeoff time, UTC (`YYYY-MM-DD HH:MM`)
    #[arg(long)]
    off: String,

    /// Landing time, UTC (`YYYY-MM-DD HH:MM`)
    #[arg(long)]
    on: String,

    /// OpenFlights airports.dat file
    #[arg(long, default_value = "data/airports.dat")]
    airports: PathBuf,

    /// Night rules file (TOML or YAML); defaults apply when omitted
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Override the initial section length in minutes
    #[arg(long)]
    section_length: Option<f64>,

    /// Print a JSON report instead of the bare minute count
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut rules = match &cli.rules {
        Some(path) => load_rules(path)?,
        None => NightRules::default(),
    };
    if let Some(section) = cli.section_length {
        rules.section_length_minutes = section;
    }
    let integrator = NightIntegrator::new(NoaaSun::default(), rules)?;

    let from: Endpoint = cli.from.parse()?;
    let to: Endpoint = cli.to.parse()?;
    let directory = if matches!(from, Endpoint::Airport(_)) || matches!(to, Endpoint::Airport(_)) {
        AirportDirectory::from_path(&cli.airports)?
    } else {
        AirportDirectory::default()
    };

    let leg = FlightLeg {
        from,
        to,
        off: parse_instant(&cli.off)?,
        on: parse_instant(&cli.on)?,
    };
    let night_minutes = leg.night_minutes(&directory, &integrator)?;
    info!(from = %leg.from, to = %leg.to, night_minutes, "flight evaluated");

    if cli.json {
        let report = NightReport {
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            off_utc: leg.off.format(OUTPUT_FORMAT).to_string(),
            on_utc: leg.on.format(OUTPUT_FORMAT).to_string(),
            block_minutes: leg.block_minutes(),
            night_minutes,
            day_minutes: (leg.block_minutes() - night_minutes as i64).max(0),
            rules: RulesSummary {
                margin_minutes: rules.margin_minutes,
                section_length_minutes: rules.section_length_minutes,
                terminal_section_minutes: rules.terminal_section_minutes,
                transition_night_fraction: rules.transition_night_fraction,
            },
        };
        write_json(&mut io::stdout().lock(), &report)?;
    } else {
        println!("{night_minutes}");
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
