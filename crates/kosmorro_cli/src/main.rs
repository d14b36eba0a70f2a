use std::ffi::OsString;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use kosmorro_config::{CliValues, Config};
use kosmorro_render::{OutputFormat, render};
use kosmorro_search::{MeanSynodicCycle, compute_ephemeris};
use kosmorro_time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "kosmorro",
    about = "Compute the ephemerides and the events for a given date and a given position on Earth.",
    infer_long_args = true
)]
struct Cli {
    /// The format to output the information to
    #[arg(long, short = 'f', value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// The observer's latitude on Earth. Can also be set in the KOSMORRO_LATITUDE environment variable.
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<String>,

    /// The observer's longitude on Earth. Can also be set in the KOSMORRO_LONGITUDE environment variable.
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<String>,

    /// The date for which the ephemerides must be calculated.
    #[arg(long, short = 'd', allow_hyphen_values = true)]
    date: Option<String>,

    /// The timezone to display the hours in (e.g. 2 for UTC+2 or -3 for UTC-3). Can also be set in the KOSMORRO_TIMEZONE environment variable.
    #[arg(long, short = 't', allow_hyphen_values = true)]
    timezone: Option<String>,

    /// Disable the colors in the console.
    #[arg(long)]
    no_colors: bool,

    /// A file to export the output to. If not given, the standard output is used. This argument is needed for PDF format.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Do not generate a graph to represent the rise and set times in the PDF format.
    #[arg(long)]
    no_graph: bool,

    /// Show debugging messages
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn values(&self) -> CliValues {
        CliValues {
            format: self.format,
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            date: self.date.clone(),
            timezone: self.timezone.clone(),
            output: self.output.clone(),
            no_graph: self.no_graph,
            debug: self.debug,
        }
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

/// Accept the single-dash `-lat` and `-lon` spellings.
fn rewrite_short_coordinates(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else { return arg };
            for (short, long) in [("-lat", "--latitude"), ("-lon", "--longitude")] {
                if s == short {
                    return OsString::from(long);
                }
                if let Some(value) = s.strip_prefix(short).and_then(|r| r.strip_prefix('=')) {
                    return OsString::from(format!("{long}={value}"));
                }
            }
            arg
        })
        .collect()
}

fn build_command(now: &DateTime<Utc>) -> clap::Command {
    Cli::command()
        .version(env!("CARGO_PKG_VERSION"))
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .long("version")
                .short('v')
                .action(ArgAction::Version)
                .help("Show the program version"),
        )
        .mut_arg("date", |a| {
            a.help(format!(
                "The date for which the ephemerides must be calculated. Can be in the \
                 YYYY-MM-DD format or an interval in the \"[+-]YyMmDd\" format (with Y, M, \
                 and D numbers). Defaults to today ({}).",
                now.format("%Y-%m-%d")
            ))
        })
        .after_help(format!(
            "By default, only the events will be computed for today ({}). To compute also \
             the ephemerides, latitude and longitude arguments are needed.",
            now.format("%A %B %d, %Y")
        ))
}

fn parse_cli(now: &DateTime<Utc>) -> Cli {
    let matches =
        build_command(now).get_matches_from(rewrite_short_coordinates(std::env::args_os()));
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

fn main() {
    // Sampled once: every date in the run is relative to this instant.
    let now = Utc::now();
    let cli = parse_cli(&now);
    init_tracing(cli.debug);
    if cli.no_colors {
        debug!("output is never colored; --no-colors has no effect");
    }

    let config = Config::resolve(&cli.values(), |name| std::env::var(name).ok())
        .unwrap_or_else(|e| fail(e));

    let reference = Instant::from_datetime(&now);
    let result = compute_ephemeris(&MeanSynodicCycle::default(), &config.to_request(reference))
        .unwrap_or_else(|e| fail(e));
    let payload = render(&result, config.format, &config.render_options());

    match &config.output {
        Some(path) => {
            std::fs::write(path, payload.as_bytes())
                .unwrap_or_else(|e| fail(format!("cannot write {}: {e}", path.display())));
            debug!(path = %path.display(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(payload.as_bytes())
                .and_then(|()| stdout.flush())
                .unwrap_or_else(|e| fail(format!("cannot write to standard output: {e}")));
        }
    }
}
