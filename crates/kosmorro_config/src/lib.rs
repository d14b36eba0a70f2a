//! Run configuration.
//!
//! Merges raw command-line values with the `KOSMORRO_LATITUDE`,
//! `KOSMORRO_LONGITUDE` and `KOSMORRO_TIMEZONE` environment variables and
//! validates the result. Precedence: command line, then environment, then
//! default. The environment is passed in as a lookup function, so nothing
//! here reads process state.

pub mod error;

use std::path::PathBuf;

use kosmorro_ephem::GeoLocation;
use kosmorro_render::{OutputFormat, RenderOptions};
use kosmorro_search::EphemerisRequest;
use kosmorro_time::{DateSpec, Instant, TimezoneOffset};
use tracing::debug;

pub use error::ConfigError;

pub const LATITUDE_ENV: &str = "KOSMORRO_LATITUDE";
pub const LONGITUDE_ENV: &str = "KOSMORRO_LONGITUDE";
pub const TIMEZONE_ENV: &str = "KOSMORRO_TIMEZONE";

/// Values as given on the command line, unparsed where parsing can fail
/// with a user-facing message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliValues {
    pub format: Option<OutputFormat>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub date: Option<String>,
    pub timezone: Option<String>,
    pub output: Option<PathBuf>,
    pub no_graph: bool,
    pub debug: bool,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub date: Option<DateSpec>,
    pub location: Option<GeoLocation>,
    pub timezone: Option<TimezoneOffset>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub graph: bool,
    pub debug: bool,
}

/// Command-line value if given, else a non-blank environment value.
fn pick(
    cli: Option<&str>,
    env_name: &'static str,
    env: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if let Some(v) = cli {
        return Some(v.to_string());
    }
    let v = env(env_name).filter(|v| !v.trim().is_empty())?;
    debug!(variable = env_name, value = %v, "using environment value");
    Some(v)
}

fn parse_number(name: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}

impl Config {
    /// Merge `cli` with the environment seen through `env` and validate.
    pub fn resolve(
        cli: &CliValues,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let latitude = pick(cli.latitude.as_deref(), LATITUDE_ENV, &env);
        let longitude = pick(cli.longitude.as_deref(), LONGITUDE_ENV, &env);
        let timezone = pick(cli.timezone.as_deref(), TIMEZONE_ENV, &env);

        let location = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(GeoLocation::new(
                parse_number("latitude", &lat)?,
                parse_number("longitude", &lon)?,
            )?),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteLocation),
        };

        let timezone = match timezone {
            Some(tz) => Some(TimezoneOffset::new(parse_number("timezone", &tz)?)?),
            None => None,
        };

        let date = match &cli.date {
            Some(d) => Some(d.parse::<DateSpec>()?),
            None => None,
        };

        let format = cli.format.unwrap_or_default();
        if format.is_binary() && cli.output.is_none() {
            return Err(ConfigError::OutputRequired);
        }

        let config = Self {
            date,
            location,
            timezone,
            format,
            output: cli.output.clone(),
            graph: !cli.no_graph,
            debug: cli.debug,
        };
        debug!(?config, "configuration resolved");
        Ok(config)
    }

    /// The computation request for this configuration, relative to `reference`.
    pub fn to_request(&self, reference: Instant) -> EphemerisRequest {
        EphemerisRequest {
            reference,
            date: self.date,
            location: self.location,
            timezone: self.timezone,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { graph: self.graph }
    }
}
