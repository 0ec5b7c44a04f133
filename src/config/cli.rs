use crate::config::{SpotterSettings, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "iss-spotter")]
#[command(about = "Find out when the ISS will next fly over your location")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub ip_endpoint: Option<String>,

    #[arg(long, global = true)]
    pub geo_endpoint: Option<String>,

    #[arg(long, global = true)]
    pub flyover_endpoint: Option<String>,

    /// Per-request timeout; the HTTP client default applies when omitted
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Run the whole chain: IP, then coordinates, then upcoming passes
    Next,
    /// Only look up this machine's public IP
    Ip,
    /// Only geolocate the given IP address
    Coords { ip: String },
    /// Only fetch passes for the given coordinates
    Passes {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Next)
    }

    /// Defaults, then the TOML file, then command-line overrides.
    pub fn settings(&self) -> Result<SpotterSettings> {
        let mut settings = SpotterSettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from: {}", path);
            settings = settings.merge_toml(&TomlConfig::from_file(path)?);
        }

        if let Some(ip) = &self.ip_endpoint {
            settings.ip_endpoint = ip.clone();
        }
        if let Some(geo) = &self.geo_endpoint {
            settings.geolocation_endpoint = geo.clone();
        }
        if let Some(flyover) = &self.flyover_endpoint {
            settings.flyover_endpoint = flyover.clone();
        }
        if self.timeout_seconds.is_some() {
            settings.timeout_seconds = self.timeout_seconds;
        }

        settings.validate()?;
        Ok(settings)
    }
}
