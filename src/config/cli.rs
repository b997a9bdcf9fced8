use crate::app::render::OutputFormat;
use crate::config::ServiceSettings;
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "dakdash")]
#[command(about = "Track parcels across Indian carriers with delay detection")]
pub struct Cli {
    /// Path to TOML configuration file (falls back to environment variables)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Override the tracking provider API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Track a consignment
    Track {
        tracking_number: String,

        #[arg(short = 'C', long, default_value = "india-post")]
        carrier: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// List supported carriers
    Carriers {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show a canned delayed shipment without calling the provider
    Demo {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Cli {
    /// 命令列參數優先於設定檔與環境變數
    pub fn apply_overrides(&self, settings: &mut ServiceSettings) {
        if let Some(api_key) = &self.api_key {
            settings.api_key = api_key.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout = Duration::from_secs(timeout);
            tracing::info!("🔧 Request timeout overridden to {}s", timeout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_command() {
        let cli = Cli::try_parse_from([
            "dakdash",
            "--timeout",
            "10",
            "track",
            "EE123456789IN",
            "--carrier",
            "dtdc",
            "--format",
            "csv",
        ])
        .unwrap();

        match &cli.command {
            Command::Track {
                tracking_number,
                carrier,
                format,
            } => {
                assert_eq!(tracking_number, "EE123456789IN");
                assert_eq!(carrier, "dtdc");
                assert_eq!(*format, OutputFormat::Csv);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let mut settings = ServiceSettings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_track_defaults_to_india_post() {
        let cli = Cli::try_parse_from(["dakdash", "track", "EE123456789IN"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Track { ref carrier, format: OutputFormat::Json, .. } if carrier == "india-post"
        ));
    }
}
