use super::toml_config::TomlConfig;
use super::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "coffee-filter")]
#[command(about = "Browse and manage the coffee shop directory")]
pub struct CliConfig {
    /// Backend base URL, e.g. http://localhost:8000/api/v1
    #[arg(long, env = "COFFEE_FILTER_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "COFFEE_FILTER_CONFIG", global = true)]
    pub config: Option<String>,

    /// Directory holding the saved login token
    #[arg(long, global = true)]
    pub token_dir: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all shops with today's hours
    List {
        /// Only show shops that are open right now
        #[arg(long)]
        open_now: bool,
    },
    /// Show one shop in detail
    Show { id: i64 },
    /// Shops near a location
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in kilometres
        #[arg(long, default_value = "10")]
        radius: f64,
    },
    /// Map markers for every shop
    Markers,
    /// Sign in and save the token
    Login {
        username: String,
        #[arg(long, env = "COFFEE_FILTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Create a shop from a JSON file
    Create {
        #[arg(long)]
        file: String,
        /// Look up coordinates locally instead of leaving it to the backend
        #[arg(long)]
        geocode: bool,
    },
    /// Apply a partial update from a JSON file
    Update {
        id: i64,
        #[arg(long)]
        file: String,
    },
    /// Delete a shop
    Delete { id: i64 },
    /// Coordinates for an address
    Geocode { address: String },
    /// Address suggestions for a partial query
    Suggest { query: String },
    /// Evaluate a weekly hours JSON file
    Hours {
        #[arg(long)]
        file: String,
        /// Local date and time, e.g. 2024-01-01T14:30 (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
}

impl Settings {
    /// Defaults, then the config file (if any), then command-line flags.
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let mut settings = Settings::from_toml(&file)?;
        if let Some(url) = &cli.api_url {
            settings.api_url = url.clone();
        }
        if let Some(dir) = &cli.token_dir {
            settings.token_dir = dir.clone();
        }
        if let Some(timeout) = cli.timeout {
            settings.timeout_seconds = timeout;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://from-file.example.com\"\ntimeout_seconds = 5\n[auth]\ntoken_dir = \"/tmp/from-file\""
        )
        .unwrap();

        let cli = CliConfig::try_parse_from([
            "coffee-filter",
            "--config",
            file.path().to_str().unwrap(),
            "--api-url",
            "http://localhost:9000/api/v1",
            "list",
            "--open-now",
        ])
        .unwrap();

        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.api_url, "http://localhost:9000/api/v1");
        assert_eq!(settings.timeout_seconds, 5);
        assert_eq!(settings.token_dir, "/tmp/from-file");
        assert!(matches!(cli.command, Command::List { open_now: true }));
    }

    #[test]
    fn rejects_invalid_override() {
        let cli = CliConfig::try_parse_from([
            "coffee-filter",
            "--api-url",
            "not a url",
            "--token-dir",
            "/tmp/cf",
            "markers",
        ])
        .unwrap();
        assert!(Settings::resolve(&cli).is_err());
    }

    #[test]
    fn parses_negative_coordinates() {
        let cli = CliConfig::try_parse_from([
            "coffee-filter",
            "nearby",
            "--lat",
            "39.1",
            "--lon",
            "-94.58",
        ])
        .unwrap();
        match cli.command {
            Command::Nearby { lat, lon, radius } => {
                assert_eq!(lat, 39.1);
                assert_eq!(lon, -94.58);
                assert_eq!(radius, 10.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
