//! apikey-auth CLI application.
//!
//! This is the main entry point for the apikey-auth binary.

use actix_web::http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use apikey_auth::config::LoggingConfig;
use apikey_auth::utils::logging::init_logging;
use apikey_auth::{get_api_key, AuthError, Config, ServiceError, ServiceResult};

/// apikey-auth CLI
#[derive(Parser)]
#[command(name = "apikey-auth")]
#[command(about = "Extract API keys from `Authorization: ApiKey <key>` headers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log level (overrides the configuration file)
    #[arg(long)]
    log_level: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// HTTP bind address
        #[arg(long)]
        bind: Option<String>,

        /// HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Parse an Authorization header value and print the API key
    Extract {
        /// Header value, e.g. "ApiKey abc123"
        #[arg(value_name = "HEADER_VALUE")]
        header: String,
    },

    /// Generate a default configuration file
    Config {
        /// Output file path
        #[arg(short, long, default_value = "apikey-auth.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file to validate
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show service information
    Info,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    let logging = LoggingConfig {
        level: resolve_log_level(cli.verbose, cli.log_level.as_deref(), &config.logging),
        ..config.logging.clone()
    };
    init_logging(&logging)?;

    match cli.command {
        Some(Commands::Serve { bind, port }) => {
            serve(config, bind, port).await?;
        }
        Some(Commands::Extract { header }) => match extract_key(&header) {
            Ok(key) => println!("{}", key),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Config { output, force }) => {
            generate_config(output, force)?;
        }
        Some(Commands::Validate { file }) => {
            validate_config(file)?;
        }
        Some(Commands::Info) => {
            show_info();
        }
        None => {
            // Default to starting the service
            serve(config, None, None).await?;
        }
    }

    Ok(())
}

/// Load configuration from the given file, or fall back to defaults
fn load_config(path: Option<&PathBuf>) -> ServiceResult<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

/// Pick the log level: `--verbose`, then `--log-level`, then the config file
fn resolve_log_level(verbose: bool, cli_level: Option<&str>, config: &LoggingConfig) -> String {
    if verbose {
        return "debug".to_string();
    }

    cli_level.unwrap_or(config.level.as_str()).to_string()
}

/// Start the HTTP service
async fn serve(mut config: Config, bind: Option<String>, port: Option<u16>) -> ServiceResult<()> {
    // Override configuration with CLI arguments
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    config.validate()?;
    apikey_auth::server::run(&config).await
}

/// Run the header parser against a raw header value
fn extract_key(header: &str) -> ServiceResult<String> {
    let value = HeaderValue::from_str(header).map_err(|_| AuthError::MalformedAuthHeader)?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);

    Ok(get_api_key(&headers)?.to_string())
}

/// Generate a default configuration file
fn generate_config(output: PathBuf, force: bool) -> ServiceResult<()> {
    if output.exists() && !force {
        return Err(ServiceError::config(format!(
            "Configuration file already exists: {} (use --force to overwrite)",
            output.display()
        )));
    }

    Config::default().to_file(&output)?;

    info!("Generated configuration file: {}", output.display());
    Ok(())
}

/// Validate a configuration file
fn validate_config(file: PathBuf) -> ServiceResult<()> {
    info!("Validating configuration file: {}", file.display());

    let config = Config::from_file(&file)?;
    config.validate()?;

    info!("Configuration file is valid");
    Ok(())
}

/// Show service information
fn show_info() {
    info!("{}", apikey_auth::SERVICE_NAME);
    info!("Version: {}", apikey_auth::SERVICE_VERSION);
    info!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
    info!("Header format: Authorization: {} <key>", apikey_auth::API_KEY_SCHEME);
    info!("Repository: {}", env!("CARGO_PKG_REPOSITORY"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["apikey-auth", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.log_level.is_none());
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["apikey-auth", "--log-level", "warn"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("warn"));

        let cli = Cli::try_parse_from(["apikey-auth", "serve", "--port", "9090"]).unwrap();
        if let Some(Commands::Serve { bind, port }) = cli.command {
            assert_eq!(bind, None);
            assert_eq!(port, Some(9090));
        } else {
            panic!("Expected Serve command");
        }

        let cli = Cli::try_parse_from(["apikey-auth", "extract", "ApiKey abc"]).unwrap();
        if let Some(Commands::Extract { header }) = cli.command {
            assert_eq!(header, "ApiKey abc");
        } else {
            panic!("Expected Extract command");
        }
    }

    #[test]
    fn test_extract_key() {
        assert_eq!(extract_key("ApiKey test-api-key-123").unwrap(), "test-api-key-123");
        assert!(matches!(
            extract_key(""),
            Err(ServiceError::Auth(AuthError::NoAuthHeader))
        ));
        assert!(matches!(
            extract_key("Bearer token"),
            Err(ServiceError::Auth(AuthError::MalformedAuthHeader))
        ));
        assert!(matches!(
            extract_key("ApiKey bad\nvalue"),
            Err(ServiceError::Auth(AuthError::MalformedAuthHeader))
        ));
    }

    #[test]
    fn test_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test-config.toml");

        assert!(generate_config(config_path.clone(), false).is_ok());
        assert!(config_path.exists());

        // Refuses to clobber without --force
        assert!(generate_config(config_path.clone(), false).is_err());
        assert!(generate_config(config_path.clone(), true).is_ok());

        assert!(validate_config(config_path).is_ok());
    }

    #[test]
    fn test_resolve_log_level() {
        let file = LoggingConfig {
            level: "apikey_auth=debug".to_string(),
            ..LoggingConfig::default()
        };

        assert_eq!(resolve_log_level(false, None, &file), "apikey_auth=debug");
        assert_eq!(resolve_log_level(false, Some("warn"), &file), "warn");
        assert_eq!(resolve_log_level(true, Some("warn"), &file), "debug");
        assert_eq!(resolve_log_level(false, None, &LoggingConfig::default()), "info");
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
