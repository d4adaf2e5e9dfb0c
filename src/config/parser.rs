use crate::config::types::Config;
use crate::config::validation::{parse_port, validate};
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable that overrides the listen port
pub const PORT_ENV_VAR: &str = "PORT";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use seo_analyzer::config::load_config;
///
/// let config = load_config(Path::new("seo-analyzer.toml")).unwrap();
/// println!("Port: {}", config.server.port);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a deployment can confirm which configuration is live.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Applies a `PORT` value on top of a loaded configuration
///
/// `None` leaves the configuration untouched.
pub fn apply_port_override(config: &mut Config, port: Option<&str>) -> ConfigResult<()> {
    if let Some(value) = port {
        config.server.port = parse_port(value)?;
    }
    Ok(())
}

/// Resolves the runtime configuration
///
/// Reads the TOML file when a path is given (defaults otherwise), then applies
/// the `PORT` environment variable.
///
/// # Returns
///
/// * `Ok((Config, Option<String>))` - The configuration and, if a file was
///   read, its hash
/// * `Err(ConfigError)` - The file or the environment override was invalid
pub fn load_runtime_config(path: Option<&Path>) -> ConfigResult<(Config, Option<String>)> {
    let (mut config, hash) = match path {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let port = std::env::var(PORT_ENV_VAR).ok();
    apply_port_override(&mut config, port.as_deref())?;

    Ok((config, hash))
}
