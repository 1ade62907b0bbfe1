//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.emunav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EmunavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub firestore: EmulatorConfig,
    #[serde(default)]
    pub auth: EmulatorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub project_id: Option<String>,
    pub assets_dir: Option<String>,
    pub menu_file: Option<String>,
    pub users_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EmulatorConfig {
    pub host: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PROJECT_ID: &str = "demo-project";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_MENU_FILE: &str = "menu.json";
pub const DEFAULT_USERS_FILE: &str = "users.json";
pub const DEFAULT_FIRESTORE_HOST: &str = "localhost:8080";
pub const DEFAULT_AUTH_HOST: &str = "localhost:9099";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub project_id: String,
    pub assets_dir: PathBuf,
    pub menu_file: PathBuf,
    pub users_file: PathBuf,
    pub firestore_host: String,
    pub auth_host: String,
}

/// Values supplied on the command line. `None` = flag not given.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub project_id: Option<String>,
    pub assets_dir: Option<PathBuf>,
    pub menu_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

/// Fatal configuration failures: the settings file or the menu document.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.emunav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".emunav").join("config.toml"))
}

/// Load config from `~/.emunav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `EmunavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<EmunavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(EmunavConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(EmunavConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<EmunavConfig, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# emunav Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# project_id = "demo-project"        # Or set EMUNAV_PROJECT_ID
# assets_dir = "assets"              # Or set EMUNAV_ASSETS_DIR
# menu_file = "assets/menu.json"
# users_file = "assets/users.json"

# [firestore]
# host = "localhost:8080"            # Or set FIRESTORE_EMULATOR_HOST

# [auth]
# host = "localhost:9099"            # Or set FIREBASE_AUTH_EMULATOR_HOST
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &EmunavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup supplied by the caller.
pub fn resolve_with_env<F>(config: &EmunavConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Project: CLI → env → config → default
    let project_id = cli
        .project_id
        .clone()
        .or_else(|| env("EMUNAV_PROJECT_ID"))
        .or_else(|| config.general.project_id.clone())
        .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string());

    // Assets dir: CLI → env → config → default
    let assets_dir = cli
        .assets_dir
        .clone()
        .or_else(|| env("EMUNAV_ASSETS_DIR").map(PathBuf::from))
        .or_else(|| config.general.assets_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));

    // Menu and users files default to living inside the assets dir
    let menu_file = cli
        .menu_file
        .clone()
        .or_else(|| config.general.menu_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| assets_dir.join(DEFAULT_MENU_FILE));

    let users_file = config
        .general
        .users_file
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| assets_dir.join(DEFAULT_USERS_FILE));

    // Emulator hosts: env → config → default (the env names match the Firebase tooling)
    let firestore_host = env("FIRESTORE_EMULATOR_HOST")
        .or_else(|| config.firestore.host.clone())
        .unwrap_or_else(|| DEFAULT_FIRESTORE_HOST.to_string());

    let auth_host = env("FIREBASE_AUTH_EMULATOR_HOST")
        .or_else(|| config.auth.host.clone())
        .unwrap_or_else(|| DEFAULT_AUTH_HOST.to_string());

    ResolvedConfig {
        project_id,
        assets_dir,
        menu_file,
        users_file,
        firestore_host,
        auth_host,
    }
}
