use once_cell::sync::OnceCell;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

const GENERATED_TOKEN_LEN: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Value expected in the `X-WP-Nonce` header. Empty means "generate one".
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
        }
    }
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[database]
path = "target/db/debug_logs.db"

[auth]
token = ""

[frontend]
dist_dir = "dist"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Parse a config document, filling in a random auth token when none is set
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    if config.auth.token.trim().is_empty() {
        config.auth.token = generate_token();
        tracing::info!("No auth token configured, generated a random one for this run");
    }
    Ok(config)
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Load once and keep for the life of the process
pub fn init_config() -> anyhow::Result<&'static Config> {
    CONFIG.get_or_try_init(load_config)
}

/// Resolve a configured path: absolute paths as is, relative ones next to the executable
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(configured)
}

/// Get the database file path from configuration
pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "target/db/debug_logs.db");
        assert_eq!(config.frontend.dist_dir, "dist");
    }

    #[test]
    fn test_empty_token_is_generated() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.auth.token.len(), GENERATED_TOKEN_LEN);
        assert!(config.auth.token.chars().all(|c| c.is_ascii_alphanumeric()));

        let other = parse_config(DEFAULT_CONFIG).unwrap();
        assert_ne!(config.auth.token, other.auth.token);
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let config = parse_config(
            r#"
            [server]
            port = 8088

            [database]
            path = "/var/lib/bbai/logs.db"

            [auth]
            token = "abc123"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.auth.token, "abc123");
        assert_eq!(config.frontend.dist_dir, "dist");
        assert_eq!(
            get_database_path(&config),
            PathBuf::from("/var/lib/bbai/logs.db")
        );
    }

    #[test]
    fn test_missing_database_section_is_an_error() {
        assert!(parse_config("[server]\nport = 1").is_err());
    }
}
