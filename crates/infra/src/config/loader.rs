//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, if `SLOTWISE_DB_PATH` is set
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//!
//! ## Environment Variables
//! - `SLOTWISE_DB_PATH` (required): SQLite database file
//! - `SLOTWISE_DB_BACKEND`: `sqlite` or `memory`
//! - `SLOTWISE_DB_POOL_SIZE`: connection pool size
//! - `SLOTWISE_DB_BUSY_TIMEOUT_MS`: how long a writer waits for the lock
//! - `SLOTWISE_OWNER_LOCKS`: serialize commits per owner in-process
//! - `SLOTWISE_BIND_ADDRESS`: HTTP listen address
//! - `SLOTWISE_LOG_LEVEL`, `SLOTWISE_LOG_JSON`
//! - `SLOTWISE_WEBHOOK_URL`, `SLOTWISE_WEBHOOK_TIMEOUT_SECS`,
//!   `SLOTWISE_WEBHOOK_MAX_ATTEMPTS`
//!
//! Unset optional variables keep their [`Config::default`] values.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use slotwise_domain::{Config, Result, SlotwiseError, StorageBackend};

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "slotwise.json", "slotwise.toml"];

/// Load configuration from the environment, falling back to a config file.
///
/// # Errors
/// Returns `SlotwiseError::Config` when neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment incomplete, trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `SLOTWISE_*` environment variables.
///
/// # Errors
/// Returns `SlotwiseError::Config` if `SLOTWISE_DB_PATH` is missing or a
/// variable holds an unparsable value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.database.path = env_var("SLOTWISE_DB_PATH")?;
    if let Some(backend) = env_parsed::<StorageBackend>("SLOTWISE_DB_BACKEND")? {
        config.database.backend = backend;
    }
    if let Some(pool_size) = env_parsed("SLOTWISE_DB_POOL_SIZE")? {
        config.database.pool_size = pool_size;
    }
    if let Some(busy_timeout) = env_parsed("SLOTWISE_DB_BUSY_TIMEOUT_MS")? {
        config.database.busy_timeout_ms = busy_timeout;
    }

    config.booking.owner_locks = env_bool("SLOTWISE_OWNER_LOCKS", config.booking.owner_locks);

    if let Ok(address) = std::env::var("SLOTWISE_BIND_ADDRESS") {
        config.server.bind_address = address;
    }

    if let Ok(level) = std::env::var("SLOTWISE_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("SLOTWISE_LOG_JSON", config.logging.json);

    config.notifications.webhook_url =
        std::env::var("SLOTWISE_WEBHOOK_URL").ok().filter(|url| !url.trim().is_empty());
    if let Some(timeout) = env_parsed("SLOTWISE_WEBHOOK_TIMEOUT_SECS")? {
        config.notifications.timeout_secs = timeout;
    }
    if let Some(attempts) = env_parsed("SLOTWISE_WEBHOOK_MAX_ATTEMPTS")? {
        config.notifications.max_attempts = attempts;
    }

    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. The format follows the
/// file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `SlotwiseError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SlotwiseError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SlotwiseError::Config("no config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SlotwiseError::Config(format!("failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SlotwiseError::Config(format!("invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SlotwiseError::Config(format!("invalid JSON format: {e}"))),
        _ => Err(SlotwiseError::Config(format!("unsupported config format: {extension}"))),
    }
}

/// First existing config file in the working directory, its two parents, or
/// next to the executable.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
        roots.push(cwd.join("../.."));
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    candidates(&roots).into_iter().find(|path| path.exists())
}

fn candidates(roots: &[PathBuf]) -> Vec<PathBuf> {
    roots.iter().flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name))).collect()
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SlotwiseError::Config(format!("missing required environment variable: {key}")))
}

fn env_parsed<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| SlotwiseError::Config(format!("invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 11] = [
        "SLOTWISE_DB_PATH",
        "SLOTWISE_DB_BACKEND",
        "SLOTWISE_DB_POOL_SIZE",
        "SLOTWISE_DB_BUSY_TIMEOUT_MS",
        "SLOTWISE_OWNER_LOCKS",
        "SLOTWISE_BIND_ADDRESS",
        "SLOTWISE_LOG_LEVEL",
        "SLOTWISE_LOG_JSON",
        "SLOTWISE_WEBHOOK_URL",
        "SLOTWISE_WEBHOOK_TIMEOUT_SECS",
        "SLOTWISE_WEBHOOK_MAX_ATTEMPTS",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn env_bool_accepts_common_spellings() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for (value, expected) in [("1", true), ("TRUE", true), ("on", true), ("no", false), ("0", false)] {
            std::env::set_var("SLOTWISE_TEST_BOOL", value);
            assert_eq!(env_bool("SLOTWISE_TEST_BOOL", !expected), expected, "value {value}");
        }
        std::env::remove_var("SLOTWISE_TEST_BOOL");
        assert!(env_bool("SLOTWISE_TEST_BOOL", true));
    }

    #[test]
    fn env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SLOTWISE_DB_PATH", "/tmp/slotwise-env.db");
        std::env::set_var("SLOTWISE_DB_BACKEND", "memory");
        std::env::set_var("SLOTWISE_DB_POOL_SIZE", "3");
        std::env::set_var("SLOTWISE_OWNER_LOCKS", "false");
        std::env::set_var("SLOTWISE_WEBHOOK_URL", "http://hooks.local/booking");
        std::env::set_var("SLOTWISE_WEBHOOK_MAX_ATTEMPTS", "5");

        let config = load_from_env().unwrap();
        clear_env();

        assert_eq!(config.database.path, "/tmp/slotwise-env.db");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.database.pool_size, 3);
        assert!(!config.booking.owner_locks);
        assert_eq!(config.notifications.webhook_url.as_deref(), Some("http://hooks.local/booking"));
        assert_eq!(config.notifications.max_attempts, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn missing_db_path_is_a_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        assert!(matches!(load_from_env(), Err(SlotwiseError::Config(_))));
    }

    #[test]
    fn invalid_number_is_a_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SLOTWISE_DB_PATH", "/tmp/slotwise-env.db");
        std::env::set_var("SLOTWISE_DB_POOL_SIZE", "many");
        let result = load_from_env();
        clear_env();

        match result {
            Err(SlotwiseError::Config(msg)) => assert!(msg.contains("SLOTWISE_DB_POOL_SIZE")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_backend_is_a_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SLOTWISE_DB_PATH", "/tmp/slotwise-env.db");
        std::env::set_var("SLOTWISE_DB_BACKEND", "postgres");
        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(SlotwiseError::Config(_))));
    }

    #[test]
    fn parse_config_by_extension() {
        let json = r#"{"server": {"bind_address": "0.0.0.0:9000"}}"#;
        let config = parse_config(json, Path::new("slotwise.json")).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");

        let toml = "[logging]\nlevel = \"debug\"\njson = true\n";
        let config = parse_config(toml, Path::new("slotwise.toml")).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);

        assert!(parse_config("a: b", Path::new("slotwise.yaml")).is_err());
    }

    #[test]
    fn load_from_missing_file_fails() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/slotwise.toml")));
        assert!(matches!(result, Err(SlotwiseError::Config(_))));
    }

    #[test]
    fn candidates_follow_probe_order() {
        let dir = TempDir::new().unwrap();
        let roots = vec![dir.path().to_path_buf()];
        std::fs::write(dir.path().join("slotwise.toml"), "").unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();

        let found = candidates(&roots).into_iter().find(|path| path.exists()).unwrap();
        assert!(found.ends_with("config.toml"));
    }
}
