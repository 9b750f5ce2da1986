use std::path::PathBuf;

use anyhow::{Context, Result};
use derive_setters::Setters;
use strum_macros::{Display, EnumString};

/// Directory listed for an empty path unless configured otherwise.
pub const DEFAULT_CURRENT_DIR: &str = "./";

/// Environment variable overriding [`Config::current_dir`].
pub const CURRENT_DIR_VAR: &str = "KEEL_CURRENT_DIR";

/// Environment variable overriding [`Config::backend`].
pub const BACKEND_VAR: &str = "KEEL_BACKEND";

/// Filesystem implementation serving requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BackendKind {
    /// The operating system's filesystem
    #[default]
    Host,
    /// An initially empty tree held in process memory
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Setters)]
#[setters(into)]
/// Settings for constructing a [`crate::Filesystem`].
pub struct Config {
    /// Directory listed when an iterator is opened on an empty path.
    pub current_dir: PathBuf,
    /// Backend serving filesystem requests.
    pub backend: BackendKind,
}

impl Default for Config {
    fn default() -> Self {
        Self { current_dir: PathBuf::from(DEFAULT_CURRENT_DIR), backend: BackendKind::default() }
    }
}

impl Config {
    /// Reads the configuration from the process environment, after loading a
    /// `.env` file if one is present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(dir) = var(CURRENT_DIR_VAR).filter(|dir| !dir.is_empty()) {
            config.current_dir = PathBuf::from(dir);
        }
        if let Some(name) = var(BACKEND_VAR) {
            config.backend = name
                .parse()
                .with_context(|| format!("Unknown filesystem backend '{name}' in {BACKEND_VAR}"))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env;

    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.current_dir, PathBuf::from("./"));
        assert_eq!(config.backend, BackendKind::Host);
    }

    #[test]
    fn test_overrides() {
        let config =
            Config::from_vars(vars(&[(CURRENT_DIR_VAR, "/data"), (BACKEND_VAR, "Memory")]))
                .unwrap();
        assert_eq!(config, Config::default().current_dir("/data").backend(BackendKind::Memory));
    }

    #[test]
    fn test_unknown_backend_is_an_error() {
        let error = Config::from_vars(vars(&[(BACKEND_VAR, "ftp")])).unwrap_err();
        assert!(error.to_string().contains("ftp"));
    }

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Memory.to_string(), "memory");
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var(BACKEND_VAR, "memory");
        env::set_var(CURRENT_DIR_VAR, "/srv");
        let config = Config::from_env();
        env::remove_var(BACKEND_VAR);
        env::remove_var(CURRENT_DIR_VAR);

        let config = config.unwrap();
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.current_dir, PathBuf::from("/srv"));
    }
}
