use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::GatewayError;
use crate::domain::Credential;

pub const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/v2";
pub const DEFAULT_API_VERSION: &str = "202404";

pub const TOKEN_ENV: &str = "LINKEDIN_ACCESS_TOKEN";
pub const BASE_URL_ENV: &str = "LINKEDIN_API_BASE_URL";
pub const API_VERSION_ENV: &str = "LINKEDIN_API_VERSION";
pub const CONFIG_PATH_ENV: &str = "LINKEDIN_MCP_CONFIG";

/// Remote API settings that may come from a TOML file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiSection,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, GatewayError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| GatewayError::Config(format!("invalid {}: {e}", path.display())))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub base_url: String,
    pub api_version: String,
}

impl Config {
    /// Resolve configuration from the environment, optionally layered over a TOML file.
    /// Environment values win over file values. The token is only read from the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, GatewayError> {
        let path: Option<PathBuf> = config_path
            .map(Path::to_path_buf)
            .or_else(|| non_blank_env(CONFIG_PATH_ENV).map(PathBuf::from));
        let file = match path {
            Some(p) => FileConfig::load(&p)?,
            None => FileConfig::default(),
        };

        let token = non_blank_env(TOKEN_ENV).ok_or_else(|| {
            GatewayError::Config(format!("{TOKEN_ENV} environment variable is required"))
        })?;

        let base_url = non_blank_env(BASE_URL_ENV)
            .or(file.api.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_version = non_blank_env(API_VERSION_ENV)
            .or(file.api.version)
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            credential: Credential::new(token),
            base_url,
            api_version,
        })
    }

    pub fn from_env() -> Result<Self, GatewayError> {
        Self::load(None)
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear() {
        for k in [TOKEN_ENV, BASE_URL_ENV, API_VERSION_ENV, CONFIG_PATH_ENV] {
            std::env::remove_var(k);
        }
    }

    #[test]
    #[serial]
    fn missing_token_is_fatal() {
        clear();
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    #[serial]
    fn blank_token_is_fatal() {
        clear();
        std::env::set_var(TOKEN_ENV, "   ");
        assert!(Config::from_env().is_err());
        clear();
    }

    #[test]
    #[serial]
    fn defaults_apply_when_only_token_set() {
        clear();
        std::env::set_var(TOKEN_ENV, "tok");
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.api_version, DEFAULT_API_VERSION);
        assert_eq!(cfg.credential, Credential::new("tok"));
        clear();
    }

    #[test]
    #[serial]
    fn env_overrides_file_values() {
        clear();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[api]\nbase_url = \"http://file\"\nversion = \"202301\"").unwrap();
        std::env::set_var(TOKEN_ENV, "tok");
        std::env::set_var(BASE_URL_ENV, "http://env");

        let cfg = Config::load(Some(f.path())).unwrap();
        assert_eq!(cfg.base_url, "http://env");
        assert_eq!(cfg.api_version, "202301");
        clear();
    }

    #[test]
    #[serial]
    fn unreadable_file_is_config_error() {
        clear();
        std::env::set_var(TOKEN_ENV, "tok");
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        clear();
    }
}
