//! SDK Settings
//!
//! Loaded from an optional `beamlit.toml`, then overridden by `BL_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::client::Credentials;
use crate::error::{Error, Result};

/// Default settings file, looked up in the working directory
pub const SETTINGS_FILE: &str = "beamlit.toml";

/// Settings for talking to the Beamlit control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Workspace every request is scoped to
    #[serde(default)]
    pub workspace: Option<String>,

    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_run_url")]
    pub run_url: String,

    #[serde(default = "default_app_url")]
    pub app_url: String,

    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub authentication: AuthenticationSettings,
}

/// Credentials, in order of precedence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthenticationSettings {
    pub api_key: Option<String>,
    pub jwt: Option<String>,
    /// Base64 `client_id:client_secret`
    pub client_credentials: Option<String>,
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_base_url() -> String {
    "https://api.beamlit.com/v0".to_string()
}

fn default_run_url() -> String {
    "https://run.beamlit.com".to_string()
}

fn default_app_url() -> String {
    "https://app.beamlit.com".to_string()
}

fn default_registry_url() -> String {
    "https://us.registry.beamlit.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workspace: None,
            environment: default_environment(),
            base_url: default_base_url(),
            run_url: default_run_url(),
            app_url: default_app_url(),
            registry_url: default_registry_url(),
            log_level: default_log_level(),
            timeout_secs: default_timeout(),
            authentication: AuthenticationSettings::default(),
        }
    }
}

impl Settings {
    /// Load `beamlit.toml` from the working directory if present, then apply
    /// the process environment
    pub fn load() -> Result<Self> {
        let path = Path::new(SETTINGS_FILE);
        let mut settings = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Parse a settings file, without environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply `BL_*` overrides read through `lookup`.
    ///
    /// `BL_ENV=dev` first switches every URL to the `beamlit.dev` endpoints;
    /// explicit URL variables still win over that.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("BL_ENV").as_deref() == Some("dev") {
            self.base_url = "https://api.beamlit.dev/v0".to_string();
            self.run_url = "https://run.beamlit.dev".to_string();
            self.app_url = "https://app.beamlit.dev".to_string();
            self.registry_url = "https://eu.registry.beamlit.dev".to_string();
        }

        let overrides: [(&str, &mut String); 6] = [
            ("BL_ENVIRONMENT", &mut self.environment),
            ("BL_BASE_URL", &mut self.base_url),
            ("BL_RUN_URL", &mut self.run_url),
            ("BL_APP_URL", &mut self.app_url),
            ("BL_REGISTRY_URL", &mut self.registry_url),
            ("BL_LOG_LEVEL", &mut self.log_level),
        ];
        for (key, slot) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }

        if let Some(workspace) = lookup("BL_WORKSPACE").filter(|v| !v.is_empty()) {
            self.workspace = Some(workspace);
        }
        if let Some(key) = lookup("BL_API_KEY").filter(|v| !v.is_empty()) {
            self.authentication.api_key = Some(key);
        }
        if let Some(jwt) = lookup("BL_JWT").filter(|v| !v.is_empty()) {
            self.authentication.jwt = Some(jwt);
        }
        if let Some(creds) = lookup("BL_CLIENT_CREDENTIALS").filter(|v| !v.is_empty()) {
            self.authentication.client_credentials = Some(creds);
        }
    }

    /// Workspace name, or a configuration error if none is set
    pub fn workspace(&self) -> Result<&str> {
        self.workspace
            .as_deref()
            .ok_or_else(|| Error::config("No workspace configured (set BL_WORKSPACE)"))
    }

    /// Credentials to authenticate with: API key, then JWT, then client credentials
    pub fn credentials(&self) -> Option<Credentials> {
        let auth = &self.authentication;
        auth.api_key
            .clone()
            .map(Credentials::ApiKey)
            .or_else(|| auth.jwt.clone().map(Credentials::Jwt))
            .or_else(|| {
                auth.client_credentials
                    .clone()
                    .map(Credentials::ClientCredentials)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.environment, "production");
        assert_eq!(settings.base_url, "https://api.beamlit.com/v0");
        assert!(settings.credentials().is_none());
        assert!(settings.workspace().is_err());
    }

    #[test]
    fn test_parse_minimal_settings() {
        let settings = Settings::from_toml(r#"workspace = "acme""#).unwrap();
        assert_eq!(settings.workspace().unwrap(), "acme");
        assert_eq!(settings.run_url, "https://run.beamlit.com");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut settings = Settings::from_toml(
            r#"
            workspace = "acme"
            environment = "staging"

            [authentication]
            jwt = "token"
            "#,
        )
        .unwrap();
        settings.apply_env(env(&[("BL_ENVIRONMENT", "production"), ("BL_API_KEY", "key")]));

        assert_eq!(settings.environment, "production");
        assert_eq!(settings.credentials(), Some(Credentials::ApiKey("key".into())));
    }

    #[test]
    fn test_dev_env_switches_urls() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("BL_ENV", "dev"), ("BL_RUN_URL", "http://localhost:8080")]));

        assert_eq!(settings.base_url, "https://api.beamlit.dev/v0");
        assert_eq!(settings.run_url, "http://localhost:8080");
    }
}
