//! CLI Configuration
//!
//! Stores per-workspace credentials and the current context in
//! ~/.beamlit/config.toml

use anyhow::{Context as _, Result};
use beamlit::Credentials;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceConfig>,
}

/// Workspace and environment used when no flag is given
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContextConfig {
    pub workspace: Option<String>,
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub name: String,
    #[serde(default)]
    pub credentials: StoredCredentials,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<String>,
}

impl StoredCredentials {
    pub fn api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn to_credentials(&self) -> Option<Credentials> {
        self.api_key
            .clone()
            .map(Credentials::ApiKey)
            .or_else(|| self.jwt.clone().map(Credentials::Jwt))
            .or_else(|| {
                self.client_credentials
                    .clone()
                    .map(Credentials::ClientCredentials)
            })
    }
}

impl Config {
    /// Get the config file path (~/.beamlit/config.toml)
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".beamlit").join("config.toml"))
    }

    /// Load config from disk
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load config from `path`; a missing file is an empty config, an
    /// unreadable or malformed one is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn workspace(&self, name: &str) -> Option<&WorkspaceConfig> {
        self.workspaces.iter().find(|w| w.name == name)
    }

    /// Insert or replace the credentials of a workspace
    pub fn set_credentials(&mut self, name: &str, credentials: StoredCredentials) {
        match self.workspaces.iter_mut().find(|w| w.name == name) {
            Some(existing) => existing.credentials = credentials,
            None => self.workspaces.push(WorkspaceConfig {
                name: name.to_string(),
                credentials,
            }),
        }
    }

    /// Forget a workspace. Clears the context if it pointed there.
    pub fn remove_workspace(&mut self, name: &str) -> bool {
        let before = self.workspaces.len();
        self.workspaces.retain(|w| w.name != name);
        if self.context.workspace.as_deref() == Some(name) {
            self.context = ContextConfig::default();
        }
        self.workspaces.len() != before
    }

    pub fn set_context(&mut self, workspace: &str, environment: &str) {
        self.context.workspace = Some(workspace.to_string());
        self.context.environment = Some(environment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_remove_workspace() {
        let mut config = Config::default();
        config.set_credentials("acme", StoredCredentials::api_key("k1"));
        config.set_credentials("acme", StoredCredentials::api_key("k2"));
        config.set_context("acme", "production");

        assert_eq!(config.workspaces.len(), 1);
        assert_eq!(
            config.workspace("acme").unwrap().credentials.to_credentials(),
            Some(Credentials::ApiKey("k2".into()))
        );

        assert!(config.remove_workspace("acme"));
        assert!(config.context.workspace.is_none());
        assert!(!config.remove_workspace("acme"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = Config::default();
        config.set_credentials("acme", StoredCredentials::api_key("k"));
        config.set_context("acme", "staging");

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.context.environment.as_deref(), Some("staging"));
        assert_eq!(parsed.workspaces[0].credentials.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let original = "[[workspaces]]\nname = \"acme\"\ncredentials = { api_key = ";
        std::fs::write(&path, original).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid config"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_missing_config_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert!(Config::load_from(&path).unwrap().workspaces.is_empty());

        let mut config = Config::default();
        config.set_credentials("acme", StoredCredentials::api_key("k"));
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().workspaces.len(), 1);
    }
}
