use crate::api::client::DEFAULT_API_ORIGIN;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_TOKEN_ENV: &str = "REPLICATED_API_TOKEN";
pub const API_ORIGIN_ENV: &str = "REPLICATED_API_ORIGIN";

/// Named authentication profile
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub api_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_origin: Option<String>,
}

/// Contents of `~/.replicated/config.json`
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Single token written by older CLI versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub profiles: HashMap<String, Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
}

/// Token and API origin to use for this invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub api_origin: String,
    /// Profile the token came from, if any
    pub profile: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".replicated").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file; a missing file is an empty config
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Pick the token and API origin
    ///
    /// Token precedence: `env_token`, then the named `profile`, then the
    /// default profile, then the legacy token. Origin precedence:
    /// `env_origin`, then the selected profile's origin, then the public API.
    pub fn resolve_credentials(
        &self,
        profile: Option<&str>,
        env_token: Option<&str>,
        env_origin: Option<&str>,
    ) -> Result<Credentials> {
        let profile_name = non_blank(profile).or(non_blank(self.default_profile.as_deref()));

        let selected = profile_name.and_then(|name| self.profiles.get(name).map(|p| (name, p)));

        let (api_token, profile) = if let Some(token) = non_blank(env_token) {
            (token.to_string(), None)
        } else if let Some(name) = profile_name {
            let (_, p) = selected.with_context(|| format!("Profile '{}' not found", name))?;
            if p.api_token.trim().is_empty() {
                anyhow::bail!("Profile '{}' has no API token", name);
            }
            (p.api_token.clone(), Some(name.to_string()))
        } else if let Some(token) = non_blank(self.token.as_deref()) {
            (token.to_string(), None)
        } else {
            anyhow::bail!(
                "No API token found. Set {} or add a profile to {}",
                API_TOKEN_ENV,
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "~/.replicated/config.json".to_string())
            );
        };

        let api_origin = non_blank(env_origin)
            .or_else(|| selected.and_then(|(_, p)| non_blank(p.api_origin.as_deref())))
            .unwrap_or(DEFAULT_API_ORIGIN)
            .to_string();

        Ok(Credentials {
            api_token,
            api_origin,
            profile,
        })
    }
}
