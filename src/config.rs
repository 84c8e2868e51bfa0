use anyhow::{Context, Result};
use placement::ClientSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables consulted for the region, in order.
const REGION_ENV_VARS: &[&str] = &["AWS_REGION", "AWS_DEFAULT_REGION", "EC2_REGION"];

/// Environment variable overriding the EC2 endpoint.
const ENDPOINT_ENV_VAR: &str = "EC2_URL";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("ec2-placement"))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

// ============================================================================
// Config File
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Region used when none is given on the command line or environment
    #[serde(default)]
    pub region: Option<String>,
    /// Service endpoint override, e.g. a local emulator
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load the config file
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
                Self::load_from(Path::new(&expanded))
            }
            None => {
                let path = default_config_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config file at {}", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve client settings from the process environment
    pub fn client_settings(&self, explicit: ClientSettings) -> ClientSettings {
        self.client_settings_with(explicit, |key| std::env::var(key).ok())
    }

    /// Resolve client settings
    ///
    /// Explicit values win, then the environment, then the config file.
    /// Empty values are ignored.
    pub fn client_settings_with(
        &self,
        explicit: ClientSettings,
        env: impl Fn(&str) -> Option<String>,
    ) -> ClientSettings {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

        let region = non_empty(explicit.region)
            .or_else(|| REGION_ENV_VARS.iter().find_map(|key| non_empty(env(*key))))
            .or_else(|| non_empty(self.region.clone()));
        let endpoint_url = non_empty(explicit.endpoint_url)
            .or_else(|| non_empty(env(ENDPOINT_ENV_VAR)))
            .or_else(|| non_empty(self.endpoint_url.clone()));

        ClientSettings {
            region,
            endpoint_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "region = \"eu-central-1\"\nendpoint_url = \"http://localhost:4566\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-central-1"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "regoin = \"us-east-1\"\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    fn region(region: &str) -> ClientSettings {
        ClientSettings {
            region: Some(region.to_string()),
            endpoint_url: None,
        }
    }

    #[test]
    fn test_region_precedence() {
        let config = Config {
            region: Some("from-config".to_string()),
            endpoint_url: None,
        };

        let env = env_from(&[("AWS_DEFAULT_REGION", "from-default"), ("EC2_REGION", "from-ec2")]);
        let settings = config.client_settings_with(region("explicit"), &env);
        assert_eq!(settings.region.as_deref(), Some("explicit"));

        let settings = config.client_settings_with(ClientSettings::default(), &env);
        assert_eq!(settings.region.as_deref(), Some("from-default"));

        let settings = config.client_settings_with(ClientSettings::default(), env_from(&[]));
        assert_eq!(settings.region.as_deref(), Some("from-config"));

        let settings = Config::default().client_settings_with(ClientSettings::default(), env_from(&[]));
        assert!(settings.region.is_none());
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let env = env_from(&[("AWS_REGION", ""), ("EC2_REGION", "us-west-1")]);
        let settings = Config::default().client_settings_with(region(""), env);
        assert_eq!(settings.region.as_deref(), Some("us-west-1"));
    }

    #[test]
    fn test_endpoint_precedence() {
        let config = Config {
            region: None,
            endpoint_url: Some("http://config:4566".to_string()),
        };
        let env = env_from(&[("EC2_URL", "http://env:4566")]);

        let explicit = ClientSettings {
            region: None,
            endpoint_url: Some("http://explicit:4566".to_string()),
        };
        let settings = config.client_settings_with(explicit, &env);
        assert_eq!(settings.endpoint_url.as_deref(), Some("http://explicit:4566"));

        let settings = config.client_settings_with(ClientSettings::default(), &env);
        assert_eq!(settings.endpoint_url.as_deref(), Some("http://env:4566"));

        let settings = config.client_settings_with(ClientSettings::default(), env_from(&[]));
        assert_eq!(settings.endpoint_url.as_deref(), Some("http://config:4566"));
    }
}
