// ABOUTME: Configuration file loading, validation, and hierarchical merging for ghi
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use ghi_sdk::Repo;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    /// Fallback repository when none can be inferred from the working directory
    #[serde(default)]
    pub default_repo: Option<String>,
    /// Override for the API endpoint (GitHub Enterprise)
    #[serde(default)]
    pub api_url: Option<String>,
    /// Override for the web base URL used in browser hand-offs
    #[serde(default)]
    pub web_url: Option<String>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations.
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();
        Self::load_from_paths(&paths.iter().map(|p| p.as_str()).collect::<Vec<_>>())
    }

    /// Load configuration from specific file paths, later paths overriding
    /// earlier ones. Missing files are skipped.
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if let Ok(file_config) = Self::load_from_file(path) {
                config = config.merge(file_config);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Standard config file paths in order of application (lowest first).
    pub fn config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir.join(".config").join("ghi").join("config.toml");
            paths.push(path.to_string_lossy().to_string());
        }

        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home).join("ghi").join("config.toml");
            paths.push(path.to_string_lossy().to_string());
        }

        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join("ghi.toml").to_string_lossy().to_string());
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config.
    pub fn merge(self, other: Config) -> Config {
        Config {
            default_repo: other.default_repo.or(self.default_repo),
            api_url: other.api_url.or(self.api_url),
            web_url: other.web_url.or(self.web_url),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref repo) = self.default_repo {
            repo.parse::<Repo>()
                .map_err(|_| anyhow!("Invalid default_repo '{}': expected OWNER/REPO", repo))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.default_repo.is_none());
        assert!(config.api_url.is_none());
        assert!(config.web_url.is_none());
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            default_repo: Some("octocat/base".to_string()),
            api_url: Some("https://base.example.com".to_string()),
            ..Default::default()
        };

        let override_config = Config {
            default_repo: Some("octocat/override".to_string()),
            web_url: Some("https://github.example.com".to_string()),
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.default_repo, Some("octocat/override".to_string()));
        assert_eq!(merged.api_url, Some("https://base.example.com".to_string()));
        assert_eq!(
            merged.web_url,
            Some("https://github.example.com".to_string())
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_repo = \"octocat/spoon-knife\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.default_repo, Some("octocat/spoon-knife".to_string()));
    }

    #[test]
    fn test_invalid_default_repo_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_repo = \"not-a-repo\"").unwrap();

        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let config = Config::load_from_paths(&["/nonexistent/ghi.toml"]).unwrap();
        assert_eq!(config, Config::default());
    }
}
