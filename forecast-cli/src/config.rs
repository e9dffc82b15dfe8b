use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use forecast_core::{DecodeOptions, Flag, UnknownTokenPolicy};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Persisted preferences for the `forecast` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How unrecognized enumeration tokens are treated when decoding.
    pub unknown_tokens: UnknownTokenPolicy,

    /// Prefer apparent over actual temperatures when reporting.
    pub feels_like: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unknown_tokens: UnknownTokenPolicy::default(),
            feels_like: Flag::DEFAULT_FEELS_LIKE,
        }
    }
}

impl Config {
    /// Decode options for one run. `strict` forces rejection of unknown tokens.
    pub fn decode_options(&self, strict: bool) -> DecodeOptions {
        if strict {
            return DecodeOptions::strict();
        }

        DecodeOptions {
            unknown_tokens: self.unknown_tokens,
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.unknown_tokens, UnknownTokenPolicy::Preserve);
        assert!(cfg.feels_like);
    }

    #[test]
    fn strict_flag_overrides_configured_policy() {
        let cfg = Config::default();

        assert_eq!(cfg.decode_options(false), DecodeOptions::default());
        assert_eq!(cfg.decode_options(true), DecodeOptions::strict());
    }

    #[test]
    fn configured_reject_applies_without_flag() {
        let cfg = Config {
            unknown_tokens: UnknownTokenPolicy::Reject,
            ..Config::default()
        };

        assert_eq!(cfg.decode_options(false).unknown_tokens, UnknownTokenPolicy::Reject);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg = Config::parse("feels_like = false\n").expect("partial config should parse");

        assert!(!cfg.feels_like);
        assert_eq!(cfg.unknown_tokens, UnknownTokenPolicy::Preserve);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config {
            unknown_tokens: UnknownTokenPolicy::Reject,
            feels_like: false,
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("unknown_tokens = \"reject\""));
        assert_eq!(Config::parse(&text).unwrap(), cfg);
    }

    #[test]
    fn unknown_policy_name_is_an_error() {
        let err = Config::parse("unknown_tokens = \"ignore\"\n").unwrap_err();

        assert!(err.to_string().contains("unknown variant"));
    }
}
