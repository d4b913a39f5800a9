// ABOUTME: Configuration file loading, validation, and hierarchical merging for imgcat
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use crate::constants::{env_vars, paths};
use anyhow::{Context, Result, anyhow};
use imgcat_core::Protocol;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, deserialize_with = "validate_protocol")]
    pub protocol: Option<String>,
    #[serde(default)]
    pub pixels_per_line: Option<u32>,
    #[serde(default)]
    pub unsupported_terminals: Option<Vec<String>>,
    #[serde(default)]
    pub use_bel: Option<bool>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        Self::load_from_paths(&Self::get_config_paths())
    }

    /// Load configuration from specific file paths; later paths override earlier ones
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                continue;
            }
            let file_config = Self::load_from_file(path)?;
            log::debug!("Loaded config from {}", path.display());
            config = config.merge(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
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

    /// Standard config file paths in order of precedence (lowest first)
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            candidates.push(
                home_dir
                    .join(".config")
                    .join(paths::CONFIG_DIR)
                    .join(paths::CONFIG_FILE),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os(env_vars::XDG_CONFIG_HOME) {
            candidates.push(
                PathBuf::from(config_home)
                    .join(paths::CONFIG_DIR)
                    .join(paths::CONFIG_FILE),
            );
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            candidates.push(current_dir.join(paths::LOCAL_CONFIG_FILE));
        }

        candidates.dedup();
        candidates
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            protocol: other.protocol.or(self.protocol),
            pixels_per_line: other.pixels_per_line.or(self.pixels_per_line),
            unsupported_terminals: match (self.unsupported_terminals, other.unsupported_terminals)
            {
                (Some(mut base), Some(other)) => {
                    base.extend(other);
                    Some(base)
                }
                (base, other) => other.or(base),
            },
            use_bel: other.use_bel.or(self.use_bel),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.pixels_per_line == Some(0) {
            return Err(anyhow!("pixels_per_line must be greater than zero"));
        }
        Ok(())
    }

    /// Configured protocol, if any
    pub fn protocol(&self) -> Option<Protocol> {
        self.protocol.as_deref().and_then(|p| p.parse().ok())
    }
}

/// Result of the IMGCAT_FORCE_PROTOCOL override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedProtocol {
    Use(Protocol),
    Disabled,
}

impl ForcedProtocol {
    pub fn from_env() -> Option<Self> {
        std::env::var(env_vars::FORCE_PROTOCOL)
            .ok()
            .and_then(|value| Self::parse(&value))
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "none" | "disable" | "disabled" => Some(Self::Disabled),
            other => match other.parse::<Protocol>() {
                Ok(protocol) => Some(Self::Use(protocol)),
                Err(_) => {
                    log::warn!(
                        "Unknown protocol '{}' in {}. Valid values: iterm2, kitty, none",
                        value,
                        env_vars::FORCE_PROTOCOL
                    );
                    None
                }
            },
        }
    }
}

// Custom deserializer for protocol validation
fn validate_protocol<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    if let Some(ref protocol) = value {
        protocol.parse::<Protocol>().map_err(D::Error::custom)?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_merge_prefers_other() {
        let base = Config {
            protocol: Some("iterm2".to_string()),
            pixels_per_line: Some(24),
            unsupported_terminals: Some(vec!["foo".to_string()]),
            use_bel: Some(false),
        };
        let other = Config {
            protocol: Some("kitty".to_string()),
            pixels_per_line: None,
            unsupported_terminals: Some(vec!["bar".to_string()]),
            use_bel: None,
        };

        let merged = base.merge(other);
        assert_eq!(merged.protocol(), Some(Protocol::Kitty));
        assert_eq!(merged.pixels_per_line, Some(24));
        assert_eq!(
            merged.unsupported_terminals,
            Some(vec!["foo".to_string(), "bar".to_string()])
        );
        assert_eq!(merged.use_bel, Some(false));
    }

    #[test]
    fn test_validate_rejects_zero_pixels_per_line() {
        let config = Config {
            pixels_per_line: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_protocol_rejected_at_parse() {
        let result: Result<Config, _> = toml::from_str(r#"protocol = "sixel""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_forced_protocol_parse() {
        assert_eq!(
            ForcedProtocol::parse("kitty"),
            Some(ForcedProtocol::Use(Protocol::Kitty))
        );
        assert_eq!(
            ForcedProtocol::parse("ITERM2"),
            Some(ForcedProtocol::Use(Protocol::ITerm2))
        );
        assert_eq!(ForcedProtocol::parse("none"), Some(ForcedProtocol::Disabled));
        assert_eq!(ForcedProtocol::parse("sixel"), None);
    }

    #[test]
    #[serial]
    fn test_forced_protocol_from_env() {
        let original = std::env::var(env_vars::FORCE_PROTOCOL).ok();

        unsafe {
            std::env::set_var(env_vars::FORCE_PROTOCOL, "disabled");
        }
        assert_eq!(ForcedProtocol::from_env(), Some(ForcedProtocol::Disabled));

        unsafe {
            std::env::remove_var(env_vars::FORCE_PROTOCOL);
        }
        assert_eq!(ForcedProtocol::from_env(), None);

        // Restore env
        unsafe {
            if let Some(val) = original {
                std::env::set_var(env_vars::FORCE_PROTOCOL, val);
            }
        }
    }

    #[test]
    fn test_config_paths_end_with_local_file() {
        let candidates = Config::get_config_paths();
        if let Some(last) = candidates.last() {
            assert!(last.ends_with(paths::LOCAL_CONFIG_FILE));
        }
    }
}
