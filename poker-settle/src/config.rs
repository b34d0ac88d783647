//! Runtime configuration for the demo binary.
//!
//! The library itself takes no configuration.

use std::path::PathBuf;

/// Default directory of the snapshot store.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default directory exports are written to.
pub const DEFAULT_EXPORT_DIR: &str = ".";

/// Where the binary keeps its state and writes exports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettleConfig {
    /// Directory backing the file store.
    pub data_dir: PathBuf,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
    /// Whether to write an export at the end of the run.
    pub export: bool,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            export: false,
        }
    }
}

impl SettleConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            data_dir: lookup("POKER_SETTLE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            export_dir: lookup("POKER_SETTLE_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            export: lookup("POKER_SETTLE_EXPORT")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.export),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = SettleConfig::from_lookup(|_| None);
        assert_eq!(config, SettleConfig::default());
    }

    #[test]
    fn test_reads_variables() {
        let vars: BTreeMap<&str, &str> = [
            ("POKER_SETTLE_DATA_DIR", "/tmp/settle"),
            ("POKER_SETTLE_EXPORT", "1"),
        ]
        .into_iter()
        .collect();
        let config = SettleConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/settle"));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.export);
    }
}
