use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How the change log is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFormat {
    #[default]
    Text,
    Json,
    None,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the merged document.
    pub pretty: bool,
    pub changes: ChangeFormat,
}

impl CliConfig {
    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert!(!c.output.pretty);
        assert_eq!(c.output.changes, ChangeFormat::Text);
    }

    #[test]
    fn load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty = true").unwrap();
        let c = CliConfig::load(file.path()).unwrap();
        assert!(c.output.pretty);
        assert_eq!(c.output.changes, ChangeFormat::Text);
    }

    #[test]
    fn load_change_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nchanges = \"none\"").unwrap();
        let c = CliConfig::load(file.path()).unwrap();
        assert_eq!(c.output.changes, ChangeFormat::None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(CliConfig::load_or_default(None).unwrap(), CliConfig::default());
    }
}
