use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "concord-views.toml";

/// CLI configuration, loaded from concord-views.toml.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ViewsConfig {
    pub snapshot: SnapshotSection,
    pub output: OutputSection,
    pub log: LogSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SnapshotSection {
    /// JSON state snapshot to query.
    pub path: String,
}

impl Default for SnapshotSection {
    fn default() -> Self {
        Self {
            path: "state.json".into(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OutputSection {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl ViewsConfig {
    /// Load config from a TOML file, falling back to defaults when the file
    /// does not exist. Environment variables override file values.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// [`ViewsConfig::load`] with overrides read through `var`.
    pub fn load_with(
        path: impl AsRef<Path>,
        var: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        } else {
            info!(path = %path.display(), "no config file found, using defaults");
            Self::default()
        };

        config.apply_overrides(var);
        Ok(config)
    }

    /// Apply `CONCORD_VIEWS_*` overrides read through `var`.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("CONCORD_VIEWS_SNAPSHOT") {
            self.snapshot.path = v;
        }
        if let Some(v) = var("CONCORD_VIEWS_PRETTY")
            && let Ok(pretty) = v.parse()
        {
            self.output.pretty = pretty;
        }
        if let Some(v) = var("CONCORD_VIEWS_LOG") {
            self.log.level = v;
        }
    }
}
