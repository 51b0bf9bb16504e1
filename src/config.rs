use serde::Deserialize;
use std::path::PathBuf;

/// Environment override for the workspace root. Takes precedence over the
/// config file so tests and cron jobs can point at a scratch workspace.
pub const ROOT_ENV: &str = "MNEMO_ROOT";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub thresholds: ThresholdConfig,
    pub scripts: ScriptsConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Base directory holding memory/, LEARNING.md, and collaborator state.
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Score at or above which a processed message is worth saving.
    pub auto_save: f64,
    /// Score at or above which a message is highlighted as important.
    pub highlight: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            auto_save: 5.0,
            highlight: 7.0,
        }
    }
}

/// Names of the collaborator scripts invoked as child processes. Paths are
/// resolved relative to `scripts_dir`, so the forgetting scanner can live
/// outside it (the default does).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    pub python: String,
    pub dir: Option<PathBuf>,
    pub context: String,
    pub forgetting: String,
    pub memory_write: String,
    pub recall: String,
    pub consolidate: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            python: "python3".into(),
            dir: None,
            context: "auto-context.py".into(),
            forgetting: "../projects/experiential-memory/forgetting.py".into(),
            memory_write: "memory-write.py".into(),
            recall: "memory-recall.py".into(),
            consolidate: "nightly-consolidate.py".into(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mnemo")
            .join("config.toml")
    }

    /// Workspace root: `MNEMO_ROOT` env var, then `[workspace] root` from the
    /// config file, then `~/.mnemo`.
    pub fn root(&self) -> PathBuf {
        if let Ok(root) = std::env::var(ROOT_ENV) {
            if !root.is_empty() {
                return PathBuf::from(root);
            }
        }
        if let Some(ref root) = self.workspace.root {
            return root.clone();
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mnemo")
    }

    pub fn scripts_dir(&self) -> PathBuf {
        match self.scripts.dir {
            Some(ref dir) => dir.clone(),
            None => self.root().join("scripts"),
        }
    }

    pub fn memory_dir(&self) -> PathBuf {
        self.root().join("memory")
    }

    pub fn experimental_dir(&self) -> PathBuf {
        self.memory_dir().join("_experimental")
    }

    pub fn insights_dir(&self) -> PathBuf {
        self.memory_dir().join("satisfaction-insights")
    }

    pub fn tracker_path(&self) -> PathBuf {
        self.memory_dir().join("satisfaction-tracker.json")
    }

    pub fn state_path(&self) -> PathBuf {
        self.experimental_dir().join("system-state.json")
    }

    pub fn learning_path(&self) -> PathBuf {
        self.root().join("LEARNING.md")
    }

    pub fn session_context_path(&self) -> PathBuf {
        self.root().join(".session-context.json")
    }

    /// Create the insights directory (and its parents) up front. Summary
    /// generation assumes it exists rather than creating it per call.
    pub fn ensure_insights_dir(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.insights_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.workspace.root = Some(root.to_path_buf());
        config
    }

    #[test]
    fn default_thresholds() {
        let config = Config::default();
        assert_eq!(config.thresholds.auto_save, 5.0);
        assert_eq!(config.thresholds.highlight, 7.0);
    }

    #[test]
    fn paths_derive_from_root() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with_root(tmp.path());
        assert_eq!(config.memory_dir(), tmp.path().join("memory"));
        assert_eq!(
            config.tracker_path(),
            tmp.path().join("memory").join("satisfaction-tracker.json")
        );
        assert_eq!(
            config.state_path(),
            tmp.path()
                .join("memory")
                .join("_experimental")
                .join("system-state.json")
        );
        assert_eq!(config.learning_path(), tmp.path().join("LEARNING.md"));
        assert!(config.insights_dir().starts_with(config.memory_dir()));
    }

    #[test]
    fn scripts_dir_defaults_under_root() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with_root(tmp.path());
        assert_eq!(config.scripts_dir(), tmp.path().join("scripts"));
    }

    #[test]
    fn parses_config_toml() {
        let config: Config = toml::from_str(
            r#"
            [workspace]
            root = "/srv/assistant"

            [thresholds]
            auto_save = 4.0

            [scripts]
            python = "python3.12"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.workspace.root.as_deref(),
            Some(std::path::Path::new("/srv/assistant"))
        );
        assert_eq!(config.thresholds.auto_save, 4.0);
        // Unspecified fields keep their defaults
        assert_eq!(config.thresholds.highlight, 7.0);
        assert_eq!(config.scripts.python, "python3.12");
        assert_eq!(config.scripts.context, "auto-context.py");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.thresholds.auto_save, 5.0);
        assert!(config.workspace.root.is_none());
    }

    #[test]
    fn ensure_insights_dir_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with_root(&tmp.path().join("ws"));
        config.ensure_insights_dir().unwrap();
        assert!(config.insights_dir().is_dir());
        // memory/ is created as a parent, matching the original layout
        assert!(config.memory_dir().is_dir());
    }
}
