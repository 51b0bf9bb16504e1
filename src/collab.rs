use crate::config::Config;
use std::path::PathBuf;
use std::process::Command;

/// Captured result of one collaborator invocation. Exit code zero means
/// success; a spawn failure is reported the same way, with the error text
/// in stderr, so multi-step operations accumulate failures instead of
/// aborting.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ScriptOutput {
    pub fn failed(message: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message.to_string(),
        }
    }

    /// stdout on success, stderr on failure.
    pub fn text(&self) -> &str {
        if self.success {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// The external scripts the pipeline orchestrates. Internals are out of
/// scope; only the stdout/stderr/exit-code contract is consumed.
pub trait Collaborators {
    /// Sync session context from the last `last` messages.
    fn sync_context(&self, last: usize) -> ScriptOutput;
    /// Scan for forgetting candidates, optionally as JSON.
    fn forgetting_scan(&self, json: bool) -> ScriptOutput;
    /// Score a message for arousal/prediction error; stdout is JSON.
    fn analyze_message(&self, message: &str) -> ScriptOutput;
    /// Append content to a memory file with scoring.
    fn write_memory(&self, file: &str, content: &str, title: Option<&str>) -> ScriptOutput;
    /// Search memories, optionally applying reconsolidation.
    fn recall(&self, query: &str, top: usize, apply: bool) -> ScriptOutput;
    /// Run nightly consolidation.
    fn consolidate(&self) -> ScriptOutput;
}

/// Runs collaborators as blocking child processes with captured output.
/// No timeout is applied; a hung script hangs the invocation.
pub struct ScriptCollaborators {
    python: String,
    scripts_dir: PathBuf,
    workdir: PathBuf,
    scripts: crate::config::ScriptsConfig,
}

impl ScriptCollaborators {
    pub fn new(config: &Config) -> Self {
        Self {
            python: config.scripts.python.clone(),
            scripts_dir: config.scripts_dir(),
            workdir: config.root(),
            scripts: config.scripts.clone(),
        }
    }

    fn run(&self, script: &str, args: &[&str]) -> ScriptOutput {
        let path = self.scripts_dir.join(script);
        tracing::debug!("running collaborator {} {:?}", path.display(), args);
        match Command::new(&self.python)
            .arg(&path)
            .args(args)
            .current_dir(&self.workdir)
            .output()
        {
            Ok(output) => ScriptOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => {
                tracing::debug!("failed to spawn {}: {e}", path.display());
                ScriptOutput::failed(format!("failed to run {script}: {e}"))
            }
        }
    }
}

impl Collaborators for ScriptCollaborators {
    fn sync_context(&self, last: usize) -> ScriptOutput {
        let last = last.to_string();
        self.run(&self.scripts.context, &["sync", "--last", &last])
    }

    fn forgetting_scan(&self, json: bool) -> ScriptOutput {
        if json {
            self.run(&self.scripts.forgetting, &["scan", "--json"])
        } else {
            self.run(&self.scripts.forgetting, &["scan"])
        }
    }

    fn analyze_message(&self, message: &str) -> ScriptOutput {
        self.run(&self.scripts.context, &["analyze", message, "--json"])
    }

    fn write_memory(&self, file: &str, content: &str, title: Option<&str>) -> ScriptOutput {
        let mut args = vec!["--file", file, "--content", content, "--append"];
        if let Some(title) = title {
            args.push("--title");
            args.push(title);
        }
        self.run(&self.scripts.memory_write, &args)
    }

    fn recall(&self, query: &str, top: usize, apply: bool) -> ScriptOutput {
        let top = top.to_string();
        let mut args = vec![query, "--top", top.as_str()];
        if apply {
            args.push("--apply");
        }
        self.run(&self.scripts.recall, &args)
    }

    fn consolidate(&self) -> ScriptOutput {
        self.run(&self.scripts.consolidate, &[])
    }
}

/// Reported surprise level of a scored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surprise {
    #[default]
    Mild,
    Moderate,
    High,
    Shocking,
}

impl Surprise {
    pub fn from_name(name: &str) -> Self {
        match name {
            "moderate" => Surprise::Moderate,
            "high" => Surprise::High,
            "shocking" => Surprise::Shocking,
            _ => Surprise::Mild,
        }
    }

    /// Punctuation suffix used in the debug tag.
    pub fn mark(self) -> &'static str {
        match self {
            Surprise::Mild => "",
            Surprise::Moderate => "?",
            Surprise::High => "!",
            Surprise::Shocking => "‼️",
        }
    }
}

/// Typed view of the scoring collaborator's JSON output. Missing or
/// malformed fields degrade to fixed defaults rather than failing the
/// whole invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreAnalysis {
    pub combined: f64,
    pub arousal: f64,
    pub pe: f64,
    pub surprise: Surprise,
    pub context_size: u64,
}

impl ScoreAnalysis {
    pub fn fallback() -> Self {
        Self {
            combined: 2.0,
            arousal: 1.5,
            pe: 0.3,
            surprise: Surprise::Mild,
            context_size: 0,
        }
    }

    /// Parse the scorer's stdout. Non-JSON output yields the fallback
    /// tuple; a JSON object fills in defaults field by field.
    pub fn parse(stdout: &str) -> (Self, serde_json::Value) {
        let value: serde_json::Value = match serde_json::from_str(stdout) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("scorer output was not JSON, using fallback: {e}");
                let fallback = Self::fallback();
                let value = serde_json::json!({
                    "combined": fallback.combined,
                    "arousal": fallback.arousal,
                    "pe": fallback.pe,
                    "surprise": "mild",
                });
                return (fallback, value);
            }
        };
        let analysis = Self {
            combined: value.get("combined").and_then(|v| v.as_f64()).unwrap_or(2.0),
            arousal: value.get("arousal").and_then(|v| v.as_f64()).unwrap_or(1.5),
            pe: value.get("pe").and_then(|v| v.as_f64()).unwrap_or(0.3),
            surprise: Surprise::from_name(
                value.get("surprise").and_then(|v| v.as_str()).unwrap_or(""),
            ),
            context_size: value.get("context_size").and_then(|v| v.as_u64()).unwrap_or(0),
        };
        (analysis, value)
    }
}
