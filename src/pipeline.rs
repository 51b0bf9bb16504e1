use crate::collab::{Collaborators, ScoreAnalysis};
use crate::config::Config;
use crate::state::{HighScore, StateStore};
use crate::util::clip;
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::path::Path;

/// One step of a multi-step operation. Steps accumulate; a failed step
/// never aborts the ones after it.
#[derive(Debug, Serialize)]
pub struct ActionEntry {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct BootReport {
    pub timestamp: String,
    pub actions: Vec<ActionEntry>,
    pub status: String,
}

/// Result of `process`: either a structured scorer failure (session state
/// untouched) or a scored message. Untagged so the JSON output keeps the
/// original shapes.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProcessReport {
    Failure { success: bool, error: String },
    Scored(Box<ProcessScore>),
}

#[derive(Debug, Serialize)]
pub struct ProcessScore {
    pub timestamp: String,
    pub message_preview: String,
    pub score: f64,
    pub analysis: serde_json::Value,
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    pub debug: String,
    pub emoji: String,
    pub context_count: u64,
    pub flags: Vec<String>,
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct SaveReport {
    pub success: bool,
    pub file: String,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub success: bool,
    pub results: String,
}

#[derive(Debug, Serialize)]
pub struct Thresholds {
    pub auto_save: f64,
    pub highlight: f64,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub session_start: Option<String>,
    pub messages_processed: u64,
    pub high_scores_this_session: usize,
    pub last_consolidation: Option<String>,
    pub memory_files: usize,
    pub shadow_files: usize,
    pub context_messages: usize,
    pub thresholds: Thresholds,
}

impl StatusReport {
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push("# Memory System Status".to_string());
        lines.push("=".repeat(50));
        lines.push(format!(
            "Session start: {}",
            self.session_start.as_deref().unwrap_or("Not booted")
        ));
        lines.push(format!("Messages processed: {}", self.messages_processed));
        lines.push(format!(
            "High scores this session: {}",
            self.high_scores_this_session
        ));
        lines.push(format!(
            "Last consolidation: {}",
            self.last_consolidation.as_deref().unwrap_or("Never")
        ));
        lines.push(String::new());
        lines.push(format!("Memory files: {}", self.memory_files));
        lines.push(format!("Shadow files: {}", self.shadow_files));
        lines.push(format!("Context messages: {}", self.context_messages));
        lines.push(String::new());
        lines.push("Thresholds:".to_string());
        lines.push(format!("  Auto-save: {}", self.thresholds.auto_save));
        lines.push(format!("  Highlight: {}", self.thresholds.highlight));
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct DailyReport {
    pub actions: Vec<ActionEntry>,
}

/// Sequences collaborator calls and folds their outputs into the session
/// state document. Each public method is one one-shot CLI operation.
pub struct Pipeline<'a> {
    config: &'a Config,
    collab: &'a dyn Collaborators,
    state: StateStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, collab: &'a dyn Collaborators) -> Self {
        let state = StateStore::new(config.state_path());
        Self {
            config,
            collab,
            state,
        }
    }

    /// Start a new session: sync context, scan for forgetting candidates,
    /// reset session counters.
    pub fn boot(&self) -> Result<BootReport> {
        let now = iso_now();
        let mut actions = Vec::new();

        let sync = self.collab.sync_context(15);
        actions.push(ActionEntry {
            action: "sync_context".into(),
            success: Some(sync.success),
            output: Some(clip(sync.text(), 200)),
            candidates: None,
        });

        let scan = self.collab.forgetting_scan(true);
        if scan.success {
            // Malformed scan output silently drops the candidate count.
            match serde_json::from_str::<Vec<serde_json::Value>>(&scan.stdout) {
                Ok(entries) => {
                    let candidates = entries
                        .iter()
                        .filter(|e| {
                            e.get("recommendation").and_then(|v| v.as_str()) != Some("KEEP")
                        })
                        .count();
                    actions.push(ActionEntry {
                        action: "forgetting_scan".into(),
                        success: None,
                        output: None,
                        candidates: Some(candidates),
                    });
                }
                Err(e) => tracing::debug!("forgetting scan output was not JSON: {e}"),
            }
        }

        let mut state = self.state.load()?;
        state.session_start = Some(now.clone());
        state.messages_processed = 0;
        state.high_scores.clear();
        self.state.save(&state)?;

        Ok(BootReport {
            timestamp: now,
            actions,
            status: "ready".into(),
        })
    }

    /// Score a message and fold the result into session state. A scorer
    /// failure returns a structured error without touching state.
    pub fn process(&self, message: &str) -> Result<ProcessReport> {
        let now = iso_now();

        let scored = self.collab.analyze_message(message);
        if !scored.success {
            return Ok(ProcessReport::Failure {
                success: false,
                error: scored.stderr,
            });
        }

        let (analysis, analysis_value) = ScoreAnalysis::parse(&scored.stdout);
        let score = analysis.combined;

        let mut state = self.state.load()?;
        state.messages_processed += 1;

        let mut actions = Vec::new();
        let mut flag = None;
        if score >= self.config.thresholds.auto_save {
            flag = Some("SIGNIFICANT".to_string());
            actions.push("Consider saving to memory".to_string());
            state.push_high_score(HighScore {
                timestamp: now.clone(),
                score,
                preview: clip(message, 100),
            });
        }
        if score >= self.config.thresholds.highlight {
            flag = Some("IMPORTANT".to_string());
            actions.push("High importance - strongly recommend saving".to_string());
        }

        self.state.save(&state)?;

        let mut flags = Vec::new();
        if score >= self.config.thresholds.highlight {
            flags.push("IMPORTANT".to_string());
        } else if score >= self.config.thresholds.auto_save {
            flags.push("SIGNIFICANT".to_string());
        }

        let emoji = score_emoji(score).to_string();
        let debug = format!(
            "[{emoji} {score:.1}{} ctx:{}⟳]",
            analysis.surprise.mark(),
            analysis.context_size
        );

        Ok(ProcessReport::Scored(Box::new(ProcessScore {
            timestamp: now,
            message_preview: clip(message, 100),
            score,
            analysis: analysis_value,
            actions,
            flag,
            debug,
            emoji,
            context_count: analysis.context_size,
            flags,
            saved: false,
        })))
    }

    /// Save content to a memory file via the write collaborator. The
    /// destination is derived from category/title, defaulting to a
    /// date-stamped file.
    pub fn save(&self, content: &str, title: Option<&str>, category: Option<&str>) -> SaveReport {
        let file = match category {
            Some(category) => {
                format!("memory/{category}/{}.md", title.unwrap_or("entry"))
            }
            None => format!("memory/{}.md", Utc::now().format("%Y-%m-%d")),
        };
        let out = self.collab.write_memory(&file, content, title);
        SaveReport {
            success: out.success,
            file,
            output: out.text().to_string(),
        }
    }

    /// Search memories with reconsolidation enabled.
    pub fn search(&self, query: &str) -> SearchReport {
        let out = self.collab.recall(query, 5, true);
        SearchReport {
            success: out.success,
            results: out.text().to_string(),
        }
    }

    /// Report session counters and on-disk memory file counts.
    pub fn status(&self) -> Result<StatusReport> {
        let state = self.state.load()?;

        let memory_dir = self.config.memory_dir();
        let experimental = self.config.experimental_dir();
        let memory_files = count_markdown_files(&memory_dir, Some(&experimental));
        let shadow_files = count_markdown_files(&experimental.join("shadow"), None);

        let context_path = self.config.session_context_path();
        let context_messages = if context_path.exists() {
            let ctx: serde_json::Value =
                serde_json::from_str(&std::fs::read_to_string(&context_path)?)?;
            ctx.get("messages")
                .and_then(|v| v.as_array())
                .map(|a| a.len())
                .unwrap_or(0)
        } else {
            0
        };

        Ok(StatusReport {
            session_start: state.session_start,
            messages_processed: state.messages_processed,
            high_scores_this_session: state.high_scores.len(),
            last_consolidation: state.last_consolidation,
            memory_files,
            shadow_files,
            context_messages,
            thresholds: Thresholds {
                auto_save: self.config.thresholds.auto_save,
                highlight: self.config.thresholds.highlight,
            },
        })
    }

    /// Run nightly consolidation and a forgetting scan, then record the
    /// completion time.
    pub fn daily(&self) -> Result<DailyReport> {
        let mut actions = Vec::new();

        let consolidation = self.collab.consolidate();
        actions.push(ActionEntry {
            action: "consolidation".into(),
            success: Some(consolidation.success),
            output: Some(clip(&consolidation.stdout, 500)),
            candidates: None,
        });

        let scan = self.collab.forgetting_scan(false);
        actions.push(ActionEntry {
            action: "forgetting_scan".into(),
            success: None,
            output: Some(clip(&scan.stdout, 500)),
            candidates: None,
        });

        let mut state = self.state.load()?;
        state.last_consolidation = Some(iso_now());
        self.state.save(&state)?;

        Ok(DailyReport { actions })
    }
}

fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn score_emoji(score: f64) -> &'static str {
    if score >= 7.0 {
        "🔥"
    } else if score >= 5.0 {
        "⚡"
    } else if score >= 3.0 {
        "📊"
    } else {
        "💤"
    }
}

/// Count `.md` files under `dir` recursively, skipping `exclude` and its
/// subtree. Missing directories count as zero.
fn count_markdown_files(dir: &Path, exclude: Option<&Path>) -> usize {
    let mut count = 0;
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if let Some(excluded) = exclude {
            if path == excluded {
                continue;
            }
        }
        if path.is_dir() {
            count += count_markdown_files(&path, exclude);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::ScriptOutput;
    use std::cell::RefCell;

    /// Scripted collaborator double: returns canned outputs and records
    /// which calls were made.
    struct StubCollaborators {
        sync: ScriptOutput,
        scan: ScriptOutput,
        score: ScriptOutput,
        write: ScriptOutput,
        recall: ScriptOutput,
        consolidation: ScriptOutput,
        calls: RefCell<Vec<String>>,
    }

    impl Default for StubCollaborators {
        fn default() -> Self {
            let ok = ScriptOutput {
                success: true,
                stdout: "ok".into(),
                stderr: String::new(),
            };
            Self {
                sync: ok.clone(),
                scan: ok.clone(),
                score: ScriptOutput {
                    success: true,
                    stdout: r#"{"combined": 2.0}"#.into(),
                    stderr: String::new(),
                },
                write: ok.clone(),
                recall: ok.clone(),
                consolidation: ok,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Collaborators for StubCollaborators {
        fn sync_context(&self, last: usize) -> ScriptOutput {
            self.calls.borrow_mut().push(format!("sync:{last}"));
            self.sync.clone()
        }
        fn forgetting_scan(&self, json: bool) -> ScriptOutput {
            self.calls.borrow_mut().push(format!("scan:{json}"));
            self.scan.clone()
        }
        fn analyze_message(&self, _message: &str) -> ScriptOutput {
            self.calls.borrow_mut().push("analyze".into());
            self.score.clone()
        }
        fn write_memory(&self, file: &str, _content: &str, _title: Option<&str>) -> ScriptOutput {
            self.calls.borrow_mut().push(format!("write:{file}"));
            self.write.clone()
        }
        fn recall(&self, query: &str, top: usize, apply: bool) -> ScriptOutput {
            self.calls
                .borrow_mut()
                .push(format!("recall:{query}:{top}:{apply}"));
            self.recall.clone()
        }
        fn consolidate(&self) -> ScriptOutput {
            self.calls.borrow_mut().push("consolidate".into());
            self.consolidation.clone()
        }
    }

    fn test_config(root: &Path) -> Config {
        let mut config = Config::default();
        config.workspace.root = Some(root.to_path_buf());
        config
    }

    fn scored(json: &str) -> ScriptOutput {
        ScriptOutput {
            success: true,
            stdout: json.into(),
            stderr: String::new(),
        }
    }

    #[test]
    fn boot_resets_session_state() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            scan: scored(r#"[{"recommendation": "KEEP"}, {"recommendation": "ARCHIVE"}]"#),
            ..Default::default()
        };
        // Seed dirty state to prove boot resets it
        let store = StateStore::new(config.state_path());
        let mut state = crate::state::SessionState {
            messages_processed: 9,
            ..Default::default()
        };
        state.push_high_score(HighScore {
            timestamp: "t".into(),
            score: 6.0,
            preview: "p".into(),
        });
        store.save(&state).unwrap();

        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.boot().unwrap();

        assert_eq!(report.status, "ready");
        assert_eq!(report.actions.len(), 2);
        assert_eq!(report.actions[0].action, "sync_context");
        assert_eq!(report.actions[0].success, Some(true));
        assert_eq!(report.actions[1].candidates, Some(1));

        let state = store.load().unwrap();
        assert_eq!(state.messages_processed, 0);
        assert!(state.high_scores.is_empty());
        assert!(state.session_start.is_some());

        assert_eq!(
            *stub.calls.borrow(),
            vec!["sync:15".to_string(), "scan:true".to_string()]
        );
    }

    #[test]
    fn boot_tolerates_malformed_scan_output() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            scan: scored("Scanned 12 memories, 3 candidates"),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.boot().unwrap();
        // The scan step is simply omitted from the action list
        assert_eq!(report.actions.len(), 1);
        assert_eq!(report.status, "ready");
    }

    #[test]
    fn boot_continues_after_failed_sync() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            sync: ScriptOutput::failed("context sync exploded"),
            scan: scored("[]"),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.boot().unwrap();
        assert_eq!(report.actions[0].success, Some(false));
        assert_eq!(report.actions[0].output.as_deref(), Some("context sync exploded"));
        // Later steps still ran
        assert_eq!(report.actions[1].candidates, Some(0));
        assert_eq!(report.status, "ready");
    }

    #[test]
    fn process_failure_leaves_state_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            score: ScriptOutput::failed("scorer crashed"),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.process("hello").unwrap();
        match report {
            ProcessReport::Failure { success, error } => {
                assert!(!success);
                assert_eq!(error, "scorer crashed");
            }
            ProcessReport::Scored(_) => panic!("expected failure"),
        }
        assert!(!config.state_path().exists());
    }

    #[test]
    fn process_low_score_counts_message_only() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            score: scored(r#"{"combined": 3.2, "context_size": 4}"#),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.process("routine question").unwrap();
        let score = match report {
            ProcessReport::Scored(s) => s,
            ProcessReport::Failure { .. } => panic!("expected score"),
        };
        assert_eq!(score.score, 3.2);
        assert!(score.flag.is_none());
        assert!(score.flags.is_empty());
        assert_eq!(score.debug, "[📊 3.2 ctx:4⟳]");
        assert!(!score.saved);

        let state = StateStore::new(config.state_path()).load().unwrap();
        assert_eq!(state.messages_processed, 1);
        assert!(state.high_scores.is_empty());
    }

    #[test]
    fn process_significant_score_records_high_score() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            score: scored(r#"{"combined": 5.5, "surprise": "moderate", "context_size": 7}"#),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let long_message = "d".repeat(150);
        let report = pipeline.process(&long_message).unwrap();
        let score = match report {
            ProcessReport::Scored(s) => s,
            ProcessReport::Failure { .. } => panic!("expected score"),
        };
        assert_eq!(score.flag.as_deref(), Some("SIGNIFICANT"));
        assert_eq!(score.flags, vec!["SIGNIFICANT".to_string()]);
        assert_eq!(score.debug, "[⚡ 5.5? ctx:7⟳]");
        assert_eq!(score.message_preview.chars().count(), 100);

        let state = StateStore::new(config.state_path()).load().unwrap();
        assert_eq!(state.high_scores.len(), 1);
        assert_eq!(state.high_scores[0].preview.chars().count(), 100);
        assert_eq!(state.high_scores[0].score, 5.5);
    }

    #[test]
    fn process_important_score_upgrades_flag() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            score: scored(r#"{"combined": 8.1, "surprise": "shocking", "context_size": 2}"#),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.process("big news").unwrap();
        let score = match report {
            ProcessReport::Scored(s) => s,
            ProcessReport::Failure { .. } => panic!("expected score"),
        };
        assert_eq!(score.flag.as_deref(), Some("IMPORTANT"));
        assert_eq!(score.flags, vec!["IMPORTANT".to_string()]);
        // Both action lines accumulate
        assert_eq!(score.actions.len(), 2);
        assert_eq!(score.debug, "[🔥 8.1‼️ ctx:2⟳]");
        // High score recorded on the way through the 5.0 threshold too
        let state = StateStore::new(config.state_path()).load().unwrap();
        assert_eq!(state.high_scores.len(), 1);
    }

    #[test]
    fn process_fifo_bound_holds_across_calls() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            score: scored(r#"{"combined": 6.0}"#),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        for i in 0..13 {
            pipeline.process(&format!("message {i}")).unwrap();
        }
        let state = StateStore::new(config.state_path()).load().unwrap();
        assert_eq!(state.high_scores.len(), 10);
        assert_eq!(state.high_scores[0].preview, "message 3");
        assert_eq!(state.messages_processed, 13);
    }

    #[test]
    fn process_non_json_scorer_output_uses_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            score: scored("plain text, not json"),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.process("hello").unwrap();
        let score = match report {
            ProcessReport::Scored(s) => s,
            ProcessReport::Failure { .. } => panic!("expected score"),
        };
        assert_eq!(score.score, 2.0);
        assert_eq!(score.debug, "[💤 2.0 ctx:0⟳]");
    }

    #[test]
    fn save_derives_category_path() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators::default();
        let pipeline = Pipeline::new(&config, &stub);

        let report = pipeline.save("notes", Some("retro"), Some("projects"));
        assert!(report.success);
        assert_eq!(report.file, "memory/projects/retro.md");

        let report = pipeline.save("notes", None, Some("projects"));
        assert_eq!(report.file, "memory/projects/entry.md");
    }

    #[test]
    fn save_defaults_to_dated_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators::default();
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.save("notes", None, None);
        let expected = format!("memory/{}.md", Utc::now().format("%Y-%m-%d"));
        assert_eq!(report.file, expected);
    }

    #[test]
    fn search_uses_reconsolidation_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators::default();
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.search("deadline");
        assert!(report.success);
        assert_eq!(report.results, "ok");
        assert_eq!(*stub.calls.borrow(), vec!["recall:deadline:5:true".to_string()]);
    }

    #[test]
    fn status_counts_files_and_context() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let memory = config.memory_dir();
        std::fs::create_dir_all(memory.join("projects")).unwrap();
        std::fs::create_dir_all(config.experimental_dir().join("shadow")).unwrap();
        std::fs::write(memory.join("2025-08-29.md"), "x").unwrap();
        std::fs::write(memory.join("projects").join("retro.md"), "x").unwrap();
        std::fs::write(memory.join("notes.txt"), "x").unwrap();
        // Experimental subtree is excluded from the memory count
        std::fs::write(config.experimental_dir().join("scratch.md"), "x").unwrap();
        std::fs::write(
            config.experimental_dir().join("shadow").join("s1.md"),
            "x",
        )
        .unwrap();
        std::fs::write(
            config.session_context_path(),
            r#"{"messages": [{"role": "user"}, {"role": "assistant"}]}"#,
        )
        .unwrap();

        let stub = StubCollaborators::default();
        let pipeline = Pipeline::new(&config, &stub);
        let status = pipeline.status().unwrap();
        assert_eq!(status.memory_files, 2);
        assert_eq!(status.shadow_files, 1);
        assert_eq!(status.context_messages, 2);
        assert_eq!(status.thresholds.auto_save, 5.0);

        let rendered = status.render();
        assert!(rendered.contains("# Memory System Status"));
        assert!(rendered.contains("Session start: Not booted"));
        assert!(rendered.contains("Memory files: 2"));
    }

    #[test]
    fn daily_records_consolidation_time() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            consolidation: scored("consolidated 4 memories"),
            scan: scored("2 candidates"),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.daily().unwrap();
        assert_eq!(report.actions.len(), 2);
        assert_eq!(report.actions[0].action, "consolidation");
        assert_eq!(
            report.actions[0].output.as_deref(),
            Some("consolidated 4 memories")
        );
        assert_eq!(
            *stub.calls.borrow(),
            vec!["consolidate".to_string(), "scan:false".to_string()]
        );

        let state = StateStore::new(config.state_path()).load().unwrap();
        assert!(state.last_consolidation.is_some());
    }

    #[test]
    fn daily_keeps_going_after_failed_consolidation() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let stub = StubCollaborators {
            consolidation: ScriptOutput::failed("no space left"),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config, &stub);
        let report = pipeline.daily().unwrap();
        assert_eq!(report.actions[0].success, Some(false));
        assert_eq!(report.actions.len(), 2);
    }

    #[test]
    fn score_emoji_buckets() {
        assert_eq!(score_emoji(7.0), "🔥");
        assert_eq!(score_emoji(5.0), "⚡");
        assert_eq!(score_emoji(3.0), "📊");
        assert_eq!(score_emoji(2.9), "💤");
    }
}
