use crate::signal::Signal;
use crate::util::{atomic_write, clip};
use anyhow::{Context, Result};
use chrono::{NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ANALYSIS: &str = "Pending analysis";

/// One recorded sentiment event tied to a conversational exchange.
/// Immutable once appended; the store only grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub timestamp: String,
    pub signal: Signal,
    pub context: String,
    pub user_message: String,
    pub my_response: String,
    pub analysis: String,
}

/// The persisted tracker document: all incidents in insertion order plus
/// summary metadata. `patterns` is a reserved cache slot kept for
/// compatibility with existing files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerDoc {
    pub incidents: Vec<Incident>,
    pub patterns: serde_json::Map<String, serde_json::Value>,
    pub last_summary: Option<String>,
}

/// Whole-document repository over a single JSON file. Reads load the full
/// document; writes replace it atomically. No locking: concurrent writers
/// race and the last rename wins.
pub struct TrackerStore {
    path: PathBuf,
}

impl TrackerStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted document, or a fresh empty one if none exists.
    pub fn load(&self) -> Result<TrackerDoc> {
        if !self.path.exists() {
            return Ok(TrackerDoc::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let doc = serde_json::from_str(&content)
            .with_context(|| format!("invalid tracker document at {}", self.path.display()))?;
        Ok(doc)
    }

    /// Persist the full document as pretty-printed JSON. The containing
    /// directory must already exist.
    pub fn save(&self, doc: &TrackerDoc) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)?;
        atomic_write(&self.path, json.as_bytes())
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Construct an incident (clipping free text to 200 characters),
    /// append it, persist, and return its id.
    pub fn record(
        &self,
        signal: Signal,
        context: &str,
        user_message: &str,
        my_response: &str,
        analysis: Option<&str>,
    ) -> Result<String> {
        let mut doc = self.load()?;
        let now = Utc::now();
        let id = next_incident_id(&doc, now.naive_utc());
        doc.incidents.push(Incident {
            id: id.clone(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            signal,
            context: context.to_string(),
            user_message: clip(user_message, 200),
            my_response: clip(my_response, 200),
            analysis: analysis.unwrap_or(DEFAULT_ANALYSIS).to_string(),
        });
        self.save(&doc)?;
        Ok(id)
    }
}

/// Second-resolution timestamp id, with a `-2`, `-3`, ... suffix when two
/// incidents land in the same second. Suffixed ids still sort after the
/// bare id for incidents created in order.
fn next_incident_id(doc: &TrackerDoc, now: NaiveDateTime) -> String {
    let base = now.format("%Y%m%d_%H%M%S").to_string();
    if !doc.incidents.iter().any(|i| i.id == base) {
        return base;
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !doc.incidents.iter().any(|i| i.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}
