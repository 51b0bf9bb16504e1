use crate::signal::Signal;
use crate::tracker::{Incident, TrackerDoc};
use crate::util::round2;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of a windowed pattern analysis. The empty window is a distinct
/// variant, not a zero-filled stats object; serialization is untagged so
/// the JSON shapes match the persisted contract (`{"message": ...}` vs the
/// full stats object).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PatternAnalysis {
    Empty { message: String },
    Stats(PatternStats),
}

#[derive(Debug, Serialize)]
pub struct PatternStats {
    pub period: String,
    pub total_incidents: usize,
    pub signal_breakdown: BTreeMap<String, usize>,
    pub satisfaction_ratio: f64,
    pub concern_ratio: f64,
    pub common_contexts: Vec<String>,
    pub recent_incidents: Vec<Incident>,
}

impl PatternAnalysis {
    pub fn stats(&self) -> Option<&PatternStats> {
        match self {
            PatternAnalysis::Stats(s) => Some(s),
            PatternAnalysis::Empty { .. } => None,
        }
    }
}

/// Parse a stored ISO-8601 timestamp as a naive UTC wall-clock value.
/// The trailing `Z` marker is stripped so both sides of window comparisons
/// are timezone-naive.
pub fn parse_naive_timestamp(ts: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(ts.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Windowed statistics over the incident list: incidents with
/// `timestamp >= now - since_days` (calendar days, inclusive bound).
/// Incidents with unparseable timestamps fall outside every window.
pub fn analyze(doc: &TrackerDoc, since_days: i64, now: NaiveDateTime) -> PatternAnalysis {
    let cutoff = now - Duration::days(since_days);

    let recent: Vec<&Incident> = doc
        .incidents
        .iter()
        .filter(|inc| match parse_naive_timestamp(&inc.timestamp) {
            Some(t) => t >= cutoff,
            None => {
                tracing::debug!("skipping incident {} with bad timestamp", inc.id);
                false
            }
        })
        .collect();

    if recent.is_empty() {
        return PatternAnalysis::Empty {
            message: "No incidents in the specified period".into(),
        };
    }

    let mut signal_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    for inc in &recent {
        *signal_breakdown.entry(inc.signal.as_str().to_string()).or_insert(0) += 1;
    }

    let total = recent.len();
    let positive = signal_breakdown.get(Signal::Positive.as_str()).copied().unwrap_or(0);
    let negative = signal_breakdown.get(Signal::Negative.as_str()).copied().unwrap_or(0);

    // total > 0 is guaranteed by the empty check above; guard anyway.
    let (satisfaction_ratio, concern_ratio) = if total > 0 {
        (
            round2(positive as f64 / total as f64),
            round2(negative as f64 / total as f64),
        )
    } else {
        (0.0, 0.0)
    };

    let mut common_contexts: Vec<String> = Vec::new();
    for inc in &recent {
        if !common_contexts.contains(&inc.context) {
            common_contexts.push(inc.context.clone());
        }
    }

    let recent_incidents = recent[recent.len().saturating_sub(5)..]
        .iter()
        .map(|inc| (*inc).clone())
        .collect();

    PatternAnalysis::Stats(PatternStats {
        period: format!("Last {since_days} days"),
        total_incidents: total,
        signal_breakdown,
        satisfaction_ratio,
        concern_ratio,
        common_contexts,
        recent_incidents,
    })
}
