use crate::analyze::{analyze, parse_naive_timestamp, PatternAnalysis};
use crate::signal::Signal;
use crate::tracker::{Incident, TrackerStore};
use crate::util::{atomic_write, clip};
use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Outcome of a daily summary run. A day with no incidents writes nothing
/// and leaves the tracker document untouched.
#[derive(Debug, PartialEq)]
pub enum SummaryOutcome {
    Written(PathBuf),
    NothingToReport,
}

/// Render today's incidents plus 7-day ratio context into a per-date
/// Markdown file under the insights directory, and stamp `last_summary`.
/// The insights directory is expected to exist already.
pub fn generate_daily_summary(
    store: &TrackerStore,
    insights_dir: &Path,
    now: NaiveDateTime,
) -> Result<SummaryOutcome> {
    let mut doc = store.load()?;
    let today = now.date();

    let todays: Vec<Incident> = doc
        .incidents
        .iter()
        .filter(|inc| parse_naive_timestamp(&inc.timestamp).map(|t| t.date()) == Some(today))
        .cloned()
        .collect();

    if todays.is_empty() {
        return Ok(SummaryOutcome::NothingToReport);
    }

    let patterns = analyze(&doc, 7, now);
    let (satisfaction, concern) = match patterns.stats() {
        Some(stats) => (stats.satisfaction_ratio, stats.concern_ratio),
        None => (0.0, 0.0),
    };

    let date = today.format("%Y-%m-%d");
    let mut lines: Vec<String> = vec![
        format!("# Satisfaction Summary - {date}"),
        String::new(),
        format!("**Today's Incidents:** {}", todays.len()),
        format!("**7-Day Satisfaction Ratio:** {:.0}%", satisfaction * 100.0),
        format!("**7-Day Concern Ratio:** {:.0}%", concern * 100.0),
        String::new(),
        "## Today's Incidents".into(),
        String::new(),
    ];

    for inc in &todays {
        lines.push(format!(
            "### {} - {}",
            inc.timestamp,
            inc.signal.as_str().to_uppercase()
        ));
        lines.push(format!("**Context:** {}", inc.context));
        lines.push(format!("**User:** {}...", clip(&inc.user_message, 100)));
        lines.push(format!("**Analysis:** {}", inc.analysis));
        lines.push(String::new());
    }

    lines.push("## Key Learnings".into());
    lines.push(String::new());

    let negatives: Vec<&Incident> = todays.iter().filter(|i| i.signal == Signal::Negative).collect();
    if !negatives.is_empty() {
        lines.push("**Areas for Improvement:**".into());
        for inc in &negatives {
            lines.push(format!("- {}: {}", inc.context, inc.analysis));
        }
        lines.push(String::new());
    }

    let positives: Vec<&Incident> = todays.iter().filter(|i| i.signal == Signal::Positive).collect();
    if !positives.is_empty() {
        lines.push("**What Worked Well:**".into());
        for inc in &positives {
            lines.push(format!("- {}", inc.context));
        }
        lines.push(String::new());
    }

    let path = insights_dir.join(format!("{date}_daily_summary.md"));
    atomic_write(&path, lines.join("\n").as_bytes())?;

    doc.last_summary = Some(date.to_string());
    store.save(&doc)?;

    Ok(SummaryOutcome::Written(path))
}

/// Rewrite the rolling learning document from a 30-day analysis plus the
/// most recent 50 incidents overall. Always overwrites the target in full,
/// even when there is no data.
pub fn update_learning_doc(
    store: &TrackerStore,
    learning_path: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let doc = store.load()?;
    let patterns = analyze(&doc, 30, now);
    let (total, satisfaction, concern) = match patterns.stats() {
        Some(stats) => (
            stats.total_incidents,
            stats.satisfaction_ratio,
            stats.concern_ratio,
        ),
        None => (0, 0.0, 0.0),
    };

    // The ranked lists slice by count, not by time: the last 50 incidents
    // overall, independent of the 30-day analysis window.
    let tail = &doc.incidents[doc.incidents.len().saturating_sub(50)..];
    let negative_ranked = rank_contexts(tail, Signal::Negative);
    let positive_ranked = rank_contexts(tail, Signal::Positive);

    let mut lines: Vec<String> = vec![
        "# LEARNING.md - Behavioral Insights".into(),
        String::new(),
        "This file contains automatically-generated insights from user satisfaction tracking.".into(),
        "It informs my behavioral adjustments and response patterns.".into(),
        String::new(),
        format!("**Last Updated:** {}Z", now.format("%Y-%m-%dT%H:%M:%S%.6f")),
        "**Data Period:** Last 30 days".into(),
        String::new(),
        "---".into(),
        String::new(),
        "## Satisfaction Metrics".into(),
        String::new(),
        format!("- **Total Interactions Analyzed:** {total}"),
        format!("- **Satisfaction Ratio:** {:.0}%", satisfaction * 100.0),
        format!("- **Concern Ratio:** {:.0}%", concern * 100.0),
        String::new(),
        "## Behavioral Patterns".into(),
        String::new(),
    ];

    if !negative_ranked.is_empty() {
        lines.push("### Things That Cause Dissatisfaction".into());
        lines.push(String::new());
        for (ctx, count) in negative_ranked.iter().take(10) {
            lines.push(format!("- **{ctx}** (occurred {count}x)"));
        }
        lines.push(String::new());
    }

    if !positive_ranked.is_empty() {
        lines.push("### Things That Work Well".into());
        lines.push(String::new());
        for (ctx, count) in positive_ranked.iter().take(10) {
            lines.push(format!("- **{ctx}** (occurred {count}x)"));
        }
        lines.push(String::new());
    }

    lines.push("## Actionable Insights".into());
    lines.push(String::new());
    lines.push("Based on the data above, here are the key behavioral adjustments:".into());
    lines.push(String::new());

    if concern > 0.30 {
        lines.push("⚠️ **HIGH CONCERN RATIO** - Review negative incidents and adjust behavior".into());
    }
    if let Some((top_concern, _)) = negative_ranked.first() {
        lines.push(format!("🔴 **Primary Concern Area:** {top_concern}"));
    }
    if let Some((top_success, _)) = positive_ranked.first() {
        lines.push(format!("✅ **Keep Doing:** {top_success}"));
    }

    lines.push(String::new());
    lines.push("---".into());
    lines.push(String::new());
    lines.push("**Note:** This file is auto-generated by `mnemo-track`.".into());
    lines.push("It is updated daily by cron and read by the agent on startup.".into());

    atomic_write(learning_path, lines.join("\n").as_bytes())?;
    Ok(learning_path.to_path_buf())
}

/// Contexts of incidents carrying `signal`, ranked by occurrence count
/// descending. The sort is stable over first-appearance order, so ties
/// keep their original relative position. Both signal polarities use this
/// same ranking.
fn rank_contexts(incidents: &[Incident], signal: Signal) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = Vec::new();
    for inc in incidents.iter().filter(|i| i.signal == signal) {
        match ranked.iter_mut().find(|(ctx, _)| *ctx == inc.context) {
            Some((_, count)) => *count += 1,
            None => ranked.push((inc.context.clone(), 1)),
        }
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
