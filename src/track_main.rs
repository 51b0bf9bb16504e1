use anyhow::bail;
use chrono::Utc;
use clap::Parser;
use mnemo::cli::{TrackerCli, TrackerCommand};
use mnemo::config::Config;
use mnemo::insights::{generate_daily_summary, update_learning_doc, SummaryOutcome};
use mnemo::signal::Signal;
use mnemo::tracker::TrackerStore;
use mnemo::{analyze, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = TrackerCli::parse();
    let config = Config::load()?;
    config.ensure_insights_dir()?;
    let store = TrackerStore::new(config.tracker_path());

    match cli.command {
        TrackerCommand::Record {
            signal,
            context,
            user_message,
            my_response,
            analysis,
        } => {
            let Some(signal) = Signal::parse(&signal) else {
                bail!("invalid signal '{signal}' (expected negative, positive, or interested)");
            };
            let id = store.record(
                signal,
                &context,
                &user_message,
                &my_response,
                analysis.as_deref(),
            )?;
            println!("Recorded incident: {id}");
        }
        TrackerCommand::Analyze { days } => {
            let doc = store.load()?;
            let patterns = analyze::analyze(&doc, days, Utc::now().naive_utc());
            println!("{}", serde_json::to_string_pretty(&patterns)?);
        }
        TrackerCommand::DailySummary => {
            match generate_daily_summary(&store, &config.insights_dir(), Utc::now().naive_utc())? {
                SummaryOutcome::Written(path) => {
                    println!("Daily summary saved: {}", path.display());
                }
                SummaryOutcome::NothingToReport => {
                    println!("No satisfaction incidents recorded today.");
                }
            }
        }
        TrackerCommand::UpdateLearning => {
            let path = update_learning_doc(&store, &config.learning_path(), Utc::now().naive_utc())?;
            println!("Learning document updated: {}", path.display());
        }
    }

    Ok(())
}
