use clap::{CommandFactory, Parser};
use mnemo::cli::{MemoryCli, MemoryCommand};
use mnemo::collab::ScriptCollaborators;
use mnemo::config::Config;
use mnemo::pipeline::{Pipeline, ProcessReport};
use mnemo::util::clip;

fn main() -> anyhow::Result<()> {
    mnemo::init_tracing();

    let cli = MemoryCli::parse();

    if let MemoryCommand::Completions { shell } = &cli.command {
        let mut cmd = MemoryCli::command();
        clap_complete::generate(*shell, &mut cmd, "mnemo", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;

    if let MemoryCommand::Config = &cli.command {
        println!("config file:  {}", Config::path().display());
        println!("workspace:    {}", config.root().display());
        println!("scripts dir:  {}", config.scripts_dir().display());
        println!("memory dir:   {}", config.memory_dir().display());
        println!("state file:   {}", config.state_path().display());
        return Ok(());
    }

    let collab = ScriptCollaborators::new(&config);
    let pipeline = Pipeline::new(&config, &collab);

    match cli.command {
        MemoryCommand::Boot => {
            let report = pipeline.boot()?;
            println!("🚀 Memory System Booted");
            for action in &report.actions {
                let icon = if action.success.unwrap_or(true) {
                    "✅"
                } else {
                    "❌"
                };
                match action.candidates {
                    Some(n) => println!("   {icon} {}: {n} forgetting candidates", action.action),
                    None => println!("   {icon} {}", action.action),
                }
            }
        }
        MemoryCommand::Process { message, json } => {
            let report = pipeline.process(&message)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                if let ProcessReport::Failure { .. } = report {
                    std::process::exit(1);
                }
                return Ok(());
            }
            match report {
                ProcessReport::Failure { error, .. } => {
                    eprintln!("❌ Scoring failed: {error}");
                    std::process::exit(1);
                }
                ProcessReport::Scored(score) => {
                    println!("Debug: {}", score.debug);
                    if let Some(ref flag) = score.flag {
                        println!("⚠️  {flag}: {}", score.actions.join("; "));
                    }
                }
            }
        }
        MemoryCommand::Save {
            content,
            title,
            category,
            json,
        } => {
            let report = pipeline.save(&content, title.as_deref(), category.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.success {
                println!("✅ Saved to {}", report.file);
            } else {
                println!("❌ Failed: {}", report.output);
            }
            if !report.success {
                std::process::exit(1);
            }
        }
        MemoryCommand::Search { query } => {
            let report = pipeline.search(&query);
            println!("{}", report.results);
            if !report.success {
                std::process::exit(1);
            }
        }
        MemoryCommand::Status { json } => {
            let report = pipeline.status()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render());
            }
        }
        MemoryCommand::Daily { json } => {
            let report = pipeline.daily()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("🌙 Daily Consolidation");
                for action in &report.actions {
                    println!("### {}", action.action);
                    if let Some(ref output) = action.output {
                        println!("{}", clip(output, 300));
                    }
                }
            }
        }
        MemoryCommand::Config | MemoryCommand::Completions { .. } => unreachable!(),
    }

    Ok(())
}
