use clap::{Parser, Subcommand};
use clap_complete::Shell as ClapShell;

#[derive(Parser)]
#[command(
    name = "mnemo",
    version,
    about = "Session memory pipeline for an assistant workspace"
)]
pub struct MemoryCli {
    #[command(subcommand)]
    pub command: MemoryCommand,
}

#[derive(Subcommand)]
pub enum MemoryCommand {
    /// Start a session: sync context and scan for forgetting candidates
    Boot,

    /// Score a message and update session counters
    Process {
        /// The message to score
        message: String,
        /// Output structured JSON instead of the one-line debug tag
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Save content to a memory file
    Save {
        /// The content to save
        content: String,
        /// Title for the entry (also names the file inside a category)
        #[arg(short, long)]
        title: Option<String>,
        /// Category subdirectory under memory/
        #[arg(short, long)]
        category: Option<String>,
        /// Output structured JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Search memories with reconsolidation
    Search {
        /// The search query
        query: String,
    },

    /// Show session counters and memory file counts
    Status {
        /// Output structured JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Run nightly consolidation and a forgetting scan
    Daily {
        /// Output structured JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the resolved configuration paths
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: ClapShell,
    },
}

#[derive(Parser)]
#[command(
    name = "mnemo-track",
    version,
    about = "Track user satisfaction signals and distill them into learnings"
)]
pub struct TrackerCli {
    #[command(subcommand)]
    pub command: TrackerCommand,
}

#[derive(Subcommand)]
pub enum TrackerCommand {
    /// Record a satisfaction incident
    Record {
        /// Signal type: negative, positive, or interested
        signal: String,
        /// Short label for the situation (e.g. "code-review")
        context: String,
        /// What the user said
        user_message: String,
        /// What the assistant had done
        my_response: String,
        /// Optional analysis of what went right or wrong
        analysis: Option<String>,
    },

    /// Analyze incident patterns over a window
    Analyze {
        /// Window size in days
        #[arg(default_value_t = 7)]
        days: i64,
    },

    /// Write today's summary into the insights directory
    DailySummary,

    /// Regenerate LEARNING.md from the last 30 days
    UpdateLearning,
}
