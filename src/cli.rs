use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "billgrade",
    version,
    about = "Grade legislative bills against configurable criteria"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[arg(long, global = true, default_value = ".")]
    pub config_root: PathBuf,

    /// Explicit config file; skips layered discovery
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Grade store file (default: <config-root>/.grader/grades.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[arg(long, global = true)]
    pub demographics: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    pub methodology: Option<MethodologyArg>,

    /// Seed for the borderline-score perturbation
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Disable the borderline-score perturbation
    #[arg(long, global = true)]
    pub no_jitter: bool,

    #[arg(short, long, global = true, value_enum, default_value = "md")]
    pub format: ReportFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Grade(GradeCommand),
    Batch(BatchCommand),
    Stats(StatsCommand),
    Override(OverrideCommand),
    Regrade,
    Criteria,
}

#[derive(Args)]
pub struct GradeCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct BatchCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct StatsCommand {
    #[arg(long)]
    pub state: Option<String>,
}

#[derive(Args)]
pub struct OverrideCommand {
    pub bill_id: String,

    #[arg(long, required_unless_present = "clear", requires = "score")]
    pub grade: Option<String>,

    #[arg(long, requires = "grade")]
    pub score: Option<f64>,

    #[arg(long, default_value = "cli")]
    pub actor: String,

    #[arg(long, conflicts_with_all = ["grade", "score"])]
    pub clear: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodologyArg {
    Original,
    CensusBased,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
