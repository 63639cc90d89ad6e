mod commands;
mod exitcodes;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "lintsift")]
#[command(about = "Concurrent lint aggregator with an ordered issue-filtering pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the active checkers over a source tree
    Run(RunArgs),
    /// List all available checkers
    List,
    /// Generate a default .lintsift.toml config file
    Init,
}

#[derive(Args)]
struct RunArgs {
    /// Path to a .rs file or a directory to scan
    path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Path to config file (default: .lintsift.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable these checkers in addition to the defaults (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    enable: Option<Vec<String>>,

    /// Disable these checkers (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Additional exclusion globs for issue paths (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Global run deadline in seconds (0 disables it)
    #[arg(long)]
    deadline: Option<u64>,

    /// Parallel checker invocations (0 = available parallelism)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Require the exact "Code generated ... DO NOT EDIT." convention
    #[arg(long)]
    strict_generated: bool,

    /// Disable pipeline stages by name (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable_processors: Option<Vec<String>>,

    /// Cap on total reported issues (0 = uncapped)
    #[arg(long)]
    max_issues: Option<usize>,

    /// Cap on issues per checker (0 = uncapped)
    #[arg(long)]
    max_per_checker: Option<usize>,

    /// Suppress banner and summary
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Run(args) => commands::run::run(&args),
        Commands::List => commands::list::run(),
        Commands::Init => commands::init::run(),
    };

    match code {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(exitcodes::FAILURE);
        }
    }
}
