mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, history::HistorySubcommand, plan::PlanSubcommand,
    project::ProjectSubcommand, sent::SentArgs,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "comms",
    about = "Plan, draft and track stakeholder communications for software projects",
    version,
    propagate_version = true
)]
struct Cli {
    /// Root directory (default: auto-detect from .comms/ or .git/)
    #[arg(long, global = true, env = "COMMS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and an empty project data file
    Init {
        /// LLM provider: anthropic or offline
        #[arg(long)]
        provider: Option<String>,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        subcommand: ProjectSubcommand,
    },

    /// Generate or show a project's communications plan
    Plan {
        #[command(subcommand)]
        subcommand: PlanSubcommand,
    },

    /// List pending communications due soon
    Due {
        /// Days ahead to include (default: schedule.due_window_days)
        #[arg(long)]
        window: Option<u32>,
    },

    /// Draft emails for a planned communication
    Draft {
        project_id: String,
        /// Target date of the planned communication
        planned_comm_id: String,
    },

    /// Record and list communication history
    History {
        #[command(subcommand)]
        subcommand: HistorySubcommand,
    },

    /// Mark a draft as sent
    Sent(SentArgs),

    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Launch the web UI
    Ui {
        /// Port to listen on (default: server.port; 0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { provider } => cmd::init::run(&root, provider.as_deref()),
        Commands::Project { subcommand } => cmd::project::run(&root, subcommand, cli.json),
        Commands::Plan { subcommand } => cmd::plan::run(&root, subcommand, cli.json),
        Commands::Due { window } => cmd::due::run(&root, window, cli.json),
        Commands::Draft {
            project_id,
            planned_comm_id,
        } => cmd::draft::run(&root, &project_id, &planned_comm_id, cli.json),
        Commands::History { subcommand } => cmd::history::run(&root, subcommand, cli.json),
        Commands::Sent(args) => cmd::sent::run(&root, args, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Ui { port, no_open } => cmd::ui::run(&root, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
