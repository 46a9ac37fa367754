//! EduAssist CLI — the main entry point.
//!
//! Commands:
//! - `init`      — Write a default config and open the data file
//! - `status`    — Show configuration and data totals
//! - `overview`  — The teacher's landing page
//! - `class`, `project`, `knowledge`, `rules` — Teacher management
//! - `student`   — Join a class or list students
//! - `ask`       — Chat as a student, single message or interactive
//! - `history`   — Print a stored conversation

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "eduassist",
    about = "EduAssist — a teaching assistant grounded in your own knowledge base",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this data file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file and create the data file
    Init,

    /// Show configuration and data totals
    Status,

    /// Totals, recent classes and recent activity
    Overview,

    /// Manage classes
    Class {
        #[command(subcommand)]
        action: ClassAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage the knowledge base
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeAction,
    },

    /// Show or replace assistant rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Join a class or list students
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Ask the assistant as a student
    Ask {
        /// Student id returned by `student join`
        #[arg(long)]
        student: String,

        /// Chat inside a project
        #[arg(long)]
        project: Option<String>,

        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Print a stored conversation
    History {
        #[arg(long)]
        student: String,

        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ClassAction {
    /// Create a class and print its join code
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "")]
        grade: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List classes with member counts
    List,
    /// Delete a class and everything in it
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    Create {
        #[arg(long)]
        class: String,
        #[arg(long)]
        name: String,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<chrono::NaiveDate>,
        #[arg(long, default_value = "")]
        description: String,
    },
    List {
        #[arg(long)]
        class: Option<String>,
    },
    /// Delete a project; its knowledge becomes class-wide
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum KnowledgeAction {
    Add {
        #[arg(long)]
        class: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    List {
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        project: Option<String>,
        /// Case-insensitive search over question, answer and tags
        #[arg(long)]
        search: Option<String>,
    },
}

/// Which rule to address. Without a flag the global rule is used.
#[derive(Args)]
pub struct RuleTarget {
    #[arg(long, conflicts_with = "project")]
    class: Option<String>,
    #[arg(long)]
    project: Option<String>,
}

#[derive(Subcommand)]
pub enum RulesAction {
    Show {
        #[command(flatten)]
        target: RuleTarget,
    },
    /// Replace a rule; an empty text clears it
    Set {
        #[command(flatten)]
        target: RuleTarget,
        text: String,
    },
}

#[derive(Subcommand)]
pub enum StudentAction {
    /// Join a class by its code
    Join {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
    },
    List {
        #[arg(long)]
        class: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let data = cli.data;
    match cli.command {
        Commands::Init => commands::init::run(data).await?,
        Commands::Status => commands::status::run(data).await?,
        Commands::Overview => commands::overview::run(data).await?,
        Commands::Class { action } => commands::class::run(data, action).await?,
        Commands::Project { action } => commands::project::run(data, action).await?,
        Commands::Knowledge { action } => commands::knowledge::run(data, action).await?,
        Commands::Rules { action } => commands::rules::run(data, action).await?,
        Commands::Student { action } => commands::student::run(data, action).await?,
        Commands::Ask {
            student,
            project,
            message,
        } => commands::ask::run(data, student, project, message).await?,
        Commands::History { student, project } => {
            commands::history::run(data, student, project).await?
        }
    }

    Ok(())
}
