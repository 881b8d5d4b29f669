use anyhow::Result;
use beamlit::Settings;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use commands::{GlobalArgs, ResourceKind};

#[derive(Parser)]
#[command(name = "bl", about = "Beamlit CLI - Manage agents, functions and models")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate to a workspace with an API key
    Login {
        workspace: String,
        /// Environment to select after login (default: production)
        environment: Option<String>,
    },

    /// Forget the credentials of a workspace
    Logout { workspace: String },

    /// List workspaces, or switch the current context
    Workspaces {
        workspace: Option<String>,
        environment: Option<String>,
    },

    /// List resources, or show one by name
    Get {
        #[arg(value_enum)]
        kind: ResourceKind,
        name: Option<String>,
    },

    /// Delete a resource by name, or every resource of a manifest
    Delete {
        #[arg(value_enum, required_unless_present = "file")]
        kind: Option<ResourceKind>,
        #[arg(required_unless_present = "file")]
        name: Option<String>,
        /// Manifest file (`-` for stdin)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Create or update resources from a manifest
    Apply {
        /// Manifest file (`-` for stdin)
        #[arg(short, long)]
        file: String,
    },

    /// Show request metrics of a resource
    Metrics {
        #[arg(value_enum)]
        kind: ResourceKind,
        name: String,
    },

    /// Show deployment logs of an agent
    Logs {
        agent: String,
        /// Environment (defaults to the current context)
        environment: Option<String>,
    },

    /// Show the agent history of a request
    History { request_id: String },

    /// Invoke a deployed resource
    Run {
        name: String,
        /// Kind of resource to run
        #[arg(short, long, value_enum, default_value = "function")]
        kind: ResourceKind,
        /// JSON body to send
        #[arg(short, long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.globals.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = Settings::load()
                .map(|s| s.log_level)
                .unwrap_or_else(|_| "warn".to_string());
            EnvFilter::new(level)
        })
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let globals = &cli.globals;
    match cli.command {
        Commands::Login {
            workspace,
            environment,
        } => commands::login::run(globals, &workspace, environment).await,
        Commands::Logout { workspace } => commands::logout::run(&workspace).await,
        Commands::Workspaces {
            workspace,
            environment,
        } => commands::workspaces::run(globals, workspace, environment).await,
        Commands::Get { kind, name } => commands::get::run(globals, kind, name).await,
        Commands::Delete { kind, name, file } => {
            commands::delete::run(globals, kind, name, file).await
        }
        Commands::Apply { file } => commands::apply::run(globals, &file).await,
        Commands::Metrics { kind, name } => commands::metrics::run(globals, kind, &name).await,
        Commands::Logs { agent, environment } => {
            commands::logs::run(globals, &agent, environment).await
        }
        Commands::History { request_id } => commands::history::run(globals, &request_id).await,
        Commands::Run { name, kind, data } => commands::run::run(globals, kind, &name, data).await,
    }
}
