//! Terminal front-end for the console core.
//!
//! # Commands
//!
//! - `status` - Connection mode, traffic stats and top domains
//! - `health` - Probe the backend
//! - `connect` - Change and persist the backend connection
//! - `upstreams` - Upstream resolver table
//! - `logs` - Recent query log, optionally filtered
//! - `config` - Show, save, review or explain the forwarder config
//! - `ask` - Ask the assistant about current traffic
//! - `watch` - Follow a screen as it polls
//! - `init` - Write a default `mosdash.toml`
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! mosdash connect http://10.0.0.2:5335 --name "Home DNS"
//! mosdash logs --search ads
//! mosdash watch --view dashboard
//! ```

pub mod ask;
pub mod completions;
pub mod config;
pub mod console;
pub mod logs;
pub mod output;
pub mod status;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_init;
pub use console::Console;

use crate::orchestrator::ViewKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mosdash - MosDNS operator console
#[derive(Parser, Debug)]
#[command(
    name = "mosdash",
    version,
    about = "Operator console for a MosDNS forwarder"
)]
pub struct Cli {
    /// Path to configuration file (defaults to ./mosdash.toml when present)
    #[arg(short, long, global = true, env = "MOSDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show connection mode, stats and top domains
    Status(OutputArgs),
    /// Probe the backend health endpoint
    Health(OutputArgs),
    /// Set the backend address and instance name
    Connect(ConnectArgs),
    /// List upstream resolvers
    Upstreams(OutputArgs),
    /// Show recent query logs
    Logs(LogsArgs),
    /// Forwarder configuration
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Ask the assistant a question (interactive when no question is given)
    Ask(AskArgs),
    /// Follow a screen, re-rendering after every poll
    Watch(WatchArgs),
    /// Write a default configuration file
    Init(InitArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Backend base URL (e.g., http://localhost:5335)
    pub url: String,

    /// Display name for this instance (keeps the current name if omitted)
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Only entries whose domain, client or upstream contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Maximum entries to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the forwarder YAML config
    Show,
    /// Upload a YAML config file to the forwarder
    Save(ConfigSaveArgs),
    /// Ask the assistant to review the current config
    Review,
    /// Ask the assistant to explain a rule or plugin snippet
    Explain(ConfigExplainArgs),
}

#[derive(Args, Debug)]
pub struct ConfigSaveArgs {
    /// YAML file to upload ("-" reads stdin)
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConfigExplainArgs {
    /// Rule text (reads stdin if omitted)
    pub rule: Option<String>,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to ask
    pub question: Option<String>,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Screen to follow (dashboard, upstreams, logs, config, ai)
    #[arg(short, long, default_value = "dashboard")]
    pub view: ViewKind,

    /// Stop after this many refreshes
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
