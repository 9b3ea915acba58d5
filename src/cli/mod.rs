//! Command-line interface for ticket-desk
//!
//! Every ticket command goes through the same `TicketService` the HTTP API
//! uses, against the file store at the configured path.

pub mod handlers;
pub mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Support ticket tracking backend
#[derive(Parser, Debug)]
#[command(name = "ticket-desk", version, about, long_about = None)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a configuration file (defaults to ./ticket-desk.yaml when present)
    #[arg(short, long, global = true, env = "TICKET_DESK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    #[cfg(feature = "api")]
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create a new ticket
    New {
        /// What the ticket is about
        description: String,
    },

    /// Assign an agent to a new ticket and start progress
    Assign {
        /// Ticket ID
        ticket: String,

        /// Agent ID
        agent: String,
    },

    /// Mark an in-progress ticket as resolved
    Resolve {
        /// Ticket ID
        ticket: String,
    },

    /// Close a resolved ticket
    Close {
        /// Ticket ID
        ticket: String,
    },

    /// Edit the description or resolution summary of a ticket
    Edit {
        /// Ticket ID
        ticket: String,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New resolution summary
        #[arg(short, long)]
        summary: Option<String>,

        /// Remove the resolution summary
        #[arg(long, conflicts_with = "summary")]
        clear_summary: bool,
    },

    /// Show a ticket
    Show {
        /// Ticket ID
        ticket: String,
    },

    /// List tickets
    List {
        /// Comma-separated statuses (new, in-progress, resolved, closed)
        #[arg(short, long)]
        status: Option<String>,

        /// Only tickets created on or after this date (YYYY-MM-DD or ISO datetime)
        #[arg(long)]
        since: Option<String>,

        /// Only tickets created on or before this date (YYYY-MM-DD or ISO datetime)
        #[arg(long)]
        until: Option<String>,

        /// Only tickets assigned to the agent with this exact name
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// Manage agents
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// Register a new agent
    Add {
        /// Agent name
        name: String,
    },

    /// List registered agents
    List,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}
