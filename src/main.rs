//! ticket-desk - support ticket tracking backend
//!
//! This is the main entry point for the ticket-desk binary. It parses the
//! command line, sets up logging and dispatches to the command handlers.

use clap::Parser;
use std::path::Path;
use std::process;
use ticket_desk::cli::handlers::{
    EditParams, ListOptions, handle_agent_add, handle_agent_list, handle_assign_command,
    handle_close_command, handle_config_show, handle_edit_command, handle_list_command,
    handle_new_command, handle_resolve_command, handle_show_command,
};
use ticket_desk::cli::{AgentCommands, Cli, Commands, ConfigCommands, OutputFormatter};
use ticket_desk::config::Config;
use ticket_desk::error::{Result, TicketDeskError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    init_logging(cli.verbose, cli.config.as_deref());

    if let Err(e) = dispatch_command(cli.command, cli.config.as_deref(), &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Set up the tracing subscriber
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` wins over the
/// configured `log.level`.
fn init_logging(verbose: bool, config_path: Option<&Path>) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = Config::load(config_path)
                .map(|c| c.log.level)
                .unwrap_or_else(|_| "info".to_string());
            EnvFilter::new(level)
        })
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch_command(
    command: Commands,
    config: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        #[cfg(feature = "api")]
        Commands::Serve { host, port } => {
            ticket_desk::cli::handlers::handle_serve_command(host, port, config)
        },
        Commands::New { description } => handle_new_command(description, config, formatter),
        Commands::Assign { ticket, agent } => {
            handle_assign_command(&ticket, &agent, config, formatter)
        },
        Commands::Resolve { ticket } => handle_resolve_command(&ticket, config, formatter),
        Commands::Close { ticket } => handle_close_command(&ticket, config, formatter),
        Commands::Edit {
            ticket,
            description,
            summary,
            clear_summary,
        } => handle_edit_command(
            EditParams {
                ticket,
                description,
                summary,
                clear_summary,
            },
            config,
            formatter,
        ),
        Commands::Show { ticket } => handle_show_command(&ticket, config, formatter),
        Commands::List {
            status,
            since,
            until,
            agent,
        } => handle_list_command(
            ListOptions {
                status,
                since,
                until,
                agent,
            },
            config,
            formatter,
        ),
        Commands::Agent { command } => match command {
            AgentCommands::Add { name } => handle_agent_add(&name, config, formatter),
            AgentCommands::List => handle_agent_list(config, formatter),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => handle_config_show(config, formatter),
        },
    }
}

/// Display an error to the user, with a hint when one applies
fn handle_error(error: &TicketDeskError, formatter: &OutputFormatter) {
    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "code": error.code(),
            "error": error.to_string(),
        }));
        return;
    }

    formatter.error(&error.to_string());
    if let Some(hint) = error.suggestion() {
        eprintln!("  hint: {hint}");
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
