//! Lifecycle command handlers

use super::common::{HandlerContext, parse_agent_ref, parse_ticket_ref};
use crate::cli::output::OutputFormatter;
use crate::core::Ticket;
use crate::error::Result;
use std::path::Path;

fn report(ticket: &Ticket, message: &str, output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        return output.print_ticket(ticket);
    }
    output.success(message);
    output.print_ticket(ticket)
}

/// Handle the `new` command
pub fn handle_new_command(
    description: String,
    config_path: Option<&Path>,
    output: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    let ticket = ctx.service().create(Some(description))?;
    report(
        &ticket,
        &format!("Created ticket {}", ticket.display_id()),
        output,
    )
}

/// Handle the `assign` command
pub fn handle_assign_command(
    ticket_ref: &str,
    agent_ref: &str,
    config_path: Option<&Path>,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket_id = parse_ticket_ref(ticket_ref)?;
    let agent_id = parse_agent_ref(agent_ref)?;
    let ctx = HandlerContext::new(config_path)?;

    let ticket = ctx.service().assign_agent(ticket_id, agent_id)?;
    report(
        &ticket,
        &format!(
            "Assigned ticket {ticket_id} to {}",
            ticket.agent_name().unwrap_or("agent")
        ),
        output,
    )
}

/// Handle the `resolve` command
pub fn handle_resolve_command(
    ticket_ref: &str,
    config_path: Option<&Path>,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket_id = parse_ticket_ref(ticket_ref)?;
    let ctx = HandlerContext::new(config_path)?;
    let ticket = ctx.service().resolve(ticket_id)?;
    report(&ticket, &format!("Resolved ticket {ticket_id}"), output)
}

/// Handle the `close` command
pub fn handle_close_command(
    ticket_ref: &str,
    config_path: Option<&Path>,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket_id = parse_ticket_ref(ticket_ref)?;
    let ctx = HandlerContext::new(config_path)?;
    let ticket = ctx.service().close(ticket_id)?;
    report(&ticket, &format!("Closed ticket {ticket_id}"), output)
}

/// Parameters for the `edit` command
pub struct EditParams {
    pub ticket: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub clear_summary: bool,
}

/// Handle the `edit` command
///
/// The service replaces both fields on every update, so flags left out keep
/// the ticket's current value.
pub fn handle_edit_command(
    params: EditParams,
    config_path: Option<&Path>,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket_id = parse_ticket_ref(&params.ticket)?;
    let ctx = HandlerContext::new(config_path)?;
    let service = ctx.service();
    let current = service.get_by_id(ticket_id)?;

    let description = params.description.or(current.description);
    let summary = if params.clear_summary {
        None
    } else {
        params.summary.or(current.resolution_summary)
    };

    let ticket = service.update(ticket_id, description, summary)?;
    report(&ticket, &format!("Updated ticket {ticket_id}"), output)
}

/// Handle the `show` command
pub fn handle_show_command(
    ticket_ref: &str,
    config_path: Option<&Path>,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket_id = parse_ticket_ref(ticket_ref)?;
    let ctx = HandlerContext::new(config_path)?;
    let ticket = ctx.service().get_by_id(ticket_id)?;
    output.print_ticket(&ticket)
}
