use crate::core::{Agent, Status, Ticket};
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Renders command results as colored text or JSON
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    #[must_use]
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {}", "✓".green(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    fn status_label(status: Status) -> String {
        let label = status.as_str();
        match status {
            Status::New => label.cyan().to_string(),
            Status::InProgress => label.yellow().to_string(),
            Status::Resolved => label.green().to_string(),
            Status::Closed => label.dimmed().to_string(),
        }
    }

    /// Prints one ticket in detail
    pub fn print_ticket(&self, ticket: &Ticket) -> Result<()> {
        if self.json {
            return self.print_json(ticket);
        }

        println!("{} {}", "Ticket".bold(), ticket.display_id().bold());
        println!("  Status:      {}", Self::status_label(ticket.status));
        println!(
            "  Description: {}",
            ticket.description.as_deref().unwrap_or("-")
        );
        println!(
            "  Created:     {}",
            ticket.created_date.format("%Y-%m-%d %H:%M")
        );
        if let Some(closed) = ticket.closed_date {
            println!("  Closed:      {}", closed.format("%Y-%m-%d %H:%M"));
        }
        println!("  Agent:       {}", ticket.agent_name().unwrap_or("-"));
        println!(
            "  Resolution:  {}",
            ticket.resolution_summary.as_deref().unwrap_or("-")
        );
        Ok(())
    }

    /// Prints tickets as a table, one per line
    pub fn print_tickets(&self, tickets: &[Ticket]) -> Result<()> {
        if self.json {
            return self.print_json(tickets);
        }

        if tickets.is_empty() {
            println!("No tickets found");
            return Ok(());
        }

        println!(
            "{:<6} {:<12} {:<17} {:<14} {}",
            "ID".bold(),
            "STATUS".bold(),
            "CREATED".bold(),
            "AGENT".bold(),
            "DESCRIPTION".bold()
        );
        for ticket in tickets {
            println!(
                "{:<6} {:<12} {:<17} {:<14} {}",
                ticket.display_id(),
                Self::status_label(ticket.status),
                ticket.created_date.format("%Y-%m-%d %H:%M"),
                ticket.agent_name().unwrap_or("-"),
                ticket.description.as_deref().unwrap_or("")
            );
        }
        println!("\n{} ticket(s)", tickets.len());
        Ok(())
    }

    pub fn print_agents(&self, agents: &[Agent]) -> Result<()> {
        if self.json {
            return self.print_json(agents);
        }

        if agents.is_empty() {
            println!("No agents registered");
            return Ok(());
        }
        for agent in agents {
            println!("{:<6} {}", agent.id, agent.name);
        }
        Ok(())
    }
}
