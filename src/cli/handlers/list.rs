use super::common::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::core::{Status, TicketFilter, parse_end_date, parse_start_date};
use crate::error::Result;
use std::path::Path;

/// Options accepted by the `list` command
#[derive(Debug, Default)]
pub struct ListOptions {
    pub status: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub agent: Option<String>,
}

impl ListOptions {
    /// Parse the raw command-line values into a filter
    pub fn into_filter(self) -> Result<TicketFilter> {
        let statuses = self
            .status
            .as_deref()
            .map(|list| {
                list.split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(str::parse::<Status>)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(TicketFilter {
            statuses,
            start_date: self.since.as_deref().map(parse_start_date).transpose()?,
            end_date: self.until.as_deref().map(parse_end_date).transpose()?,
            assigned_agent: self.agent,
        })
    }
}

/// Handle the `list` command
pub fn handle_list_command(
    options: ListOptions,
    config_path: Option<&Path>,
    output: &OutputFormatter,
) -> Result<()> {
    let filter = options.into_filter()?;
    let ctx = HandlerContext::new(config_path)?;
    let tickets = ctx.service().list(&filter)?;
    output.print_tickets(&tickets)
}
