use super::{Agent, Status, Ticket, TicketId};
use chrono::{Local, NaiveDateTime};

/// Builder for creating Ticket instances
///
/// Bypasses lifecycle validation, so it is meant for fixtures and for
/// rehydrating records a store has already validated.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    description: Option<String>,
    status: Option<Status>,
    created_date: Option<NaiveDateTime>,
    resolution_summary: Option<String>,
    assigned_agent: Option<Agent>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub fn id(mut self, id: impl Into<TicketId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set `created_date`
    #[must_use]
    pub const fn created_date(mut self, created_date: NaiveDateTime) -> Self {
        self.created_date = Some(created_date);
        self
    }

    /// Set the resolution summary
    #[must_use]
    pub fn resolution_summary(mut self, summary: impl Into<String>) -> Self {
        self.resolution_summary = Some(summary.into());
        self
    }

    /// Set the assigned agent
    #[must_use]
    pub fn assigned_agent(mut self, agent: Agent) -> Self {
        self.assigned_agent = Some(agent);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        Ticket {
            id: self.id,
            description: self.description,
            status: self.status.unwrap_or_default(),
            created_date: self
                .created_date
                .unwrap_or_else(|| Local::now().naive_local()),
            closed_date: None,
            resolution_summary: self.resolution_summary,
            assigned_agent: self.assigned_agent,
        }
    }
}
