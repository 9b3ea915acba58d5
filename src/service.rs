//! Ticket service
//!
//! The single entry point both the HTTP API and the CLI drive. Every
//! operation loads at most one ticket, applies one lifecycle rule and writes
//! at most once; a failed rule returns before anything is written.

use crate::core::{AgentId, Clock, SystemClock, Ticket, TicketFilter, TicketId};
use crate::error::{Result, TicketDeskError};
use crate::storage::{AgentRepository, TicketRepository};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Service over dynamically chosen stores, as used by the server and CLI
pub type SharedTicketService =
    TicketService<Arc<dyn TicketRepository>, Arc<dyn AgentRepository>>;

pub struct TicketService<T, A> {
    tickets: T,
    agents: A,
    clock: Arc<dyn Clock>,
}

impl<T, A> TicketService<T, A>
where
    T: TicketRepository,
    A: AgentRepository,
{
    /// Create a service using the system clock
    pub fn new(tickets: T, agents: A) -> Self {
        Self::with_clock(tickets, agents, Arc::new(SystemClock))
    }

    pub fn with_clock(tickets: T, agents: A, clock: Arc<dyn Clock>) -> Self {
        Self {
            tickets,
            agents,
            clock,
        }
    }

    /// Opens a ticket with the given description
    pub fn create(&self, description: Option<String>) -> Result<Ticket> {
        let ticket = Ticket::open(description, self.clock.now())?;
        let saved = self.tickets.save(ticket)?;
        info!("Ticket {} created", saved.display_id());
        Ok(saved)
    }

    /// Assigns an agent to a new ticket, moving it into progress
    pub fn assign_agent(&self, ticket_id: TicketId, agent_id: AgentId) -> Result<Ticket> {
        let mut ticket = self.get_ticket(ticket_id)?;
        ticket
            .assign_with(|| {
                self.agents
                    .find_by_id(agent_id)?
                    .ok_or_else(|| TicketDeskError::AgentNotFound {
                        id: agent_id.to_string(),
                    })
            })
            .inspect_err(|e| warn!("Assigning agent {agent_id} to ticket {ticket_id} rejected: {e}"))?;

        let saved = self.tickets.save(ticket)?;
        info!("Ticket {ticket_id} assigned to agent {agent_id}");
        Ok(saved)
    }

    pub fn resolve(&self, ticket_id: TicketId) -> Result<Ticket> {
        let mut ticket = self.get_ticket(ticket_id)?;
        ticket
            .resolve()
            .inspect_err(|e| warn!("Resolving ticket {ticket_id} rejected: {e}"))?;

        let saved = self.tickets.save(ticket)?;
        info!("Ticket {ticket_id} resolved");
        Ok(saved)
    }

    pub fn close(&self, ticket_id: TicketId) -> Result<Ticket> {
        let mut ticket = self.get_ticket(ticket_id)?;
        ticket
            .close()
            .inspect_err(|e| warn!("Closing ticket {ticket_id} rejected: {e}"))?;

        let saved = self.tickets.save(ticket)?;
        info!("Ticket {ticket_id} closed");
        Ok(saved)
    }

    /// Overwrites description and resolution summary of an open ticket
    pub fn update(
        &self,
        ticket_id: TicketId,
        description: Option<String>,
        resolution_summary: Option<String>,
    ) -> Result<Ticket> {
        let mut ticket = self.get_ticket(ticket_id)?;
        ticket
            .update_content(description, resolution_summary)
            .inspect_err(|e| warn!("Updating ticket {ticket_id} rejected: {e}"))?;

        let saved = self.tickets.save(ticket)?;
        info!("Ticket {ticket_id} updated");
        Ok(saved)
    }

    pub fn get_by_id(&self, ticket_id: TicketId) -> Result<Ticket> {
        self.get_ticket(ticket_id)
    }

    /// Lists tickets matching the filter, in store order
    pub fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let query = filter.to_query()?;
        debug!("Listing tickets where {query}");
        self.tickets.find_with_filters(&query)
    }

    fn get_ticket(&self, ticket_id: TicketId) -> Result<Ticket> {
        debug!("Loading ticket {ticket_id}");
        self.tickets
            .find_by_id(ticket_id)?
            .ok_or_else(|| TicketDeskError::TicketNotFound {
                id: ticket_id.to_string(),
            })
    }
}
