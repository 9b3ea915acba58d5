use crate::config::{Config, StorageBackend, StorageConfig};
use crate::core::{AgentId, TicketId};
use crate::error::Result;
use crate::service::{SharedTicketService, TicketService};
use crate::storage::Stores;
use std::path::Path;

/// Common context for all handler operations
pub struct HandlerContext {
    pub stores: Stores,
}

impl HandlerContext {
    /// Load configuration and open the file store it points at
    ///
    /// CLI commands run in a fresh process each time, so the memory backend
    /// would discard every change; the file backend is always used here.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let storage = StorageConfig {
            backend: StorageBackend::File,
            ..config.storage
        };
        Ok(Self {
            stores: Stores::open(&storage)?,
        })
    }

    /// Create the ticket service over this context's stores
    #[must_use]
    pub fn service(&self) -> SharedTicketService {
        TicketService::new(self.stores.tickets.clone(), self.stores.agents.clone())
    }
}

/// Parse a ticket reference given on the command line
pub fn parse_ticket_ref(ticket_ref: &str) -> Result<TicketId> {
    TicketId::parse_str(ticket_ref)
}

/// Parse an agent reference given on the command line
pub fn parse_agent_ref(agent_ref: &str) -> Result<AgentId> {
    AgentId::parse_str(agent_ref)
}
