use crate::core::{Agent, AgentId, Ticket, TicketId, TicketQuery};
use crate::error::Result;
use std::sync::Arc;

/// Repository trait for ticket storage operations
///
/// This trait defines the interface the service persists tickets through,
/// allowing for different storage implementations.
#[cfg_attr(test, mockall::automock)]
pub trait TicketRepository: Send + Sync {
    /// Inserts or updates a ticket, assigning an ID on first save
    fn save(&self, ticket: Ticket) -> Result<Ticket>;

    /// Loads a ticket by ID
    fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Finds tickets matching every criterion of the query, ordered by ID
    fn find_with_filters(&self, query: &TicketQuery) -> Result<Vec<Ticket>>;
}

/// Read-only agent lookup
#[cfg_attr(test, mockall::automock)]
pub trait AgentRepository: Send + Sync {
    /// Loads an agent by ID
    fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>>;
}

/// Agent provisioning, used by administration commands only
pub trait AgentDirectory: AgentRepository {
    /// Registers a new agent under the next free ID
    fn add_agent(&self, name: &str) -> Result<Agent>;

    /// Loads all agents ordered by ID
    fn load_all_agents(&self) -> Result<Vec<Agent>>;

    /// Registers each name that is not yet known
    fn seed_agents(&self, names: &[String]) -> Result<Vec<Agent>> {
        let existing = self.load_all_agents()?;
        let mut added = Vec::new();
        for name in names {
            if !existing.iter().any(|a| &a.name == name) {
                added.push(self.add_agent(name)?);
            }
        }
        Ok(added)
    }
}

impl<T: TicketRepository + ?Sized> TicketRepository for Arc<T> {
    fn save(&self, ticket: Ticket) -> Result<Ticket> {
        (**self).save(ticket)
    }

    fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
        (**self).find_by_id(id)
    }

    fn find_with_filters(&self, query: &TicketQuery) -> Result<Vec<Ticket>> {
        (**self).find_with_filters(query)
    }
}

impl<T: AgentRepository + ?Sized> AgentRepository for Arc<T> {
    fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>> {
        (**self).find_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_seed_agents_skips_known_names() {
        let storage = MemoryStorage::new();
        storage.add_agent("Agent001").unwrap();

        let added = storage
            .seed_agents(&["Agent001".to_string(), "Agent002".to_string()])
            .unwrap();

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].name, "Agent002");
        assert_eq!(storage.load_all_agents().unwrap().len(), 2);
    }

    #[test]
    fn test_arc_forwards_to_inner_store() {
        let storage: Arc<dyn TicketRepository> = Arc::new(MemoryStorage::new());
        let saved = storage
            .save(crate::core::TicketBuilder::new().description("x").build())
            .unwrap();
        let id = saved.id.unwrap();
        assert_eq!(storage.find_by_id(id).unwrap(), Some(saved));
    }
}
