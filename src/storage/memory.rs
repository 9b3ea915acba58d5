use super::{AgentDirectory, AgentRepository, TicketRepository};
use crate::core::{Agent, AgentId, Ticket, TicketId, TicketQuery};
use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local storage backend
///
/// Records live in ordered maps, so listings come back in ascending ID order.
#[derive(Debug)]
pub struct MemoryStorage {
    tickets: RwLock<BTreeMap<TicketId, Ticket>>,
    agents: RwLock<BTreeMap<AgentId, Agent>>,
    next_ticket_id: AtomicU64,
    next_agent_id: AtomicU64,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tickets: RwLock::new(BTreeMap::new()),
            agents: RwLock::new(BTreeMap::new()),
            next_ticket_id: AtomicU64::new(1),
            next_agent_id: AtomicU64::new(1),
        }
    }

    /// Creates a store pre-populated with agents named in order
    #[must_use]
    pub fn with_agents<S: AsRef<str>>(names: &[S]) -> Self {
        let storage = Self::new();
        {
            let mut agents = storage.write_agents();
            for name in names {
                let id = AgentId::new(storage.next_agent_id.fetch_add(1, Ordering::SeqCst));
                agents.insert(id, Agent::new(id, name.as_ref()));
            }
        }
        storage
    }

    /// Number of stored tickets
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.read_tickets().len()
    }

    // A poisoned lock only means another thread panicked mid-call; the maps
    // themselves are never left half-written.
    fn read_tickets(&self) -> RwLockReadGuard<'_, BTreeMap<TicketId, Ticket>> {
        self.tickets.read().unwrap_or_else(|err| err.into_inner())
    }

    fn write_tickets(&self) -> RwLockWriteGuard<'_, BTreeMap<TicketId, Ticket>> {
        self.tickets.write().unwrap_or_else(|err| err.into_inner())
    }

    fn read_agents(&self) -> RwLockReadGuard<'_, BTreeMap<AgentId, Agent>> {
        self.agents.read().unwrap_or_else(|err| err.into_inner())
    }

    fn write_agents(&self) -> RwLockWriteGuard<'_, BTreeMap<AgentId, Agent>> {
        self.agents.write().unwrap_or_else(|err| err.into_inner())
    }
}

impl TicketRepository for MemoryStorage {
    fn save(&self, mut ticket: Ticket) -> Result<Ticket> {
        let id = match ticket.id {
            Some(id) => {
                self.next_ticket_id.fetch_max(id.value() + 1, Ordering::SeqCst);
                id
            },
            None => TicketId::new(self.next_ticket_id.fetch_add(1, Ordering::SeqCst)),
        };
        ticket.id = Some(id);
        self.write_tickets().insert(id, ticket.clone());
        Ok(ticket)
    }

    fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
        Ok(self.read_tickets().get(&id).cloned())
    }

    fn find_with_filters(&self, query: &TicketQuery) -> Result<Vec<Ticket>> {
        Ok(self
            .read_tickets()
            .values()
            .filter(|t| query.matches(t))
            .cloned()
            .collect())
    }
}

impl AgentRepository for MemoryStorage {
    fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>> {
        Ok(self.read_agents().get(&id).cloned())
    }
}

impl AgentDirectory for MemoryStorage {
    fn add_agent(&self, name: &str) -> Result<Agent> {
        let id = AgentId::new(self.next_agent_id.fetch_add(1, Ordering::SeqCst));
        let agent = Agent::new(id, name);
        self.write_agents().insert(id, agent.clone());
        Ok(agent)
    }

    fn load_all_agents(&self) -> Result<Vec<Agent>> {
        Ok(self.read_agents().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Status, TicketBuilder};

    #[test]
    fn test_save_assigns_sequential_ids() {
        let storage = MemoryStorage::new();
        let first = storage
            .save(TicketBuilder::new().description("a").build())
            .unwrap();
        let second = storage
            .save(TicketBuilder::new().description("b").build())
            .unwrap();

        assert_eq!(first.id, Some(TicketId::new(1)));
        assert_eq!(second.id, Some(TicketId::new(2)));
        assert_eq!(storage.ticket_count(), 2);
    }

    #[test]
    fn test_save_with_id_overwrites() {
        let storage = MemoryStorage::new();
        let mut ticket = storage
            .save(TicketBuilder::new().description("a").build())
            .unwrap();
        ticket.status = Status::InProgress;
        storage.save(ticket.clone()).unwrap();

        let loaded = TicketRepository::find_by_id(&storage, TicketId::new(1)).unwrap();
        assert_eq!(loaded, Some(ticket));
        assert_eq!(storage.ticket_count(), 1);
    }

    #[test]
    fn test_listing_is_ordered_by_id() {
        let storage = MemoryStorage::new();
        for i in (1..=5).rev() {
            storage
                .save(TicketBuilder::new().id(i).description("x").build())
                .unwrap();
        }
        let ids: Vec<u64> = storage
            .find_with_filters(&TicketQuery::all())
            .unwrap()
            .into_iter()
            .filter_map(|t| t.id.map(TicketId::value))
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_with_agents() {
        let storage = MemoryStorage::with_agents(&["Agent001", "Agent002"]);
        let agent = AgentRepository::find_by_id(&storage, AgentId::new(2)).unwrap();
        assert_eq!(agent.map(|a| a.name), Some("Agent002".to_string()));
        assert!(
            AgentRepository::find_by_id(&storage, AgentId::new(3))
                .unwrap()
                .is_none()
        );
    }
}
