//! YAML file storage backend
//!
//! Layout under the storage root:
//!
//! ```text
//! tickets/<id>.yaml   one file per ticket
//! agents.yaml         all agents
//! sequence.yaml       next free ticket and agent IDs
//! ```
//!
//! Each file is written to a temporary sibling and renamed into place, so a
//! reader never observes a half-written record.
//!
//! ID allocation is serialized within one process only. Two processes writing
//! the same directory (a CLI `new` next to a file-backed `serve`) can hand out
//! the same ID, so point them at separate storage paths.

use super::{AgentDirectory, AgentRepository, TicketRepository};
use crate::core::{Agent, AgentId, Ticket, TicketId, TicketQuery};
use crate::error::{Result, TicketDeskError};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Sequence {
    next_ticket_id: u64,
    next_agent_id: u64,
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            next_ticket_id: 1,
            next_agent_id: 1,
        }
    }
}

/// File-backed storage rooted at a directory
#[derive(Debug)]
pub struct FileStorage {
    base_dir: PathBuf,
    // Serializes ID allocation within this process
    sequence_lock: Mutex<()>,
}

impl Clone for FileStorage {
    fn clone(&self) -> Self {
        Self::new(&self.base_dir)
    }
}

impl FileStorage {
    /// Create a storage handle; nothing is touched on disk until first use
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            sequence_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn tickets_dir(&self) -> PathBuf {
        self.base_dir.join("tickets")
    }

    fn ticket_path(&self, id: TicketId) -> PathBuf {
        self.tickets_dir().join(format!("{id}.yaml"))
    }

    fn agents_path(&self) -> PathBuf {
        self.base_dir.join("agents.yaml")
    }

    fn sequence_path(&self) -> PathBuf {
        self.base_dir.join("sequence.yaml")
    }

    /// Create the storage directories if they do not exist
    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(self.tickets_dir())?;
        Ok(())
    }

    fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let content = serde_yaml::to_string(value)?;
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn update_sequence<F>(&self, f: F) -> Result<Sequence>
    where
        F: FnOnce(&mut Sequence),
    {
        let _guard = self
            .sequence_lock
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        self.ensure_directories()?;
        let mut sequence: Sequence = Self::read_yaml(&self.sequence_path())?.unwrap_or_default();
        let before = sequence;
        f(&mut sequence);
        if sequence != before {
            Self::write_yaml(&self.sequence_path(), &sequence)?;
        }
        Ok(before)
    }

    fn load_ticket_file(path: &Path) -> Result<Ticket> {
        Self::read_yaml(path)?.ok_or_else(|| {
            TicketDeskError::storage(format!("Ticket file vanished: {}", path.display()))
        })
    }

    /// Loads every stored ticket ordered by ID
    pub fn load_all_tickets(&self) -> Result<Vec<Ticket>> {
        let dir = self.tickets_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut tickets = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
                tickets.push(Self::load_ticket_file(&path)?);
            }
        }
        tickets.sort_by_key(|t| t.id);
        Ok(tickets)
    }

    fn load_agents(&self) -> Result<Vec<Agent>> {
        Ok(Self::read_yaml(&self.agents_path())?.unwrap_or_default())
    }
}

impl TicketRepository for FileStorage {
    fn save(&self, mut ticket: Ticket) -> Result<Ticket> {
        let id = match ticket.id {
            Some(id) => {
                self.update_sequence(|seq| {
                    seq.next_ticket_id = seq.next_ticket_id.max(id.value() + 1);
                })?;
                id
            },
            None => {
                let before = self.update_sequence(|seq| seq.next_ticket_id += 1)?;
                TicketId::new(before.next_ticket_id)
            },
        };
        ticket.id = Some(id);

        self.ensure_directories()?;
        Self::write_yaml(&self.ticket_path(id), &ticket)?;
        Ok(ticket)
    }

    fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
        Self::read_yaml(&self.ticket_path(id))
    }

    fn find_with_filters(&self, query: &TicketQuery) -> Result<Vec<Ticket>> {
        let tickets = self.load_all_tickets()?;
        Ok(tickets.into_iter().filter(|t| query.matches(t)).collect())
    }
}

impl AgentRepository for FileStorage {
    fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>> {
        Ok(self.load_agents()?.into_iter().find(|a| a.id == id))
    }
}

impl AgentDirectory for FileStorage {
    fn add_agent(&self, name: &str) -> Result<Agent> {
        let before = self.update_sequence(|seq| seq.next_agent_id += 1)?;
        let agent = Agent::new(before.next_agent_id, name);

        let mut agents = self.load_agents()?;
        agents.push(agent.clone());
        Self::write_yaml(&self.agents_path(), &agents)?;
        Ok(agent)
    }

    fn load_all_agents(&self) -> Result<Vec<Agent>> {
        let mut agents = self.load_agents()?;
        agents.sort_by_key(|a| a.id);
        Ok(agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Status, TicketBuilder};
    use tempfile::TempDir;

    fn storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("desk"));
        (temp_dir, storage)
    }

    #[test]
    fn test_save_and_load_roundtrip_keeps_fields() {
        let (_dir, storage) = storage();
        let ticket = TicketBuilder::new()
            .description("Laptop will not boot")
            .status(Status::InProgress)
            .assigned_agent(Agent::new(1, "Agent001"))
            .build();

        let saved = storage.save(ticket).expect("Failed to save ticket");
        let id = saved.id.expect("ID should be assigned");

        let loaded = TicketRepository::find_by_id(&storage, id)
            .expect("Failed to load ticket")
            .expect("Ticket should exist");
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_ids_survive_new_handles() {
        let (_dir, storage) = storage();
        storage
            .save(TicketBuilder::new().description("first").build())
            .unwrap();

        let reopened = FileStorage::new(storage.base_dir());
        let second = reopened
            .save(TicketBuilder::new().description("second").build())
            .unwrap();
        assert_eq!(second.id, Some(TicketId::new(2)));
    }

    #[test]
    fn test_updating_existing_ticket_leaves_sequence_alone() {
        let (_dir, storage) = storage();
        let mut ticket = storage
            .save(TicketBuilder::new().description("first").build())
            .unwrap();

        let sequence = storage.sequence_path();
        let pinned = std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_000);
        fs::File::options()
            .write(true)
            .open(&sequence)
            .unwrap()
            .set_modified(pinned)
            .unwrap();

        ticket.description = Some("edited".to_string());
        storage.save(ticket).unwrap();
        assert_eq!(fs::metadata(&sequence).unwrap().modified().unwrap(), pinned);

        storage
            .save(TicketBuilder::new().id(10).description("imported").build())
            .unwrap();
        let next = storage
            .save(TicketBuilder::new().description("after import").build())
            .unwrap();
        assert_eq!(next.id, Some(TicketId::new(11)));
    }

    #[test]
    fn test_missing_ticket_is_none() {
        let (_dir, storage) = storage();
        assert!(
            TicketRepository::find_by_id(&storage, TicketId::new(9))
                .unwrap()
                .is_none()
        );
        assert!(storage.load_all_tickets().unwrap().is_empty());
    }

    #[test]
    fn test_filtered_listing_is_ordered_by_id() {
        let (_dir, storage) = storage();
        for id in [12_u64, 3, 7] {
            storage
                .save(
                    TicketBuilder::new()
                        .id(id)
                        .description("x")
                        .status(Status::New)
                        .build(),
                )
                .unwrap();
        }
        storage
            .save(
                TicketBuilder::new()
                    .id(5)
                    .description("y")
                    .status(Status::Resolved)
                    .build(),
            )
            .unwrap();

        let query = TicketQuery::builder().statuses([Status::New]).build();
        let ids: Vec<u64> = storage
            .find_with_filters(&query)
            .unwrap()
            .into_iter()
            .filter_map(|t| t.id.map(TicketId::value))
            .collect();
        assert_eq!(ids, vec![3, 7, 12]);
    }

    #[test]
    fn test_agents_are_persisted() {
        let (_dir, storage) = storage();
        let alice = storage.add_agent("Alice").unwrap();
        let bob = storage.add_agent("Bob").unwrap();
        assert_ne!(alice.id, bob.id);

        let reopened = FileStorage::new(storage.base_dir());
        assert_eq!(
            AgentRepository::find_by_id(&reopened, bob.id).unwrap(),
            Some(bob)
        );
        assert_eq!(reopened.load_all_agents().unwrap().len(), 2);
    }
}
