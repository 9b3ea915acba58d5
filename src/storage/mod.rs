//! Storage backends for tickets and agents

mod file;
mod memory;
mod repository;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use repository::{AgentDirectory, AgentRepository, TicketRepository};

#[cfg(test)]
pub use repository::{MockAgentRepository, MockTicketRepository};

use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use std::sync::Arc;

/// Handles onto one opened backend
#[derive(Clone)]
pub struct Stores {
    pub tickets: Arc<dyn TicketRepository>,
    pub agents: Arc<dyn AgentRepository>,
    pub directory: Arc<dyn AgentDirectory>,
}

impl Stores {
    fn from_backend<S>(storage: S) -> Self
    where
        S: TicketRepository + AgentDirectory + 'static,
    {
        let storage = Arc::new(storage);
        Self {
            tickets: storage.clone(),
            agents: storage.clone(),
            directory: storage,
        }
    }

    /// Opens the configured backend and registers the configured agents
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let stores = match config.backend {
            StorageBackend::Memory => Self::from_backend(MemoryStorage::new()),
            StorageBackend::File => {
                let storage = FileStorage::new(&config.path);
                storage.ensure_directories()?;
                Self::from_backend(storage)
            },
        };

        let added = stores.directory.seed_agents(&config.agents)?;
        if !added.is_empty() {
            tracing::info!("Registered {} agent(s) from configuration", added.len());
        }
        Ok(stores)
    }
}
