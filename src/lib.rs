//! ticket-desk - a support ticket tracking backend
//!
//! Tickets move through a fixed lifecycle:
//!
//! ```text
//! New -> InProgress -> Resolved -> Closed
//! ```
//!
//! Agents are assigned while a ticket is new, a resolution summary is
//! required before closing, and closed tickets are frozen. Tickets can be
//! listed with any combination of status, creation-date and agent filters.
//!
//! The crate provides:
//! - [`core`]: the ticket model, lifecycle rules and query composition
//! - [`storage`]: in-memory and YAML file backends behind repository traits
//! - [`service`]: the [`TicketService`](service::TicketService) every front end drives
//! - `api`: an axum REST API (feature `api`, enabled by default)
//! - [`cli`]: the `ticket-desk` command line
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ticket_desk::core::{AgentId, Status, TicketFilter};
//! use ticket_desk::service::TicketService;
//! use ticket_desk::storage::MemoryStorage;
//!
//! let storage = Arc::new(MemoryStorage::with_agents(&["Agent001"]));
//! let service = TicketService::new(storage.clone(), storage);
//!
//! let ticket = service.create(Some("Printer jammed".to_string()))?;
//! let id = ticket.id.expect("saved tickets have an ID");
//! let ticket = service.assign_agent(id, AgentId::new(1))?;
//! assert_eq!(ticket.status, Status::InProgress);
//!
//! let open = service.list(&TicketFilter {
//!     statuses: vec![Status::InProgress],
//!     ..TicketFilter::default()
//! })?;
//! assert_eq!(open.len(), 1);
//! # Ok::<(), ticket_desk::TicketDeskError>(())
//! ```

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod service;
pub mod storage;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, TicketDeskError};
