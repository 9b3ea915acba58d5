//! Test utilities for ticket-desk
//!
//! Shared fixtures for the unit tests across the crate.

#![cfg(test)]

use crate::core::FixedClock;
use crate::service::TicketService;
use crate::storage::MemoryStorage;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

/// Service backed by a fresh in-memory store
pub type MemoryService = TicketService<Arc<MemoryStorage>, Arc<MemoryStorage>>;

/// Midnight on the given day
pub fn day(year: i32, month: u32, day: u32) -> NaiveDateTime {
    at(year, month, day, 0, 0)
}

/// The given day and time
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("Invalid test date")
}

/// Create a service over an in-memory store holding the named agents
///
/// The clock is fixed at 2023-01-01 00:00.
pub fn fixture_service(agents: &[&str]) -> (MemoryService, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::with_agents(agents));
    let service = TicketService::with_clock(
        storage.clone(),
        storage.clone(),
        Arc::new(FixedClock(day(2023, 1, 1))),
    );
    (service, storage)
}
