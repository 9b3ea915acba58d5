//! Ticket domain: data model, lifecycle rules and query composition

mod builders;
mod clock;
mod lifecycle;
mod query;
mod ticket;

pub use builders::TicketBuilder;
pub use clock::{Clock, FixedClock, SystemClock};
pub use lifecycle::{
    CLOSED_CANNOT_BE_UPDATED, ONLY_IN_PROGRESS_CAN_BE_RESOLVED, ONLY_NEW_CAN_BE_ASSIGNED,
    ONLY_RESOLVED_CAN_BE_CLOSED,
};
pub use query::{
    Criterion, TicketField, TicketFilter, TicketQuery, TicketQueryBuilder, parse_end_date,
    parse_start_date,
};
pub use ticket::{Agent, AgentId, Status, Ticket, TicketId};
