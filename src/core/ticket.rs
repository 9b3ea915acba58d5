use crate::error::TicketDeskError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned ticket identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u64);

impl TicketId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Parses an identifier from user input
    pub fn parse_str(s: &str) -> Result<Self, TicketDeskError> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TicketDeskError::InvalidInput(format!("Invalid ticket ID: {s}")))
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TicketId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Agent identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(u64);

impl AgentId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    pub fn parse_str(s: &str) -> Result<Self, TicketDeskError> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TicketDeskError::InvalidInput(format!("Invalid agent ID: {s}")))
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AgentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A support staff member tickets can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
}

impl Agent {
    pub fn new(id: impl Into<AgentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Lifecycle status of a ticket
///
/// Tickets only ever move forward through
/// `New -> InProgress -> Resolved -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    /// All statuses in lifecycle order
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Resolved, Self::Closed];

    /// Wire name used by the HTTP API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TicketDeskError;

    /// Accepts `IN_PROGRESS`, `in-progress` and `inprogress` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "new" => Ok(Self::New),
            "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(TicketDeskError::InvalidInput(format!(
                "Invalid status: '{s}'. Expected one of NEW, IN_PROGRESS, RESOLVED, CLOSED"
            ))),
        }
    }
}

/// A support ticket
///
/// `id` is `None` until the ticket has been saved for the first time.
/// `created_date` never changes after creation, and `assigned_agent` stays
/// empty while the ticket is [`Status::New`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TicketId>,
    pub description: Option<String>,
    pub status: Status,
    pub created_date: NaiveDateTime,
    #[serde(default)]
    pub closed_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub resolution_summary: Option<String>,
    #[serde(default)]
    pub assigned_agent: Option<Agent>,
}

impl Ticket {
    /// Name of the assigned agent, if any
    #[must_use]
    pub fn agent_name(&self) -> Option<&str> {
        self.assigned_agent.as_ref().map(|a| a.name.as_str())
    }

    /// Identifier for messages, `-` when unsaved
    #[must_use]
    pub fn display_id(&self) -> String {
        self.id.map_or_else(|| "-".to_string(), |id| id.to_string())
    }
}
