//! Error types for ticket-desk
//!
//! Every failure the service can report is a variant of [`TicketDeskError`].
//! Domain variants describe rejected requests and are never retried; the
//! remaining variants wrap infrastructure failures from storage or configuration.

use thiserror::Error;

/// Main error type for ticket-desk operations
#[derive(Error, Debug)]
pub enum TicketDeskError {
    /// Ticket creation was attempted without a description
    #[error("Description is required")]
    MissingDescription,

    /// Closing was attempted without a resolution summary
    #[error("Resolution summary is required to close a ticket")]
    MissingResolutionSummary,

    /// The requested transition is not legal from the ticket's current status
    #[error("{reason}")]
    InvalidTicketState { reason: String },

    /// The list filter's end date precedes its start date
    #[error("End date cannot be before start date")]
    InvalidDateRange,

    /// Ticket not found
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    /// Agent not found
    #[error("Agent not found: {id}")]
    AgentNotFound { id: String },

    /// Malformed input from a caller (unparseable id, status or date)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TicketDeskError {
    /// Builds an [`TicketDeskError::InvalidTicketState`] with the given reason
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidTicketState {
            reason: reason.into(),
        }
    }

    /// Builds a [`TicketDeskError::Storage`] error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Stable machine-readable identifier for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::MissingResolutionSummary => "MISSING_RESOLUTION_SUMMARY",
            Self::InvalidTicketState { .. } => "INVALID_TICKET_STATE",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::TicketNotFound { .. } => "TICKET_NOT_FOUND",
            Self::AgentNotFound { .. } => "AGENT_NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) | Self::Json(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether this error reports a missing ticket
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TicketNotFound { .. })
    }

    /// Whether this error is a rejected request rather than an infrastructure failure
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::MissingDescription
                | Self::MissingResolutionSummary
                | Self::InvalidTicketState { .. }
                | Self::InvalidDateRange
                | Self::TicketNotFound { .. }
                | Self::AgentNotFound { .. }
                | Self::InvalidInput(_)
        )
    }

    /// Returns a hint for the CLI user, if one applies
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingResolutionSummary => {
                Some("Add one with 'ticket-desk edit <ticket> --summary <text>'")
            },
            Self::AgentNotFound { .. } => Some("List known agents with 'ticket-desk agent list'"),
            Self::InvalidDateRange => Some("Swap --since and --until"),
            _ => None,
        }
    }
}

/// Result type alias for ticket-desk operations
pub type Result<T> = std::result::Result<T, TicketDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_classified() {
        assert!(TicketDeskError::MissingDescription.is_domain());
        assert!(TicketDeskError::InvalidDateRange.is_domain());
        assert!(!TicketDeskError::storage("disk full").is_domain());
    }

    #[test]
    fn test_not_found_only_for_tickets() {
        let ticket = TicketDeskError::TicketNotFound { id: "7".into() };
        let agent = TicketDeskError::AgentNotFound { id: "7".into() };
        assert!(ticket.is_not_found());
        assert!(!agent.is_not_found());
        assert_eq!(agent.code(), "AGENT_NOT_FOUND");
    }

    #[test]
    fn test_invalid_state_displays_reason() {
        let err = TicketDeskError::invalid_state("Only resolved tickets can be closed");
        assert_eq!(err.to_string(), "Only resolved tickets can be closed");
    }
}
