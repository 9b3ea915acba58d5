//! Ticket lifecycle rules
//!
//! Each edge of the `New -> InProgress -> Resolved -> Closed` chain has exactly
//! one transition function on [`Status`]. The [`Ticket`] methods layer the
//! field rules on top and never mutate the ticket when a check fails.

use super::{Agent, Status, Ticket};
use crate::error::{Result, TicketDeskError};
use chrono::NaiveDateTime;

pub const ONLY_NEW_CAN_BE_ASSIGNED: &str = "Only new tickets can be assigned to an agent";
pub const ONLY_IN_PROGRESS_CAN_BE_RESOLVED: &str = "Only tickets in progress can be resolved";
pub const ONLY_RESOLVED_CAN_BE_CLOSED: &str = "Only resolved tickets can be closed";
pub const CLOSED_CANNOT_BE_UPDATED: &str = "Closed tickets cannot be updated";

impl Status {
    /// `New -> InProgress`
    pub fn assign(self) -> Result<Self> {
        match self {
            Self::New => Ok(Self::InProgress),
            Self::InProgress | Self::Resolved | Self::Closed => {
                Err(TicketDeskError::invalid_state(ONLY_NEW_CAN_BE_ASSIGNED))
            },
        }
    }

    /// `InProgress -> Resolved`
    pub fn resolve(self) -> Result<Self> {
        match self {
            Self::InProgress => Ok(Self::Resolved),
            Self::New | Self::Resolved | Self::Closed => {
                Err(TicketDeskError::invalid_state(ONLY_IN_PROGRESS_CAN_BE_RESOLVED))
            },
        }
    }

    /// `Resolved -> Closed`
    pub fn close(self) -> Result<Self> {
        match self {
            Self::Resolved => Ok(Self::Closed),
            Self::New | Self::InProgress | Self::Closed => {
                Err(TicketDeskError::invalid_state(ONLY_RESOLVED_CAN_BE_CLOSED))
            },
        }
    }

    /// Content edits are allowed in every state except the terminal one
    pub fn ensure_editable(self) -> Result<()> {
        if self.is_terminal() {
            return Err(TicketDeskError::invalid_state(CLOSED_CANNOT_BE_UPDATED));
        }
        Ok(())
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

impl Ticket {
    /// Opens a new, unsaved ticket
    pub fn open(description: Option<String>, now: NaiveDateTime) -> Result<Self> {
        if !has_text(description.as_deref()) {
            return Err(TicketDeskError::MissingDescription);
        }

        Ok(Self {
            id: None,
            description,
            status: Status::New,
            created_date: now,
            closed_date: None,
            resolution_summary: None,
            assigned_agent: None,
        })
    }

    /// Assigns the agent produced by `resolve_agent` and starts progress
    ///
    /// The status is checked before `resolve_agent` runs, so a ticket in the
    /// wrong state reports `InvalidTicketState` even for an unknown agent.
    pub fn assign_with<F>(&mut self, resolve_agent: F) -> Result<()>
    where
        F: FnOnce() -> Result<Agent>,
    {
        let next = self.status.assign()?;
        let agent = resolve_agent()?;
        self.status = next;
        self.assigned_agent = Some(agent);
        Ok(())
    }

    pub fn resolve(&mut self) -> Result<()> {
        self.status = self.status.resolve()?;
        Ok(())
    }

    /// Closes a resolved ticket that carries a resolution summary
    ///
    /// `closed_date` is left untouched.
    pub fn close(&mut self) -> Result<()> {
        let next = self.status.close()?;
        if !has_text(self.resolution_summary.as_deref()) {
            return Err(TicketDeskError::MissingResolutionSummary);
        }
        self.status = next;
        Ok(())
    }

    /// Replaces description and resolution summary, including with `None`
    pub fn update_content(
        &mut self,
        description: Option<String>,
        resolution_summary: Option<String>,
    ) -> Result<()> {
        self.status.ensure_editable()?;
        self.description = description;
        self.resolution_summary = resolution_summary;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AgentId, TicketBuilder};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn ticket_in(status: Status) -> Ticket {
        TicketBuilder::new()
            .id(1)
            .description("Printer on fire")
            .status(status)
            .created_date(now())
            .build()
    }

    fn agent() -> Agent {
        Agent::new(7, "Agent007")
    }

    #[test]
    fn test_open_sets_initial_state() {
        let ticket = Ticket::open(Some("Cannot log in".into()), now()).unwrap();
        assert_eq!(ticket.status, Status::New);
        assert_eq!(ticket.created_date, now());
        assert!(ticket.id.is_none());
        assert!(ticket.assigned_agent.is_none());
        assert!(ticket.closed_date.is_none());
        assert!(ticket.resolution_summary.is_none());
    }

    #[test]
    fn test_open_requires_description() {
        assert!(matches!(
            Ticket::open(None, now()),
            Err(TicketDeskError::MissingDescription)
        ));
        assert!(matches!(
            Ticket::open(Some(String::new()), now()),
            Err(TicketDeskError::MissingDescription)
        ));
    }

    #[test]
    fn test_only_forward_single_steps_are_legal() {
        type Edge = fn(Status) -> Result<Status>;
        let edges: [(Edge, Status, Status); 3] = [
            (Status::assign, Status::New, Status::InProgress),
            (Status::resolve, Status::InProgress, Status::Resolved),
            (Status::close, Status::Resolved, Status::Closed),
        ];

        for (edge, from, to) in edges {
            for status in Status::ALL {
                let result = edge(status);
                if status == from {
                    assert_eq!(result.unwrap(), to);
                } else {
                    assert!(
                        matches!(result, Err(TicketDeskError::InvalidTicketState { .. })),
                        "{status} should not move to {to}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_assign_sets_agent_and_progress() {
        let mut ticket = ticket_in(Status::New);
        ticket.assign_with(|| Ok(agent())).unwrap();
        assert_eq!(ticket.status, Status::InProgress);
        assert_eq!(ticket.assigned_agent, Some(agent()));
        assert_eq!(ticket.description.as_deref(), Some("Printer on fire"));
    }

    #[test]
    fn test_assign_checks_status_before_agent_lookup() {
        let mut ticket = ticket_in(Status::Resolved);
        let result = ticket.assign_with(|| {
            Err(TicketDeskError::AgentNotFound {
                id: AgentId::new(99).to_string(),
            })
        });
        assert!(matches!(
            result,
            Err(TicketDeskError::InvalidTicketState { .. })
        ));
    }

    #[test]
    fn test_assign_unknown_agent_leaves_ticket_new() {
        let mut ticket = ticket_in(Status::New);
        let result = ticket.assign_with(|| Err(TicketDeskError::AgentNotFound { id: "99".into() }));
        assert!(matches!(result, Err(TicketDeskError::AgentNotFound { .. })));
        assert_eq!(ticket.status, Status::New);
        assert!(ticket.assigned_agent.is_none());
    }

    #[test]
    fn test_close_checks_status_before_summary() {
        let mut ticket = ticket_in(Status::InProgress);
        assert!(matches!(
            ticket.close(),
            Err(TicketDeskError::InvalidTicketState { .. })
        ));
    }

    #[test]
    fn test_close_requires_summary() {
        let mut ticket = ticket_in(Status::Resolved);
        assert!(matches!(
            ticket.close(),
            Err(TicketDeskError::MissingResolutionSummary)
        ));

        ticket.resolution_summary = Some(String::new());
        assert!(matches!(
            ticket.close(),
            Err(TicketDeskError::MissingResolutionSummary)
        ));
        assert_eq!(ticket.status, Status::Resolved);
    }

    #[test]
    fn test_close_does_not_stamp_closed_date() {
        let mut ticket = ticket_in(Status::Resolved);
        ticket.resolution_summary = Some("Replaced toner".into());
        ticket.close().unwrap();
        assert_eq!(ticket.status, Status::Closed);
        assert!(ticket.closed_date.is_none());
    }

    #[test]
    fn test_summary_set_while_new_still_counts_at_close() {
        let mut ticket = ticket_in(Status::New);
        ticket
            .update_content(ticket.description.clone(), Some("Known issue".into()))
            .unwrap();
        ticket.assign_with(|| Ok(agent())).unwrap();
        ticket.resolve().unwrap();
        ticket.close().unwrap();
        assert_eq!(ticket.status, Status::Closed);
    }

    #[test]
    fn test_update_overwrites_with_none() {
        let mut ticket = ticket_in(Status::InProgress);
        ticket.resolution_summary = Some("old".into());
        ticket.update_content(None, None).unwrap();
        assert!(ticket.description.is_none());
        assert!(ticket.resolution_summary.is_none());
        assert_eq!(ticket.status, Status::InProgress);
    }

    #[test]
    fn test_update_rejected_when_closed() {
        let mut ticket = ticket_in(Status::Closed);
        let before = ticket.clone();
        assert!(matches!(
            ticket.update_content(Some("new".into()), None),
            Err(TicketDeskError::InvalidTicketState { .. })
        ));
        assert_eq!(ticket, before);
    }
}
