//! Filtered ticket queries
//!
//! A [`TicketFilter`] is what callers ask for; a [`TicketQuery`] is the
//! validated conjunction of [`Criterion`] values a store evaluates. Absent
//! filters add no criterion, so an empty query matches every ticket.

use super::{Status, Ticket};
use crate::error::{Result, TicketDeskError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Ticket attribute a criterion reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    Status,
    CreatedDate,
    AgentName,
}

impl TicketField {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::CreatedDate => "created_date",
            Self::AgentName => "assigned_agent.name",
        }
    }
}

/// A single typed condition on a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    StatusIn(Vec<Status>),
    /// Inclusive on both ends
    CreatedBetween(NaiveDateTime, NaiveDateTime),
    CreatedFrom(NaiveDateTime),
    CreatedUntil(NaiveDateTime),
    /// Exact name match; unassigned tickets never match
    AgentNamed(String),
}

impl Criterion {
    #[must_use]
    pub const fn field(&self) -> TicketField {
        match self {
            Self::StatusIn(_) => TicketField::Status,
            Self::CreatedBetween(..) | Self::CreatedFrom(_) | Self::CreatedUntil(_) => {
                TicketField::CreatedDate
            },
            Self::AgentNamed(_) => TicketField::AgentName,
        }
    }

    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            Self::StatusIn(statuses) => statuses.contains(&ticket.status),
            Self::CreatedBetween(start, end) => {
                ticket.created_date >= *start && ticket.created_date <= *end
            },
            Self::CreatedFrom(start) => ticket.created_date >= *start,
            Self::CreatedUntil(end) => ticket.created_date <= *end,
            Self::AgentNamed(name) => ticket.agent_name() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field().name();
        match self {
            Self::StatusIn(statuses) => {
                let names: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
                write!(f, "{field} in [{}]", names.join(", "))
            },
            Self::CreatedBetween(start, end) => write!(f, "{field} between {start} and {end}"),
            Self::CreatedFrom(start) => write!(f, "{field} >= {start}"),
            Self::CreatedUntil(end) => write!(f, "{field} <= {end}"),
            Self::AgentNamed(name) => write!(f, "{field} = '{name}'"),
        }
    }
}

/// Conjunction of criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketQuery {
    criteria: Vec<Criterion>,
}

impl TicketQuery {
    /// Query that matches every ticket
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> TicketQueryBuilder {
        TicketQueryBuilder::default()
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.criteria.is_empty()
    }

    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.criteria.iter().all(|c| c.matches(ticket))
    }
}

impl fmt::Display for TicketQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.criteria.is_empty() {
            return f.write_str("all tickets");
        }
        let parts: Vec<String> = self.criteria.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" AND "))
    }
}

/// Accumulates optional criteria into a [`TicketQuery`]
#[derive(Debug, Default)]
pub struct TicketQueryBuilder {
    criteria: Vec<Criterion>,
}

impl TicketQueryBuilder {
    /// Restrict to the given statuses; an empty set adds nothing
    #[must_use]
    pub fn statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        let statuses: Vec<Status> = statuses.into_iter().collect();
        if !statuses.is_empty() {
            self.criteria.push(Criterion::StatusIn(statuses));
        }
        self
    }

    /// Restrict the creation date by whichever bounds are present
    #[must_use]
    pub fn created(mut self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        let criterion = match (start, end) {
            (Some(start), Some(end)) => Some(Criterion::CreatedBetween(start, end)),
            (Some(start), None) => Some(Criterion::CreatedFrom(start)),
            (None, Some(end)) => Some(Criterion::CreatedUntil(end)),
            (None, None) => None,
        };
        self.criteria.extend(criterion);
        self
    }

    /// Restrict to tickets assigned to the named agent; blank names add nothing
    #[must_use]
    pub fn agent_name(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            self.criteria.push(Criterion::AgentNamed(name.to_string()));
        }
        self
    }

    #[must_use]
    pub fn build(self) -> TicketQuery {
        TicketQuery {
            criteria: self.criteria,
        }
    }
}

/// Caller-facing list filter; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub statuses: Vec<Status>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub assigned_agent: Option<String>,
}

impl TicketFilter {
    /// Rejects an end date that precedes the start date
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(TicketDeskError::InvalidDateRange);
            }
        }
        Ok(())
    }

    /// Validates the filter and composes its query
    pub fn to_query(&self) -> Result<TicketQuery> {
        self.validate()?;
        Ok(TicketQuery::builder()
            .statuses(self.statuses.iter().copied())
            .created(self.start_date, self.end_date)
            .agent_name(self.assigned_agent.as_deref())
            .build())
    }
}

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

fn parse_date_bound(input: &str, day_time: NaiveTime) -> Result<NaiveDateTime> {
    let input = input.trim();

    for format in DATE_TIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(datetime);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(day_time));
    }

    Err(TicketDeskError::InvalidInput(format!(
        "Invalid date: '{input}'. Use formats like '2024-01-15' or '2024-01-15T09:30:00'"
    )))
}

/// Parses a lower date bound; a bare date means the start of that day
pub fn parse_start_date(input: &str) -> Result<NaiveDateTime> {
    parse_date_bound(input, NaiveTime::MIN)
}

/// Parses an upper date bound; a bare date covers the whole day
pub fn parse_end_date(input: &str) -> Result<NaiveDateTime> {
    let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
        .ok_or_else(|| TicketDeskError::InvalidInput("Invalid end of day".to_string()))?;
    parse_date_bound(input, end_of_day)
}
