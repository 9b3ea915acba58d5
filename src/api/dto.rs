//! Request and response bodies for the HTTP API

use crate::core::{Status, Ticket, TicketFilter, parse_end_date, parse_start_date};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Ticket as rendered to API clients
///
/// The assigned agent is flattened to its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: Option<u64>,
    pub description: Option<String>,
    pub status: Status,
    pub created_date: NaiveDateTime,
    pub closed_date: Option<NaiveDateTime>,
    pub assigned_agent: Option<String>,
    pub resolution_summary: Option<String>,
}

impl From<Ticket> for TicketDto {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id.map(|id| id.value()),
            description: ticket.description,
            status: ticket.status,
            created_date: ticket.created_date,
            closed_date: ticket.closed_date,
            assigned_agent: ticket.assigned_agent.map(|a| a.name),
            resolution_summary: ticket.resolution_summary,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTicketRequest {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub description: Option<String>,
    pub resolution_summary: Option<String>,
}

/// Query string of `GET /tickets`
///
/// `status` may repeat and each value may hold a comma-separated list, so
/// `status=NEW&status=CLOSED` and `status=NEW,CLOSED` are the same filter.
/// Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTicketsParams {
    pub status: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub assigned_agent: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl ListTicketsParams {
    /// Collects decoded `key=value` pairs; unknown keys are ignored and the
    /// last value wins for single-valued keys
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "status" => params.status.push(value),
                "startDate" => params.start_date = Some(value),
                "endDate" => params.end_date = Some(value),
                "assignedAgent" => params.assigned_agent = Some(value),
                _ => {},
            }
        }
        params
    }

    pub fn into_filter(self) -> Result<TicketFilter> {
        let statuses = self
            .status
            .iter()
            .flat_map(|value| value.split(','))
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<Status>)
            .collect::<Result<Vec<_>>>()?;

        Ok(TicketFilter {
            statuses,
            start_date: non_blank(self.start_date.as_deref())
                .map(parse_start_date)
                .transpose()?,
            end_date: non_blank(self.end_date.as_deref())
                .map(parse_end_date)
                .transpose()?,
            assigned_agent: self.assigned_agent,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Agent, TicketBuilder};
    use crate::error::TicketDeskError;

    #[test]
    fn test_dto_flattens_agent_name() {
        let ticket = TicketBuilder::new()
            .id(4)
            .description("Monitor flickers")
            .status(Status::InProgress)
            .assigned_agent(Agent::new(2, "Agent002"))
            .build();

        let json = serde_json::to_value(TicketDto::from(ticket)).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["assignedAgent"], "Agent002");
        assert!(json["closedDate"].is_null());
    }

    #[test]
    fn test_params_into_filter() {
        let params = ListTicketsParams {
            status: vec!["NEW, IN_PROGRESS".into()],
            start_date: Some("2023-01-02".into()),
            end_date: Some("2023-01-07T10:30:00".into()),
            assigned_agent: Some("Agent001".into()),
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.statuses, vec![Status::New, Status::InProgress]);
        assert_eq!(filter.start_date.unwrap().to_string(), "2023-01-02 00:00:00");
        assert_eq!(filter.end_date.unwrap().to_string(), "2023-01-07 10:30:00");
    }

    #[test]
    fn test_params_reject_unknown_status() {
        let params = ListTicketsParams {
            status: vec!["OPEN".into()],
            ..ListTicketsParams::default()
        };
        assert!(matches!(
            params.into_filter(),
            Err(TicketDeskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_repeated_status_keys_are_merged() {
        let params = ListTicketsParams::from_pairs([
            ("status".to_string(), "NEW".to_string()),
            ("page".to_string(), "2".to_string()),
            ("status".to_string(), "RESOLVED,CLOSED".to_string()),
            ("assignedAgent".to_string(), "Agent001".to_string()),
        ]);
        assert_eq!(params.status.len(), 2);
        assert_eq!(params.assigned_agent.as_deref(), Some("Agent001"));

        let filter = params.into_filter().unwrap();
        assert_eq!(
            filter.statuses,
            vec![Status::New, Status::Resolved, Status::Closed]
        );
    }

    #[test]
    fn test_blank_dates_are_ignored() {
        let params = ListTicketsParams {
            start_date: Some(String::new()),
            end_date: Some("  ".into()),
            ..ListTicketsParams::default()
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter, TicketFilter::default());
    }
}
