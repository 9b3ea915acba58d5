//! Ticket endpoint handlers
//!
//! Service calls touch storage synchronously, so each one runs on the
//! blocking thread pool.

use super::AppState;
use super::dto::{
    CreateTicketRequest, HealthResponse, ListTicketsParams, TicketDto, UpdateTicketRequest,
};
use super::error::{ApiError, ApiResult};
use super::extract::{ApiJson, ApiPath};
use crate::core::{AgentId, TicketId};
use crate::service::SharedTicketService;
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

async fn run_blocking<R, F>(service: Arc<SharedTicketService>, f: F) -> ApiResult<R>
where
    F: FnOnce(&SharedTicketService) -> crate::Result<R> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| ApiError::internal(format!("Service task failed: {e}")))?
        .map_err(ApiError::from)
}

pub async fn create_ticket(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<TicketDto>)> {
    let ticket = run_blocking(state.service, move |s| s.create(request.description)).await?;
    Ok((StatusCode::CREATED, Json(ticket.into())))
}

pub async fn assign_agent(
    State(state): State<AppState>,
    ApiPath((id, agent_id)): ApiPath<(u64, u64)>,
) -> ApiResult<Json<TicketDto>> {
    let ticket = run_blocking(state.service, move |s| {
        s.assign_agent(TicketId::new(id), AgentId::new(agent_id))
    })
    .await?;
    Ok(Json(ticket.into()))
}

pub async fn resolve_ticket(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<Json<TicketDto>> {
    let ticket = run_blocking(state.service, move |s| s.resolve(TicketId::new(id))).await?;
    Ok(Json(ticket.into()))
}

pub async fn close_ticket(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<Json<TicketDto>> {
    let ticket = run_blocking(state.service, move |s| s.close(TicketId::new(id))).await?;
    Ok(Json(ticket.into()))
}

pub async fn update_ticket(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<UpdateTicketRequest>,
) -> ApiResult<Json<TicketDto>> {
    let ticket = run_blocking(state.service, move |s| {
        s.update(
            TicketId::new(id),
            request.description,
            request.resolution_summary,
        )
    })
    .await?;
    Ok(Json(ticket.into()))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<Json<TicketDto>> {
    let ticket = run_blocking(state.service, move |s| s.get_by_id(TicketId::new(id))).await?;
    Ok(Json(ticket.into()))
}

pub async fn list_tickets(
    State(state): State<AppState>,
    params: ListTicketsParams,
) -> ApiResult<Json<Vec<TicketDto>>> {
    let filter = params.into_filter()?;
    let tickets = run_blocking(state.service, move |s| s.list(&filter)).await?;
    Ok(Json(tickets.into_iter().map(TicketDto::from).collect()))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
