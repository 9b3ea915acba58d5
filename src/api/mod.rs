//! HTTP API for ticket-desk
//!
//! | Method & path                    | Operation   |
//! |----------------------------------|-------------|
//! | `POST /tickets`                  | create      |
//! | `PUT /tickets/:id/agent/:agent`  | assign      |
//! | `PUT /tickets/:id/resolve`       | resolve     |
//! | `PUT /tickets/:id/close`         | close       |
//! | `PUT /tickets/:id`               | update      |
//! | `GET /tickets/:id`               | get         |
//! | `GET /tickets`                   | list        |
//! | `GET /health`                    | liveness    |

pub mod dto;
pub mod error;
mod extract;
mod handlers;

use crate::config::Config;
use crate::error::Result;
use crate::service::{SharedTicketService, TicketService};
use crate::storage::Stores;
use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SharedTicketService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: SharedTicketService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// State over an opened set of stores using the system clock
    #[must_use]
    pub fn from_stores(stores: &Stores) -> Self {
        Self::new(TicketService::new(
            stores.tickets.clone(),
            stores.agents.clone(),
        ))
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/tickets",
            get(handlers::list_tickets).post(handlers::create_ticket),
        )
        .route(
            "/tickets/:id",
            get(handlers::get_ticket).put(handlers::update_ticket),
        )
        .route("/tickets/:id/agent/:agent_id", put(handlers::assign_agent))
        .route("/tickets/:id/resolve", put(handlers::resolve_ticket))
        .route("/tickets/:id/close", put(handlers::close_ticket))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until Ctrl-C is received
pub async fn serve(config: &Config, stores: &Stores) -> Result<()> {
    let app = router(AppState::from_stores(stores));
    let addr = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting ticket-desk API on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ticket-desk API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
}
