use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{CreateTicket, Ticket, TicketPatch};
use crate::query::{QueryParams, TicketFilter, DEFAULT_LIMIT};
use crate::storage::{next_id, TicketStore};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Raw list-query parameters as they arrive on the wire
///
/// Enum-constrained values come in as strings and are converted to their
/// typed forms below, so an out-of-set value fails with an error naming
/// the offending parameter instead of a generic deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub then_by: Option<String>,
    pub then_order: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListTicketsQuery {
    /// Validate every enum-constrained parameter and build typed params
    pub fn into_params(self) -> Result<QueryParams> {
        Ok(QueryParams {
            filter: TicketFilter {
                status: parse_param("status", self.status)?,
                priority: parse_param("priority", self.priority)?,
                tag: self.tag,
                search: self.search,
            },
            sort_by: parse_param("sortBy", self.sort_by)?.unwrap_or_default(),
            order: parse_param("order", self.order)?.unwrap_or_default(),
            then_by: parse_param("thenBy", self.then_by)?,
            then_order: parse_param("thenOrder", self.then_order)?.unwrap_or_default(),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(0),
        })
    }
}

fn parse_param<T: FromStr>(name: &str, value: Option<String>) -> Result<Option<T>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("invalid {} parameter: {}", name, raw))),
    }
}

/// List tickets with filtering, two-level sorting, and pagination
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<crate::query::Envelope>> {
    let params = query.into_params()?;
    let tickets = state.store.load().await?;
    let envelope = params.run(&tickets)?;

    tracing::debug!(
        total = envelope.total,
        returned = envelope.items.len(),
        "Ticket query served"
    );
    Ok(Json(envelope))
}

/// Get a ticket by id
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Ticket>> {
    let tickets = state.store.load().await?;
    let ticket = tickets
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

    Ok(Json(ticket))
}

/// Create a ticket
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicket>,
) -> Result<(StatusCode, Json<Ticket>)> {
    request.validate()?;

    // Single-writer discipline: hold the lock across the whole
    // load-mutate-save cycle so two creates never compute the same id.
    let _guard = state.store.lock_writes().await;

    let mut tickets = state.store.load().await?;
    let id = next_id(&tickets);
    let ticket = request.into_ticket(id, chrono::Utc::now().date_naive())?;

    tickets.push(ticket.clone());
    state.store.save(&tickets).await?;

    tracing::info!(ticket_id = id, "Ticket created");
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Patch a ticket: merge only the fields present in the payload
pub async fn patch_ticket(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<TicketPatch>,
) -> Result<Json<Ticket>> {
    if patch.is_empty() {
        return Err(AppError::EmptyPayload(
            "no recognized fields in update payload".to_string(),
        ));
    }

    let _guard = state.store.lock_writes().await;

    let mut tickets = state.store.load().await?;
    let ticket = tickets
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

    patch.apply(ticket)?;
    let updated = ticket.clone();
    state.store.save(&tickets).await?;

    tracing::info!(ticket_id = id, "Ticket updated");
    Ok(Json(updated))
}

/// Delete a ticket
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    let _guard = state.store.lock_writes().await;

    let tickets = state.store.load().await?;
    let before = tickets.len();

    let remaining: Vec<Ticket> = tickets.into_iter().filter(|t| t.id != id).collect();
    if remaining.len() == before {
        return Err(AppError::NotFound(format!("Ticket {} not found", id)));
    }

    state.store.save(&remaining).await?;

    tracing::info!(ticket_id = id, "Ticket deleted");
    Ok(StatusCode::NO_CONTENT)
}
