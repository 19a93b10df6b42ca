use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    error::AppResult,
    response::ErrorBody,
    routes::params::parse_object_id,
    services::history_service::{self, HistoryLookup},
    state::AppState,
    store::{Record, UpdateResult},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_history))
        .route("/{key}", get(lookup_history).patch(issue_certificate))
}

#[utoipa::path(
    get,
    path = "/history",
    responses((status = 200, description = "All payment history", body = Vec<serde_json::Value>)),
    tag = "History"
)]
pub async fn list_history(State(state): State<AppState>) -> AppResult<Json<Vec<Record>>> {
    let entries = history_service::list_history(state.store.as_ref()).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/history/{key}",
    params(("key" = String, Path, description = "History entry id, or an email to list that user's history")),
    responses(
        (status = 200, description = "One entry for an id, a list for an email", body = serde_json::Value),
        (status = 404, description = "No entry with that id", body = ErrorBody)
    ),
    tag = "History"
)]
pub async fn lookup_history(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<HistoryLookup>> {
    let resp = history_service::lookup(state.store.as_ref(), &key).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/history/{key}",
    params(("key" = String, Path, description = "History entry id")),
    responses(
        (status = 200, description = "Certificate marked as issued", body = UpdateResult),
        (status = 400, description = "Malformed id", body = ErrorBody)
    ),
    tag = "History"
)]
pub async fn issue_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UpdateResult>> {
    let id = parse_object_id(&id)?;
    let resp = history_service::mark_certificate(state.store.as_ref(), &id).await?;
    Ok(Json(resp))
}
