use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, put},
};

use crate::{
    error::AppResult,
    response::ErrorBody,
    routes::params::{AppJson, parse_object_id},
    services::class_service,
    state::AppState,
    store::{DeleteResult, InsertOneResult, Record, UpdateResult},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route("/approve/{id}", patch(approve_class))
        .route("/{key}", get(classes_by_email).delete(delete_class))
}

/// Mounted at the root: clients call `PUT /payment_update/{id}`.
pub fn seat_router() -> Router<AppState> {
    Router::new().route("/payment_update/{id}", put(decrement_seat))
}

#[utoipa::path(
    get,
    path = "/classes",
    responses((status = 200, description = "All classes", body = Vec<serde_json::Value>)),
    tag = "Classes"
)]
pub async fn list_classes(State(state): State<AppState>) -> AppResult<Json<Vec<Record>>> {
    let classes = class_service::list_classes(state.store.as_ref()).await?;
    Ok(Json(classes))
}

#[utoipa::path(
    post,
    path = "/classes",
    request_body = serde_json::Value,
    responses((status = 200, description = "Insert summary; status defaults to pending", body = InsertOneResult)),
    tag = "Classes"
)]
pub async fn create_class(
    State(state): State<AppState>,
    AppJson(class): AppJson<Record>,
) -> AppResult<Json<InsertOneResult>> {
    let resp = class_service::create_class(state.store.as_ref(), class).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/classes/{key}",
    params(("key" = String, Path, description = "Owning instructor's email")),
    responses((status = 200, description = "Classes owned by the instructor", body = Vec<serde_json::Value>)),
    tag = "Classes"
)]
pub async fn classes_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Record>>> {
    let classes = class_service::classes_by_email(state.store.as_ref(), &email).await?;
    Ok(Json(classes))
}

#[utoipa::path(
    patch,
    path = "/classes/approve/{id}",
    params(("id" = String, Path, description = "Class id")),
    responses(
        (status = 200, description = "Update summary", body = UpdateResult),
        (status = 400, description = "Malformed id", body = ErrorBody)
    ),
    tag = "Classes"
)]
pub async fn approve_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UpdateResult>> {
    let id = parse_object_id(&id)?;
    let resp = class_service::approve_class(state.store.as_ref(), &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/classes/{key}",
    params(("key" = String, Path, description = "Class id")),
    responses(
        (status = 200, description = "Delete summary", body = DeleteResult),
        (status = 400, description = "Malformed id", body = ErrorBody)
    ),
    tag = "Classes"
)]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResult>> {
    let id = parse_object_id(&id)?;
    let resp = class_service::delete_class(state.store.as_ref(), &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/payment_update/{id}",
    params(("id" = String, Path, description = "Class id")),
    responses(
        (status = 200, description = "Seat counter decremented by one", body = UpdateResult),
        (status = 400, description = "Malformed id", body = ErrorBody)
    ),
    tag = "Classes"
)]
pub async fn decrement_seat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UpdateResult>> {
    let id = parse_object_id(&id)?;
    let resp = class_service::decrement_seat(state.store.as_ref(), &id).await?;
    Ok(Json(resp))
}
