use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};

use crate::{
    error::AppResult,
    middleware::auth::AuthClaims,
    models::{AdminFlag, InstructorFlag, Role},
    response::{ErrorBody, InsertOrExisting},
    routes::params::{AppJson, parse_object_id},
    services::user_service,
    state::AppState,
    store::{DeleteResult, InsertOneResult, Record, UpdateResult},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register_user))
        .route("/{id}", delete(delete_user))
        .route("/admin/{key}", get(check_admin).patch(make_admin))
        .route("/instructor/{key}", get(check_instructor).patch(make_instructor))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<serde_json::Value>),
        (status = 502, description = "Database failure", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<Record>>> {
    let users = user_service::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert summary, or `[]` when the email is already registered", body = InsertOneResult),
        (status = 400, description = "Missing email", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn register_user(
    State(state): State<AppState>,
    AppJson(user): AppJson<Record>,
) -> AppResult<Json<InsertOrExisting<InsertOneResult>>> {
    let resp = user_service::register_user(state.store.as_ref(), user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Delete summary", body = DeleteResult),
        (status = 400, description = "Malformed id", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResult>> {
    let id = parse_object_id(&id)?;
    let resp = user_service::delete_user(state.store.as_ref(), &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users/admin/{key}",
    params(("key" = String, Path, description = "Email to check; must match the token")),
    responses(
        (status = 200, description = "Admin flag, false for another user's email", body = AdminFlag),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn check_admin(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(email): Path<String>,
) -> AppResult<Json<AdminFlag>> {
    let resp = user_service::admin_flag(state.store.as_ref(), &claims, &email).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users/instructor/{key}",
    params(("key" = String, Path, description = "Email to check; must match the token")),
    responses(
        (status = 200, description = "Instructor flag, false for another user's email", body = InstructorFlag),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn check_instructor(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(email): Path<String>,
) -> AppResult<Json<InstructorFlag>> {
    let resp = user_service::instructor_flag(state.store.as_ref(), &claims, &email).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/users/admin/{key}",
    params(("key" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Update summary", body = UpdateResult),
        (status = 400, description = "Malformed id", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn make_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UpdateResult>> {
    let id = parse_object_id(&id)?;
    let resp = user_service::set_role(state.store.as_ref(), &id, Role::Admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/users/instructor/{key}",
    params(("key" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Update summary", body = UpdateResult),
        (status = 400, description = "Malformed id", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn make_instructor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UpdateResult>> {
    let id = parse_object_id(&id)?;
    let resp = user_service::set_role(state.store.as_ref(), &id, Role::Instructor).await?;
    Ok(Json(resp))
}
