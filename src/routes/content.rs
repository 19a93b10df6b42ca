use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    routes::params::AppJson,
    services::content_service,
    state::AppState,
    store::{InsertOneResult, Record},
};

pub fn blog_router() -> Router<AppState> {
    Router::new().route("/", get(list_blogs).post(create_blog))
}

pub fn instructor_router() -> Router<AppState> {
    Router::new().route("/", get(list_instructors))
}

#[utoipa::path(
    get,
    path = "/blogs",
    responses((status = 200, description = "All blog posts", body = Vec<serde_json::Value>)),
    tag = "Content"
)]
pub async fn list_blogs(State(state): State<AppState>) -> AppResult<Json<Vec<Record>>> {
    let blogs = content_service::list_blogs(state.store.as_ref()).await?;
    Ok(Json(blogs))
}

#[utoipa::path(
    post,
    path = "/blogs",
    request_body = serde_json::Value,
    responses((status = 200, description = "Insert summary", body = InsertOneResult)),
    tag = "Content"
)]
pub async fn create_blog(
    State(state): State<AppState>,
    AppJson(blog): AppJson<Record>,
) -> AppResult<Json<InsertOneResult>> {
    let resp = content_service::create_blog(state.store.as_ref(), blog).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/instructors",
    responses((status = 200, description = "All instructor profiles", body = Vec<serde_json::Value>)),
    tag = "Content"
)]
pub async fn list_instructors(State(state): State<AppState>) -> AppResult<Json<Vec<Record>>> {
    let instructors = content_service::list_instructors(state.store.as_ref()).await?;
    Ok(Json(instructors))
}
