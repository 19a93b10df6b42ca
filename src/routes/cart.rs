use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};

use crate::{
    dto::cart::CartQuery,
    error::AppResult,
    middleware::auth::AuthClaims,
    response::{ErrorBody, InsertOrExisting},
    routes::params::{AppJson, parse_object_id},
    services::cart_service,
    state::AppState,
    store::{DeleteResult, InsertOneResult, Record},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart))
        .route("/{id}", delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/carts",
    params(CartQuery),
    responses(
        (status = 200, description = "Cart entries of the caller", body = Vec<serde_json::Value>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Email does not match the token", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    claims: AuthClaims,
    Query(query): Query<CartQuery>,
) -> AppResult<Json<Vec<Record>>> {
    let items =
        cart_service::list_cart(state.store.as_ref(), &claims, query.email.as_deref()).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/carts",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert summary, or `[]` when the class is already in the cart", body = InsertOneResult),
        (status = 400, description = "Missing id or email", body = ErrorBody)
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    AppJson(item): AppJson<Record>,
) -> AppResult<Json<InsertOrExisting<InsertOneResult>>> {
    let resp = cart_service::add_to_cart(state.store.as_ref(), item).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/carts/{id}",
    params(("id" = String, Path, description = "Cart entry id")),
    responses(
        (status = 200, description = "Delete summary", body = DeleteResult),
        (status = 400, description = "Malformed id", body = ErrorBody)
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResult>> {
    let id = parse_object_id(&id)?;
    let resp = cart_service::remove_from_cart(state.store.as_ref(), &id).await?;
    Ok(Json(resp))
}
