use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::auth::{TokenRequest, TokenResponse},
    error::AppResult,
    response::ErrorBody,
    routes::params::AppJson,
    services::auth_service::issue_token,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/jwt", post(issue))
}

#[utoipa::path(
    post,
    path = "/jwt",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Signed bearer token, valid for 7 days", body = TokenResponse),
        (status = 400, description = "Malformed identity payload", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn issue(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = issue_token(&state.tokens, payload.payload)?;
    Ok(Json(resp))
}
