use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::payments::{PaymentIntentRequest, PaymentIntentResponse, PaymentRecordResponse},
    error::AppResult,
    response::ErrorBody,
    routes::params::AppJson,
    services::payment_service,
    state::AppState,
    store::Record,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(record_payment))
}

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret of a card payment intent", body = PaymentIntentResponse),
        (status = 400, description = "Price is not a positive amount", body = ErrorBody),
        (status = 502, description = "Payment processor failure", body = ErrorBody)
    ),
    tag = "Payments"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PaymentIntentRequest>,
) -> AppResult<Json<PaymentIntentResponse>> {
    let resp = payment_service::create_payment_intent(state.payments.as_ref(), payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/payments",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Payment, history copy and cart cleanup results", body = PaymentRecordResponse),
        (status = 400, description = "Missing classID", body = ErrorBody),
        (status = 502, description = "A write failed; retry with the same transactionId", body = ErrorBody)
    ),
    tag = "Payments"
)]
pub async fn record_payment(
    State(state): State<AppState>,
    AppJson(payment): AppJson<Record>,
) -> AppResult<Json<PaymentRecordResponse>> {
    let resp = payment_service::record_payment(state.store.as_ref(), payment).await?;
    Ok(Json(resp))
}
