use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{DeleteResult, InsertOneResult};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentIntentRequest {
    /// Price in major currency units.
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Outcome of the three payment-recording writes. An insert is `null` when
/// the call replayed an already recorded `transactionId`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordResponse {
    pub insert_result: Option<InsertOneResult>,
    pub history_result: Option<InsertOneResult>,
    pub delete_result: DeleteResult,
}
