use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::{
    dto::payments::{PaymentIntentRequest, PaymentIntentResponse, PaymentRecordResponse},
    error::{AppError, AppResult},
    processor::{CURRENCY, PaymentProcessor, to_minor_units},
    services::required_string,
    store::{DeleteResult, InsertOneResult, InsertOutcome, Record, StoreResult, StudioStore},
};

pub async fn create_payment_intent(
    processor: &dyn PaymentProcessor,
    payload: PaymentIntentRequest,
) -> AppResult<PaymentIntentResponse> {
    let amount = to_minor_units(payload.price)
        .ok_or_else(|| AppError::Validation("price must be a positive amount".into()))?;
    let intent = processor.create_payment_intent(amount, CURRENCY).await?;
    tracing::info!(
        provider = processor.provider_name(),
        intent_id = %intent.id,
        amount,
        "payment intent issued"
    );
    Ok(PaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}

/// Records a completed payment: the payment document, its history copy, and
/// removal of the matching cart entry.
///
/// A string `transactionId` acts as the idempotency key, so a retried call
/// does not insert twice and can finish a run that stopped half way. When the
/// history insert fails, the payment inserted by this call is removed again.
pub async fn record_payment(
    store: &dyn StudioStore,
    payment: Record,
) -> AppResult<PaymentRecordResponse> {
    let class_id = required_string(&payment, "classID")?.to_string();
    let transaction_id = payment
        .get("transactionId")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let span = info_span!(
        "record_payment",
        saga_id = %Uuid::new_v4(),
        class_id = %class_id,
        transaction_id = transaction_id.as_deref().unwrap_or("-"),
    );
    run_saga(store, payment, &class_id, transaction_id.is_some())
        .instrument(span)
        .await
}

async fn run_saga(
    store: &dyn StudioStore,
    payment: Record,
    class_id: &str,
    keyed: bool,
) -> AppResult<PaymentRecordResponse> {
    let insert_result = match store.insert_payment(payment.clone()).await? {
        InsertOutcome::Inserted(result) => Some(result),
        InsertOutcome::Duplicate => {
            tracing::info!("payment already recorded, resuming");
            None
        }
    };

    let history_result = match store.insert_history(payment).await {
        Ok(InsertOutcome::Inserted(result)) => Some(result),
        Ok(InsertOutcome::Duplicate) => {
            tracing::info!("history entry already recorded");
            None
        }
        Err(err) => {
            if let Some(inserted) = &insert_result {
                compensate_payment(store, inserted).await;
            }
            return Err(err.into());
        }
    };

    let delete_result = clear_cart_entry(store, class_id).await.map_err(|err| {
        if !keyed {
            tracing::warn!("cart cleanup failed without a transactionId; a retry inserts again");
        }
        AppError::from(err)
    })?;

    tracing::info!(
        cart_entries_removed = delete_result.deleted_count,
        "payment recorded"
    );
    Ok(PaymentRecordResponse {
        insert_result,
        history_result,
        delete_result,
    })
}

async fn clear_cart_entry(store: &dyn StudioStore, class_id: &str) -> StoreResult<DeleteResult> {
    match ObjectId::parse_str(class_id) {
        Ok(id) => store.delete_cart_item(&id).await,
        Err(_) => {
            tracing::warn!(%class_id, "classID is not an object id, no cart entry removed");
            Ok(DeleteResult::new(0))
        }
    }
}

async fn compensate_payment(store: &dyn StudioStore, inserted: &InsertOneResult) {
    let Ok(id) = ObjectId::parse_str(&inserted.inserted_id) else {
        tracing::error!(id = %inserted.inserted_id, "cannot compensate payment with foreign id");
        return;
    };
    match store.delete_payment(&id).await {
        Ok(result) => tracing::warn!(%id, deleted = result.deleted_count, "payment rolled back"),
        Err(err) => tracing::error!(%id, error = %err, "payment rollback failed"),
    }
}
