use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::{
    error::AppResult,
    models::CLASS_PENDING,
    store::{DeleteResult, InsertOneResult, Record, StudioStore, UpdateResult},
};

pub async fn list_classes(store: &dyn StudioStore) -> AppResult<Vec<Record>> {
    Ok(store.list_classes().await?)
}

/// Stores the class as submitted; a class without a status starts out pending.
pub async fn create_class(store: &dyn StudioStore, mut class: Record) -> AppResult<InsertOneResult> {
    class
        .entry("status")
        .or_insert_with(|| Value::String(CLASS_PENDING.to_string()));
    let result = store.insert_class(class).await?;
    tracing::info!(id = %result.inserted_id, "class created");
    Ok(result)
}

pub async fn classes_by_email(store: &dyn StudioStore, email: &str) -> AppResult<Vec<Record>> {
    Ok(store.classes_by_email(email).await?)
}

pub async fn approve_class(store: &dyn StudioStore, id: &ObjectId) -> AppResult<UpdateResult> {
    let result = store.approve_class(id).await?;
    tracing::info!(%id, matched = result.matched_count, "class approved");
    Ok(result)
}

pub async fn delete_class(store: &dyn StudioStore, id: &ObjectId) -> AppResult<DeleteResult> {
    Ok(store.delete_class(id).await?)
}

/// Takes one seat off the class. The counter has no floor.
pub async fn decrement_seat(store: &dyn StudioStore, id: &ObjectId) -> AppResult<UpdateResult> {
    let result = store.decrement_seat(id).await?;
    tracing::debug!(%id, matched = result.matched_count, "class seat taken");
    Ok(result)
}
