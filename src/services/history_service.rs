use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    store::{Record, StudioStore, UpdateResult},
};

/// `GET /history/{key}` answers with one entry for an id and a list for an email.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HistoryLookup {
    Entry(Record),
    Entries(Vec<Record>),
}

pub async fn list_history(store: &dyn StudioStore) -> AppResult<Vec<Record>> {
    Ok(store.list_history().await?)
}

pub async fn lookup(store: &dyn StudioStore, key: &str) -> AppResult<HistoryLookup> {
    match ObjectId::parse_str(key) {
        Ok(id) => store
            .find_history(&id)
            .await?
            .map(HistoryLookup::Entry)
            .ok_or_else(|| AppError::NotFound(format!("history entry {id} not found"))),
        Err(_) => Ok(HistoryLookup::Entries(store.history_by_email(key).await?)),
    }
}

pub async fn mark_certificate(store: &dyn StudioStore, id: &ObjectId) -> AppResult<UpdateResult> {
    let result = store.mark_certificate(id).await?;
    tracing::info!(%id, matched = result.matched_count, "certificate issued");
    Ok(result)
}
