use crate::{
    error::AppResult,
    store::{InsertOneResult, Record, StudioStore},
};

pub async fn list_instructors(store: &dyn StudioStore) -> AppResult<Vec<Record>> {
    Ok(store.list_instructors().await?)
}

pub async fn list_blogs(store: &dyn StudioStore) -> AppResult<Vec<Record>> {
    Ok(store.list_blogs().await?)
}

pub async fn create_blog(store: &dyn StudioStore, blog: Record) -> AppResult<InsertOneResult> {
    let result = store.insert_blog(blog).await?;
    tracing::info!(id = %result.inserted_id, "blog post created");
    Ok(result)
}
