use mongodb::bson::oid::ObjectId;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthClaims, ensure_same_email},
    response::InsertOrExisting,
    services::required_string,
    store::{DeleteResult, InsertOneResult, InsertOutcome, Record, StudioStore},
};

/// Adds a class to a user's cart once; a repeated `(id, email)` pair yields
/// the `[]` sentinel.
pub async fn add_to_cart(
    store: &dyn StudioStore,
    item: Record,
) -> AppResult<InsertOrExisting<InsertOneResult>> {
    let class_id = required_string(&item, "id")?.to_string();
    let email = required_string(&item, "email")?.to_string();

    match store.insert_cart_item(item).await? {
        InsertOutcome::Inserted(result) => {
            tracing::info!(%class_id, %email, "class added to cart");
            Ok(InsertOrExisting::Inserted(result))
        }
        InsertOutcome::Duplicate => {
            tracing::debug!(%class_id, %email, "class already in cart");
            Ok(InsertOrExisting::existing())
        }
    }
}

pub async fn list_cart(
    store: &dyn StudioStore,
    claims: &AuthClaims,
    email: Option<&str>,
) -> AppResult<Vec<Record>> {
    let email = email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("email query parameter is required".into()))?;
    ensure_same_email(claims, email)?;
    Ok(store.cart_items_by_email(email).await?)
}

/// Removes a cart entry by its own id, whoever owns it.
pub async fn remove_from_cart(store: &dyn StudioStore, id: &ObjectId) -> AppResult<DeleteResult> {
    let result = store.delete_cart_item(id).await?;
    tracing::info!(%id, deleted = result.deleted_count, "cart entry removed");
    Ok(result)
}
