use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::{
    error::AppResult,
    middleware::auth::AuthClaims,
    models::{AdminFlag, InstructorFlag, Role},
    response::InsertOrExisting,
    services::required_string,
    store::{DeleteResult, InsertOneResult, InsertOutcome, Record, StudioStore, UpdateResult},
};

pub async fn list_users(store: &dyn StudioStore) -> AppResult<Vec<Record>> {
    Ok(store.list_users().await?)
}

/// Registers a user once per email; a repeat yields the `[]` sentinel.
pub async fn register_user(
    store: &dyn StudioStore,
    user: Record,
) -> AppResult<InsertOrExisting<InsertOneResult>> {
    let email = required_string(&user, "email")?.to_string();
    match store.insert_user(user).await? {
        InsertOutcome::Inserted(result) => {
            tracing::info!(%email, id = %result.inserted_id, "user registered");
            Ok(InsertOrExisting::Inserted(result))
        }
        InsertOutcome::Duplicate => {
            tracing::debug!(%email, "user already registered");
            Ok(InsertOrExisting::existing())
        }
    }
}

pub async fn delete_user(store: &dyn StudioStore, id: &ObjectId) -> AppResult<DeleteResult> {
    let result = store.delete_user(id).await?;
    tracing::info!(%id, deleted = result.deleted_count, "user deleted");
    Ok(result)
}

pub async fn set_role(store: &dyn StudioStore, id: &ObjectId, role: Role) -> AppResult<UpdateResult> {
    let result = store.set_user_role(id, role).await?;
    tracing::info!(%id, %role, matched = result.matched_count, "user role set");
    Ok(result)
}

pub async fn admin_flag(
    store: &dyn StudioStore,
    claims: &AuthClaims,
    email: &str,
) -> AppResult<AdminFlag> {
    let admin = has_role(store, claims, email, Role::Admin).await?;
    Ok(AdminFlag { admin })
}

pub async fn instructor_flag(
    store: &dyn StudioStore,
    claims: &AuthClaims,
    email: &str,
) -> AppResult<InstructorFlag> {
    let instructor = has_role(store, claims, email, Role::Instructor).await?;
    Ok(InstructorFlag { instructor })
}

/// A caller may only ask about their own email; anything else answers
/// `false` without touching the store.
async fn has_role(
    store: &dyn StudioStore,
    claims: &AuthClaims,
    email: &str,
    role: Role,
) -> AppResult<bool> {
    if claims.email() != Some(email) {
        tracing::warn!(
            token_email = claims.email().unwrap_or("-"),
            %email,
            %role,
            "role check for a different email"
        );
        return Ok(false);
    }

    let user = store.find_user_by_email(email).await?;
    Ok(user
        .as_ref()
        .and_then(|u| u.get("role"))
        .and_then(Value::as_str)
        == Some(role.as_str()))
}
