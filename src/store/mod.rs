//! Data access for the studio collections.
//!
//! Handlers never talk to the driver directly; they go through [`StudioStore`],
//! which keeps the connection lifecycle in one place and lets tests swap in a
//! double. Records cross this boundary as JSON objects with `_id` rendered as a
//! 24-character hex string.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::Role;

pub mod convert;
pub mod mongo;

pub use mongo::MongoStore;

pub const USERS: &str = "users";
pub const CLASSES: &str = "classes";
pub const INSTRUCTORS: &str = "instructors";
pub const CARTS: &str = "carts";
pub const PAYMENTS: &str = "payments";
pub const HISTORY: &str = "history";
pub const BLOGS: &str = "blogs";

/// A schema-flexible document as stored in a collection.
pub type Record = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("document conversion failed: {0}")]
    Conversion(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertOneResult {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Result of an insert guarded by a unique index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(InsertOneResult),
    /// The unique index already holds a document with the same key.
    Duplicate,
}

#[async_trait]
pub trait StudioStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn list_users(&self) -> StoreResult<Vec<Record>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<Record>>;
    /// Unique on `email`.
    async fn insert_user(&self, user: Record) -> StoreResult<InsertOutcome>;
    async fn delete_user(&self, id: &ObjectId) -> StoreResult<DeleteResult>;
    async fn set_user_role(&self, id: &ObjectId, role: Role) -> StoreResult<UpdateResult>;

    async fn list_classes(&self) -> StoreResult<Vec<Record>>;
    async fn insert_class(&self, class: Record) -> StoreResult<InsertOneResult>;
    async fn classes_by_email(&self, email: &str) -> StoreResult<Vec<Record>>;
    async fn approve_class(&self, id: &ObjectId) -> StoreResult<UpdateResult>;
    async fn delete_class(&self, id: &ObjectId) -> StoreResult<DeleteResult>;
    /// `available_seat -= 1` with no lower bound.
    async fn decrement_seat(&self, id: &ObjectId) -> StoreResult<UpdateResult>;

    async fn list_instructors(&self) -> StoreResult<Vec<Record>>;

    async fn list_blogs(&self) -> StoreResult<Vec<Record>>;
    async fn insert_blog(&self, blog: Record) -> StoreResult<InsertOneResult>;

    /// Unique on `(id, email)`.
    async fn insert_cart_item(&self, item: Record) -> StoreResult<InsertOutcome>;
    async fn cart_items_by_email(&self, email: &str) -> StoreResult<Vec<Record>>;
    async fn delete_cart_item(&self, id: &ObjectId) -> StoreResult<DeleteResult>;

    /// Unique on `transactionId` when the field is a string.
    async fn insert_payment(&self, payment: Record) -> StoreResult<InsertOutcome>;
    async fn delete_payment(&self, id: &ObjectId) -> StoreResult<DeleteResult>;

    /// Unique on `transactionId` when the field is a string.
    async fn insert_history(&self, entry: Record) -> StoreResult<InsertOutcome>;
    async fn list_history(&self) -> StoreResult<Vec<Record>>;
    async fn history_by_email(&self, email: &str) -> StoreResult<Vec<Record>>;
    async fn find_history(&self, id: &ObjectId) -> StoreResult<Option<Record>>;
    async fn mark_certificate(&self, id: &ObjectId) -> StoreResult<UpdateResult>;
}
