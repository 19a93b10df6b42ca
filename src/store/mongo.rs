use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};

use super::{
    BLOGS, CARTS, CLASSES, DeleteResult, HISTORY, INSTRUCTORS, InsertOneResult, InsertOutcome,
    PAYMENTS, Record, StoreResult, StudioStore, USERS, UpdateResult,
    convert::{document_to_record, id_to_string, record_to_document},
};
use crate::models::{CERTIFICATE_ISSUED, CLASS_APPROVED, Role};

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    /// Creates the unique indexes the insert paths rely on for duplicate detection.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let transaction_key = doc! { "transactionId": { "$type": "string" } };
        let indexes = [
            (USERS, unique_index(doc! { "email": 1 }, None)),
            (CARTS, unique_index(doc! { "id": 1, "email": 1 }, None)),
            (
                PAYMENTS,
                unique_index(doc! { "transactionId": 1 }, Some(transaction_key.clone())),
            ),
            (
                HISTORY,
                unique_index(doc! { "transactionId": 1 }, Some(transaction_key)),
            ),
            (CLASSES, IndexModel::builder().keys(doc! { "email": 1 }).build()),
        ];

        for (collection, index) in indexes {
            let keys = index.keys.clone();
            match self.collection(collection).create_index(index).await {
                Ok(_) => tracing::info!(%collection, ?keys, "index ready"),
                Err(err) if is_duplicate_key(&err) => {
                    // Existing duplicates block a unique index; the service still runs.
                    tracing::warn!(%collection, ?keys, error = %err, "unique index not created")
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    async fn find_all(&self, collection: &str, filter: Document) -> StoreResult<Vec<Record>> {
        let docs: Vec<Document> = self
            .collection(collection)
            .find(filter)
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(document_to_record).collect())
    }

    async fn insert(&self, collection: &str, record: Record) -> StoreResult<InsertOneResult> {
        let doc = record_to_document(record)?;
        let result = self.collection(collection).insert_one(doc).await?;
        Ok(InsertOneResult::new(id_to_string(result.inserted_id)))
    }

    async fn insert_unique(&self, collection: &str, record: Record) -> StoreResult<InsertOutcome> {
        let doc = record_to_document(record)?;
        match self.collection(collection).insert_one(doc).await {
            Ok(result) => Ok(InsertOutcome::Inserted(InsertOneResult::new(id_to_string(
                result.inserted_id,
            )))),
            Err(err) if is_duplicate_key(&err) => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(err.into()),
        }
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
        update: Document,
    ) -> StoreResult<UpdateResult> {
        let result = self
            .collection(collection)
            .update_one(doc! { "_id": *id }, update)
            .await?;
        let mut summary = UpdateResult::new(result.matched_count, result.modified_count);
        if let Some(upserted) = result.upserted_id {
            summary.upserted_id = Some(id_to_string(upserted));
            summary.upserted_count = 1;
        }
        Ok(summary)
    }

    async fn delete_by_id(&self, collection: &str, id: &ObjectId) -> StoreResult<DeleteResult> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": *id })
            .await?;
        Ok(DeleteResult::new(result.deleted_count))
    }
}

fn unique_index(keys: Document, partial: Option<Document>) -> IndexModel {
    let options = IndexOptions::builder()
        .unique(true)
        .partial_filter_expression(partial)
        .build();
    IndexModel::builder().keys(keys).options(options).build()
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) => write.code == DUPLICATE_KEY,
        ErrorKind::Command(command) => command.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[async_trait]
impl StudioStore for MongoStore {
    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<Record>> {
        self.find_all(USERS, doc! {}).await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<Record>> {
        let user = self
            .collection(USERS)
            .find_one(doc! { "email": email })
            .await?;
        Ok(user.map(document_to_record))
    }

    async fn insert_user(&self, user: Record) -> StoreResult<InsertOutcome> {
        self.insert_unique(USERS, user).await
    }

    async fn delete_user(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.delete_by_id(USERS, id).await
    }

    async fn set_user_role(&self, id: &ObjectId, role: Role) -> StoreResult<UpdateResult> {
        self.update_by_id(USERS, id, doc! { "$set": { "role": role.as_str() } })
            .await
    }

    async fn list_classes(&self) -> StoreResult<Vec<Record>> {
        self.find_all(CLASSES, doc! {}).await
    }

    async fn insert_class(&self, class: Record) -> StoreResult<InsertOneResult> {
        self.insert(CLASSES, class).await
    }

    async fn classes_by_email(&self, email: &str) -> StoreResult<Vec<Record>> {
        self.find_all(CLASSES, doc! { "email": email }).await
    }

    async fn approve_class(&self, id: &ObjectId) -> StoreResult<UpdateResult> {
        self.update_by_id(CLASSES, id, doc! { "$set": { "status": CLASS_APPROVED } })
            .await
    }

    async fn delete_class(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.delete_by_id(CLASSES, id).await
    }

    async fn decrement_seat(&self, id: &ObjectId) -> StoreResult<UpdateResult> {
        self.update_by_id(CLASSES, id, doc! { "$inc": { "available_seat": -1 } })
            .await
    }

    async fn list_instructors(&self) -> StoreResult<Vec<Record>> {
        self.find_all(INSTRUCTORS, doc! {}).await
    }

    async fn list_blogs(&self) -> StoreResult<Vec<Record>> {
        self.find_all(BLOGS, doc! {}).await
    }

    async fn insert_blog(&self, blog: Record) -> StoreResult<InsertOneResult> {
        self.insert(BLOGS, blog).await
    }

    async fn insert_cart_item(&self, item: Record) -> StoreResult<InsertOutcome> {
        self.insert_unique(CARTS, item).await
    }

    async fn cart_items_by_email(&self, email: &str) -> StoreResult<Vec<Record>> {
        self.find_all(CARTS, doc! { "email": email }).await
    }

    async fn delete_cart_item(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.delete_by_id(CARTS, id).await
    }

    async fn insert_payment(&self, payment: Record) -> StoreResult<InsertOutcome> {
        self.insert_unique(PAYMENTS, payment).await
    }

    async fn delete_payment(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.delete_by_id(PAYMENTS, id).await
    }

    async fn insert_history(&self, entry: Record) -> StoreResult<InsertOutcome> {
        self.insert_unique(HISTORY, entry).await
    }

    async fn list_history(&self) -> StoreResult<Vec<Record>> {
        self.find_all(HISTORY, doc! {}).await
    }

    async fn history_by_email(&self, email: &str) -> StoreResult<Vec<Record>> {
        self.find_all(HISTORY, doc! { "email": email }).await
    }

    async fn find_history(&self, id: &ObjectId) -> StoreResult<Option<Record>> {
        let entry = self
            .collection(HISTORY)
            .find_one(doc! { "_id": *id })
            .await?;
        Ok(entry.map(document_to_record))
    }

    async fn mark_certificate(&self, id: &ObjectId) -> StoreResult<UpdateResult> {
        self.update_by_id(HISTORY, id, doc! { "$set": { "certificate": CERTIFICATE_ISSUED } })
            .await
    }
}
