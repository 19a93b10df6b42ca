//! Shared fixtures: an in-memory `StudioStore`, a fake payment processor and
//! HTTP helpers for driving the router.
#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use focus_studio_api::{
    models::{CERTIFICATE_ISSUED, CLASS_APPROVED, Role},
    processor::{PaymentError, PaymentIntent, PaymentProcessor, PaymentResult},
    routes::build_router,
    services::auth_service::TokenKeys,
    state::AppState,
    store::{
        BLOGS, CARTS, CLASSES, DeleteResult, HISTORY, INSTRUCTORS, InsertOneResult, InsertOutcome,
        PAYMENTS, Record, StoreError, StoreResult, StudioStore, USERS, UpdateResult,
    },
};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "test-signing-secret";

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record must be a JSON object")
}

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<&'static str, Vec<Record>>>,
    failing: Mutex<HashSet<&'static str>>,
    reads: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every later call of `operation` fail.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn seed(&self, collection: &'static str, value: Value) -> ObjectId {
        let id = ObjectId::new();
        let mut doc = record(value);
        doc.insert("_id".into(), Value::String(id.to_hex()));
        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(doc);
        id
    }

    pub fn all(&self, collection: &'static str) -> Vec<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get(&self, collection: &'static str, id: &ObjectId) -> Option<Record> {
        self.all(collection)
            .into_iter()
            .find(|doc| has_id(doc, id))
    }

    pub fn count(&self, collection: &'static str) -> usize {
        self.all(collection).len()
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }

    fn check(&self, operation: &'static str) -> StoreResult<()> {
        if self.failing.lock().unwrap().contains(operation) {
            return Err(StoreError::Unavailable(format!("{operation} failed")));
        }
        Ok(())
    }

    fn find(&self, collection: &'static str, matches: impl Fn(&Record) -> bool) -> Vec<Record> {
        *self.reads.lock().unwrap() += 1;
        self.all(collection).into_iter().filter(|d| matches(d)).collect()
    }

    fn insert_with(
        &self,
        collection: &'static str,
        mut doc: Record,
        conflicts: impl Fn(&Record, &Record) -> bool,
    ) -> InsertOutcome {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection).or_default();
        doc.remove("_id");
        if docs.iter().any(|existing| conflicts(existing, &doc)) {
            return InsertOutcome::Duplicate;
        }
        let id = ObjectId::new().to_hex();
        doc.insert("_id".into(), Value::String(id.clone()));
        docs.push(doc);
        InsertOutcome::Inserted(InsertOneResult::new(id))
    }

    fn insert_plain(&self, collection: &'static str, doc: Record) -> InsertOneResult {
        match self.insert_with(collection, doc, |_, _| false) {
            InsertOutcome::Inserted(result) => result,
            InsertOutcome::Duplicate => unreachable!("no unique key"),
        }
    }

    fn update(
        &self,
        collection: &'static str,
        id: &ObjectId,
        apply: impl FnOnce(&mut Record) -> bool,
    ) -> UpdateResult {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection).or_default();
        match docs.iter_mut().find(|doc| has_id(doc, id)) {
            Some(doc) => {
                let modified = apply(doc);
                UpdateResult::new(1, u64::from(modified))
            }
            None => UpdateResult::new(0, 0),
        }
    }

    fn delete(&self, collection: &'static str, id: &ObjectId) -> DeleteResult {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection).or_default();
        let before = docs.len();
        if let Some(pos) = docs.iter().position(|doc| has_id(doc, id)) {
            docs.remove(pos);
        }
        DeleteResult::new((before - docs.len()) as u64)
    }
}

fn has_id(doc: &Record, id: &ObjectId) -> bool {
    doc.get("_id").and_then(Value::as_str) == Some(id.to_hex().as_str())
}

fn field<'a>(doc: &'a Record, name: &str) -> Option<&'a Value> {
    doc.get(name)
}

fn set_field(doc: &mut Record, name: &str, value: &str) -> bool {
    let value = Value::String(value.to_string());
    doc.insert(name.to_string(), value.clone()) != Some(value)
}

fn same_transaction(a: &Record, b: &Record) -> bool {
    match (
        a.get("transactionId").and_then(Value::as_str),
        b.get("transactionId").and_then(Value::as_str),
    ) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[async_trait]
impl StudioStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check("ping")
    }

    async fn list_users(&self) -> StoreResult<Vec<Record>> {
        self.check("list_users")?;
        Ok(self.find(USERS, |_| true))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<Record>> {
        self.check("find_user_by_email")?;
        Ok(self
            .find(USERS, |d| field(d, "email").and_then(Value::as_str) == Some(email))
            .into_iter()
            .next())
    }

    async fn insert_user(&self, user: Record) -> StoreResult<InsertOutcome> {
        self.check("insert_user")?;
        Ok(self.insert_with(USERS, user, |a, b| {
            field(a, "email").is_some() && field(a, "email") == field(b, "email")
        }))
    }

    async fn delete_user(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.check("delete_user")?;
        Ok(self.delete(USERS, id))
    }

    async fn set_user_role(&self, id: &ObjectId, role: Role) -> StoreResult<UpdateResult> {
        self.check("set_user_role")?;
        Ok(self.update(USERS, id, |doc| set_field(doc, "role", role.as_str())))
    }

    async fn list_classes(&self) -> StoreResult<Vec<Record>> {
        self.check("list_classes")?;
        Ok(self.find(CLASSES, |_| true))
    }

    async fn insert_class(&self, class: Record) -> StoreResult<InsertOneResult> {
        self.check("insert_class")?;
        Ok(self.insert_plain(CLASSES, class))
    }

    async fn classes_by_email(&self, email: &str) -> StoreResult<Vec<Record>> {
        self.check("classes_by_email")?;
        Ok(self.find(CLASSES, |d| field(d, "email").and_then(Value::as_str) == Some(email)))
    }

    async fn approve_class(&self, id: &ObjectId) -> StoreResult<UpdateResult> {
        self.check("approve_class")?;
        Ok(self.update(CLASSES, id, |doc| set_field(doc, "status", CLASS_APPROVED)))
    }

    async fn delete_class(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.check("delete_class")?;
        Ok(self.delete(CLASSES, id))
    }

    async fn decrement_seat(&self, id: &ObjectId) -> StoreResult<UpdateResult> {
        self.check("decrement_seat")?;
        Ok(self.update(CLASSES, id, |doc| {
            let next = match doc.get("available_seat") {
                Some(Value::Number(n)) if n.is_i64() || n.is_u64() => {
                    Value::from(n.as_i64().unwrap_or(i64::MAX) - 1)
                }
                Some(Value::Number(n)) => Value::from(n.as_f64().unwrap_or_default() - 1.0),
                _ => Value::from(-1),
            };
            doc.insert("available_seat".into(), next);
            true
        }))
    }

    async fn list_instructors(&self) -> StoreResult<Vec<Record>> {
        self.check("list_instructors")?;
        Ok(self.find(INSTRUCTORS, |_| true))
    }

    async fn list_blogs(&self) -> StoreResult<Vec<Record>> {
        self.check("list_blogs")?;
        Ok(self.find(BLOGS, |_| true))
    }

    async fn insert_blog(&self, blog: Record) -> StoreResult<InsertOneResult> {
        self.check("insert_blog")?;
        Ok(self.insert_plain(BLOGS, blog))
    }

    async fn insert_cart_item(&self, item: Record) -> StoreResult<InsertOutcome> {
        self.check("insert_cart_item")?;
        Ok(self.insert_with(CARTS, item, |a, b| {
            field(a, "id") == field(b, "id") && field(a, "email") == field(b, "email")
        }))
    }

    async fn cart_items_by_email(&self, email: &str) -> StoreResult<Vec<Record>> {
        self.check("cart_items_by_email")?;
        Ok(self.find(CARTS, |d| field(d, "email").and_then(Value::as_str) == Some(email)))
    }

    async fn delete_cart_item(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.check("delete_cart_item")?;
        Ok(self.delete(CARTS, id))
    }

    async fn insert_payment(&self, payment: Record) -> StoreResult<InsertOutcome> {
        self.check("insert_payment")?;
        Ok(self.insert_with(PAYMENTS, payment, same_transaction))
    }

    async fn delete_payment(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.check("delete_payment")?;
        Ok(self.delete(PAYMENTS, id))
    }

    async fn insert_history(&self, entry: Record) -> StoreResult<InsertOutcome> {
        self.check("insert_history")?;
        Ok(self.insert_with(HISTORY, entry, same_transaction))
    }

    async fn list_history(&self) -> StoreResult<Vec<Record>> {
        self.check("list_history")?;
        Ok(self.find(HISTORY, |_| true))
    }

    async fn history_by_email(&self, email: &str) -> StoreResult<Vec<Record>> {
        self.check("history_by_email")?;
        Ok(self.find(HISTORY, |d| field(d, "email").and_then(Value::as_str) == Some(email)))
    }

    async fn find_history(&self, id: &ObjectId) -> StoreResult<Option<Record>> {
        self.check("find_history")?;
        Ok(self.find(HISTORY, |d| has_id(d, id)).into_iter().next())
    }

    async fn mark_certificate(&self, id: &ObjectId) -> StoreResult<UpdateResult> {
        self.check("mark_certificate")?;
        Ok(self.update(HISTORY, id, |doc| set_field(doc, "certificate", CERTIFICATE_ISSUED)))
    }
}

#[derive(Default)]
pub struct FakeProcessor {
    requests: Mutex<Vec<(i64, String)>>,
    reject: Mutex<Option<String>>,
}

impl FakeProcessor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reject_with(&self, message: &str) {
        *self.reject.lock().unwrap() = Some(message.to_string());
    }

    pub fn requests(&self) -> Vec<(i64, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProcessor for FakeProcessor {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> PaymentResult<PaymentIntent> {
        self.requests
            .lock()
            .unwrap()
            .push((amount, currency.to_string()));
        if let Some(message) = self.reject.lock().unwrap().clone() {
            return Err(PaymentError::Provider {
                provider: "fake".into(),
                message,
            });
        }
        Ok(PaymentIntent {
            id: format!("pi_{amount}"),
            client_secret: format!("pi_{amount}_secret"),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

pub fn test_state(store: Arc<MemoryStore>, processor: Arc<FakeProcessor>) -> AppState {
    AppState::new(store, processor, TokenKeys::new(SECRET))
}

pub fn test_app(store: Arc<MemoryStore>, processor: Arc<FakeProcessor>) -> Router {
    build_router(test_state(store, processor))
}

pub fn token_for(email: &str) -> String {
    token_signed_with(SECRET, email)
}

pub fn token_signed_with(secret: &str, email: &str) -> String {
    TokenKeys::new(secret)
        .issue(record(serde_json::json!({ "email": email })))
        .expect("token")
}

pub fn request(method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Sends one request and returns the status with the body parsed as JSON,
/// or as a JSON string when it is not JSON.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}
