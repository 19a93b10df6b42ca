use mongodb::bson::{self, Bson, Document};
use serde_json::{Number, Value};

use super::{Record, StoreError, StoreResult};

/// Converts an incoming record into a BSON document, dropping any
/// client-supplied `_id` so the store assigns one.
pub fn record_to_document(mut record: Record) -> StoreResult<Document> {
    record.remove("_id");
    bson::to_document(&record).map_err(|e| StoreError::Conversion(e.to_string()))
}

pub fn document_to_record(doc: Document) -> Record {
    doc.into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Object ids become hex strings and dates RFC 3339 strings; everything else
/// keeps its natural JSON form.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        Bson::Document(doc) => Value::Object(document_to_record(doc)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::Null | Bson::Undefined => Value::Null,
        other => other.into_relaxed_extjson(),
    }
}

pub fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}
