use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: bool,
    pub kind: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Either an insert summary or the `[]` sentinel that clients read as
/// "already exists".
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum InsertOrExisting<T> {
    Inserted(T),
    Existing(Vec<serde_json::Value>),
}

impl<T> InsertOrExisting<T> {
    pub fn existing() -> Self {
        InsertOrExisting::Existing(Vec::new())
    }

    pub fn is_existing(&self) -> bool {
        matches!(self, InsertOrExisting::Existing(_))
    }
}
