//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/posts` and `PUT /api/posts/{id}`.
///
/// Any well-formed JSON is accepted. `title` is only read from an object, so
/// an array or scalar body, like a wrong `title` type, is reported as a field
/// validation error rather than a body parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct PostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleField>,
}

impl PostRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(TitleField::Text(title.into())),
        }
    }
}

impl From<Value> for PostRequest {
    fn from(body: Value) -> Self {
        let title = match body {
            Value::Object(mut fields) => fields.remove("title"),
            _ => None,
        };

        Self {
            title: title.and_then(|value| match value {
                Value::Null => None,
                Value::String(text) => Some(TitleField::Text(text)),
                other => Some(TitleField::Other(other)),
            }),
        }
    }
}

/// Raw `title` value: a string, or anything else JSON allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TitleField {
    Text(String),
    Other(Value),
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
