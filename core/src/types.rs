//! Domain and wire types for todos.
//!
//! # Design
//! `Todo` is what gets stored and returned; it can only hold valid values.
//! `TodoPayload` is what clients send. Its fields stay `Option<String>` so a
//! body like `{"id":"nope","text":""}` deserializes cleanly and validation
//! gets to report the first broken rule with its fixed message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{PayloadError, ValidationError};
use crate::validation;

/// Completion state of a todo, `N` on the wire for not done and `D` for done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "N")]
    NotDone,
    #[serde(rename = "D")]
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotDone => "N",
            Status::Done => "D",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Status::NotDone),
            "D" => Ok(Status::Done),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}

/// A validated todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    pub status: Status,
}

/// A todo as sent by a client. Every field may be missing or malformed
/// until `validate` has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPayload {
    pub id: Option<String>,
    pub text: Option<String>,
    pub status: Option<String>,
}

impl TodoPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: Some(text.into()),
            status: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Fill a missing id with a fresh random UUID and a missing status with
    /// `N`. Fields that are already set are left alone, even if invalid.
    pub fn assign_defaults(&mut self) {
        if self.id.is_none() {
            self.id = Some(Uuid::new_v4().to_string());
        }
        if self.status.is_none() {
            self.status = Some(Status::default().as_str().to_string());
        }
    }

    /// Parse a raw JSON request body.
    pub fn from_json(body: &[u8]) -> Result<Self, PayloadError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Key-value form with the keys `id`, `text` and `status`.
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "text": self.text,
            "status": self.status,
        })
    }

    /// Check id format, then text, then status, and build a `Todo`.
    pub fn validate(&self) -> Result<Todo, ValidationError> {
        let id = validation::parse_todo_id(self.id.as_deref().unwrap_or_default())?;
        let text = validation::require_text(self.text.as_deref())?;
        let status = self
            .status
            .as_deref()
            .ok_or(ValidationError::InvalidStatus)?
            .parse()?;

        Ok(Todo {
            id,
            text: text.to_string(),
            status,
        })
    }
}

impl From<Todo> for TodoPayload {
    fn from(todo: Todo) -> Self {
        Self {
            id: Some(todo.id.to_string()),
            text: Some(todo.text),
            status: Some(todo.status.as_str().to_string()),
        }
    }
}
