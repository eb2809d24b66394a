//! Payload model and validation rules for the todo service.
//!
//! # Overview
//! A todo travels in two shapes. `TodoPayload` is the loose wire form with
//! every field optional and stringly typed, so malformed input can still be
//! inspected and rejected with a precise message. `Todo` is the validated
//! form the storage layer works with: a real `Uuid`, non-empty text and a
//! `Status`.
//!
//! # Design
//! - `TodoPayload::validate` is the only way to get from one shape to the
//!   other, and it checks id, text and status in that order.
//! - Error `Display` strings are the exact plain-text bodies returned to
//!   clients, so the server crate never re-words them.
//! - No I/O and no async; the server crate owns both.

pub mod error;
pub mod types;
pub mod validation;

pub use error::{PayloadError, ValidationError};
pub use types::{Status, Todo, TodoPayload};
pub use validation::{parse_status_param, parse_todo_id};
