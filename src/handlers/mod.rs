//! Request handlers, one per (path, method) route.
//!
//! Each handler performs its store calls and answers with a complete envelope.
//! Not-found is an ordinary 404 response; anything that goes wrong in a
//! collaborator comes back as [`RouterError`](crate::errors::RouterError).

pub mod booking;
pub mod daycare;
pub mod user;

use std::sync::Arc;

use crate::config::Config;
use crate::errors::{Result, RouterError};
use crate::store::{Document, DocumentStore, ImageStore};

/// Collaborators shared by every handler, built once at cold start.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DocumentStore>,
    pub images: Arc<dyn ImageStore>,
}

/// Reads a string field that the store needs as a key attribute. DynamoDB
/// rejects empty key strings, so those count as missing.
fn required_string<'a>(record: &'a Document, field: &'static str) -> Result<&'a str> {
    record
        .get(field)
        .and_then(|value| value.as_str())
        .filter(|value| !value.is_empty())
        .ok_or(RouterError::MissingField(field))
}
