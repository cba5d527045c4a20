use http::StatusCode;
use serde_json::{json, Value};
use tracing::info;

use super::{required_string, AppState};
use crate::errors::Result;
use crate::response::{build_response, message, ApiResponse};
use crate::store::Document;

// Fields refreshed when an existing user registers again.
const PROFILE_FIELDS: [&str; 2] = ["firstName", "lastName"];

fn user_key(username: &str) -> Document {
    Document::from_iter([("username".to_string(), Value::from(username))])
}

pub async fn get_user(state: &AppState, username: &str) -> Result<ApiResponse> {
    info!("Displaying user info for {username}");
    let user = state
        .store
        .get(&state.config.users, user_key(username))
        .await?;

    Ok(match user {
        Some(user) => build_response(StatusCode::OK, Some(&user)),
        None => message(
            StatusCode::NOT_FOUND,
            format!("Username {username} not found"),
        ),
    })
}

/// Registers a user, or treats a repeat registration as a login that
/// refreshes the profile names.
///
/// The two field updates are independent writes; a failure between them
/// leaves only the first one applied.
pub async fn create_user(state: &AppState, record: Document) -> Result<ApiResponse> {
    let username = required_string(&record, "username")?.to_string();
    let users = &state.config.users;

    let operation = if state.store.get(users, user_key(&username)).await?.is_some() {
        info!("User {username} exists, refreshing profile");
        for field in PROFILE_FIELDS {
            if let Some(value) = record.get(field) {
                state
                    .store
                    .set_field(users, user_key(&username), field, value.clone())
                    .await?;
            }
        }
        "LOGIN USER"
    } else {
        info!("Adding user {username}");
        state.store.put(users, record.clone()).await?;
        "CREATE NEW USER"
    };

    let body = json!({
        "operation": operation,
        "message": "SUCCESS",
        "item": record,
    });
    Ok(build_response(StatusCode::OK, Some(&body)))
}

/// Sets one field on a user record. There is no existence check: updating an
/// unknown username creates a record holding just that field.
pub async fn update_user(
    state: &AppState,
    username: &str,
    update_key: &str,
    update_value: Value,
) -> Result<ApiResponse> {
    info!("Updating {update_key} for user {username}");
    let updated = state
        .store
        .set_field(&state.config.users, user_key(username), update_key, update_value)
        .await?;

    let body = json!({
        "operation": "UPDATE",
        "message": "SUCCESS",
        "updatedAttributes": updated,
    });
    Ok(build_response(StatusCode::OK, Some(&body)))
}
