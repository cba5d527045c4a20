use http::StatusCode;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::AppState;
use crate::errors::Result;
use crate::response::{build_response, message, ApiResponse};
use crate::store::KeyCondition;

/// Fields returned by the daycare listing.
pub const SUMMARY_FIELDS: [&str; 4] = ["daycareID", "name", "image", "region"];

pub async fn list_daycares(state: &AppState) -> Result<ApiResponse> {
    info!("Displaying daycares");
    // TODO: switch to a query on region once the table has a region index.
    let daycares = state
        .store
        .scan_projected(&state.config.daycares, &SUMMARY_FIELDS)
        .await?;

    if daycares.is_empty() {
        return Ok(message(StatusCode::NOT_FOUND, "Daycares not found"));
    }
    Ok(build_response(StatusCode::OK, Some(&daycares)))
}

/// Returns every record for the daycare followed by one trailing array of
/// image URLs: `[record, ..., ["https://...", ...]]`.
pub async fn get_daycare(state: &AppState, daycare_id: &str) -> Result<ApiResponse> {
    info!("Getting daycare info for daycare {daycare_id}");
    let records = state
        .store
        .query(&state.config.daycares, &KeyCondition::partition(daycare_id))
        .await?;

    if records.is_empty() {
        return Ok(message(
            StatusCode::NOT_FOUND,
            format!("Daycare {daycare_id} not found"),
        ));
    }

    // The trailing slash keeps `d1` from matching keys under `d10/`.
    let keys = state.images.list_keys(&format!("{daycare_id}/")).await?;
    let urls = image_urls(&state.config.image_base_url, keys);

    let mut body: Vec<Value> = records.into_iter().map(Value::Object).collect();
    body.push(json!(urls));
    Ok(build_response(StatusCode::OK, Some(&body)))
}

/// Maps object keys to public URLs, dropping the first key, which is the
/// folder marker for the daycare's prefix.
pub fn image_urls(base_url: &str, keys: Vec<String>) -> Vec<String> {
    if let Some(first) = keys.first() {
        if !first.ends_with('/') {
            warn!("Dropping first image key '{first}', which is not a folder marker");
        }
    }
    keys.into_iter()
        .skip(1)
        .map(|key| format!("{base_url}{key}"))
        .collect()
}
