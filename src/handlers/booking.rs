use chrono::{DateTime, Duration, FixedOffset, Utc};
use http::StatusCode;
use serde_json::json;
use tracing::info;

use super::{required_string, AppState};
use crate::errors::Result;
use crate::response::{build_response, message, ApiResponse};
use crate::store::{Document, KeyCondition};

/// Stored `endTime` values are local time with microseconds and no offset,
/// 26 characters long. The cutoff uses the same layout so that plain string
/// comparison orders them correctly.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A booking is active while its end is more than this far in the future.
const ACTIVE_LEAD_HOURS: i64 = 1;

pub fn cutoff_time(now: DateTime<Utc>, offset: FixedOffset) -> String {
    (now.with_timezone(&offset) + Duration::hours(ACTIVE_LEAD_HOURS))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub async fn list_active_bookings(
    state: &AppState,
    username: &str,
    now: DateTime<Utc>,
) -> Result<ApiResponse> {
    let cutoff = cutoff_time(now, state.config.booking_offset);
    info!("Listing bookings for {username} ending after {cutoff}");

    // Bookings are keyed by the username that made them.
    let condition = KeyCondition::partition(username).sort_after(cutoff);
    let bookings = state
        .store
        .query(&state.config.bookings, &condition)
        .await?;

    if bookings.is_empty() {
        return Ok(message(
            StatusCode::NOT_FOUND,
            format!("Booking not found for user {username}"),
        ));
    }
    Ok(build_response(StatusCode::OK, Some(&bookings)))
}

/// Stores the booking as sent, replacing any booking with the same
/// `bookingID` and `endTime`.
pub async fn create_booking(state: &AppState, record: Document) -> Result<ApiResponse> {
    let booking_id = required_string(&record, "bookingID")?;
    required_string(&record, "endTime")?;
    info!("Adding booking {booking_id}");

    state
        .store
        .put(&state.config.bookings, record.clone())
        .await?;

    let body = json!({
        "operation": "CREATE NEW BOOKING",
        "message": "SUCCESS",
        "item": record,
    });
    Ok(build_response(StatusCode::OK, Some(&body)))
}
