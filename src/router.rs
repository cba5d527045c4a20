//! # Request Routing and Dispatch
//!
//! Selects exactly one handler for an incoming request from its path, method
//! and whether query parameters are present. Rules are checked top to bottom:
//!
//! | Path       | Method | Query          | Handler              |
//! |------------|--------|----------------|----------------------|
//! | `/user`    | POST   |                | create or login user |
//! | `/user`    | GET    | `username`     | get user             |
//! | `/user`    | PATCH  |                | update one field     |
//! | `/daycare` | GET    | none           | list daycares        |
//! | `/daycare` | GET    | `daycareID`    | daycare detail       |
//! | `/booking` | GET    | `username`     | active bookings      |
//! | `/booking` | POST   |                | create booking       |
//!
//! Anything else on a known path is `<Segment> URL Not Found`; an unknown path
//! is `URL Not Found`. Both are 404s.

use chrono::Utc;
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::{Result, RouterError};
use crate::handlers::{booking, daycare, user, AppState};
use crate::response::{message, ApiRequest, ApiResponse, Method};
use crate::store::Document;

const USER_PATH: &str = "/user";
const DAYCARE_PATH: &str = "/daycare";
const BOOKING_PATH: &str = "/booking";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateUserRequest {
    username: String,
    update_key: String,
    update_value: Value,
}

#[derive(Clone)]
pub struct Router {
    state: AppState,
}

impl Router {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Handles one request. Always produces an envelope.
    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        info!("Routing request: {} {}", request.http_method, request.path);

        let response = self
            .route(&request)
            .await
            .unwrap_or_else(RouterError::into_response);

        info!("Responding {}", response.status());
        response
    }

    async fn route(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let state = &self.state;
        let method = request.http_method.parse::<Method>().ok();

        match (request.path.as_str(), method) {
            (USER_PATH, Some(Method::Post)) => user::create_user(state, json_body(request)?).await,
            (USER_PATH, Some(Method::Get)) => {
                user::get_user(state, query_param(request, "username")?).await
            }
            (USER_PATH, Some(Method::Patch)) => {
                let update: UpdateUserRequest = serde_json::from_str(raw_body(request)?)?;
                user::update_user(
                    state,
                    &update.username,
                    &update.update_key,
                    update.update_value,
                )
                .await
            }
            (USER_PATH, _) => Ok(message(StatusCode::NOT_FOUND, "User URL Not Found")),

            (DAYCARE_PATH, Some(Method::Get)) => match request.query() {
                None => daycare::list_daycares(state).await,
                Some(_) => daycare::get_daycare(state, query_param(request, "daycareID")?).await,
            },
            (DAYCARE_PATH, _) => Ok(message(StatusCode::NOT_FOUND, "Daycare URL Not Found")),

            (BOOKING_PATH, Some(Method::Get)) => {
                booking::list_active_bookings(state, query_param(request, "username")?, Utc::now())
                    .await
            }
            (BOOKING_PATH, Some(Method::Post)) => {
                booking::create_booking(state, json_body(request)?).await
            }
            (BOOKING_PATH, _) => Ok(message(StatusCode::NOT_FOUND, "Booking URL Not Found")),

            _ => Ok(message(StatusCode::NOT_FOUND, "URL Not Found")),
        }
    }
}

fn query_param<'a>(request: &'a ApiRequest, name: &'static str) -> Result<&'a str> {
    request
        .query()
        .and_then(|params| params.get(name))
        .map(String::as_str)
        .ok_or(RouterError::MissingQueryParameter(name))
}

fn raw_body(request: &ApiRequest) -> Result<&str> {
    request.body.as_deref().ok_or(RouterError::MissingBody)
}

fn json_body(request: &ApiRequest) -> Result<Document> {
    Ok(serde_json::from_str(raw_body(request)?)?)
}
