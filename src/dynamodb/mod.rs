//! # DynamoDB Module
//!
//! Storage adapter for the three record tables (users, daycares, bookings).
//!
//! ## Components
//!
//! - `DynamoDb`: A client wrapper for performing DynamoDB operations. It also
//!   implements [`DocumentStore`](crate::store::DocumentStore), which is what
//!   the handlers see.
//! - `Item`: Converts between JSON documents and DynamoDB attribute maps.
//! - `Table`: Represents a DynamoDB table configuration.
//!
//! ## Usage
//!
//! The client is built from the shared AWS SDK config, which reads:
//!
//! - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` (or the Lambda execution role)
//! - `AWS_REGION`
//!
//! Optionally, you can also set:
//! - `AWS_SESSION_TOKEN`: If you're using temporary credentials.
//! - `AWS_ENDPOINT_URL`: For using a custom endpoint (e.g., DynamoDB Local).

mod client;
pub mod item;
mod table;

pub use client::DynamoDb;
pub use item::Item;
pub use table::Table;
