use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use std::env;
use tracing::Level;

use crate::dynamodb::Table;

const DEFAULT_REGION: &str = "ap-south-1";
const DEFAULT_IMAGE_BUCKET: &str = "daycare-images";
// Asia/Kolkata, no DST.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Process-wide configuration, read once at cold start.
#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub users: Table,
    pub daycares: Table,
    pub bookings: Table,
    pub image_bucket: String,
    pub image_base_url: String,
    pub booking_offset: FixedOffset,
    pub log_level: Level,
    pub bootstrap_tables: bool,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let region = var("AWS_REGION", DEFAULT_REGION);
        let image_bucket = var("DAYCARE_IMAGE_BUCKET", DEFAULT_IMAGE_BUCKET);
        let image_base_url = lookup("DAYCARE_IMAGE_BASE_URL")
            .unwrap_or_else(|| format!("https://{image_bucket}.s3.{region}.amazonaws.com/"));

        let offset_minutes = match lookup("BOOKING_UTC_OFFSET_MINUTES") {
            Some(value) => value
                .parse::<i32>()
                .with_context(|| format!("parsing BOOKING_UTC_OFFSET_MINUTES value `{value}`"))?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };
        let booking_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| anyhow!("BOOKING_UTC_OFFSET_MINUTES out of range: {offset_minutes}"))?;

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => value
                .parse::<Level>()
                .map_err(|e| anyhow!("parsing LOG_LEVEL value `{value}`: {e}"))?,
            None => Level::INFO,
        };

        let bootstrap_tables = match lookup("BOOTSTRAP_TABLES") {
            Some(value) => value
                .parse::<bool>()
                .with_context(|| format!("parsing BOOTSTRAP_TABLES value `{value}`"))?,
            None => false,
        };

        Ok(Self {
            users: Table::new(var("USER_TABLE", "User"), "username", None),
            daycares: Table::new(var("DAYCARE_TABLE", "Daycares"), "daycareID", None),
            bookings: Table::new(
                var("BOOKING_TABLE", "Bookings"),
                "bookingID",
                Some("endTime"),
            ),
            region,
            image_bucket,
            image_base_url,
            booking_offset,
            log_level,
            bootstrap_tables,
        })
    }

    pub fn tables(&self) -> [&Table; 3] {
        [&self.users, &self.daycares, &self.bookings]
    }
}
