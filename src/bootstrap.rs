//! Cold-start table provisioning for fresh accounts and DynamoDB Local.
//!
//! Request handling never retries; only table creation here does, since a
//! freshly created account can briefly reject control-plane calls.

use anyhow::{anyhow, Result};
use std::future::Future;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::config::Config;
use crate::dynamodb::DynamoDb;

const INITIAL_DELAY: Duration = Duration::from_secs(3);
const MAX_RETRIES: usize = 5;

/// Creates whichever of the three tables are missing.
pub async fn ensure_tables(ddb: &DynamoDb, config: &Config) -> Result<()> {
    ddb.check_auth().await?;

    for table in config.tables() {
        let created = retry_with_backoff(
            || ddb.create_table_if_not_exists(table),
            INITIAL_DELAY,
            MAX_RETRIES,
        )
        .await
        .map_err(|e| anyhow!("Failed to provision table '{}': {e:?}", table.name()))?;

        if created.is_some() {
            info!("Provisioned table '{}'", table.name());
        }
    }
    Ok(())
}

/// Retries `operation` with Fibonacci-spaced delays, giving up after
/// `max_retries` failed retries.
pub async fn retry_with_backoff<T, E, Fut, F>(
    operation: F,
    initial_delay: Duration,
    max_retries: usize,
) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
{
    let mut attempt = 0;
    let (mut delay, mut next_delay) = (initial_delay, initial_delay);

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                warn!("Attempt {attempt}/{max_retries} failed: {e:?}. Retrying in {delay:?}");
                sleep(delay).await;
                (delay, next_delay) = (next_delay, delay + next_delay);
            }
            Err(e) => return Err(e),
        }
    }
}
