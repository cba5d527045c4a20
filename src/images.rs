//! S3-backed listing of daycare images.
//!
//! Images live under `<daycareID>/...` in a single bucket. The router only
//! needs their keys; turning a key into a public URL is the daycare handler's job.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::store::ImageStore;

#[derive(Debug, Clone)]
pub struct S3Images {
    client: Client,
    bucket: String,
}

impl S3Images {
    pub fn new(sdk_config: &aws_config::SdkConfig, bucket: impl Into<String>) -> Self {
        Self {
            client: Client::new(sdk_config),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ImageStore for S3Images {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token)
                .send()
                .await
                .with_context(|| format!("list_objects_v2 on '{}'", self.bucket))?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            continuation_token = response.next_continuation_token().map(str::to_string);

            if continuation_token.is_none() {
                break;
            }
        }

        debug!("Listed {} objects under '{prefix}'", keys.len());
        Ok(keys)
    }
}
