mod bootstrap;
mod config;
mod dynamodb;
mod errors;
mod handlers;
mod images;
mod logging;
mod response;
mod router;
mod store;


use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, Region};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::handlers::AppState;
use crate::response::{ApiRequest, ApiResponse};
use crate::router::Router;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    logging::init_logging(config.log_level)?;

    let region = RegionProviderChain::default_provider().or_else(Region::new(config.region.clone()));
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;

    let ddb = dynamodb::DynamoDb::new(&sdk_config);
    if config.bootstrap_tables {
        bootstrap::ensure_tables(&ddb, &config).await?;
    }

    let images = images::S3Images::new(&sdk_config, config.image_bucket.clone());
    info!(
        "Serving tables {}, {}, {} with images from '{}'",
        config.users.name(),
        config.daycares.name(),
        config.bookings.name(),
        config.image_bucket
    );

    let router = Router::new(AppState {
        config: Arc::new(config),
        store: Arc::new(ddb),
        images: Arc::new(images),
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ApiRequest>| {
        let router = router.clone();
        async move { Ok::<ApiResponse, Error>(router.dispatch(event.payload).await) }
    }))
    .await
}
