// ABOUTME: Serverless handler listing podcast episodes with optional filters
// ABOUTME: Query params `podcast` (exact) and `in-title` (substring) AND together

use aws_config::BehaviorVersion;
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use podcast_catalog::catalog::{self, DynamoStore, EpisodeFilter};
use podcast_catalog::config::EnvConfig;
use podcast_catalog::response::{json_response, response_for_error};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn handler(
    store: &DynamoStore,
    config: &EnvConfig,
    event: Request,
) -> Result<Response<Body>, Error> {
    let params = event.query_string_parameters();
    let filter = EpisodeFilter::new(params.first("podcast"), params.first("in-title"));
    info!(?filter, "listing episodes");

    match catalog::list_episodes(store, &config.episode_table_name, &filter).await {
        Ok(episodes) => {
            info!(count = episodes.len(), "episodes listed");
            json_response(200, &episodes)
        }
        Err(err) => {
            error!(error = %err, "failed to list episodes");
            response_for_error(&err)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = EnvConfig::from_env()?;
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = DynamoStore::new(aws_sdk_dynamodb::Client::new(&aws_config));

    run(service_fn(|event: Request| {
        handler(&store, &config, event)
    }))
    .await
}
