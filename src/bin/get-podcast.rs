// ABOUTME: Serverless handler describing one podcast episode by id
// ABOUTME: Point lookup with a restricted projection; absent items are a 404

use aws_config::BehaviorVersion;
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use podcast_catalog::catalog::{self, DynamoStore};
use podcast_catalog::config::EnvConfig;
use podcast_catalog::response::{
    bad_request_error_response, json_response, not_found_error_response, response_for_error,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn handler(
    store: &DynamoStore,
    config: &EnvConfig,
    event: Request,
) -> Result<Response<Body>, Error> {
    let params = event.path_parameters();
    let episode_id = match params.first("id") {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return bad_request_error_response("Episode id not provided"),
    };
    info!(episode_id = %episode_id, "describing episode");

    match catalog::get_episode(store, &config.episode_table_name, &episode_id).await {
        Ok(Some(episode)) => json_response(200, &episode),
        Ok(None) => not_found_error_response("Podcast not found"),
        Err(err) => {
            error!(error = %err, episode_id = %episode_id, "failed to get episode");
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
