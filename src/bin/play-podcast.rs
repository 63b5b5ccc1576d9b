// ABOUTME: Serverless handler redirecting clients to streamable episode media
// ABOUTME: Polls object existence briefly, then issues a 24-hour pre-signed URL

use aws_config::BehaviorVersion;
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use podcast_catalog::config::EnvConfig;
use podcast_catalog::media::{MediaResolver, MediaVariant, S3Store};
use podcast_catalog::response::{
    bad_request_error_response, response_for_error, temporary_redirect_response,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn handler(
    resolver: &MediaResolver<S3Store>,
    event: Request,
) -> Result<Response<Body>, Error> {
    let params = event.path_parameters();
    let episode_id = match params.first("id") {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return bad_request_error_response("Episode id not provided"),
    };
    let variant = MediaVariant::from_query(event.query_string_parameters().first("content"));
    info!(episode_id = %episode_id, ?variant, "resolving episode media");

    match resolver.resolve(&episode_id, variant).await {
        Ok(location) => temporary_redirect_response(&location),
        Err(err) => {
            error!(error = %err, episode_id = %episode_id, "failed to resolve media");
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
    let resolver = MediaResolver::new(
        S3Store::new(aws_sdk_s3::Client::new(&aws_config)),
        config.data_bucket_name,
        config.data_key_prefix,
    );

    run(service_fn(|event: Request| handler(&resolver, event))).await
}
