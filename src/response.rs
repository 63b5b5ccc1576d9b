// ABOUTME: HTTP response envelope helpers shared by the handler binaries
// ABOUTME: JSON payloads, structured error bodies, and temporary redirects

use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::{Body, Response};
use serde::Serialize;

use crate::error::PodcastError;

/// Structured message for API errors sent to the client.
#[derive(Debug, Serialize)]
pub struct ErrorMessageResponse {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// Serialize a payload as a JSON response with the given status.
pub fn json_response<T: Serialize>(
    status: u16,
    payload: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    let body = serde_json::to_string_pretty(payload)?;
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .map_err(Box::new)?)
}

/// HTTP 307 redirect to the target location.
pub fn temporary_redirect_response(
    location: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(307)
        .header("location", location)
        .body(Body::Empty)
        .map_err(Box::new)?)
}

/// HTTP 400 BadRequest envelope.
pub fn bad_request_error_response(
    message: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    error_message_response(400, "BadRequestError", message)
}

/// HTTP 404 NotFound envelope.
pub fn not_found_error_response(message: &str) -> Result<Response<Body>, lambda_http::Error> {
    error_message_response(404, "NotFoundError", message)
}

/// HTTP 429 TooManyRequests envelope.
pub fn too_many_requests_error_response(
    message: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    error_message_response(429, "TooManyRequestsError", message)
}

/// Envelope for a taxonomy error: `{Code, Message}` with the code-prefixed
/// message, at the status the error maps to.
pub fn response_for_error(err: &PodcastError) -> Result<Response<Body>, lambda_http::Error> {
    match err {
        PodcastError::NotFound(message) => not_found_error_response(message),
        PodcastError::Throttled(message) => too_many_requests_error_response(message),
        _ => error_message_response(err.status_code(), err.code(), err.detail()),
    }
}

fn error_message_response(
    status: u16,
    code: &str,
    message: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    json_response(
        status,
        &ErrorMessageResponse {
            code: code.to_string(),
            message: format!("{}: {}", code, message),
        },
    )
}
