// ABOUTME: Content-type resolution for ingested media streams
// ABOUTME: Ordered fallback chain: declared type, upstream header, URL extension

use crate::error::{PodcastError, Result};

/// The generic placeholder type feeds never count as a real declaration.
const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

/// Resolve the content type to commit an uploaded stream under. Resolvers
/// are tried in order; the first non-empty answer wins. Ingestion must not
/// proceed with an unknown content type.
pub fn resolve_content_type(
    declared: &str,
    upstream_header: Option<&str>,
    url: &str,
) -> Result<String> {
    let resolvers: [&dyn Fn() -> Option<String>; 3] = [
        &|| declared_type(declared),
        &|| header_type(upstream_header),
        &|| extension_type(url),
    ];
    for resolve in &resolvers {
        if let Some(content_type) = resolve() {
            return Ok(content_type);
        }
    }
    Err(PodcastError::UnresolvableContentType(format!(
        "could not resolve content type for {}",
        url
    )))
}

/// The feed-declared type, unless empty or the generic placeholder.
fn declared_type(declared: &str) -> Option<String> {
    let declared = declared.trim();
    if declared.is_empty() || declared == GENERIC_CONTENT_TYPE {
        None
    } else {
        Some(declared.to_string())
    }
}

/// The Content-Type header of the fetched upstream resource.
fn header_type(header: Option<&str>) -> Option<String> {
    header
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Guess from the URL's file extension.
fn extension_type(url: &str) -> Option<String> {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = name.rsplit_once('.')?;
    mime_for_extension(&extension.to_ascii_lowercase()).map(str::to_string)
}

/// MIME types for the media formats podcast feeds carry.
fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "mp3" => Some("audio/mpeg"),
        "m4a" => Some("audio/mp4"),
        "aac" => Some("audio/aac"),
        "ogg" | "oga" => Some("audio/ogg"),
        "opus" => Some("audio/opus"),
        "flac" => Some("audio/flac"),
        "wav" => Some("audio/wav"),
        "mp4" | "m4v" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_wins() {
        let resolved =
            resolve_content_type("audio/mpeg", Some("text/html"), "https://x.example/a.wav");
        assert_eq!(resolved.unwrap(), "audio/mpeg");
    }

    #[test]
    fn test_empty_declared_falls_back_to_header() {
        let resolved = resolve_content_type("", Some("audio/mpeg"), "https://x.example/episode");
        assert_eq!(resolved.unwrap(), "audio/mpeg");
    }

    #[test]
    fn test_generic_declared_falls_back_to_extension() {
        let resolved =
            resolve_content_type(GENERIC_CONTENT_TYPE, None, "https://x.example/ep.mp3");
        assert_eq!(resolved.unwrap(), "audio/mpeg");
    }

    #[test]
    fn test_extension_guess_ignores_query_string() {
        let resolved = resolve_content_type("", None, "https://x.example/feed/ep.m4a?auth=abc#t=1");
        assert_eq!(resolved.unwrap(), "audio/mp4");
    }

    #[test]
    fn test_all_sources_empty_is_unresolvable() {
        let result = resolve_content_type("", None, "https://x.example/episode");
        assert!(matches!(
            result,
            Err(PodcastError::UnresolvableContentType(_))
        ));
    }

    #[test]
    fn test_unknown_extension_is_unresolvable() {
        let result = resolve_content_type("", Some("  "), "https://x.example/ep.xyz");
        assert!(matches!(
            result,
            Err(PodcastError::UnresolvableContentType(_))
        ));
    }
}
