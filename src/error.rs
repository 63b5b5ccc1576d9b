// ABOUTME: Error taxonomy for the podcast catalog handlers
// ABOUTME: Every store/config fault maps to exactly one variant before leaving a module

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PodcastError>;

/// Errors surfaced by the catalog, media, and ingestion components.
#[derive(Debug, thiserror::Error)]
pub enum PodcastError {
    /// Item or object absent. A modeled, expected outcome, never a fault.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing store asked us to slow down.
    #[error("throttled: {0}")]
    Throttled(String),

    /// Transient infrastructure fault in the backing store or object store.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// No content type could be determined for an uploaded stream.
    #[error("unresolvable content type: {0}")]
    UnresolvableContentType(String),

    /// Required configuration missing at startup.
    #[error("misconfiguration: {0}")]
    Misconfiguration(String),
}

impl PodcastError {
    /// HTTP status the error maps to in the response envelope.
    pub fn status_code(&self) -> u16 {
        match self {
            PodcastError::NotFound(_) => 404,
            PodcastError::Throttled(_) => 429,
            PodcastError::StoreUnavailable(_)
            | PodcastError::UnresolvableContentType(_)
            | PodcastError::Misconfiguration(_) => 500,
        }
    }

    /// Error code string used in the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            PodcastError::NotFound(_) => "NotFoundError",
            PodcastError::Throttled(_) => "TooManyRequestsError",
            PodcastError::StoreUnavailable(_)
            | PodcastError::UnresolvableContentType(_)
            | PodcastError::Misconfiguration(_) => "InternalServerError",
        }
    }

    /// Detail message without the code prefix.
    pub fn detail(&self) -> &str {
        match self {
            PodcastError::NotFound(m)
            | PodcastError::Throttled(m)
            | PodcastError::StoreUnavailable(m)
            | PodcastError::UnresolvableContentType(m)
            | PodcastError::Misconfiguration(m) => m,
        }
    }
}
