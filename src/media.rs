// ABOUTME: Media resolution: variant parsing, existence polling, pre-signed locators
// ABOUTME: Object-store seam over S3 head/presign with bounded wait for fresh uploads

use std::future::Future;
use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::episode::{raw_media_key, transcription_key};
use crate::error::{PodcastError, Result};

/// How long to wait between existence checks.
pub const EXISTENCE_POLL_INTERVAL: Duration = Duration::from_secs(3);
/// How many existence checks to make before giving up.
pub const EXISTENCE_POLL_ATTEMPTS: u32 = 6;
/// Validity window of an issued media locator.
pub const MEDIA_URL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Which artifact of an episode is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaVariant {
    /// The raw media object.
    Raw,
    /// The transcript text object.
    Text,
}

impl MediaVariant {
    /// Parse the `content` query parameter. `text` selects the transcript;
    /// anything else, including an absent parameter, selects raw media.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("text") => MediaVariant::Text,
            _ => MediaVariant::Raw,
        }
    }
}

/// Object-store seam for media resolution. The production implementation
/// wraps the S3 client; tests substitute fakes with scripted visibility.
pub trait ObjectStore: Send + Sync {
    /// Whether the object currently exists. Absence is `Ok(false)`; only
    /// unexpected store faults are errors.
    fn object_exists(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Issue a time-limited, credential-free GET locator for the object.
    fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// S3-backed [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ObjectStore for S3Store {
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(PodcastError::StoreUnavailable(format!(
                "failed to check object {}: {}",
                key, err
            ))),
        }
    }

    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(|err| {
            PodcastError::StoreUnavailable(format!("invalid presigning window: {}", err))
        })?;
        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|err| {
                PodcastError::StoreUnavailable(format!("failed to presign {}: {}", key, err))
            })?;
        Ok(request.uri().to_string())
    }
}

/// Resolves an episode's media artifact to a time-limited locator, waiting a
/// bounded period for recently-uploaded objects to become visible.
#[derive(Debug)]
pub struct MediaResolver<S> {
    store: S,
    bucket: String,
    key_prefix: String,
    poll_interval: Duration,
    poll_attempts: u32,
    url_ttl: Duration,
}

impl<S: ObjectStore> MediaResolver<S> {
    pub fn new(store: S, bucket: impl Into<String>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            key_prefix: key_prefix.into(),
            poll_interval: EXISTENCE_POLL_INTERVAL,
            poll_attempts: EXISTENCE_POLL_ATTEMPTS,
            url_ttl: MEDIA_URL_TTL,
        }
    }

    /// Override the polling cadence. Used by tests to avoid real sleeps.
    pub fn with_polling(mut self, interval: Duration, attempts: u32) -> Self {
        self.poll_interval = interval;
        self.poll_attempts = attempts;
        self
    }

    /// Object key for the requested variant of the episode.
    pub fn media_key(&self, episode_id: &str, variant: MediaVariant) -> String {
        match variant {
            MediaVariant::Raw => raw_media_key(&self.key_prefix, episode_id),
            MediaVariant::Text => transcription_key(&self.key_prefix, episode_id),
        }
    }

    /// Resolve the episode's artifact to a pre-signed locator. `NotFound`
    /// when the object does not become visible within the polling budget.
    pub async fn resolve(&self, episode_id: &str, variant: MediaVariant) -> Result<String> {
        let key = self.media_key(episode_id, variant);
        if !self.wait_for_object(&key).await? {
            return Err(PodcastError::NotFound(format!(
                "Episode media data not found, {}",
                key
            )));
        }
        info!(key = %key, "issuing media locator");
        self.store
            .presigned_get_url(&self.bucket, &key, self.url_ttl)
            .await
    }

    /// Poll existence at a fixed interval, checking at most `poll_attempts`
    /// times. The sleep stays cancellable by the platform timeout.
    async fn wait_for_object(&self, key: &str) -> Result<bool> {
        for attempt in 1..=self.poll_attempts {
            if self.store.object_exists(&self.bucket, key).await? {
                return Ok(true);
            }
            debug!(key = %key, attempt, "media object not visible yet");
            if attempt < self.poll_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }
        Ok(false)
    }
}
