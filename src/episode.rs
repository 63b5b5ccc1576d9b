// ABOUTME: Podcast episode types and object-key derivation
// ABOUTME: Projected record shapes plus lenient unmarshalling from DynamoDB items

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};

/// A DynamoDB item as returned by the store.
pub type Item = HashMap<String, AttributeValue>;

/// Episode fields returned when listing the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Opaque episode identifier.
    pub id: String,
    /// Episode title.
    pub title: String,
    /// Parent show name.
    pub podcast: String,
}

/// Episode fields returned when describing a single episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeDetail {
    /// Opaque episode identifier.
    pub id: String,
    /// Episode title.
    pub title: String,
    /// Episode description.
    pub description: String,
    /// Parent show name.
    pub podcast: String,
    /// Processing status of the episode.
    pub status: EpisodeStatus,
}

/// Processing status of an episode record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    Pending,
    Uploading,
    Transcribing,
    Processing,
    Complete,
    Failure,
    /// Unrecognized or absent status. Serialized as the empty string.
    #[serde(rename = "", other)]
    Unknown,
}

impl EpisodeStatus {
    /// Parse a status string. Unrecognized values become `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => EpisodeStatus::Pending,
            "uploading" => EpisodeStatus::Uploading,
            "transcribing" => EpisodeStatus::Transcribing,
            "processing" => EpisodeStatus::Processing,
            "complete" => EpisodeStatus::Complete,
            "failure" => EpisodeStatus::Failure,
            _ => EpisodeStatus::Unknown,
        }
    }
}

impl EpisodeSummary {
    /// Build a summary from a projected DynamoDB item.
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: string_attr(item, "id"),
            title: string_attr(item, "title"),
            podcast: string_attr(item, "podcast"),
        }
    }
}

impl EpisodeDetail {
    /// Build a detail record from a projected DynamoDB item.
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: string_attr(item, "id"),
            title: string_attr(item, "title"),
            description: string_attr(item, "description"),
            podcast: string_attr(item, "podcast"),
            status: EpisodeStatus::parse(&string_attr(item, "status")),
        }
    }
}

/// Extract a string attribute, empty when absent or not a string.
fn string_attr(item: &Item, name: &str) -> String {
    match item.get(name) {
        Some(AttributeValue::S(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Object prefix all artifacts for an episode are stored under.
pub fn episode_prefix(key_prefix: &str, episode_id: &str) -> String {
    format!("{}{}/", key_prefix, episode_id)
}

/// Object key for the episode's raw media artifact.
pub fn raw_media_key(key_prefix: &str, episode_id: &str) -> String {
    episode_prefix(key_prefix, episode_id) + "raw-media"
}

/// Object key for the episode's transcript artifact.
pub fn transcription_key(key_prefix: &str, episode_id: &str) -> String {
    episode_prefix(key_prefix, episode_id) + "transcription.txt"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, &str)]) -> Item {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), AttributeValue::S(v.to_string())))
            .collect()
    }

    #[test]
    fn test_media_keys() {
        assert_eq!(raw_media_key("podcasts/", "ep1"), "podcasts/ep1/raw-media");
        assert_eq!(
            transcription_key("podcasts/", "ep1"),
            "podcasts/ep1/transcription.txt"
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(EpisodeStatus::parse("complete"), EpisodeStatus::Complete);
        assert_eq!(EpisodeStatus::parse("pending"), EpisodeStatus::Pending);
        assert_eq!(EpisodeStatus::parse("bogus"), EpisodeStatus::Unknown);
        assert_eq!(EpisodeStatus::parse(""), EpisodeStatus::Unknown);
    }

    #[test]
    fn test_status_serializes_as_lowercase_string() {
        assert_eq!(
            serde_json::to_string(&EpisodeStatus::Complete).unwrap(),
            "\"complete\""
        );
        assert_eq!(
            serde_json::to_string(&EpisodeStatus::Unknown).unwrap(),
            "\"\""
        );
    }

    #[test]
    fn test_summary_from_item() {
        let summary = EpisodeSummary::from_item(&item(&[
            ("id", "ep1"),
            ("title", "Space"),
            ("podcast", "Radiolab"),
        ]));
        assert_eq!(summary.id, "ep1");
        assert_eq!(summary.title, "Space");
        assert_eq!(summary.podcast, "Radiolab");
    }

    #[test]
    fn test_detail_from_item_tolerates_missing_attributes() {
        let detail = EpisodeDetail::from_item(&item(&[("id", "ep1")]));
        assert_eq!(detail.id, "ep1");
        assert_eq!(detail.title, "");
        assert_eq!(detail.status, EpisodeStatus::Unknown);
    }
}
