// ABOUTME: Environment configuration read once at process start
// ABOUTME: Missing variables are a startup-fatal misconfiguration, not a per-request error

use crate::error::{PodcastError, Result};

const ENV_EPISODE_TABLE_NAME: &str = "PODCAST_EPISODE_TABLE_NAME";
const ENV_DATA_BUCKET_NAME: &str = "PODCAST_DATA_BUCKET_NAME";
const ENV_DATA_KEY_PREFIX: &str = "PODCAST_DATA_KEY_PREFIX";

/// Configuration shared by the handler binaries.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// DynamoDB table holding podcast episode records.
    pub episode_table_name: String,
    /// S3 bucket holding media and transcript artifacts.
    pub data_bucket_name: String,
    /// Key prefix all episode artifacts are stored under.
    pub data_key_prefix: String,
}

impl EnvConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a lookup function. Seam for tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            episode_table_name: required(&lookup, ENV_EPISODE_TABLE_NAME)?,
            data_bucket_name: required(&lookup, ENV_DATA_BUCKET_NAME)?,
            data_key_prefix: required(&lookup, ENV_DATA_KEY_PREFIX)?,
        })
    }
}

fn required(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(PodcastError::Misconfiguration(format!(
            "{} environment variable not set",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env(name: &str) -> Option<String> {
        match name {
            ENV_EPISODE_TABLE_NAME => Some("episodes".to_string()),
            ENV_DATA_BUCKET_NAME => Some("podcast-data".to_string()),
            ENV_DATA_KEY_PREFIX => Some("podcasts/".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_loads_all_variables() {
        let config = EnvConfig::from_lookup(full_env).unwrap();
        assert_eq!(config.episode_table_name, "episodes");
        assert_eq!(config.data_bucket_name, "podcast-data");
        assert_eq!(config.data_key_prefix, "podcasts/");
    }

    #[test]
    fn test_missing_variable_is_misconfiguration() {
        let result = EnvConfig::from_lookup(|name| {
            if name == ENV_EPISODE_TABLE_NAME {
                None
            } else {
                full_env(name)
            }
        });
        match result {
            Err(PodcastError::Misconfiguration(msg)) => {
                assert!(msg.contains(ENV_EPISODE_TABLE_NAME));
            }
            other => panic!("expected Misconfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_variable_is_misconfiguration() {
        let result = EnvConfig::from_lookup(|name| {
            if name == ENV_DATA_BUCKET_NAME {
                Some(String::new())
            } else {
                full_env(name)
            }
        });
        assert!(matches!(result, Err(PodcastError::Misconfiguration(_))));
    }
}
