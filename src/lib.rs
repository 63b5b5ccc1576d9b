// ABOUTME: Podcast catalog library shared by the serverless handler binaries
// ABOUTME: Episode listing/detail against DynamoDB and media redirects via S3

pub mod catalog;
pub mod config;
pub mod content_type;
pub mod episode;
pub mod error;
pub mod media;
pub mod response;
