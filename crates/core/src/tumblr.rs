//! Pure functions and models for the Tumblr v2 API
//!
//! This module contains zero I/O operations. The shell hands raw JSON bodies
//! to [`parse_blog_info`] and [`parse_posts_page`], which validate the
//! envelope shape and turn it into typed models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Error;

// ============================================================================
// Domain Models (Input from API)
// ============================================================================

/// Blog metadata returned by the info endpoint
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BlogInfo {
    /// Total number of published posts
    pub posts: usize,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Last update, epoch seconds
    #[serde(default)]
    pub updated: Option<i64>,
}

/// A single post returned by the posts endpoint
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourcePost {
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Publication time, epoch seconds
    pub timestamp: i64,
    #[serde(flatten)]
    pub content: PostContent,
}

/// Type-specific part of a post, selected by its `type` field
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostContent {
    Text(TextPost),
    Link(LinkPost),
    Photo(PhotoPost),
    /// Any post type other than text, link or photo
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TextPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct LinkPost {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PhotoPost {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Photo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,
    pub original_size: PhotoSize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PhotoSize {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Response envelopes

#[derive(Debug, Deserialize)]
struct InfoEnvelope {
    response: InfoResponse,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    blog: BlogInfo,
}

#[derive(Debug, Deserialize)]
struct PostsEnvelope {
    response: PostsResponse,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    posts: Vec<SourcePost>,
}

// ============================================================================
// URL Building
// ============================================================================

/// URL of the blog info endpoint
pub fn info_url(api_base: &str, blog: &str, api_key: &str) -> String {
    format!(
        "{}/blog/{blog}/info?api_key={api_key}",
        api_base.trim_end_matches('/')
    )
}

/// URL of one page of the posts endpoint
pub fn posts_url(
    api_base: &str,
    blog: &str,
    api_key: &str,
    offset: usize,
    limit: usize,
) -> String {
    format!(
        "{}/blog/{blog}/posts?api_key={api_key}&offset={offset}&limit={limit}",
        api_base.trim_end_matches('/')
    )
}

/// Convert a Unix timestamp to a formatted UTC string
pub fn format_timestamp(timestamp: Option<i64>) -> Option<String> {
    timestamp.and_then(|ts| {
        let dt = DateTime::<Utc>::from_timestamp(ts, 0)?;
        Some(dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    })
}

// ============================================================================
// Response Validation
// ============================================================================

/// Extract the blog metadata from an info response
///
/// The API answers unknown blogs and bad keys with an envelope that has no
/// `response.blog` object (often `"response": []`). Any such shape is reported
/// as [`Error::InvalidBlog`] instead of a deserialization error.
pub fn parse_blog_info(body: Value) -> Result<BlogInfo, Error> {
    serde_json::from_value::<InfoEnvelope>(body)
        .map(|envelope| envelope.response.blog)
        .map_err(|e| Error::InvalidBlog(e.to_string()))
}

/// Extract the posts from one page of the posts endpoint, in API order
pub fn parse_posts_page(body: Value) -> Result<Vec<SourcePost>, Error> {
    serde_json::from_value::<PostsEnvelope>(body)
        .map(|envelope| envelope.response.posts)
        .map_err(|e| Error::MalformedResponse(format!("posts page: {e}")))
}
