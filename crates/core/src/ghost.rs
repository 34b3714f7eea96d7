//! Ghost import document models
//!
//! Field names, `null`s and integer flags mirror the layout the Ghost importer
//! expects from a JSON export file.

use serde::{Deserialize, Serialize};

/// Author id every imported post and tag is attributed to
pub const DEFAULT_AUTHOR_ID: u64 = 1;

/// Export format version written into `meta.version`
pub const EXPORT_VERSION: &str = "000";

pub const POST_STATUS: &str = "published";
pub const POST_LANGUAGE: &str = "en_US";

/// A single post in the Ghost import format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GhostPost {
    pub title: Option<String>,
    pub slug: String,
    pub markdown: String,
    pub html: String,
    pub image: Option<String>,
    pub featured: u8,
    pub page: u8,
    pub status: String,
    pub language: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub author_id: u64,
    pub created_at: i64,
    pub created_by: u64,
    pub updated_at: i64,
    pub updated_by: u64,
    pub published_at: i64,
    pub published_by: u64,
}

impl GhostPost {
    /// Build a published post with the default author and metadata
    ///
    /// `timestamp_ms` is reused for the created, updated and published times.
    pub fn published(
        title: Option<String>,
        slug: String,
        markdown: String,
        html: String,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            title,
            slug,
            markdown,
            html,
            image: None,
            featured: 0,
            page: 0,
            status: POST_STATUS.to_string(),
            language: POST_LANGUAGE.to_string(),
            meta_title: None,
            meta_description: None,
            author_id: DEFAULT_AUTHOR_ID,
            created_at: timestamp_ms,
            created_by: DEFAULT_AUTHOR_ID,
            updated_at: timestamp_ms,
            updated_by: DEFAULT_AUTHOR_ID,
            published_at: timestamp_ms,
            published_by: DEFAULT_AUTHOR_ID,
        }
    }
}

/// A tag in the Ghost import format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GhostTag {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<u64>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: i64,
    pub created_by: u64,
    pub updated_at: i64,
    pub updated_by: u64,
}

impl GhostTag {
    pub fn new(name: String, slug: String, created_at_ms: i64) -> Self {
        Self {
            name,
            slug,
            description: None,
            parent_id: None,
            meta_title: None,
            meta_description: None,
            created_at: created_at_ms,
            created_by: DEFAULT_AUTHOR_ID,
            updated_at: created_at_ms,
            updated_by: DEFAULT_AUTHOR_ID,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportMeta {
    /// Export time, epoch milliseconds
    pub exported_on: i64,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportData {
    pub posts: Vec<GhostPost>,
    pub tags: Vec<GhostTag>,
}

/// The complete payload handed to the Ghost importer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportDocument {
    pub meta: ExportMeta,
    pub data: ExportData,
}

impl ExportDocument {
    pub fn new(posts: Vec<GhostPost>, tags: Vec<GhostTag>, exported_on_ms: i64) -> Self {
        Self {
            meta: ExportMeta {
                exported_on: exported_on_ms,
                version: EXPORT_VERSION.to_string(),
            },
            data: ExportData { posts, tags },
        }
    }
}

/// Current time as whole seconds scaled to milliseconds
///
/// Ghost timestamps are milliseconds, but exports are stamped at one-second
/// resolution.
pub fn export_timestamp(now: chrono::DateTime<chrono::Utc>) -> i64 {
    now.timestamp() * 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_post_serializes_importer_fields() {
        let post = GhostPost::published(
            Some("Title".to_string()),
            "slug".to_string(),
            "md".to_string(),
            "<p>html</p>".to_string(),
            1_000_000,
        );

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Title",
                "slug": "slug",
                "markdown": "md",
                "html": "<p>html</p>",
                "image": null,
                "featured": 0,
                "page": 0,
                "status": "published",
                "language": "en_US",
                "meta_title": null,
                "meta_description": null,
                "author_id": 1,
                "created_at": 1000000,
                "created_by": 1,
                "updated_at": 1000000,
                "updated_by": 1,
                "published_at": 1000000,
                "published_by": 1
            })
        );
    }

    #[test]
    fn test_tag_serializes_importer_fields() {
        let tag = GhostTag::new("Rust".to_string(), "rust".to_string(), 5000);

        let value = serde_json::to_value(&tag).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Rust",
                "slug": "rust",
                "description": null,
                "parent_id": null,
                "meta_title": null,
                "meta_description": null,
                "created_at": 5000,
                "created_by": 1,
                "updated_at": 5000,
                "updated_by": 1
            })
        );
    }

    #[test]
    fn test_document_layout() {
        let doc = ExportDocument::new(vec![], vec![], 42000);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["meta"]["exported_on"], 42000);
        assert_eq!(value["meta"]["version"], "000");
        assert_eq!(value["data"]["posts"], json!([]));
        assert_eq!(value["data"]["tags"], json!([]));
    }

    #[test]
    fn test_export_timestamp_truncates_to_seconds() {
        let now = chrono::Utc
            .timestamp_millis_opt(1_609_459_200_789)
            .unwrap();
        assert_eq!(export_timestamp(now), 1_609_459_200_000);
    }
}
