//! Tumblr to Ghost transformation
//!
//! Every source post becomes exactly one Ghost post, in input order. Tags are
//! gathered into a [`TagSet`] while posts are transformed and finalized once
//! all posts have been seen.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::ghost::{ExportDocument, GhostPost, GhostTag};
use crate::tumblr::{LinkPost, PhotoPost, PostContent, SourcePost};
use crate::Error;

/// Title used for photo posts without a caption
pub const DEFAULT_PHOTO_TITLE: &str = "Image";

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

// ============================================================================
// Text Helpers
// ============================================================================

/// Remove every `<...>` markup tag verbatim; entities are left untouched
pub fn strip_tags(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// Drop every non-ASCII character
///
/// Characters are discarded, not transliterated: `"café"` becomes `"caf"`.
pub fn ascii_only(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Title-case a tag name
///
/// A cased character is title-cased when it follows an uncased character (or
/// starts the string) and lower-cased otherwise. Uncased characters, CJK
/// included, pass through unchanged and reset the state, so `"it's 2nd"`
/// becomes `"It'S 2Nd"` and `"日本travel"` becomes `"日本Travel"`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_cased = false;

    for c in text.chars() {
        if previous_is_cased {
            result.extend(c.to_lowercase());
        } else {
            push_titlecase(&mut result, c);
        }
        previous_is_cased = is_cased(c);
    }

    result
}

/// Letters of general category Lt
fn is_titlecase_letter(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || is_titlecase_letter(c)
}

/// Append the title-case mapping of `c`
///
/// Differs from the upper-case mapping for the Latin digraphs, the Greek
/// letters with ypogegrammeni, and characters whose upper-case form expands
/// to several letters (`ß` titles as `Ss`, `ﬀ` as `Ff`).
fn push_titlecase(out: &mut String, c: char) {
    let single = match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8)
        }
        '\u{1FB3}' => Some('\u{1FBC}'),
        '\u{1FC3}' => Some('\u{1FCC}'),
        '\u{1FF3}' => Some('\u{1FFC}'),
        c if is_titlecase_letter(c) => Some(c),
        _ => None,
    };
    if let Some(titled) = single {
        out.push(titled);
        return;
    }

    if matches!(c, '\u{00DF}' | '\u{0587}' | '\u{FB00}'..='\u{FB06}' | '\u{FB13}'..='\u{FB17}') {
        let mut upper = c.to_uppercase();
        out.extend(upper.next());
        out.extend(upper.flat_map(char::to_lowercase));
    } else {
        out.extend(c.to_uppercase());
    }
}

/// Convert rendered HTML to Markdown after dropping non-ASCII characters
pub fn html_to_markdown(html: &str) -> String {
    html2md::parse_html(&ascii_only(html))
}

// ============================================================================
// Per-Post Rendering
// ============================================================================

fn unsupported(post: &SourcePost) -> Error {
    Error::UnsupportedPostType {
        slug: post.slug.clone(),
    }
}

/// Title of the Ghost post
///
/// Photo posts use their caption with markup stripped, or `"Image"` when the
/// caption is empty. Text and link posts keep their title verbatim.
pub fn create_title(post: &SourcePost) -> Result<Option<String>, Error> {
    match &post.content {
        PostContent::Text(text) => Ok(text.title.clone()),
        PostContent::Link(link) => Ok(link.title.clone()),
        PostContent::Photo(photo) => Ok(Some(match photo.caption.as_deref() {
            Some(caption) if !caption.is_empty() => strip_tags(caption),
            _ => DEFAULT_PHOTO_TITLE.to_string(),
        })),
        PostContent::Unsupported => Err(unsupported(post)),
    }
}

/// HTML body of the Ghost post
pub fn create_body(post: &SourcePost) -> Result<String, Error> {
    match &post.content {
        PostContent::Text(text) => Ok(text.body.clone()),
        PostContent::Link(link) => Ok(link_body(link)),
        PostContent::Photo(photo) => Ok(photo_body(photo)),
        PostContent::Unsupported => Err(unsupported(post)),
    }
}

fn link_body(link: &LinkPost) -> String {
    format!(
        "\n            <strong><a href=\"{}\">{}</a></strong>\n            <p>{}</p>\n            ",
        link.url,
        link.title.as_deref().unwrap_or_default(),
        ascii_only(&link.description)
    )
}

fn photo_body(photo: &PhotoPost) -> String {
    let mut body = format!("<p>{}</p>", photo.caption.as_deref().unwrap_or_default());

    for item in &photo.photos {
        body.push_str(&format!(
            "<p>{}</p><img src=\"{}\">",
            item.caption, item.original_size.url
        ));
    }

    body
}

// ============================================================================
// Tag Aggregation
// ============================================================================

/// Distinct tag strings seen across all posts of one export
///
/// Deduplication is exact and case-sensitive: `"Foo"` and `"foo"` are two
/// tags that share the name `"Foo"` but keep their own slugs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<'a>(&mut self, tags: impl IntoIterator<Item = &'a String>) {
        self.tags.extend(tags.into_iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Finalize into Ghost tags sharing one creation time
    pub fn into_ghost_tags(self, created_at_ms: i64) -> Vec<GhostTag> {
        self.tags
            .into_iter()
            .map(|tag| GhostTag::new(title_case(&tag), tag, created_at_ms))
            .collect()
    }
}

// ============================================================================
// Export Assembly
// ============================================================================

/// Transform one source post and record its tags
pub fn transform_post(post: &SourcePost, tags: &mut TagSet) -> Result<GhostPost, Error> {
    let title = create_title(post)?;
    let html = create_body(post)?;
    let markdown = html_to_markdown(&html);

    tags.extend(&post.tags);

    let timestamp_ms = post.timestamp.checked_mul(1000).ok_or_else(|| {
        Error::MalformedResponse(format!(
            "timestamp {} of post '{}' is out of range",
            post.timestamp, post.slug
        ))
    })?;

    Ok(GhostPost::published(
        title,
        post.slug.clone(),
        markdown,
        html,
        timestamp_ms,
    ))
}

/// Build the complete Ghost export document
///
/// Fails on the first unsupported post; no partial document is produced.
/// `exported_on_ms` stamps both the document and every tag.
pub fn create_ghost_export(
    posts: &[SourcePost],
    exported_on_ms: i64,
) -> Result<ExportDocument, Error> {
    let mut tags = TagSet::new();

    let ghost_posts = posts
        .iter()
        .map(|post| transform_post(post, &mut tags))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExportDocument::new(
        ghost_posts,
        tags.into_ghost_tags(exported_on_ms),
        exported_on_ms,
    ))
}
