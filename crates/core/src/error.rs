/// Errors raised while validating Tumblr responses or building the Ghost export
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The info endpoint did not return a `response.blog` object
    #[error("Invalid blog: {0}. Make sure this is a valid Tumblr blog URL and API key.")]
    InvalidBlog(String),

    /// A posts page did not have the expected `response.posts` shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A post whose `type` is not one of text, link or photo
    #[error("Unsupported post type for post '{slug}'. Supported types: text, link, photo")]
    UnsupportedPostType { slug: String },
}
