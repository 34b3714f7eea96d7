use crate::prelude::*;
use futures::future::try_join_all;
use tumblr2ghost_core::pagination::{page_count, page_offsets, PAGE_SIZE};
use tumblr2ghost_core::tumblr::{info_url, parse_blog_info, parse_posts_page, posts_url};

use super::{BlogInfo, SourcePost, Transport, TumblrConfig};

/// Retrieves blog metadata and every post of one blog
#[derive(Debug)]
pub struct Fetcher<T> {
    transport: T,
    config: TumblrConfig,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, config: TumblrConfig) -> Self {
        Self { transport, config }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the blog info, failing with an invalid blog error when the
    /// response has no `response.blog` object
    pub async fn get_blog_info(&self) -> Result<BlogInfo, Error> {
        let url = info_url(
            &self.config.api_base,
            &self.config.blog,
            &self.config.api_key,
        );

        log::debug!("Fetching blog info for {}", self.config.blog);
        let body = self.transport.get_json(&url).await?;

        Ok(parse_blog_info(body)?)
    }

    /// Fetch all posts one page at a time, in ascending offset order
    pub async fn get_posts(&self) -> Result<Vec<SourcePost>, Error> {
        let blog_info = self.get_blog_info().await?;
        log::info!(
            "Blog {} has {} posts ({} pages)",
            self.config.blog,
            blog_info.posts,
            page_count(blog_info.posts)
        );

        let mut posts = Vec::with_capacity(blog_info.posts);
        for offset in page_offsets(blog_info.posts) {
            posts.extend(self.get_page(offset).await?);
        }

        Ok(posts)
    }

    /// Fetch all pages concurrently
    ///
    /// Offsets are known from the post count, so every page request is issued
    /// up front. Pages are still concatenated by ascending offset, giving the
    /// same result as [`Fetcher::get_posts`]. The first failing page aborts the
    /// whole fetch.
    pub async fn get_posts_concurrent(&self) -> Result<Vec<SourcePost>, Error> {
        let blog_info = self.get_blog_info().await?;
        log::info!(
            "Blog {} has {} posts ({} pages, concurrent)",
            self.config.blog,
            blog_info.posts,
            page_count(blog_info.posts)
        );

        let page_futures = page_offsets(blog_info.posts)
            .into_iter()
            .map(|offset| self.get_page(offset));
        let pages = try_join_all(page_futures).await?;

        Ok(pages.into_iter().flatten().collect())
    }

    async fn get_page(&self, offset: usize) -> Result<Vec<SourcePost>, Error> {
        let url = posts_url(
            &self.config.api_base,
            &self.config.blog,
            &self.config.api_key,
            offset,
            PAGE_SIZE,
        );

        log::debug!("Fetching posts at offset {offset}");
        let body = self.transport.get_json(&url).await?;
        let posts = parse_posts_page(body)?;
        log::debug!("Received {} posts at offset {offset}", posts.len());

        Ok(posts)
    }
}
