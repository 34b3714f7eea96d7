//! Core library for tumblr2ghost
//!
//! This crate implements the **Functional Core** of the tumblr2ghost application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`tumblr2ghost_core`** (this crate): Pure transformation functions with zero I/O
//! - **`tumblr2ghost`**: HTTP fetching, CLI and output persistence (the Imperative Shell)
//!
//! Every function here is deterministic: the export timestamp is passed in by the
//! caller instead of being read from the clock, so the whole Tumblr to Ghost
//! pipeline can be exercised with fixture data.
//!
//! # Module Organization
//!
//! - [`tumblr`]: Tumblr API response models, URL building and response validation
//! - [`pagination`]: Page count and offset arithmetic for the posts endpoint
//! - [`transform`]: Per-post title/body rendering, tag aggregation, export assembly
//! - [`ghost`]: Ghost import document models
//! - [`error`]: Domain errors shared with the shell
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use tumblr2ghost_core::{tumblr::parse_posts_page, transform::create_ghost_export};
//!
//! let posts = parse_posts_page(page_json)?;
//! let export = create_ghost_export(&posts, 1_700_000_000_000)?;
//!
//! assert_eq!(export.data.posts.len(), posts.len());
//! ```

pub mod error;
pub mod ghost;
pub mod pagination;
pub mod transform;
pub mod tumblr;

pub use error::Error;
