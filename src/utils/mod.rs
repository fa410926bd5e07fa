//! Utility functions for address handling, slugs and text trimming.
//!
//! - [`address`] - Short-link address extraction and scheme normalization
//! - [`slug`] - File-name slugs derived from original URLs
//! - [`text`] - Character-safe truncation and blank filtering

pub mod address;
pub mod slug;
pub mod text;
