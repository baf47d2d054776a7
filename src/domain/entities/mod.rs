//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A short code mapped to its original URL
//! - [`ClickEvent`] - One recorded redirect

pub mod click;
pub mod url_record;

pub use click::{ClickEvent, DIRECT_REFERRER, UNKNOWN_USER_AGENT};
pub use url_record::UrlRecord;
