//! snfeed-core: Core library for serializing feeds to SmartNews-flavored RSS 2.0
//!
//! This crate provides:
//! - Feed data model (channel options, items, categories)
//! - Feed to XML tree conversion with the `dc`, `media`, `content` and `snf` extensions
//! - XML tree to text output
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use snfeed_core::{Feed, FeedOptions, Item, serialize};
//!
//! let mut feed = Feed::new(FeedOptions {
//!     id: "news".to_string(),
//!     title: "News".to_string(),
//!     link: "https://example.com".to_string(),
//!     updated: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
//!     ..Default::default()
//! });
//! feed.add_item(Item {
//!     title: Some("Hello".to_string()),
//!     link: Some("https://example.com/hello".to_string()),
//!     ..Default::default()
//! });
//!
//! let xml = serialize(&feed);
//! assert!(xml.contains("<guid>https://example.com/hello</guid>"));
//! assert!(xml.contains("<media:status>active</media:status>"));
//! ```

pub mod convert;
pub mod date;
pub mod model;
pub mod namespace;

pub use convert::{
    ConverterOptions, DEFAULT_DOCS, DEFAULT_GENERATOR, feed_to_xml, feed_to_xml_with_options,
    resolve_docs, resolve_generator, resolve_last_build_date,
};
pub use model::{Feed, FeedError, FeedOptions, Item};
pub use snfeed_xml::{Document, WriterOptions, xml_to_string};

/// Serialize a feed to an RSS 2.0 document
///
/// Uses 4-space indentation and the default generator and docs URL. When
/// `options.updated` is absent, `lastBuildDate` is the current time, so two
/// calls may differ; pass a `build_time` to [`serialize_with_options`] for
/// reproducible output.
pub fn serialize(feed: &Feed) -> String {
    serialize_with_options(feed, &ConverterOptions::default(), &WriterOptions::default())
}

/// Serialize a feed with explicit conversion and writer options
pub fn serialize_with_options(
    feed: &Feed,
    converter: &ConverterOptions,
    writer: &WriterOptions,
) -> String {
    let doc = feed_to_xml_with_options(feed, converter);
    xml_to_string(&doc, writer)
}
