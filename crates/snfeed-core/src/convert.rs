//! Feed to XML tree conversion
//!
//! Maps a [`Feed`] onto an RSS 2.0 document tree with the Dublin Core,
//! Media RSS and SmartNews extensions. Every branch is a presence check;
//! nothing here validates URLs or dates.

use crate::date::format_http_date;
use crate::model::{Feed, FeedOptions, Item, present};
use crate::namespace;
use chrono::{DateTime, Utc};
use snfeed_xml::{Declaration, Document, Element, Node};

/// Generator string used when a feed does not name one
pub const DEFAULT_GENERATOR: &str = "snfeed";

/// Documentation URL used when a feed does not name one
pub const DEFAULT_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";

/// Options for feed to XML tree conversion
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Generator written when `FeedOptions::generator` is absent
    pub default_generator: String,
    /// Docs URL written when `FeedOptions::docs` is absent
    pub default_docs: String,
    /// Clock for `lastBuildDate` when `FeedOptions::updated` is absent.
    /// `None` reads the wall clock at conversion time, which makes the
    /// output differ between calls.
    pub build_time: Option<DateTime<Utc>>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            default_generator: DEFAULT_GENERATOR.to_string(),
            default_docs: DEFAULT_DOCS.to_string(),
            build_time: None,
        }
    }
}

/// Generator for the channel: the feed's own value, else the configured default
pub fn resolve_generator<'a>(feed: &'a FeedOptions, options: &'a ConverterOptions) -> &'a str {
    present(&feed.generator).unwrap_or(options.default_generator.as_str())
}

/// Docs URL for the channel: the feed's own value, else the configured default
pub fn resolve_docs<'a>(feed: &'a FeedOptions, options: &'a ConverterOptions) -> &'a str {
    present(&feed.docs).unwrap_or(options.default_docs.as_str())
}

/// `lastBuildDate` for the channel: `updated`, else the build clock, else now
pub fn resolve_last_build_date(feed: &FeedOptions, options: &ConverterOptions) -> DateTime<Utc> {
    feed.updated
        .or(options.build_time)
        .unwrap_or_else(Utc::now)
}

/// Convert a feed to an RSS document tree
pub fn feed_to_xml(feed: &Feed) -> Document {
    feed_to_xml_with_options(feed, &ConverterOptions::default())
}

/// Convert a feed to an RSS document tree with options
pub fn feed_to_xml_with_options(feed: &Feed, options: &ConverterOptions) -> Document {
    let converter = Converter::new(options);
    converter.convert_feed(feed)
}

/// Converter state
struct Converter<'a> {
    options: &'a ConverterOptions,
}

impl<'a> Converter<'a> {
    fn new(options: &'a ConverterOptions) -> Self {
        Self { options }
    }

    fn convert_feed(&self, feed: &Feed) -> Document {
        let items: Vec<Node> = feed.items.iter().map(|i| self.convert_item(i)).collect();
        let has_content = feed.items.iter().any(|i| present(&i.content).is_some());

        tracing::debug!(
            items = feed.items.len(),
            categories = feed.categories.len(),
            has_content,
            "converted feed to rss tree"
        );

        let mut rss = Element::new("rss").with_attribute("version", "2.0");
        if has_content {
            rss.set_attribute("xmlns:content", namespace::CONTENT);
        }
        for (name, uri) in namespace::ALWAYS_DECLARED {
            rss.set_attribute(name, uri);
        }

        let mut channel = self.convert_channel(feed);
        channel.children.extend(items);
        rss.push(channel);

        Document::new(Some(Declaration::default()), rss)
    }

    /// Channel metadata and categories; items are appended by the caller
    fn convert_channel(&self, feed: &Feed) -> Element {
        let opts = &feed.options;
        let mut children = vec![
            Node::text_element("title", opts.title.as_str()),
            Node::text_element("link", opts.link.as_str()),
            Node::text_element("description", opts.description.as_deref().unwrap_or_default()),
            Node::text_element(
                "lastBuildDate",
                format_http_date(&resolve_last_build_date(opts, self.options)),
            ),
            Node::text_element("docs", resolve_docs(opts, self.options)),
            Node::text_element("generator", resolve_generator(opts, self.options)),
            self.convert_logo(opts),
        ];

        if let Some(language) = present(&opts.language) {
            children.push(Node::text_element("language", language));
        }

        if let Some(image) = present(&opts.image) {
            // The image block reuses the channel title and link
            children.push(Node::element(
                "image",
                vec![
                    Node::text_element("title", opts.title.as_str()),
                    Node::text_element("url", image),
                    Node::text_element("link", opts.link.as_str()),
                ],
            ));
        }

        if !opts.copyright.is_empty() {
            children.push(Node::text_element("copyright", opts.copyright.as_str()));
        }

        children.extend(
            feed.categories
                .iter()
                .map(|c| Node::text_element("category", c.as_str())),
        );

        Element::new("channel").with_children(children)
    }

    /// `snf:logo` is always written; the `url` child only when a logo is set
    fn convert_logo(&self, opts: &FeedOptions) -> Node {
        let children = match present(&opts.sf_logo) {
            Some(url) => vec![Node::text_element("url", url)],
            None => Vec::new(),
        };
        Node::element("snf:logo", children)
    }

    fn convert_item(&self, item: &Item) -> Node {
        let mut children = Vec::new();

        if let Some(title) = present(&item.title) {
            children.push(Node::cdata_element("title", title));
        }

        if let Some(link) = present(&item.link) {
            children.push(Node::text_element("link", link));
        }

        if let Some(guid) = present(&item.guid).or_else(|| present(&item.link)) {
            children.push(Node::text_element("guid", guid));
        }

        if let Some(date) = &item.date {
            children.push(Node::text_element("pubDate", format_http_date(date)));
        }

        if let Some(description) = present(&item.description) {
            children.push(Node::cdata_element("description", description));
        }

        if let Some(content) = present(&item.content) {
            children.push(Node::cdata_element("content:encoded", content));
        }

        if let Some(creator) = present(&item.creator) {
            children.push(Node::text_element("dc:creator", creator));
        }

        if let Some(image) = present(&item.image) {
            children.push(Element::new("media:thumbnail").with_attribute("url", image).into());
        }

        children.push(Node::text_element("media:status", status_label(item)));

        if let Some(analytics) = present(&item.analytics) {
            children.push(Node::cdata_element("snf:analytics", analytics));
        }

        Node::element("item", children)
    }
}

/// `media:status` value: only an explicit `false` marks an item deleted
fn status_label(item: &Item) -> &'static str {
    if item.is_active() { "active" } else { "deleted" }
}
