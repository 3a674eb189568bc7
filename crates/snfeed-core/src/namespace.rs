//! XML namespaces declared on the `rss` root element

/// RSS content module, declared only when an item carries full content
pub const CONTENT: &str = "http://purl.org/rss/1.0/modules/content/";
/// Dublin Core, for `dc:creator`
pub const DC: &str = "http://purl.org/dc/elements/1.1/";
/// Media RSS, for `media:thumbnail` and `media:status`
pub const MEDIA: &str = "http://search.yahoo.com/mrss/";
/// SmartNews vendor extensions, for `snf:logo` and `snf:analytics`
pub const SNF: &str = "http://www.smartnews.be/snf";

/// Namespaces declared on every document, in attribute order
pub const ALWAYS_DECLARED: [(&str, &str); 3] =
    [("xmlns:dc", DC), ("xmlns:media", MEDIA), ("xmlns:snf", SNF)];
