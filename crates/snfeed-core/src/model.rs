//! Feed data model
//!
//! Channel metadata, items and the feed container that aggregates them.
//! All types deserialize from camelCase JSON so feeds can be described as
//! plain documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a feed description
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid feed input: {0}")]
    InvalidInput(#[from] serde_json::Error),
}

/// Channel-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedOptions {
    /// Feed identifier (not written to RSS output)
    pub id: String,
    pub title: String,
    pub link: String,
    /// Always written; an absent description renders an empty element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Last build date; the build time is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Channel image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub copyright: String,
    /// Documentation URL for the format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    /// SmartNews channel logo URL (`snf:logo`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sf_logo: Option<String>,
}

/// A single feed entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Stable identifier; the link is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full content, written as `content:encoded`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Thumbnail URL (`media:thumbnail`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// `Some(false)` marks the item deleted; anything else is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    /// Opaque analytics payload (`snf:analytics`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<String>,
}

/// Feed container: channel options, items and categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub options: FeedOptions,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Feed {
    pub fn new(options: FeedOptions) -> Self {
        Self {
            options,
            items: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn add_category(&mut self, category: impl Into<String>) {
        self.categories.push(category.into());
    }

    /// Load a feed from its JSON description
    ///
    /// Keys are camelCase and dates are RFC 3339 strings. `items` and
    /// `categories` may be omitted.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to SmartNews-flavored RSS 2.0 with default options
    pub fn to_rss(&self) -> String {
        crate::serialize(self)
    }
}

impl Item {
    /// Whether the item is written with `media:status` `active`
    pub fn is_active(&self) -> bool {
        self.status != Some(false)
    }
}

/// Treat empty strings the same as missing values
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
