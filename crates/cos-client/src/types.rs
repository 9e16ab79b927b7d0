//! Common types for the client SDK

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Result of a file upload, simple or resumable
///
/// `url` is only non-empty once the server holds the complete file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResult {
    /// Access URL
    pub access_url: String,
    /// Resource path on the server
    pub resource_path: String,
    /// Source URL
    pub source_url: String,
    /// Public URL, set on completion
    pub url: String,
}

impl UploadResult {
    /// Whether the server reported the file complete
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Response to one chunk of a resumable upload
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SliceResult {
    /// Offset the server has recorded
    pub offset: u64,
    /// Session the server associates with this upload
    pub session: String,
    #[serde(flatten)]
    pub upload: UploadResult,
}

/// Response to the negotiation call that opens a resumable upload
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FirstSliceResult {
    /// Slice size the server wants, 0 to keep the requested one
    pub slice_size: u64,
    #[serde(flatten)]
    pub slice: SliceResult,
}

/// Result of creating a directory
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDirResult {
    /// Creation time, Unix seconds as a string
    pub ctime: String,
    /// Resource path on the server
    pub resource_path: String,
}

/// Directory or file information
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathInfo {
    pub access_url: String,
    pub biz_attr: String,
    pub ctime: String,
    #[serde(deserialize_with = "u64_or_string")]
    pub filelen: u64,
    #[serde(deserialize_with = "u64_or_string")]
    pub filesize: u64,
    pub mtime: String,
    pub name: String,
    pub sha: String,
    pub source_url: String,
}

impl PathInfo {
    /// Creation time, if `ctime` holds Unix seconds
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_unix(&self.ctime)
    }

    /// Modification time, if `mtime` holds Unix seconds
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        parse_unix(&self.mtime)
    }
}

fn parse_unix(s: &str) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(s.trim().parse().ok()?, 0)
}

/// Directory stat reports sizes as numbers, file stat as strings.
fn u64_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) if s.is_empty() => Ok(0),
        Raw::Text(s) => s.parse().map_err(de::Error::custom),
    }
}

/// Result of listing a directory or searching by prefix
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDirResult {
    /// Pass back in [`ListDirParams::context`] to fetch the next page
    pub context: String,
    pub dircount: u64,
    pub filecount: u64,
    pub has_more: bool,
    #[serde(alias = "Infos")]
    pub infos: Vec<PathInfo>,
}

/// Which entries a listing returns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListPattern {
    #[default]
    Both,
    DirOnly,
    FileOnly,
}

impl ListPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Both => "eListBoth",
            Self::DirOnly => "eListDirOnly",
            Self::FileOnly => "eListFileOnly",
        }
    }
}

/// Listing order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ListOrder {
    #[default]
    Ascending = 0,
    Descending = 1,
}

/// Options for listing a directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListDirParams {
    /// Maximum entries per page
    pub num: u32,
    pub pattern: ListPattern,
    pub order: ListOrder,
    /// Empty for the first page, otherwise the previous page's context
    pub context: String,
}

impl Default for ListDirParams {
    fn default() -> Self {
        Self {
            num: 20,
            pattern: ListPattern::Both,
            order: ListOrder::Ascending,
            context: String::new(),
        }
    }
}

impl ListDirParams {
    pub fn num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }

    pub fn pattern(mut self, pattern: ListPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn order(mut self, order: ListOrder) -> Self {
        self.order = order;
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}
