//! Wiki document sources.

use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{GenerationError, Result};

/// MediaWiki endpoint hosting the testable statement pages.
pub const DEFAULT_WIKI_API: &str = "https://www.w3.org/wiki/api.php";

/// Where the wiki text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Wiki text saved to a local file.
    File(PathBuf),
    /// Wiki text piped in on stdin.
    Stdin,
    /// Current revision of a page, fetched through the MediaWiki API.
    Wiki { api_url: String, page: String },
}

impl DocumentSource {
    /// Fetches `page` from the default wiki.
    pub fn wiki(page: impl Into<String>) -> Self {
        Self::Wiki {
            api_url: DEFAULT_WIKI_API.to_string(),
            page: page.into(),
        }
    }

    /// Short human-readable description for logs and reports.
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
            Self::Wiki { api_url, page } => format!("{api_url}?title={page}"),
        }
    }

    /// Reads the whole document into memory.
    pub fn load(&self) -> Result<String> {
        match self {
            Self::File(path) => {
                debug!(path = %path.display(), "Reading wiki text from file");
                Ok(std::fs::read_to_string(path)?)
            }
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
            Self::Wiki { api_url, page } => fetch_wiki_page(api_url, page),
        }
    }
}

fn fetch_wiki_page(api_url: &str, page: &str) -> Result<String> {
    info!(page, api = api_url, "Fetching wiki page");
    let response: Value = ureq::get(api_url)
        .query("action", "query")
        .query("prop", "revisions")
        .query("rvprop", "content")
        .query("format", "json")
        .query("titles", page)
        .call()?
        .into_json()?;

    page_content(&response)
        .map(str::to_string)
        .ok_or_else(|| GenerationError::WikiPageMissing(page.to_string()))
}

/// Extracts the first page's first revision text from an API response.
///
/// Handles both the legacy `"*"` key and the newer `"content"` key.
pub fn page_content(response: &Value) -> Option<&str> {
    let pages = response.get("query")?.get("pages")?.as_object()?;
    let page = pages.values().next()?;
    let revision = page.get("revisions")?.get(0)?;
    revision
        .get("*")
        .or_else(|| revision.get("content"))
        .and_then(Value::as_str)
}
