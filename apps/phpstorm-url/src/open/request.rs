//! `phpstorm://` URL parsing
//!
//! URLs look like `phpstorm://open?file=<path>&line=<n>&column=<n>`. The
//! producer percent-encodes the path before embedding it in the query, so
//! the `file` value is decoded twice: once as a query value, once more for
//! the path's own encoding.

use crate::error::{HandlerError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

const FILE_KEY: &str = "file";

/// Open-options forwarded to the IDE, in command-line order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpenOption {
    Line,
    Column,
}

impl OpenOption {
    pub const ALL: [OpenOption; 2] = [OpenOption::Line, OpenOption::Column];

    /// Query parameter name
    pub fn key(&self) -> &'static str {
        match self {
            OpenOption::Line => "line",
            OpenOption::Column => "column",
        }
    }

    /// Command-line flag understood by the IDE launcher
    pub fn flag(&self) -> &'static str {
        match self {
            OpenOption::Line => "--line",
            OpenOption::Column => "--column",
        }
    }
}

impl fmt::Display for OpenOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A parsed open request.
///
/// `file` is always non-empty; it is not checked against the filesystem.
/// Option values are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub url: String,
    pub file: PathBuf,
    pub options: BTreeMap<OpenOption, String>,
}

impl OpenRequest {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            url: String::new(),
            file: file.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, option: OpenOption, value: impl Into<String>) -> Self {
        self.options.insert(option, value.into());
        self
    }

    pub fn option(&self, option: OpenOption) -> Option<&str> {
        self.options.get(&option).map(String::as_str)
    }
}

/// Multi-valued query mapping; blank values are dropped
fn query_map(url: &Url) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        map.entry(key.into_owned()).or_default().push(value.into_owned());
    }
    map
}

fn first<'a>(map: &'a HashMap<String, Vec<String>>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(|values| values.first()).map(String::as_str)
}

/// Parse a handler URL for `scheme` into an [`OpenRequest`]
pub fn parse_open_url(raw: &str, scheme: &str) -> Result<OpenRequest> {
    let raw = raw.trim();

    // Checked on the raw text: Url normalizes schemes to lowercase
    let (given_scheme, _) = raw
        .split_once(':')
        .ok_or_else(|| HandlerError::url_parse(format!("'{}' has no scheme", raw)))?;
    if given_scheme != scheme {
        return Err(HandlerError::url_parse(format!(
            "expected scheme '{}', got '{}'",
            scheme, given_scheme
        )));
    }

    let url = Url::parse(raw)
        .map_err(|e| HandlerError::url_parse(format!("malformed URL '{}': {}", raw, e)))?;
    let query = query_map(&url);

    let encoded_file = first(&query, FILE_KEY)
        .ok_or_else(|| HandlerError::url_parse("missing 'file' parameter"))?;
    let file = urlencoding::decode(encoded_file)
        .map_err(|e| HandlerError::url_parse(format!("'file' is not valid UTF-8: {}", e)))?;
    if file.is_empty() {
        return Err(HandlerError::url_parse("empty 'file' parameter"));
    }
    debug!("Decoded target file: {}", file);

    let options = OpenOption::ALL
        .into_iter()
        .filter_map(|option| first(&query, option.key()).map(|v| (option, v.to_string())))
        .collect();

    Ok(OpenRequest {
        url: raw.to_string(),
        file: PathBuf::from(file.into_owned()),
        options,
    })
}
