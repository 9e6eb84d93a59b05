//! Candidate document sources.
//!
//! A stat sheet may live at several locations (last season's URL, this
//! season's URL, a local copy). Candidates are tried in order and the first
//! one that fetches and passes validation wins; later candidates are never
//! requested.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::layout::extract_lines;
use std::path::PathBuf;

/// Extracted text shorter than this means the PDF is a scan.
pub const MIN_TEXT_LAYER_CHARS: usize = 100;

/// Something that can turn a location into bytes.
pub trait Fetch {
    /// Fetch the bytes at `location`.
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Reads candidates from the local filesystem, relative to an optional base
/// directory.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base: Option<PathBuf>,
}

impl FileFetcher {
    /// Fetcher resolving paths as given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher resolving relative paths against `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = match &self.base {
            Some(base) => base.join(location),
            None => PathBuf::from(location),
        };
        std::fs::read(&path).map_err(|e| Error::Fetch {
            location: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// HTTP(S) fetcher on a blocking `reqwest` client.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Client with a 30 second timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("statsheet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl Fetch for HttpFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let fail = |reason: String| Error::Fetch {
            location: location.to_string(),
            reason,
        };
        let response = self.client.get(location).send().map_err(|e| fail(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("HTTP {}", status)));
        }
        let body = response.bytes().map_err(|e| fail(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// `%PDF` magic at the start of the buffer, after optional whitespace.
pub fn looks_like_pdf(data: &[u8]) -> bool {
    let start = data.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(data.len());
    data[start..].starts_with(b"%PDF")
}

/// A PDF whose extracted text has at least [`MIN_TEXT_LAYER_CHARS`]
/// non-whitespace characters.
pub fn has_text_layer(data: &[u8]) -> bool {
    if !looks_like_pdf(data) {
        return false;
    }
    let text = extract_lines(data, &LayoutConfig::default());
    text.chars().filter(|c| !c.is_whitespace()).count() >= MIN_TEXT_LAYER_CHARS
}

/// The first candidate that fetches and satisfies `validator`.
///
/// Returns the winning location alongside its bytes.
///
/// # Errors
///
/// [`Error::SourceUnavailable`] once every candidate has failed.
pub fn fetch_first_valid<F, V>(fetcher: &F, candidates: &[String], validator: V) -> Result<(String, Vec<u8>)>
where
    F: Fetch + ?Sized,
    V: Fn(&[u8]) -> bool,
{
    let mut last = String::from("no candidates");
    for location in candidates {
        match fetcher.fetch(location) {
            Ok(bytes) if validator(&bytes) => {
                log::info!("using source {} ({} bytes)", location, bytes.len());
                return Ok((location.clone(), bytes));
            },
            Ok(bytes) => {
                log::debug!("rejected {}: {} bytes failed validation", location, bytes.len());
                last = format!("{}: failed validation", location);
            },
            Err(e) => {
                log::debug!("fetch failed: {}", e);
                last = e.to_string();
            },
        }
    }
    Err(Error::SourceUnavailable {
        tried: candidates.len(),
        last,
    })
}
