//! Resolving an input reference to a readable byte stream.
//!
//! A reference is either an existing local path or an `http`/`https` URL.
//! Local existence is checked first, remote fetching second; there is no
//! content sniffing. The returned stream is owned by the caller and is closed
//! when dropped, on success and on every error path alike.

use crate::error::{Error, Result};
use crate::parser_config::ParserOptions;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Where an ALTO document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrSource {
    /// Local file
    File(PathBuf),
    /// Remote `http`/`https` location
    Remote(String),
}

impl OcrSource {
    /// Resolve a path-or-URL reference.
    ///
    /// # Errors
    ///
    /// - `Error::Unsupported` for URLs with a scheme other than http(s)
    /// - `Error::Io` (`NotFound`) when the reference is neither an existing
    ///   file nor a URL
    pub fn resolve(reference: &str) -> Result<Self> {
        let path = Path::new(reference);
        if path.exists() {
            return Ok(Self::File(path.to_path_buf()));
        }

        match reference.split_once("://") {
            Some((scheme, _)) if is_http_scheme(scheme) => Ok(Self::Remote(reference.to_string())),
            Some((scheme, _)) if is_scheme(scheme) => {
                Err(Error::Unsupported(format!("'{scheme}' URLs are not supported: {reference}")))
            },
            _ => Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{reference}: no such file and not an http(s) URL"),
            ))),
        }
    }

    /// Open the source for reading.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if a file cannot be opened, `Error::Http` if a
    /// remote document cannot be fetched or answers with a non-success status.
    pub fn open(&self, options: &ParserOptions) -> Result<Box<dyn BufRead>> {
        match self {
            Self::File(path) => {
                log::debug!("Opening OCR file {}", path.display());
                let file = File::open(path)?;
                Ok(Box::new(BufReader::new(file)))
            },
            Self::Remote(url) => open_remote(url, options),
        }
    }

    /// True for remote sources.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for OcrSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

impl From<PathBuf> for OcrSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for OcrSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

fn is_http_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

/// RFC 3986 scheme syntax: a letter followed by letters, digits, `+`, `-`, `.`
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(feature = "remote")]
fn open_remote(url: &str, options: &ParserOptions) -> Result<Box<dyn BufRead>> {
    log::debug!("Fetching OCR document {}", url);

    let client = reqwest::blocking::Client::builder()
        .user_agent(options.user_agent.clone())
        .timeout(options.fetch_timeout)
        .build()
        .map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })?;

    log::debug!("{} answered {}", url, response.status());
    Ok(Box::new(BufReader::new(response)))
}

#[cfg(not(feature = "remote"))]
fn open_remote(url: &str, _options: &ParserOptions) -> Result<Box<dyn BufRead>> {
    Err(Error::Unsupported(format!(
        "{url}: remote sources require the `remote` feature"
    )))
}
