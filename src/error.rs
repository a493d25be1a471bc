//! Error types for ALTO extraction.
//!
//! Every failure is fatal for the document being extracted: there is no
//! partial-result mode. Missing optional attributes are not errors at all and
//! never show up here.

use std::io;
use std::sync::Arc;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading or walking an ALTO document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document contains no element at all.
    #[error("Expected ALTO XML but the document has no root element")]
    MissingRoot,

    /// The root element's local name is not `alto`.
    #[error("Expected ALTO XML but received root element '{0}'")]
    UnexpectedRoot(String),

    /// No `Page` element was found in the document.
    #[error("Document does not appear to contain a Page element")]
    MissingPage,

    /// A second `Page` element was found while parsing in strict mode.
    #[error("Document contains more than one Page element")]
    MultiplePages,

    /// The document ended before its root element was closed.
    #[error("Document ended before the root element was closed")]
    Truncated,

    /// Malformed XML (unbalanced tags, bad escapes, invalid attributes)
    #[error("XML parse error: {0}")]
    Xml(#[source] quick_xml::Error),

    /// IO error (missing file, unreadable stream, aborted read)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote document could not be fetched
    #[cfg(feature = "remote")]
    #[error("Failed to fetch {url}: {source}")]
    Http {
        /// Location that was requested
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Input form not supported by this build
    #[error("Unsupported source: {0}")]
    Unsupported(String),
}

impl From<quick_xml::Error> for Error {
    /// Read failures inside the XML reader stay I/O errors.
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(source) => Error::Io(
                Arc::try_unwrap(source)
                    .unwrap_or_else(|shared| io::Error::new(shared.kind(), shared.to_string())),
            ),
            other => Error::Xml(other),
        }
    }
}

impl Error {
    /// True for errors caused by the document's content rather than by
    /// reaching it: wrong root, missing page, malformed XML.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::MissingRoot
                | Error::UnexpectedRoot(_)
                | Error::MissingPage
                | Error::MultiplePages
                | Error::Truncated
                | Error::Xml(_)
        )
    }

    /// True for errors opening or reading the source.
    pub fn is_io_error(&self) -> bool {
        !self.is_format_error()
    }
}
