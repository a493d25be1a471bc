//! # ALTO Oxide
//!
//! Text and word-coordinate extraction for ALTO OCR XML, the page format OCR
//! engines emit for scanned newspaper pages.
//!
//! One call turns a page into two outputs:
//!
//! - **[`PageText`]**: reconstructed plain text per language. Words are joined
//!   with spaces, lines with newlines, in document order. Text blocks without
//!   a language default to `"eng"`.
//! - **[`CoordinateBundle`]**: the page's `WIDTH`/`HEIGHT` and an index from
//!   normalized word to the bounding box of every occurrence, for hit
//!   highlighting on the page image.
//!
//! Index keys are normalized (surrounding punctuation and a possessive `'s`
//! stripped, case preserved, see [`text::normalize_word`]); page text is
//! never normalized. All geometry is kept as the attribute text the OCR
//! engine wrote.
//!
//! ## Quick Start
//!
//! ```no_run
//! # fn main() -> alto_oxide::Result<()> {
//! // Local path or http(s) URL
//! let (text, coords) = alto_oxide::extract("batch_dlc_1/0001/ocr.xml")?.into_parts();
//!
//! for (language, page_text) in text.iter() {
//!     println!("[{}] {} characters", language, page_text.len());
//! }
//!
//! if let Some(boxes) = coords.coords.get("Lincoln") {
//!     println!("'Lincoln' appears {} times", boxes.len());
//! }
//!
//! // JSON for the highlighting frontend
//! println!("{}", serde_json::to_string(&coords).unwrap());
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! A document whose root is not `alto`, or that has no `Page` element, fails
//! with a format error; unreadable sources fail with an I/O error. There is no
//! partial result. See [`Error`].
//!
//! ## Features
//!
//! - `remote` (default): fetch documents from http(s) URLs with a blocking
//!   `reqwest` client.
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Input resolution
pub mod source;

/// Parser configuration options
pub mod parser_config;

// Page and word geometry
pub mod geometry;

// Text normalization
pub mod text;

// ALTO walking and output assembly
pub mod extractors;

// Re-exports
pub use error::{Error, Result};
pub use extractors::{
    AltoExtractor, CoordinateBundle, CoordinateIndex, Extraction, PageText, WordToken,
};
pub use geometry::{BoundingBox, PageGeometry};
pub use parser_config::ParserOptions;
pub use source::OcrSource;

/// Extract page text and word coordinates with default (lenient) options.
///
/// `reference` is a local path or an http(s) URL.
///
/// # Errors
///
/// See [`AltoExtractor::extract_reader`] for format errors; I/O errors come
/// from resolving and reading the source.
pub fn extract(reference: &str) -> Result<Extraction> {
    AltoExtractor::default().extract(reference)
}

/// Extract page text and word coordinates with explicit options.
///
/// # Errors
///
/// As for [`extract`].
pub fn extract_with_options(reference: &str, options: &ParserOptions) -> Result<Extraction> {
    AltoExtractor::new(options.clone()).extract(reference)
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
