//! Structural walker for ALTO OCR documents.
//!
//! ALTO describes a scanned page as `Page → TextBlock → TextLine → String`,
//! every level carrying pixel positions. The walker streams the document with
//! `quick_xml::NsReader` and reports, in document order, to a
//! [`PageAssembler`]:
//!
//! - the first `Page` element's `WIDTH`/`HEIGHT`
//! - each `TextBlock`'s declared language (`language`, or ALTO 2+ `LANG`)
//! - each `String`'s `CONTENT` and `HPOS`/`VPOS`/`WIDTH`/`HEIGHT`
//! - the end of each `TextLine`
//!
//! # Namespaces
//!
//! Producers disagree on the ALTO namespace URI (v1 through v4, LoC and
//! vendor variants, sometimes none at all). The root element must be named
//! `alto`; whatever namespace it resolves to becomes the namespace every other
//! element is matched in. Nothing is hardcoded, and prefixed documents
//! (`<alto:String>`) work the same as default-namespace ones.
//!
//! # Failure
//!
//! A missing or non-`alto` root, a document without any `Page`, or malformed
//! XML aborts the extraction; no partial output is produced. Missing
//! attributes are never errors.

use crate::error::{Error, Result};
use crate::extractors::assembler::{Extraction, PageAssembler, WordToken};
use crate::geometry::{BoundingBox, PageGeometry};
use crate::parser_config::ParserOptions;
use crate::source::OcrSource;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::io::BufRead;
use std::time::Instant;

/// Local name of the document element.
const ROOT_ELEMENT: &[u8] = b"alto";

/// ALTO elements the walker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AltoElement {
    Page,
    TextBlock,
    TextLine,
    String,
}

impl AltoElement {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"Page" => Some(Self::Page),
            b"TextBlock" => Some(Self::TextBlock),
            b"TextLine" => Some(Self::TextLine),
            b"String" => Some(Self::String),
            _ => None,
        }
    }
}

/// Namespace declared by the root element (`None` = unqualified document).
#[derive(Debug, Clone, PartialEq, Eq)]
struct DocumentNamespace(Option<Vec<u8>>);

impl DocumentNamespace {
    fn of_root(resolved: &ResolveResult<'_>) -> Result<Self> {
        match resolved {
            ResolveResult::Bound(Namespace(uri)) => Ok(Self(Some(uri.to_vec()))),
            ResolveResult::Unbound => Ok(Self(None)),
            ResolveResult::Unknown(prefix) => Err(Error::UnexpectedRoot(format!(
                "{}:alto (undeclared namespace prefix)",
                String::from_utf8_lossy(prefix)
            ))),
        }
    }

    fn matches(&self, resolved: &ResolveResult<'_>) -> bool {
        match (resolved, &self.0) {
            (ResolveResult::Bound(Namespace(uri)), Some(expected)) => *uri == expected.as_slice(),
            (ResolveResult::Unbound, None) => true,
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match &self.0 {
            Some(uri) => String::from_utf8_lossy(uri).into_owned(),
            None => "(no namespace)".to_string(),
        }
    }
}

/// Extracts per-language text and word coordinates from ALTO documents.
///
/// An extractor holds only its options; every call builds its own state, so
/// one extractor can serve any number of documents, from any number of
/// threads.
///
/// # Example
///
/// ```no_run
/// use alto_oxide::extractors::AltoExtractor;
/// use alto_oxide::parser_config::ParserOptions;
///
/// let extractor = AltoExtractor::new(ParserOptions::default());
/// let (text, coords) = extractor.extract("batch/0001/ocr.xml")?.into_parts();
///
/// if let Some(english) = text.get("eng") {
///     println!("{}", english);
/// }
/// println!("{} distinct words", coords.coords.len());
/// # Ok::<(), alto_oxide::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AltoExtractor {
    options: ParserOptions,
}

impl AltoExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Options this extractor was created with.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Extract from a local path or an http(s) URL.
    ///
    /// # Errors
    ///
    /// I/O errors resolving or reading the source, or format errors from
    /// [`AltoExtractor::extract_reader`].
    pub fn extract(&self, reference: &str) -> Result<Extraction> {
        let source = OcrSource::resolve(reference)?;
        self.extract_source(&source)
    }

    /// Extract from an already resolved source.
    ///
    /// The source stream is released before this returns, whatever the
    /// outcome.
    pub fn extract_source(&self, source: &OcrSource) -> Result<Extraction> {
        let start = Instant::now();
        let stream = source.open(&self.options)?;
        let extraction = self.extract_reader(stream)?;

        log::info!(
            "Extracted {}: {} language(s), {} indexed words in {:.4}s",
            source,
            extraction.text.len(),
            extraction.coords.coords.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(extraction)
    }

    /// Extract from any buffered byte stream.
    ///
    /// # Errors
    ///
    /// - `Error::MissingRoot` / `Error::UnexpectedRoot` if the document
    ///   element is absent or not `alto`
    /// - `Error::MissingPage` if no `Page` element exists
    /// - `Error::MultiplePages` for a second page in strict mode
    /// - `Error::Truncated` if the input ends inside the root element
    /// - `Error::Xml` for malformed XML, `Error::Io` for read failures
    pub fn extract_reader<R: BufRead>(&self, input: R) -> Result<Extraction> {
        let mut reader = NsReader::from_reader(input);
        reader.expand_empty_elements(true);

        let mut buf = Vec::new();
        let namespace = read_root(&mut reader, &mut buf)?;
        log::debug!("ALTO namespace: {}", namespace.describe());

        let mut walker = Walker::new(namespace, &self.options);
        loop {
            buf.clear();
            let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
            match event {
                Event::Start(e) => walker.start(&resolved, &e)?,
                Event::End(e) => walker.end(&resolved, e.local_name().as_ref()),
                Event::Eof => break,
                _ => {},
            }
        }

        walker.finish()
    }
}

/// Read up to the document element and return the namespace it declares.
fn read_root<R: BufRead>(reader: &mut NsReader<R>, buf: &mut Vec<u8>) -> Result<DocumentNamespace> {
    loop {
        buf.clear();
        let (resolved, event) = reader.read_resolved_event_into(buf)?;
        match event {
            Event::Start(e) => {
                if e.local_name().as_ref() != ROOT_ELEMENT {
                    return Err(Error::UnexpectedRoot(
                        String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    ));
                }
                return DocumentNamespace::of_root(&resolved);
            },
            Event::Eof => return Err(Error::MissingRoot),
            // declaration, doctype, comments, processing instructions, whitespace
            _ => {},
        }
    }
}

/// Traversal state for one document.
struct Walker<'a> {
    namespace: DocumentNamespace,
    options: &'a ParserOptions,
    assembler: PageAssembler,
    /// Inside the (first) page
    in_page: bool,
    /// Inside a `TextLine` of that page
    in_line: bool,
    /// Open elements of a skipped extra page
    skip_depth: usize,
    /// Open elements, root included
    depth: usize,
}

impl<'a> Walker<'a> {
    fn new(namespace: DocumentNamespace, options: &'a ParserOptions) -> Self {
        Self {
            namespace,
            options,
            assembler: PageAssembler::new(options.default_language.clone()),
            in_page: false,
            in_line: false,
            skip_depth: 0,
            depth: 1,
        }
    }

    fn finish(self) -> Result<Extraction> {
        if self.depth > 0 {
            return Err(Error::Truncated);
        }
        self.assembler.finish()
    }

    fn classify(&self, resolved: &ResolveResult<'_>, local_name: &[u8]) -> Option<AltoElement> {
        if !self.namespace.matches(resolved) {
            return None;
        }
        AltoElement::from_local_name(local_name)
    }

    fn start(&mut self, resolved: &ResolveResult<'_>, e: &BytesStart<'_>) -> Result<()> {
        self.depth += 1;
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return Ok(());
        }

        match self.classify(resolved, e.local_name().as_ref()) {
            Some(AltoElement::Page) => self.start_page(e)?,
            Some(AltoElement::TextBlock) if self.in_page => {
                let language = match non_empty(attribute(e, b"language")?) {
                    Some(language) => Some(language),
                    None => non_empty(attribute(e, b"LANG")?),
                };
                self.assembler.begin_block(language);
            },
            Some(AltoElement::TextLine) if self.in_page => self.in_line = true,
            Some(AltoElement::String) if !self.in_line => {
                log::debug!("Skipping String element outside any TextLine");
            },
            Some(AltoElement::String) => match attribute(e, b"CONTENT")? {
                Some(content) => {
                    let bbox = BoundingBox {
                        hpos: attribute(e, b"HPOS")?,
                        vpos: attribute(e, b"VPOS")?,
                        width: attribute(e, b"WIDTH")?,
                        height: attribute(e, b"HEIGHT")?,
                    };
                    self.assembler.push_word(WordToken::new(content, bbox));
                },
                None => log::debug!("Skipping String element without CONTENT"),
            },
            _ => {},
        }
        Ok(())
    }

    fn start_page(&mut self, e: &BytesStart<'_>) -> Result<()> {
        if self.assembler.has_page() {
            if !self.options.accepts_extra_pages() {
                return Err(Error::MultiplePages);
            }
            log::warn!("Ignoring additional Page element; only the first page is extracted");
            self.skip_depth = 1;
            return Ok(());
        }

        let geometry = PageGeometry::new(attribute(e, b"WIDTH")?, attribute(e, b"HEIGHT")?);
        self.assembler.set_geometry(geometry)?;
        self.in_page = true;
        Ok(())
    }

    fn end(&mut self, resolved: &ResolveResult<'_>, local_name: &[u8]) {
        self.depth = self.depth.saturating_sub(1);
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }

        match self.classify(resolved, local_name) {
            Some(AltoElement::TextLine) if self.in_line => {
                self.in_line = false;
                self.assembler.end_line();
            },
            Some(AltoElement::Page) => {
                self.in_page = false;
                self.in_line = false;
            },
            _ => {},
        }
    }
}

/// Unescaped value of an unprefixed attribute.
fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    match e.try_get_attribute(name).map_err(quick_xml::Error::from)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
