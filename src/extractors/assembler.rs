//! Assembly of walker events into the two extraction outputs.
//!
//! The walker reports pages, text blocks, words and line ends in document
//! order; [`PageAssembler`] turns them into
//!
//! - [`PageText`]: language code to page text, lines joined with `\n`,
//!   words joined with a single space, and
//! - [`CoordinateBundle`]: page width/height plus a [`CoordinateIndex`]
//!   from normalized word to every bounding box it was seen at.
//!
//! Languages keep first-encounter order, lines keep document order within a
//! language and each word keeps its occurrence order, so repeated extraction
//! of the same document serializes identically.

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, PageGeometry};
use crate::text::normalize_word;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One `String` element: the recognized text and where it sits on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordToken {
    /// Raw `CONTENT` as produced by the OCR engine
    pub content: String,
    /// Position of the word on the page image
    pub bbox: BoundingBox,
}

impl WordToken {
    /// Create a word token.
    pub fn new(content: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            content: content.into(),
            bbox,
        }
    }
}

/// Reconstructed page text, keyed by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageText {
    languages: IndexMap<String, String>,
}

impl PageText {
    /// Text for one language.
    pub fn get(&self, language: &str) -> Option<&str> {
        self.languages.get(language).map(String::as_str)
    }

    /// Language codes in the order they were first encountered.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// `(language, text)` pairs in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.languages
            .iter()
            .map(|(language, text)| (language.as_str(), text.as_str()))
    }

    /// Number of languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// True when the page had no text lines.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Text of every language joined with newlines.
    pub fn all_text(&self) -> String {
        self.languages
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.languages
    }
}

/// Normalized word to the bounding boxes of all its occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateIndex {
    words: IndexMap<String, Vec<BoundingBox>>,
}

impl CoordinateIndex {
    /// Boxes recorded for a normalized word, in occurrence order.
    pub fn get(&self, word: &str) -> Option<&[BoundingBox]> {
        self.words.get(word).map(Vec::as_slice)
    }

    /// True if the word was indexed.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Indexed words in first-occurrence order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    /// `(word, boxes)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[BoundingBox])> {
        self.words
            .iter()
            .map(|(word, boxes)| (word.as_str(), boxes.as_slice()))
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of recorded boxes across all words.
    pub fn occurrences(&self) -> usize {
        self.words.values().map(Vec::len).sum()
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> IndexMap<String, Vec<BoundingBox>> {
        self.words
    }

    fn record(&mut self, word: &str, bbox: BoundingBox) {
        match self.words.get_mut(word) {
            Some(boxes) => boxes.push(bbox),
            None => {
                self.words.insert(word.to_string(), vec![bbox]);
            },
        }
    }
}

/// Page dimensions plus the word coordinate index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateBundle {
    /// Page `WIDTH`, if present
    pub width: Option<String>,
    /// Page `HEIGHT`, if present
    pub height: Option<String>,
    /// Normalized word to bounding boxes
    pub coords: CoordinateIndex,
}

impl CoordinateBundle {
    /// Page dimensions as a [`PageGeometry`].
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.width.clone(), self.height.clone())
    }
}

/// Both outputs of one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Per-language page text
    pub text: PageText,
    /// Page geometry and word coordinates
    pub coords: CoordinateBundle,
}

impl Extraction {
    /// Split into `(text, coords)`.
    pub fn into_parts(self) -> (PageText, CoordinateBundle) {
        (self.text, self.coords)
    }
}

/// Working state of one extraction, fed by the walker.
#[derive(Debug)]
pub struct PageAssembler {
    geometry: Option<PageGeometry>,
    default_language: String,
    language: String,
    line: Vec<String>,
    lines: IndexMap<String, Vec<String>>,
    coords: CoordinateIndex,
}

impl PageAssembler {
    /// Create an assembler; untagged text blocks use `default_language`.
    pub fn new(default_language: impl Into<String>) -> Self {
        let default_language = default_language.into();
        Self {
            geometry: None,
            language: default_language.clone(),
            default_language,
            line: Vec::new(),
            lines: IndexMap::new(),
            coords: CoordinateIndex::default(),
        }
    }

    /// True once a page has been recorded.
    pub fn has_page(&self) -> bool {
        self.geometry.is_some()
    }

    /// Record the page dimensions.
    ///
    /// # Errors
    ///
    /// `Error::MultiplePages` if a page was already recorded; the first
    /// geometry is kept.
    pub fn set_geometry(&mut self, geometry: PageGeometry) -> Result<()> {
        if self.geometry.is_some() {
            return Err(Error::MultiplePages);
        }
        log::debug!(
            "Page geometry: width={:?} height={:?}",
            geometry.width,
            geometry.height
        );
        self.geometry = Some(geometry);
        Ok(())
    }

    /// Enter a text block; its lines belong to `language` (or the default).
    pub fn begin_block(&mut self, language: Option<String>) {
        self.language = language.unwrap_or_else(|| self.default_language.clone());
    }

    /// Language that lines are currently attributed to.
    pub fn active_language(&self) -> &str {
        &self.language
    }

    /// Append a word to the current line and index its coordinates.
    pub fn push_word(&mut self, token: WordToken) {
        let word = normalize_word(&token.content);
        if !word.is_empty() {
            self.coords.record(word, token.bbox);
        }
        self.line.push(token.content);
    }

    /// Close the current line.
    pub fn end_line(&mut self) {
        let text = self.line.join(" ");
        self.line.clear();
        match self.lines.get_mut(&self.language) {
            Some(lines) => lines.push(text),
            None => {
                self.lines.insert(self.language.clone(), vec![text]);
            },
        }
    }

    /// Finalize both outputs.
    ///
    /// # Errors
    ///
    /// `Error::MissingPage` if no page was ever recorded.
    pub fn finish(self) -> Result<Extraction> {
        let geometry = self.geometry.ok_or(Error::MissingPage)?;
        if !self.line.is_empty() {
            log::debug!("Dropping {} words outside any TextLine", self.line.len());
        }

        let languages = self
            .lines
            .into_iter()
            .map(|(language, lines)| (language, lines.join("\n")))
            .collect();

        Ok(Extraction {
            text: PageText { languages },
            coords: CoordinateBundle {
                width: geometry.width,
                height: geometry.height,
                coords: self.coords,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(content: &str, hpos: &str) -> WordToken {
        WordToken::new(content, BoundingBox::new(hpos, "10", "50", "20"))
    }

    fn page() -> PageGeometry {
        PageGeometry::new(Some("1000".to_string()), Some("1500".to_string()))
    }

    #[test]
    fn test_line_reconstruction_and_index() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(page()).unwrap();
        asm.begin_block(Some("eng".to_string()));
        asm.push_word(word("The", "1"));
        asm.push_word(word("Lincoln's", "2"));
        asm.push_word(word("Speech.", "3"));
        asm.end_line();

        let (text, coords) = asm.finish().unwrap().into_parts();
        assert_eq!(text.get("eng"), Some("The Lincoln's Speech."));
        let words: Vec<_> = coords.coords.words().collect();
        assert_eq!(words, vec!["The", "Lincoln", "Speech"]);
        assert_eq!(coords.width.as_deref(), Some("1000"));
        assert_eq!(coords.height.as_deref(), Some("1500"));
    }

    #[test]
    fn test_untagged_block_merges_into_default() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(page()).unwrap();
        asm.begin_block(Some("eng".to_string()));
        asm.push_word(word("first", "1"));
        asm.end_line();
        asm.begin_block(None);
        assert_eq!(asm.active_language(), "eng");
        asm.push_word(word("second", "1"));
        asm.end_line();

        let text = asm.finish().unwrap().text;
        assert_eq!(text.len(), 1);
        assert_eq!(text.get("eng"), Some("first\nsecond"));
    }

    #[test]
    fn test_languages_in_first_encounter_order() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(page()).unwrap();
        for (lang, content) in [("ger", "Zeitung"), ("eng", "paper"), ("ger", "Tag")] {
            asm.begin_block(Some(lang.to_string()));
            asm.push_word(word(content, "1"));
            asm.end_line();
        }

        let text = asm.finish().unwrap().text;
        assert_eq!(text.languages().collect::<Vec<_>>(), vec!["ger", "eng"]);
        assert_eq!(text.get("ger"), Some("Zeitung\nTag"));
        assert_eq!(text.all_text(), "Zeitung\nTag\npaper");
    }

    #[test]
    fn test_duplicate_words_keep_every_box_in_order() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(page()).unwrap();
        asm.begin_block(None);
        asm.push_word(word("news", "1"));
        asm.push_word(word("news,", "2"));
        asm.push_word(word("\"news\"", "3"));
        asm.end_line();

        let coords = asm.finish().unwrap().coords.coords;
        let boxes = coords.get("news").unwrap();
        let hpos: Vec<_> = boxes.iter().map(|b| b.hpos.as_deref().unwrap()).collect();
        assert_eq!(hpos, vec!["1", "2", "3"]);
        assert_eq!(coords.len(), 1);
        assert_eq!(coords.occurrences(), 3);
    }

    #[test]
    fn test_punctuation_only_token_in_text_not_index() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(page()).unwrap();
        asm.begin_block(None);
        asm.push_word(word("Yes", "1"));
        asm.push_word(word("--", "2"));
        asm.push_word(word("no", "3"));
        asm.end_line();

        let (text, coords) = asm.finish().unwrap().into_parts();
        assert_eq!(text.get("eng"), Some("Yes -- no"));
        assert!(!coords.coords.contains("--"));
        assert!(!coords.coords.contains(""));
        assert_eq!(coords.coords.len(), 2);
    }

    #[test]
    fn test_empty_line_is_still_a_line() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(page()).unwrap();
        asm.begin_block(None);
        asm.push_word(word("a", "1"));
        asm.end_line();
        asm.end_line();
        asm.push_word(word("b", "1"));
        asm.end_line();

        let text = asm.finish().unwrap().text;
        assert_eq!(text.get("eng"), Some("a\n\nb"));
    }

    #[test]
    fn test_no_lines_gives_empty_text() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(PageGeometry::default()).unwrap();
        let (text, coords) = asm.finish().unwrap().into_parts();
        assert!(text.is_empty());
        assert!(coords.coords.is_empty());
        assert!(coords.width.is_none());
    }

    #[test]
    fn test_geometry_set_once() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(page()).unwrap();
        let err = asm
            .set_geometry(PageGeometry::new(Some("1".to_string()), None))
            .unwrap_err();
        assert!(matches!(err, Error::MultiplePages));

        let coords = asm.finish().unwrap().coords;
        assert_eq!(coords.geometry(), page());
    }

    #[test]
    fn test_finish_without_page_fails() {
        let mut asm = PageAssembler::new("eng");
        asm.begin_block(None);
        asm.push_word(word("orphan", "1"));
        asm.end_line();
        assert!(matches!(asm.finish(), Err(Error::MissingPage)));
    }

    #[test]
    fn test_bundle_json_shape() {
        let mut asm = PageAssembler::new("eng");
        asm.set_geometry(page()).unwrap();
        asm.begin_block(None);
        asm.push_word(word("Hi!", "5"));
        asm.end_line();

        let (text, coords) = asm.finish().unwrap().into_parts();
        let json = serde_json::to_value(&coords).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "width": "1000",
                "height": "1500",
                "coords": { "Hi": [["5", "10", "50", "20"]] }
            })
        );
        assert_eq!(serde_json::to_value(&text).unwrap(), serde_json::json!({ "eng": "Hi!" }));
    }
}
