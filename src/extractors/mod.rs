//! Text and coordinate extraction from ALTO OCR documents.
//!
//! [`AltoExtractor`] walks the document; [`PageAssembler`] turns the walk
//! into [`PageText`] and [`CoordinateBundle`].

pub mod alto;
pub mod assembler;

pub use alto::AltoExtractor;
pub use assembler::{
    CoordinateBundle, CoordinateIndex, Extraction, PageAssembler, PageText, WordToken,
};
