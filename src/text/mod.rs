//! Text utilities shared by the ALTO walker.

pub mod normalize;

pub use normalize::{is_plain_word, normalize_word};
