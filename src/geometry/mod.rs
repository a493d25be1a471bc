//! Page and word geometry as reported by the OCR engine.
//!
//! ALTO producers disagree on units and number formats (integers, decimals,
//! engine-specific measurement units), so every value is kept as the opaque
//! attribute text it was read from. Nothing here parses numbers.

use serde::{Deserialize, Serialize};

/// Dimensions of the page image, taken from the `Page` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageGeometry {
    /// `WIDTH` attribute, if present
    pub width: Option<String>,
    /// `HEIGHT` attribute, if present
    pub height: Option<String>,
}

impl PageGeometry {
    /// Create page geometry from optional width and height.
    ///
    /// # Examples
    ///
    /// ```
    /// use alto_oxide::geometry::PageGeometry;
    ///
    /// let page = PageGeometry::new(Some("5000".into()), None);
    /// assert_eq!(page.width.as_deref(), Some("5000"));
    /// assert!(page.height.is_none());
    /// ```
    pub fn new(width: Option<String>, height: Option<String>) -> Self {
        Self { width, height }
    }
}

/// Raw wire form of a bounding box: `[hpos, vpos, width, height]`.
type RawBox = (Option<String>, Option<String>, Option<String>, Option<String>);

/// Location of one word on the page image.
///
/// Serializes as a four-element array `[hpos, vpos, width, height]`, the
/// shape consumed by coordinate-based highlighting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBox", into = "RawBox")]
pub struct BoundingBox {
    /// Horizontal position (`HPOS`)
    pub hpos: Option<String>,
    /// Vertical position (`VPOS`)
    pub vpos: Option<String>,
    /// Width (`WIDTH`)
    pub width: Option<String>,
    /// Height (`HEIGHT`)
    pub height: Option<String>,
}

impl BoundingBox {
    /// Create a bounding box from its four attribute values.
    ///
    /// # Examples
    ///
    /// ```
    /// use alto_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new("10", "20", "300", "40");
    /// assert_eq!(bbox.hpos.as_deref(), Some("10"));
    /// assert_eq!(bbox.height.as_deref(), Some("40"));
    /// ```
    pub fn new(
        hpos: impl Into<String>,
        vpos: impl Into<String>,
        width: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        Self {
            hpos: Some(hpos.into()),
            vpos: Some(vpos.into()),
            width: Some(width.into()),
            height: Some(height.into()),
        }
    }

    /// True when all four attributes were present.
    pub fn is_complete(&self) -> bool {
        self.hpos.is_some() && self.vpos.is_some() && self.width.is_some() && self.height.is_some()
    }
}

impl From<RawBox> for BoundingBox {
    fn from((hpos, vpos, width, height): RawBox) -> Self {
        Self {
            hpos,
            vpos,
            width,
            height,
        }
    }
}

impl From<BoundingBox> for RawBox {
    fn from(bbox: BoundingBox) -> Self {
        (bbox.hpos, bbox.vpos, bbox.width, bbox.height)
    }
}
