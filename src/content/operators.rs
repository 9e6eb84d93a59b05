//! Content stream operators that affect where text lands on the page.
//!
//! Painting, color and path operators are irrelevant to text layout and are
//! collapsed into [`Operator::Other`].

/// A content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Move text position (Td)
    Td {
        /// Horizontal offset
        tx: f32,
        /// Vertical offset
        ty: f32,
    },
    /// Move text position and set leading to -ty (TD)
    TD {
        /// Horizontal offset
        tx: f32,
        /// Vertical offset
        ty: f32,
    },
    /// Set text matrix (Tm)
    Tm {
        /// Matrix components a b c d e f
        m: [f32; 6],
    },
    /// Move to start of next line (T*)
    TStar,
    /// Show text string (Tj)
    Tj {
        /// Encoded string bytes
        text: Vec<u8>,
    },
    /// Show strings with kerning adjustments (TJ)
    TJ {
        /// Strings and offsets in thousandths of text space
        array: Vec<TextElement>,
    },
    /// Next line, then show text (')
    Quote {
        /// Encoded string bytes
        text: Vec<u8>,
    },
    /// Set spacing, next line, show text (")
    DoubleQuote {
        /// Word spacing
        word_space: f32,
        /// Character spacing
        char_space: f32,
        /// Encoded string bytes
        text: Vec<u8>,
    },
    /// Character spacing (Tc)
    Tc {
        /// Character spacing
        char_space: f32,
    },
    /// Word spacing (Tw)
    Tw {
        /// Word spacing
        word_space: f32,
    },
    /// Horizontal scaling in percent (Tz)
    Tz {
        /// Horizontal scaling percentage
        scale: f32,
    },
    /// Text leading (TL)
    TL {
        /// Text leading
        leading: f32,
    },
    /// Font resource and size (Tf)
    Tf {
        /// Font resource name
        font: String,
        /// Font size
        size: f32,
    },
    /// Text rise (Ts)
    Ts {
        /// Text rise
        rise: f32,
    },
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Concatenate to the current transformation matrix (cm)
    Cm {
        /// Matrix components a b c d e f
        m: [f32; 6],
    },
    /// Paint an XObject (Do)
    Do {
        /// XObject resource name
        name: String,
    },
    /// Any operator that does not move or show text
    Other {
        /// Operator name
        name: String,
    },
}

/// Element of a TJ array.
#[derive(Debug, Clone, PartialEq)]
pub enum TextElement {
    /// String to show
    String(Vec<u8>),
    /// Horizontal adjustment in thousandths of an em (positive moves left)
    Offset(f32),
}
