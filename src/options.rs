//! Configuration options for TOON encoding and decoding.
//!
//! - [`EncodeOptions`]: indentation width, delimiter, optional length marker
//! - [`DecodeOptions`]: indentation width, strict-mode switch
//! - [`Delimiter`]: the delimiter separating inline values, fields, and
//!   tabular row cells (comma, tab, or pipe)
//! - [`LengthMarker`]: the optional `#` prefix on array lengths
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode_with_options, toon, Delimiter, EncodeOptions, LengthMarker};
//!
//! let tags = toon!(["a", "b", "c"]);
//!
//! let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! assert_eq!(encode_with_options(&tags, options), "[3|]: a|b|c");
//!
//! let options = EncodeOptions::new().with_length_marker(LengthMarker::Hash);
//! assert_eq!(encode_with_options(&tags, options), "[#3]: a,b,c");
//! ```

/// Delimiter separating inline values, tabular header fields, and row cells.
///
/// The active delimiter is echoed inside an array header's brackets (`[3\t]`,
/// `[3|]`; comma carries no symbol), which is how the decoder learns which
/// delimiter governs that array's scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Returns the symbol echoed inside array-header brackets, if any.
    ///
    /// Comma is the default delimiter and carries no symbol.
    #[must_use]
    pub const fn header_symbol(&self) -> Option<char> {
        match self {
            Delimiter::Comma => None,
            Delimiter::Tab => Some('\t'),
            Delimiter::Pipe => Some('|'),
        }
    }

    /// Human-readable name, used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
            Delimiter::Pipe => "pipe",
        }
    }
}

/// Optional marker prefixed to the length inside array-header brackets.
///
/// With [`LengthMarker::Hash`], a three-element array encodes as `[#3]: …`
/// instead of `[3]: …`. The decoder accepts both forms regardless of this
/// option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LengthMarker {
    #[default]
    None,
    Hash,
}

/// Configuration for [`encode_with_options`](crate::encode_with_options).
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, EncodeOptions, LengthMarker};
///
/// let options = EncodeOptions::new()
///     .with_indent_size(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_length_marker(LengthMarker::Hash);
/// assert_eq!(options.indent_size, 4);
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Spaces per indentation level. Values below 1 are clamped to 1.
    pub indent_size: usize,
    /// Delimiter for inline values, fields, and tabular rows.
    pub delimiter: Delimiter,
    /// Optional marker prefixed to array lengths.
    pub length_marker: LengthMarker,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent_size: 2,
            delimiter: Delimiter::default(),
            length_marker: LengthMarker::default(),
        }
    }
}

impl EncodeOptions {
    /// Creates default options (2-space indent, comma delimiter, no marker).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size.max(1);
        self
    }

    /// Sets the delimiter for inline values, fields, and tabular rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the length marker emitted inside array-header brackets.
    #[must_use]
    pub fn with_length_marker(mut self, length_marker: LengthMarker) -> Self {
        self.length_marker = length_marker;
        self
    }
}

/// Configuration for [`decode_with_options`](crate::decode_with_options).
///
/// Strict mode (the default) enforces that declared array lengths match
/// observed counts, that tabular rows have exactly as many cells as the
/// header has fields, and that every line's indentation is an exact multiple
/// of `indent_size`. Non-strict mode skips those checks: fractional indents
/// floor to the nearest level, short tabular rows pad with null, and extra
/// cells are dropped.
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Spaces per indentation level. Values below 1 are clamped to 1.
    pub indent_size: usize,
    /// Enforce declared counts, row widths, and indentation multiples.
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            indent_size: 2,
            strict: true,
        }
    }
}

impl DecodeOptions {
    /// Creates default options (2-space indent, strict mode on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size.max(1);
        self
    }

    /// Enables or disables strict validation.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
