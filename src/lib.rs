//! # toon-codec
//!
//! Encoder and decoder for **TOON** (Token-Oriented Object Notation), a
//! compact, indentation-based text format for JSON-equivalent data. TOON
//! trades braces, brackets, and most quotes for structure-by-indentation,
//! which cuts the token count of structured data in LLM prompts while
//! staying readable.
//!
//! ## Quick start
//!
//! ```rust
//! use toon_codec::{decode, encode, toon, Value};
//!
//! let users = toon!([
//!     {"name": "Alice", "age": 30},
//!     {"name": "Bob", "age": 25}
//! ]);
//!
//! // Uniform object arrays compress into a table.
//! let text = encode(&users);
//! assert_eq!(text, "[2]{name,age}:\n  Alice,30\n  Bob,25");
//!
//! let back = decode(&text).unwrap();
//! assert_eq!(back.as_array().unwrap().len(), 2);
//! assert_eq!(back.as_array().unwrap()[0]["name"], Value::from("Alice"));
//! ```
//!
//! ## Array forms
//!
//! Every array encodes in exactly one of three surface forms, chosen from its
//! direct children:
//!
//! - **Inline** for all-primitive arrays: `tags[3]: a,b,c`
//! - **Tabular** for uniform object arrays: `rows[2]{id,name}:` followed by
//!   one delimited row per element
//! - **Expanded list** for everything else: `items[2]:` followed by `- `
//!   items one level deeper
//!
//! Headers always carry the element count, and non-comma delimiters are
//! echoed inside the brackets (`[3\t]`, `[3|]`) so a decoder knows how to
//! split that array's values.
//!
//! ## Decoding is textual
//!
//! Unquoted scalars decode as strings; only unquoted `true`, `false`, and
//! `null` map to their keyword values. `decode(encode(v))` therefore equals
//! `v` with every number replaced by its rendered string:
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let v = toon!({"n": 30});
//! assert_eq!(decode(&encode(&v)).unwrap(), toon!({"n": "30"}));
//! ```
//!
//! ## Options
//!
//! ```rust
//! use toon_codec::{encode_with_options, toon, Delimiter, EncodeOptions};
//!
//! let nums = toon!([1, 2, 3]);
//! let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
//! assert_eq!(encode_with_options(&nums, options), "[3\t]: 1\t2\t3");
//! ```
//!
//! Decoding is strict by default: declared counts, tabular row widths, and
//! indentation multiples are enforced, and the first violation aborts with a
//! positioned [`Error`]. [`DecodeOptions::with_strict`] turns that off.

mod de;
mod error;
mod macros;
mod map;
mod options;
mod ser;
mod value;

pub use error::{Error, Result};
pub use map::Map;
pub use options::{DecodeOptions, Delimiter, EncodeOptions, LengthMarker};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::Serialize;

/// Encode a value as a TOON document with default options.
///
/// Encoding a well-formed [`Value`] cannot fail. The output uses LF line
/// terminators, has no trailing newline, and an empty root object yields the
/// empty string.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon};
///
/// let value = toon!({"name": "Alice", "age": 30});
/// assert_eq!(encode(&value), "name: Alice\nage: 30");
/// ```
#[must_use]
pub fn encode(value: &Value) -> String {
    encode_with_options(value, EncodeOptions::default())
}

/// Encode a value as a TOON document with the given options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode_with_options, toon, EncodeOptions, LengthMarker};
///
/// let value = toon!(["a", "b"]);
/// let options = EncodeOptions::new().with_length_marker(LengthMarker::Hash);
/// assert_eq!(encode_with_options(&value, options), "[#2]: a,b");
/// ```
#[must_use]
pub fn encode_with_options(value: &Value, options: EncodeOptions) -> String {
    ser::encode_value(value, &options)
}

/// Decode a TOON document with default options (strict mode).
///
/// # Errors
///
/// Returns an error when the input has no non-blank line, is not
/// syntactically valid TOON, or fails a strict-mode count, row-width, or
/// indentation check. Errors carry 1-based line numbers.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, toon};
///
/// let value = decode("[3]: 1,2,3").unwrap();
/// assert_eq!(value, toon!(["1", "2", "3"]));
///
/// assert!(decode("[5]: 1,2,3").is_err());
/// ```
pub fn decode(input: &str) -> Result<Value> {
    decode_with_options(input, &DecodeOptions::default())
}

/// Decode a TOON document with the given options.
///
/// # Errors
///
/// As [`decode`]; with `strict` disabled, count, row-width, and
/// indentation-multiple violations are tolerated instead of reported.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode_with_options, toon, DecodeOptions};
///
/// let options = DecodeOptions::new().with_strict(false);
/// let value = decode_with_options("[5]: 1,2,3", &options).unwrap();
/// assert_eq!(value, toon!(["1", "2", "3"]));
/// ```
pub fn decode_with_options(input: &str, options: &DecodeOptions) -> Result<Value> {
    de::decode_str(input, options)
}

/// Convert any `T: Serialize` into a [`Value`] tree.
///
/// This is the bridge from typed Rust data into the dynamic value model;
/// combined with [`encode`] it turns any `Serialize` type into TOON text.
///
/// # Errors
///
/// Returns an error when the type cannot be represented (non-string map
/// keys, tuple or struct enum variants).
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::{encode, to_value};
///
/// #[derive(Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(encode(&value), "x: 1\ny: 2");
/// ```
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let value = toon!({
            "name": "Alice",
            "active": true,
            "tags": ["admin", "user"],
            "profile": {"city": "NYC"}
        });
        let text = encode(&value);
        let back = decode(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn to_value_then_encode() {
        use serde::Serialize;

        #[derive(Serialize)]
        struct User {
            id: u32,
            name: String,
        }

        let user = User {
            id: 7,
            name: "Ann".to_string(),
        };
        let value = to_value(&user).unwrap();
        assert_eq!(encode(&value), "id: 7\nname: Ann");
    }

    #[test]
    fn empty_roots() {
        assert_eq!(encode(&toon!({})), "");
        assert_eq!(encode(&toon!([])), "[0]:");
        assert_eq!(decode("[0]:").unwrap(), toon!([]));
        assert_eq!(decode(""), Err(Error::EmptyInput));
    }
}
