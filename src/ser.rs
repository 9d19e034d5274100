//! TOON encoding.
//!
//! The encoder walks a [`Value`] tree and assembles indented TOON text. For
//! every array it selects exactly one surface form, checking in order:
//!
//! 1. **Empty**: `[0]:`
//! 2. **Inline**: all elements primitive → `[N]: v1,v2,v3`
//! 3. **Nested primitive arrays**: every element an all-primitive array →
//!    header plus one `- [M]: …` item per element
//! 4. **Tabular**: uniform object arrays → `[N]{f1,f2}:` plus one delimited
//!    row per element
//! 5. **Expanded list**: anything else → header plus `- ` items
//!
//! The choice is local to each array: only the direct children are inspected,
//! so the same array encodes the same way at any depth.
//!
//! Strings are quoted only when leaving them bare would change their meaning:
//! when they are empty, collide with `true`/`false`/`null`, look numeric,
//! start with a hyphen, carry edge whitespace, or contain structural
//! characters or the active delimiter. Keys are quoted unless they match
//! `[A-Za-z_][A-Za-z0-9_.]*`.
//!
//! Encoding a well-formed [`Value`] cannot fail; [`encode_value`] returns the
//! document directly.
//!
//! This module also hosts [`ValueSerializer`], the `serde::Serializer` behind
//! [`to_value`](crate::to_value) that builds a [`Value`] from any
//! `Serialize` type.

use crate::map::Map;
use crate::options::{Delimiter, EncodeOptions, LengthMarker};
use crate::value::{Number, Value};
use crate::{Error, Result};
use serde::{ser, Serialize};

/// Encode a value as a TOON document with the given options.
pub(crate) fn encode_value(value: &Value, options: &EncodeOptions) -> String {
    let mut encoder = Encoder {
        options,
        out: LineWriter::new(options.indent_size),
    };
    encoder.root(value);
    encoder.out.finish()
}

/// Append-only buffer of output lines with depth-to-indent expansion.
struct LineWriter {
    lines: Vec<String>,
    indent_size: usize,
}

impl LineWriter {
    fn new(indent_size: usize) -> Self {
        LineWriter {
            lines: Vec::new(),
            indent_size: indent_size.max(1),
        }
    }

    fn push(&mut self, depth: usize, text: String) {
        let indent = self.indent_size * depth;
        let mut line = String::with_capacity(indent + text.len());
        for _ in 0..indent {
            line.push(' ');
        }
        line.push_str(&text);
        self.lines.push(line);
    }

    /// Joins the accumulated lines with `\n`. No trailing newline; no lines
    /// yields the empty string.
    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// The surface form chosen for an array. Variants mirror the detection order.
enum ArrayShape<'a> {
    Empty,
    Inline,
    NestedPrimitiveArrays,
    Tabular(Vec<&'a str>),
    List,
}

fn detect_shape(items: &[Value]) -> ArrayShape<'_> {
    if items.is_empty() {
        return ArrayShape::Empty;
    }
    if items.iter().all(Value::is_primitive) {
        return ArrayShape::Inline;
    }
    if items
        .iter()
        .all(|v| matches!(v, Value::Array(inner) if inner.iter().all(Value::is_primitive)))
    {
        return ArrayShape::NestedPrimitiveArrays;
    }
    if let Some(fields) = tabular_fields(items) {
        return ArrayShape::Tabular(fields);
    }
    ArrayShape::List
}

/// Returns the column order for a tabular encoding, or `None` when the array
/// is not uniform enough: every element must be an object with the same key
/// set as the first element (whose order wins) and only primitive values.
fn tabular_fields(items: &[Value]) -> Option<Vec<&str>> {
    let first = items[0].as_object()?;
    if first.is_empty() {
        return None;
    }
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();
    for item in items {
        let obj = item.as_object()?;
        if obj.len() != fields.len() {
            return None;
        }
        for field in &fields {
            match obj.get(field) {
                Some(value) if value.is_primitive() => {}
                _ => return None,
            }
        }
    }
    Some(fields)
}

struct Encoder<'a> {
    options: &'a EncodeOptions,
    out: LineWriter,
}

impl Encoder<'_> {
    fn root(&mut self, value: &Value) {
        match value {
            Value::Object(map) if map.is_empty() => {}
            Value::Object(map) => self.object_fields(map, 0),
            Value::Array(items) => self.array(None, items, 0, ""),
            primitive => {
                let scalar = self.scalar(primitive);
                self.out.push(0, scalar);
            }
        }
    }

    fn object_fields(&mut self, map: &Map, depth: usize) {
        for (key, value) in map {
            self.field(key, value, depth);
        }
    }

    fn field(&mut self, key: &str, value: &Value, depth: usize) {
        match value {
            Value::Array(items) => self.array(Some(key), items, depth, ""),
            Value::Object(map) if map.is_empty() => {
                self.out.push(depth, format!("{}:", quote_key(key)));
            }
            Value::Object(map) => {
                self.out.push(depth, format!("{}:", quote_key(key)));
                self.object_fields(map, depth + 1);
            }
            primitive => {
                let scalar = self.scalar(primitive);
                self.out
                    .push(depth, format!("{}: {}", quote_key(key), scalar));
            }
        }
    }

    /// Emit an array. The header line goes at `depth` behind `prefix` (empty,
    /// or `"- "` when the array is the first field of a list-item object);
    /// any body lines go at `depth + 1`.
    fn array(&mut self, key: Option<&str>, items: &[Value], depth: usize, prefix: &str) {
        match detect_shape(items) {
            ArrayShape::Empty => {
                let header = self.header(key, 0, None, false);
                self.out.push(depth, format!("{prefix}{header}"));
            }
            ArrayShape::Inline => {
                let header = self.header(key, items.len(), None, true);
                let values = self.joined_scalars(items);
                self.out.push(depth, format!("{prefix}{header} {values}"));
            }
            ArrayShape::NestedPrimitiveArrays => {
                let header = self.header(key, items.len(), None, false);
                self.out.push(depth, format!("{prefix}{header}"));
                for item in items {
                    let Value::Array(inner) = item else {
                        unreachable!("shape detection admitted a non-array element")
                    };
                    let fragment = self.inline_fragment(inner);
                    self.out.push(depth + 1, format!("- {fragment}"));
                }
            }
            ArrayShape::Tabular(fields) => {
                let header = self.header(key, items.len(), Some(&fields), true);
                self.out.push(depth, format!("{prefix}{header}"));
                let delim = self.options.delimiter.as_char();
                for item in items {
                    let Some(obj) = item.as_object() else {
                        unreachable!("shape detection admitted a non-object row")
                    };
                    let mut row = String::new();
                    for (i, field) in fields.iter().enumerate() {
                        if i > 0 {
                            row.push(delim);
                        }
                        let Some(cell) = obj.get(field) else {
                            unreachable!("shape detection admitted a row missing a field")
                        };
                        row.push_str(&self.scalar(cell));
                    }
                    self.out.push(depth + 1, row);
                }
            }
            ArrayShape::List => {
                let header = self.header(key, items.len(), None, false);
                self.out.push(depth, format!("{prefix}{header}"));
                for item in items {
                    self.list_item(item, depth + 1);
                }
            }
        }
    }

    fn list_item(&mut self, item: &Value, depth: usize) {
        match item {
            Value::Array(inner) if inner.iter().all(Value::is_primitive) => {
                let fragment = self.inline_fragment(inner);
                self.out.push(depth, format!("- {fragment}"));
            }
            Value::Array(inner) => {
                // Complex arrays get a bare hyphen; their own header starts
                // one level deeper.
                self.out.push(depth, "-".to_string());
                self.array(None, inner, depth + 1, "");
            }
            Value::Object(map) if map.is_empty() => {
                self.out.push(depth, "-".to_string());
            }
            Value::Object(map) => self.item_object(map, depth),
            primitive => {
                let scalar = self.scalar(primitive);
                self.out.push(depth, format!("- {scalar}"));
            }
        }
    }

    /// Emit an object list item: the first field rides on the hyphen line,
    /// siblings go one level deeper, and a nested-object first field puts its
    /// body two levels deeper (below where the siblings will sit).
    fn item_object(&mut self, map: &Map, depth: usize) {
        let mut fields = map.iter();
        let (first_key, first_value) = fields
            .next()
            .unwrap_or_else(|| unreachable!("empty objects are emitted as bare hyphens"));
        match first_value {
            Value::Array(items) => self.array(Some(first_key.as_str()), items, depth, "- "),
            Value::Object(inner) if inner.is_empty() => {
                self.out.push(depth, format!("- {}:", quote_key(first_key)));
            }
            Value::Object(inner) => {
                self.out.push(depth, format!("- {}:", quote_key(first_key)));
                self.object_fields(inner, depth + 2);
            }
            primitive => {
                let scalar = self.scalar(primitive);
                self.out
                    .push(depth, format!("- {}: {}", quote_key(first_key), scalar));
            }
        }
        for (key, value) in fields {
            self.field(key, value, depth + 1);
        }
    }

    /// Build an array header: `key? '[' marker? N delimsym? ']' fields? ':'`.
    ///
    /// The delimiter symbol is echoed only when the header governs delimited
    /// text (`carries_values`): inline values or tabular fields and rows.
    fn header(
        &self,
        key: Option<&str>,
        len: usize,
        fields: Option<&[&str]>,
        carries_values: bool,
    ) -> String {
        let mut header = String::new();
        if let Some(key) = key {
            header.push_str(&quote_key(key));
        }
        header.push('[');
        if self.options.length_marker == LengthMarker::Hash {
            header.push('#');
        }
        header.push_str(&len.to_string());
        if carries_values {
            if let Some(symbol) = self.options.delimiter.header_symbol() {
                header.push(symbol);
            }
        }
        header.push(']');
        if let Some(fields) = fields {
            header.push('{');
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    header.push(self.options.delimiter.as_char());
                }
                header.push_str(&quote_key(field));
            }
            header.push('}');
        }
        header.push(':');
        header
    }

    /// `[M]: v1,v2` for an all-primitive array, `[0]:` when empty. Used for
    /// nested primitive arrays and primitive-array list items, which ride on
    /// their hyphen line.
    fn inline_fragment(&self, items: &[Value]) -> String {
        if items.is_empty() {
            self.header(None, 0, None, false)
        } else {
            let header = self.header(None, items.len(), None, true);
            format!("{} {}", header, self.joined_scalars(items))
        }
    }

    fn joined_scalars(&self, items: &[Value]) -> String {
        let delim = self.options.delimiter.as_char();
        let mut out = String::new();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(delim);
            }
            out.push_str(&self.scalar(item));
        }
        out
    }

    /// Render a primitive with quoting against the active delimiter. Calling
    /// this with an array or object is a bug in the caller.
    fn scalar(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => quote_string(s, self.options.delimiter),
            Value::Array(_) | Value::Object(_) => {
                unreachable!("scalar rendering requires a primitive value")
            }
        }
    }
}

/// Quote and escape `s` if leaving it bare would change its meaning under
/// the given delimiter; otherwise return it verbatim.
fn quote_string(s: &str, delimiter: Delimiter) -> String {
    if needs_quoting(s, delimiter) {
        escaped(s)
    } else {
        s.to_string()
    }
}

fn needs_quoting(s: &str, delimiter: Delimiter) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    let last = s.chars().next_back().unwrap_or(first);
    if first == ' ' || first == '\t' || last == ' ' || last == '\t' {
        return true;
    }
    if s == "true" || s == "false" || s == "null" {
        return true;
    }
    if looks_numeric(s) {
        return true;
    }
    if s.chars().any(|c| {
        matches!(
            c,
            ':' | '"' | '\\' | '[' | ']' | '{' | '}' | '\n' | '\r' | '\t'
        )
    }) {
        return true;
    }
    if s.contains(delimiter.as_char()) {
        return true;
    }
    // Bare leading hyphens collide with list item markers.
    first == '-'
}

/// A string is numeric-like when, after an optional sign, it starts with a
/// digit and continues with only digits, dots, exponent letters, and signs.
/// This is wider than the set of parseable numbers on purpose: anything in it
/// (`05`, `1.2.3`) would be mistaken for a number by a reader.
fn looks_numeric(s: &str) -> bool {
    let rest = s.strip_prefix('-').unwrap_or(s);
    let bytes = rest.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_digit() => {}
        _ => return false,
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
}

/// Wrap `s` in quotes, escaping the five recognized sequences.
fn escaped(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Keys are emitted bare only when they match `[A-Za-z_][A-Za-z0-9_.]*`.
fn quote_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        escaped(key)
    }
}

fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// A `serde::Serializer` whose output is a [`Value`] tree. Backs
/// [`to_value`](crate::to_value).
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeValueMap {
    map: Map,
    current_key: Option<String>,
}

fn to_value_inner<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeValueMap;
    type SerializeStruct = SerializeValueMap;
    type SerializeStructVariant = SerializeValueMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(Number::from(v as f64)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v.iter().map(|&b| Value::from(b)).collect();
        Ok(Value::Array(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::new();
        map.insert(variant.to_string(), to_value_inner(value)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec { vec: Vec::new() })
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec { vec: Vec::new() })
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec { vec: Vec::new() })
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::Message(
            "tuple variants cannot be represented as TOON values".to_string(),
        ))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeValueMap> {
        Ok(SerializeValueMap {
            map: Map::new(),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeValueMap> {
        Ok(SerializeValueMap {
            map: Map::new(),
            current_key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeValueMap> {
        Err(Error::Message(
            "struct variants cannot be represented as TOON values".to_string(),
        ))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeMap for SerializeValueMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value_inner(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::Message("map keys must be strings".to_string())),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::Message("serialize_value called without a key".to_string()))?;
        self.map.insert(key, to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeValueMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeValueMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode, encode_with_options, toon};

    #[test]
    fn line_writer_indents_and_joins() {
        let mut writer = LineWriter::new(2);
        writer.push(0, "a:".to_string());
        writer.push(1, "b: 1".to_string());
        writer.push(2, "c: 2".to_string());
        assert_eq!(writer.finish(), "a:\n  b: 1\n    c: 2");
    }

    #[test]
    fn line_writer_empty_is_empty_string() {
        assert_eq!(LineWriter::new(2).finish(), "");
    }

    #[test]
    fn string_quoting_rules() {
        let comma = Delimiter::Comma;
        assert!(needs_quoting("", comma));
        assert!(needs_quoting(" padded", comma));
        assert!(needs_quoting("padded ", comma));
        assert!(needs_quoting("\tpadded", comma));
        assert!(needs_quoting("true", comma));
        assert!(needs_quoting("false", comma));
        assert!(needs_quoting("null", comma));
        assert!(needs_quoting("42", comma));
        assert!(needs_quoting("-3.5", comma));
        assert!(needs_quoting("05", comma));
        assert!(needs_quoting("1e-6", comma));
        assert!(needs_quoting("a:b", comma));
        assert!(needs_quoting("a,b", comma));
        assert!(needs_quoting("[5]", comma));
        assert!(needs_quoting("{x}", comma));
        assert!(needs_quoting("-dash", comma));
        assert!(needs_quoting("line\nbreak", comma));

        assert!(!needs_quoting("hello", comma));
        assert!(!needs_quoting("hello world", comma));
        assert!(!needs_quoting("caf\u{e9}", comma));
        assert!(!needs_quoting("x2", comma));
    }

    #[test]
    fn quoting_tracks_active_delimiter() {
        assert!(needs_quoting("a,b", Delimiter::Comma));
        assert!(!needs_quoting("a,b", Delimiter::Pipe));
        assert!(needs_quoting("a|b", Delimiter::Pipe));
        assert!(!needs_quoting("a|b", Delimiter::Comma));
        // Tab is in the structural set regardless of delimiter.
        assert!(needs_quoting("a\tb", Delimiter::Comma));
    }

    #[test]
    fn numeric_like_detection() {
        assert!(looks_numeric("0"));
        assert!(looks_numeric("42"));
        assert!(looks_numeric("-42"));
        assert!(looks_numeric("3.5"));
        assert!(looks_numeric("05"));
        assert!(looks_numeric("1.2.3"));
        assert!(looks_numeric("1e10"));
        assert!(looks_numeric("2E-3"));

        assert!(!looks_numeric("abc"));
        assert!(!looks_numeric("1abc"));
        assert!(!looks_numeric("-abc"));
        assert!(!looks_numeric("-"));
        assert!(!looks_numeric(".5"));
        assert!(!looks_numeric(""));
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(escaped("a\"b"), "\"a\\\"b\"");
        assert_eq!(escaped("a\\b"), "\"a\\\\b\"");
        assert_eq!(escaped("a\nb"), "\"a\\nb\"");
        assert_eq!(escaped("a\rb"), "\"a\\rb\"");
        assert_eq!(escaped("a\tb"), "\"a\\tb\"");
    }

    #[test]
    fn key_quoting() {
        assert_eq!(quote_key("name"), "name");
        assert_eq!(quote_key("_private"), "_private");
        assert_eq!(quote_key("user.email"), "user.email");
        assert_eq!(quote_key("a1"), "a1");
        assert_eq!(quote_key("2nd"), "\"2nd\"");
        assert_eq!(quote_key("user-id"), "\"user-id\"");
        assert_eq!(quote_key("has space"), "\"has space\"");
        assert_eq!(quote_key(""), "\"\"");
    }

    #[test]
    fn shape_selection_order() {
        assert!(matches!(detect_shape(&[]), ArrayShape::Empty));

        let inline = [Value::from(1), Value::from("x"), Value::Null];
        assert!(matches!(detect_shape(&inline), ArrayShape::Inline));

        let nested = [
            Value::Array(vec![Value::from(1)]),
            Value::Array(vec![]),
        ];
        assert!(matches!(
            detect_shape(&nested),
            ArrayShape::NestedPrimitiveArrays
        ));

        let rows = [
            toon!({"a": 1, "b": 2}),
            toon!({"b": 4, "a": 3}),
        ];
        match detect_shape(&rows) {
            ArrayShape::Tabular(fields) => assert_eq!(fields, vec!["a", "b"]),
            _ => panic!("expected tabular shape"),
        }

        let mixed = [Value::from(1), toon!({"a": 1})];
        assert!(matches!(detect_shape(&mixed), ArrayShape::List));
    }

    #[test]
    fn tabular_rejects_non_uniform_rows() {
        // Differing key sets
        let items = [toon!({"a": 1}), toon!({"b": 2})];
        assert!(tabular_fields(&items).is_none());

        // Extra key
        let items = [toon!({"a": 1}), toon!({"a": 2, "b": 3})];
        assert!(tabular_fields(&items).is_none());

        // Nested value disqualifies
        let items = [toon!({"a": 1}), toon!({"a": [1, 2]})];
        assert!(tabular_fields(&items).is_none());

        // Empty objects never tabulate
        let items = [toon!({}), toon!({})];
        assert!(tabular_fields(&items).is_none());
    }

    #[test]
    fn tabular_column_order_comes_from_first_element() {
        let value = toon!([
            {"name": "Alice", "age": 30},
            {"age": 25, "name": "Bob"}
        ]);
        assert_eq!(encode(&value), "[2]{name,age}:\n  Alice,30\n  Bob,25");
    }

    #[test]
    fn header_formats() {
        let value = toon!(["a", "b"]);
        assert_eq!(encode(&value), "[2]: a,b");

        let options = EncodeOptions::new().with_length_marker(LengthMarker::Hash);
        assert_eq!(encode_with_options(&value, options), "[#2]: a,b");

        let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
        assert_eq!(encode_with_options(&value, options), "[2\t]: a\tb");

        let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
        assert_eq!(encode_with_options(&value, options), "[2|]: a|b");
    }

    #[test]
    fn empty_roots() {
        assert_eq!(encode(&toon!({})), "");
        assert_eq!(encode(&toon!([])), "[0]:");
    }

    #[test]
    fn nested_object_encoding() {
        let value = toon!({
            "address": {"city": "NYC", "zip": "10001"}
        });
        assert_eq!(encode(&value), "address:\n  city: NYC\n  zip: \"10001\"");
    }

    #[test]
    fn empty_object_field() {
        let value = toon!({"meta": {}});
        assert_eq!(encode(&value), "meta:");
    }

    #[test]
    fn nested_primitive_arrays_encoding() {
        let value = toon!([[1, 2], [3], []]);
        assert_eq!(encode(&value), "[3]:\n  - [2]: 1,2\n  - [1]: 3\n  - [0]:");
    }

    #[test]
    fn expanded_list_encoding() {
        let value = toon!(["item1", 42, {"key": "value"}]);
        assert_eq!(encode(&value), "[3]:\n  - item1\n  - 42\n  - key: value");
    }

    #[test]
    fn list_item_object_with_siblings() {
        let value = toon!([{"name": "Alice", "role": "admin", "age": 30}, 1]);
        assert_eq!(
            encode(&value),
            "[2]:\n  - name: Alice\n    role: admin\n    age: 30\n  - 1"
        );
    }

    #[test]
    fn list_item_object_with_nested_first_field() {
        let value = toon!([{"meta": {"a": 1}, "id": 7}, true]);
        assert_eq!(
            encode(&value),
            "[2]:\n  - meta:\n      a: 1\n    id: 7\n  - true"
        );
    }

    #[test]
    fn list_item_object_with_array_first_field() {
        let value = toon!([{"tags": ["x", "y"], "id": 7}, true]);
        assert_eq!(
            encode(&value),
            "[2]:\n  - tags[2]: x,y\n    id: 7\n  - true"
        );
    }

    #[test]
    fn complex_array_as_list_item() {
        let value = toon!([[{"a": 1}, {"a": 2}]]);
        assert_eq!(encode(&value), "[1]:\n  -\n    [2]{a}:\n      1\n      2");
    }

    #[test]
    fn empty_object_as_list_item() {
        let value = toon!([{}, 1]);
        assert_eq!(encode(&value), "[2]:\n  -\n  - 1");
    }

    #[test]
    fn tabular_with_null_cells() {
        let value = toon!([
            {"id": 1, "note": null},
            {"id": 2, "note": "ok"}
        ]);
        assert_eq!(encode(&value), "[2]{id,note}:\n  1,null\n  2,ok");
    }

    #[test]
    fn quoted_field_names_in_tabular_header() {
        let value = toon!([
            {"user id": 1, "name": "Ann"},
            {"user id": 2, "name": "Ben"}
        ]);
        assert_eq!(
            encode(&value),
            "[2]{\"user id\",name}:\n  1,Ann\n  2,Ben"
        );
    }

    #[test]
    fn custom_indent_size() {
        let value = toon!({"outer": {"inner": 1}});
        let options = EncodeOptions::new().with_indent_size(4);
        assert_eq!(encode_with_options(&value, options), "outer:\n    inner: 1");
    }

    #[test]
    fn root_primitives() {
        assert_eq!(encode(&Value::Null), "null");
        assert_eq!(encode(&Value::from(true)), "true");
        assert_eq!(encode(&Value::from(42)), "42");
        assert_eq!(encode(&Value::from("hello world")), "hello world");
        assert_eq!(encode(&Value::from("42")), "\"42\"");
        assert_eq!(encode(&Value::from("")), "\"\"");
    }

    #[test]
    fn to_value_struct() {
        use serde::Serialize;

        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let value = crate::to_value(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value, toon!({"x": 1, "y": 2}));
    }

    #[test]
    fn to_value_collections() {
        let value = crate::to_value(&vec![1u8, 2, 3]).unwrap();
        assert_eq!(value, toon!([1, 2, 3]));

        let value = crate::to_value(&Some("x")).unwrap();
        assert_eq!(value, Value::from("x"));

        let value = crate::to_value(&None::<i32>).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn to_value_rejects_non_string_map_keys() {
        use std::collections::BTreeMap;
        let map: BTreeMap<i32, i32> = BTreeMap::from([(1, 2)]);
        assert!(crate::to_value(&map).is_err());
    }
}
