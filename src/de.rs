//! TOON decoding.
//!
//! Decoding is a single-pass recursive descent over scanned lines. The
//! scanner splits the input on `\n`, drops blank lines, and records each
//! remaining line's content, leading-space count, and 1-based line number;
//! depth is the indent divided by the configured indent size. A cursor walks
//! the scanned lines with one-line lookahead and no backtracking.
//!
//! The root form is detected from the first non-blank line: a keyless array
//! header makes the document a root array, a single line without an unquoted
//! colon is a root primitive, and anything else is a root object.
//!
//! Unquoted scalars decode as strings. The literals `true`, `false`, and
//! `null` are the only unquoted tokens with a non-string meaning; tokens the
//! encoder would have emitted for numbers come back as [`Value::String`].
//! This keeps decoding lossless for documents whose producers think of
//! numbers textually; the number-aware direction is encoding only.
//!
//! In strict mode (the default) declared array lengths must match observed
//! counts, tabular rows must be exactly as wide as their header's field list,
//! and indentation must be an exact multiple of the indent size. The first
//! violation aborts decoding; partial values are never returned.

use crate::map::Map;
use crate::options::{DecodeOptions, Delimiter};
use crate::value::Value;
use crate::{Error, Result};

/// Decode a TOON document with the given options.
pub(crate) fn decode_str(input: &str, options: &DecodeOptions) -> Result<Value> {
    let lines = scan(input, options)?;
    if lines.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut decoder = Decoder {
        cursor: Cursor { lines, pos: 0 },
        options,
    };
    decoder.document()
}

/// One non-blank input line, as recorded by the scanner.
#[derive(Clone, Copy, Debug)]
struct Line<'a> {
    /// Text with the leading indent and any trailing whitespace removed.
    content: &'a str,
    /// Number of leading spaces.
    indent: usize,
    /// `indent / indent_size` (strict mode rejects inexact divisions).
    depth: usize,
    /// 1-based position in the raw input.
    number: usize,
}

fn scan<'a>(input: &'a str, options: &DecodeOptions) -> Result<Vec<Line<'a>>> {
    let indent_size = options.indent_size.max(1);
    let mut lines = Vec::new();
    for (idx, raw) in input.split('\n').enumerate() {
        let number = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let indent = raw.len() - raw.trim_start_matches(' ').len();
        let content = raw[indent..].trim_end();
        if options.strict && indent % indent_size != 0 {
            return Err(Error::indentation(
                format!("{indent} leading space(s) is not a multiple of the indent size {indent_size}"),
                number,
            ));
        }
        lines.push(Line {
            content,
            indent,
            depth: indent / indent_size,
            number,
        });
    }
    Ok(lines)
}

/// Forward-only iterator over scanned lines.
struct Cursor<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn peek_ahead(&self, k: usize) -> Option<Line<'a>> {
        self.lines.get(self.pos + k).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Parsed form of an array header line:
/// `key? '[' '#'? N delimsym? ']' fields? ':' inline?`.
#[derive(Debug)]
struct ArrayHeader<'a> {
    key: Option<String>,
    len: usize,
    delimiter: Delimiter,
    fields: Option<Vec<String>>,
    /// Inline values after the colon: 1-based start column and text.
    inline: Option<(usize, &'a str)>,
    line: usize,
}

/// Try to parse `content` as an array header. `base_col` is the 0-based
/// column of `content` within its raw line (its indent).
///
/// Returns `Ok(None)` when the line is not header-shaped at all (no bracket
/// before the first colon); malformed headers are hard errors.
fn parse_header<'a>(
    content: &'a str,
    line: usize,
    base_col: usize,
) -> Result<Option<ArrayHeader<'a>>> {
    let (key, bracket) = if content.starts_with('"') {
        let (key, close) = parse_quoted(content, line, base_col + 1)?;
        let after = close + 1;
        if content[after..].starts_with('[') {
            (Some(key), after)
        } else {
            return Ok(None);
        }
    } else {
        let Some(bracket) = content.find('[') else {
            return Ok(None);
        };
        if content[..bracket].contains(':') {
            return Ok(None);
        }
        let key_text = content[..bracket].trim();
        let key = (!key_text.is_empty()).then(|| key_text.to_string());
        (key, bracket)
    };

    let bytes = content.as_bytes();
    let mut pos = bracket + 1;
    if bytes.get(pos) == Some(&b'#') {
        pos += 1;
    }
    let digits_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    if pos == digits_start {
        return Err(Error::invalid_header("expected a length after '['", line));
    }
    let len: usize = content[digits_start..pos]
        .parse()
        .map_err(|_| Error::invalid_header("array length is out of range", line))?;
    let delimiter = match bytes.get(pos) {
        Some(b'\t') => {
            pos += 1;
            Delimiter::Tab
        }
        Some(b'|') => {
            pos += 1;
            Delimiter::Pipe
        }
        _ => Delimiter::Comma,
    };
    if bytes.get(pos) != Some(&b']') {
        return Err(Error::invalid_header("expected ']' to close the header", line));
    }
    pos += 1;

    let fields = if bytes.get(pos) == Some(&b'{') {
        let close = find_closing_brace(content, pos + 1)
            .ok_or_else(|| Error::invalid_header("unterminated field list", line))?;
        let names = parse_fields(
            &content[pos + 1..close],
            delimiter,
            line,
            base_col + pos + 1,
        )?;
        pos = close + 1;
        Some(names)
    } else {
        None
    };

    if bytes.get(pos) != Some(&b':') {
        return Err(Error::invalid_header("expected ':' after the header", line));
    }
    pos += 1;

    let rest = &content[pos..];
    let inline = if rest.trim().is_empty() {
        None
    } else {
        let skip = rest.len() - rest.trim_start().len();
        Some((base_col + pos + skip + 1, rest.trim()))
    };
    if fields.is_some() && inline.is_some() {
        return Err(Error::invalid_header(
            "tabular headers take their rows on the following lines",
            line,
        ));
    }

    Ok(Some(ArrayHeader {
        key,
        len,
        delimiter,
        fields,
        inline,
        line,
    }))
}

/// Position of the `}` closing a field list, skipping quoted field names.
fn find_closing_brace(s: &str, from: usize) -> Option<usize> {
    let mut in_quotes = false;
    let mut iter = s[from..].char_indices();
    while let Some((i, c)) = iter.next() {
        if in_quotes {
            match c {
                '\\' => {
                    iter.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == '}' {
            return Some(from + i);
        }
    }
    None
}

/// Parse the field names of a tabular header, separated by the array-scope
/// delimiter. Names follow key-quoting rules.
fn parse_fields(
    text: &str,
    delimiter: Delimiter,
    line: usize,
    base_col: usize,
) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for (offset, token) in split_delimited(text, delimiter.as_char()) {
        let trimmed = token.trim();
        if trimmed.starts_with('"') {
            let col = base_col + offset + 1;
            let (name, close) = parse_quoted(trimmed, line, col)?;
            if close + 1 != trimmed.len() {
                return Err(Error::parse(
                    "unexpected characters after quoted field name",
                    line,
                    col + close + 1,
                ));
            }
            names.push(name);
        } else if trimmed.is_empty() {
            return Err(Error::invalid_header("empty field name", line));
        } else {
            names.push(trimmed.to_string());
        }
    }
    Ok(names)
}

/// A line that introduces an object field.
enum KeyLine<'a> {
    /// `key[N]…:` — an array header carrying a key (or none at the root).
    Header(ArrayHeader<'a>),
    /// `key: rest` — `rest_col` is the 0-based column of `rest` in the raw line.
    Pair {
        key: String,
        rest: &'a str,
        rest_col: usize,
    },
}

/// Split a field line into its key and what follows. `base_col` is the
/// 0-based column of `content` within its raw line.
///
/// A bracket before the first colon commits the line to array-header parsing,
/// so malformed headers surface as [`Error::InvalidHeader`]; a line with
/// neither form is [`Error::MissingColon`].
fn split_key<'a>(content: &'a str, line: usize, base_col: usize) -> Result<KeyLine<'a>> {
    if content.starts_with('"') {
        let (key, close) = parse_quoted(content, line, base_col + 1)?;
        let after = close + 1;
        if content[after..].starts_with('[') {
            let header = parse_header(content, line, base_col)?
                .ok_or_else(|| Error::invalid_header("malformed array header", line))?;
            return Ok(KeyLine::Header(header));
        }
        if content[after..].starts_with(':') {
            return Ok(KeyLine::Pair {
                key,
                rest: &content[after + 1..],
                rest_col: base_col + after + 1,
            });
        }
        return Err(Error::MissingColon { line });
    }
    let colon = content.find(':');
    let bracket = content.find('[');
    match (bracket, colon) {
        (Some(b), c) if c.map_or(true, |c| b < c) => {
            let header = parse_header(content, line, base_col)?
                .ok_or_else(|| Error::invalid_header("malformed array header", line))?;
            Ok(KeyLine::Header(header))
        }
        (_, Some(c)) => Ok(KeyLine::Pair {
            key: content[..c].trim().to_string(),
            rest: &content[c + 1..],
            rest_col: base_col + c + 1,
        }),
        (_, None) => Err(Error::MissingColon { line }),
    }
}

/// Parse a primitive token. `col` is the 1-based column of the token start.
///
/// Unquoted `null`/`true`/`false` are the only non-string results; every
/// other token, numeric-looking or not, becomes a string. Number-like tokens
/// with leading zeros are rejected rather than silently accepted.
fn parse_scalar(token: &str, line: usize, col: usize) -> Result<Value> {
    let trimmed_start = token.trim_start();
    let col = col + (token.len() - trimmed_start.len());
    let s = trimmed_start.trim_end();
    if s.is_empty() {
        return Err(Error::parse("expected a value", line, col));
    }
    match s {
        "null" => Ok(Value::Null),
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ if s.starts_with('"') => {
            let (text, close) = parse_quoted(s, line, col)?;
            if close + 1 != s.len() {
                return Err(Error::parse(
                    "unexpected characters after closing quote",
                    line,
                    col + close + 1,
                ));
            }
            Ok(Value::String(text))
        }
        _ => {
            reject_leading_zero(s, line, col)?;
            Ok(Value::String(s.to_string()))
        }
    }
}

/// Number-like tokens such as `05` are malformed: the encoder quotes any
/// string that looks numeric, so a bare leading-zero form can only be a
/// mistake.
fn reject_leading_zero(s: &str, line: usize, col: usize) -> Result<()> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let bytes = digits.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit() {
        return Err(Error::parse(
            format!("number-like token '{s}' has leading zeros"),
            line,
            col,
        ));
    }
    Ok(())
}

/// Read a quoted string starting at `s[0] == '"'`. Returns the unescaped text
/// and the byte index of the closing quote. `col` is the 1-based column of
/// the opening quote.
fn parse_quoted(s: &str, line: usize, col: usize) -> Result<(String, usize)> {
    let mut out = String::new();
    let mut chars = s.char_indices();
    chars.next(); // opening quote
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((out, i)),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 't')) => out.push('\t'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, '"')) => out.push('"'),
                Some((j, other)) => {
                    return Err(Error::InvalidEscape {
                        sequence: other,
                        line,
                        column: col + j,
                    })
                }
                None => break,
            },
            _ => out.push(c),
        }
    }
    Err(Error::UnterminatedString { line, column: col })
}

/// Position of the first colon outside quoted text, if any.
fn find_unquoted_colon(s: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut iter = s.char_indices();
    while let Some((i, c)) = iter.next() {
        if in_quotes {
            match c {
                '\\' => {
                    iter.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == ':' {
            return Some(i);
        }
    }
    None
}

/// Split on `delim` outside quoted text. Escapes are consumed verbatim inside
/// quotes. Returns each token with its 0-based byte offset in `s`.
fn split_delimited(s: &str, delim: char) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut iter = s.char_indices();
    while let Some((i, c)) = iter.next() {
        if in_quotes {
            match c {
                '\\' => {
                    iter.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delim {
            parts.push((start, &s[start..i]));
            start = i + c.len_utf8();
        }
    }
    parts.push((start, &s[start..]));
    parts
}

/// True when splitting on some delimiter other than `declared` yields exactly
/// `want` tokens; used to tell a wrong-delimiter document apart from a plain
/// count mismatch.
fn splits_like_another_delimiter(text: &str, declared: Delimiter, want: usize) -> bool {
    [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe]
        .iter()
        .filter(|d| **d != declared)
        .any(|d| split_delimited(text, d.as_char()).len() == want)
}

fn is_list_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

struct Decoder<'a, 'o> {
    cursor: Cursor<'a>,
    options: &'o DecodeOptions,
}

impl<'a> Decoder<'a, '_> {
    fn document(&mut self) -> Result<Value> {
        let first = self
            .cursor
            .peek()
            .unwrap_or_else(|| unreachable!("decode_str rejects empty input"));

        // Root array: a keyless header on the first line.
        if let Ok(Some(header)) = parse_header(first.content, first.number, first.indent) {
            if header.key.is_none() {
                self.cursor.advance();
                let value = self.array_body(&header, first.depth, false)?;
                self.expect_exhausted()?;
                return Ok(value);
            }
        }

        // Root primitive: one line, no unquoted colon.
        if self.cursor.len() == 1 && find_unquoted_colon(first.content).is_none() {
            self.cursor.advance();
            return parse_scalar(first.content, first.number, first.indent + 1);
        }

        let map = self.object(first.depth)?;
        self.expect_exhausted()?;
        Ok(Value::Object(map))
    }

    fn expect_exhausted(&self) -> Result<()> {
        match self.cursor.peek() {
            Some(line) => Err(Error::structure(
                "unexpected content after the document root",
                line.number,
            )),
            None => Ok(()),
        }
    }

    /// Decode object fields at exactly `depth`, stopping at the first
    /// shallower line or the end of input.
    fn object(&mut self, depth: usize) -> Result<Map> {
        let mut map = Map::new();
        while let Some(line) = self.cursor.peek() {
            if line.depth < depth {
                break;
            }
            if line.depth > depth {
                if self.options.strict {
                    return Err(Error::structure("unexpected indent", line.number));
                }
                self.cursor.advance();
                continue;
            }
            let (key, value) = self.object_field(line)?;
            // Duplicate keys resolve last-wins.
            map.insert(key, value);
        }
        Ok(map)
    }

    fn object_field(&mut self, line: Line<'a>) -> Result<(String, Value)> {
        match split_key(line.content, line.number, line.indent)? {
            KeyLine::Header(header) => {
                let Some(key) = header.key.clone() else {
                    return Err(Error::parse(
                        "array header without a key inside an object",
                        line.number,
                        line.indent + 1,
                    ));
                };
                self.cursor.advance();
                let value = self.array_body(&header, line.depth, false)?;
                Ok((key, value))
            }
            KeyLine::Pair {
                key,
                rest,
                rest_col,
            } => {
                if rest.trim().is_empty() {
                    // `key:` introduces a nested object one level deeper, or
                    // an empty object when no such block follows.
                    let has_body =
                        matches!(self.cursor.peek_ahead(1), Some(next) if next.depth > line.depth);
                    self.cursor.advance();
                    let value = if has_body {
                        Value::Object(self.object(line.depth + 1)?)
                    } else {
                        Value::Object(Map::new())
                    };
                    Ok((key, value))
                } else {
                    self.cursor.advance();
                    let value = parse_scalar(rest, line.number, rest_col + 1)?;
                    Ok((key, value))
                }
            }
        }
    }

    /// Decode the body of an array whose header sits on a line at `depth`.
    /// Body lines live at `depth + 1`.
    ///
    /// With `stop_at_count`, row and item collection stops once the declared
    /// length is reached instead of consuming every deeper line. This is how
    /// a first-field array of a list-item object shares its body depth with
    /// the item's remaining fields.
    fn array_body(
        &mut self,
        header: &ArrayHeader<'a>,
        depth: usize,
        stop_at_count: bool,
    ) -> Result<Value> {
        if let Some(fields) = &header.fields {
            return self.tabular_body(header, fields, depth, stop_at_count);
        }
        if let Some((col, text)) = header.inline {
            return self.inline_values(header, text, col);
        }
        if header.len == 0 {
            return Ok(Value::Array(Vec::new()));
        }
        self.list_body(header, depth, stop_at_count)
    }

    fn inline_values(&self, header: &ArrayHeader<'a>, text: &str, col: usize) -> Result<Value> {
        let parts = split_delimited(text, header.delimiter.as_char());
        let mut items = Vec::with_capacity(parts.len());
        for (offset, token) in &parts {
            items.push(parse_scalar(token, header.line, col + offset)?);
        }
        if self.options.strict && items.len() != header.len {
            if items.len() == 1
                && header.len > 1
                && splits_like_another_delimiter(text, header.delimiter, header.len)
            {
                return Err(Error::DelimiterMismatch {
                    expected: header.delimiter.name(),
                    line: header.line,
                });
            }
            return Err(Error::CountMismatch {
                expected: header.len,
                actual: items.len(),
                context: "inline array",
                line: header.line,
            });
        }
        Ok(Value::Array(items))
    }

    fn tabular_body(
        &mut self,
        header: &ArrayHeader<'a>,
        fields: &[String],
        depth: usize,
        stop_at_count: bool,
    ) -> Result<Value> {
        let mut rows = Vec::new();
        while let Some(line) = self.cursor.peek() {
            if line.depth <= depth {
                break;
            }
            if line.depth != depth + 1 {
                if self.options.strict {
                    return Err(Error::structure(
                        "unexpected indent inside tabular array",
                        line.number,
                    ));
                }
                self.cursor.advance();
                continue;
            }
            if stop_at_count && rows.len() == header.len {
                break;
            }
            self.cursor.advance();
            rows.push(self.tabular_row(line, header, fields)?);
        }
        if self.options.strict && rows.len() != header.len {
            return Err(Error::CountMismatch {
                expected: header.len,
                actual: rows.len(),
                context: "tabular array",
                line: header.line,
            });
        }
        Ok(Value::Array(rows))
    }

    fn tabular_row(&self, line: Line<'a>, header: &ArrayHeader<'a>, fields: &[String]) -> Result<Value> {
        let parts = split_delimited(line.content, header.delimiter.as_char());
        if self.options.strict && parts.len() != fields.len() {
            if parts.len() == 1
                && fields.len() > 1
                && splits_like_another_delimiter(line.content, header.delimiter, fields.len())
            {
                return Err(Error::DelimiterMismatch {
                    expected: header.delimiter.name(),
                    line: line.number,
                });
            }
            return Err(Error::validation(
                format!(
                    "row has {} value(s) but the header declares {} field(s)",
                    parts.len(),
                    fields.len()
                ),
                line.number,
            ));
        }
        let mut row = Map::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            // Non-strict rows may be short (missing cells read as null) or
            // long (extra cells are dropped).
            let value = match parts.get(i) {
                Some((offset, token)) => {
                    parse_scalar(token, line.number, line.indent + offset + 1)?
                }
                None => Value::Null,
            };
            row.insert(field.clone(), value);
        }
        Ok(Value::Object(row))
    }

    fn list_body(
        &mut self,
        header: &ArrayHeader<'a>,
        depth: usize,
        stop_at_count: bool,
    ) -> Result<Value> {
        let mut items = Vec::new();
        while let Some(line) = self.cursor.peek() {
            if line.depth <= depth {
                break;
            }
            if line.depth != depth + 1 {
                if self.options.strict {
                    return Err(Error::structure(
                        "unexpected indent inside list array",
                        line.number,
                    ));
                }
                self.cursor.advance();
                continue;
            }
            if !is_list_item(line.content) {
                break;
            }
            if stop_at_count && items.len() == header.len {
                break;
            }
            self.cursor.advance();
            let item = if line.content == "-" {
                self.bare_item(line.depth)?
            } else {
                self.list_item(&line.content[2..], line)?
            };
            items.push(item);
        }
        if self.options.strict && items.len() != header.len {
            return Err(Error::CountMismatch {
                expected: header.len,
                actual: items.len(),
                context: "list array",
                line: header.line,
            });
        }
        Ok(Value::Array(items))
    }

    /// A bare `-` introduces a complex array whose own header starts one
    /// level deeper; with no header below it, it is an empty object (the
    /// only value the encoder writes as a hyphen with no content).
    fn bare_item(&mut self, item_depth: usize) -> Result<Value> {
        match self.cursor.peek() {
            Some(next) if next.depth == item_depth + 1 => {
                if let Some(header) = parse_header(next.content, next.number, next.indent)? {
                    if header.key.is_none() {
                        self.cursor.advance();
                        return self.array_body(&header, next.depth, false);
                    }
                }
                Err(Error::invalid_header(
                    "expected an array header under a bare list item",
                    next.number,
                ))
            }
            _ => Ok(Value::Object(Map::new())),
        }
    }

    /// Parse the content after `- `. An array header without a key is a
    /// nested array; a line with an unquoted colon is an object whose first
    /// field rides the hyphen line; anything else is a primitive.
    fn list_item(&mut self, content: &'a str, line: Line<'a>) -> Result<Value> {
        match split_key(content, line.number, line.indent + 2) {
            Ok(KeyLine::Header(header)) if header.key.is_none() => {
                self.array_body(&header, line.depth, false)
            }
            Ok(first) => self.item_object(first, line),
            Err(Error::MissingColon { .. }) => parse_scalar(content, line.number, line.indent + 3),
            Err(other) => Err(other),
        }
    }

    /// Reassemble an object list item. Sibling fields sit one level below the
    /// item line; a nested-object first field keeps its body a level below
    /// that, and a first-field array shares the sibling level, consuming
    /// exactly its declared count.
    fn item_object(&mut self, first: KeyLine<'a>, line: Line<'a>) -> Result<Value> {
        let item_depth = line.depth;
        let mut map = Map::new();
        match first {
            KeyLine::Header(header) => {
                let Some(key) = header.key.clone() else {
                    unreachable!("keyless headers are dispatched to array decoding")
                };
                let value = self.array_body(&header, item_depth, true)?;
                map.insert(key, value);
            }
            KeyLine::Pair {
                key,
                rest,
                rest_col,
            } => {
                if rest.trim().is_empty() {
                    let value = match self.cursor.peek() {
                        Some(next) if next.depth >= item_depth + 2 => {
                            Value::Object(self.object(item_depth + 2)?)
                        }
                        _ => Value::Object(Map::new()),
                    };
                    map.insert(key, value);
                } else {
                    map.insert(key, parse_scalar(rest, line.number, rest_col + 1)?);
                }
            }
        }
        for (key, value) in self.object(item_depth + 1)? {
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}
