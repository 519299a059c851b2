//! A small, safe reader for the Python literal expressions found in legacy documents.
//!
//! Several 1.0.2 fields (port-spec defaults and labels, the vistrail-variable annotation)
//! store values as the `repr` of a Python object. This module reads that subset of Python
//! syntax into a [`Literal`] tree without evaluating anything: strings, numbers,
//! `True`/`False`/`None`, lists, tuples and dicts.

use crate::error::LiteralError;
use itertools::Itertools;
use std::fmt;

/// A decoded Python literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    /// An integer outside the `i64` range, kept as its decimal digits.
    BigInt(String),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Short name of the literal's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::None => "None",
            Literal::Bool(_) => "bool",
            Literal::Int(_) | Literal::BigInt(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
            Literal::Dict(_) => "dict",
        }
    }

    /// Treats the literal as a sequence.
    ///
    /// Lists and tuples yield their elements and dicts yield their keys. A string is a
    /// single element, not a sequence of characters, and any other scalar is wrapped
    /// as a one-element sequence.
    pub fn into_sequence(self) -> Vec<Literal> {
        match self {
            Literal::List(items) | Literal::Tuple(items) => items,
            Literal::Dict(entries) => entries.into_iter().map(|(k, _)| k).collect(),
            other => vec![other],
        }
    }

    /// The text Python's `str()` would produce for this value.
    pub fn to_text(&self) -> String {
        match self {
            Literal::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Like [`Literal::to_text`], but `None` becomes an empty string. This is how a
    /// missing value is written into a string field of the new schema.
    pub fn to_field_text(&self) -> String {
        match self {
            Literal::None => String::new(),
            other => other.to_text(),
        }
    }
}

/// Formats the literal the way Python's `repr()` does.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => write!(f, "None"),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::BigInt(digits) => write!(f, "{}", digits),
            Literal::Float(n) => write!(f, "{}", float_repr(*n)),
            Literal::Str(s) => write!(f, "{}", quote(s)),
            Literal::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            Literal::Tuple(items) if items.len() == 1 => write!(f, "({},)", items[0]),
            Literal::Tuple(items) => write!(f, "({})", items.iter().join(", ")),
            Literal::Dict(entries) => write!(
                f,
                "{{{}}}",
                entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .join(", ")
            ),
        }
    }
}

/// Shortest round-trip digits, switching to exponent form outside `1e-4 <= |n| < 1e16`.
fn float_repr(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if (-4..16).contains(&exponent) {
        let positional = format!("{}", n);
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

/// Parses a complete literal expression. Surrounding whitespace is ignored.
pub fn parse_literal(text: &str) -> Result<Literal, LiteralError> {
    let mut parser = Parser::new(text);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(LiteralError::TrailingInput(parser.offset()));
    }
    Ok(value)
}

/// Deepest container nesting accepted before parsing fails.
pub const MAX_DEPTH: usize = 256;

struct Parser {
    chars: Vec<(usize, char)>,
    len: usize,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.char_indices().collect(),
            len: text.len(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    /// Byte offset of the char at `pos`, or the input length past the end.
    fn offset_of(&self, pos: usize) -> usize {
        self.chars.get(pos).map_or(self.len, |(offset, _)| *offset)
    }

    fn offset(&self) -> usize {
        self.offset_of(self.pos)
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().map(|(_, c)| c).collect()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consumes an opening bracket, failing once nesting exceeds [`MAX_DEPTH`].
    fn descend(&mut self) -> Result<(), LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep {
                limit: MAX_DEPTH,
                offset: self.offset(),
            });
        }
        self.depth += 1;
        self.pos += 1;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        let c = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        let value = match c {
            '[' => {
                self.descend()?;
                let (items, _) = self.parse_items(']')?;
                Literal::List(items)
            }
            '(' => {
                self.descend()?;
                let (mut items, trailing_comma) = self.parse_items(')')?;
                // `(x)` is just a parenthesized value; `(x,)` is a 1-tuple.
                if items.len() == 1 && !trailing_comma {
                    items.remove(0)
                } else {
                    Literal::Tuple(items)
                }
            }
            '{' => {
                self.descend()?;
                self.parse_dict()?
            }
            '\'' | '"' => return self.parse_string(false),
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                return self.parse_number();
            }
            c if c.is_alphabetic() || c == '_' => return self.parse_name(),
            found => {
                return Err(LiteralError::UnexpectedChar {
                    found,
                    offset: self.offset(),
                });
            }
        };
        self.depth -= 1;
        Ok(value)
    }

    /// Parses comma-separated values up to `close`. Returns whether the last value was
    /// followed by a comma.
    fn parse_items(&mut self, close: char) -> Result<(Vec<Literal>, bool), LiteralError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok((items, trailing_comma));
                }
                Some(_) => {}
            }
            items.push(self.parse_value()?);
            trailing_comma = false;
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    trailing_comma = true;
                }
                Some(c) if c == close => {}
                Some(c) => {
                    return Err(LiteralError::UnexpectedToken {
                        expected: "',' or closing bracket",
                        found: format!("'{}'", c),
                        offset: self.offset(),
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn parse_dict(&mut self) -> Result<Literal, LiteralError> {
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some('}') => {
                    self.pos += 1;
                    return Ok(Literal::Dict(entries));
                }
                Some(_) => {}
            }
            let key = self.parse_value()?;
            self.skip_whitespace();
            match self.peek() {
                Some(':') => self.pos += 1,
                Some(c) => {
                    return Err(LiteralError::UnexpectedToken {
                        expected: "':'",
                        found: format!("'{}'", c),
                        offset: self.offset(),
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
            let value = self.parse_value()?;
            entries.push((key, value));
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {}
                Some(c) => {
                    return Err(LiteralError::UnexpectedToken {
                        expected: "',' or '}'",
                        found: format!("'{}'", c),
                        offset: self.offset(),
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn parse_name(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let name = self.text(start, self.pos);

        // String prefixes such as u'...' or r"..."
        if matches!(self.peek(), Some('\'') | Some('"')) {
            let lower = name.to_ascii_lowercase();
            if matches!(lower.as_str(), "u" | "r" | "b" | "ur" | "br" | "rb") {
                return self.parse_string(lower.contains('r'));
            }
        }

        let literal = match name.as_str() {
            "True" => Some(Literal::Bool(true)),
            "False" => Some(Literal::Bool(false)),
            "None" => Some(Literal::None),
            _ => None,
        };
        literal.ok_or_else(|| LiteralError::UnknownName {
            name,
            offset: self.offset_of(start),
        })
    }

    fn parse_number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => self.pos += 1,
                '.' => {
                    is_float = true;
                    self.pos += 1;
                }
                'e' | 'E' => {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.peek(), Some('-') | Some('+')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        let text: String = self
            .text(start, self.pos)
            .chars()
            .filter(|c| *c != '_')
            .collect();

        // Python 2 long suffix, e.g. `5L`
        if !is_float && matches!(self.peek(), Some('L') | Some('l')) {
            self.pos += 1;
        }

        let invalid = || LiteralError::InvalidNumber {
            text: text.clone(),
            offset: self.offset_of(start),
        };
        if is_float {
            return text.parse::<f64>().map(Literal::Float).map_err(|_| invalid());
        }
        match text.parse::<i64>() {
            Ok(n) => Ok(Literal::Int(n)),
            Err(_) => {
                // Python 2 longs have no upper bound.
                let digits = text.strip_prefix('+').unwrap_or(&text);
                let magnitude = digits.strip_prefix('-').unwrap_or(digits);
                if !magnitude.is_empty() && magnitude.bytes().all(|b| b.is_ascii_digit()) {
                    Ok(Literal::BigInt(digits.to_string()))
                } else {
                    Err(invalid())
                }
            }
        }
    }

    fn parse_string(&mut self, raw: bool) -> Result<Literal, LiteralError> {
        let start = self.offset();
        let delim = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        self.pos += 1;
        let mut out = String::new();
        loop {
            let c = self
                .peek()
                .ok_or(LiteralError::UnterminatedString(start))?;
            self.pos += 1;
            if c == delim {
                return Ok(Literal::Str(out));
            }
            if c != '\\' {
                out.push(c);
                continue;
            }

            let escape_offset = self.offset_of(self.pos - 1);
            let next = self
                .peek()
                .ok_or(LiteralError::UnterminatedString(start))?;
            self.pos += 1;
            if raw {
                out.push('\\');
                out.push(next);
                continue;
            }
            match next {
                '\\' => out.push('\\'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                'a' => out.push('\u{7}'),
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                'v' => out.push('\u{b}'),
                '\n' => {}
                'x' => out.push(self.parse_code_point(2, 'x', escape_offset)?),
                'u' => out.push(self.parse_code_point(4, 'u', escape_offset)?),
                'U' => out.push(self.parse_code_point(8, 'U', escape_offset)?),
                other => {
                    // Unknown escapes are kept verbatim.
                    out.push('\\');
                    out.push(other);
                }
            }
        }
    }

    fn parse_code_point(
        &mut self,
        digits: usize,
        marker: char,
        offset: usize,
    ) -> Result<char, LiteralError> {
        let end = (self.pos + digits).min(self.chars.len());
        let hex = self.text(self.pos, end);
        let invalid = || LiteralError::InvalidEscape {
            sequence: format!("{}{}", marker, hex),
            offset,
        };
        if hex.len() != digits {
            return Err(invalid());
        }
        let code = u32::from_str_radix(&hex, 16).map_err(|_| invalid())?;
        let c = char::from_u32(code).ok_or_else(invalid)?;
        self.pos = end;
        Ok(c)
    }
}
