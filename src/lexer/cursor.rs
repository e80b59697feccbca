//! `Cursor`: position tracking and typed atoms over DBC source text.

use crate::error::ParseError;

/// A saved cursor position, cheap to copy for `optional`/`one_of` backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

/// Walks `text` left to right, tracking `(offset, line, column)`.
///
/// Line and column are 1-based; a newline bumps `line` and resets `column`
/// to 1. No state survives past a single `parse` call — a fresh `Cursor` is
/// created for each input.
pub struct Cursor<'a> {
    pub(crate) text: &'a str,
    pub(crate) bytes: &'a [u8],
    pub(crate) offset: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
}

const WHITESPACE: [u8; 6] = [b' ', b'\x0c', b'\x0b', b'\r', b'\t', b'\n'];

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Cursor {
            text,
            bytes: text.as_bytes(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, pos: Position) {
        self.offset = pos.offset;
        self.line = pos.line;
        self.column = pos.column;
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    /// Builds a [`ParseError`] at the cursor's current position.
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.line, self.column, message)
    }

    fn advance_one(&mut self) {
        let c = self.bytes[self.offset];
        self.offset += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Skips any run of whitespace (space, form-feed, vertical tab, CR, tab, LF).
    pub fn eat_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if WHITESPACE.contains(&c) {
                self.advance_one();
            } else {
                break;
            }
        }
    }

    /// Skips any run of bytes from `set`, e.g. the `[ ,]*` separator between
    /// list elements.
    pub(crate) fn eat_set(&mut self, set: &[u8]) {
        while let Some(c) = self.peek() {
            if set.contains(&c) {
                self.advance_one();
            } else {
                break;
            }
        }
    }

    /// Consumes a single literal character.
    pub fn charmatch(&mut self, c: char) -> Result<(), ParseError> {
        match self.peek() {
            None => Err(self.error(format!(
                "reached end while looking for \"{c}\""
            ))),
            Some(b) if b == c as u8 => {
                self.advance_one();
                Ok(())
            }
            Some(b) => Err(self.error(format!(
                "expected \"{c}\", found \"{}\"",
                b as char
            ))),
        }
    }

    /// Consumes a literal string (keyword), byte-for-byte, no boundary check.
    pub fn strmatch(&mut self, s: &str) -> Result<(), ParseError> {
        if self.rest().as_bytes().starts_with(s.as_bytes()) {
            for _ in 0..s.len() {
                self.advance_one();
            }
            Ok(())
        } else {
            let found_len = s.len().min(self.rest().len());
            Err(self.error(format!(
                "expected \"{s}\", found \"{}\"",
                &self.rest()[..found_len]
            )))
        }
    }

    /// Greedy run of decimal digits; fails on an empty run.
    pub fn uint(&mut self) -> Result<u64, ParseError> {
        let start = self.offset;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance_one();
        }
        if self.offset == start {
            return Err(self.error("expected unsigned integer"));
        }
        self.text[start..self.offset]
            .parse()
            .map_err(|_| self.error("unsigned integer literal out of range"))
    }

    /// Optional sign then digits.
    pub fn sint(&mut self) -> Result<i64, ParseError> {
        let start = self.offset;
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.advance_one();
        }
        let digits_start = self.offset;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance_one();
        }
        if self.offset == digits_start {
            self.restore(Position {
                offset: start,
                line: self.line,
                column: self.column - (self.offset - start) as u32,
            });
            return Err(self.error("expected a signed integer"));
        }
        self.text[start..self.offset]
            .parse()
            .map_err(|_| self.error("signed integer literal out of range"))
    }

    /// Matches `[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?`, consumed as f64.
    ///
    /// The trailing `[0-9]+` is mandatory, so a dot with nothing after it
    /// (e.g. `"12."`) does not consume the dot: only the digits before it
    /// match, mirroring how a backtracking regex engine resolves this
    /// pattern.
    pub fn double(&mut self) -> Result<f64, ParseError> {
        let start = self.offset;
        let mut n = start;
        if matches!(self.bytes.get(n), Some(b'+') | Some(b'-')) {
            n += 1;
        }
        let sign_end = n;
        while matches!(self.bytes.get(n), Some(b'0'..=b'9')) {
            n += 1;
        }
        let int_digits_end = n;
        let mut end = int_digits_end;
        if self.bytes.get(n) == Some(&b'.') {
            let mut m = n + 1;
            while matches!(self.bytes.get(m), Some(b'0'..=b'9')) {
                m += 1;
            }
            if m > n + 1 {
                end = m; // dot had at least one digit after it: include it
            }
            // otherwise the dot is left unconsumed; `end` stays at int_digits_end
        }
        if end == sign_end {
            return Err(self.error("expected a floating point number"));
        }
        if let Some(m) = self.exponent_end(end) {
            end = m;
        }
        let text = &self.text[start..end];
        let val: f64 = text
            .parse()
            .map_err(|_| self.error("expected a floating point number"))?;
        for _ in 0..(end - start) {
            self.advance_one();
        }
        Ok(val)
    }

    /// Returns the end offset of an `[eE][-+]?[0-9]+` exponent starting at
    /// `from`, or `None` if there isn't a well-formed one there.
    fn exponent_end(&self, from: usize) -> Option<usize> {
        if !matches!(self.bytes.get(from), Some(b'e') | Some(b'E')) {
            return None;
        }
        let mut m = from + 1;
        if matches!(self.bytes.get(m), Some(b'+') | Some(b'-')) {
            m += 1;
        }
        let digits_start = m;
        while matches!(self.bytes.get(m), Some(b'0'..=b'9')) {
            m += 1;
        }
        if m > digits_start { Some(m) } else { None }
    }

    /// Double-quoted string. No escape sequences: a backslash is a parse
    /// error. Newlines inside strings are permitted and bump the line count.
    pub fn string(&mut self) -> Result<String, ParseError> {
        if self.peek() != Some(b'"') {
            let found = self.peek().map(|b| b as char).unwrap_or('\0');
            return Err(self.error(format!("expected '\"' but found '{found}'")));
        }
        self.advance_one();
        let mut s = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("reached end while parsing string")),
                Some(b'\\') => return Err(self.error("encountered backslash in string")),
                Some(b'"') => {
                    self.advance_one();
                    break;
                }
                Some(_) => {
                    let ch_start = self.offset;
                    let ch = self.rest().chars().next().unwrap();
                    let ch_len = ch.len_utf8();
                    for _ in 0..ch_len {
                        self.advance_one();
                    }
                    s.push_str(&self.text[ch_start..ch_start + ch_len]);
                }
            }
        }
        Ok(s)
    }

    fn idchar(c: u8) -> bool {
        c.is_ascii_alphanumeric() || c == b'_'
    }

    /// Run of `[A-Za-z0-9_]`, rejected if it starts with a digit or is a
    /// reserved word.
    pub fn identifier(&mut self, reserved: &[&str]) -> Result<String, ParseError> {
        let start = self.offset;
        while matches!(self.peek(), Some(c) if Self::idchar(c)) {
            self.advance_one();
        }
        let word = &self.text[start..self.offset];
        if word.is_empty() {
            return Err(self.error("expected identifier, found nothing"));
        }
        if word.as_bytes()[0].is_ascii_digit() {
            let w = word.to_string();
            self.restore(Position {
                offset: start,
                line: self.line,
                column: self.column - (self.offset - start) as u32,
            });
            return Err(self.error(format!("expected identifier, but found \"{w}\"")));
        }
        if reserved.contains(&word) {
            let w = word.to_string();
            self.restore(Position {
                offset: start,
                line: self.line,
                column: self.column - (self.offset - start) as u32,
            });
            return Err(self.error(format!("identifier equals reserved word \"{w}\"")));
        }
        Ok(word.to_string())
    }

    /// `identifier` followed by whitespace skip, the common pairing used by
    /// list-producing rules.
    pub fn identifier_ws(&mut self, reserved: &[&str]) -> Result<String, ParseError> {
        let id = self.identifier(reserved)?;
        self.eat_whitespace();
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_fails_on_empty_run() {
        let mut c = Cursor::new("abc");
        assert!(c.uint().is_err());
    }

    #[test]
    fn uint_parses_digit_run() {
        let mut c = Cursor::new("1234rest");
        assert_eq!(c.uint().unwrap(), 1234);
        assert_eq!(c.rest(), "rest");
    }

    #[test]
    fn sint_accepts_optional_sign() {
        let mut c = Cursor::new("-17");
        assert_eq!(c.sint().unwrap(), -17);
        let mut c = Cursor::new("+17");
        assert_eq!(c.sint().unwrap(), 17);
        let mut c = Cursor::new("17");
        assert_eq!(c.sint().unwrap(), 17);
    }

    #[test]
    fn double_matches_plain_scientific_and_signed_forms() {
        let mut c = Cursor::new("3.14");
        assert_eq!(c.double().unwrap(), 3.14);
        let mut c = Cursor::new("-2.5e3 rest");
        assert_eq!(c.double().unwrap(), -2500.0);
        assert_eq!(c.rest(), " rest");
        let mut c = Cursor::new("500000");
        assert_eq!(c.double().unwrap(), 500000.0);
    }

    #[test]
    fn double_does_not_consume_a_dot_with_no_trailing_digit() {
        let mut c = Cursor::new("12.");
        assert_eq!(c.double().unwrap(), 12.0);
        assert_eq!(c.rest(), ".");
    }

    #[test]
    fn string_rejects_backslash() {
        let mut c = Cursor::new("\"a\\b\"");
        let err = c.string().unwrap_err();
        assert!(err.message.contains("backslash"));
    }

    #[test]
    fn string_allows_embedded_newline_and_bumps_line() {
        let mut c = Cursor::new("\"a\nb\" rest");
        let s = c.string().unwrap();
        assert_eq!(s, "a\nb");
        assert_eq!(c.position().line, 2);
    }

    #[test]
    fn identifier_rejects_digit_start_and_reserved_words() {
        let mut c = Cursor::new("1abc");
        assert!(c.identifier(&[]).is_err());
        let mut c = Cursor::new("BO_ rest");
        assert!(c.identifier(&["BO_"]).is_err());
        let mut c = Cursor::new("N1 rest");
        assert_eq!(c.identifier(&["BO_"]).unwrap(), "N1");
    }

    #[test]
    fn error_position_points_past_consumed_whitespace() {
        let mut c = Cursor::new("  \n  x");
        c.eat_whitespace();
        let err = c.uint().unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));
    }
}
