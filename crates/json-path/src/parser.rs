//! JSONPath parser (RFC 9535 subset).
//!
//! Besides the RFC grammar the parser accepts the dot-bracket form
//! `$.items[*].['a','b']`, which many JSONPath dialects allow and which is
//! handy for selecting several sibling fields in one expression.

use crate::types::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected root identifier '$' at start")]
    ExpectedRoot,
    #[error("Unexpected character '{0}' at offset {1}")]
    UnexpectedChar(char, usize),
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Invalid escape sequence")]
    InvalidEscape,
    #[error("Invalid number")]
    InvalidNumber,
    #[error("Unclosed string")]
    UnclosedString,
    #[error("Invalid selector")]
    InvalidSelector,
    #[error("Filter expressions are not supported")]
    UnsupportedFilter,
}

/// JSONPath parser.
pub struct JsonPathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> JsonPathParser<'a> {
    /// Parse a JSONPath expression.
    pub fn parse(input: &'a str) -> Result<JSONPath, ParseError> {
        let mut parser = Self { input, pos: 0 };
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<JSONPath, ParseError> {
        self.skip_whitespace();
        if self.peek() != Some('$') {
            return Err(ParseError::ExpectedRoot);
        }
        self.advance();

        let mut segments = Vec::new();

        loop {
            match self.peek() {
                Some('.') => {
                    self.advance();
                    if self.peek() == Some('.') {
                        self.advance();
                        let selectors = self.parse_descendant_selectors()?;
                        segments.push(PathSegment::new(selectors, true));
                    } else {
                        let selectors = self.parse_child_selectors()?;
                        segments.push(PathSegment::new(selectors, false));
                    }
                }
                Some('[') => {
                    let selectors = self.parse_bracket_selectors()?;
                    segments.push(PathSegment::new(selectors, false));
                }
                Some(c) if c.is_whitespace() => {
                    self.skip_whitespace();
                    if let Some(c) = self.peek() {
                        return Err(self.unexpected(c));
                    }
                }
                Some(c) => return Err(self.unexpected(c)),
                None => break,
            }
        }

        Ok(JSONPath::new(segments))
    }

    /// Selectors following a single `.`: `name`, `*` or `[...]`.
    fn parse_child_selectors(&mut self) -> Result<Vec<Selector>, ParseError> {
        match self.peek() {
            Some('*') => {
                self.advance();
                Ok(vec![Selector::Wildcard])
            }
            Some('[') => self.parse_bracket_selectors(),
            _ => Ok(vec![Selector::Name(self.parse_identifier()?)]),
        }
    }

    /// Selectors following `..`: `name`, `*` or `[...]`.
    fn parse_descendant_selectors(&mut self) -> Result<Vec<Selector>, ParseError> {
        // Same shapes as a child segment; kept separate so `...` is rejected.
        match self.peek() {
            Some('.') | None => Err(ParseError::UnexpectedEnd),
            _ => self.parse_child_selectors(),
        }
    }

    fn parse_bracket_selectors(&mut self) -> Result<Vec<Selector>, ParseError> {
        self.expect('[')?;
        let mut selectors = Vec::new();

        loop {
            self.skip_whitespace();
            let selector = self.parse_bracket_selector()?;
            selectors.push(selector);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.advance(),
                Some(']') => {
                    self.advance();
                    break;
                }
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }

        Ok(selectors)
    }

    fn parse_bracket_selector(&mut self) -> Result<Selector, ParseError> {
        match self.peek() {
            Some('\'') | Some('"') => Ok(Selector::Name(self.parse_string()?)),
            Some('*') => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            Some(':') | Some('-') | Some('0'..='9') => self.parse_index_or_slice(),
            Some('?') => Err(ParseError::UnsupportedFilter),
            None => Err(ParseError::UnexpectedEnd),
            _ => Err(ParseError::InvalidSelector),
        }
    }

    fn parse_index_or_slice(&mut self) -> Result<Selector, ParseError> {
        let start = self.parse_optional_number()?;
        self.skip_whitespace();

        if self.peek() != Some(':') {
            return start.map(Selector::Index).ok_or(ParseError::InvalidSelector);
        }
        self.advance();
        let end = self.parse_optional_number()?;
        self.skip_whitespace();

        let step = if self.peek() == Some(':') {
            self.advance();
            self.parse_optional_number()?
        } else {
            None
        };

        Ok(Selector::Slice { start, end, step })
    }

    fn parse_optional_number(&mut self) -> Result<Option<isize>, ParseError> {
        self.skip_whitespace();
        if matches!(self.peek(), Some('0'..='9') | Some('-')) {
            Ok(Some(self.parse_number()?))
        } else {
            Ok(None)
        }
    }

    fn parse_number(&mut self) -> Result<isize, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        self.input[start..self.pos]
            .parse::<isize>()
            .map_err(|_| ParseError::InvalidNumber)
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(ParseError::UnexpectedEnd),
            };
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let quote = self.peek().ok_or(ParseError::UnexpectedEnd)?;
        self.advance();

        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('b') => result.push('\u{0008}'),
                        Some('f') => result.push('\u{000C}'),
                        Some('/') => result.push('/'),
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        Some('u') => {
                            self.advance();
                            result.push(self.parse_unicode_escape()?);
                            continue;
                        }
                        _ => return Err(ParseError::InvalidEscape),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }

        Ok(result)
    }

    /// Four hex digits after `\u`, with surrogate pairs joined.
    fn parse_unicode_escape(&mut self) -> Result<char, ParseError> {
        let high = self.parse_hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or(ParseError::InvalidEscape);
        }
        if !self.peek_str("\\u") {
            return Err(ParseError::InvalidEscape);
        }
        self.advance_by(2);
        let low = self.parse_hex4()?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(ParseError::InvalidEscape);
        }
        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
            .ok_or(ParseError::InvalidEscape)
    }

    fn parse_hex4(&mut self) -> Result<u32, ParseError> {
        let end = self.pos + 4;
        let digits = self.input.get(self.pos..end).ok_or(ParseError::InvalidEscape)?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidEscape)?;
        self.pos = end;
        Ok(code)
    }

    fn unexpected(&self, c: char) -> ParseError {
        ParseError::UnexpectedChar(c, self.pos)
    }

    fn peek_str(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}
