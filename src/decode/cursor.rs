use memchr::memchr_iter;

use crate::error::Location;

/// What the byte under the cursor can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    End,
    OpenArray,
    CloseArray,
    OpenObject,
    CloseObject,
    Comma,
    Colon,
    Quote(u8),
    NumberStart,
    LiteralStart,
    Other,
}

pub struct Cursor<'s> {
    input: &'s str,
    position: usize,
    line: usize,
    line_start: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(input: &'s str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            line_start: 0,
        }
    }

    pub fn current(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    pub fn peek_next(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position + 1).copied()
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn advance(&mut self) {
        if let Some(byte) = self.current() {
            self.position += 1;
            if byte == b'\n' {
                self.line += 1;
                self.line_start = self.position;
            }
        }
    }

    /// Moves forward to `offset`, counting the newlines skipped over.
    pub fn advance_to(&mut self, offset: usize) {
        let offset = offset.min(self.input.len());
        if offset <= self.position {
            return;
        }
        let skipped = &self.input.as_bytes()[self.position..offset];
        for idx in memchr_iter(b'\n', skipped) {
            self.line += 1;
            self.line_start = self.position + idx + 1;
        }
        self.position = offset;
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(byte) = self.current() {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => self.advance(),
                _ => break,
            }
        }
    }

    pub fn classify(&self) -> CharClass {
        match self.current() {
            None => CharClass::End,
            Some(b'[') => CharClass::OpenArray,
            Some(b']') => CharClass::CloseArray,
            Some(b'{') => CharClass::OpenObject,
            Some(b'}') => CharClass::CloseObject,
            Some(b',') => CharClass::Comma,
            Some(b':') => CharClass::Colon,
            Some(quote @ (b'"' | b'\'')) => CharClass::Quote(quote),
            Some(b'+' | b'-' | b'0'..=b'9') => CharClass::NumberStart,
            Some(b't' | b'f' | b'n') => CharClass::LiteralStart,
            Some(_) => CharClass::Other,
        }
    }

    /// Character starting at the cursor, decoded for diagnostics.
    pub fn current_char(&self) -> Option<char> {
        self.input.get(self.position..)?.chars().next()
    }

    pub fn offset(&self) -> usize {
        self.position
    }

    pub fn location(&self) -> Location {
        Location {
            offset: self.position,
            line: self.line,
            column: self.position - self.line_start + 1,
        }
    }

    pub fn remaining(&self) -> &'s [u8] {
        &self.input.as_bytes()[self.position..]
    }

    /// Source text between two offsets previously reported by the cursor.
    /// Both offsets must sit on character boundaries.
    pub fn slice(&self, start: usize, end: usize) -> &'s str {
        debug_assert!(
            self.input.is_char_boundary(start) && self.input.is_char_boundary(end),
            "slice {start}..{end} splits a character"
        );
        self.input.get(start..end).unwrap_or("")
    }
}
