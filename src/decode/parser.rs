use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::arena::Arena;
use crate::error::{Location, SyntaxError};
use crate::num::number::lex_number;
use crate::text::string::lex_string;
use crate::types::{Array, Object, Pair, Value};
use crate::{Error, ParseOptions, Result};

use super::cursor::{CharClass, Cursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    ValueOrClose,
    Value,
    CommaOrClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    KeyOrClose,
    Key,
    Colon,
    Value,
    CommaOrClose,
}

/// An open container. Its elements live in the parser's scratch stacks
/// from `start` upwards until the container closes.
#[derive(Debug)]
enum Frame<'a> {
    Array {
        state: ArrayState,
        start: usize,
    },
    Object {
        state: ObjectState,
        start: usize,
        pending_key: Option<&'a str>,
    },
}

impl Frame<'_> {
    fn open_char(&self) -> char {
        match self {
            Frame::Array { .. } => '[',
            Frame::Object { .. } => '{',
        }
    }
}

/// Parses `input` into `arena`. Empty or whitespace-only input is
/// [`Error::ContentEmpty`].
pub fn parse_into<'a>(arena: &'a Arena, input: &str, options: &ParseOptions) -> Result<Value<'a>> {
    let mut parser = GrammarParser::new(arena, input, options);
    parser.parse_document()
}

struct GrammarParser<'a, 's> {
    arena: &'a Arena,
    cursor: Cursor<'s>,
    strict: bool,
    max_depth: Option<usize>,
    stack: SmallVec<[Frame<'a>; 16]>,
    values: Vec<Value<'a>>,
    pairs: Vec<Pair<'a>>,
    root: Option<Value<'a>>,
}

impl<'a, 's> GrammarParser<'a, 's> {
    fn new(arena: &'a Arena, input: &'s str, options: &ParseOptions) -> Self {
        Self {
            arena,
            cursor: Cursor::new(input),
            strict: options.strict,
            max_depth: options.max_depth,
            stack: SmallVec::new(),
            values: Vec::new(),
            pairs: Vec::new(),
            root: None,
        }
    }

    fn parse_document(&mut self) -> Result<Value<'a>> {
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.classify() {
                CharClass::End => break,
                CharClass::OpenArray => self.open_array()?,
                CharClass::CloseArray => self.close_array()?,
                CharClass::OpenObject => self.open_object()?,
                CharClass::CloseObject => self.close_object()?,
                CharClass::Comma => self.delimiter()?,
                CharClass::Colon => self.colon()?,
                CharClass::Quote(_) => self.string()?,
                CharClass::NumberStart => {
                    self.ensure_value_slot()?;
                    let value = lex_number(&mut self.cursor, self.strict)?;
                    self.deliver(value);
                }
                CharClass::LiteralStart => {
                    self.ensure_value_slot()?;
                    let value = self.literal()?;
                    self.deliver(value);
                }
                CharClass::Other => {
                    let found = self.cursor.current_char().unwrap_or('\u{fffd}');
                    return Err(self.error(SyntaxError::UnexpectedCharacter(found)));
                }
            }
        }

        if let Some(frame) = self.stack.last() {
            return Err(self.error(SyntaxError::UnclosedContainer(frame.open_char())));
        }
        self.root.ok_or(Error::ContentEmpty)
    }

    fn open_array(&mut self) -> Result<()> {
        self.ensure_value_slot()?;
        self.ensure_depth()?;
        self.stack.push(Frame::Array {
            state: ArrayState::ValueOrClose,
            start: self.values.len(),
        });
        self.cursor.advance();
        Ok(())
    }

    fn open_object(&mut self) -> Result<()> {
        self.ensure_value_slot()?;
        self.ensure_depth()?;
        self.stack.push(Frame::Object {
            state: ObjectState::KeyOrClose,
            start: self.pairs.len(),
            pending_key: None,
        });
        self.cursor.advance();
        Ok(())
    }

    fn close_array(&mut self) -> Result<()> {
        let start = match self.stack.last() {
            None => return Err(self.error(SyntaxError::StrayClose(']'))),
            Some(Frame::Object { .. }) => {
                return Err(self.error(SyntaxError::MismatchedClose {
                    open: '{',
                    found: ']',
                }))
            }
            Some(Frame::Array { state, start }) => match state {
                ArrayState::ValueOrClose | ArrayState::CommaOrClose => *start,
                ArrayState::Value => return Err(self.error(SyntaxError::TrailingDelimiter)),
            },
        };
        let items = self.arena.alloc_slice(&self.values[start..])?;
        self.values.truncate(start);
        self.stack.pop();
        self.cursor.advance();
        self.deliver(Value::Array(Array::new(items)));
        Ok(())
    }

    fn close_object(&mut self) -> Result<()> {
        let start = match self.stack.last() {
            None => return Err(self.error(SyntaxError::StrayClose('}'))),
            Some(Frame::Array { .. }) => {
                return Err(self.error(SyntaxError::MismatchedClose {
                    open: '[',
                    found: '}',
                }))
            }
            Some(Frame::Object { state, start, .. }) => match state {
                ObjectState::KeyOrClose | ObjectState::CommaOrClose => *start,
                ObjectState::Key => return Err(self.error(SyntaxError::TrailingDelimiter)),
                ObjectState::Colon | ObjectState::Value => {
                    return Err(self.error(SyntaxError::MissingValue))
                }
            },
        };
        let pairs = self.arena.alloc_slice(&self.pairs[start..])?;
        self.pairs.truncate(start);
        self.stack.pop();
        self.cursor.advance();
        self.deliver(Value::Object(Object::new(pairs)));
        Ok(())
    }

    fn delimiter(&mut self) -> Result<()> {
        let reason = match self.stack.last_mut() {
            None => SyntaxError::DelimiterOutsideContainer,
            Some(Frame::Array { state, .. }) => match *state {
                ArrayState::CommaOrClose => {
                    *state = ArrayState::Value;
                    self.cursor.advance();
                    return Ok(());
                }
                ArrayState::ValueOrClose => SyntaxError::LeadingDelimiter,
                ArrayState::Value => SyntaxError::DoubleDelimiter,
            },
            Some(Frame::Object { state, .. }) => match *state {
                ObjectState::CommaOrClose => {
                    *state = ObjectState::Key;
                    self.cursor.advance();
                    return Ok(());
                }
                ObjectState::KeyOrClose => SyntaxError::LeadingDelimiter,
                ObjectState::Key => SyntaxError::DoubleDelimiter,
                ObjectState::Colon | ObjectState::Value => SyntaxError::MissingValue,
            },
        };
        Err(self.error(reason))
    }

    fn colon(&mut self) -> Result<()> {
        if let Some(Frame::Object { state, .. }) = self.stack.last_mut() {
            if *state == ObjectState::Colon {
                *state = ObjectState::Value;
                self.cursor.advance();
                return Ok(());
            }
        }
        Err(self.error(SyntaxError::MisplacedColon))
    }

    fn string(&mut self) -> Result<()> {
        let expects_key = matches!(
            self.stack.last(),
            Some(Frame::Object {
                state: ObjectState::KeyOrClose | ObjectState::Key,
                ..
            })
        );
        if !expects_key {
            self.ensure_value_slot()?;
        }

        let text = lex_string(&mut self.cursor, self.strict)?;
        let text = self.arena.alloc_str(text)?;
        if !expects_key {
            self.deliver(Value::String(text));
            return Ok(());
        }
        if let Some(Frame::Object {
            state, pending_key, ..
        }) = self.stack.last_mut()
        {
            *pending_key = Some(text);
            *state = ObjectState::Colon;
        }
        Ok(())
    }

    /// Matches `true`, `false` or `null` exactly; a longer word is rejected.
    fn literal(&mut self) -> Result<Value<'a>> {
        let location = self.cursor.location();
        let start = self.cursor.offset();
        while let Some(byte) = self.cursor.current() {
            if !is_word_byte(byte) {
                break;
            }
            self.cursor.advance();
        }
        let word = self.cursor.slice(start, self.cursor.offset());
        match word {
            "true" => Ok(Value::True),
            "false" => Ok(Value::False),
            "null" => Ok(Value::Null),
            _ => Err(Error::syntax(
                SyntaxError::UnknownLiteral(SmolStr::new(word)),
                location,
            )),
        }
    }

    /// Checks that a value may start at the cursor.
    fn ensure_value_slot(&self) -> Result<()> {
        let reason = match self.stack.last() {
            None if self.root.is_none() => return Ok(()),
            None => SyntaxError::TrailingContent,
            Some(Frame::Array { state, .. }) => match state {
                ArrayState::ValueOrClose | ArrayState::Value => return Ok(()),
                ArrayState::CommaOrClose => SyntaxError::MissingDelimiter,
            },
            Some(Frame::Object { state, .. }) => match state {
                ObjectState::Value => return Ok(()),
                ObjectState::KeyOrClose | ObjectState::Key => SyntaxError::ExpectedKey,
                ObjectState::Colon => SyntaxError::MissingColon,
                ObjectState::CommaOrClose => SyntaxError::MissingDelimiter,
            },
        };
        Err(self.error(reason))
    }

    fn ensure_depth(&self) -> Result<()> {
        match self.max_depth {
            Some(limit) if self.stack.len() >= limit => {
                Err(self.error(SyntaxError::DepthLimitExceeded(limit)))
            }
            _ => Ok(()),
        }
    }

    /// Hands a finished value to the innermost open container, or makes it
    /// the root. Callers check [`Self::ensure_value_slot`] first.
    fn deliver(&mut self, value: Value<'a>) {
        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Frame::Array { state, .. }) => {
                self.values.push(value);
                *state = ArrayState::CommaOrClose;
            }
            Some(Frame::Object {
                state, pending_key, ..
            }) => {
                if let Some(key) = pending_key.take() {
                    self.pairs.push(Pair { key, value });
                }
                *state = ObjectState::CommaOrClose;
            }
        }
    }

    fn error(&self, reason: SyntaxError) -> Error {
        Error::syntax(reason, self.location())
    }

    fn location(&self) -> Location {
        self.cursor.location()
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<'a>(arena: &'a Arena, input: &str) -> Result<Value<'a>> {
        parse_into(arena, input, &ParseOptions::default())
    }

    fn reason(input: &str) -> SyntaxError {
        let arena = Arena::new();
        match parse(&arena, input) {
            Err(Error::Syntax { reason, .. }) => reason,
            other => panic!("expected syntax error for {input:?}, got {other:?}"),
        }
    }

    #[rstest::rstest]
    #[case("[,]", SyntaxError::LeadingDelimiter)]
    #[case("[,'x']", SyntaxError::LeadingDelimiter)]
    #[case("{,}", SyntaxError::LeadingDelimiter)]
    #[case("['x',]", SyntaxError::TrailingDelimiter)]
    #[case("{'a': 1,}", SyntaxError::TrailingDelimiter)]
    #[case("[true, ,false]", SyntaxError::DoubleDelimiter)]
    #[case("{]", SyntaxError::MismatchedClose { open: '{', found: ']' })]
    #[case("[}", SyntaxError::MismatchedClose { open: '[', found: '}' })]
    #[case("]", SyntaxError::StrayClose(']'))]
    #[case("}", SyntaxError::StrayClose('}'))]
    #[case("[", SyntaxError::UnclosedContainer('['))]
    #[case("{", SyntaxError::UnclosedContainer('{'))]
    #[case("[[1]", SyntaxError::UnclosedContainer('['))]
    #[case("[1 2]", SyntaxError::MissingDelimiter)]
    #[case("{'a' 1}", SyntaxError::MissingColon)]
    #[case("{'a':}", SyntaxError::MissingValue)]
    #[case("{'a'}", SyntaxError::MissingValue)]
    #[case("{'a', 'b': 1}", SyntaxError::MissingValue)]
    #[case("{1: 2}", SyntaxError::ExpectedKey)]
    #[case("{'a': 1 'b': 2}", SyntaxError::MissingDelimiter)]
    #[case("[:]", SyntaxError::MisplacedColon)]
    #[case("{'a':: 1}", SyntaxError::MisplacedColon)]
    #[case(":", SyntaxError::MisplacedColon)]
    #[case(",", SyntaxError::DelimiterOutsideContainer)]
    #[case("1, 2", SyntaxError::DelimiterOutsideContainer)]
    #[case("[] []", SyntaxError::TrailingContent)]
    #[case("'a' 'b'", SyntaxError::TrailingContent)]
    #[case("1 2", SyntaxError::TrailingContent)]
    #[case("erhan", SyntaxError::UnexpectedCharacter('e'))]
    #[case("[undefined]", SyntaxError::UnexpectedCharacter('u'))]
    #[case("nul", SyntaxError::UnknownLiteral(SmolStr::new("nul")))]
    #[case("trueish", SyntaxError::UnknownLiteral(SmolStr::new("trueish")))]
    #[case("[nullx]", SyntaxError::UnknownLiteral(SmolStr::new("nullx")))]
    #[case("[1]x", SyntaxError::UnexpectedCharacter('x'))]
    #[case("['open]", SyntaxError::UnterminatedString)]
    fn test_rejection_reasons(#[case] input: &str, #[case] expected: SyntaxError) {
        assert_eq!(reason(input), expected);
    }

    #[rstest::rstest]
    fn test_error_location_points_at_offending_byte() {
        let arena = Arena::new();
        let err = parse(&arena, "[\n  true,\n  ,false]").unwrap_err();
        assert_eq!(
            err.location(),
            Some(Location {
                offset: 12,
                line: 3,
                column: 3,
            })
        );
    }

    #[rstest::rstest]
    fn test_closed_containers_only() {
        let arena = Arena::new();
        let value = parse(&arena, "[[], {}]").unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert!(array.get(0).unwrap().as_array().unwrap().is_empty());
        assert!(array.get(1).unwrap().as_object().unwrap().is_empty());
    }

    #[rstest::rstest]
    fn test_scratch_stacks_are_drained() {
        let arena = Arena::new();
        let options = ParseOptions::default();
        let mut parser = GrammarParser::new(&arena, "[1, [2, 3], {'a': [4]}]", &options);
        let value = parser.parse_document().unwrap();
        assert!(parser.values.is_empty());
        assert!(parser.pairs.is_empty());
        assert!(parser.stack.is_empty());
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[rstest::rstest]
    fn test_max_depth() {
        let arena = Arena::new();
        let options = ParseOptions::new().with_max_depth(Some(2));
        assert!(parse_into(&arena, "[[1]]", &options).is_ok());
        let err = parse_into(&arena, "[[[1]]]", &options).unwrap_err();
        assert_eq!(err.reason(), Some(&SyntaxError::DepthLimitExceeded(2)));
        assert_eq!(err.location().map(|loc| loc.offset), Some(2));
    }

    #[rstest::rstest]
    #[case("")]
    #[case("   ")]
    #[case(" \r\n\t ")]
    fn test_blank_input_is_empty(#[case] input: &str) {
        let arena = Arena::new();
        assert_eq!(parse(&arena, input).unwrap_err(), Error::ContentEmpty);
    }
}
