use std::fmt;

use smol_str::SmolStr;

/// Outcome of a parse, as reported by [`crate::parse_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    ContentEmpty,
    JsonNotValid,
    OutOfMemory,
}

impl Status {
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    pub fn of<T>(result: &Result<T, Error>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(err) => err.status(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Success => "success",
            Status::ContentEmpty => "content empty",
            Status::JsonNotValid => "json not valid",
            Status::OutOfMemory => "out of memory",
        };
        f.write_str(name)
    }
}

/// Position in the source where a violation was detected.
///
/// `line` and `column` are 1-based; `column` counts bytes from the start of
/// the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("unknown literal `{0}`")]
    UnknownLiteral(SmolStr),
    #[error("malformed number: {0}")]
    MalformedNumber(&'static str),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("`{0}` closes nothing")]
    StrayClose(char),
    #[error("`{found}` cannot close `{open}`")]
    MismatchedClose { open: char, found: char },
    #[error("`{0}` is never closed")]
    UnclosedContainer(char),
    #[error("`,` before the first element")]
    LeadingDelimiter,
    #[error("`,` must be followed by an element")]
    TrailingDelimiter,
    #[error("`,` directly after another `,`")]
    DoubleDelimiter,
    #[error("missing `,` between elements")]
    MissingDelimiter,
    #[error("`,` outside of a container")]
    DelimiterOutsideContainer,
    #[error("`:` must follow an object key")]
    MisplacedColon,
    #[error("missing `:` after object key")]
    MissingColon,
    #[error("object key has no value")]
    MissingValue,
    #[error("object key must be a string")]
    ExpectedKey,
    #[error("unexpected content after the root value")]
    TrailingContent,
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    #[error("input is not valid utf-8")]
    InvalidUtf8,
    #[error("single-quoted strings are not allowed in strict mode")]
    SingleQuotedString,
    #[error("explicit `+` sign is not allowed in strict mode")]
    ExplicitPlusSign,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("content is empty")]
    ContentEmpty,
    #[error("{reason} at {location}")]
    Syntax {
        reason: SyntaxError,
        location: Location,
    },
    #[error("arena allocation failed with {allocated} bytes in use")]
    OutOfMemory { allocated: usize },
}

impl Error {
    pub fn syntax(reason: SyntaxError, location: Location) -> Self {
        Error::Syntax { reason, location }
    }

    pub fn out_of_memory(allocated: usize) -> Self {
        Error::OutOfMemory { allocated }
    }

    pub fn status(&self) -> Status {
        match self {
            Error::ContentEmpty => Status::ContentEmpty,
            Error::Syntax { .. } => Status::JsonNotValid,
            Error::OutOfMemory { .. } => Status::OutOfMemory,
        }
    }

    pub fn reason(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Syntax { location, .. } => Some(*location),
            _ => None,
        }
    }
}
