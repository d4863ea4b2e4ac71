pub mod cursor;
pub mod parser;

use tracing::{debug, debug_span, trace};

use crate::arena::Arena;
use crate::error::{Location, SyntaxError};
use crate::types::Value;
use crate::{Error, ParseOptions, Result};

pub fn from_str<'a>(arena: &'a Arena, input: &str, options: &ParseOptions) -> Result<Value<'a>> {
    let _span = debug_span!("parse", len = input.len(), strict = options.strict).entered();
    let result = parser::parse_into(arena, input, options);
    match &result {
        Ok(value) => trace!(
            kind = %value.kind(),
            allocated = arena.allocated_bytes(),
            "parsed document"
        ),
        Err(err) => debug!(status = %err.status(), error = %err, "parse failed"),
    }
    result
}

pub fn from_slice<'a>(
    arena: &'a Arena,
    input: &[u8],
    options: &ParseOptions,
) -> Result<Value<'a>> {
    let text = std::str::from_utf8(input).map_err(|err| {
        let valid = &input[..err.valid_up_to()];
        Error::syntax(SyntaxError::InvalidUtf8, location_of(valid))
    })?;
    from_str(arena, text, options)
}

pub fn validate_str(input: &str, options: &ParseOptions) -> Result<()> {
    let arena = Arena::for_input(input.len());
    from_str(&arena, input, options).map(|_| ())
}

fn location_of(prefix: &[u8]) -> Location {
    let line_start = prefix
        .iter()
        .rposition(|&byte| byte == b'\n')
        .map_or(0, |idx| idx + 1);
    Location {
        offset: prefix.len(),
        line: 1 + memchr::memchr_iter(b'\n', prefix).count(),
        column: prefix.len() - line_start + 1,
    }
}
