use memchr::memchr2;

use crate::decode::cursor::Cursor;
use crate::error::SyntaxError;
use crate::{Error, Result};

/// Lexes a quoted string and returns the raw text between the delimiters.
///
/// The closing delimiter must match the opening one. A backslash always
/// pairs with the byte after it, so `\'` inside a `'`-string does not end
/// it. Escapes are kept verbatim.
pub fn lex_string<'s>(cursor: &mut Cursor<'s>, strict: bool) -> Result<&'s str> {
    let quote = match cursor.current() {
        Some(quote @ (b'"' | b'\'')) => quote,
        _ => {
            let found = cursor.current_char().unwrap_or('\0');
            return Err(Error::syntax(
                SyntaxError::UnexpectedCharacter(found),
                cursor.location(),
            ));
        }
    };
    if strict && quote == b'\'' {
        return Err(Error::syntax(
            SyntaxError::SingleQuotedString,
            cursor.location(),
        ));
    }
    cursor.advance();

    let start = cursor.offset();
    let bytes = cursor.remaining();
    let mut idx = 0;
    loop {
        let Some(found) = memchr2(quote, b'\\', &bytes[idx..]) else {
            cursor.advance_to(start + bytes.len());
            return Err(Error::syntax(
                SyntaxError::UnterminatedString,
                cursor.location(),
            ));
        };
        let pos = idx + found;
        if bytes[pos] == quote {
            cursor.advance_to(start + pos);
            let text = cursor.slice(start, start + pos);
            cursor.advance();
            return Ok(text);
        }
        idx = pos + 2;
        if idx > bytes.len() {
            cursor.advance_to(start + bytes.len());
            return Err(Error::syntax(
                SyntaxError::UnterminatedString,
                cursor.location(),
            ));
        }
    }
}
