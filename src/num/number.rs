use crate::decode::cursor::Cursor;
use crate::error::SyntaxError;
use crate::types::Value;
use crate::{Error, Result};

const MAX_EXPONENT: u32 = 308;

/// Lexes the number under the cursor into an `Int` or `Float`.
///
/// Accepts an optional leading sign, digits with at most one `.`, and an
/// optional exponent with its own sign. Integers that do not fit in `i32`
/// come back as `Float`.
pub fn lex_number(cursor: &mut Cursor<'_>, strict: bool) -> Result<Value<'static>> {
    let mut negative = false;
    match cursor.current() {
        Some(b'-') => {
            negative = true;
            cursor.advance();
        }
        Some(b'+') => {
            if strict {
                return Err(Error::syntax(
                    SyntaxError::ExplicitPlusSign,
                    cursor.location(),
                ));
            }
            cursor.advance();
        }
        _ => {}
    }

    let mut magnitude = 0.0f64;
    let mut mantissa_digits = 0usize;
    let mut is_float = false;
    while let Some(byte) = cursor.current() {
        match byte {
            b'0'..=b'9' => {
                magnitude = magnitude * 10.0 + f64::from(byte - b'0');
                mantissa_digits += 1;
            }
            b'.' => break,
            b'+' | b'-' => return Err(malformed(cursor, "sign inside number")),
            _ => break,
        }
        cursor.advance();
    }

    if cursor.current() == Some(b'.') {
        is_float = true;
        cursor.advance();
        let mut divisor = 10.0f64;
        while let Some(byte) = cursor.current() {
            match byte {
                b'0'..=b'9' => {
                    magnitude += f64::from(byte - b'0') / divisor;
                    divisor *= 10.0;
                    mantissa_digits += 1;
                }
                b'.' => return Err(malformed(cursor, "second decimal point")),
                b'+' | b'-' => return Err(malformed(cursor, "sign inside number")),
                _ => break,
            }
            cursor.advance();
        }
    }

    if mantissa_digits == 0 {
        return Err(malformed(cursor, "no digits"));
    }

    if matches!(cursor.current(), Some(b'e' | b'E')) {
        is_float = true;
        cursor.advance();
        let exponent = lex_exponent(cursor)?;
        magnitude = scale(magnitude, exponent);
    }

    let value = if negative { -magnitude } else { magnitude };
    if !is_float && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        return Ok(Value::Int(value as i32));
    }
    Ok(Value::Float(value))
}

fn lex_exponent(cursor: &mut Cursor<'_>) -> Result<i32> {
    let mut negative = false;
    match cursor.current() {
        Some(b'-') => {
            negative = true;
            cursor.advance();
        }
        Some(b'+') => cursor.advance(),
        _ => {}
    }

    let mut exponent = 0u32;
    let mut digits = 0usize;
    while let Some(byte) = cursor.current() {
        match byte {
            b'0'..=b'9' => {
                exponent = exponent
                    .saturating_mul(10)
                    .saturating_add(u32::from(byte - b'0'));
                digits += 1;
            }
            b'.' => return Err(malformed(cursor, "decimal point in exponent")),
            b'+' | b'-' => return Err(malformed(cursor, "sign inside exponent")),
            b'e' | b'E' => return Err(malformed(cursor, "second exponent")),
            _ => break,
        }
        cursor.advance();
    }
    if digits == 0 {
        return Err(malformed(cursor, "exponent without digits"));
    }

    let exponent = exponent.min(MAX_EXPONENT) as i32;
    Ok(if negative { -exponent } else { exponent })
}

/// Applies a decimal exponent using 1e50, 1e8 and 10 steps.
pub fn scale(magnitude: f64, exponent: i32) -> f64 {
    let mut remaining = exponent.unsigned_abs().min(MAX_EXPONENT);
    let mut factor = 1.0f64;
    while remaining >= 50 {
        factor *= 1e50;
        remaining -= 50;
    }
    while remaining >= 8 {
        factor *= 1e8;
        remaining -= 8;
    }
    while remaining > 0 {
        factor *= 10.0;
        remaining -= 1;
    }
    if exponent < 0 {
        magnitude / factor
    } else {
        magnitude * factor
    }
}

fn malformed(cursor: &Cursor<'_>, detail: &'static str) -> Error {
    Error::syntax(SyntaxError::MalformedNumber(detail), cursor.location())
}
