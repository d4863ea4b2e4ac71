pub mod arena;
pub mod decode;
pub mod error;
pub mod num;
pub mod options;
pub mod text;
pub mod types;

pub use crate::arena::Arena;
pub use crate::error::{Error, Location, Status, SyntaxError};
pub use crate::options::ParseOptions;
pub use crate::types::{Array, Object, Pair, Value, ValueKind};

pub type Result<T> = std::result::Result<T, Error>;

/// Parses `input` into `arena`.
///
/// The returned tree borrows the arena and stays valid until the arena is
/// dropped or reset. Strings are copied, so `input` may be discarded right
/// after the call.
pub fn parse<'a>(arena: &'a Arena, input: &str) -> Result<Value<'a>> {
    parse_with_options(arena, input, &ParseOptions::default())
}

pub fn parse_with_options<'a>(
    arena: &'a Arena,
    input: &str,
    options: &ParseOptions,
) -> Result<Value<'a>> {
    decode::from_str(arena, input, options)
}

pub fn parse_slice<'a>(arena: &'a Arena, input: &[u8]) -> Result<Value<'a>> {
    parse_slice_with_options(arena, input, &ParseOptions::default())
}

pub fn parse_slice_with_options<'a>(
    arena: &'a Arena,
    input: &[u8],
    options: &ParseOptions,
) -> Result<Value<'a>> {
    decode::from_slice(arena, input, options)
}

/// Status-code form of [`parse_slice`]: absent input is `ContentEmpty`, and
/// the tree is present only on `Success`.
pub fn parse_status<'a>(arena: &'a Arena, input: Option<&[u8]>) -> (Option<Value<'a>>, Status) {
    let Some(input) = input else {
        return (None, Status::ContentEmpty);
    };
    match parse_slice(arena, input) {
        Ok(value) => (Some(value), Status::Success),
        Err(err) => (None, err.status()),
    }
}

pub fn validate_str(input: &str) -> Result<()> {
    validate_str_with_options(input, &ParseOptions::default())
}

pub fn validate_str_with_options(input: &str, options: &ParseOptions) -> Result<()> {
    decode::validate_str(input, options)
}

/// Validates independent documents on the rayon pool, one arena each.
#[cfg(feature = "parallel")]
pub fn validate_batch(inputs: &[&str]) -> Vec<Status> {
    use rayon::prelude::*;

    inputs
        .par_iter()
        .map(|input| Status::of(&validate_str(input)))
        .collect()
}
