#![doc = include_str!("../README.md")]

pub mod decode;
pub mod error;
pub mod number;
pub mod options;
pub mod shape;
pub mod value;

#[cfg(feature = "serde")]
pub mod de;

pub use crate::decode::{Kind, Node, Parser};
pub use crate::error::{DecodeError, Error, ParseError, Result};
pub use crate::options::Options;
pub use crate::shape::{Decoded, MapKey, Record, Shape, ShapeCache, Shaped};
pub use crate::value::{Map, Number, Value};

#[cfg(feature = "serde")]
pub use crate::de::{from_args, from_args_object};

use tracing::debug;

pub(crate) fn tokens<S: AsRef<str>>(args: &[S]) -> Vec<&str> {
    args.iter().map(AsRef::as_ref).collect()
}

/// Fails unless every token was consumed.
pub(crate) fn ensure_consumed(parser: &Parser<'_>) -> Result<()> {
    let rest = parser.remaining();
    if rest.is_empty() {
        return Ok(());
    }
    debug!(consumed = parser.position(), left = rest.len(), "trailing arguments");
    Err(Error::TrailingArgs {
        args: rest.iter().map(|s| s.to_string()).collect(),
    })
}

/// Parses exactly one value from `args` and decodes it into `shape`.
pub fn parse_and_decode<S: AsRef<str>>(
    args: &[S],
    shape: &Shape,
    options: &Options,
) -> Result<Decoded> {
    let tokens = tokens(args);
    debug!(tokens = tokens.len(), %shape, "decoding");
    let mut parser = Parser::new(&tokens);
    let decoded = shape.decode(parser.value()?, options)?;
    ensure_consumed(&parser)?;
    Ok(decoded)
}

/// Decodes `args` as the entries of one object written without brackets,
/// as in `--name foo --size 3`.
pub fn parse_object_and_decode<S: AsRef<str>>(
    args: &[S],
    shape: &Shape,
    options: &Options,
) -> Result<Decoded> {
    let tokens = tokens(args);
    debug!(tokens = tokens.len(), %shape, "decoding implicit object");
    let mut parser = Parser::new(&tokens);
    shape.decode(parser.implicit_object(), options)
}

/// Parses exactly one value from `args` without a destination type.
///
/// ```
/// use shon::{Options, Value};
///
/// let v = shon::to_value(&["[", "--a", "1", "--b", "-t", "]"], &Options::default()).unwrap();
/// assert_eq!(v.get("b"), Some(&Value::Bool(true)));
/// ```
pub fn to_value<S: AsRef<str>>(args: &[S], options: &Options) -> Result<Value> {
    let tokens = tokens(args);
    let mut parser = Parser::new(&tokens);
    let value = shape::decode_dynamic(parser.value()?, options)?;
    ensure_consumed(&parser)?;
    Ok(value)
}

/// Like [`to_value`] for an object written without brackets.
pub fn object_to_value<S: AsRef<str>>(args: &[S], options: &Options) -> Result<Value> {
    let tokens = tokens(args);
    let mut parser = Parser::new(&tokens);
    shape::decode_dynamic(parser.implicit_object(), options)
}
