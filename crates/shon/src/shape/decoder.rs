use indexmap::IndexMap;
use num_complex::Complex64;

use crate::decode::Node;
use crate::error::{DecodeError, Error, NumberCause, Result};
use crate::number::{is_numeric, parse_complex, parse_float, parse_int, parse_uint};
use crate::options::Options;
use crate::shape::Shape;
use crate::value::{Map, Number, Value};

/// Key of a decoded [`Shape::Mapping`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    String(String),
    Int(i64),
    Uint(u64),
}

/// What a node became under a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex64),
    String(String),
    Seq(Vec<Decoded>),
    Map(IndexMap<MapKey, Decoded>),
    /// Every field of the record in declaration order, decoded or zero.
    Record(Vec<(String, Decoded)>),
    Dynamic(Value),
}

impl Decoded {
    /// Looks up a record field by its declared name.
    pub fn field(&self, name: &str) -> Option<&Decoded> {
        match self {
            Decoded::Record(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl Shape {
    /// Decodes `node` into this shape, draining every reader it contains.
    pub fn decode(&self, node: Node<'_, '_>, options: &Options) -> Result<Decoded> {
        match (self, node) {
            (Shape::Dynamic, node) => decode_dynamic(node, options).map(Decoded::Dynamic),
            (shape, Node::Null) if shape.is_nullable() => Ok(Decoded::Null),
            (shape, Node::Null) => Err(DecodeError::Null(shape.to_string()).into()),
            (Shape::Optional(inner), node) => inner.decode(node, options),

            (Shape::Bool, Node::Bool(b)) => Ok(Decoded::Bool(b)),
            (Shape::SignedInt(bits), Node::Scalar { text, .. }) => parse_int(text, *bits)
                .map(Decoded::Int)
                .map_err(|cause| self.number_error(text, cause)),
            (Shape::UnsignedInt(bits), Node::Scalar { text, .. }) => parse_uint(text, *bits)
                .map(Decoded::Uint)
                .map_err(|cause| self.number_error(text, cause)),
            (Shape::Float(bits), Node::Scalar { text, .. }) => parse_float(text, *bits)
                .map(Decoded::Float)
                .map_err(|cause| self.number_error(text, cause)),
            (Shape::Complex(bits), Node::Scalar { text, .. }) => parse_complex(text, *bits)
                .map(Decoded::Complex)
                .map_err(|cause| self.number_error(text, cause)),
            (Shape::String, Node::String(text) | Node::Scalar { text, .. }) => {
                Ok(Decoded::String(text.to_owned()))
            }

            (Shape::Sequence(elem), Node::Array(mut items)) => {
                let mut out = Vec::new();
                while items.more()? {
                    out.push(elem.decode(items.next()?, options)?);
                }
                Ok(Decoded::Seq(out))
            }
            (Shape::FixedArray(elem, capacity), Node::Array(mut items)) => {
                let mut out = Vec::with_capacity(*capacity);
                while items.more()? {
                    if out.len() >= *capacity {
                        return Err(DecodeError::TooMany {
                            capacity: *capacity,
                        }
                        .into());
                    }
                    out.push(elem.decode(items.next()?, options)?);
                }
                out.resize(*capacity, elem.zero());
                Ok(Decoded::Seq(out))
            }
            (Shape::Mapping(key, value), Node::Object(mut entries)) => {
                if !key.is_key() {
                    return Err(DecodeError::UnsupportedKey(key.to_string()).into());
                }
                let mut out = IndexMap::new();
                while entries.more()? {
                    let k = key.decode_key(entries.next_key()?)?;
                    let v = value.decode(entries.next_value()?, options)?;
                    out.insert(k, v);
                }
                Ok(Decoded::Map(out))
            }
            (Shape::Record(record), Node::Object(mut entries)) => {
                let mut fields: Vec<(String, Decoded)> = record
                    .fields()
                    .iter()
                    .map(|f| (f.name().to_owned(), f.shape().zero()))
                    .collect();
                while entries.more()? {
                    // Resolve before parsing so an unknown key fails without
                    // touching its value.
                    let slot = record.resolve(entries.next_key()?)?;
                    let shape = record.fields()[slot].shape();
                    fields[slot].1 = shape.decode(entries.next_value()?, options)?;
                }
                Ok(Decoded::Record(fields))
            }

            (shape, node) => Err(Error::mismatch(shape, node.kind())),
        }
    }

    /// Map keys decode as if they were bare scalar tokens.
    fn decode_key(&self, key: &str) -> Result<MapKey> {
        match self {
            Shape::String => Ok(MapKey::String(key.to_owned())),
            Shape::SignedInt(bits) => parse_int(key, *bits)
                .map(MapKey::Int)
                .map_err(|cause| self.number_error(key, cause)),
            Shape::UnsignedInt(bits) => parse_uint(key, *bits)
                .map(MapKey::Uint)
                .map_err(|cause| self.number_error(key, cause)),
            _ => Err(DecodeError::UnsupportedKey(self.to_string()).into()),
        }
    }

    fn number_error(&self, text: &str, cause: NumberCause) -> Error {
        Error::Decode(DecodeError::Number {
            target: self.to_string(),
            text: text.to_owned(),
            cause,
        })
    }
}

/// Decodes a node without a destination type.
pub(crate) fn decode_dynamic(node: Node<'_, '_>, options: &Options) -> Result<Value> {
    Ok(match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(b),
        Node::String(s) => Value::String(s.to_owned()),
        Node::Scalar {
            text,
            numeric: false,
        } => Value::String(text.to_owned()),
        Node::Scalar {
            text,
            numeric: true,
        } => Value::Number(dynamic_number(text, options)?),
        Node::Array(mut items) => {
            let mut out = Vec::new();
            while items.more()? {
                out.push(decode_dynamic(items.next()?, options)?);
            }
            Value::Array(out)
        }
        Node::Object(mut entries) => {
            let mut out = Map::new();
            while entries.more()? {
                let (key, node) = entries.next()?;
                let value = decode_dynamic(node, options)?;
                out.insert(key.to_owned(), value);
            }
            Value::Object(out)
        }
    })
}

fn dynamic_number(text: &str, options: &Options) -> Result<Number> {
    debug_assert!(is_numeric(text));
    if options.preserve_numeric_literal {
        return Ok(Number::Literal(text.to_owned()));
    }
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Number::I64(i));
    }
    parse_float(text, 64)
        .map(Number::F64)
        .map_err(|_| DecodeError::BadNumber(text.to_owned()).into())
}
