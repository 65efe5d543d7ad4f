//! serde::Deserializer driven directly by the lazy node tree.
//!
//! The Rust type is the destination shape: each `deserialize_*` call says
//! what the next node should become, and arrays and objects are pulled from
//! the token stream as the visitor asks for their items.

use core::any::{Any, TypeId};

use serde::de::value::StrDeserializer;
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};

use crate::decode::{ArrayReader, Node, ObjectReader, Parser};
use crate::error::{DecodeError, Error, NumberCause};
use crate::number::{int_cause, is_numeric, parse_float, parse_int, parse_uint};
use crate::shape::{decode_dynamic, FieldTable};
use crate::value::Value;
use crate::{options::Options, Result};

/// Deserializes `T` from one SHON value; every token must be consumed.
///
/// ```
/// #[derive(serde::Deserialize, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let p: Point = shon::from_args(&["[", "--x", "1", "--y=2", "]"], &Default::default()).unwrap();
/// assert_eq!(p, Point { x: 1, y: 2 });
/// ```
pub fn from_args<T, S>(args: &[S], options: &Options) -> Result<T>
where
    T: DeserializeOwned + 'static,
    S: AsRef<str>,
{
    let tokens = crate::tokens(args);
    let mut parser = Parser::new(&tokens);
    let value = from_node(parser.value()?, options)?;
    crate::ensure_consumed(&parser)?;
    Ok(value)
}

/// Like [`from_args`], but the tokens are the entries of an object without
/// the surrounding brackets.
pub fn from_args_object<T, S>(args: &[S], options: &Options) -> Result<T>
where
    T: DeserializeOwned + 'static,
    S: AsRef<str>,
{
    let tokens = crate::tokens(args);
    let mut parser = Parser::new(&tokens);
    from_node(parser.implicit_object(), options)
}

fn from_node<T: DeserializeOwned + 'static>(node: Node<'_, '_>, options: &Options) -> Result<T> {
    // Our own Value goes through the dynamic decoder so that the options
    // that only it understands still apply.
    if TypeId::of::<T>() == TypeId::of::<Value>() {
        let value: Box<dyn Any> = Box::new(decode_dynamic(node, options)?);
        return value
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| de::Error::custom("dynamic value has an unexpected type"));
    }
    T::deserialize(Deserializer::new(node))
}

pub struct Deserializer<'p, 'a> {
    node: Node<'p, 'a>,
}

impl<'p, 'a> Deserializer<'p, 'a> {
    pub fn new(node: Node<'p, 'a>) -> Self {
        Self { node }
    }

    fn scalar(&self, expected: &str) -> Result<&'a str> {
        match &self.node {
            Node::Scalar { text, .. } => Ok(*text),
            node => Err(Error::mismatch(expected, node.kind())),
        }
    }

    fn text(&self, expected: &str) -> Result<&'a str> {
        match &self.node {
            Node::String(text) | Node::Scalar { text, .. } => Ok(*text),
            node => Err(Error::mismatch(expected, node.kind())),
        }
    }
}

fn number_error(target: &str, text: &str, cause: NumberCause) -> Error {
    Error::Decode(DecodeError::Number {
        target: target.to_owned(),
        text: text.to_owned(),
        cause,
    })
}

macro_rules! deserialize_int {
    ($($method:ident => $parse:ident, $visit:ident, $bits:expr, $name:literal;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                let text = self.scalar($name)?;
                let n = $parse(text, $bits).map_err(|cause| number_error($name, text, cause))?;
                visitor.$visit(n)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer<'_, '_> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Null => visitor.visit_unit(),
            Node::Bool(b) => visitor.visit_bool(b),
            Node::String(s) => visitor.visit_str(s),
            Node::Scalar {
                text,
                numeric: false,
            } => visitor.visit_str(text),
            Node::Scalar {
                text,
                numeric: true,
            } => {
                if let Ok(i) = text.parse::<i64>() {
                    visitor.visit_i64(i)
                } else if let Ok(u) = text.parse::<u64>() {
                    visitor.visit_u64(u)
                } else if let Ok(f) = parse_float(text, 64) {
                    visitor.visit_f64(f)
                } else {
                    Err(DecodeError::BadNumber(text.to_owned()).into())
                }
            }
            Node::Array(items) => visit_array(items, None, visitor),
            Node::Object(entries) => visit_object(entries, None, visitor),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Bool(b) => visitor.visit_bool(b),
            node => Err(Error::mismatch("bool", node.kind())),
        }
    }

    deserialize_int! {
        deserialize_i8 => parse_int, visit_i64, 8, "i8";
        deserialize_i16 => parse_int, visit_i64, 16, "i16";
        deserialize_i32 => parse_int, visit_i64, 32, "i32";
        deserialize_i64 => parse_int, visit_i64, 64, "i64";
        deserialize_u8 => parse_uint, visit_u64, 8, "u8";
        deserialize_u16 => parse_uint, visit_u64, 16, "u16";
        deserialize_u32 => parse_uint, visit_u64, 32, "u32";
        deserialize_u64 => parse_uint, visit_u64, 64, "u64";
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let text = self.scalar("i128")?;
        match text.parse::<i128>() {
            Ok(n) => visitor.visit_i128(n),
            Err(e) => Err(number_error("i128", text, int_cause(e.kind()))),
        }
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let text = self.scalar("u128")?;
        match text.parse::<u128>() {
            Ok(n) => visitor.visit_u128(n),
            Err(e) => Err(number_error("u128", text, int_cause(e.kind()))),
        }
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let text = self.scalar("f32")?;
        let f = parse_float(text, 32).map_err(|cause| number_error("f32", text, cause))?;
        visitor.visit_f32(f as f32)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let text = self.scalar("f64")?;
        let f = parse_float(text, 64).map_err(|cause| number_error("f64", text, cause))?;
        visitor.visit_f64(f)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let text = self.text("char")?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(de::Error::custom(format_args!(
                "expected a single character, got {:?}",
                text
            ))),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_str(self.text("string")?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::String(text) | Node::Scalar { text, .. } => visitor.visit_bytes(text.as_bytes()),
            Node::Array(items) => visit_array(items, None, visitor),
            node => Err(Error::mismatch("bytes", node.kind())),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Null => visitor.visit_unit(),
            node => Err(Error::mismatch("null", node.kind())),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Null => visitor.visit_seq(EmptySeq),
            Node::Array(items) => visit_array(items, None, visitor),
            node => Err(Error::mismatch("array", node.kind())),
        }
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Array(items) => visit_array(items, Some(len), visitor),
            node => Err(Error::mismatch(format_args!("array of {}", len), node.kind())),
        }
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Null => visitor.visit_map(EmptyMap),
            Node::Object(entries) => visit_object(entries, None, visitor),
            node => Err(Error::mismatch("object", node.kind())),
        }
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Object(entries) => visit_object(entries, Some(fields), visitor),
            node => Err(Error::mismatch(name, node.kind())),
        }
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::String(variant) | Node::Scalar { text: variant, .. } => {
                visitor.visit_enum(variant.into_deserializer())
            }
            Node::Object(mut entries) => {
                if !entries.more()? {
                    return Err(de::Error::custom(format_args!(
                        "expected a variant of {}, got an empty object",
                        name
                    )));
                }
                let variant = entries.next_key()?;
                let value = visitor.visit_enum(VariantDe {
                    variant,
                    node: entries.next_value()?,
                })?;
                if entries.more()? {
                    return Err(de::Error::custom(format_args!(
                        "expected a single variant of {}",
                        name
                    )));
                }
                Ok(value)
            }
            node => Err(Error::mismatch(name, node.kind())),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }
}

/// Visits array items and fails if the visitor stops before the closing `]`.
fn visit_array<'de, V>(
    items: ArrayReader<'_, '_>,
    capacity: Option<usize>,
    visitor: V,
) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let mut seq = SeqDe { items, count: 0 };
    let value = visitor.visit_seq(&mut seq)?;
    if seq.items.more()? {
        return Err(DecodeError::TooMany {
            capacity: capacity.unwrap_or(seq.count),
        }
        .into());
    }
    Ok(value)
}

fn visit_object<'de, V>(
    entries: ObjectReader<'_, '_>,
    fields: Option<&'static [&'static str]>,
    visitor: V,
) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let mut map = MapDe {
        entries,
        fields: fields.map(|names| (names, FieldTable::for_fields(names))),
    };
    let value = visitor.visit_map(&mut map)?;
    if map.entries.more()? {
        return Err(de::Error::custom("object entries left unread"));
    }
    Ok(value)
}

struct SeqDe<'p, 'a> {
    items: ArrayReader<'p, 'a>,
    count: usize,
}

impl<'de> SeqAccess<'de> for SeqDe<'_, '_> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if !self.items.more()? {
            return Ok(None);
        }
        self.count += 1;
        seed.deserialize(Deserializer::new(self.items.next()?))
            .map(Some)
    }
}

struct MapDe<'p, 'a> {
    entries: ObjectReader<'p, 'a>,
    fields: Option<(&'static [&'static str], FieldTable)>,
}

impl<'de> MapAccess<'de> for MapDe<'_, '_> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        if !self.entries.more()? {
            return Ok(None);
        }
        let key = self.entries.next_key()?;
        match &self.fields {
            // Struct fields are matched here, so the visitor only ever sees
            // the declared name.
            Some((names, table)) => {
                let slot = table.resolve(key)?;
                seed.deserialize(names[slot].into_deserializer()).map(Some)
            }
            None => {
                let node = Node::Scalar {
                    text: key,
                    numeric: is_numeric(key),
                };
                seed.deserialize(Deserializer::new(node)).map(Some)
            }
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        seed.deserialize(Deserializer::new(self.entries.next_value()?))
    }
}

struct EmptySeq;

impl<'de> SeqAccess<'de> for EmptySeq {
    type Error = Error;

    fn next_element_seed<T>(&mut self, _seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        Ok(None)
    }
}

struct EmptyMap;

impl<'de> MapAccess<'de> for EmptyMap {
    type Error = Error;

    fn next_key_seed<K>(&mut self, _seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, _seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        Err(de::Error::custom("value requested from an empty object"))
    }
}

/// `[ --Variant value ]`
struct VariantDe<'p, 'a> {
    variant: &'a str,
    node: Node<'p, 'a>,
}

impl<'de, 'p, 'a> EnumAccess<'de> for VariantDe<'p, 'a> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(StrDeserializer::<Error>::new(self.variant))?;
        Ok((variant, self))
    }
}

impl<'de> VariantAccess<'de> for VariantDe<'_, '_> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.node {
            Node::Null => Ok(()),
            node => Err(Error::mismatch("null", node.kind())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(Deserializer::new(self.node))
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(Deserializer::new(self.node), len, visitor)
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Node::Object(entries) => visit_object(entries, Some(fields), visitor),
            node => Err(Error::mismatch("object", node.kind())),
        }
    }
}
