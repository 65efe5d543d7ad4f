//! Destination shapes.
//!
//! A [`Shape`] describes what a parsed node should become. The same node can
//! decode differently under different shapes: the scalar `42` is an integer
//! for `i64`, a float for `f64` and the text `"42"` for `String`.

mod cache;
mod decoder;
mod field;

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use num_complex::{Complex32, Complex64};

use crate::value::Value;

pub use cache::ShapeCache;
pub use decoder::{Decoded, MapKey};
pub(crate) use decoder::decode_dynamic;
pub use field::{accepted_names, kebab_case, FieldTable};

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Bool,
    SignedInt(u32),
    UnsignedInt(u32),
    Float(u32),
    /// Complex number; the width is that of each component.
    Complex(u32),
    String,
    Optional(Box<Shape>),
    Sequence(Box<Shape>),
    FixedArray(Box<Shape>, usize),
    Mapping(Box<Shape>, Box<Shape>),
    Record(Record),
    /// Anything; decodes into a [`Value`].
    Dynamic,
}

impl Shape {
    pub fn optional(inner: Shape) -> Self {
        Shape::Optional(Box::new(inner))
    }

    pub fn sequence(elem: Shape) -> Self {
        Shape::Sequence(Box::new(elem))
    }

    pub fn fixed_array(elem: Shape, capacity: usize) -> Self {
        Shape::FixedArray(Box::new(elem), capacity)
    }

    pub fn mapping(key: Shape, value: Shape) -> Self {
        Shape::Mapping(Box::new(key), Box::new(value))
    }

    /// Whether a null node decodes into this shape.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Shape::Optional(_) | Shape::Sequence(_) | Shape::Mapping(..) | Shape::Dynamic
        )
    }

    /// Whether this shape can key a [`Shape::Mapping`].
    pub fn is_key(&self) -> bool {
        matches!(
            self,
            Shape::String | Shape::SignedInt(_) | Shape::UnsignedInt(_)
        )
    }

    /// The value a destination of this shape holds before anything is
    /// decoded into it.
    pub fn zero(&self) -> Decoded {
        match self {
            Shape::Bool => Decoded::Bool(false),
            Shape::SignedInt(_) => Decoded::Int(0),
            Shape::UnsignedInt(_) => Decoded::Uint(0),
            Shape::Float(_) => Decoded::Float(0.0),
            Shape::Complex(_) => Decoded::Complex(Complex64::new(0.0, 0.0)),
            Shape::String => Decoded::String(String::new()),
            Shape::Optional(_) | Shape::Sequence(_) | Shape::Mapping(..) => Decoded::Null,
            Shape::FixedArray(elem, capacity) => Decoded::Seq(vec![elem.zero(); *capacity]),
            Shape::Record(record) => Decoded::Record(
                record
                    .fields
                    .iter()
                    .map(|f| (f.name.clone(), f.shape.zero()))
                    .collect(),
            ),
            Shape::Dynamic => Decoded::Dynamic(Value::Null),
        }
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Shape::Bool => f.write_str("bool"),
            Shape::SignedInt(bits) => write!(f, "i{}", bits),
            Shape::UnsignedInt(bits) => write!(f, "u{}", bits),
            Shape::Float(bits) => write!(f, "f{}", bits),
            Shape::Complex(bits) => write!(f, "Complex<f{}>", bits),
            Shape::String => f.write_str("String"),
            Shape::Optional(inner) => write!(f, "Option<{}>", inner),
            Shape::Sequence(elem) => write!(f, "Vec<{}>", elem),
            Shape::FixedArray(elem, capacity) => write!(f, "[{}; {}]", elem, capacity),
            Shape::Mapping(key, value) => write!(f, "map<{}, {}>", key, value),
            Shape::Record(record) => f.write_str(&record.name),
            Shape::Dynamic => f.write_str("Value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    shape: Shape,
    names: Vec<String>,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Keys that address this field; empty for an excluded field.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A named set of fields, each with its own shape and accepted keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
    table: FieldTable,
}

impl Record {
    pub fn builder(name: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub(crate) fn resolve(&self, key: &str) -> Result<usize, crate::error::DecodeError> {
        self.table.resolve(key)
    }
}

/// Builds a [`Shape::Record`].
///
/// ```
/// use shon::{Record, Shape};
///
/// let shape = Record::builder("Person")
///     .field("FirstName", Shape::String)
///     .renamed("Years", "age", Shape::UnsignedInt(8))
///     .skipped("cache", Shape::Dynamic)
///     .build();
/// assert_eq!(shape.to_string(), "Person");
/// ```
#[derive(Debug)]
pub struct RecordBuilder {
    name: String,
    fields: Vec<Field>,
}

impl RecordBuilder {
    /// Field addressed by its name and the kebab-case form of it.
    pub fn field(self, name: impl Into<String>, shape: Shape) -> Self {
        let name = name.into();
        let names = accepted_names(&name, None);
        self.push(name, shape, names)
    }

    /// Field addressed only by `key`.
    pub fn renamed(self, name: impl Into<String>, key: &str, shape: Shape) -> Self {
        let name = name.into();
        let names = accepted_names(&name, Some(key));
        self.push(name, shape, names)
    }

    /// Field no key can reach; it always keeps its zero value.
    pub fn skipped(self, name: impl Into<String>, shape: Shape) -> Self {
        self.push(name.into(), shape, Vec::new())
    }

    fn push(mut self, name: String, shape: Shape, names: Vec<String>) -> Self {
        self.fields.push(Field { name, shape, names });
        self
    }

    pub fn build(self) -> Shape {
        let mut table = FieldTable::new();
        for (slot, field) in self.fields.iter().enumerate() {
            table.insert(&field.names, slot);
        }
        Shape::Record(Record {
            name: self.name,
            fields: self.fields,
            table,
        })
    }
}

/// Types with a fixed [`Shape`].
pub trait Shaped: 'static {
    fn shape() -> Shape;
}

macro_rules! impl_shaped {
    ($($ty:ty => $shape:expr),* $(,)?) => {
        $(impl Shaped for $ty {
            fn shape() -> Shape {
                $shape
            }
        })*
    };
}

impl_shaped! {
    bool => Shape::Bool,
    i8 => Shape::SignedInt(8),
    i16 => Shape::SignedInt(16),
    i32 => Shape::SignedInt(32),
    i64 => Shape::SignedInt(64),
    isize => Shape::SignedInt(isize::BITS),
    u8 => Shape::UnsignedInt(8),
    u16 => Shape::UnsignedInt(16),
    u32 => Shape::UnsignedInt(32),
    u64 => Shape::UnsignedInt(64),
    usize => Shape::UnsignedInt(usize::BITS),
    f32 => Shape::Float(32),
    f64 => Shape::Float(64),
    Complex32 => Shape::Complex(32),
    Complex64 => Shape::Complex(64),
    String => Shape::String,
    Value => Shape::Dynamic,
}

impl<T: Shaped> Shaped for Option<T> {
    fn shape() -> Shape {
        Shape::optional(T::shape())
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }
}

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    fn shape() -> Shape {
        Shape::fixed_array(T::shape(), N)
    }
}

impl<K: Shaped, V: Shaped, S: 'static> Shaped for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::mapping(K::shape(), V::shape())
    }
}

impl<K: Shaped, V: Shaped> Shaped for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::mapping(K::shape(), V::shape())
    }
}

impl<K: Shaped, V: Shaped, S: 'static> Shaped for IndexMap<K, V, S> {
    fn shape() -> Shape {
        Shape::mapping(K::shape(), V::shape())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(<Vec<Option<i32>>>::shape().to_string(), "Vec<Option<i32>>");
        assert_eq!(<[u8; 3]>::shape().to_string(), "[u8; 3]");
        assert_eq!(
            <HashMap<String, f64>>::shape().to_string(),
            "map<String, f64>"
        );
        assert_eq!(Complex32::shape().to_string(), "Complex<f32>");
    }

    #[test]
    fn nullability() {
        assert!(<Option<bool>>::shape().is_nullable());
        assert!(<Vec<bool>>::shape().is_nullable());
        assert!(Value::shape().is_nullable());
        assert!(!bool::shape().is_nullable());
        assert!(!<[bool; 2]>::shape().is_nullable());
    }

    #[test]
    fn zero_values() {
        assert_eq!(
            <[i8; 2]>::shape().zero(),
            Decoded::Seq(vec![Decoded::Int(0), Decoded::Int(0)])
        );
        let record = Record::builder("R")
            .field("a", Shape::String)
            .skipped("b", Shape::Bool)
            .build();
        assert_eq!(
            record.zero(),
            Decoded::Record(vec![
                ("a".into(), Decoded::String(String::new())),
                ("b".into(), Decoded::Bool(false)),
            ])
        );
    }

    #[test]
    fn record_keys() {
        let Shape::Record(record) = Record::builder("R")
            .field("FirstName", Shape::String)
            .renamed("BazQux", "bax", Shape::Bool)
            .skipped("Hidden", Shape::Bool)
            .build()
        else {
            panic!("expected record");
        };
        assert_eq!(record.resolve("FirstName"), Ok(0));
        assert_eq!(record.resolve("first-name"), Ok(0));
        assert_eq!(record.resolve("bax"), Ok(1));
        assert!(record.resolve("BazQux").is_err());
        assert!(record.resolve("baz-qux").is_err());
        assert!(record.resolve("Hidden").is_err());
        assert!(record.fields()[2].names().is_empty());
    }
}
