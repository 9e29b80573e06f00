//! Raw and converted value representations.

use std::{any::Any, fmt, sync::Arc};

use derive_more::Display;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer};

/// A JSON-like value as produced by generic query-argument parsing, before
/// (and after) type-directed conversion.
///
/// This is both the input and the output shape of
/// [`InputMapper::convert`](crate::InputMapper::convert): raw values arrive as
/// primitives, lists and field maps, and conversion rewrites object- and
/// enum-typed positions into [`Instance`]s of the registered native types
/// while leaving everything else structurally untouched.
///
/// The [`Instance`] variant also occurs on the way *in*, when an
/// already-converted native value is echoed back through the mapper (e.g. a
/// custom scalar inside a nested input object). Conversion of such a value is
/// idempotent.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum InputValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<InputValue>),
    Object(IndexMap<String, InputValue>),
    Instance(Instance),
}

impl InputValue {
    /// Construct a `null` value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Construct a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Construct an object value from its field map.
    pub fn object<K>(o: IndexMap<K, Self>) -> Self
    where
        K: Into<String>,
    {
        Self::Object(o.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Construct a value holding an already-converted native instance.
    pub fn instance<T: NativeValue>(v: T) -> Self {
        Self::Instance(Instance::new(v))
    }

    /// Does the value represent a `null`?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// View the underlying int value, if present.
    pub fn as_int_value(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View the underlying float value, if present.
    pub fn as_float_value(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// View the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// View the underlying numeric value (int or float), if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int(i) => Some(Number::Int(*i)),
            Self::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// View the underlying list value, if present.
    pub fn as_list_value(&self) -> Option<&[InputValue]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// View the underlying object value, if present.
    pub fn as_object_value(&self) -> Option<&IndexMap<String, InputValue>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow the wrapped native instance as a `T`, if this value holds an
    /// [`Instance`] of exactly that type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Instance(i) => i.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    v.fmt(f)?;
                    if i < l.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Self::Object(o) => {
                write!(f, "{{")?;
                for (i, (k, v)) in o.iter().enumerate() {
                    write!(f, "{k}: ")?;
                    v.fmt(f)?;
                    if i < o.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
            Self::Instance(i) => write!(f, "{i:?}"),
        }
    }
}

impl<T> From<Option<T>> for InputValue
where
    Self: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i32> for InputValue {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<i64> for InputValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for InputValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Number> for InputValue {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Self::Int(i),
            Number::Float(f) => Self::Float(f),
        }
    }
}

impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct InputValueVisitor;

        impl<'de> de::Visitor<'de> for InputValueVisitor {
            type Value = InputValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid input value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<InputValue, E> {
                Ok(InputValue::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<InputValue, E> {
                Ok(InputValue::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<InputValue, E> {
                if value <= i64::MAX as u64 {
                    Ok(InputValue::Int(value as i64))
                } else {
                    // Browser's `JSON.stringify` serializes all numbers having
                    // no fractional part as integers (no decimal point), so
                    // large integers must be accepted as floating point
                    // instead of erroring.
                    Ok(InputValue::Float(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<InputValue, E> {
                Ok(InputValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<InputValue, E>
            where
                E: de::Error,
            {
                self.visit_string(value.into())
            }

            fn visit_string<E>(self, value: String) -> Result<InputValue, E> {
                Ok(InputValue::String(value))
            }

            fn visit_none<E>(self) -> Result<InputValue, E> {
                Ok(InputValue::Null)
            }

            fn visit_unit<E>(self) -> Result<InputValue, E> {
                Ok(InputValue::Null)
            }

            fn visit_seq<V>(self, mut visitor: V) -> Result<InputValue, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(el) = visitor.next_element()? {
                    values.push(el);
                }
                Ok(InputValue::List(values))
            }

            fn visit_map<V>(self, mut visitor: V) -> Result<InputValue, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut object = IndexMap::<String, InputValue>::new();
                while let Some((key, value)) = visitor.next_entry()? {
                    object.insert(key, value);
                }
                Ok(InputValue::Object(object))
            }
        }

        deserializer.deserialize_any(InputValueVisitor)
    }
}

/// An exact numeric wire value.
///
/// Wrappers produced by [`NumberCoercing`](crate::NumberCoercing) store the
/// `Number` they were parsed from and serialize it back verbatim, so the
/// round trip through a wrapper never loses the original literal.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The whole part of this number, truncated toward zero.
    pub fn trunc_to_i64(self) -> i64 {
        match self {
            Self::Int(i) => i,
            Self::Float(f) => f as i64,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

/// Representation of a raw unparsed scalar value literal from a query
/// document, tagged with how the lexer interpreted it.
///
/// The slices are the literal's source text (for strings, without the
/// surrounding quotes), so numeric literals can be re-parsed with full
/// decimal precision instead of going through binary floating point.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum ScalarToken<'a> {
    Int(&'a str),
    Float(&'a str),
    String(&'a str),
}

/// A converted native value held behind an [`Instance`].
///
/// Blanket-implemented for every `'static` type that is [`Debug`],
/// [`PartialEq`], [`Send`] and [`Sync`], so application input types need no
/// manual implementation.
///
/// [`Debug`]: fmt::Debug
pub trait NativeValue: Any + fmt::Debug + Send + Sync {
    /// Upcast to [`Any`] for downcasting by the caller.
    fn as_any(&self) -> &dyn Any;

    /// Compares two type-erased native values for equality.
    ///
    /// Values of different concrete types are never equal.
    fn eq_dyn(&self, other: &dyn NativeValue) -> bool;
}

impl<T> NativeValue for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_dyn(&self, other: &dyn NativeValue) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|o| self == o)
    }
}

/// A cheaply clonable handle to a converted native value of an
/// application-defined type (an input object or an enum constant).
///
/// Equality compares the underlying concrete values; instances of different
/// concrete types are never equal.
#[derive(Clone)]
pub struct Instance(Arc<dyn NativeValue>);

impl Instance {
    /// Wraps `value` into a type-erased handle.
    pub fn new<T: NativeValue>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrows the underlying value as a `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref()
    }

    /// Whether the underlying value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_dyn(other.0.as_ref())
    }
}
