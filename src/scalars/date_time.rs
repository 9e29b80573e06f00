//! Calendar date-time scalar, carried as an RFC 3339 string.

use std::fmt;

use chrono::FixedOffset;

use crate::{
    mapper::{FromInput, MapperError},
    value::{InputValue, Instance, ScalarToken},
};

use super::{Coercing, CoercionError};

/// A combined date, time and UTC offset, as defined by [RFC 3339].
///
/// Unlike the numeric temporal scalars, this one travels as a string
/// (`"1996-12-19T16:39:57-08:00"`) and keeps the offset it was written with.
///
/// [RFC 3339]: https://datatracker.ietf.org/doc/html/rfc3339#section-5
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateTime(chrono::DateTime<FixedOffset>);

impl DateTime {
    /// Wraps an already-parsed date-time.
    pub fn new(value: chrono::DateTime<FixedOffset>) -> Self {
        Self(value)
    }

    /// Parses an RFC 3339 date-time string.
    pub fn parse(s: &str) -> Result<Self, CoercionError> {
        chrono::DateTime::parse_from_rfc3339(s)
            .map(Self)
            .map_err(|e| CoercionError::InvalidValue {
                type_name: "DateTime",
                message: format!("`{s}`: {e}"),
            })
    }

    /// The represented date-time.
    pub fn date_time(&self) -> chrono::DateTime<FixedOffset> {
        self.0
    }

    /// The scalar coercion for this type.
    pub fn coercing() -> DateTimeCoercing {
        DateTimeCoercing
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl FromInput for DateTime {
    fn from_input(v: &InputValue) -> Result<Self, MapperError> {
        if let Some(dt) = v.downcast_ref::<Self>() {
            return Ok(dt.clone());
        }
        match v.as_string_value() {
            Some(s) => Self::parse(s).map_err(MapperError::from),
            None => Err(MapperError::mismatch("an RFC 3339 date-time string", v)),
        }
    }
}

/// Scalar coercion for [`DateTime`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DateTimeCoercing;

impl Coercing for DateTimeCoercing {
    fn parse_value(&self, v: &InputValue) -> Result<Instance, CoercionError> {
        match v.as_string_value() {
            Some(s) => DateTime::parse(s).map(Instance::new),
            None => Err(CoercionError::InvalidValue {
                type_name: "DateTime",
                message: format!("expected an RFC 3339 string, found: {v}"),
            }),
        }
    }

    fn parse_literal(&self, token: ScalarToken<'_>) -> Result<Instance, CoercionError> {
        let invalid = || CoercionError::InvalidLiteral {
            literal: token.to_string(),
        };
        match token {
            ScalarToken::String(text) => {
                DateTime::parse(text).map(Instance::new).map_err(|_| invalid())
            }
            ScalarToken::Int(_) | ScalarToken::Float(_) => Err(invalid()),
        }
    }

    fn serialize(&self, v: &InputValue) -> Result<InputValue, CoercionError> {
        v.downcast_ref::<DateTime>()
            .map(|dt| InputValue::String(dt.to_string()))
            .ok_or_else(|| CoercionError::NotSerializable {
                found: v.to_string(),
            })
    }
}
