//! Instant-valued scalar wrappers, measured from the Unix epoch.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::{
    mapper::{FromInput, MapperError},
    value::{InputValue, Number},
};

use super::{
    duration::from_number_value,
    number::{scaled_nanos, NumberCoercing, WrappedNumber},
    CoercionError,
};

/// A point in time given as milliseconds since the Unix epoch, with
/// sub-millisecond precision kept down to whole nanoseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct EpochMilliseconds {
    raw: Number,
    instant: DateTime<Utc>,
}

impl EpochMilliseconds {
    /// Interprets `value` as milliseconds since the epoch.
    pub fn new(value: impl Into<Number>) -> Result<Self, CoercionError> {
        Self::from_number(value.into())
    }

    /// The represented point in time.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The scalar coercion for this type.
    pub fn coercing() -> NumberCoercing<Self> {
        NumberCoercing::new()
    }
}

impl WrappedNumber for EpochMilliseconds {
    const NAME: &'static str = "EpochMilliseconds";

    fn from_parts(raw: Number, decimal: &BigDecimal) -> Result<Self, CoercionError> {
        Ok(Self {
            raw,
            instant: DateTime::from_timestamp_nanos(scaled_nanos(decimal, 6)?),
        })
    }

    fn raw_value(&self) -> Number {
        self.raw
    }
}

impl FromInput for EpochMilliseconds {
    fn from_input(v: &InputValue) -> Result<Self, MapperError> {
        if let Some(ms) = v.downcast_ref::<Self>() {
            return Ok(ms.clone());
        }
        from_number_value(v).map_err(MapperError::from)
    }
}

/// A point in time given as seconds since the Unix epoch, with sub-second
/// precision kept down to whole nanoseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct EpochSeconds {
    raw: Number,
    instant: DateTime<Utc>,
}

impl EpochSeconds {
    /// Interprets `value` as seconds since the epoch.
    pub fn new(value: impl Into<Number>) -> Result<Self, CoercionError> {
        Self::from_number(value.into())
    }

    /// The represented point in time.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The scalar coercion for this type.
    pub fn coercing() -> NumberCoercing<Self> {
        NumberCoercing::new()
    }
}

impl WrappedNumber for EpochSeconds {
    const NAME: &'static str = "EpochSeconds";

    fn from_parts(raw: Number, decimal: &BigDecimal) -> Result<Self, CoercionError> {
        Ok(Self {
            raw,
            instant: DateTime::from_timestamp_nanos(scaled_nanos(decimal, 9)?),
        })
    }

    fn raw_value(&self) -> Number {
        self.raw
    }
}

impl FromInput for EpochSeconds {
    fn from_input(v: &InputValue) -> Result<Self, MapperError> {
        if let Some(s) = v.downcast_ref::<Self>() {
            return Ok(s.clone());
        }
        from_number_value(v).map_err(MapperError::from)
    }
}
