//! Duration-valued scalar wrappers.

use bigdecimal::BigDecimal;
use chrono::Duration;

use crate::{
    mapper::{FromInput, MapperError},
    value::{InputValue, Number},
};

use super::{
    number::{scaled_nanos, whole_part, NumberCoercing, WrappedNumber},
    CoercionError,
};

/// A duration given in milliseconds, with sub-millisecond precision kept down
/// to whole nanoseconds.
///
/// The fractional part of the wire value is interpreted on its exact decimal
/// form and truncated toward zero at the nanosecond.
#[derive(Clone, Debug, PartialEq)]
pub struct Milliseconds {
    raw: Number,
    duration: Duration,
}

impl Milliseconds {
    /// Interprets `value` as a number of milliseconds.
    pub fn new(value: impl Into<Number>) -> Result<Self, CoercionError> {
        Self::from_number(value.into())
    }

    /// The represented duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The scalar coercion for this type.
    pub fn coercing() -> NumberCoercing<Self> {
        NumberCoercing::new()
    }
}

impl WrappedNumber for Milliseconds {
    const NAME: &'static str = "Milliseconds";

    fn from_parts(raw: Number, decimal: &BigDecimal) -> Result<Self, CoercionError> {
        Ok(Self {
            raw,
            duration: Duration::nanoseconds(scaled_nanos(decimal, 6)?),
        })
    }

    fn raw_value(&self) -> Number {
        self.raw
    }
}

impl FromInput for Milliseconds {
    fn from_input(v: &InputValue) -> Result<Self, MapperError> {
        if let Some(ms) = v.downcast_ref::<Self>() {
            return Ok(ms.clone());
        }
        from_number_value(v).map_err(MapperError::from)
    }
}

/// A duration given in seconds, with sub-second precision kept down to whole
/// nanoseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Seconds {
    raw: Number,
    duration: Duration,
}

impl Seconds {
    /// Interprets `value` as a number of seconds.
    pub fn new(value: impl Into<Number>) -> Result<Self, CoercionError> {
        Self::from_number(value.into())
    }

    /// The represented duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The scalar coercion for this type.
    pub fn coercing() -> NumberCoercing<Self> {
        NumberCoercing::new()
    }
}

impl WrappedNumber for Seconds {
    const NAME: &'static str = "Seconds";

    fn from_parts(raw: Number, decimal: &BigDecimal) -> Result<Self, CoercionError> {
        Ok(Self {
            raw,
            duration: Duration::nanoseconds(scaled_nanos(decimal, 9)?),
        })
    }

    fn raw_value(&self) -> Number {
        self.raw
    }
}

impl FromInput for Seconds {
    fn from_input(v: &InputValue) -> Result<Self, MapperError> {
        if let Some(s) = v.downcast_ref::<Self>() {
            return Ok(s.clone());
        }
        from_number_value(v).map_err(MapperError::from)
    }
}

/// A duration given in minutes, truncated to whole minutes.
///
/// Unlike [`Milliseconds`] and [`Seconds`], the fractional part of the wire
/// value is discarded entirely: `1.9` minutes is one minute, not 114 seconds.
/// [`raw_value`](WrappedNumber::raw_value) still echoes the fractional wire
/// value back unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Minutes {
    raw: Number,
    duration: Duration,
}

impl Minutes {
    /// Interprets `value` as a number of minutes.
    pub fn new(value: impl Into<Number>) -> Result<Self, CoercionError> {
        Self::from_number(value.into())
    }

    /// The represented duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The scalar coercion for this type.
    pub fn coercing() -> NumberCoercing<Self> {
        NumberCoercing::new()
    }
}

impl WrappedNumber for Minutes {
    const NAME: &'static str = "Minutes";

    fn from_parts(raw: Number, decimal: &BigDecimal) -> Result<Self, CoercionError> {
        let millis = whole_part(decimal)?
            .checked_mul(60_000)
            .ok_or_else(|| CoercionError::NotANumber {
                value: decimal.to_string(),
            })?;
        Ok(Self {
            raw,
            duration: Duration::milliseconds(millis),
        })
    }

    fn raw_value(&self) -> Number {
        self.raw
    }
}

impl FromInput for Minutes {
    fn from_input(v: &InputValue) -> Result<Self, MapperError> {
        if let Some(m) = v.downcast_ref::<Self>() {
            return Ok(m.clone());
        }
        from_number_value(v).map_err(MapperError::from)
    }
}

/// Shared [`FromInput`] body for numeric wrappers: coerce the raw value the
/// same way a variable would be, then unwrap the freshly built instance.
pub(super) fn from_number_value<W: WrappedNumber>(v: &InputValue) -> Result<W, CoercionError> {
    use super::Coercing as _;

    let instance = NumberCoercing::<W>::new().parse_value(v)?;
    match instance.downcast_ref::<W>() {
        Some(w) => Ok(w.clone()),
        // parse_value only ever builds a `W`.
        None => Err(CoercionError::NotANumber {
            value: v.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use crate::{
        input_value,
        mapper::{FromInput as _, InputMapper, TypeRegistry},
        schema::TypeDescriptor,
        value::{InputValue, Number},
    };

    use super::{Milliseconds, Minutes, Seconds, WrappedNumber as _};

    #[test]
    fn milliseconds_from_whole_number() {
        let ms = Milliseconds::new(25).unwrap();
        assert_eq!(ms.duration(), Duration::milliseconds(25));
        assert_eq!(ms.raw_value(), Number::Int(25));
    }

    #[test]
    fn milliseconds_keep_sub_millisecond_precision() {
        let ms = Milliseconds::new(1.234).unwrap();
        // Truncated on the exact binary expansion of the float.
        assert_eq!(ms.duration(), Duration::nanoseconds(1_233_999));
    }

    #[test]
    fn seconds_keep_sub_second_precision() {
        let s = Seconds::new(1.234).unwrap();
        assert_eq!(
            s.duration(),
            Duration::seconds(1) + Duration::nanoseconds(233_999_999),
        );
        assert_eq!(Seconds::new(2).unwrap().duration(), Duration::seconds(2));
    }

    #[test]
    fn minutes_discard_the_fraction() {
        assert_eq!(Minutes::new(1.234).unwrap().duration(), Duration::minutes(1));
        assert_eq!(Minutes::new(1.9).unwrap().duration(), Duration::minutes(1));
        assert_eq!(Minutes::new(3).unwrap().duration(), Duration::minutes(3));
    }

    #[test]
    fn minutes_still_echo_the_raw_value() {
        assert_eq!(Minutes::new(1.9).unwrap().raw_value(), Number::Float(1.9));
    }

    #[test]
    fn converts_inside_an_input_object() {
        #[derive(Clone, Debug, PartialEq)]
        struct Timeout {
            after: Milliseconds,
        }

        impl crate::FromInput for Timeout {
            fn from_input(v: &InputValue) -> Result<Self, crate::MapperError> {
                if let Some(t) = v.downcast_ref::<Self>() {
                    return Ok(t.clone());
                }
                Ok(Self {
                    after: v.required_field("Timeout", "after")?.convert_to()?,
                })
            }
        }

        let mut registry = TypeRegistry::new();
        registry.register::<Timeout>("Timeout");
        let mapper = InputMapper::new(registry);

        let converted = mapper
            .convert(
                &input_value!({"after": 1.234}),
                &TypeDescriptor::object("Timeout"),
            )
            .unwrap();
        assert_eq!(
            converted.downcast_ref::<Timeout>().unwrap().after.duration(),
            Duration::nanoseconds(1_233_999),
        );
    }

    #[test]
    fn reconverting_an_instance_is_a_no_op() {
        let ms = Milliseconds::new(25).unwrap();
        let echoed = Milliseconds::from_input(&InputValue::instance(ms.clone())).unwrap();
        assert_eq!(echoed, ms);
    }
}
