//! Decimal-exact coercion of numeric wire values into wrapper types.

use std::{fmt, marker::PhantomData};

use bigdecimal::{BigDecimal, FromPrimitive as _, RoundingMode, ToPrimitive as _};

use crate::value::{InputValue, Instance, Number, ScalarToken};

use super::{Coercing, CoercionError};

/// A native type wrapping a single numeric wire value.
///
/// Implementors interpret the exact decimal form of the value into their own
/// unit (a duration, an instant) while keeping the wire [`Number`] around so
/// [`NumberCoercing::serialize`] can echo it back bit-for-bit.
pub trait WrappedNumber: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Schema name of the scalar this type backs.
    const NAME: &'static str;

    /// Builds `Self` from the wire value and its exact decimal form.
    ///
    /// `raw` is stored verbatim for serialization; `decimal` is the value the
    /// semantic interpretation must be derived from.
    fn from_parts(raw: Number, decimal: &BigDecimal) -> Result<Self, CoercionError>;

    /// The numeric wire value this wrapper was built from, unchanged.
    fn raw_value(&self) -> Number;

    /// Interprets a wire number into `Self` via its exact decimal expansion.
    ///
    /// Floats expand to the decimal value of their binary representation;
    /// whole-valued floats normalize to an exact integer wire value.
    fn from_number(value: Number) -> Result<Self, CoercionError> {
        let dec = decimal_of(value)?;
        Self::from_parts(number_from_decimal(&dec)?, &dec)
    }
}

/// Scalar coercion for a [`WrappedNumber`] type.
///
/// All three directions route numbers through [`BigDecimal`] so that no
/// precision is lost before the wrapper decides how to interpret them:
///
/// - [`parse_value`] accepts int, float and numeric-string variables; a float
///   variable is already a binary value, so its exact binary expansion is
///   what gets interpreted;
/// - [`parse_literal`] accepts int, float and string document literals;
///   float and string literals parse as exact decimals from their source
///   text, so `1.234` as a literal means precisely `1.234`;
/// - [`serialize`] returns the wrapper's original wire value verbatim.
///
/// [`parse_value`]: Coercing::parse_value
/// [`parse_literal`]: Coercing::parse_literal
/// [`serialize`]: Coercing::serialize
#[derive(Clone, Copy, Debug)]
pub struct NumberCoercing<W: WrappedNumber>(PhantomData<W>);

impl<W: WrappedNumber> NumberCoercing<W> {
    /// Creates the coercing for `W`.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<W: WrappedNumber> Default for NumberCoercing<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WrappedNumber> Coercing for NumberCoercing<W> {
    fn parse_value(&self, v: &InputValue) -> Result<Instance, CoercionError> {
        match v {
            InputValue::Int(i) => W::from_number(Number::Int(*i)),
            InputValue::Float(f) => W::from_number(Number::Float(*f)),
            InputValue::String(s) => {
                let dec = s.parse::<BigDecimal>().map_err(|_| CoercionError::NotANumber {
                    value: s.clone(),
                })?;
                W::from_parts(number_from_decimal(&dec)?, &dec)
            }
            other => Err(CoercionError::NotANumber {
                value: other.to_string(),
            }),
        }
        .map(Instance::new)
    }

    fn parse_literal(&self, token: ScalarToken<'_>) -> Result<Instance, CoercionError> {
        let invalid = || CoercionError::InvalidLiteral {
            literal: token.to_string(),
        };
        let wrapped = match token {
            ScalarToken::Int(text) => {
                let i = text.parse::<i64>().map_err(|_| invalid())?;
                W::from_parts(Number::Int(i), &BigDecimal::from(i))
            }
            ScalarToken::Float(text) | ScalarToken::String(text) => {
                let dec = text.parse::<BigDecimal>().map_err(|_| invalid())?;
                let raw = number_from_decimal(&dec).map_err(|_| invalid())?;
                W::from_parts(raw, &dec)
            }
        };
        wrapped.map(Instance::new).map_err(|_| invalid())
    }

    fn serialize(&self, v: &InputValue) -> Result<InputValue, CoercionError> {
        v.downcast_ref::<W>()
            .map(|w| w.raw_value().into())
            .ok_or_else(|| CoercionError::NotSerializable {
                found: v.to_string(),
            })
    }
}

/// Exact decimal expansion of a wire number.
///
/// Floats expand to the decimal value of their binary representation, not to
/// their shortest decimal rendering (`1.234f64` expands to
/// `1.2339999999999999857…`). Non-finite floats have no decimal value.
fn decimal_of(n: Number) -> Result<BigDecimal, CoercionError> {
    match n {
        Number::Int(i) => Ok(BigDecimal::from(i)),
        Number::Float(f) => BigDecimal::from_f64(f).ok_or_else(|| CoercionError::NotANumber {
            value: f.to_string(),
        }),
    }
}

/// Collapses a decimal back into a wire number: integral decimals become
/// exact [`Number::Int`]s, everything else becomes a [`Number::Float`].
fn number_from_decimal(dec: &BigDecimal) -> Result<Number, CoercionError> {
    let not_a_number = || CoercionError::NotANumber {
        value: dec.to_string(),
    };
    if dec.fractional_digit_count() <= 0 {
        dec.to_i64().map(Number::Int).ok_or_else(not_a_number)
    } else {
        dec.to_f64().filter(|f| f.is_finite()).map(Number::Float).ok_or_else(not_a_number)
    }
}

/// Scales `decimal` by `10^exponent` and truncates toward zero, exactly.
///
/// This is the shared sub-unit conversion for the temporal wrappers: with
/// `exponent` 6 a milliseconds value becomes whole nanoseconds, with 9 a
/// seconds value does. Truncation happens on the exact decimal, so the
/// binary expansion of `1.234f64` milliseconds is `1_233_999` nanoseconds
/// while the source-text literal `1.234` is `1_234_000`.
pub(crate) fn scaled_nanos(decimal: &BigDecimal, exponent: u32) -> Result<i64, CoercionError> {
    let scaled = decimal * BigDecimal::from(10_i64.pow(exponent));
    scaled
        .with_scale_round(0, RoundingMode::Down)
        .to_i64()
        .ok_or_else(|| CoercionError::NotANumber {
            value: decimal.to_string(),
        })
}

/// The whole part of `decimal`, truncated toward zero.
pub(crate) fn whole_part(decimal: &BigDecimal) -> Result<i64, CoercionError> {
    decimal
        .with_scale_round(0, RoundingMode::Down)
        .to_i64()
        .ok_or_else(|| CoercionError::NotANumber {
            value: decimal.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use pretty_assertions::assert_eq;

    use crate::{
        input_value,
        value::{InputValue, Number, ScalarToken},
    };

    use super::{
        scaled_nanos, Coercing as _, CoercionError, NumberCoercing, WrappedNumber,
    };

    /// Minimal wrapper interpreting its value as microseconds.
    #[derive(Clone, Debug, PartialEq)]
    struct Micros {
        raw: Number,
        nanos: i64,
    }

    impl WrappedNumber for Micros {
        const NAME: &'static str = "Micros";

        fn from_parts(raw: Number, decimal: &BigDecimal) -> Result<Self, CoercionError> {
            Ok(Self {
                raw,
                nanos: scaled_nanos(decimal, 3)?,
            })
        }

        fn raw_value(&self) -> Number {
            self.raw
        }
    }

    fn coercing() -> NumberCoercing<Micros> {
        NumberCoercing::new()
    }

    fn parsed(v: InputValue) -> Micros {
        coercing().parse_value(&v).unwrap().downcast_ref::<Micros>().unwrap().clone()
    }

    #[test]
    fn parses_int_values_exactly() {
        assert_eq!(
            parsed(input_value!(25)),
            Micros {
                raw: Number::Int(25),
                nanos: 25_000,
            },
        );
        assert_eq!(parsed(input_value!(0)).nanos, 0);
        assert_eq!(parsed(input_value!(-3)).nanos, -3_000);
    }

    #[test]
    fn whole_floats_normalize_to_ints() {
        assert_eq!(parsed(input_value!(2.0)).raw, Number::Int(2));
        assert_eq!(parsed(input_value!(-7.0)).raw, Number::Int(-7));
    }

    #[test]
    fn float_variables_scale_on_their_binary_expansion() {
        let m = parsed(input_value!(1.234));
        assert_eq!(m.raw, Number::Float(1.234));
        // 1.234f64 is slightly below 1.234, so scaling truncates down.
        assert_eq!(m.nanos, 1_233);
    }

    #[test]
    fn negative_fractions_truncate_toward_zero() {
        assert_eq!(parsed(input_value!(-1.9)).nanos, -1_900);
        assert_eq!(
            scaled_nanos(&"-1.2345".parse::<BigDecimal>().unwrap(), 3).unwrap(),
            -1_234,
        );
    }

    #[test]
    fn parses_numeric_strings() {
        assert_eq!(
            parsed(input_value!("25")),
            Micros {
                raw: Number::Int(25),
                nanos: 25_000,
            },
        );
        assert_eq!(parsed(input_value!("1.5")).nanos, 1_500);
    }

    #[test]
    fn rejects_non_numbers() {
        for v in [
            input_value!(true),
            input_value!(null),
            input_value!([1]),
            input_value!({"v": 1}),
            input_value!("wrench"),
        ] {
            assert!(matches!(
                coercing().parse_value(&v),
                Err(CoercionError::NotANumber { .. }),
            ));
        }
    }

    #[test]
    fn rejects_values_beyond_i64() {
        assert_eq!(
            coercing().parse_value(&input_value!("111111111111111111111111111111")),
            Err(CoercionError::NotANumber {
                value: "111111111111111111111111111111".into(),
            }),
        );
    }

    #[test]
    fn float_literals_scale_on_their_source_text() {
        let c = coercing();

        // The literal `1.234` means precisely 1.234, unlike the float
        // variable, whose binary value truncates to 1_233.
        let m = c.parse_literal(ScalarToken::Float("1.234")).unwrap();
        assert_eq!(
            m.downcast_ref::<Micros>(),
            Some(&Micros {
                raw: Number::Float(1.234),
                nanos: 1_234,
            }),
        );
    }

    #[test]
    fn int_and_string_literals_parse_exactly() {
        let c = coercing();

        assert_eq!(
            c.parse_literal(ScalarToken::Int("25")).unwrap().downcast_ref::<Micros>(),
            Some(&Micros {
                raw: Number::Int(25),
                nanos: 25_000,
            }),
        );
        assert_eq!(
            c.parse_literal(ScalarToken::String("1.5"))
                .unwrap()
                .downcast_ref::<Micros>()
                .unwrap()
                .nanos,
            1_500,
        );
    }

    #[test]
    fn malformed_literals_fail_as_literals() {
        for token in [
            ScalarToken::Int("999999999999999999999999"),
            ScalarToken::String("wrench"),
            ScalarToken::String("111111111111111111111111111111"),
        ] {
            assert_eq!(
                coercing().parse_literal(token),
                Err(CoercionError::InvalidLiteral {
                    literal: token.to_string(),
                }),
            );
        }
    }

    #[test]
    fn serialize_echoes_the_wire_value() {
        let c = coercing();
        for raw in [input_value!(25), input_value!(1.234), input_value!(-0.5)] {
            let instance = c.parse_value(&raw).unwrap();
            assert_eq!(c.serialize(&InputValue::Instance(instance)), Ok(raw));
        }
    }

    #[test]
    fn serialize_rejects_foreign_values() {
        #[derive(Debug, PartialEq)]
        struct Other;

        for v in [
            input_value!(25),
            input_value!(null),
            InputValue::instance(Other),
        ] {
            assert!(matches!(
                coercing().serialize(&v),
                Err(CoercionError::NotSerializable { .. }),
            ));
        }
    }
}
