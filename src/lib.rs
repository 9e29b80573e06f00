//! Type-directed conversion of raw GraphQL input values into native Rust
//! types, plus a set of decimal-exact temporal scalars.
//!
//! Generic argument parsing produces JSON-like [`InputValue`]s: primitives,
//! lists and field maps. [`InputMapper`] walks such a value alongside the
//! [`TypeDescriptor`] of its schema position and rewrites input-object- and
//! enum-typed positions into instances of the native types registered in a
//! [`TypeRegistry`], leaving scalar positions untouched.
//!
//! The [`scalars`] module ships temporal scalar types whose numeric wire
//! values are interpreted on their exact decimal expansion ([`Milliseconds`],
//! [`Seconds`], [`Minutes`], [`EpochMilliseconds`], [`EpochSeconds`]) and an
//! RFC 3339 [`DateTime`] string scalar, collected in [`PredefinedScalars`].
//!
//! # Example
//!
//! ```rust
//! use graphql_input_mapper::{
//!     input_value, FromInput, InputMapper, InputValue, MapperError, Milliseconds,
//!     TypeDescriptor, TypeRegistry,
//! };
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Retry {
//!     backoff: Milliseconds,
//! }
//!
//! impl FromInput for Retry {
//!     fn from_input(v: &InputValue) -> Result<Self, MapperError> {
//!         if let Some(retry) = v.downcast_ref::<Self>() {
//!             return Ok(retry.clone());
//!         }
//!         Ok(Self {
//!             backoff: v.required_field("Retry", "backoff")?.convert_to()?,
//!         })
//!     }
//! }
//!
//! # fn main() -> Result<(), MapperError> {
//! let mut registry = TypeRegistry::new();
//! registry.register::<Retry>("Retry");
//! let mapper = InputMapper::new(registry);
//!
//! let converted = mapper.convert(
//!     &input_value!({"backoff": 1.5}),
//!     &TypeDescriptor::object("Retry"),
//! )?;
//!
//! let retry = converted.downcast_ref::<Retry>().unwrap();
//! assert_eq!(retry.backoff.duration(), chrono::Duration::microseconds(1_500));
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

// Required for the `input_value!` macro to be usable.
#[doc(hidden)]
pub use indexmap;

mod macros;

pub mod mapper;
pub mod scalars;
pub mod schema;
pub mod value;

pub use crate::{
    mapper::{
        FromInput, InputMapper, MapperError, NativeFactory, NativeTypeResolver, TypeRegistry,
    },
    scalars::{
        Coercing, CoercionError, DateTime, DateTimeCoercing, EpochMilliseconds, EpochSeconds,
        Milliseconds, Minutes, NumberCoercing, PredefinedScalars, ScalarType, Seconds,
        WrappedNumber,
    },
    schema::{MetaType, TypeDescriptor},
    value::{InputValue, Instance, NativeValue, Number, ScalarToken},
};
