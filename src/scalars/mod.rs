//! Custom scalar types and their wire coercion.

pub mod date_time;
pub mod duration;
pub mod instant;
pub mod number;

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use derive_more::{Display, Error};
use indexmap::IndexMap;

use crate::value::{InputValue, Instance, ScalarToken};

pub use self::{
    date_time::{DateTime, DateTimeCoercing},
    duration::{Milliseconds, Minutes, Seconds},
    instant::{EpochMilliseconds, EpochSeconds},
    number::{NumberCoercing, WrappedNumber},
};

/// Error produced while coercing a scalar value.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum CoercionError {
    /// The value is not a number (or not one a 64-bit representation can
    /// hold).
    #[display("'{value}' is not a number")]
    NotANumber {
        /// Rendering of the offending value.
        value: String,
    },

    /// A document literal could not be coerced, whatever the underlying
    /// reason.
    #[display("cannot coerce literal `{literal}`")]
    InvalidLiteral {
        /// The literal's source text.
        literal: String,
    },

    /// A value of a foreign type was handed to `serialize`.
    #[display("cannot serialize value: {found}")]
    NotSerializable {
        /// Rendering of the offending value.
        found: String,
    },

    /// The value has the right shape but an invalid content for the scalar.
    #[display("invalid `{type_name}` value: {message}")]
    InvalidValue {
        /// Schema name of the scalar.
        type_name: &'static str,
        /// What was wrong with the value.
        message: String,
    },
}

/// Wire coercion of one scalar type, object-safe so a schema can hold
/// heterogeneous scalars behind one interface.
///
/// The three directions mirror the GraphQL scalar contract: `parse_value`
/// for variable values, `parse_literal` for document literals, `serialize`
/// for responses.
pub trait Coercing: Send + Sync {
    /// Coerces a variable value into a native instance.
    fn parse_value(&self, v: &InputValue) -> Result<Instance, CoercionError>;

    /// Coerces a document literal into a native instance.
    ///
    /// Every failure surfaces as [`CoercionError::InvalidLiteral`] carrying
    /// the literal's source text.
    fn parse_literal(&self, token: ScalarToken<'_>) -> Result<Instance, CoercionError>;

    /// Serializes a previously coerced instance back to its wire value.
    fn serialize(&self, v: &InputValue) -> Result<InputValue, CoercionError>;
}

/// A named scalar type together with its coercion.
#[derive(Clone)]
pub struct ScalarType {
    name: ArcStr,
    coercing: Arc<dyn Coercing>,
}

impl ScalarType {
    /// Creates a scalar type named `name` coerced by `coercing`.
    pub fn new(name: impl Into<ArcStr>, coercing: impl Coercing + 'static) -> Self {
        Self {
            name: name.into(),
            coercing: Arc::new(coercing),
        }
    }

    /// Schema name of the scalar.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scalar's coercion.
    pub fn coercing(&self) -> &dyn Coercing {
        &*self.coercing
    }
}

impl fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarType").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The set of custom scalar types this crate ships, ready to be merged into
/// a schema.
///
/// Contains the temporal scalars ([`Milliseconds`], [`Seconds`], [`Minutes`],
/// [`EpochMilliseconds`], [`EpochSeconds`] and [`DateTime`]), each under its
/// schema name and with its own coercion. Application scalars can be added
/// alongside.
#[derive(Clone, Debug)]
pub struct PredefinedScalars {
    scalars: IndexMap<ArcStr, ScalarType>,
}

impl PredefinedScalars {
    /// Creates the predefined set.
    pub fn new() -> Self {
        let mut this = Self {
            scalars: IndexMap::new(),
        };
        this.add_scalar(ScalarType::new(
            EpochMilliseconds::NAME,
            EpochMilliseconds::coercing(),
        ));
        this.add_scalar(ScalarType::new(EpochSeconds::NAME, EpochSeconds::coercing()));
        this.add_scalar(ScalarType::new(Milliseconds::NAME, Milliseconds::coercing()));
        this.add_scalar(ScalarType::new(Seconds::NAME, Seconds::coercing()));
        this.add_scalar(ScalarType::new(Minutes::NAME, Minutes::coercing()));
        this.add_scalar(ScalarType::new("DateTime", DateTime::coercing()));
        this
    }

    /// Looks up a scalar by its schema name.
    pub fn get(&self, name: &str) -> Option<&ScalarType> {
        self.scalars.get(name)
    }

    /// Whether a scalar is present under `name`.
    pub fn is_predefined(&self, name: &str) -> bool {
        self.scalars.contains_key(name)
    }

    /// Adds (or replaces) a scalar under its own name.
    pub fn add_scalar(&mut self, scalar: ScalarType) -> &mut Self {
        self.scalars.insert(scalar.name.clone(), scalar);
        self
    }

    /// Iterates the scalars in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ScalarType> {
        self.scalars.values()
    }

    /// Whether `name` is one of the built-in GraphQL scalars, which never
    /// take a custom coercion.
    pub fn is_builtin(name: &str) -> bool {
        matches!(name, "String" | "Int" | "Float" | "Boolean" | "ID")
    }
}

impl Default for PredefinedScalars {
    fn default() -> Self {
        Self::new()
    }
}
