//! Schema type nodes and their normalized descriptor shapes.

use std::fmt;

use arcstr::ArcStr;

/// A type node as supplied by the upstream schema layer.
///
/// This carries only as much metadata as type-directed conversion needs: the
/// kind of the node and, for named kinds, its schema name. Field and value
/// definitions live with the schema itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MetaType {
    /// A scalar type, built-in or custom.
    Scalar {
        /// Schema name of the scalar.
        name: ArcStr,
    },
    /// An enum type.
    Enum {
        /// Schema name of the enum.
        name: ArcStr,
    },
    /// An input object type.
    InputObject {
        /// Schema name of the input object.
        name: ArcStr,
    },
    /// A union type. Never a valid input position; values pass through
    /// conversion untouched.
    Union {
        /// Schema name of the union.
        name: ArcStr,
    },
    /// An interface type. Never a valid input position; values pass through
    /// conversion untouched.
    Interface {
        /// Schema name of the interface.
        name: ArcStr,
    },
    /// A list wrapper around another type.
    List {
        /// The wrapped type.
        of_type: Box<MetaType>,
    },
    /// A non-null wrapper around another type.
    NonNull {
        /// The wrapped type.
        of_type: Box<MetaType>,
    },
}

impl MetaType {
    /// Construct a scalar node.
    pub fn scalar(name: impl Into<ArcStr>) -> Self {
        Self::Scalar { name: name.into() }
    }

    /// Construct an enum node.
    pub fn enum_type(name: impl Into<ArcStr>) -> Self {
        Self::Enum { name: name.into() }
    }

    /// Construct an input object node.
    pub fn input_object(name: impl Into<ArcStr>) -> Self {
        Self::InputObject { name: name.into() }
    }

    /// Construct a list node wrapping `of_type`.
    pub fn list(of_type: MetaType) -> Self {
        Self::List {
            of_type: Box::new(of_type),
        }
    }

    /// Construct a non-null node wrapping `of_type`.
    pub fn non_null(of_type: MetaType) -> Self {
        Self::NonNull {
            of_type: Box::new(of_type),
        }
    }

    /// Access the name of the type, if applicable.
    ///
    /// Lists and non-null wrappers don't have names.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Scalar { name }
            | Self::Enum { name }
            | Self::InputObject { name }
            | Self::Union { name }
            | Self::Interface { name } => Some(name),
            Self::List { .. } | Self::NonNull { .. } => None,
        }
    }
}

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { name }
            | Self::Enum { name }
            | Self::InputObject { name }
            | Self::Union { name }
            | Self::Interface { name } => write!(f, "{name}"),
            Self::List { of_type } => write!(f, "[{of_type}]"),
            Self::NonNull { of_type } => write!(f, "{of_type}!"),
        }
    }
}

/// The normalized shape of a schema type node, as consumed by
/// [`InputMapper::convert`](crate::InputMapper::convert).
///
/// `List` and `NonNull` always carry exactly one inner descriptor; `Enum` and
/// `Object` always carry a non-empty schema name. Descriptors are built once
/// per schema load and immutable thereafter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeDescriptor {
    /// A plain scalar position; values pass through conversion untouched.
    Scalar,
    /// An enum position, converted to the native type registered under the
    /// carried schema name.
    Enum(ArcStr),
    /// An input object position, converted to the native type registered
    /// under the carried schema name.
    Object(ArcStr),
    /// An ordered, homogeneous sequence of the inner shape.
    List(Box<TypeDescriptor>),
    /// A non-null assertion over the inner shape. Transparent to conversion;
    /// null-ness is validated upstream.
    NonNull(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Normalizes a schema type node into its descriptor shape.
    ///
    /// Deterministic and total: list and non-null wrappers unwrap one layer
    /// and recurse, enums and input objects terminate carrying their schema
    /// name, and every other node kind (built-in or custom scalars, unions,
    /// interfaces) normalizes to the pass-through [`TypeDescriptor::Scalar`].
    pub fn resolve(node: &MetaType) -> Self {
        match node {
            MetaType::Enum { name } => Self::Enum(name.clone()),
            MetaType::InputObject { name } => Self::Object(name.clone()),
            MetaType::List { of_type } => Self::list(Self::resolve(of_type)),
            MetaType::NonNull { of_type } => Self::non_null(Self::resolve(of_type)),
            MetaType::Scalar { .. } | MetaType::Union { .. } | MetaType::Interface { .. } => {
                Self::Scalar
            }
        }
    }

    /// Construct an enum descriptor.
    pub fn enum_type(name: impl Into<ArcStr>) -> Self {
        Self::Enum(name.into())
    }

    /// Construct an object descriptor.
    pub fn object(name: impl Into<ArcStr>) -> Self {
        Self::Object(name.into())
    }

    /// Construct a list descriptor wrapping `inner`.
    pub fn list(inner: TypeDescriptor) -> Self {
        Self::List(Box::new(inner))
    }

    /// Construct a non-null descriptor wrapping `inner`.
    pub fn non_null(inner: TypeDescriptor) -> Self {
        Self::NonNull(Box::new(inner))
    }
}
