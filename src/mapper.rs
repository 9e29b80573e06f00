//! Type-directed mapping of raw input values into native Rust types.

use std::{collections::HashMap, sync::Arc};

use arcstr::ArcStr;
use derive_more::{Display, Error, From};

use crate::{
    scalars::CoercionError,
    schema::TypeDescriptor,
    value::{InputValue, Instance, NativeValue},
};

/// Error produced while mapping a raw input value to a native type.
#[derive(Clone, Debug, Display, Error, From, PartialEq)]
pub enum MapperError {
    /// The schema name carried by an `Object` or `Enum` descriptor has no
    /// registered native type.
    ///
    /// This is surfaced distinctly from conversion errors: the caller decides
    /// whether to fail the whole request or substitute a default.
    #[display("no native type registered for `{name}`")]
    #[from(ignore)]
    TargetTypeNotFound {
        /// The unresolved schema name.
        name: String,
    },

    /// The raw value's shape does not match the shape the descriptor or the
    /// target type expects, or a required field is missing.
    #[display("expected {expected}, found: {found}")]
    #[from(ignore)]
    StructuralMismatch {
        /// Description of the expected shape.
        expected: String,
        /// Rendering of the offending value.
        found: String,
    },

    /// A scalar-typed field failed to coerce.
    #[display("scalar coercion failed: {_0}")]
    Coercion(CoercionError),
}

impl MapperError {
    /// Shorthand for a [`MapperError::StructuralMismatch`] against `found`.
    pub fn mismatch(expected: impl Into<String>, found: &InputValue) -> Self {
        Self::StructuralMismatch {
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// Shorthand for a missing required field on a named input type.
    pub fn missing_field(type_name: &str, field: &str, found: &InputValue) -> Self {
        Self::StructuralMismatch {
            expected: format!("`{type_name}` input with field `{field}`"),
            found: found.to_string(),
        }
    }
}

/// Structural coercion of a raw input value into a native Rust type.
///
/// Each target type declares how to build itself from an [`InputValue`]:
/// input objects extract their declared fields by name (ignoring unknown
/// fields, failing on missing required ones), enums match their constant
/// name, custom scalars parse their wire representation.
///
/// Implementations must short-circuit when the value already holds an
/// [`Instance`] of `Self`, so that re-converting an already-converted value
/// is a no-op up to equality:
///
/// ```rust
/// # use graphql_input_mapper::{FromInput, InputValue, MapperError};
/// # #[derive(Clone, Debug, PartialEq)]
/// # struct Size;
/// impl FromInput for Size {
///     fn from_input(v: &InputValue) -> Result<Self, MapperError> {
///         if let Some(size) = v.downcast_ref::<Self>() {
///             return Ok(size.clone());
///         }
///         // ...build from the raw shape...
/// #       Ok(Size)
///     }
/// }
/// ```
pub trait FromInput: Sized {
    /// Performs the conversion.
    fn from_input(v: &InputValue) -> Result<Self, MapperError>;
}

impl InputValue {
    /// Shorthand form of invoking [`FromInput::from_input()`].
    pub fn convert_to<T: FromInput>(&self) -> Result<T, MapperError> {
        T::from_input(self)
    }

    /// Looks up a required `field` of this input object.
    ///
    /// Fails with a [`MapperError::StructuralMismatch`] when this value is
    /// not an object or the field is absent. Intended for [`FromInput`]
    /// implementations; `type_name` is only used for diagnostics.
    pub fn required_field(&self, type_name: &str, field: &str) -> Result<&InputValue, MapperError> {
        self.as_object_value()
            .and_then(|o| o.get(field))
            .ok_or_else(|| MapperError::missing_field(type_name, field, self))
    }
}

/// Shortcut for a registered conversion function from a raw value to a native
/// instance.
pub type NativeFactory = Arc<dyn Fn(&InputValue) -> Result<Instance, MapperError> + Send + Sync>;

/// The name-lookup capability used by [`InputMapper`] to resolve schema names
/// to native types.
///
/// The default implementation is [`TypeRegistry`], an explicit map populated
/// at startup. A custom implementation can derive factories any other way
/// (e.g. lazily from generated code).
pub trait NativeTypeResolver {
    /// Resolves `name` to the factory for its native type, or [`None`] if no
    /// type is known under that name.
    fn factory(&self, name: &str) -> Option<NativeFactory>;
}

/// An explicit, statically populated map from schema names to native type
/// factories.
///
/// Built once at startup and treated as read-only afterwards; lookups never
/// mutate it, so shared references can be used from any number of threads.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    factories: HashMap<ArcStr, NativeFactory>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` as the native type for the schema name `name`.
    pub fn register<T>(&mut self, name: impl Into<ArcStr>) -> &mut Self
    where
        T: FromInput + NativeValue,
    {
        self.register_factory(name, Arc::new(|v| T::from_input(v).map(Instance::new)))
    }

    /// Registers a custom conversion function for the schema name `name`.
    pub fn register_factory(
        &mut self,
        name: impl Into<ArcStr>,
        factory: NativeFactory,
    ) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    /// Whether a native type is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl NativeTypeResolver for TypeRegistry {
    fn factory(&self, name: &str) -> Option<NativeFactory> {
        self.factories.get(name).cloned()
    }
}

/// Primary entry point for mapping primitive GraphQL inputs to custom types.
///
/// Walks a [`TypeDescriptor`] tree alongside a raw [`InputValue`] and
/// rewrites object- and enum-typed positions into instances of the native
/// types known to the resolver.
///
/// ```rust
/// # use graphql_input_mapper::{
/// #     input_value, FromInput, InputMapper, InputValue, MapperError, TypeDescriptor,
/// #     TypeRegistry,
/// # };
/// #[derive(Clone, Debug, PartialEq)]
/// struct Page {
///     limit: i64,
/// }
///
/// impl FromInput for Page {
///     fn from_input(v: &InputValue) -> Result<Self, MapperError> {
///         if let Some(page) = v.downcast_ref::<Self>() {
///             return Ok(page.clone());
///         }
///         let limit = v.required_field("Page", "limit")?;
///         Ok(Page {
///             limit: limit
///                 .as_int_value()
///                 .ok_or_else(|| MapperError::mismatch("an `Int` for `limit`", limit))?,
///         })
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Page>("Page");
/// let mapper = InputMapper::new(registry);
///
/// let converted = mapper
///     .convert(&input_value!({"limit": 10}), &TypeDescriptor::object("Page"))
///     .unwrap();
/// assert_eq!(converted.downcast_ref::<Page>(), Some(&Page { limit: 10 }));
/// ```
pub struct InputMapper<R = TypeRegistry> {
    resolver: R,
}

impl<R: NativeTypeResolver> InputMapper<R> {
    /// Creates a mapper resolving native types through `resolver`.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Converts `raw` according to `descriptor`.
    ///
    /// Structural recursion on the descriptor:
    /// - `NonNull` is transparent: the inner shape is converted against the
    ///   same raw value (null validation happens upstream).
    /// - `List` requires a list value and converts every element against the
    ///   inner shape, preserving order and length.
    /// - `Object`/`Enum` resolve their schema name through the
    ///   [`NativeTypeResolver`] and delegate to the registered factory;
    ///   an unknown name fails with [`MapperError::TargetTypeNotFound`].
    /// - Plain `Scalar` positions pass the raw value through untouched: only
    ///   schema-defined types with a registered native type participate in
    ///   structural conversion, built-ins are never implicitly coerced.
    pub fn convert(
        &self,
        raw: &InputValue,
        descriptor: &TypeDescriptor,
    ) -> Result<InputValue, MapperError> {
        match descriptor {
            TypeDescriptor::NonNull(inner) => self.convert(raw, inner),
            TypeDescriptor::List(inner) => match raw {
                InputValue::List(items) => items
                    .iter()
                    .map(|item| self.convert(item, inner))
                    .collect::<Result<Vec<_>, _>>()
                    .map(InputValue::List),
                other => Err(MapperError::mismatch("a list", other)),
            },
            TypeDescriptor::Object(name) | TypeDescriptor::Enum(name) => {
                let factory =
                    self.resolver
                        .factory(name)
                        .ok_or_else(|| MapperError::TargetTypeNotFound {
                            name: name.to_string(),
                        })?;
                factory(raw).map(InputValue::Instance)
            }
            TypeDescriptor::Scalar => Ok(raw.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{input_value, schema::MetaType};

    use super::{
        FromInput, InputMapper, InputValue, MapperError, TypeDescriptor, TypeRegistry,
    };

    #[derive(Clone, Debug, PartialEq)]
    enum MyEnum {
        First,
        Second,
    }

    impl FromInput for MyEnum {
        fn from_input(v: &InputValue) -> Result<Self, MapperError> {
            if let Some(e) = v.downcast_ref::<Self>() {
                return Ok(e.clone());
            }
            match v.as_string_value() {
                Some("FIRST") => Ok(Self::First),
                Some("SECOND") => Ok(Self::Second),
                _ => Err(MapperError::mismatch("a `MyEnum` constant name", v)),
            }
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct MyObject {
        v1: String,
        v2: String,
    }

    impl MyObject {
        fn new(v1: &str, v2: &str) -> Self {
            Self {
                v1: v1.into(),
                v2: v2.into(),
            }
        }
    }

    impl FromInput for MyObject {
        fn from_input(v: &InputValue) -> Result<Self, MapperError> {
            if let Some(obj) = v.downcast_ref::<Self>() {
                return Ok(obj.clone());
            }
            let v1 = v.required_field("MyObject", "v1")?;
            let v2 = v.required_field("MyObject", "v2")?;
            Ok(Self {
                v1: v1
                    .as_string_value()
                    .ok_or_else(|| MapperError::mismatch("a `String` for `v1`", v1))?
                    .into(),
                v2: v2
                    .as_string_value()
                    .ok_or_else(|| MapperError::mismatch("a `String` for `v2`", v2))?
                    .into(),
            })
        }
    }

    fn mapper() -> InputMapper {
        let mut registry = TypeRegistry::new();
        registry.register::<MyEnum>("MyEnum");
        registry.register::<MyObject>("MyObject");
        InputMapper::new(registry)
    }

    fn my_object() -> TypeDescriptor {
        TypeDescriptor::object("MyObject")
    }

    #[test]
    fn does_not_touch_scalars() {
        let mapper = mapper();

        for raw in [
            input_value!("Howdy"),
            input_value!(42),
            input_value!(31.4),
            input_value!(true),
            input_value!(""),
            input_value!(1000_i64),
            InputValue::Null,
        ] {
            assert_eq!(mapper.convert(&raw, &TypeDescriptor::Scalar), Ok(raw));
        }
    }

    #[test]
    fn converts_to_enum() {
        let actual = mapper()
            .convert(&input_value!("FIRST"), &TypeDescriptor::enum_type("MyEnum"))
            .unwrap();
        assert_eq!(actual.downcast_ref::<MyEnum>(), Some(&MyEnum::First));
    }

    #[test]
    fn converts_to_object() {
        let actual = mapper()
            .convert(&input_value!({"v1": "1", "v2": "2"}), &my_object())
            .unwrap();
        assert_eq!(
            actual.downcast_ref::<MyObject>(),
            Some(&MyObject::new("1", "2")),
        );
    }

    #[test]
    fn converts_with_non_nullable_object() {
        let actual = mapper()
            .convert(
                &input_value!({"v1": "1", "v2": "2"}),
                &TypeDescriptor::non_null(my_object()),
            )
            .unwrap();
        assert_eq!(
            actual.downcast_ref::<MyObject>(),
            Some(&MyObject::new("1", "2")),
        );
    }

    #[test]
    fn converts_list_of_objects() {
        let actual = mapper()
            .convert(
                &input_value!([{"v1": "1", "v2": "2"}]),
                &TypeDescriptor::list(my_object()),
            )
            .unwrap();
        assert_eq!(
            actual,
            InputValue::list(vec![InputValue::instance(MyObject::new("1", "2"))]),
        );
    }

    #[test]
    fn converts_list_of_non_null_objects() {
        let actual = mapper()
            .convert(
                &input_value!([{"v1": "1", "v2": "2"}]),
                &TypeDescriptor::list(TypeDescriptor::non_null(my_object())),
            )
            .unwrap();
        assert_eq!(
            actual,
            InputValue::list(vec![InputValue::instance(MyObject::new("1", "2"))]),
        );
    }

    #[test]
    fn converts_non_null_list_of_non_null_objects() {
        let actual = mapper()
            .convert(
                &input_value!([{"v1": "1", "v2": "2"}]),
                &TypeDescriptor::non_null(TypeDescriptor::list(TypeDescriptor::non_null(
                    my_object(),
                ))),
            )
            .unwrap();
        assert_eq!(
            actual,
            InputValue::list(vec![InputValue::instance(MyObject::new("1", "2"))]),
        );
    }

    #[test]
    fn converts_list_of_scalars() {
        let raw = input_value!(["hi", "there"]);
        let actual = mapper()
            .convert(&raw, &TypeDescriptor::list(TypeDescriptor::Scalar))
            .unwrap();
        assert_eq!(actual, raw);
    }

    #[test]
    fn converts_nested_list_of_objects() {
        let actual = mapper()
            .convert(
                &input_value!([[{"v1": "1", "v2": "2"}]]),
                &TypeDescriptor::list(TypeDescriptor::list(my_object())),
            )
            .unwrap();
        assert_eq!(
            actual,
            InputValue::list(vec![InputValue::list(vec![InputValue::instance(
                MyObject::new("1", "2"),
            )])]),
        );
    }

    #[test]
    fn converts_nested_list_of_scalars() {
        let raw = input_value!([["hi", "there"], []]);
        let actual = mapper()
            .convert(
                &raw,
                &TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::Scalar)),
            )
            .unwrap();
        assert_eq!(actual, raw);
    }

    #[test]
    fn empty_list_maps_to_empty_list() {
        let actual = mapper()
            .convert(&input_value!([]), &TypeDescriptor::list(my_object()))
            .unwrap();
        assert_eq!(actual, input_value!([]));
    }

    #[test]
    fn unknown_type_name_fails_distinctly() {
        let err = mapper()
            .convert(
                &input_value!({"v1": "1"}),
                &TypeDescriptor::object("Bogus"),
            )
            .unwrap_err();
        assert_eq!(
            err,
            MapperError::TargetTypeNotFound {
                name: "Bogus".into(),
            },
        );
    }

    #[test]
    fn non_list_value_for_list_descriptor_fails() {
        let err = mapper()
            .convert(&input_value!(42), &TypeDescriptor::list(my_object()))
            .unwrap_err();
        assert!(matches!(err, MapperError::StructuralMismatch { .. }));
    }

    #[test]
    fn missing_required_field_fails() {
        let err = mapper()
            .convert(&input_value!({"v1": "1"}), &my_object())
            .unwrap_err();
        assert_eq!(
            err,
            MapperError::StructuralMismatch {
                expected: "`MyObject` input with field `v2`".into(),
                found: "{v1: \"1\"}".into(),
            },
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let actual = mapper()
            .convert(
                &input_value!({"v1": "1", "v2": "2", "extra": true}),
                &my_object(),
            )
            .unwrap();
        assert_eq!(
            actual.downcast_ref::<MyObject>(),
            Some(&MyObject::new("1", "2")),
        );
    }

    #[test]
    fn reconversion_is_idempotent() {
        let mapper = mapper();
        let converted = mapper
            .convert(&input_value!({"v1": "1", "v2": "2"}), &my_object())
            .unwrap();

        let reconverted = mapper.convert(&converted, &my_object()).unwrap();
        assert_eq!(reconverted, converted);
    }

    #[test]
    fn resolves_descriptor_from_schema_node() {
        // End to end: [MyObject!]! the way an upstream schema layer hands
        // it over.
        let node = MetaType::non_null(MetaType::list(MetaType::non_null(
            MetaType::input_object("MyObject"),
        )));
        let actual = mapper()
            .convert(
                &input_value!([{"v1": "1", "v2": "2"}]),
                &TypeDescriptor::resolve(&node),
            )
            .unwrap();
        assert_eq!(
            actual,
            InputValue::list(vec![InputValue::instance(MyObject::new("1", "2"))]),
        );
    }
}
