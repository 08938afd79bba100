//! Macros for reducing boilerplate when defining models
//!
//! These generate the repetitive pieces every model and enumeration needs:
//! wire-string conversions for closed enumerations, a `Deserialize` impl that
//! routes through the model's builder, and the `is_valid_*` predicates.

/// Declare a closed enumeration with a fixed wire string per variant
///
/// Generates the enum with serde support, `as_str()`, `ALL`, `Display` and
/// `FromStr` (which rejects anything outside the set).
///
/// # Example
/// ```rust,ignore
/// wire_enum! {
///     /// Kinds of principal
///     pub enum PrincipalType {
///         User => "USER",
///         Role => "ROLE",
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every member of the set, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::error::ModelError;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    _ => Err($crate::core::error::ModelError::invalid(
                        stringify!($name),
                        format!("must be one of {:?}, got '{}'", [$($wire),+], value),
                    )),
                }
            }
        }
    };
}

/// Implement `Deserialize` for a model through `Model::from_plain_record`
///
/// Decoding a response therefore applies the same validation as the builder.
#[macro_export]
macro_rules! impl_model_deserialize {
    ($type:ty) => {
        impl<'de> ::serde::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                <$type as $crate::models::Model>::from_plain_record(&value)
                    .map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

/// Generate the `is_valid_*` predicates for a model
///
/// The single-value predicate is true iff the plain record builds; the
/// array predicate additionally requires a non-empty array.
#[macro_export]
macro_rules! model_predicates {
    ($type:ty => $single:ident) => {
        /// True iff the plain record builds into a valid model
        pub fn $single(value: &::serde_json::Value) -> bool {
            $crate::models::is_valid::<$type>(value)
        }
    };
    ($type:ty => $single:ident, $array:ident) => {
        $crate::model_predicates!($type => $single);

        /// True iff the value is a non-empty array of valid records
        pub fn $array(value: &::serde_json::Value) -> bool {
            $crate::core::validation::validate_non_empty_values(value, $single)
        }
    };
}
