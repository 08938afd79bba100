//! Validation predicates
//!
//! Pure functions shared by the model builders and the API request guards.
//! None of them panic, and the `*_value` variants accept arbitrary JSON so
//! wrong-typed input simply yields `false`.

pub mod validators;

pub use validators::{
    is_non_empty_array, is_non_empty_string, is_non_empty_string_array, is_valid_fqn,
    is_valid_fqn_array, is_valid_uuid, is_valid_uuid_array, is_valid_uuid_value,
    validate_non_empty_array, validate_non_empty_values,
};
