//! Reusable validation predicates

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// The nil UUID, accepted everywhere a UUID is expected
pub const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// True iff `value` is an RFC-4122 UUID of version 1 to 5, or the nil UUID
pub fn is_valid_uuid(value: &str) -> bool {
    static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = UUID_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
            .unwrap()
    });
    value == NIL_UUID || regex.is_match(value)
}

/// Same as [`is_valid_uuid`], for arbitrary JSON
pub fn is_valid_uuid_value(value: &Value) -> bool {
    value.as_str().is_some_and(is_valid_uuid)
}

/// True iff `value` contains at least one character
pub fn is_non_empty_string(value: &str) -> bool {
    !value.is_empty()
}

pub fn is_non_empty_array<T>(values: &[T]) -> bool {
    !values.is_empty()
}

/// True iff `values` is non-empty and every element satisfies `predicate`
pub fn validate_non_empty_array<T>(values: &[T], predicate: impl Fn(&T) -> bool) -> bool {
    !values.is_empty() && values.iter().all(predicate)
}

/// Same as [`validate_non_empty_array`], for arbitrary JSON
///
/// Anything that is not an array (including `null`) fails.
pub fn validate_non_empty_values(value: &Value, predicate: impl Fn(&Value) -> bool) -> bool {
    value
        .as_array()
        .is_some_and(|values| validate_non_empty_array(values, |v| predicate(v)))
}

pub fn is_valid_uuid_array<S: AsRef<str>>(values: &[S]) -> bool {
    validate_non_empty_array(values, |v| is_valid_uuid(v.as_ref()))
}

pub fn is_non_empty_string_array<S: AsRef<str>>(values: &[S]) -> bool {
    validate_non_empty_array(values, |v| is_non_empty_string(v.as_ref()))
}

/// True iff `value` has the `namespace.name` form
///
/// Both parts must be non-empty and free of whitespace and further dots.
pub fn is_valid_fqn(value: &str) -> bool {
    fn is_part(part: &str) -> bool {
        !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '.')
    }

    match value.split_once('.') {
        Some((namespace, name)) => is_part(namespace) && is_part(name),
        None => false,
    }
}

pub fn is_valid_fqn_array<S: AsRef<str>>(values: &[S]) -> bool {
    validate_non_empty_array(values, |v| is_valid_fqn(v.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === is_valid_uuid() ===

    #[test]
    fn test_uuid_accepts_versions_one_to_five() {
        for uuid in [
            "ec6865e6-e60e-11e7-80c1-9a214cf093ae",
            "0c8be4b7-0bd5-2b1c-9ba5-1a8f05f7b7d1",
            "69682f1e-6039-34da-8342-522395b43738",
            "69682f1e-6039-44da-8342-522395b43738",
            "74b4b0d7-b73c-5b14-b1d2-3c8d2d4e2f11",
        ] {
            assert!(is_valid_uuid(uuid), "{uuid} should be valid");
        }
    }

    #[test]
    fn test_uuid_is_case_insensitive() {
        assert!(is_valid_uuid("69682F1E-6039-44DA-8342-522395B43738"));
    }

    #[test]
    fn test_uuid_accepts_nil() {
        assert!(is_valid_uuid(NIL_UUID));
    }

    #[test]
    fn test_uuid_rejects_malformed() {
        assert!(!is_valid_uuid(""));
        assert!(!is_valid_uuid("not-a-uuid"));
        assert!(!is_valid_uuid("69682f1e603944da8342522395b43738"));
        assert!(!is_valid_uuid("69682f1e-6039-44da-8342-522395b4373"));
        assert!(!is_valid_uuid("69682f1e-6039-44da-8342-522395b437380"));
        assert!(!is_valid_uuid("{69682f1e-6039-44da-8342-522395b43738}"));
    }

    #[test]
    fn test_uuid_rejects_bad_version_and_variant() {
        assert!(!is_valid_uuid("69682f1e-6039-64da-8342-522395b43738"));
        assert!(!is_valid_uuid("69682f1e-6039-44da-c342-522395b43738"));
    }

    #[test]
    fn test_uuid_value_rejects_non_strings() {
        assert!(is_valid_uuid_value(&json!("69682f1e-6039-44da-8342-522395b43738")));
        assert!(!is_valid_uuid_value(&json!(null)));
        assert!(!is_valid_uuid_value(&json!(42)));
        assert!(!is_valid_uuid_value(&json!(["69682f1e-6039-44da-8342-522395b43738"])));
    }

    // === arrays ===

    #[test]
    fn test_validate_non_empty_array() {
        let empty: [i32; 0] = [];
        assert!(!validate_non_empty_array(&empty, |_| true));
        assert!(validate_non_empty_array(&[1, 2, 3], |n| *n > 0));
        assert!(!validate_non_empty_array(&[1, -2, 3], |n| *n > 0));
    }

    #[test]
    fn test_validate_non_empty_values_rejects_non_arrays() {
        assert!(!validate_non_empty_values(&json!(null), |_| true));
        assert!(!validate_non_empty_values(&json!("a"), |_| true));
        assert!(!validate_non_empty_values(&json!({}), |_| true));
        assert!(!validate_non_empty_values(&json!([]), |_| true));
        assert!(validate_non_empty_values(&json!(["a"]), |v| v.is_string()));
    }

    #[test]
    fn test_uuid_array() {
        assert!(is_valid_uuid_array(&["69682f1e-6039-44da-8342-522395b43738"]));
        assert!(!is_valid_uuid_array::<&str>(&[]));
        assert!(!is_valid_uuid_array(&[
            "69682f1e-6039-44da-8342-522395b43738",
            "invalid"
        ]));
    }

    #[test]
    fn test_non_empty_string_array() {
        assert!(is_non_empty_string_array(&["a", "b"]));
        assert!(!is_non_empty_string_array(&["a", ""]));
        assert!(!is_non_empty_string_array::<String>(&[]));
    }

    // === is_valid_fqn() ===

    #[test]
    fn test_fqn() {
        assert!(is_valid_fqn("general.person"));
        assert!(!is_valid_fqn("general"));
        assert!(!is_valid_fqn(".person"));
        assert!(!is_valid_fqn("general."));
        assert!(!is_valid_fqn("general.per son"));
        assert!(!is_valid_fqn("a.b.c"));
    }

    #[test]
    fn test_fqn_array() {
        assert!(is_valid_fqn_array(&["a.b", "c.d"]));
        assert!(!is_valid_fqn_array(&["a.b", "cd"]));
    }
}
