//! Request and response models
//!
//! Every model is an immutable, validated record produced by a builder.
//! Builders expose one `set_*` method per field:
//!
//! - optional setters ignore empty input and reject invalid input
//! - required setters reject empty or invalid input
//! - `build()` fails with [`ModelError::MissingProperty`] when a required
//!   field was never set, and fills empty defaults for optional collections
//!
//! A model can be obtained two ways: from a plain JSON record (a wire payload
//! or a hand-written literal) through [`Model::from_plain_record`], or from an
//! already-built instance through [`Model::to_builder`]. Set-like fields are
//! kept in insertion order with duplicates dropped, so request bodies are
//! deterministic.

pub mod macros;

pub mod access_check;
pub mod ace;
pub mod acl;
pub mod acl_data;
pub mod app;
pub mod association_type;
pub mod data_graph;
pub mod entity_set;
pub mod entity_type;
pub mod fqn;
pub mod linking;
pub mod organization;
pub mod principal;
pub mod property_type;
pub mod request;
pub mod role;
pub mod schema;
pub mod types;

pub use access_check::{AccessCheck, AccessCheckBuilder, Authorization};
pub use ace::{Ace, AceBuilder};
pub use acl::{Acl, AclBuilder};
pub use acl_data::{AclData, AclDataBuilder};
pub use app::{App, AppBuilder, AppType, AppTypeBuilder};
pub use association_type::{AssociationType, AssociationTypeBuilder};
pub use data_graph::{
    DataAssociation, DataAssociationBuilder, DataEdgeKey, DataEdgeKeyBuilder, DataGraph,
    DataGraphBuilder, EntityDataKey, EntityDataKeyBuilder, PropertyValues,
};
pub use entity_set::{EntitySet, EntitySetBuilder};
pub use entity_type::{EntityType, EntityTypeBuilder};
pub use fqn::FullyQualifiedName;
pub use linking::{
    LinkingEntitySet, LinkingEntitySetBuilder, LinkingEntityType, LinkingEntityTypeBuilder,
};
pub use organization::{Organization, OrganizationBuilder};
pub use principal::{Principal, PrincipalBuilder};
pub use property_type::{PropertyType, PropertyTypeBuilder};
pub use request::{Request, RequestBuilder, RequestStatus, RequestStatusBuilder};
pub use role::{Role, RoleBuilder};
pub use schema::{Schema, SchemaBuilder};
pub use types::{
    ActionType, AnalyzerType, DeleteType, FileType, IndexType, PermissionType, PrincipalType,
    RequestStateType, SecurableType, UpdateType,
};

use crate::core::error::ModelError;
use crate::core::validation::is_valid_uuid;
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use uuid::Uuid;

/// Common surface of every model
pub trait Model: Sized + Serialize {
    /// Builder producing this model
    type Builder: Default;

    /// Model name used in log lines and errors
    const NAME: &'static str;

    /// Build the model from a plain JSON record, validating every field
    ///
    /// Unknown fields are ignored; `null` counts as absent.
    fn from_plain_record(value: &Value) -> Result<Self, ModelError>;

    /// Canonical wire form of the model
    fn to_plain_record(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Builder pre-loaded with this model's fields
    fn to_builder(&self) -> Self::Builder;
}

/// True iff `value` builds into a valid `M`
///
/// Construction errors are logged and swallowed; `null` and non-objects are
/// never valid.
pub fn is_valid<M: Model>(value: &Value) -> bool {
    match M::from_plain_record(value) {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(model = M::NAME, error = %e, "invalid {}", M::NAME);
            false
        }
    }
}

// =============================================================================
// Plain record access
// =============================================================================

/// Typed, read-only view over a plain JSON object
///
/// Every getter returns `Ok(None)` when the field is absent or `null` and an
/// error naming the field when it is present with the wrong shape.
pub(crate) struct PlainRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> PlainRecord<'a> {
    pub fn new(model: &'static str, value: &'a Value) -> Result<Self, ModelError> {
        match value.as_object() {
            Some(fields) => Ok(Self { fields }),
            None => Err(ModelError::NotAnObject { model }),
        }
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn str(&self, field: &'static str) -> Result<Option<&'a str>, ModelError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ModelError::invalid(field, "must be a string")),
        }
    }

    pub fn strs(&self, field: &'static str) -> Result<Option<Vec<&'a str>>, ModelError> {
        match self.array(field)? {
            None => Ok(None),
            Some(values) => values
                .iter()
                .map(|v| {
                    v.as_str()
                        .ok_or_else(|| ModelError::invalid(field, "must be an array of strings"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
        }
    }

    pub fn bool(&self, field: &'static str) -> Result<Option<bool>, ModelError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(ModelError::invalid(field, "must be a boolean")),
        }
    }

    pub fn u32(&self, field: &'static str) -> Result<Option<u32>, ModelError> {
        match self.get(field) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| ModelError::invalid(field, "must be a non-negative integer")),
        }
    }

    pub fn array(&self, field: &'static str) -> Result<Option<&'a Vec<Value>>, ModelError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Array(values)) => Ok(Some(values)),
            Some(_) => Err(ModelError::invalid(field, "must be an array")),
        }
    }

    pub fn object(&self, field: &'static str) -> Result<Option<&'a Map<String, Value>>, ModelError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(ModelError::invalid(field, "must be an object")),
        }
    }

    /// Enumeration member parsed from its wire string
    pub fn parse<E>(&self, field: &'static str) -> Result<Option<E>, ModelError>
    where
        E: FromStr<Err = ModelError>,
    {
        self.str(field)?
            .map(|s| s.parse().map_err(|e: ModelError| relabel(field, e)))
            .transpose()
    }

    pub fn parse_all<E>(&self, field: &'static str) -> Result<Option<Vec<E>>, ModelError>
    where
        E: FromStr<Err = ModelError>,
    {
        match self.strs(field)? {
            None => Ok(None),
            Some(values) => values
                .into_iter()
                .map(|s| s.parse().map_err(|e: ModelError| relabel(field, e)))
                .collect::<Result<Vec<E>, _>>()
                .map(Some),
        }
    }

    pub fn fqn(&self, field: &'static str) -> Result<Option<FullyQualifiedName>, ModelError> {
        self.get(field)
            .map(|v| FullyQualifiedName::from_value(v).map_err(|e| relabel(field, e)))
            .transpose()
    }

    pub fn fqns(&self, field: &'static str) -> Result<Option<Vec<FullyQualifiedName>>, ModelError> {
        match self.array(field)? {
            None => Ok(None),
            Some(values) => values
                .iter()
                .map(|v| FullyQualifiedName::from_value(v).map_err(|e| relabel(field, e)))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
        }
    }

    /// Nested model built from its own plain record
    pub fn model<M: Model>(&self, field: &'static str) -> Result<Option<M>, ModelError> {
        self.get(field).map(M::from_plain_record).transpose()
    }

    pub fn models<M: Model>(&self, field: &'static str) -> Result<Option<Vec<M>>, ModelError> {
        match self.array(field)? {
            None => Ok(None),
            Some(values) => values
                .iter()
                .map(M::from_plain_record)
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
        }
    }
}

fn relabel(field: &'static str, error: ModelError) -> ModelError {
    match error {
        ModelError::InvalidParameter { reason, .. } => ModelError::InvalidParameter { field, reason },
        other => other,
    }
}

/// Applies `setter` when the record carries the field, otherwise leaves the builder alone
pub(crate) fn with_field<B, T>(
    builder: B,
    value: Option<T>,
    setter: impl FnOnce(B, T) -> Result<B, ModelError>,
) -> Result<B, ModelError> {
    match value {
        Some(v) => setter(builder, v),
        None => Ok(builder),
    }
}

// =============================================================================
// Field validation helpers shared by the builders
// =============================================================================

pub(crate) fn parse_uuid(field: &'static str, value: &str) -> Result<Uuid, ModelError> {
    if !is_valid_uuid(value) {
        return Err(ModelError::invalid(field, "must be a valid UUID"));
    }
    Uuid::parse_str(value).map_err(|_| ModelError::invalid(field, "must be a valid UUID"))
}

/// Parses every id into an ordered, deduplicated set
///
/// Fails when the input is empty or when any element is not a valid UUID.
pub(crate) fn parse_uuid_set<I, S>(field: &'static str, values: I) -> Result<IndexSet<Uuid>, ModelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set = values
        .into_iter()
        .map(|v| parse_uuid(field, v.as_ref()))
        .collect::<Result<IndexSet<_>, _>>()
        .map_err(|_| ModelError::invalid(field, "must be a non-empty array of valid UUIDs"))?;
    if set.is_empty() {
        return Err(ModelError::invalid(field, "must be a non-empty array of valid UUIDs"));
    }
    Ok(set)
}

pub(crate) fn non_empty_string(field: &'static str, value: &str) -> Result<String, ModelError> {
    if value.is_empty() {
        return Err(ModelError::invalid(field, "must be a non-empty string"));
    }
    Ok(value.to_string())
}

/// Ordered, deduplicated set of non-empty strings
pub(crate) fn non_empty_string_set<I, S>(
    field: &'static str,
    values: I,
) -> Result<IndexSet<String>, ModelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set = values
        .into_iter()
        .map(|v| {
            let v = v.as_ref();
            if v.is_empty() {
                Err(ModelError::invalid(field, "must be an array of non-empty strings"))
            } else {
                Ok(v.to_string())
            }
        })
        .collect::<Result<IndexSet<_>, _>>()?;
    if set.is_empty() {
        return Err(ModelError::invalid(field, "must be an array of non-empty strings"));
    }
    Ok(set)
}
