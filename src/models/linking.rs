//! Linking models
//!
//! A linking entity type merges several entity types into one; a linking
//! entity set declares which property types must match across the entity
//! sets being linked.

use crate::core::error::ModelError;
use crate::impl_model_deserialize;
use crate::models::{
    EntitySet, EntityType, Model, PlainRecord, parse_uuid, parse_uuid_set, with_field,
};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// LinkingEntityType
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkingEntityType {
    pub entity_type: EntityType,
    pub entity_type_ids: IndexSet<Uuid>,
    pub deidentified: bool,
}

impl LinkingEntityType {
    pub fn builder() -> LinkingEntityTypeBuilder {
        LinkingEntityTypeBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinkingEntityTypeBuilder {
    entity_type: Option<EntityType>,
    entity_type_ids: Option<IndexSet<Uuid>>,
    deidentified: Option<bool>,
}

impl LinkingEntityTypeBuilder {
    pub fn set_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// Ids of the entity types being linked; must not be empty
    pub fn set_entity_type_ids<I, S>(mut self, entity_type_ids: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entity_type_ids = Some(parse_uuid_set("entityTypeIds", entity_type_ids)?);
        Ok(self)
    }

    pub fn set_deidentified(mut self, deidentified: bool) -> Self {
        self.deidentified = Some(deidentified);
        self
    }

    pub fn build(self) -> Result<LinkingEntityType, ModelError> {
        Ok(LinkingEntityType {
            entity_type: self.entity_type.ok_or(ModelError::missing("entityType"))?,
            entity_type_ids: self
                .entity_type_ids
                .ok_or(ModelError::missing("entityTypeIds"))?,
            deidentified: self.deidentified.unwrap_or(false),
        })
    }
}

impl Model for LinkingEntityType {
    type Builder = LinkingEntityTypeBuilder;
    const NAME: &'static str = "LinkingEntityType";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = with_field(
            LinkingEntityTypeBuilder::default(),
            record.strs("entityTypeIds")?,
            |b, ids| b.set_entity_type_ids(ids),
        )?;
        if let Some(entity_type) = record.model("entityType")? {
            builder = builder.set_entity_type(entity_type);
        }
        if let Some(deidentified) = record.bool("deidentified")? {
            builder = builder.set_deidentified(deidentified);
        }
        builder.build()
    }

    fn to_builder(&self) -> LinkingEntityTypeBuilder {
        LinkingEntityTypeBuilder {
            entity_type: Some(self.entity_type.clone()),
            entity_type_ids: Some(self.entity_type_ids.clone()),
            deidentified: Some(self.deidentified),
        }
    }
}

impl_model_deserialize!(LinkingEntityType);

// =============================================================================
// LinkingEntitySet
// =============================================================================

/// Property-type pairs that must agree for entities to be linked
pub type LinkingProperties = IndexMap<Uuid, Uuid>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkingEntitySet {
    pub entity_set: EntitySet,
    pub linking_properties: Vec<LinkingProperties>,
}

impl LinkingEntitySet {
    pub fn builder() -> LinkingEntitySetBuilder {
        LinkingEntitySetBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinkingEntitySetBuilder {
    entity_set: Option<EntitySet>,
    linking_properties: Option<Vec<LinkingProperties>>,
}

impl LinkingEntitySetBuilder {
    pub fn set_entity_set(mut self, entity_set: EntitySet) -> Self {
        self.entity_set = Some(entity_set);
        self
    }

    /// Must contain at least one non-empty mapping
    pub fn set_linking_properties(
        mut self,
        linking_properties: impl IntoIterator<Item = LinkingProperties>,
    ) -> Result<Self, ModelError> {
        let linking_properties: Vec<_> = linking_properties.into_iter().collect();
        if linking_properties.is_empty() || linking_properties.iter().any(IndexMap::is_empty) {
            return Err(ModelError::invalid(
                "linkingProperties",
                "must be a non-empty array of non-empty maps",
            ));
        }
        self.linking_properties = Some(linking_properties);
        Ok(self)
    }

    pub fn build(self) -> Result<LinkingEntitySet, ModelError> {
        Ok(LinkingEntitySet {
            entity_set: self.entity_set.ok_or(ModelError::missing("entitySet"))?,
            linking_properties: self
                .linking_properties
                .ok_or(ModelError::missing("linkingProperties"))?,
        })
    }
}

impl Model for LinkingEntitySet {
    type Builder = LinkingEntitySetBuilder;
    const NAME: &'static str = "LinkingEntitySet";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let linking_properties = record
            .array("linkingProperties")?
            .map(|maps| maps.iter().map(parse_linking_properties).collect::<Result<Vec<_>, _>>())
            .transpose()?;
        let mut builder = with_field(
            LinkingEntitySetBuilder::default(),
            linking_properties,
            |b, v| b.set_linking_properties(v),
        )?;
        if let Some(entity_set) = record.model("entitySet")? {
            builder = builder.set_entity_set(entity_set);
        }
        builder.build()
    }

    fn to_builder(&self) -> LinkingEntitySetBuilder {
        LinkingEntitySetBuilder {
            entity_set: Some(self.entity_set.clone()),
            linking_properties: Some(self.linking_properties.clone()),
        }
    }
}

fn parse_linking_properties(value: &Value) -> Result<LinkingProperties, ModelError> {
    let map = value.as_object().ok_or_else(|| {
        ModelError::invalid("linkingProperties", "must be an array of id to id maps")
    })?;
    map.iter()
        .map(|(from, to)| {
            let to = to.as_str().unwrap_or_default();
            Ok((
                parse_uuid("linkingProperties", from)?,
                parse_uuid("linkingProperties", to)?,
            ))
        })
        .collect()
}

impl_model_deserialize!(LinkingEntitySet);
