use crate::core::error::ModelError;
use crate::models::types::SecurableType;
use crate::models::{
    FullyQualifiedName, Model, PlainRecord, non_empty_string, non_empty_string_set, parse_uuid,
    parse_uuid_set, with_field,
};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Schema definition of a kind of entity
///
/// `key` lists the property types whose values identify an entity;
/// `properties` lists every property type the entity carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub fqn: FullyQualifiedName,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schemas: IndexSet<FullyQualifiedName>,
    pub key: IndexSet<Uuid>,
    pub properties: IndexSet<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<SecurableType>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub property_tags: IndexMap<Uuid, IndexSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shards: Option<u32>,
}

impl EntityType {
    pub fn builder() -> EntityTypeBuilder {
        EntityTypeBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityTypeBuilder {
    id: Option<Uuid>,
    fqn: Option<FullyQualifiedName>,
    title: Option<String>,
    description: Option<String>,
    schemas: Option<IndexSet<FullyQualifiedName>>,
    key: Option<IndexSet<Uuid>>,
    properties: Option<IndexSet<Uuid>>,
    base_type: Option<Uuid>,
    category: Option<SecurableType>,
    property_tags: Option<IndexMap<Uuid, IndexSet<String>>>,
    shards: Option<u32>,
}

impl EntityTypeBuilder {
    pub fn set_id(mut self, id: &str) -> Result<Self, ModelError> {
        if !id.is_empty() {
            self.id = Some(parse_uuid("id", id)?);
        }
        Ok(self)
    }

    pub fn set_type(mut self, fqn: FullyQualifiedName) -> Self {
        self.fqn = Some(fqn);
        self
    }

    pub fn set_title(mut self, title: &str) -> Result<Self, ModelError> {
        self.title = Some(non_empty_string("title", title)?);
        Ok(self)
    }

    pub fn set_description(mut self, description: &str) -> Result<Self, ModelError> {
        if !description.is_empty() {
            self.description = Some(description.to_string());
        }
        Ok(self)
    }

    pub fn set_schemas(mut self, schemas: impl IntoIterator<Item = FullyQualifiedName>) -> Self {
        let schemas: IndexSet<_> = schemas.into_iter().collect();
        if !schemas.is_empty() {
            self.schemas = Some(schemas);
        }
        self
    }

    pub fn set_key<I, S>(mut self, key: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key: Vec<S> = key.into_iter().collect();
        if !key.is_empty() {
            self.key = Some(parse_uuid_set("key", key)?);
        }
        Ok(self)
    }

    pub fn set_property_types<I, S>(mut self, property_types: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let property_types: Vec<S> = property_types.into_iter().collect();
        if !property_types.is_empty() {
            self.properties = Some(parse_uuid_set("properties", property_types)?);
        }
        Ok(self)
    }

    pub fn set_base_type(mut self, base_type: &str) -> Result<Self, ModelError> {
        if !base_type.is_empty() {
            self.base_type = Some(parse_uuid("baseType", base_type)?);
        }
        Ok(self)
    }

    pub fn set_category(mut self, category: SecurableType) -> Self {
        self.category = Some(category);
        self
    }

    /// Tags attached to individual property types of this entity type
    pub fn set_property_tags<I, T, S>(mut self, property_tags: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (S, T)>,
        T: IntoIterator,
        T::Item: AsRef<str>,
        S: AsRef<str>,
    {
        let mut tags = IndexMap::new();
        for (property_type_id, property_tags) in property_tags {
            let property_type_id = parse_uuid("propertyTags", property_type_id.as_ref())?;
            let property_tags: Vec<T::Item> = property_tags.into_iter().collect();
            let property_tags = if property_tags.is_empty() {
                IndexSet::new()
            } else {
                non_empty_string_set("propertyTags", property_tags)?
            };
            tags.insert(property_type_id, property_tags);
        }
        if !tags.is_empty() {
            self.property_tags = Some(tags);
        }
        Ok(self)
    }

    pub fn set_shards(mut self, shards: u32) -> Self {
        self.shards = Some(shards);
        self
    }

    pub fn build(self) -> Result<EntityType, ModelError> {
        Ok(EntityType {
            id: self.id,
            fqn: self.fqn.ok_or(ModelError::missing("type"))?,
            title: self.title.ok_or(ModelError::missing("title"))?,
            description: self.description,
            schemas: self.schemas.unwrap_or_default(),
            key: self.key.unwrap_or_default(),
            properties: self.properties.unwrap_or_default(),
            base_type: self.base_type,
            category: self.category,
            property_tags: self.property_tags.unwrap_or_default(),
            shards: self.shards,
        })
    }
}

impl Model for EntityType {
    type Builder = EntityTypeBuilder;
    const NAME: &'static str = "EntityType";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = EntityTypeBuilder::default();
        let builder = with_field(builder, record.str("id")?, EntityTypeBuilder::set_id)?;
        let builder = with_field(builder, record.str("title")?, EntityTypeBuilder::set_title)?;
        let builder = with_field(
            builder,
            record.str("description")?,
            EntityTypeBuilder::set_description,
        )?;
        let builder = with_field(builder, record.strs("key")?, |b, v| b.set_key(v))?;
        let builder = with_field(builder, record.strs("properties")?, |b, v| {
            b.set_property_types(v)
        })?;
        let builder = with_field(builder, record.str("baseType")?, EntityTypeBuilder::set_base_type)?;
        let mut builder = with_field(builder, record.object("propertyTags")?, |b, tags| {
            let invalid = || ModelError::invalid("propertyTags", "must map ids to arrays of strings");
            let tags = tags
                .iter()
                .map(|(id, values)| {
                    let values = values
                        .as_array()
                        .ok_or_else(invalid)?
                        .iter()
                        .map(|v| v.as_str().ok_or_else(invalid))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok((id.as_str(), values))
                })
                .collect::<Result<Vec<_>, ModelError>>()?;
            b.set_property_tags(tags)
        })?;
        if let Some(fqn) = record.fqn("type")? {
            builder = builder.set_type(fqn);
        }
        if let Some(schemas) = record.fqns("schemas")? {
            builder = builder.set_schemas(schemas);
        }
        if let Some(category) = record.parse("category")? {
            builder = builder.set_category(category);
        }
        if let Some(shards) = record.u32("shards")? {
            builder = builder.set_shards(shards);
        }
        builder.build()
    }

    fn to_builder(&self) -> EntityTypeBuilder {
        EntityTypeBuilder {
            id: self.id,
            fqn: Some(self.fqn.clone()),
            title: Some(self.title.clone()),
            description: self.description.clone(),
            schemas: Some(self.schemas.clone()),
            key: Some(self.key.clone()),
            properties: Some(self.properties.clone()),
            base_type: self.base_type,
            category: self.category,
            property_tags: Some(self.property_tags.clone()),
            shards: self.shards,
        }
    }
}

impl_model_deserialize!(EntityType);
model_predicates!(EntityType => is_valid_entity_type, is_valid_entity_type_array);
