use crate::core::error::ModelError;
use crate::models::{EntityType, FullyQualifiedName, Model, PlainRecord, PropertyType};
use crate::{impl_model_deserialize, model_predicates};
use serde::Serialize;
use serde_json::Value;

/// A named grouping of entity types and property types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub fqn: FullyQualifiedName,
    pub entity_types: Vec<EntityType>,
    pub property_types: Vec<PropertyType>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fqn: Option<FullyQualifiedName>,
    entity_types: Option<Vec<EntityType>>,
    property_types: Option<Vec<PropertyType>>,
}

impl SchemaBuilder {
    pub fn set_fqn(mut self, fqn: FullyQualifiedName) -> Self {
        self.fqn = Some(fqn);
        self
    }

    pub fn set_entity_types(mut self, entity_types: impl IntoIterator<Item = EntityType>) -> Self {
        let entity_types: Vec<_> = entity_types.into_iter().collect();
        if !entity_types.is_empty() {
            self.entity_types = Some(entity_types);
        }
        self
    }

    pub fn set_property_types(
        mut self,
        property_types: impl IntoIterator<Item = PropertyType>,
    ) -> Self {
        let property_types: Vec<_> = property_types.into_iter().collect();
        if !property_types.is_empty() {
            self.property_types = Some(property_types);
        }
        self
    }

    pub fn build(self) -> Result<Schema, ModelError> {
        Ok(Schema {
            fqn: self.fqn.ok_or(ModelError::missing("fqn"))?,
            entity_types: self.entity_types.unwrap_or_default(),
            property_types: self.property_types.unwrap_or_default(),
        })
    }
}

impl Model for Schema {
    type Builder = SchemaBuilder;
    const NAME: &'static str = "Schema";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = SchemaBuilder::default();
        if let Some(fqn) = record.fqn("fqn")? {
            builder = builder.set_fqn(fqn);
        }
        if let Some(entity_types) = record.models::<EntityType>("entityTypes")? {
            builder = builder.set_entity_types(entity_types);
        }
        if let Some(property_types) = record.models::<PropertyType>("propertyTypes")? {
            builder = builder.set_property_types(property_types);
        }
        builder.build()
    }

    fn to_builder(&self) -> SchemaBuilder {
        SchemaBuilder {
            fqn: Some(self.fqn.clone()),
            entity_types: Some(self.entity_types.clone()),
            property_types: Some(self.property_types.clone()),
        }
    }
}

impl_model_deserialize!(Schema);
model_predicates!(Schema => is_valid_schema);
