use crate::core::error::ModelError;
use crate::models::{
    Model, PlainRecord, non_empty_string, non_empty_string_set, parse_uuid, with_field,
};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A named collection of entities of one entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub entity_type_id: Uuid,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub contacts: IndexSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,
}

impl EntitySet {
    pub fn builder() -> EntitySetBuilder {
        EntitySetBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntitySetBuilder {
    id: Option<Uuid>,
    entity_type_id: Option<Uuid>,
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    contacts: Option<IndexSet<String>>,
    organization_id: Option<Uuid>,
}

impl EntitySetBuilder {
    pub fn set_id(mut self, id: &str) -> Result<Self, ModelError> {
        if !id.is_empty() {
            self.id = Some(parse_uuid("id", id)?);
        }
        Ok(self)
    }

    pub fn set_entity_type_id(mut self, entity_type_id: &str) -> Result<Self, ModelError> {
        self.entity_type_id = Some(parse_uuid("entityTypeId", entity_type_id)?);
        Ok(self)
    }

    pub fn set_name(mut self, name: &str) -> Result<Self, ModelError> {
        self.name = Some(non_empty_string("name", name)?);
        Ok(self)
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

    pub fn set_contacts<I, S>(mut self, contacts: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let contacts: Vec<S> = contacts.into_iter().collect();
        if !contacts.is_empty() {
            self.contacts = Some(non_empty_string_set("contacts", contacts)?);
        }
        Ok(self)
    }

    pub fn set_organization_id(mut self, organization_id: &str) -> Result<Self, ModelError> {
        if !organization_id.is_empty() {
            self.organization_id = Some(parse_uuid("organizationId", organization_id)?);
        }
        Ok(self)
    }

    pub fn build(self) -> Result<EntitySet, ModelError> {
        Ok(EntitySet {
            id: self.id,
            entity_type_id: self
                .entity_type_id
                .ok_or(ModelError::missing("entityTypeId"))?,
            name: self.name.ok_or(ModelError::missing("name"))?,
            title: self.title.ok_or(ModelError::missing("title"))?,
            description: self.description,
            contacts: self.contacts.unwrap_or_default(),
            organization_id: self.organization_id,
        })
    }
}

impl Model for EntitySet {
    type Builder = EntitySetBuilder;
    const NAME: &'static str = "EntitySet";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = EntitySetBuilder::default();
        let builder = with_field(builder, record.str("id")?, EntitySetBuilder::set_id)?;
        let builder = with_field(
            builder,
            record.str("entityTypeId")?,
            EntitySetBuilder::set_entity_type_id,
        )?;
        let builder = with_field(builder, record.str("name")?, EntitySetBuilder::set_name)?;
        let builder = with_field(builder, record.str("title")?, EntitySetBuilder::set_title)?;
        let builder = with_field(
            builder,
            record.str("description")?,
            EntitySetBuilder::set_description,
        )?;
        let builder = with_field(builder, record.strs("contacts")?, |b, v| b.set_contacts(v))?;
        with_field(
            builder,
            record.str("organizationId")?,
            EntitySetBuilder::set_organization_id,
        )?
        .build()
    }

    fn to_builder(&self) -> EntitySetBuilder {
        EntitySetBuilder {
            id: self.id,
            entity_type_id: Some(self.entity_type_id),
            name: Some(self.name.clone()),
            title: Some(self.title.clone()),
            description: self.description.clone(),
            contacts: Some(self.contacts.clone()),
            organization_id: self.organization_id,
        }
    }
}

impl_model_deserialize!(EntitySet);
model_predicates!(EntitySet => is_valid_entity_set, is_valid_entity_set_array);
