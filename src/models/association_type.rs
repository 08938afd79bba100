use crate::core::error::ModelError;
use crate::models::{EntityType, Model, PlainRecord, parse_uuid_set, with_field};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// An entity type that connects entities of the `src` and `dst` entity types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationType {
    pub entity_type: EntityType,
    pub src: IndexSet<Uuid>,
    pub dst: IndexSet<Uuid>,
    pub bidirectional: bool,
}

impl AssociationType {
    pub fn builder() -> AssociationTypeBuilder {
        AssociationTypeBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssociationTypeBuilder {
    entity_type: Option<EntityType>,
    src: Option<IndexSet<Uuid>>,
    dst: Option<IndexSet<Uuid>>,
    bidirectional: Option<bool>,
}

impl AssociationTypeBuilder {
    pub fn set_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    pub fn set_source_entity_type_ids<I, S>(mut self, src: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let src: Vec<S> = src.into_iter().collect();
        if !src.is_empty() {
            self.src = Some(parse_uuid_set("src", src)?);
        }
        Ok(self)
    }

    pub fn set_destination_entity_type_ids<I, S>(mut self, dst: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dst: Vec<S> = dst.into_iter().collect();
        if !dst.is_empty() {
            self.dst = Some(parse_uuid_set("dst", dst)?);
        }
        Ok(self)
    }

    pub fn set_bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = Some(bidirectional);
        self
    }

    pub fn build(self) -> Result<AssociationType, ModelError> {
        Ok(AssociationType {
            entity_type: self.entity_type.ok_or(ModelError::missing("entityType"))?,
            src: self.src.unwrap_or_default(),
            dst: self.dst.unwrap_or_default(),
            bidirectional: self.bidirectional.ok_or(ModelError::missing("bidirectional"))?,
        })
    }
}

impl Model for AssociationType {
    type Builder = AssociationTypeBuilder;
    const NAME: &'static str = "AssociationType";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = AssociationTypeBuilder::default();
        let builder = with_field(builder, record.strs("src")?, |b, v| {
            b.set_source_entity_type_ids(v)
        })?;
        let mut builder = with_field(builder, record.strs("dst")?, |b, v| {
            b.set_destination_entity_type_ids(v)
        })?;
        if let Some(entity_type) = record.model("entityType")? {
            builder = builder.set_entity_type(entity_type);
        }
        if let Some(bidirectional) = record.bool("bidirectional")? {
            builder = builder.set_bidirectional(bidirectional);
        }
        builder.build()
    }

    fn to_builder(&self) -> AssociationTypeBuilder {
        AssociationTypeBuilder {
            entity_type: Some(self.entity_type.clone()),
            src: Some(self.src.clone()),
            dst: Some(self.dst.clone()),
            bidirectional: Some(self.bidirectional),
        }
    }
}

impl_model_deserialize!(AssociationType);
model_predicates!(AssociationType => is_valid_association_type);
