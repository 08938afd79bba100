//! Entity keys, edges and data graphs
//!
//! A [`DataGraph`] creates entities and the associations between them in one
//! request. Associations point at their endpoints either by entity key id or
//! by position within the graph's own entity lists.

use crate::core::error::ModelError;
use crate::models::{Model, PlainRecord, parse_uuid, with_field};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Values of one entity, keyed by property type id
pub type PropertyValues = IndexMap<Uuid, Vec<Value>>;

// =============================================================================
// EntityDataKey
// =============================================================================

/// Address of one stored entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDataKey {
    pub entity_key_id: Uuid,
    pub entity_set_id: Uuid,
}

impl EntityDataKey {
    pub fn builder() -> EntityDataKeyBuilder {
        EntityDataKeyBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityDataKeyBuilder {
    entity_key_id: Option<Uuid>,
    entity_set_id: Option<Uuid>,
}

impl EntityDataKeyBuilder {
    pub fn set_entity_key_id(mut self, entity_key_id: &str) -> Result<Self, ModelError> {
        self.entity_key_id = Some(parse_uuid("entityKeyId", entity_key_id)?);
        Ok(self)
    }

    pub fn set_entity_set_id(mut self, entity_set_id: &str) -> Result<Self, ModelError> {
        self.entity_set_id = Some(parse_uuid("entitySetId", entity_set_id)?);
        Ok(self)
    }

    pub fn build(self) -> Result<EntityDataKey, ModelError> {
        Ok(EntityDataKey {
            entity_key_id: self
                .entity_key_id
                .ok_or(ModelError::missing("entityKeyId"))?,
            entity_set_id: self
                .entity_set_id
                .ok_or(ModelError::missing("entitySetId"))?,
        })
    }
}

impl Model for EntityDataKey {
    type Builder = EntityDataKeyBuilder;
    const NAME: &'static str = "EntityDataKey";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = with_field(
            EntityDataKeyBuilder::default(),
            record.str("entityKeyId")?,
            EntityDataKeyBuilder::set_entity_key_id,
        )?;
        let builder = with_field(
            builder,
            record.str("entitySetId")?,
            EntityDataKeyBuilder::set_entity_set_id,
        )?;
        builder.build()
    }

    fn to_builder(&self) -> EntityDataKeyBuilder {
        EntityDataKeyBuilder {
            entity_key_id: Some(self.entity_key_id),
            entity_set_id: Some(self.entity_set_id),
        }
    }
}

impl_model_deserialize!(EntityDataKey);
model_predicates!(EntityDataKey => is_valid_entity_data_key, is_valid_entity_data_key_array);

// =============================================================================
// DataEdgeKey
// =============================================================================

/// An association entity together with the two entities it connects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DataEdgeKey {
    pub src: EntityDataKey,
    pub dst: EntityDataKey,
    pub edge: EntityDataKey,
}

impl DataEdgeKey {
    pub fn builder() -> DataEdgeKeyBuilder {
        DataEdgeKeyBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataEdgeKeyBuilder {
    src: Option<EntityDataKey>,
    dst: Option<EntityDataKey>,
    edge: Option<EntityDataKey>,
}

impl DataEdgeKeyBuilder {
    pub fn set_src(mut self, src: EntityDataKey) -> Self {
        self.src = Some(src);
        self
    }

    pub fn set_dst(mut self, dst: EntityDataKey) -> Self {
        self.dst = Some(dst);
        self
    }

    pub fn set_edge(mut self, edge: EntityDataKey) -> Self {
        self.edge = Some(edge);
        self
    }

    pub fn build(self) -> Result<DataEdgeKey, ModelError> {
        Ok(DataEdgeKey {
            src: self.src.ok_or(ModelError::missing("src"))?,
            dst: self.dst.ok_or(ModelError::missing("dst"))?,
            edge: self.edge.ok_or(ModelError::missing("edge"))?,
        })
    }
}

impl Model for DataEdgeKey {
    type Builder = DataEdgeKeyBuilder;
    const NAME: &'static str = "DataEdgeKey";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = DataEdgeKeyBuilder::default();
        if let Some(src) = record.model("src")? {
            builder = builder.set_src(src);
        }
        if let Some(dst) = record.model("dst")? {
            builder = builder.set_dst(dst);
        }
        if let Some(edge) = record.model("edge")? {
            builder = builder.set_edge(edge);
        }
        builder.build()
    }

    fn to_builder(&self) -> DataEdgeKeyBuilder {
        DataEdgeKeyBuilder {
            src: Some(self.src),
            dst: Some(self.dst),
            edge: Some(self.edge),
        }
    }
}

impl_model_deserialize!(DataEdgeKey);
model_predicates!(DataEdgeKey => is_valid_data_edge_key, is_valid_data_edge_key_array);

// =============================================================================
// DataAssociation
// =============================================================================

/// An association to create, with endpoints given by key id or graph index
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAssociation {
    pub src_entity_set_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_entity_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_entity_key_id: Option<Uuid>,
    pub dst_entity_set_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_entity_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_entity_key_id: Option<Uuid>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub data: PropertyValues,
}

impl DataAssociation {
    pub fn builder() -> DataAssociationBuilder {
        DataAssociationBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataAssociationBuilder {
    src_entity_set_id: Option<Uuid>,
    src_entity_index: Option<u32>,
    src_entity_key_id: Option<Uuid>,
    dst_entity_set_id: Option<Uuid>,
    dst_entity_index: Option<u32>,
    dst_entity_key_id: Option<Uuid>,
    data: Option<PropertyValues>,
}

impl DataAssociationBuilder {
    pub fn set_src_entity_set_id(mut self, entity_set_id: &str) -> Result<Self, ModelError> {
        self.src_entity_set_id = Some(parse_uuid("srcEntitySetId", entity_set_id)?);
        Ok(self)
    }

    pub fn set_src_entity_index(mut self, index: u32) -> Self {
        self.src_entity_index = Some(index);
        self
    }

    pub fn set_src_entity_key_id(mut self, entity_key_id: &str) -> Result<Self, ModelError> {
        if !entity_key_id.is_empty() {
            self.src_entity_key_id = Some(parse_uuid("srcEntityKeyId", entity_key_id)?);
        }
        Ok(self)
    }

    pub fn set_dst_entity_set_id(mut self, entity_set_id: &str) -> Result<Self, ModelError> {
        self.dst_entity_set_id = Some(parse_uuid("dstEntitySetId", entity_set_id)?);
        Ok(self)
    }

    pub fn set_dst_entity_index(mut self, index: u32) -> Self {
        self.dst_entity_index = Some(index);
        self
    }

    pub fn set_dst_entity_key_id(mut self, entity_key_id: &str) -> Result<Self, ModelError> {
        if !entity_key_id.is_empty() {
            self.dst_entity_key_id = Some(parse_uuid("dstEntityKeyId", entity_key_id)?);
        }
        Ok(self)
    }

    pub fn set_data(mut self, data: PropertyValues) -> Self {
        if !data.is_empty() {
            self.data = Some(data);
        }
        self
    }

    /// Each endpoint needs an entity index, an entity key id, or both
    pub fn build(self) -> Result<DataAssociation, ModelError> {
        if self.src_entity_index.is_none() && self.src_entity_key_id.is_none() {
            return Err(ModelError::invalid(
                "src",
                "needs an entity index or an entity key id",
            ));
        }
        if self.dst_entity_index.is_none() && self.dst_entity_key_id.is_none() {
            return Err(ModelError::invalid(
                "dst",
                "needs an entity index or an entity key id",
            ));
        }
        Ok(DataAssociation {
            src_entity_set_id: self
                .src_entity_set_id
                .ok_or(ModelError::missing("srcEntitySetId"))?,
            src_entity_index: self.src_entity_index,
            src_entity_key_id: self.src_entity_key_id,
            dst_entity_set_id: self
                .dst_entity_set_id
                .ok_or(ModelError::missing("dstEntitySetId"))?,
            dst_entity_index: self.dst_entity_index,
            dst_entity_key_id: self.dst_entity_key_id,
            data: self.data.unwrap_or_default(),
        })
    }
}

impl Model for DataAssociation {
    type Builder = DataAssociationBuilder;
    const NAME: &'static str = "DataAssociation";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = DataAssociationBuilder::default();
        let builder = with_field(
            builder,
            record.str("srcEntitySetId")?,
            DataAssociationBuilder::set_src_entity_set_id,
        )?;
        let builder = with_field(
            builder,
            record.str("srcEntityKeyId")?,
            DataAssociationBuilder::set_src_entity_key_id,
        )?;
        let builder = with_field(
            builder,
            record.str("dstEntitySetId")?,
            DataAssociationBuilder::set_dst_entity_set_id,
        )?;
        let mut builder = with_field(
            builder,
            record.str("dstEntityKeyId")?,
            DataAssociationBuilder::set_dst_entity_key_id,
        )?;
        if let Some(index) = record.u32("srcEntityIndex")? {
            builder = builder.set_src_entity_index(index);
        }
        if let Some(index) = record.u32("dstEntityIndex")? {
            builder = builder.set_dst_entity_index(index);
        }
        if let Some(data) = record.get("data") {
            builder = builder.set_data(parse_property_values("data", data)?);
        }
        builder.build()
    }

    fn to_builder(&self) -> DataAssociationBuilder {
        DataAssociationBuilder {
            src_entity_set_id: Some(self.src_entity_set_id),
            src_entity_index: self.src_entity_index,
            src_entity_key_id: self.src_entity_key_id,
            dst_entity_set_id: Some(self.dst_entity_set_id),
            dst_entity_index: self.dst_entity_index,
            dst_entity_key_id: self.dst_entity_key_id,
            data: Some(self.data.clone()),
        }
    }
}

impl_model_deserialize!(DataAssociation);

// =============================================================================
// DataGraph
// =============================================================================

/// Entities and associations created together
///
/// `entities` and `associations` are keyed by entity set id. An association
/// endpoint given by index must name an entity present in `entities`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataGraph {
    pub entities: IndexMap<Uuid, Vec<PropertyValues>>,
    pub associations: IndexMap<Uuid, Vec<DataAssociation>>,
}

impl DataGraph {
    pub fn builder() -> DataGraphBuilder {
        DataGraphBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataGraphBuilder {
    entities: Option<IndexMap<Uuid, Vec<PropertyValues>>>,
    associations: Option<IndexMap<Uuid, Vec<DataAssociation>>>,
}

impl DataGraphBuilder {
    pub fn set_entities(mut self, entities: IndexMap<Uuid, Vec<PropertyValues>>) -> Self {
        if !entities.is_empty() {
            self.entities = Some(entities);
        }
        self
    }

    pub fn set_associations(mut self, associations: IndexMap<Uuid, Vec<DataAssociation>>) -> Self {
        if !associations.is_empty() {
            self.associations = Some(associations);
        }
        self
    }

    pub fn build(self) -> Result<DataGraph, ModelError> {
        let entities = self.entities.unwrap_or_default();
        let associations = self.associations.unwrap_or_default();
        if entities.is_empty() && associations.is_empty() {
            return Err(ModelError::invalid(
                "entities",
                "a data graph needs entities or associations",
            ));
        }

        let in_graph = |entity_set_id: &Uuid, index: Option<u32>| match index {
            None => true,
            Some(index) => entities
                .get(entity_set_id)
                .is_some_and(|list| (index as usize) < list.len()),
        };
        for association in associations.values().flatten() {
            if !in_graph(&association.src_entity_set_id, association.src_entity_index) {
                return Err(ModelError::invalid(
                    "associations",
                    "srcEntityIndex does not point at an entity in the graph",
                ));
            }
            if !in_graph(&association.dst_entity_set_id, association.dst_entity_index) {
                return Err(ModelError::invalid(
                    "associations",
                    "dstEntityIndex does not point at an entity in the graph",
                ));
            }
        }
        Ok(DataGraph {
            entities,
            associations,
        })
    }
}

impl Model for DataGraph {
    type Builder = DataGraphBuilder;
    const NAME: &'static str = "DataGraph";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = DataGraphBuilder::default();
        if let Some(entities) = record.object("entities")? {
            let entities = entities
                .iter()
                .map(|(entity_set_id, list)| {
                    let list = list
                        .as_array()
                        .ok_or_else(|| ModelError::invalid("entities", "must map ids to arrays"))?
                        .iter()
                        .map(|entity| parse_property_values("entities", entity))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok((parse_uuid("entities", entity_set_id)?, list))
                })
                .collect::<Result<IndexMap<_, _>, ModelError>>()?;
            builder = builder.set_entities(entities);
        }
        if let Some(associations) = record.object("associations")? {
            let associations = associations
                .iter()
                .map(|(entity_set_id, list)| {
                    let list = list
                        .as_array()
                        .ok_or_else(|| {
                            ModelError::invalid("associations", "must map ids to arrays")
                        })?
                        .iter()
                        .map(DataAssociation::from_plain_record)
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok((parse_uuid("associations", entity_set_id)?, list))
                })
                .collect::<Result<IndexMap<_, _>, ModelError>>()?;
            builder = builder.set_associations(associations);
        }
        builder.build()
    }

    fn to_builder(&self) -> DataGraphBuilder {
        DataGraphBuilder {
            entities: Some(self.entities.clone()),
            associations: Some(self.associations.clone()),
        }
    }
}

impl_model_deserialize!(DataGraph);
model_predicates!(DataGraph => is_valid_data_graph);

/// `{ propertyTypeId: [values] }` with at least one property
fn parse_property_values(field: &'static str, value: &Value) -> Result<PropertyValues, ModelError> {
    let map = value
        .as_object()
        .filter(|map| !map.is_empty())
        .ok_or_else(|| ModelError::invalid(field, "must be a non-empty object of value arrays"))?;
    map.iter()
        .map(|(property_type_id, values)| {
            let values = values
                .as_array()
                .ok_or_else(|| ModelError::invalid(field, "must map property type ids to arrays"))?;
            Ok((parse_uuid(field, property_type_id)?, values.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ENTITY_SET_ID: &str = "c92f4318-9f93-4f88-94c1-0ca5b3b278ab";
    const ASSOCIATION_SET_ID: &str = "a680a1d8-73fb-423c-abd2-fd71965693d2";
    const PROPERTY_TYPE_ID: &str = "6a74d45c-9451-4f88-b8c8-a0e27c08b2a2";

    fn graph(dst_index: u32) -> Value {
        json!({
            "entities": {
                ENTITY_SET_ID: [
                    { PROPERTY_TYPE_ID: ["value_1", "value_2"] },
                    { PROPERTY_TYPE_ID: ["value_3"] },
                ],
            },
            "associations": {
                ASSOCIATION_SET_ID: [{
                    "srcEntitySetId": ENTITY_SET_ID,
                    "srcEntityIndex": 0,
                    "dstEntitySetId": ENTITY_SET_ID,
                    "dstEntityIndex": dst_index,
                }],
            },
        })
    }

    #[test]
    fn test_graph_indexes_resolve() {
        let graph = DataGraph::from_plain_record(&graph(1)).unwrap();
        assert_eq!(graph.entities.values().next().unwrap().len(), 2);
        let association = &graph.associations.values().next().unwrap()[0];
        assert_eq!(association.dst_entity_index, Some(1));
        assert!(association.data.is_empty());
    }

    #[test]
    fn test_graph_rejects_dangling_index() {
        let err = DataGraph::from_plain_record(&graph(2)).unwrap_err();
        assert_eq!(err.field(), Some("associations"));
    }

    #[test]
    fn test_association_needs_an_endpoint() {
        let err = DataAssociation::builder()
            .set_src_entity_set_id(ENTITY_SET_ID)
            .unwrap()
            .set_dst_entity_set_id(ENTITY_SET_ID)
            .unwrap()
            .set_dst_entity_index(0)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("src"));
    }

    #[test]
    fn test_property_values_need_uuid_keys() {
        assert!(parse_property_values("data", &json!({ "name": ["x"] })).is_err());
        assert!(parse_property_values("data", &json!({})).is_err());
        assert!(parse_property_values("data", &json!({ PROPERTY_TYPE_ID: "x" })).is_err());
    }
}
