//! EntityDataModelApi: schemas, entity types, property types, association
//! types and entity sets

use crate::api::ApiContext;
use crate::core::error::Result;
use crate::models::{
    AssociationType, EntitySet, EntityType, FullyQualifiedName, Model, PropertyType, Schema,
};
use indexmap::IndexMap;
use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

const ASSOCIATION_TYPE_PATH: &str = "association/type";
const ENTITY_SET_PATH: &str = "entity/set";
const ENTITY_TYPE_PATH: &str = "entity/type";
const IDS_PATH: &str = "ids";
const PROPERTY_TYPE_PATH: &str = "property/type";
const SCHEMA_PATH: &str = "schema";

#[derive(Clone)]
pub struct EntityDataModelApi {
    ctx: ApiContext,
}

impl EntityDataModelApi {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// The whole data model: namespaces, schemas, entity, association and property types
    pub async fn get_entity_data_model(&self) -> Result<Value> {
        let request = self.ctx.request(Method::GET, "");
        self.ctx.send(request).await
    }

    // =========================================================================
    // Schemas
    // =========================================================================

    pub async fn get_schema(&self, fqn: &FullyQualifiedName) -> Result<Schema> {
        let request = self
            .ctx
            .request(Method::GET, SCHEMA_PATH)
            .segment(fqn.namespace())
            .segment(fqn.name());
        self.ctx.send(request).await
    }

    pub async fn get_all_schemas(&self) -> Result<Vec<Schema>> {
        let request = self.ctx.request(Method::GET, SCHEMA_PATH);
        self.ctx.send(request).await
    }

    pub async fn get_all_schemas_in_namespace(&self, namespace: &str) -> Result<Vec<Schema>> {
        self.ctx.check_non_empty("namespace", namespace)?;

        let request = self
            .ctx
            .request(Method::GET, SCHEMA_PATH)
            .segment(namespace);
        self.ctx.send(request).await
    }

    pub async fn create_schema(&self, schema: &Schema) -> Result<()> {
        let request = self
            .ctx
            .request(Method::POST, SCHEMA_PATH)
            .json(schema.to_plain_record());
        self.ctx.send_discarding(request).await
    }

    // =========================================================================
    // Entity sets
    // =========================================================================

    pub async fn get_entity_set(&self, entity_set_id: &str) -> Result<EntitySet> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;

        let request = self
            .ctx
            .request(Method::GET, ENTITY_SET_PATH)
            .segment(entity_set_id);
        self.ctx.send(request).await
    }

    pub async fn get_all_entity_sets(&self) -> Result<Vec<EntitySet>> {
        let request = self.ctx.request(Method::GET, ENTITY_SET_PATH);
        self.ctx.send(request).await
    }

    pub async fn get_entity_set_id(&self, entity_set_name: &str) -> Result<Uuid> {
        self.ctx.check_non_empty("entitySetName", entity_set_name)?;

        let request = self
            .ctx
            .request(Method::GET, IDS_PATH)
            .route(ENTITY_SET_PATH)
            .segment(entity_set_name);
        self.ctx.send(request).await
    }

    /// Resolves with the new ids keyed by entity set name
    pub async fn create_entity_sets(&self, entity_sets: &[EntitySet]) -> Result<IndexMap<String, Uuid>> {
        if entity_sets.is_empty() {
            return Err(self
                .ctx
                .invalid("entitySets must be a non-empty array of valid EntitySets"));
        }

        let body = Value::Array(entity_sets.iter().map(Model::to_plain_record).collect());
        let request = self.ctx.request(Method::POST, ENTITY_SET_PATH).json(body);
        self.ctx.send(request).await
    }

    pub async fn delete_entity_set(&self, entity_set_id: &str) -> Result<()> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;

        let request = self
            .ctx
            .request(Method::DELETE, ENTITY_SET_PATH)
            .segment(entity_set_id);
        self.ctx.send_discarding(request).await
    }

    // =========================================================================
    // Entity types
    // =========================================================================

    pub async fn get_entity_type(&self, entity_type_id: &str) -> Result<EntityType> {
        self.ctx.check_uuid("entityTypeId", entity_type_id)?;

        let request = self
            .ctx
            .request(Method::GET, ENTITY_TYPE_PATH)
            .segment(entity_type_id);
        self.ctx.send(request).await
    }

    pub async fn get_all_entity_types(&self) -> Result<Vec<EntityType>> {
        let request = self.ctx.request(Method::GET, ENTITY_TYPE_PATH);
        self.ctx.send(request).await
    }

    pub async fn get_entity_type_id(&self, fqn: &FullyQualifiedName) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::GET, IDS_PATH)
            .route(ENTITY_TYPE_PATH)
            .segment(fqn.namespace())
            .segment(fqn.name());
        self.ctx.send(request).await
    }

    pub async fn create_entity_type(&self, entity_type: &EntityType) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::POST, ENTITY_TYPE_PATH)
            .json(entity_type.to_plain_record());
        self.ctx.send(request).await
    }

    pub async fn delete_entity_type(&self, entity_type_id: &str) -> Result<()> {
        self.ctx.check_uuid("entityTypeId", entity_type_id)?;

        let request = self
            .ctx
            .request(Method::DELETE, ENTITY_TYPE_PATH)
            .segment(entity_type_id);
        self.ctx.send_discarding(request).await
    }

    pub async fn add_property_type_to_entity_type(
        &self,
        entity_type_id: &str,
        property_type_id: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("entityTypeId", entity_type_id)?;
        self.ctx.check_uuid("propertyTypeId", property_type_id)?;

        let request = self
            .ctx
            .request(Method::PUT, ENTITY_TYPE_PATH)
            .segment(entity_type_id)
            .segment(property_type_id);
        self.ctx.send_discarding(request).await
    }

    pub async fn remove_property_type_from_entity_type(
        &self,
        entity_type_id: &str,
        property_type_id: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("entityTypeId", entity_type_id)?;
        self.ctx.check_uuid("propertyTypeId", property_type_id)?;

        let request = self
            .ctx
            .request(Method::DELETE, ENTITY_TYPE_PATH)
            .segment(entity_type_id)
            .segment(property_type_id);
        self.ctx.send_discarding(request).await
    }

    // =========================================================================
    // Property types
    // =========================================================================

    pub async fn get_property_type(&self, property_type_id: &str) -> Result<PropertyType> {
        self.ctx.check_uuid("propertyTypeId", property_type_id)?;

        let request = self
            .ctx
            .request(Method::GET, PROPERTY_TYPE_PATH)
            .segment(property_type_id);
        self.ctx.send(request).await
    }

    pub async fn get_all_property_types(&self) -> Result<Vec<PropertyType>> {
        let request = self.ctx.request(Method::GET, PROPERTY_TYPE_PATH);
        self.ctx.send(request).await
    }

    pub async fn get_property_type_id(&self, fqn: &FullyQualifiedName) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::GET, IDS_PATH)
            .route(PROPERTY_TYPE_PATH)
            .segment(fqn.namespace())
            .segment(fqn.name());
        self.ctx.send(request).await
    }

    pub async fn create_property_type(&self, property_type: &PropertyType) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::POST, PROPERTY_TYPE_PATH)
            .json(property_type.to_plain_record());
        self.ctx.send(request).await
    }

    pub async fn delete_property_type(&self, property_type_id: &str) -> Result<()> {
        self.ctx.check_uuid("propertyTypeId", property_type_id)?;

        let request = self
            .ctx
            .request(Method::DELETE, PROPERTY_TYPE_PATH)
            .segment(property_type_id);
        self.ctx.send_discarding(request).await
    }

    // =========================================================================
    // Association types
    // =========================================================================

    pub async fn get_association_type(&self, association_type_id: &str) -> Result<AssociationType> {
        self.ctx.check_uuid("associationTypeId", association_type_id)?;

        let request = self
            .ctx
            .request(Method::GET, ASSOCIATION_TYPE_PATH)
            .segment(association_type_id);
        self.ctx.send(request).await
    }

    pub async fn create_association_type(&self, association_type: &AssociationType) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::POST, ASSOCIATION_TYPE_PATH)
            .json(association_type.to_plain_record());
        self.ctx.send(request).await
    }
}
