//! DataApi: reading and writing entity data

use crate::api::ApiContext;
use crate::config::ApiName;
use crate::core::error::Result;
use crate::core::validation::is_valid_uuid;
use crate::models::DataGraph;
use crate::models::types::{DeleteType, FileType, UpdateType};
use indexmap::IndexMap;
use reqwest::{Method, Url};
use serde_json::{Value, json};
use uuid::Uuid;

const ENTITY_DATA_PATH: &str = "entitydata";
const TICKET_PATH: &str = "ticket";
const SET_PATH: &str = "set";
const COUNT_PATH: &str = "count";

/// Property values of one entity, keyed by property type id
pub type Entity = IndexMap<String, Vec<Value>>;

/// Entities keyed by an id chosen by the caller (or the entity key id)
pub type EntityData = IndexMap<String, Entity>;

#[derive(Clone)]
pub struct DataApi {
    ctx: ApiContext,
}

impl DataApi {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Fetch the data of an entity set
    ///
    /// `sync_ids` and `property_type_ids` narrow the result; empty slices mean
    /// no filtering.
    pub async fn get_entity_set_data(
        &self,
        entity_set_id: &str,
        sync_ids: &[&str],
        property_type_ids: &[&str],
    ) -> Result<Value> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;
        if !sync_ids.iter().all(|id| is_valid_uuid(id)) {
            return Err(self.ctx.invalid("syncIds must be an array of valid UUIDs"));
        }
        self.ctx.check_optional_uuids("propertyTypeIds", property_type_ids)?;

        let request = self
            .ctx
            .request(Method::POST, ENTITY_DATA_PATH)
            .segment(entity_set_id)
            .json(json!({
                "syncIds": sync_ids,
                "properties": property_type_ids,
            }));
        self.ctx.send(request).await
    }

    /// Direct download URL for an entity set's data
    ///
    /// No request is made. Returns `None` when an argument is invalid or no
    /// auth token is configured, since the URL authenticates through its
    /// `token` query parameter.
    pub fn get_entity_set_data_file_url(&self, entity_set_id: &str, file_type: &str) -> Option<String> {
        if !is_valid_uuid(entity_set_id) {
            tracing::error!(api = %ApiName::Data, "invalid parameter: entitySetId must be a valid UUID");
            return None;
        }
        let Some(file_type) = FileType::lookup(file_type) else {
            tracing::error!(
                api = %ApiName::Data,
                file_type,
                "invalid parameter: fileType must be a valid file type string"
            );
            return None;
        };
        let Some(token) = self.ctx.config().auth_token() else {
            tracing::error!(api = %ApiName::Data, "no auth token configured for the download url");
            return None;
        };

        let mut url = Url::parse(&self.ctx.config().api_base_url(ApiName::Data)).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend([ENTITY_DATA_PATH, entity_set_id]);
        url.query_pairs_mut()
            .append_pair("fileType", file_type.as_str())
            .append_pair("token", token);
        Some(url.into())
    }

    /// Write entities into an entity set under a sync id
    pub async fn create_entity_data(
        &self,
        entity_set_id: &str,
        sync_id: &str,
        entities: &EntityData,
    ) -> Result<()> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;
        self.ctx.check_uuid("syncId", sync_id)?;
        self.check_entity_data(entities)?;

        let request = self
            .ctx
            .request(Method::PUT, ENTITY_DATA_PATH)
            .segment(entity_set_id)
            .segment(sync_id)
            .json(json!(entities));
        self.ctx.send_discarding(request).await
    }

    /// Write entities within a previously acquired sync ticket
    pub async fn store_entity_data(
        &self,
        ticket_id: &str,
        sync_id: &str,
        entities: &EntityData,
    ) -> Result<()> {
        self.ctx.check_uuid("ticketId", ticket_id)?;
        self.ctx.check_uuid("syncId", sync_id)?;
        self.check_entity_data(entities)?;

        let request = self
            .ctx
            .request(Method::PATCH, ENTITY_DATA_PATH)
            .route(TICKET_PATH)
            .segment(ticket_id)
            .segment(sync_id)
            .json(json!(entities));
        self.ctx.send_discarding(request).await
    }

    pub async fn acquire_sync_ticket(&self, entity_set_id: &str, sync_id: &str) -> Result<Uuid> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;
        self.ctx.check_uuid("syncId", sync_id)?;

        let request = self
            .ctx
            .request(Method::POST, TICKET_PATH)
            .segment(entity_set_id)
            .segment(sync_id);
        self.ctx.send(request).await
    }

    pub async fn release_sync_ticket(&self, ticket_id: &str) -> Result<()> {
        self.ctx.check_uuid("ticketId", ticket_id)?;

        let request = self
            .ctx
            .request(Method::DELETE, TICKET_PATH)
            .segment(ticket_id);
        self.ctx.send_discarding(request).await
    }

    /// Fetch a single entity by its entity key id
    pub async fn get_entity_data(&self, entity_set_id: &str, entity_key_id: &str) -> Result<Value> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;
        self.ctx.check_uuid("entityKeyId", entity_key_id)?;

        let request = self
            .ctx
            .request(Method::GET, ENTITY_DATA_PATH)
            .segment(entity_set_id)
            .segment(entity_key_id);
        self.ctx.send(request).await
    }

    /// Number of entities in an entity set
    pub async fn get_entity_set_size(&self, entity_set_id: &str) -> Result<u64> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;

        let request = self
            .ctx
            .request(Method::GET, ENTITY_DATA_PATH)
            .segment(entity_set_id)
            .route(COUNT_PATH);
        self.ctx.send(request).await
    }

    /// Create entities, merging into existing ones with the same key
    ///
    /// Resolves with the entity key ids, in the order of `entities`.
    pub async fn create_or_merge_entity_data(
        &self,
        entity_set_id: &str,
        entities: &[Entity],
    ) -> Result<Vec<Uuid>> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;
        if entities.is_empty() || !entities.iter().all(is_valid_entity) {
            return Err(self
                .ctx
                .invalid("entities must be a non-empty array of entities keyed by property type ids"));
        }

        let request = self
            .ctx
            .request(Method::POST, SET_PATH)
            .query("setId", entity_set_id)
            .json(json!(entities));
        self.ctx.send(request).await
    }

    /// Create the entities of a graph and the associations between them
    ///
    /// Resolves with the created entity and association key ids, grouped by
    /// entity set id.
    pub async fn create_entity_and_association_data(&self, graph: &DataGraph) -> Result<Value> {
        let request = self.ctx.request(Method::POST, "").json(json!(graph));
        self.ctx.send(request).await
    }

    /// Replace stored entities, keyed by entity key id
    ///
    /// With `partial`, only the supplied properties are replaced. Resolves
    /// with the number of entities written.
    pub async fn replace_entity_data(
        &self,
        entity_set_id: &str,
        entities: &EntityData,
        partial: bool,
    ) -> Result<u64> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;
        self.check_entity_data(entities)?;
        if !entities.keys().all(|id| is_valid_uuid(id)) {
            return Err(self.ctx.invalid("entities must be keyed by valid entity key ids"));
        }

        let update_type = if partial {
            UpdateType::PartialReplace
        } else {
            UpdateType::Replace
        };
        let request = self
            .ctx
            .request(Method::PUT, SET_PATH)
            .segment(entity_set_id)
            .query("type", update_type)
            .json(json!(entities));
        self.ctx.send(request).await
    }

    /// Delete entities; resolves with the number of entities deleted
    pub async fn delete_entity_data(
        &self,
        entity_set_id: &str,
        entity_key_ids: &[&str],
        delete_type: DeleteType,
    ) -> Result<u64> {
        self.ctx.check_uuid("entitySetId", entity_set_id)?;
        self.ctx.check_uuids("entityKeyIds", entity_key_ids)?;

        let request = self
            .ctx
            .request(Method::DELETE, SET_PATH)
            .segment(entity_set_id)
            .query("type", delete_type)
            .json(super::dedup(entity_key_ids));
        self.ctx.send(request).await
    }

    fn check_entity_data(&self, entities: &EntityData) -> Result<()> {
        let valid = !entities.is_empty()
            && entities
                .iter()
                .all(|(id, entity)| !id.is_empty() && is_valid_entity(entity));
        if valid {
            Ok(())
        } else {
            Err(self.ctx.invalid("entities must be a non-empty object"))
        }
    }
}

fn is_valid_entity(entity: &Entity) -> bool {
    !entity.is_empty() && entity.keys().all(|id| is_valid_uuid(id))
}
