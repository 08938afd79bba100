//! LinkingApi: linking entity types and entity sets
//!
//! Entity-level linking is not exposed by the service yet; those operations
//! always fail with [`crate::LatticeError::NotImplemented`].

use crate::api::ApiContext;
use crate::core::error::Result;
use crate::models::{LinkingEntitySet, LinkingEntityType, Model};
use reqwest::Method;
use uuid::Uuid;

const TYPE_PATH: &str = "type";
const SET_PATH: &str = "set";

#[derive(Clone)]
pub struct LinkingApi {
    ctx: ApiContext,
}

impl LinkingApi {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Resolves with the id of the created entity type
    pub async fn create_linking_entity_type(
        &self,
        linking_entity_type: &LinkingEntityType,
    ) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::POST, TYPE_PATH)
            .json(linking_entity_type.to_plain_record());
        self.ctx.send(request).await
    }

    /// Resolves with the id of the linked entity set
    pub async fn link_entity_sets(&self, linking_entity_set: &LinkingEntitySet) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::POST, SET_PATH)
            .json(linking_entity_set.to_plain_record());
        self.ctx.send(request).await
    }

    pub async fn link_entities(&self) -> Result<()> {
        Err(self.ctx.not_implemented("LinkingApi.linkEntities()"))
    }

    pub async fn set_linked_entities(&self) -> Result<()> {
        Err(self.ctx.not_implemented("LinkingApi.setLinkedEntities()"))
    }

    pub async fn remove_linked_entities(&self) -> Result<()> {
        Err(self.ctx.not_implemented("LinkingApi.removeLinkedEntities()"))
    }

    pub async fn add_linked_entities(&self) -> Result<()> {
        Err(self.ctx.not_implemented("LinkingApi.addLinkedEntities()"))
    }

    pub async fn remove_linked_entity(&self) -> Result<()> {
        Err(self.ctx.not_implemented("LinkingApi.removeLinkedEntity()"))
    }
}
