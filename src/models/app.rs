//! Apps and the app types they are assembled from

use crate::core::error::ModelError;
use crate::models::{
    FullyQualifiedName, Model, PlainRecord, non_empty_string, parse_uuid, parse_uuid_set,
    with_field,
};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// App
// =============================================================================

/// An installable application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub app_type_ids: IndexSet<Uuid>,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppBuilder {
    id: Option<Uuid>,
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    app_type_ids: Option<IndexSet<Uuid>>,
}

impl AppBuilder {
    pub fn set_id(mut self, id: &str) -> Result<Self, ModelError> {
        if !id.is_empty() {
            self.id = Some(parse_uuid("id", id)?);
        }
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

    pub fn set_url(mut self, url: &str) -> Result<Self, ModelError> {
        self.url = Some(non_empty_string("url", url)?);
        Ok(self)
    }

    pub fn set_app_type_ids<I, S>(mut self, app_type_ids: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let app_type_ids: Vec<S> = app_type_ids.into_iter().collect();
        if !app_type_ids.is_empty() {
            self.app_type_ids = Some(parse_uuid_set("appTypeIds", app_type_ids)?);
        }
        Ok(self)
    }

    pub fn build(self) -> Result<App, ModelError> {
        Ok(App {
            id: self.id,
            name: self.name.ok_or(ModelError::missing("name"))?,
            title: self.title.ok_or(ModelError::missing("title"))?,
            description: self.description,
            url: self.url.ok_or(ModelError::missing("url"))?,
            app_type_ids: self.app_type_ids.unwrap_or_default(),
        })
    }
}

impl Model for App {
    type Builder = AppBuilder;
    const NAME: &'static str = "App";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = AppBuilder::default();
        let builder = with_field(builder, record.str("id")?, AppBuilder::set_id)?;
        let builder = with_field(builder, record.str("name")?, AppBuilder::set_name)?;
        let builder = with_field(builder, record.str("title")?, AppBuilder::set_title)?;
        let builder = with_field(builder, record.str("description")?, AppBuilder::set_description)?;
        let builder = with_field(builder, record.str("url")?, AppBuilder::set_url)?;
        let builder = with_field(builder, record.strs("appTypeIds")?, |b, ids| {
            b.set_app_type_ids(ids)
        })?;
        builder.build()
    }

    fn to_builder(&self) -> AppBuilder {
        AppBuilder {
            id: self.id,
            name: Some(self.name.clone()),
            title: Some(self.title.clone()),
            description: self.description.clone(),
            url: Some(self.url.clone()),
            app_type_ids: Some(self.app_type_ids.clone()),
        }
    }
}

impl_model_deserialize!(App);
model_predicates!(App => is_valid_app, is_valid_app_array);

// =============================================================================
// AppType
// =============================================================================

/// One building block of an app, backed by an entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub fqn: FullyQualifiedName,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub entity_type_id: Uuid,
}

impl AppType {
    pub fn builder() -> AppTypeBuilder {
        AppTypeBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppTypeBuilder {
    id: Option<Uuid>,
    fqn: Option<FullyQualifiedName>,
    title: Option<String>,
    description: Option<String>,
    entity_type_id: Option<Uuid>,
}

impl AppTypeBuilder {
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

    pub fn set_entity_type_id(mut self, entity_type_id: &str) -> Result<Self, ModelError> {
        self.entity_type_id = Some(parse_uuid("entityTypeId", entity_type_id)?);
        Ok(self)
    }

    pub fn build(self) -> Result<AppType, ModelError> {
        Ok(AppType {
            id: self.id,
            fqn: self.fqn.ok_or(ModelError::missing("type"))?,
            title: self.title.ok_or(ModelError::missing("title"))?,
            description: self.description,
            entity_type_id: self
                .entity_type_id
                .ok_or(ModelError::missing("entityTypeId"))?,
        })
    }
}

impl Model for AppType {
    type Builder = AppTypeBuilder;
    const NAME: &'static str = "AppType";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = AppTypeBuilder::default();
        let builder = with_field(builder, record.str("id")?, AppTypeBuilder::set_id)?;
        let builder = with_field(builder, record.str("title")?, AppTypeBuilder::set_title)?;
        let builder = with_field(
            builder,
            record.str("description")?,
            AppTypeBuilder::set_description,
        )?;
        let mut builder = with_field(
            builder,
            record.str("entityTypeId")?,
            AppTypeBuilder::set_entity_type_id,
        )?;
        if let Some(fqn) = record.fqn("type")? {
            builder = builder.set_type(fqn);
        }
        builder.build()
    }

    fn to_builder(&self) -> AppTypeBuilder {
        AppTypeBuilder {
            id: self.id,
            fqn: Some(self.fqn.clone()),
            title: Some(self.title.clone()),
            description: self.description.clone(),
            entity_type_id: Some(self.entity_type_id),
        }
    }
}

impl_model_deserialize!(AppType);
model_predicates!(AppType => is_valid_app_type, is_valid_app_type_array);
