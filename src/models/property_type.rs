use crate::core::error::ModelError;
use crate::models::types::{AnalyzerType, IndexType};
use crate::models::{
    FullyQualifiedName, Model, PlainRecord, non_empty_string, non_empty_string_set, parse_uuid,
    with_field,
};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Schema definition of a single property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub fqn: FullyQualifiedName,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "datatype")]
    pub data_type: String,
    pub schemas: IndexSet<FullyQualifiedName>,
    pub pii: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<AnalyzerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_valued: Option<bool>,
    pub enum_values: IndexSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_type: Option<IndexType>,
}

impl PropertyType {
    pub fn builder() -> PropertyTypeBuilder {
        PropertyTypeBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PropertyTypeBuilder {
    id: Option<Uuid>,
    fqn: Option<FullyQualifiedName>,
    title: Option<String>,
    description: Option<String>,
    data_type: Option<String>,
    schemas: Option<IndexSet<FullyQualifiedName>>,
    pii: Option<bool>,
    analyzer: Option<AnalyzerType>,
    multi_valued: Option<bool>,
    enum_values: Option<IndexSet<String>>,
    index_type: Option<IndexType>,
}

impl PropertyTypeBuilder {
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

    pub fn set_data_type(mut self, data_type: &str) -> Result<Self, ModelError> {
        self.data_type = Some(non_empty_string("datatype", data_type)?);
        Ok(self)
    }

    pub fn set_schemas(
        mut self,
        schemas: impl IntoIterator<Item = FullyQualifiedName>,
    ) -> Result<Self, ModelError> {
        let schemas: IndexSet<_> = schemas.into_iter().collect();
        if schemas.is_empty() {
            return Err(ModelError::invalid(
                "schemas",
                "must be a non-empty array of valid FQNs",
            ));
        }
        self.schemas = Some(schemas);
        Ok(self)
    }

    pub fn set_pii(mut self, pii: bool) -> Self {
        self.pii = Some(pii);
        self
    }

    pub fn set_analyzer(mut self, analyzer: AnalyzerType) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn set_multi_valued(mut self, multi_valued: bool) -> Self {
        self.multi_valued = Some(multi_valued);
        self
    }

    pub fn set_enum_values<I, S>(mut self, enum_values: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let enum_values: Vec<S> = enum_values.into_iter().collect();
        if !enum_values.is_empty() {
            self.enum_values = Some(non_empty_string_set("enumValues", enum_values)?);
        }
        Ok(self)
    }

    pub fn set_index_type(mut self, index_type: IndexType) -> Self {
        self.index_type = Some(index_type);
        self
    }

    pub fn build(self) -> Result<PropertyType, ModelError> {
        Ok(PropertyType {
            id: self.id,
            fqn: self.fqn.ok_or(ModelError::missing("type"))?,
            title: self.title.ok_or(ModelError::missing("title"))?,
            description: self.description,
            data_type: self.data_type.ok_or(ModelError::missing("datatype"))?,
            schemas: self.schemas.ok_or(ModelError::missing("schemas"))?,
            pii: self.pii.unwrap_or(false),
            analyzer: self.analyzer,
            multi_valued: self.multi_valued,
            enum_values: self.enum_values.unwrap_or_default(),
            index_type: self.index_type,
        })
    }
}

impl Model for PropertyType {
    type Builder = PropertyTypeBuilder;
    const NAME: &'static str = "PropertyType";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = PropertyTypeBuilder::default();
        let builder = with_field(builder, record.str("id")?, PropertyTypeBuilder::set_id)?;
        let builder = with_field(builder, record.str("title")?, PropertyTypeBuilder::set_title)?;
        let builder = with_field(
            builder,
            record.str("description")?,
            PropertyTypeBuilder::set_description,
        )?;
        let builder = with_field(
            builder,
            record.str("datatype")?,
            PropertyTypeBuilder::set_data_type,
        )?;
        let mut builder =
            with_field(builder, record.strs("enumValues")?, |b, v| b.set_enum_values(v))?;
        if let Some(fqn) = record.fqn("type")? {
            builder = builder.set_type(fqn);
        }
        if let Some(schemas) = record.fqns("schemas")? {
            builder = builder.set_schemas(schemas)?;
        }
        if let Some(pii) = record.bool("pii")? {
            builder = builder.set_pii(pii);
        }
        if let Some(analyzer) = record.parse("analyzer")? {
            builder = builder.set_analyzer(analyzer);
        }
        if let Some(multi_valued) = record.bool("multiValued")? {
            builder = builder.set_multi_valued(multi_valued);
        }
        if let Some(index_type) = record.parse("indexType")? {
            builder = builder.set_index_type(index_type);
        }
        builder.build()
    }

    fn to_builder(&self) -> PropertyTypeBuilder {
        PropertyTypeBuilder {
            id: self.id,
            fqn: Some(self.fqn.clone()),
            title: Some(self.title.clone()),
            description: self.description.clone(),
            data_type: Some(self.data_type.clone()),
            schemas: Some(self.schemas.clone()),
            pii: Some(self.pii),
            analyzer: self.analyzer,
            multi_valued: self.multi_valued,
            enum_values: Some(self.enum_values.clone()),
            index_type: self.index_type,
        }
    }
}

impl_model_deserialize!(PropertyType);
model_predicates!(PropertyType => is_valid_property_type, is_valid_property_type_array);
