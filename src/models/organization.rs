use crate::core::error::ModelError;
use crate::models::{
    Model, PlainRecord, Principal, non_empty_string, non_empty_string_set, parse_uuid,
    parse_uuid_set, with_field,
};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// An organization, its principal and the principals attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub principal: Principal,
    pub members: Vec<Principal>,
    pub roles: Vec<Principal>,
    /// Auto-approved email domains
    pub emails: IndexSet<String>,
    pub apps: IndexSet<Uuid>,
}

impl Organization {
    pub fn builder() -> OrganizationBuilder {
        OrganizationBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationBuilder {
    id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    principal: Option<Principal>,
    members: Option<Vec<Principal>>,
    roles: Option<Vec<Principal>>,
    emails: Option<IndexSet<String>>,
    apps: Option<IndexSet<Uuid>>,
}

impl OrganizationBuilder {
    pub fn set_id(mut self, id: &str) -> Result<Self, ModelError> {
        if !id.is_empty() {
            self.id = Some(parse_uuid("id", id)?);
        }
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

    pub fn set_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn set_members(mut self, members: impl IntoIterator<Item = Principal>) -> Self {
        let members: Vec<_> = members.into_iter().collect();
        if !members.is_empty() {
            self.members = Some(members);
        }
        self
    }

    pub fn set_roles(mut self, roles: impl IntoIterator<Item = Principal>) -> Self {
        let roles: Vec<_> = roles.into_iter().collect();
        if !roles.is_empty() {
            self.roles = Some(roles);
        }
        self
    }

    pub fn set_emails<I, S>(mut self, emails: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails: Vec<S> = emails.into_iter().collect();
        if !emails.is_empty() {
            self.emails = Some(non_empty_string_set("emails", emails)?);
        }
        Ok(self)
    }

    pub fn set_apps<I, S>(mut self, apps: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let apps: Vec<S> = apps.into_iter().collect();
        if !apps.is_empty() {
            self.apps = Some(parse_uuid_set("apps", apps)?);
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Organization, ModelError> {
        Ok(Organization {
            id: self.id,
            title: self.title.ok_or(ModelError::missing("title"))?,
            description: self.description,
            principal: self.principal.ok_or(ModelError::missing("principal"))?,
            members: self.members.unwrap_or_default(),
            roles: self.roles.unwrap_or_default(),
            emails: self.emails.unwrap_or_default(),
            apps: self.apps.unwrap_or_default(),
        })
    }
}

impl Model for Organization {
    type Builder = OrganizationBuilder;
    const NAME: &'static str = "Organization";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = OrganizationBuilder::default();
        let builder = with_field(builder, record.str("id")?, OrganizationBuilder::set_id)?;
        let builder = with_field(builder, record.str("title")?, OrganizationBuilder::set_title)?;
        let builder = with_field(
            builder,
            record.str("description")?,
            OrganizationBuilder::set_description,
        )?;
        let builder = with_field(builder, record.strs("emails")?, |b, v| b.set_emails(v))?;
        let mut builder = with_field(builder, record.strs("apps")?, |b, v| b.set_apps(v))?;
        if let Some(principal) = record.model("principal")? {
            builder = builder.set_principal(principal);
        }
        if let Some(members) = record.models::<Principal>("members")? {
            builder = builder.set_members(members);
        }
        if let Some(roles) = record.models::<Principal>("roles")? {
            builder = builder.set_roles(roles);
        }
        builder.build()
    }

    fn to_builder(&self) -> OrganizationBuilder {
        OrganizationBuilder {
            id: self.id,
            title: Some(self.title.clone()),
            description: self.description.clone(),
            principal: Some(self.principal.clone()),
            members: Some(self.members.clone()),
            roles: Some(self.roles.clone()),
            emails: Some(self.emails.clone()),
            apps: Some(self.apps.clone()),
        }
    }
}

impl_model_deserialize!(Organization);
model_predicates!(Organization => is_valid_organization);
