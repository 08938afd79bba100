//! OrganizationsApi: organizations, their roles, members and email domains

use crate::api::{ApiContext, dedup};
use crate::core::error::Result;
use crate::core::http::ApiRequest;
use crate::models::{Model, Organization, Role};
use indexmap::IndexMap;
use reqwest::Method;
use serde_json::{Value, json};
use uuid::Uuid;

const ASSEMBLE_PATH: &str = "assemble";
const DESCRIPTION_PATH: &str = "description";
const EMAIL_DOMAINS_PATH: &str = "email-domains";
const ENTITY_SETS_PATH: &str = "entity-sets";
const MEMBERS_PATH: &str = "members";
const PRINCIPALS_PATH: &str = "principals";
const ROLES_PATH: &str = "roles";
const TITLE_PATH: &str = "title";

/// Entity set ids mapped to the flags describing each set within the organization
pub type OrganizationEntitySets = IndexMap<Uuid, Vec<String>>;

#[derive(Clone)]
pub struct OrganizationsApi {
    ctx: ApiContext,
}

impl OrganizationsApi {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    // =========================================================================
    // Organizations
    // =========================================================================

    pub async fn get_organization(&self, organization_id: &str) -> Result<Organization> {
        self.ctx.check_uuid("organizationId", organization_id)?;

        let request = self.organization(Method::GET, organization_id);
        self.ctx.send(request).await
    }

    pub async fn get_all_organizations(&self) -> Result<Vec<Organization>> {
        let request = self.ctx.request(Method::GET, "");
        self.ctx.send(request).await
    }

    /// Resolves with the id assigned to the new organization
    pub async fn create_organization(&self, organization: &Organization) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::POST, "")
            .json(organization.to_plain_record());
        self.ctx.send(request).await
    }

    pub async fn delete_organization(&self, organization_id: &str) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;

        let request = self.organization(Method::DELETE, organization_id);
        self.ctx.send_discarding(request).await
    }

    pub async fn update_title(&self, organization_id: &str, title: &str) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty("title", title)?;

        let request = self
            .organization(Method::PUT, organization_id)
            .route(TITLE_PATH)
            .text(title);
        self.ctx.send_discarding(request).await
    }

    pub async fn update_description(&self, organization_id: &str, description: &str) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty("description", description)?;

        let request = self
            .organization(Method::PUT, organization_id)
            .route(DESCRIPTION_PATH)
            .text(description);
        self.ctx.send_discarding(request).await
    }

    // =========================================================================
    // Auto-approved email domains
    // =========================================================================

    pub async fn get_auto_approved_email_domains(&self, organization_id: &str) -> Result<Vec<String>> {
        self.ctx.check_uuid("organizationId", organization_id)?;

        let request = self
            .organization(Method::GET, organization_id)
            .route(EMAIL_DOMAINS_PATH);
        self.ctx.send(request).await
    }

    pub async fn add_auto_approved_email_domain(
        &self,
        organization_id: &str,
        email_domain: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty("emailDomain", email_domain)?;

        let request = self
            .organization(Method::PUT, organization_id)
            .route(EMAIL_DOMAINS_PATH)
            .segment(email_domain);
        self.ctx.send_discarding(request).await
    }

    pub async fn add_auto_approved_email_domains(
        &self,
        organization_id: &str,
        email_domains: &[&str],
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty_strings("emailDomains", email_domains)?;

        let request = self
            .organization(Method::POST, organization_id)
            .route(EMAIL_DOMAINS_PATH)
            .json(dedup(email_domains));
        self.ctx.send_discarding(request).await
    }

    /// Replace the whole set of auto-approved domains
    pub async fn set_auto_approved_email_domains(
        &self,
        organization_id: &str,
        email_domains: &[&str],
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty_strings("emailDomains", email_domains)?;

        let request = self
            .organization(Method::PUT, organization_id)
            .route(EMAIL_DOMAINS_PATH)
            .json(dedup(email_domains));
        self.ctx.send_discarding(request).await
    }

    pub async fn remove_auto_approved_email_domain(
        &self,
        organization_id: &str,
        email_domain: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty("emailDomain", email_domain)?;

        let request = self
            .organization(Method::DELETE, organization_id)
            .route(EMAIL_DOMAINS_PATH)
            .segment(email_domain);
        self.ctx.send_discarding(request).await
    }

    /// Remove several domains with one DELETE carrying the domain set as its body
    pub async fn remove_auto_approved_email_domains(
        &self,
        organization_id: &str,
        email_domains: &[&str],
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty_strings("emailDomains", email_domains)?;

        let request = self
            .organization(Method::DELETE, organization_id)
            .route(EMAIL_DOMAINS_PATH)
            .json(dedup(email_domains));
        self.ctx.send_discarding(request).await
    }

    // =========================================================================
    // Roles
    // =========================================================================

    pub async fn get_role(&self, organization_id: &str, role_id: &str) -> Result<Role> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_uuid("roleId", role_id)?;

        let request = self.role(Method::GET, organization_id, role_id);
        self.ctx.send(request).await
    }

    pub async fn get_all_roles(&self, organization_id: &str) -> Result<Vec<Role>> {
        self.ctx.check_uuid("organizationId", organization_id)?;

        let request = self
            .organization(Method::GET, organization_id)
            .route(PRINCIPALS_PATH)
            .route(ROLES_PATH);
        self.ctx.send(request).await
    }

    /// Resolves with the id assigned to the new role
    pub async fn create_role(&self, role: &Role) -> Result<Uuid> {
        let request = self
            .ctx
            .request(Method::POST, ROLES_PATH)
            .json(role.to_plain_record());
        self.ctx.send(request).await
    }

    pub async fn delete_role(&self, organization_id: &str, role_id: &str) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_uuid("roleId", role_id)?;

        let request = self.role(Method::DELETE, organization_id, role_id);
        self.ctx.send_discarding(request).await
    }

    pub async fn update_role_title(
        &self,
        organization_id: &str,
        role_id: &str,
        title: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_uuid("roleId", role_id)?;
        self.ctx.check_non_empty("title", title)?;

        let request = self
            .role(Method::PUT, organization_id, role_id)
            .route(TITLE_PATH)
            .text(title);
        self.ctx.send_discarding(request).await
    }

    pub async fn update_role_description(
        &self,
        organization_id: &str,
        role_id: &str,
        description: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_uuid("roleId", role_id)?;
        self.ctx.check_non_empty("description", description)?;

        let request = self
            .role(Method::PUT, organization_id, role_id)
            .route(DESCRIPTION_PATH)
            .text(description);
        self.ctx.send_discarding(request).await
    }

    pub async fn add_role_to_member(
        &self,
        organization_id: &str,
        role_id: &str,
        member_id: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_uuid("roleId", role_id)?;
        self.ctx.check_non_empty("memberId", member_id)?;

        let request = self
            .role(Method::PUT, organization_id, role_id)
            .route(MEMBERS_PATH)
            .segment(member_id);
        self.ctx.send_discarding(request).await
    }

    pub async fn remove_role_from_member(
        &self,
        organization_id: &str,
        role_id: &str,
        member_id: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_uuid("roleId", role_id)?;
        self.ctx.check_non_empty("memberId", member_id)?;

        let request = self
            .role(Method::DELETE, organization_id, role_id)
            .route(MEMBERS_PATH)
            .segment(member_id);
        self.ctx.send_discarding(request).await
    }

    // =========================================================================
    // Members
    // =========================================================================

    pub async fn get_all_members(&self, organization_id: &str) -> Result<Vec<Value>> {
        self.ctx.check_uuid("organizationId", organization_id)?;

        let request = self
            .organization(Method::GET, organization_id)
            .route(PRINCIPALS_PATH)
            .route(MEMBERS_PATH);
        self.ctx.send(request).await
    }

    pub async fn add_member_to_organization(&self, organization_id: &str, member_id: &str) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty("memberId", member_id)?;

        let request = self
            .organization(Method::PUT, organization_id)
            .route(PRINCIPALS_PATH)
            .route(MEMBERS_PATH)
            .segment(member_id);
        self.ctx.send_discarding(request).await
    }

    pub async fn remove_member_from_organization(
        &self,
        organization_id: &str,
        member_id: &str,
    ) -> Result<()> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_non_empty("memberId", member_id)?;

        let request = self
            .organization(Method::DELETE, organization_id)
            .route(PRINCIPALS_PATH)
            .route(MEMBERS_PATH)
            .segment(member_id);
        self.ctx.send_discarding(request).await
    }

    // =========================================================================
    // Entity sets
    // =========================================================================

    pub async fn get_organization_entity_sets(
        &self,
        organization_id: &str,
    ) -> Result<OrganizationEntitySets> {
        self.ctx.check_uuid("organizationId", organization_id)?;

        let request = self
            .organization(Method::GET, organization_id)
            .route(ENTITY_SETS_PATH);
        self.ctx.send(request).await
    }

    /// Entity sets carrying at least one of `flags`
    pub async fn get_filtered_organization_entity_sets(
        &self,
        organization_id: &str,
        flags: &[&str],
    ) -> Result<OrganizationEntitySets> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        if flags.is_empty() || flags.iter().any(|f| f.is_empty()) {
            return Err(self.ctx.invalid("flags must be a non-empty string array"));
        }

        let request = self
            .organization(Method::POST, organization_id)
            .route(ENTITY_SETS_PATH)
            .json(json!(flags));
        self.ctx.send(request).await
    }

    /// Materialize entity sets into the organization's database
    pub async fn assemble_entity_sets(
        &self,
        organization_id: &str,
        entity_set_ids: &[&str],
    ) -> Result<OrganizationEntitySets> {
        self.ctx.check_uuid("organizationId", organization_id)?;
        self.ctx.check_uuids("entitySetIds", entity_set_ids)?;

        let request = self
            .organization(Method::POST, organization_id)
            .route(ENTITY_SETS_PATH)
            .route(ASSEMBLE_PATH)
            .json(dedup(entity_set_ids));
        self.ctx.send(request).await
    }

    fn organization(&self, method: Method, organization_id: &str) -> ApiRequest {
        self.ctx.request(method, "").segment(organization_id)
    }

    fn role(&self, method: Method, organization_id: &str, role_id: &str) -> ApiRequest {
        self.organization(method, organization_id)
            .route(PRINCIPALS_PATH)
            .route(ROLES_PATH)
            .segment(role_id)
    }
}
