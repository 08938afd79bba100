//! # lattice
//!
//! Async client for the Lattice data platform REST APIs.
//!
//! ## Features
//!
//! - **One struct per API**: data, entity data model, organizations,
//!   permissions, authorizations, users and linking
//! - **Validated models**: builders reject malformed ids, names and
//!   collections before anything reaches the wire
//! - **Fail fast**: every argument is checked locally and reported as
//!   [`LatticeError::InvalidParameter`] without a network call
//! - **Pluggable transport**: requests go through the [`HttpClient`] trait;
//!   `reqwest` is the default
//! - **Configuration-Based**: base URL, token, per-API overrides and timeout
//!   from code or YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lattice::prelude::*;
//!
//! let config = Configuration::new("https://api.openlattice.com")?
//!     .with_auth_token("eyJhbGciOi...");
//! let client = LatticeClient::new(config)?;
//!
//! let role = RoleBuilder::default()
//!     .set_organization_id("69682f1e-6039-44da-8342-522395b43738")?
//!     .set_title("Analysts")?
//!     .set_principal(
//!         PrincipalBuilder::default()
//!             .set_type(PrincipalType::Role)
//!             .set_id("analysts")?
//!             .build()?,
//!     )
//!     .build()?;
//!
//! let role_id = client.organizations().create_role(&role).await?;
//! ```
//!
//! [`HttpClient`]: crate::core::http::HttpClient

pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod models;

pub use client::LatticeClient;
pub use config::{ApiName, Configuration};
pub use core::error::{ConfigError, LatticeError, ModelError, Result};

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Client ===
    pub use crate::client::LatticeClient;
    pub use crate::config::{ApiName, Configuration};

    // === APIs ===
    pub use crate::api::{
        AuthorizationsApi, DataApi, Entity, EntityData, EntityDataModelApi, LinkingApi,
        OrganizationsApi, PermissionsApi, UsersApi,
    };

    // === Errors ===
    pub use crate::core::error::{ConfigError, LatticeError, ModelError, Result};

    // === Transport ===
    pub use crate::core::http::{ApiRequest, ApiResponse, HttpClient, ReqwestClient, RequestBody};

    // === Models ===
    pub use crate::models::*;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde_json::{Value, json};
    pub use uuid::Uuid;
}
