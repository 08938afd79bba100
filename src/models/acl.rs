use crate::core::error::ModelError;
use crate::models::{Ace, Model, PlainRecord, parse_uuid_set, with_field};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Access control list for the securable object identified by `acl_key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acl {
    pub acl_key: IndexSet<Uuid>,
    pub aces: Vec<Ace>,
}

impl Acl {
    pub fn builder() -> AclBuilder {
        AclBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AclBuilder {
    acl_key: Option<IndexSet<Uuid>>,
    aces: Option<Vec<Ace>>,
}

impl AclBuilder {
    /// The key is the ordered path of ids down to the securable object
    pub fn set_acl_key<I, S>(mut self, acl_key: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.acl_key = Some(parse_uuid_set("aclKey", acl_key)?);
        Ok(self)
    }

    pub fn set_aces(mut self, aces: impl IntoIterator<Item = Ace>) -> Self {
        let aces: Vec<_> = aces.into_iter().collect();
        if !aces.is_empty() {
            self.aces = Some(aces);
        }
        self
    }

    pub fn build(self) -> Result<Acl, ModelError> {
        Ok(Acl {
            acl_key: self.acl_key.ok_or(ModelError::missing("aclKey"))?,
            aces: self.aces.unwrap_or_default(),
        })
    }
}

impl Model for Acl {
    type Builder = AclBuilder;
    const NAME: &'static str = "Acl";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = with_field(AclBuilder::default(), record.strs("aclKey")?, |b, key| {
            b.set_acl_key(key)
        })?;
        if let Some(aces) = record.models::<Ace>("aces")? {
            builder = builder.set_aces(aces);
        }
        builder.build()
    }

    fn to_builder(&self) -> AclBuilder {
        AclBuilder {
            acl_key: Some(self.acl_key.clone()),
            aces: Some(self.aces.clone()),
        }
    }
}

impl_model_deserialize!(Acl);
model_predicates!(Acl => is_valid_acl, is_valid_acl_array);
