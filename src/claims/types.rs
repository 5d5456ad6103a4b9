//! Claim set and typed views over the nested role claims

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::Result;

/// Decoded token payload, keyed by claim name
pub type ClaimSet = Map<String, Value>;

/// Subject claim
pub const SUBJECT_CLAIM: &str = "sub";
/// Space-delimited OAuth2 scope claim
pub const SCOPE_CLAIM: &str = "scope";
/// Realm-level role claim
pub const REALM_ACCESS_CLAIM: &str = "realm_access";
/// Per-client role claim
pub const RESOURCE_ACCESS_CLAIM: &str = "resource_access";
/// Client whose roles are exposed as account roles by default
pub const DEFAULT_ACCOUNT_CLIENT: &str = "account";

/// Parse a JSON token payload into a claim set
pub fn parse_claim_set(payload: &str) -> Result<ClaimSet> {
    Ok(serde_json::from_str(payload)?)
}

/// `realm_access` claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RealmAccess {
    #[serde(default, deserialize_with = "lenient_roles")]
    pub roles: Vec<String>,
}

/// Role entry of a single client inside `resource_access`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientAccess {
    #[serde(default, deserialize_with = "lenient_roles")]
    pub roles: Vec<String>,
}

/// `resource_access` claim, keyed by client id
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ResourceAccess(HashMap<String, LenientClientAccess>);

/// A client entry that decodes to empty roles instead of failing the whole map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LenientClientAccess(ClientAccess);

impl<'de> Deserialize<'de> for LenientClientAccess {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let access = match value {
            Value::Object(_) => ClientAccess::deserialize(&value).unwrap_or_default(),
            _ => ClientAccess::default(),
        };
        Ok(Self(access))
    }
}

impl RealmAccess {
    /// Read `realm_access` from a claim set, empty on absence or shape mismatch
    pub fn from_claims(claims: &ClaimSet) -> Self {
        decode_or_default(claims, REALM_ACCESS_CLAIM)
    }
}

impl ResourceAccess {
    /// Read `resource_access` from a claim set, empty on absence or shape mismatch
    pub fn from_claims(claims: &ClaimSet) -> Self {
        decode_or_default(claims, RESOURCE_ACCESS_CLAIM)
    }

    /// Roles granted for `client_id`
    pub fn client_roles(&self, client_id: &str) -> &[String] {
        self.0
            .get(client_id)
            .map(|access| access.0.roles.as_slice())
            .unwrap_or(&[])
    }

    /// Consume the claim and keep only the roles of `client_id`
    pub fn into_client_roles(mut self, client_id: &str) -> Vec<String> {
        self.0
            .remove(client_id)
            .map(|access| access.0.roles)
            .unwrap_or_default()
    }
}

fn decode_or_default<'a, T>(claims: &'a ClaimSet, key: &str) -> T
where
    T: Default + Deserialize<'a>,
{
    let value = match claims.get(key) {
        None => return T::default(),
        // Derived struct visitors also accept sequences, so only mappings are decoded.
        Some(value @ Value::Object(_)) => value,
        Some(other) => {
            tracing::debug!("Ignoring {} claim that is not a mapping: {}", key, other);
            return T::default();
        }
    };

    match T::deserialize(value) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::debug!("Ignoring malformed {} claim: {}", key, err);
            T::default()
        }
    }
}

/// Accept any value for `roles`: a sequence keeps its string elements,
/// anything else counts as no roles.
fn lenient_roles<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let roles = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(role) => Some(role),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(roles)
}
