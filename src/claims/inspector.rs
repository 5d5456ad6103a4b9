use serde_json::Value;

use super::types::{
    ClaimSet, RealmAccess, ResourceAccess, DEFAULT_ACCOUNT_CLIENT, SCOPE_CLAIM, SUBJECT_CLAIM,
};
use crate::config::InspectorConfig;
use crate::error::{ClaimsError, Result};

/// Authorization facts derived from a pre-validated claim set.
///
/// Realm roles, account roles and scopes are derived once when the inspector
/// is built. Malformed or missing role and scope claims produce empty sets;
/// only [`ClaimsInspector::user_id`] can fail.
#[derive(Debug, Clone)]
pub struct ClaimsInspector<'a> {
    claims: &'a ClaimSet,
    realm_roles: Vec<String>,
    account_roles: Vec<String>,
    scopes: Vec<String>,
}

impl<'a> ClaimsInspector<'a> {
    /// Inspect `claims`, taking account roles from the `account` client
    pub fn new(claims: &'a ClaimSet) -> Self {
        Self::for_account_client(claims, DEFAULT_ACCOUNT_CLIENT)
    }

    /// Inspect `claims` using the account client named in `config`
    pub fn with_config(claims: &'a ClaimSet, config: &InspectorConfig) -> Self {
        Self::for_account_client(claims, &config.account_client)
    }

    fn for_account_client(claims: &'a ClaimSet, account_client: &str) -> Self {
        Self {
            claims,
            realm_roles: RealmAccess::from_claims(claims).roles,
            account_roles: ResourceAccess::from_claims(claims).into_client_roles(account_client),
            scopes: parse_scopes(claims),
        }
    }

    /// The subject of the token
    pub fn user_id(&self) -> Result<&'a str> {
        match self.claims.get(SUBJECT_CLAIM) {
            Some(Value::String(sub)) => Ok(sub.as_str()),
            Some(_) => Err(ClaimsError::InvalidClaim {
                claim: SUBJECT_CLAIM.to_string(),
                expected: "string",
            }),
            None => Err(ClaimsError::MissingClaim(SUBJECT_CLAIM.to_string())),
        }
    }

    /// Check if the token carries `role` as a realm role
    pub fn is_in_realm_role(&self, role: &str) -> bool {
        self.realm_roles.iter().any(|r| r == role)
    }

    /// Check if the token carries `role` as an account role
    pub fn is_in_account_role(&self, role: &str) -> bool {
        self.account_roles.iter().any(|r| r == role)
    }

    /// Check if the token was granted `scope`
    pub fn token_has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Check if the token carries any of the provided realm roles
    pub fn has_any_realm_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.is_in_realm_role(role))
    }

    /// Check if the token carries all of the provided realm roles
    pub fn has_all_realm_roles(&self, roles: &[&str]) -> bool {
        roles.iter().all(|&role| self.is_in_realm_role(role))
    }

    /// Check if the token was granted all of the provided scopes
    pub fn has_all_scopes(&self, scopes: &[&str]) -> bool {
        scopes.iter().all(|&scope| self.token_has_scope(scope))
    }

    /// Roles granted for an arbitrary `resource_access` client.
    ///
    /// Unlike the account roles this is read from the claims on every call.
    pub fn client_roles(&self, client_id: &str) -> Vec<String> {
        ResourceAccess::from_claims(self.claims).into_client_roles(client_id)
    }

    /// Realm roles in source order, duplicates kept
    pub fn realm_roles(&self) -> &[String] {
        &self.realm_roles
    }

    /// Account roles in source order, duplicates kept
    pub fn account_roles(&self) -> &[String] {
        &self.account_roles
    }

    /// Scopes in the order they appear in the `scope` claim, duplicates kept
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// The claim set this inspector was built from
    pub fn claims(&self) -> &'a ClaimSet {
        self.claims
    }
}

// Split on single spaces; empty segments from repeated spaces are kept.
fn parse_scopes(claims: &ClaimSet) -> Vec<String> {
    match claims.get(SCOPE_CLAIM) {
        Some(Value::String(scope)) => scope.split(' ').map(str::to_string).collect(),
        Some(other) => {
            tracing::debug!("Ignoring non-string {} claim: {}", SCOPE_CLAIM, other);
            Vec::new()
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> ClaimSet {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn keycloak_claims() -> ClaimSet {
        claims(json!({
            "sub": "user-123",
            "preferred_username": "jdoe",
            "scope": "read write admin",
            "realm_access": { "roles": ["admin", "user"] },
            "resource_access": {
                "account": { "roles": ["viewer", "manage-account"] },
                "billing": { "roles": ["invoice-reader"] }
            }
        }))
    }

    #[test]
    fn test_realm_roles() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);

        assert!(inspector.is_in_realm_role("admin"));
        assert!(inspector.is_in_realm_role("user"));
        assert!(!inspector.is_in_realm_role("root"));
    }

    #[test]
    fn test_realm_roles_are_case_sensitive() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);

        assert!(!inspector.is_in_realm_role("Admin"));
        assert!(!inspector.is_in_realm_role("admin "));
    }

    #[test]
    fn test_missing_realm_access() {
        let claims = claims(json!({ "sub": "user-123" }));
        let inspector = ClaimsInspector::new(&claims);

        assert!(inspector.realm_roles().is_empty());
        assert!(!inspector.is_in_realm_role("admin"));
        assert!(!inspector.is_in_realm_role(""));
    }

    #[test]
    fn test_malformed_realm_access() {
        let claims = claims(json!({ "realm_access": ["admin"] }));
        let inspector = ClaimsInspector::new(&claims);
        assert!(!inspector.is_in_realm_role("admin"));
    }

    #[test]
    fn test_sequence_shaped_access_claims_grant_nothing() {
        let claims = claims(json!({
            "realm_access": [["admin"]],
            "resource_access": { "account": [["viewer"]] }
        }));
        let inspector = ClaimsInspector::new(&claims);

        assert!(inspector.realm_roles().is_empty());
        assert!(inspector.account_roles().is_empty());
        assert!(!inspector.is_in_realm_role("admin"));
        assert!(!inspector.is_in_account_role("viewer"));
    }

    #[test]
    fn test_account_roles_independent_of_realm_roles() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);

        assert_eq!(inspector.account_roles(), ["viewer", "manage-account"]);
        assert!(inspector.is_in_account_role("viewer"));
        assert!(!inspector.is_in_realm_role("viewer"));
        assert!(!inspector.is_in_account_role("admin"));
    }

    #[test]
    fn test_account_roles_from_configured_client() {
        let claims = keycloak_claims();
        let config = InspectorConfig {
            account_client: "billing".to_string(),
        };
        let inspector = ClaimsInspector::with_config(&claims, &config);

        assert_eq!(inspector.account_roles(), ["invoice-reader"]);
        assert!(!inspector.is_in_account_role("viewer"));
    }

    #[test]
    fn test_missing_account_client() {
        let claims = claims(json!({ "resource_access": { "billing": { "roles": ["x"] } } }));
        let inspector = ClaimsInspector::new(&claims);
        assert!(inspector.account_roles().is_empty());
    }

    #[test]
    fn test_client_roles() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);

        assert_eq!(inspector.client_roles("billing"), vec!["invoice-reader"]);
        assert!(inspector.client_roles("unknown").is_empty());
    }

    #[test]
    fn test_scopes() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);

        assert!(inspector.token_has_scope("write"));
        assert!(!inspector.token_has_scope("delete"));
        assert_eq!(inspector.scopes().len(), 3);
    }

    #[test]
    fn test_missing_scope() {
        let claims = claims(json!({ "sub": "user-123" }));
        let inspector = ClaimsInspector::new(&claims);

        assert!(inspector.scopes().is_empty());
        assert!(!inspector.token_has_scope("read"));
        assert!(!inspector.token_has_scope(""));
    }

    #[test]
    fn test_non_string_scope_is_absent() {
        let claims = claims(json!({ "scope": ["read", "write"] }));
        let inspector = ClaimsInspector::new(&claims);

        assert!(inspector.scopes().is_empty());
        assert!(!inspector.token_has_scope("read"));
    }

    #[test]
    fn test_scope_keeps_empty_segments() {
        let claims = claims(json!({ "scope": "read  write" }));
        let inspector = ClaimsInspector::new(&claims);

        assert_eq!(inspector.scopes(), ["read", "", "write"]);
        assert!(inspector.token_has_scope(""));
    }

    #[test]
    fn test_scope_is_not_trimmed() {
        let claims = claims(json!({ "scope": " read\twrite" }));
        let inspector = ClaimsInspector::new(&claims);

        assert_eq!(inspector.scopes(), ["", "read\twrite"]);
        assert!(!inspector.token_has_scope("read"));
    }

    #[test]
    fn test_duplicates_preserved_in_source_order() {
        let claims = claims(json!({
            "scope": "read read",
            "realm_access": { "roles": ["user", "admin", "user"] }
        }));
        let inspector = ClaimsInspector::new(&claims);

        assert_eq!(inspector.scopes(), ["read", "read"]);
        assert_eq!(inspector.realm_roles(), ["user", "admin", "user"]);
    }

    #[test]
    fn test_user_id() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);
        assert_eq!(inspector.user_id().unwrap(), "user-123");
    }

    #[test]
    fn test_user_id_not_a_string() {
        let claims = claims(json!({ "sub": 123 }));
        let inspector = ClaimsInspector::new(&claims);

        let err = inspector.user_id().unwrap_err();
        assert!(matches!(err, ClaimsError::InvalidClaim { .. }));
    }

    #[test]
    fn test_user_id_missing() {
        let claims = claims(json!({ "scope": "read" }));
        let inspector = ClaimsInspector::new(&claims);

        let err = inspector.user_id().unwrap_err();
        assert!(matches!(err, ClaimsError::MissingClaim(ref claim) if claim == "sub"));
    }

    #[test]
    fn test_any_and_all_helpers() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);

        assert!(inspector.has_any_realm_role(&["root", "user"]));
        assert!(!inspector.has_any_realm_role(&["root", "superuser"]));
        assert!(!inspector.has_any_realm_role(&[]));
        assert!(inspector.has_all_realm_roles(&["admin", "user"]));
        assert!(!inspector.has_all_realm_roles(&["admin", "root"]));
        assert!(inspector.has_all_scopes(&["read", "admin"]));
        assert!(!inspector.has_all_scopes(&["read", "delete"]));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);

        for _ in 0..3 {
            assert!(inspector.is_in_realm_role("admin"));
            assert!(inspector.token_has_scope("read"));
            assert_eq!(inspector.user_id().unwrap(), "user-123");
        }
    }

    #[test]
    fn test_claims_are_borrowed_not_copied() {
        let claims = keycloak_claims();
        let inspector = ClaimsInspector::new(&claims);
        assert!(std::ptr::eq(inspector.claims(), &claims));
    }
}
