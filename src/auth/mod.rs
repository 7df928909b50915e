use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by bearer tokens. Tokens are issued elsewhere; this
/// service only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
}

/// Caller identity attached to every request by the auth middleware
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    pub subject: Option<String>,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.subject.is_some()
    }

    pub fn has_any_role(&self, roles: &[String]) -> bool {
        self.roles.iter().any(|r| roles.contains(r))
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            subject: Some(claims.sub),
            roles: claims.roles,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Invalid JWT token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// HS256 verifier for bearer tokens
#[derive(Clone)]
pub struct TokenVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let key = if secret.is_empty() {
            None
        } else {
            Some(DecodingKey::from_secret(secret.as_bytes()))
        };
        Self {
            key,
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let key = self.key.as_ref().ok_or(TokenError::MissingSecret)?;
        let data = decode::<Claims>(token, key, &self.validation)?;
        Ok(data.claims.into())
    }
}

/// Operations guarded by an access policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListOwners,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("One of the roles {0:?} is required")]
    MissingRole(Vec<String>),
}

/// Authorization hook consulted before guarded operations
pub trait AccessPolicy: Send + Sync {
    fn check(&self, principal: &Principal, action: Action) -> Result<(), AccessDenied>;
}

/// Grants `ListOwners` to any principal holding one of the configured roles
pub struct RolePolicy {
    listing_roles: Vec<String>,
}

impl RolePolicy {
    pub fn new(listing_roles: Vec<String>) -> Self {
        Self { listing_roles }
    }
}

impl AccessPolicy for RolePolicy {
    fn check(&self, principal: &Principal, action: Action) -> Result<(), AccessDenied> {
        match action {
            Action::ListOwners => {
                if self.listing_roles.is_empty() || principal.has_any_role(&self.listing_roles) {
                    Ok(())
                } else if !principal.is_authenticated() {
                    Err(AccessDenied::Unauthenticated)
                } else {
                    Err(AccessDenied::MissingRole(self.listing_roles.clone()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, roles: &[&str]) -> String {
        let claims = Claims {
            sub: "vet".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: chrono::Utc::now().timestamp() + 600,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn policy() -> RolePolicy {
        RolePolicy::new(vec!["ROLE_USER".into(), "ROLE_EDITOR".into()])
    }

    #[test]
    fn verifies_signed_tokens() {
        let verifier = TokenVerifier::new("s3cret");
        let principal = verifier.verify(&token("s3cret", &["ROLE_EDITOR"])).unwrap();
        assert_eq!(principal.subject.as_deref(), Some("vet"));
        assert_eq!(principal.roles, vec!["ROLE_EDITOR"]);
    }

    #[test]
    fn rejects_foreign_signatures() {
        let verifier = TokenVerifier::new("s3cret");
        assert!(matches!(
            verifier.verify(&token("other", &["ROLE_USER"])),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn empty_secret_rejects_everything() {
        let verifier = TokenVerifier::new("");
        assert!(matches!(
            verifier.verify(&token("x", &[])),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn listing_requires_a_role() {
        let editor = Principal {
            subject: Some("a".into()),
            roles: vec!["ROLE_EDITOR".into()],
        };
        let guest = Principal {
            subject: Some("b".into()),
            roles: vec!["ROLE_GUEST".into()],
        };

        assert!(policy().check(&editor, Action::ListOwners).is_ok());
        assert!(matches!(
            policy().check(&guest, Action::ListOwners),
            Err(AccessDenied::MissingRole(_))
        ));
        assert_eq!(
            policy().check(&Principal::anonymous(), Action::ListOwners),
            Err(AccessDenied::Unauthenticated)
        );
    }

    #[test]
    fn empty_role_list_allows_anyone() {
        let open = RolePolicy::new(vec![]);
        assert!(open.check(&Principal::anonymous(), Action::ListOwners).is_ok());
    }
}
