use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lifetime of tokens minted by [`JwtAuth::issue_token`] (15 minutes)
pub const ACCESS_TOKEN_TTL: i64 = 900;

/// Role that unlocks catalog writes
pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl JwtClaims {
    /// True when `roles` contains `role`, ignoring case and an optional
    /// `ROLE_` prefix (`ADMIN`, `admin` and `ROLE_ADMIN` all match `ADMIN`).
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|granted| {
            let granted = granted.trim();
            let bare = granted
                .get(..5)
                .filter(|prefix| prefix.eq_ignore_ascii_case("ROLE_"))
                .map_or(granted, |_| &granted[5..]);
            bare.eq_ignore_ascii_case(role)
        })
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

/// Stateless HS256 token verifier (and issuer, for tooling and tests).
#[derive(Clone)]
pub struct JwtAuth {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();

        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
            validation: Arc::new(Validation::new(Algorithm::HS256)),
        }
    }

    pub fn issue_token(&self, subject: &str, roles: &[&str]) -> eyre::Result<String> {
        self.issue_token_with_ttl(subject, roles, ACCESS_TOKEN_TTL)
    }

    pub fn issue_token_with_ttl(
        &self,
        subject: &str,
        roles: &[&str],
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Check the signature and expiry and return the claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let data = decode::<JwtClaims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(secret: &str) -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(secret).unwrap())
    }

    fn claims(roles: &[&str]) -> JwtClaims {
        JwtClaims {
            sub: "user-1".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let auth = auth("catalog-test-secret-with-enough-length");
        let token = auth.issue_token("user-1", &["ADMIN"]).unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert!(claims.is_admin());
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let issuer = auth("catalog-test-secret-with-enough-length");
        let verifier = auth("a-completely-different-secret-value!!");

        let token = issuer.issue_token("user-1", &["ADMIN"]).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let auth = auth("catalog-test-secret-with-enough-length");
        // Well past the default 60s leeway
        let token = auth.issue_token_with_ttl("user-1", &["ADMIN"], -3600).unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_has_role_accepts_prefix_and_case() {
        assert!(claims(&["ADMIN"]).is_admin());
        assert!(claims(&["admin"]).is_admin());
        assert!(claims(&["ROLE_ADMIN"]).is_admin());
        assert!(claims(&["role_admin"]).is_admin());
        assert!(!claims(&["USER"]).is_admin());
        assert!(!claims(&["ROLE_USER", "ADMINISTRATOR"]).is_admin());
        assert!(!claims(&[]).is_admin());
    }
}
