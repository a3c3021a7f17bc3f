use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

// Errors returned by ID-token verification + strict claim validation.
#[derive(Debug)]
pub enum TokenError {
    Jwt(jsonwebtoken::errors::Error),
    MissingOrInvalidAud,
    EmptyClaim(&'static str),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingOrInvalidAud => write!(f, "missing or invalid 'aud' claim"),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for TokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

fn aud_is_present_and_valid(aud: &serde_json::Value) -> bool {
    match aud {
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(arr) => arr.iter().any(|v| match v {
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }),
        // Missing claim ends up as Null due to #[serde(default)]
        _ => false,
    }
}

/// ID token claims as issued by the identity provider.
///
/// Role claims come in two shapes: a `roles` array, or a single `role` string
/// from identities created before multi-role support.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,

    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub role: Option<String>,
}

impl IdTokenClaims {
    /// `roles` when present, otherwise the single `role`, otherwise nothing.
    pub fn role_claims(&self) -> Vec<String> {
        if let Some(roles) = &self.roles {
            return roles.clone();
        }
        match self.role.as_deref() {
            Some(role) if !role.is_empty() => vec![role.to_string()],
            _ => Vec::new(),
        }
    }
}

/// Verified identity handed to middleware and handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
}

/// Key used to check ID token signatures.
#[derive(Clone)]
pub enum VerifierKey {
    /// Ed25519 public key (PEM). Used against the real identity provider.
    Ed25519Pem(String),
    /// Shared HS256 secret for local development and tests.
    HmacSecret(String),
}

/// ID-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct IdTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for IdTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("IdTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl IdTokenVerifier {
    pub fn new(
        key: &VerifierKey,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, TokenError> {
        let (decoding_key, algorithm) = match key {
            VerifierKey::Ed25519Pem(pem) => (
                DecodingKey::from_ed_pem(pem.as_bytes())?,
                Algorithm::EdDSA,
            ),
            VerifierKey::HmacSecret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    // Verify and decode a JWT ID token.
    pub fn verify(&self, token: &str) -> Result<IdTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<IdTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks signature, `exp`, `iss` and `aud`.
    /// This additionally rejects present-but-empty `iss` / `sub` / `aud`.
    pub fn verify_strict(&self, token: &str) -> Result<IdTokenClaims, TokenError> {
        let claims = self.verify(token)?;

        if claims.iss.trim().is_empty() {
            return Err(TokenError::EmptyClaim("iss"));
        }
        if claims.sub.trim().is_empty() {
            return Err(TokenError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(TokenError::EmptyClaim("exp"));
        }
        if !aud_is_present_and_valid(&claims.aud) {
            return Err(TokenError::MissingOrInvalidAud);
        }

        Ok(claims)
    }

    /// Recommended entry-point for middleware/handlers.
    pub fn verify_identity(&self, token: &str) -> Result<VerifiedIdentity, TokenError> {
        let claims = self.verify_strict(token)?;
        let roles = claims.role_claims();

        Ok(VerifiedIdentity {
            uid: claims.sub,
            email: claims.email,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "test-secret";

    fn verifier() -> IdTokenVerifier {
        IdTokenVerifier::new(
            &VerifierKey::HmacSecret(SECRET.into()),
            "https://issuer.test",
            "coursegate",
            0,
        )
        .unwrap()
    }

    fn sign(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn exp() -> u64 {
        (chrono::Utc::now().timestamp() + 600) as u64
    }

    #[test]
    fn accepts_roles_array() {
        let token = sign(json!({
            "iss": "https://issuer.test",
            "aud": "coursegate",
            "sub": "uid-1",
            "exp": exp(),
            "email": "a@example.com",
            "roles": ["instructor", "admin"],
        }));

        let identity = verifier().verify_identity(&token).unwrap();
        assert_eq!(identity.uid, "uid-1");
        assert_eq!(identity.email.as_deref(), Some("a@example.com"));
        assert_eq!(identity.roles, vec!["instructor", "admin"]);
    }

    #[test]
    fn falls_back_to_single_role() {
        let token = sign(json!({
            "iss": "https://issuer.test",
            "aud": "coursegate",
            "sub": "uid-1",
            "exp": exp(),
            "role": "instructor",
        }));
        assert_eq!(
            verifier().verify_identity(&token).unwrap().roles,
            vec!["instructor"]
        );

        let token = sign(json!({
            "iss": "https://issuer.test",
            "aud": "coursegate",
            "sub": "uid-1",
            "exp": exp(),
            "role": "",
        }));
        assert!(verifier().verify_identity(&token).unwrap().roles.is_empty());
    }

    #[test]
    fn rejects_wrong_audience_and_expired() {
        let wrong_aud = sign(json!({
            "iss": "https://issuer.test",
            "aud": "someone-else",
            "sub": "uid-1",
            "exp": exp(),
        }));
        assert!(matches!(
            verifier().verify_identity(&wrong_aud),
            Err(TokenError::Jwt(_))
        ));

        let expired = sign(json!({
            "iss": "https://issuer.test",
            "aud": "coursegate",
            "sub": "uid-1",
            "exp": 1_000,
        }));
        assert!(verifier().verify_identity(&expired).is_err());
    }

    #[test]
    fn rejects_blank_subject() {
        let token = sign(json!({
            "iss": "https://issuer.test",
            "aud": "coursegate",
            "sub": "  ",
            "exp": exp(),
        }));
        assert!(matches!(
            verifier().verify_identity(&token),
            Err(TokenError::EmptyClaim("sub"))
        ));
    }

    #[test]
    fn debug_hides_key() {
        let out = format!("{:?}", verifier());
        assert!(!out.contains(SECRET));
    }
}
