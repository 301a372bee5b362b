use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("invalid {algorithm:?} public key pem: {source}")]
    InvalidKey {
        algorithm: Algorithm,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Access token (JWT) claims read by this service.
///
/// NOTE:
/// - `iss`, `aud`, `exp`, `nbf` are enforced by `jsonwebtoken::Validation` on the raw token,
///   so they are not deserialized here.
/// - `upn` / `preferred_username` are optional; identity providers differ in which one they emit.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,

    #[serde(default)]
    pub jti: Option<String>,

    #[serde(default)]
    pub upn: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
}

impl AccessTokenClaims {
    /// Principal name: first non-blank of `upn`, `preferred_username`, `sub`.
    pub fn principal_name(&self) -> &str {
        non_blank(self.upn.as_deref())
            .or_else(|| non_blank(self.preferred_username.as_deref()))
            .unwrap_or(self.sub.as_str())
    }
}

/// What `AuthService` hands to the middleware after all checks passed.
///
/// `principal_name` is guaranteed non-blank: `sub` must be non-blank and is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub principal_name: String,
    pub subject: String,
    pub jti: Option<String>,
}

/// Access-token verifier for one issuer / audience / public key.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        access_public_key_pem: &str,
        algorithm: Algorithm,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, AccessJwtError> {
        let decoding_key = decoding_key(algorithm, access_public_key_pem)
            .map_err(|source| AccessJwtError::InvalidKey { algorithm, source })?;

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    // Verify and decode a JWT access token.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks:
    /// - signature and algorithm
    /// - presence of `exp`, `iss`, `aud`, `sub`
    /// - `exp` and `nbf` (with leeway)
    /// - `iss` and `aud` values (because we set them)
    ///
    /// This method additionally rejects a blank `sub`, the principal fallback.
    pub fn verify_strict(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }

        Ok(claims)
    }

    /// Verify + strict claim validation, then reduce claims to what the request needs.
    ///
    /// This is the entry-point for middleware.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify_strict(token)?;

        Ok(VerifiedAccessToken {
            principal_name: claims.principal_name().to_string(),
            subject: claims.sub,
            jti: claims.jti,
        })
    }
}

fn decoding_key(
    algorithm: Algorithm,
    pem: &str,
) -> Result<DecodingKey, jsonwebtoken::errors::Error> {
    match algorithm {
        Algorithm::EdDSA => DecodingKey::from_ed_pem(pem.as_bytes()),
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem.as_bytes()),
        _ => DecodingKey::from_rsa_pem(pem.as_bytes()),
    }
}
