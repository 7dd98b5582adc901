//! Access token issuance, verification and revocation.
//!
//! Tokens are HS256 JWTs carrying the user id as subject, a unique `jti`
//! and a 30-minute absolute expiry. Revocation writes the `jti` into the
//! ledger with a TTL equal to the lifetime cap, so the entry outlives the
//! token's own validity window and then expires on its own.
//!
//! The signing secret is passed in explicitly. When it is generated fresh
//! at startup (no `TOKEN_SIGNING_SECRET` configured), a process restart
//! invalidates every previously issued token.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::repositories::{RevocationLedger, UserRepository};
use crate::error::AppError;

/// Absolute token lifetime. Doubles as the revocation entry TTL cap.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// JWT claims carried by every access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id.
    pub sub: i64,
    /// Unique token identifier, checked against the revocation ledger.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Capability object produced by a successful verification.
///
/// Handed to guarded handlers through a request extension — handlers never
/// re-derive the caller from ambient state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub jti: String,
}

/// Issues, verifies and revokes access tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    users: Arc<dyn UserRepository>,
    ledger: Arc<dyn RevocationLedger>,
}

impl TokenService {
    /// Creates a token service keyed by `signing_secret`.
    pub fn new(
        signing_secret: &str,
        users: Arc<dyn UserRepository>,
        ledger: Arc<dyn RevocationLedger>,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_secret.as_bytes()),
            users,
            ledger,
        }
    }

    /// Issues a signed token for `user`, expiring in [`TOKEN_LIFETIME`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_LIFETIME.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            AppError::internal("Please try again after sometime", json!({}))
        })
    }

    /// Verifies a token end to end: signature, expiry (no leeway), the
    /// revocation ledger, and finally that the subject still exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on any of: bad signature, expired,
    /// revoked jti, or missing subject. Ledger unavailability surfaces as
    /// [`AppError::Internal`] (fail-closed).
    pub async fn verify(&self, token: &str) -> Result<AuthContext, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "invalid or expired token" }),
            )
        })?;

        if self.ledger.is_revoked(&data.claims.jti).await? {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "token revoked" }),
            ));
        }

        let user = self
            .users
            .find_by_id(data.claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "subject no longer exists" }),
                )
            })?;

        Ok(AuthContext {
            user,
            jti: data.claims.jti,
        })
    }

    /// Revokes a token identifier. Idempotent: revoking an already-revoked
    /// or unknown jti succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the ledger write fails — a
    /// logout that cannot be recorded must not report success.
    pub async fn revoke(&self, jti: &str) -> Result<(), AppError> {
        self.ledger.revoke(jti, TOKEN_LIFETIME).await
    }
}
