//! HS256 bearer tokens.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use posts_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";
const DEFAULT_ISSUER: &str = "posts-api";
const DEFAULT_EXPIRATION_HOURS: i64 = 24;
/// Ten years. Longer lifetimes are treated as misconfiguration.
const MAX_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

/// Signing settings shared by the server and the `issue-token` tool.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: DEFAULT_EXPIRATION_HOURS,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`, falling
    /// back to the defaults for anything unset, unparseable or out of range.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|hours| parse_expiration_hours(&hours))
                .unwrap_or(defaults.expiration_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        if config.uses_default_secret() {
            let production = matches!(
                std::env::var("RUST_ENV").as_deref(),
                Ok("production") | Ok("prod")
            );
            if production {
                tracing::error!("SECURITY: JWT_SECRET is unset in production; tokens are forgeable");
            } else {
                tracing::warn!("JWT_SECRET is unset; using the development default");
            }
        }

        config
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

fn parse_expiration_hours(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(hours) if (1..=MAX_EXPIRATION_HOURS).contains(&hours) => Some(hours),
        _ => {
            tracing::warn!(value = raw, "JWT_EXPIRATION_HOURS is invalid; using the default");
            None
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// [`TokenService`] backed by `jsonwebtoken`.
pub struct JwtTokenService {
    config: JwtConfig,
    signer: EncodingKey,
    verifier: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);

        Self {
            signer: EncodingKey::from_secret(config.secret.as_bytes()),
            verifier: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, subject: &str) -> Result<String, AuthError> {
        let issued = Utc::now();
        let expires = TimeDelta::try_hours(self.config.expiration_hours)
            .and_then(|lifetime| issued.checked_add_signed(lifetime))
            .ok_or_else(|| AuthError::InvalidToken("Token lifetime is out of range".to_string()))?;

        let claims = Claims {
            sub: subject.to_owned(),
            exp: expires.timestamp(),
            iat: issued.timestamp(),
            iss: self.config.issuer.clone(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.signer)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.verifier, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?
            .claims;

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("Token has no subject".to_string()));
        }

        Ok(TokenClaims {
            subject: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours.saturating_mul(3600)
    }
}
