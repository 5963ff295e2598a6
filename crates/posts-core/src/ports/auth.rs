//! Authentication ports.

/// Claims carried by a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Opaque principal identifier (`sub`).
    pub subject: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Token service trait for bearer token operations.
pub trait TokenService: Send + Sync {
    /// Issue an access token for a principal.
    fn generate_token(&self, subject: &str) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
