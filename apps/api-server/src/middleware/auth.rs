//! Bearer-token authentication extractor.

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, ResponseError,
    dev::Payload,
    http::{StatusCode, header},
    web,
};
use std::future::{Ready, ready};

use posts_core::ports::{AuthError, TokenClaims};
use posts_shared::ErrorResponse;

use crate::state::AppState;

const ANONYMOUS: &str = "anonymous";

/// Authenticated principal.
///
/// Take it as the first handler argument so the gate runs before any other
/// extraction:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.subject)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

impl Identity {
    /// Principal used for every request when auth is disabled.
    pub fn anonymous() -> Self {
        Self {
            subject: ANONYMOUS.to_string(),
        }
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.subject,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please obtain a new one."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
        };

        HttpResponse::build(self.status_code())
            .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
            .json(error)
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(actix_web::error::ErrorInternalServerError(
                "Server configuration error",
            )));
        };

        if !state.auth_enabled {
            return ready(Ok(Identity::anonymous()));
        }

        let result = bearer_token(req)
            .and_then(|token| state.tokens.validate_token(token))
            .map(Identity::from);

        match result {
            Ok(identity) => ready(Ok(identity)),
            Err(e) => {
                tracing::debug!(reason = %e, "Rejected request");
                ready(Err(AuthenticationError(e).into()))
            }
        }
    }
}

/// Extract `<token>` from `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    if token.is_empty() {
        return Err(AuthError::MissingAuth);
    }

    Ok(token)
}
