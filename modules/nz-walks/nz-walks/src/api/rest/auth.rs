//! Bearer-token role checks for the region endpoints.

use std::sync::Arc;

use anyhow::bail;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::ApiError;
use super::problem::Problem;
use crate::config::AuthConfig;

/// Roles carried in the token's `roles` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Reader,
    Writer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reader => "Reader",
            Self::Writer => "Writer",
        }
    }

    /// Reads need `Reader`; every other verb needs `Writer`.
    #[must_use]
    pub fn required_for(method: &Method) -> Self {
        if method == Method::GET || method == Method::HEAD {
            Self::Reader
        } else {
            Self::Writer
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: u64,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Role '{}' is required", .0.as_str())]
    Forbidden(Role),
}

impl AuthError {
    pub fn to_problem(&self) -> Problem {
        match self {
            Self::MissingToken | Self::InvalidToken(_) => {
                Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", self.to_string())
                    .with_code("UNAUTHORIZED")
            }
            Self::Forbidden(_) => Problem::new(StatusCode::FORBIDDEN, "Forbidden", self.to_string())
                .with_code("FORBIDDEN"),
        }
    }
}

/// Token verification settings resolved once at startup.
pub struct AuthState {
    enabled: bool,
    key: Option<DecodingKey>,
    validation: Validation,
}

impl AuthState {
    /// # Errors
    /// Fails when auth is enabled without a `jwt_secret`.
    pub fn from_config(cfg: &AuthConfig) -> anyhow::Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = cfg.leeway_seconds;
        match &cfg.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &cfg.issuer {
            validation.set_issuer(&[iss]);
        }

        let key = cfg
            .jwt_secret
            .as_ref()
            .map(|secret| DecodingKey::from_secret(secret.expose_secret().as_bytes()));

        if cfg.enabled && key.is_none() {
            bail!("auth.enabled is true but auth.jwt_secret is not set");
        }

        Ok(Self {
            enabled: cfg.enabled,
            key,
            validation,
        })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Verify the bearer token and check it grants `role`.
    ///
    /// # Errors
    /// `MissingToken`/`InvalidToken` for authentication failures, `Forbidden`
    /// when the token is valid but lacks the role.
    pub fn authorize(&self, headers: &HeaderMap, role: Role) -> Result<Claims, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| AuthError::InvalidToken("no verification key configured".to_owned()))?;

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.roles.iter().any(|r| r == role.as_str()) {
            Ok(claims)
        } else {
            Err(AuthError::Forbidden(role))
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Route layer for the region endpoints.
pub async fn require_role(
    State(auth): State<Arc<AuthState>>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.is_enabled() {
        return next.run(req).await;
    }

    let role = Role::required_for(req.method());
    match auth.authorize(req.headers(), role) {
        Ok(claims) => {
            tracing::debug!(
                sub = claims.sub.as_deref().unwrap_or("n/a"),
                role = role.as_str(),
                "Authorized"
            );
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, role = role.as_str(), "Rejected request");
            ApiError::from(e).into_response()
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use secrecy::SecretString;

    const SECRET: &str = "test-signing-secret";

    fn token(secret: &str, roles: &[&str], exp_offset: i64) -> String {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let exp = now.checked_add_signed(exp_offset).unwrap();
        let claims = Claims {
            sub: Some("tester".to_owned()),
            exp,
            roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn state() -> AuthState {
        AuthState::from_config(&AuthConfig {
            enabled: true,
            jwt_secret: Some(SecretString::from(SECRET.to_owned())),
            leeway_seconds: 0,
            ..AuthConfig::default()
        })
        .unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn enabled_without_secret_is_a_startup_error() {
        let cfg = AuthConfig {
            enabled: true,
            ..AuthConfig::default()
        };
        assert!(AuthState::from_config(&cfg).is_err());
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = state().authorize(&HeaderMap::new(), Role::Reader).unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
        assert_eq!(err.to_problem().status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn wrong_scheme_is_unauthorized() {
        let t = token(SECRET, &["Reader"], 300);
        let err = state()
            .authorize(&headers(&format!("Basic {t}")), Role::Reader)
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[test]
    fn bad_signature_and_expired_tokens_are_invalid() {
        let forged = token("other-secret", &["Reader"], 300);
        let err = state()
            .authorize(&headers(&format!("Bearer {forged}")), Role::Reader)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));

        let expired = token(SECRET, &["Reader"], -600);
        let err = state()
            .authorize(&headers(&format!("Bearer {expired}")), Role::Reader)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn reader_cannot_write() {
        let t = token(SECRET, &["Reader"], 300);
        let h = headers(&format!("Bearer {t}"));

        assert!(state().authorize(&h, Role::Reader).is_ok());
        let err = state().authorize(&h, Role::Writer).unwrap_err();
        assert!(matches!(err, AuthError::Forbidden(Role::Writer)));
        assert_eq!(err.to_problem().status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn writer_role_does_not_imply_reader() {
        let t = token(SECRET, &["Writer"], 300);
        let h = headers(&format!("bearer {t}"));
        assert!(state().authorize(&h, Role::Writer).is_ok());
        assert!(state().authorize(&h, Role::Reader).is_err());
    }

    #[test]
    fn role_follows_http_method() {
        assert_eq!(Role::required_for(&Method::GET), Role::Reader);
        assert_eq!(Role::required_for(&Method::POST), Role::Writer);
        assert_eq!(Role::required_for(&Method::PUT), Role::Writer);
        assert_eq!(Role::required_for(&Method::DELETE), Role::Writer);
    }
}
