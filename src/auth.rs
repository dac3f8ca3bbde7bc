use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use serde_json::Value;
use std::convert::Infallible;

use crate::{
    config::AppConfig,
    errors::ClaimError,
    models::{AuthClaim, SessionUser},
};

/// cookie_value
///
/// Finds `name=value` in a raw `Cookie` header. The frontend auth store writes
/// its JSON URL-encoded, so the value is percent-decoded; a value that does not
/// decode to UTF-8 is returned as-is.
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() != name {
            return None;
        }
        let value = value.trim();
        Some(
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        )
    })
}

/// JavaScript truthiness, since the store is written by the frontend.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn session_user(value: Value) -> SessionUser {
    match value {
        Value::Object(mut fields) => {
            let user_type = match fields.remove("userType") {
                Some(Value::String(s)) => Some(s),
                Some(other) => {
                    // Keep non-string values visible to the introspection endpoint.
                    fields.insert("userType".to_string(), other);
                    None
                }
                None => None,
            };
            SessionUser { user_type, fields }
        }
        // A truthy non-object user: signed in, but no role can be read from it.
        _ => SessionUser::default(),
    }
}

/// Parses the persisted store into its `state` object.
fn parse_state(raw: &str) -> Result<serde_json::Map<String, Value>, ClaimError> {
    let document: Value = serde_json::from_str(raw)?;
    match document {
        Value::Object(mut root) => match root.remove("state") {
            Some(Value::Object(state)) => Ok(state),
            _ => Err(ClaimError::MissingState),
        },
        _ => Err(ClaimError::MissingState),
    }
}

impl AuthClaim {
    /// from_cookie
    ///
    /// Decodes the `auth-storage` cookie value into a claim.
    ///
    /// * absent cookie → anonymous.
    /// * malformed JSON or no `state` object → anonymous (logged, never an error).
    /// * `isAuthenticated` truthy but `user` falsy → anonymous. A half-written
    ///   store must not grant a session.
    /// * otherwise the flag and user are taken as written. The cookie is not
    ///   signed; only its shape is checked.
    pub fn from_cookie(raw: Option<&str>) -> AuthClaim {
        let Some(raw) = raw else {
            return AuthClaim::anonymous();
        };

        let mut state = match parse_state(raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable auth cookie");
                return AuthClaim::anonymous();
            }
        };

        let is_authenticated = state.get("isAuthenticated").is_some_and(is_truthy);
        if !is_authenticated {
            return AuthClaim::anonymous();
        }

        match state.remove("user").filter(is_truthy) {
            Some(user) => AuthClaim::authenticated(session_user(user)),
            None => {
                tracing::debug!("auth cookie claims a session without a user, treating as anonymous");
                AuthClaim::anonymous()
            }
        }
    }
}

/// AuthClaim Extractor Implementation
///
/// Builds the claim from the request's cookies, using the cookie name held in
/// `AppConfig`. Infallible: a missing or broken cookie yields an anonymous
/// claim, and the gatekeeper decides what to do with it.
impl<S> FromRequestParts<S> for AuthClaim
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        // Browsers send one Cookie header, HTTP/2 clients may split it.
        let raw = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| cookie_value(header, &config.auth_cookie));

        Ok(AuthClaim::from_cookie(raw.as_deref()))
    }
}
