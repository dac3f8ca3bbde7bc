use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::route_table::RouteCategory;

// --- Session Schemas (Mirroring the frontend auth store) ---

/// Role
///
/// The marketplace user type. Any other `userType` value is treated as "no role".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

/// SessionUser
///
/// The user object written by the frontend auth store. Only `userType` is
/// interpreted; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionUser {
    #[serde(rename = "userType", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SessionUser {
    pub fn role(&self) -> Option<Role> {
        self.user_type.as_deref().and_then(Role::parse)
    }
}

/// AuthClaim
///
/// The authentication assertion decoded from the `auth-storage` cookie.
/// Rebuilt on every request and never cached.
///
/// Invariant: `is_authenticated` implies `user.is_some()`. Construction goes
/// through `AuthClaim::authenticated` / `AuthClaim::anonymous` to keep it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthClaim {
    is_authenticated: bool,
    #[ts(type = "Record<string, unknown> | null")]
    #[schema(value_type = Option<Object>)]
    user: Option<SessionUser>,
}

impl AuthClaim {
    /// The fail-closed claim: logged out, no user.
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            user: None,
        }
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// role
    ///
    /// `None` unless the claim is authenticated and carries a recognised `userType`.
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated {
            return None;
        }
        self.user.as_ref().and_then(SessionUser::role)
    }
}

// --- Response Payloads ---

/// DecisionReport
///
/// Response of `GET /_gate/decision`: what the gatekeeper would do for a
/// path given the caller's cookie.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DecisionReport {
    pub path: String,
    pub category: RouteCategory,
    /// `"allow"`, `"bypass"` or `"redirect"`.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// DecisionQuery
///
/// Query string of `GET /_gate/decision`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DecisionQuery {
    /// The navigation path to evaluate, e.g. `/Student/student-chat`.
    pub path: String,
}
