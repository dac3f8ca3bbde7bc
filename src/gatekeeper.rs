use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    models::{AuthClaim, DecisionReport, Role},
    route_table::{self, classify, default_dashboard, is_public_route, login_redirect},
};

/// RedirectReason
///
/// Which branch of the decision produced a redirect. Used for logging and
/// the `/_gate/decision` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Protected page without a usable session.
    Login,
    /// Signed-in user on the other role's pages.
    CrossRole,
    /// Signed-in user on `/`, sent to their dashboard.
    Dashboard,
}

impl RedirectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectReason::Login => "login",
            RedirectReason::CrossRole => "cross-role",
            RedirectReason::Dashboard => "dashboard",
        }
    }
}

/// Decision
///
/// Terminal outcome of the gatekeeper for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Asset or API request: forwarded without looking at the session.
    Bypass,
    Redirect {
        location: String,
        reason: RedirectReason,
    },
}

impl Decision {
    fn redirect(location: impl Into<String>, reason: RedirectReason) -> Self {
        Decision::Redirect {
            location: location.into(),
            reason,
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Decision::Allow | Decision::Bypass => None,
            Decision::Redirect { location, .. } => Some(location),
        }
    }

    /// Describes this decision for `path` in the shape served by `/_gate/decision`.
    pub fn report(&self, path: &str) -> DecisionReport {
        let (outcome, location, reason) = match self {
            Decision::Allow => ("allow", None, None),
            Decision::Bypass => ("bypass", None, None),
            Decision::Redirect { location, reason } => (
                "redirect",
                Some(location.clone()),
                Some(reason.as_str().to_string()),
            ),
        };
        DecisionReport {
            path: path.to_string(),
            category: classify(path),
            outcome: outcome.to_string(),
            location,
            reason,
        }
    }
}

/// decide
///
/// The gatekeeper decision tree. Pure: no I/O, no memory between calls, so
/// the same path and claim always give the same decision.
///
/// Evaluated in order:
/// 1. Public or auth page → allow. The root page is the one exception: a
///    signed-in user with a role on `/` falls through to step 4.
/// 2. No session, or a session without a recognised role → login redirect
///    carrying the original path.
/// 3. Teacher on student pages → `/Teacher`; student on teacher pages → `/Student`.
/// 4. Exactly `/` → the role's dashboard.
/// 5. Allow.
pub fn decide(path: &str, claim: &AuthClaim) -> Decision {
    let role = claim.role();

    if is_public_route(path) && !(path == "/" && role.is_some()) {
        return Decision::Allow;
    }

    let Some(role) = role else {
        return Decision::redirect(login_redirect(path), RedirectReason::Login);
    };

    let cross_role = match role {
        Role::Teacher => route_table::is_student_route(path),
        Role::Student => route_table::is_teacher_route(path),
    };
    if cross_role {
        return Decision::redirect(default_dashboard(Some(role)), RedirectReason::CrossRole);
    }

    if path == "/" {
        return Decision::redirect(default_dashboard(Some(role)), RedirectReason::Dashboard);
    }

    Decision::Allow
}

/// evaluate
///
/// What the middleware does for a request: `Bypass` for excluded asset and
/// API paths, otherwise the result of `decide`. The `/_gate/decision` report
/// goes through here too, so it always matches live navigation.
pub fn evaluate(path: &str, claim: &AuthClaim) -> Decision {
    if route_table::is_excluded(path) {
        return Decision::Bypass;
    }
    decide(path, claim)
}

/// gatekeeper_middleware
///
/// Runs `evaluate` before every gated navigation.
///
/// *Mechanism*: asset and API paths skip the check. For everything else the
/// `AuthClaim` extractor rebuilds the claim from the cookie; an allow runs the
/// inner service (the frontend proxy), a redirect short-circuits with a
/// `307 Temporary Redirect`.
pub async fn gatekeeper_middleware(
    claim: AuthClaim,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    match evaluate(&path, &claim) {
        Decision::Bypass => next.run(request).await,
        Decision::Allow => {
            tracing::debug!(path = %path, role = ?claim.role(), "navigation allowed");
            next.run(request).await
        }
        Decision::Redirect { location, reason } => {
            tracing::info!(
                path = %path,
                location = %location,
                reason = reason.as_str(),
                "navigation redirected"
            );
            Redirect::temporary(&location).into_response()
        }
    }
}
