use tutoring_gate::{
    AuthClaim, Decision, RedirectReason, decide, evaluate,
    route_table::{AUTH_ROUTES, PUBLIC_ROUTES, RouteCategory},
};

// --- Helper Functions ---

const TEACHER: &str = r#"{"state":{"isAuthenticated":true,"user":{"userType":"teacher"}}}"#;
const STUDENT: &str = r#"{"state":{"isAuthenticated":true,"user":{"userType":"student"}}}"#;

fn decide_with(cookie: Option<&str>, path: &str) -> Decision {
    decide(path, &AuthClaim::from_cookie(cookie))
}

fn redirect(location: &str, reason: RedirectReason) -> Decision {
    Decision::Redirect {
        location: location.to_string(),
        reason,
    }
}

/// Cookies covering every way a claim can be absent, broken or valid.
fn cookie_variants() -> Vec<Option<&'static str>> {
    vec![
        None,
        Some("{bad"),
        Some(r#"{"state":{"isAuthenticated":true}}"#),
        Some(r#"{"state":{"isAuthenticated":false}}"#),
        Some(TEACHER),
        Some(STUDENT),
    ]
}

// --- Public Routes ---

#[test]
fn test_public_and_auth_routes_always_allowed() {
    for cookie in cookie_variants() {
        for entry in PUBLIC_ROUTES.entries().iter().chain(AUTH_ROUTES.entries()) {
            if *entry == "/" {
                continue;
            }
            assert_eq!(decide_with(cookie, entry), Decision::Allow, "{entry} with {cookie:?}");
            let sub_path = format!("{entry}/nested");
            assert_eq!(decide_with(cookie, &sub_path), Decision::Allow, "{sub_path}");
        }
    }
}

#[test]
fn test_about_allowed_when_logged_out() {
    let decision = decide_with(Some(r#"{"state":{"isAuthenticated":false}}"#), "/about");
    assert!(decision.is_allow());
}

#[test]
fn test_prefix_boundary_applies_to_decisions() {
    assert!(decide_with(None, "/episodes/123").is_allow());
    assert_eq!(
        decide_with(None, "/episodesArchive"),
        redirect("/login?redirect=%2FepisodesArchive", RedirectReason::Login)
    );
}

// --- Login Redirects ---

#[test]
fn test_protected_path_without_cookie_redirects_to_login() {
    assert_eq!(
        decide_with(None, "/TeacherProfile"),
        redirect("/login?redirect=%2FTeacherProfile", RedirectReason::Login)
    );
    assert_eq!(
        decide_with(None, "/Teacher/wallet").location(),
        Some("/login?redirect=%2FTeacher%2Fwallet")
    );
}

#[test]
fn test_malformed_cookie_redirects_to_login() {
    assert_eq!(
        decide_with(Some("{bad"), "/Student"),
        redirect("/login?redirect=%2FStudent", RedirectReason::Login)
    );
}

#[test]
fn test_authenticated_without_user_equals_no_cookie() {
    let broken = Some(r#"{"state":{"isAuthenticated":true}}"#);
    for path in ["/", "/about", "/Student", "/Teacher/wallet", "/payment", "/login"] {
        assert_eq!(decide_with(broken, path), decide_with(None, path), "{path}");
    }
}

#[test]
fn test_unknown_role_redirects_to_login_on_protected() {
    let admin = Some(r#"{"state":{"isAuthenticated":true,"user":{"userType":"admin"}}}"#);
    assert_eq!(
        decide_with(admin, "/notifications"),
        redirect("/login?redirect=%2Fnotifications", RedirectReason::Login)
    );
    // Root stays public without a role.
    assert!(decide_with(admin, "/").is_allow());
}

// --- Cross-Role ---

#[test]
fn test_teacher_on_student_pages_goes_to_teacher_dashboard() {
    assert_eq!(
        decide_with(Some(TEACHER), "/Student"),
        redirect("/Teacher", RedirectReason::CrossRole)
    );
    assert_eq!(
        decide_with(Some(TEACHER), "/Student/student-chat"),
        redirect("/Teacher", RedirectReason::CrossRole)
    );
}

#[test]
fn test_student_on_teacher_pages_goes_to_student_dashboard() {
    assert_eq!(
        decide_with(Some(STUDENT), "/Teacher/wallet"),
        redirect("/Student", RedirectReason::CrossRole)
    );
}

#[test]
fn test_own_role_pages_allowed() {
    assert!(decide_with(Some(TEACHER), "/Teacher/wallet").is_allow());
    assert!(decide_with(Some(STUDENT), "/Student/student-chat").is_allow());
    assert!(decide_with(Some(TEACHER), "/TeacherProfile").is_allow());
    assert!(decide_with(Some(STUDENT), "/payment").is_allow());
}

// --- Root ---

#[test]
fn test_root_sends_signed_in_users_to_dashboard() {
    assert_eq!(
        decide_with(Some(TEACHER), "/"),
        redirect("/Teacher", RedirectReason::Dashboard)
    );
    assert_eq!(
        decide_with(Some(STUDENT), "/"),
        redirect("/Student", RedirectReason::Dashboard)
    );
}

#[test]
fn test_root_allowed_when_logged_out() {
    assert!(decide_with(None, "/").is_allow());
    assert!(decide_with(Some("{bad"), "/").is_allow());
}

// --- Determinism & Reports ---

#[test]
fn test_decisions_are_repeatable() {
    for cookie in cookie_variants() {
        for path in ["/", "/Student", "/Teacher", "/about", "/x"] {
            assert_eq!(decide_with(cookie, path), decide_with(cookie, path));
        }
    }
}

#[test]
fn test_report_describes_redirect() {
    let report = decide_with(Some(TEACHER), "/Student").report("/Student");
    assert_eq!(report.category, RouteCategory::StudentOnly);
    assert_eq!(report.outcome, "redirect");
    assert_eq!(report.location.as_deref(), Some("/Teacher"));
    assert_eq!(report.reason.as_deref(), Some("cross-role"));
}

#[test]
fn test_report_describes_allow() {
    let report = decide_with(None, "/about").report("/about");
    assert_eq!(report.category, RouteCategory::Public);
    assert_eq!(report.outcome, "allow");
    assert!(report.location.is_none());
    assert!(report.reason.is_none());
}

// --- Exclusions ---

#[test]
fn test_evaluate_bypasses_static_assets() {
    let claim = AuthClaim::from_cookie(None);
    assert_eq!(evaluate("/_next/static/chunks/app.js", &claim), Decision::Bypass);
    assert_eq!(evaluate("/images/hero.webp", &claim), Decision::Bypass);
}

#[test]
fn test_evaluate_gates_files_under_role_pages() {
    let anonymous = AuthClaim::from_cookie(None);
    assert_eq!(
        evaluate("/Student/report.pdf", &anonymous),
        redirect("/login?redirect=%2FStudent%2Freport.pdf", RedirectReason::Login)
    );
    assert_eq!(
        evaluate("/Teacher/wallet.v2", &anonymous),
        redirect("/login?redirect=%2FTeacher%2Fwallet.v2", RedirectReason::Login)
    );

    let teacher = AuthClaim::from_cookie(Some(TEACHER));
    assert_eq!(
        evaluate("/Student/profile.edit", &teacher),
        redirect("/Teacher", RedirectReason::CrossRole)
    );
}

#[test]
fn test_evaluate_matches_decide_for_navigations() {
    for cookie in cookie_variants() {
        let claim = AuthClaim::from_cookie(cookie);
        for path in ["/", "/Student", "/Teacher/wallet", "/about", "/payment"] {
            assert_eq!(evaluate(path, &claim), decide(path, &claim), "{path}");
        }
    }
}

#[test]
fn test_report_describes_bypass() {
    let path = "/_next/static/app.js";
    let report = evaluate(path, &AuthClaim::anonymous()).report(path);
    assert_eq!(report.outcome, "bypass");
    assert!(report.location.is_none());
}
