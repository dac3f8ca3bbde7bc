use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::models::Role;

/// Path of the login page. Unauthenticated visitors of protected pages are sent here.
pub const LOGIN_PATH: &str = "/login";

/// RouteTable
///
/// An ordered list of path prefixes belonging to one category.
/// Immutable and shared process-wide, so concurrent reads need no locking.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    entries: &'static [&'static str],
}

impl RouteTable {
    pub const fn new(entries: &'static [&'static str]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [&'static str] {
        self.entries
    }

    /// matches
    ///
    /// True when `path` equals an entry or is a sub-path of one.
    /// The boundary must be a `/`: `/episodesArchive` does not match `/episodes`.
    pub fn matches(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| {
            path == *entry
                || path
                    .strip_prefix(entry)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

// --- Static Tables ---

/// Marketing and catalogue pages, reachable by anyone.
pub static PUBLIC_ROUTES: RouteTable = RouteTable::new(&[
    "/",
    "/about",
    "/contact",
    "/episodes",
    "/teachers",
    "/courses",
    "/faq",
    "/privacy-policy",
    "/terms",
]);

/// Identity flow pages. Treated as public so a logged-out visitor can reach them.
pub static AUTH_ROUTES: RouteTable = RouteTable::new(&[
    LOGIN_PATH,
    "/register",
    "/forgot-password",
    "/reset-password",
    "/verify-otp",
    "/confirm-email",
]);

/// Teacher dashboard and everything below it (wallet, schedule, ...).
pub static TEACHER_ROUTES: RouteTable = RouteTable::new(&["/Teacher"]);

/// Student dashboard and everything below it (student-chat, bookings, ...).
pub static STUDENT_ROUTES: RouteTable = RouteTable::new(&["/Student"]);

/// Prefixes that are never page navigations (bundles, images, API proxying).
static EXCLUDED_PREFIXES: RouteTable = RouteTable::new(&["/_next", "/api"]);

/// Exact paths that are never page navigations.
static EXCLUDED_FILES: &[&str] = &["/favicon.ico", "/robots.txt", "/sitemap.xml"];

/// Extensions served as static files by the frontend. Documents such as `.pdf`
/// are not in the list and stay gated.
static STATIC_EXTENSIONS: &[&str] = &[
    "js", "css", "map", "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "woff", "woff2",
];

/// RouteCategory
///
/// The static classification of a path. `Protected` is the default for
/// paths matching no table: login required, no role restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum RouteCategory {
    Public,
    Auth,
    TeacherOnly,
    StudentOnly,
    Protected,
}

/// classify
///
/// Returns the single category a path belongs to, checking the tables in
/// order public, auth, teacher-only, student-only.
pub fn classify(path: &str) -> RouteCategory {
    if PUBLIC_ROUTES.matches(path) {
        RouteCategory::Public
    } else if AUTH_ROUTES.matches(path) {
        RouteCategory::Auth
    } else if TEACHER_ROUTES.matches(path) {
        RouteCategory::TeacherOnly
    } else if STUDENT_ROUTES.matches(path) {
        RouteCategory::StudentOnly
    } else {
        RouteCategory::Protected
    }
}

/// Public or auth page: reachable without a session.
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.matches(path) || AUTH_ROUTES.matches(path)
}

pub fn is_teacher_route(path: &str) -> bool {
    TEACHER_ROUTES.matches(path)
}

pub fn is_student_route(path: &str) -> bool {
    STUDENT_ROUTES.matches(path)
}

/// is_excluded
///
/// Static assets and API calls bypass the gatekeeper entirely. A path counts
/// as a static asset only when its extension is a known static type and it is
/// not under a role-restricted table.
pub fn is_excluded(path: &str) -> bool {
    if EXCLUDED_PREFIXES.matches(path) || EXCLUDED_FILES.iter().any(|file| *file == path) {
        return true;
    }

    if TEACHER_ROUTES.matches(path) || STUDENT_ROUTES.matches(path) {
        return false;
    }

    path.rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .is_some_and(|(stem, ext)| {
            !stem.is_empty()
                && STATIC_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// default_dashboard
///
/// Landing page for a role. Without a recognised role the visitor stays on `/`.
pub fn default_dashboard(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Teacher) => "/Teacher",
        Some(Role::Student) => "/Student",
        None => "/",
    }
}

/// login_redirect
///
/// Builds `/login?redirect=<path>` with the original path encoded the way the
/// browser's `encodeURIComponent` does, so `/TeacherProfile` becomes
/// `/login?redirect=%2FTeacherProfile` and `!'()*` stay literal.
pub fn login_redirect(path: &str) -> String {
    format!("{}?redirect={}", LOGIN_PATH, encode_uri_component(path))
}

/// Percent-encodes like `encodeURIComponent`: `urlencoding` leaves only
/// `A-Z a-z 0-9 - _ . ~` bare, the browser also keeps `! ' ( ) *`.
fn encode_uri_component(value: &str) -> String {
    // A literal `%` is emitted as `%25`, so these sequences only come from the five marks.
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}
