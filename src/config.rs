use std::env;

/// Default cookie written by the frontend's persisted auth store.
pub const DEFAULT_AUTH_COOKIE: &str = "auth-storage";

/// AppConfig
///
/// Holds the gatekeeper's entire configuration state. Immutable once loaded and
/// pulled into handlers and extractors via FromRef.
///
/// The route tables are not part of it: they are compile-time constants in
/// `route_table`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and which variables are mandatory.
    pub env: Env,
    // Socket address the gatekeeper listens on.
    pub bind_addr: String,
    // Base URL of the web frontend that allowed navigations are forwarded to.
    pub frontend_url: String,
    // Name of the cookie carrying the serialized auth store.
    pub auth_cookie: String,
}

/// Env
///
/// The runtime context: local development (pretty logs, default frontend URL)
/// or production (JSON logs, explicit frontend URL).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// A non-panicking configuration for tests, independent of the process environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            frontend_url: "http://localhost:3001".to_string(),
            auth_cookie: DEFAULT_AUTH_COOKIE.to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables at startup.
    ///
    /// # Panics
    /// Panics in production when `FRONTEND_URL` is not set. Forwarding allowed
    /// traffic to a guessed address is worse than not starting.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let frontend_url = match env {
            Env::Production => env::var("FRONTEND_URL")
                .expect("FATAL: FRONTEND_URL must be set in production."),
            Env::Local => {
                env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
            }
        };

        Self {
            env,
            bind_addr: env::var("GATE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            auth_cookie: env::var("AUTH_COOKIE_NAME")
                .unwrap_or_else(|_| DEFAULT_AUTH_COOKIE.to_string()),
        }
    }
}
