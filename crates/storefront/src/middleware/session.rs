//! Session middleware configuration.
//!
//! Sessions live in a bounded moka cache. A record is evicted once its expiry
//! passes or when the cache is full, so abandoned visits do not accumulate.
//! Storefront state is lost on restart and replaced on every full page load.
//!
//! Requests carrying the same session cookie are handled one at a time. The
//! session layer writes the record back after the handler returns, so the
//! lock wraps the whole layer rather than only the handler.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use tower_sessions::cookie::Cookie;
use tower_sessions::session::Id;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;
use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "cat_care_session";

/// Idle time before a session is dropped (1 hour).
const SESSION_EXPIRY_SECONDS: i64 = 60 * 60;

/// Most sessions held at once; the least recently used go first.
pub const SESSION_CAPACITY: u64 = 10_000;

/// Create the session store.
#[must_use]
pub fn create_session_store() -> MokaStore {
    MokaStore::new(Some(SESSION_CAPACITY))
}

/// Create the session layer over a fresh [`create_session_store`].
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(create_session_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Serialize requests that share a session cookie.
///
/// Must be layered outside the session layer. Requests without a session
/// cookie start a new session and are not locked.
pub async fn session_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(id) = session_id(request.headers()) else {
        return next.run(request).await;
    };

    let _guard = state.session_locks().acquire(id).await;
    next.run(request).await
}

fn session_id(headers: &HeaderMap) -> Option<Id> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .and_then(|cookie| cookie.value().parse().ok())
}
