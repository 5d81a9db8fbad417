//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with an empty `request_id` field)
//! 3. Request ID (fill in the span field, echo the header)
//! 4. Security headers (CSP, COOP, etc.)
//! 5. Session lock (one request per session cookie at a time)
//! 6. Session layer (tower-sessions with the moka store)

pub mod request_id;
pub mod security_headers;
pub mod session;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{create_session_layer, session_lock_middleware};
