//! Integration tests for the Cat Care storefront.
//!
//! Requests are driven through the full router (middleware included) with
//! `tower::ServiceExt::oneshot`, so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cat-care-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::Body,
    http::{
        HeaderMap, Method, Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
};
use cat_care_core::ProductId;
use cat_care_storefront::{config::StorefrontConfig, models::Storefront, state::AppState};
use tower::ServiceExt;

/// Catalog seed used unless a test overrides it.
pub const TEST_SEED: &str = "7";

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a header as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A storefront router plus one visitor's session cookie.
pub struct TestApp {
    router: Router,
    state: AppState,
    cookie: Option<String>,
}

impl TestApp {
    /// Storefront with a seeded catalog and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Storefront configured from `vars` on top of the seeded defaults.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    #[must_use]
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let config = StorefrontConfig::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
                .or_else(|| (key == "STOREFRONT_CATALOG_SEED").then(|| TEST_SEED.to_string()))
        })
        .expect("Invalid test configuration");

        let state = AppState::new(config);
        Self {
            router: cat_care_storefront::app(state.clone()),
            state,
            cookie: None,
        }
    }

    /// The storefront every new session starts with.
    ///
    /// Matches what `GET /` generates because the catalog is seeded.
    #[must_use]
    pub fn fresh_storefront(&self) -> Storefront {
        self.state.new_storefront()
    }

    /// IDs of the products in the seeded catalog, in display order.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.fresh_storefront()
            .catalog()
            .products()
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    /// Whether the visitor has a session cookie yet.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// A cloneable sender sharing this visitor's current session cookie.
    ///
    /// Responses sent through it do not update the cookie, so it suits
    /// concurrent requests within one established session.
    #[must_use]
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: self.cookie.clone(),
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let (response, cookie) =
            send(&self.router, self.cookie.as_deref(), Method::GET, path, None).await;
        self.keep_cookie(cookie);
        response
    }

    /// Send a POST request with a form-encoded body.
    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let (response, cookie) = send(
            &self.router,
            self.cookie.as_deref(),
            Method::POST,
            path,
            Some(encode_form(form)),
        )
        .await;
        self.keep_cookie(cookie);
        response
    }

    fn keep_cookie(&mut self, cookie: Option<String>) {
        if cookie.is_some() {
            self.cookie = cookie;
        }
    }
}

/// Sends requests for one visitor without owning the [`TestApp`].
#[derive(Clone)]
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Send a POST request with a form-encoded body.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let (response, _) = send(
            &self.router,
            self.cookie.as_deref(),
            Method::POST,
            path,
            Some(encode_form(form)),
        )
        .await;
        response
    }
}

/// Drive one request through the router. Returns the response and the
/// session cookie it set, if any.
async fn send(
    router: &Router,
    cookie: Option<&str>,
    method: Method,
    path: &str,
    form: Option<String>,
) -> (TestResponse, Option<String>) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form)
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(String::from);

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    let response = TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    };
    (response, set_cookie)
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode form pairs as `application/x-www-form-urlencoded`.
fn encode_form(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).expect("Form pairs are always encodable")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form() {
        assert_eq!(encode_form(&[("step", "2")]), "step=2");
        assert_eq!(
            encode_form(&[("product_id", "a b"), ("x", "&=")]),
            "product_id=a+b&x=%26%3D"
        );
    }
}
