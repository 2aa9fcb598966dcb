//! Integration tests for the Isha's Fragrance storefront.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`,
//! so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p isha-integration-tests
//! ```
//!
//! # Fixture Catalog
//!
//! | slug | gender | families | sizes | notes |
//! |---|---|---|---|---|
//! | `rose-elegance` | Women | Floral | 50ml 15000, 100ml 25000 | Best Seller, popularity 95 |
//! | `midnight-oud` | Unisex | Oriental, Woody | 50ml 22000, 100ml 38000 | New, popularity 90 |
//! | `citrus-splash` | Unisex | Citrus, Fresh | 30ml 8000, 50ml 12000 | popularity 72 |
//! | `ocean-drift` | Men | Aquatic, Fresh | 100ml 28000 | New, out of stock, popularity 80 |
//! | `cedar-noir` | Men | Woody | 50ml 18000, 100ml 30000 | popularity 88 |

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use isha_core::Catalog;
use isha_storefront::{config::StorefrontConfig, state::AppState};
use serde_json::Value;
use tower::ServiceExt;

const FIXTURE_CATALOG: &str = include_str!("../fixtures/catalog.json");

/// Response bodies larger than this are a bug in the test.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The fixture catalog.
///
/// # Panics
///
/// Panics if the fixture file is not a valid catalog.
#[must_use]
pub fn fixture_catalog() -> Catalog {
    Catalog::from_json(FIXTURE_CATALOG).expect("fixture catalog is valid")
}

/// A storefront router over the fixture catalog with default configuration.
///
/// Every call builds a fresh session store.
///
/// # Panics
///
/// Panics if the default configuration is invalid.
#[must_use]
pub fn test_router() -> Router {
    let config = StorefrontConfig::from_lookup(|_| None).expect("default config is valid");
    isha_storefront::app(AppState::new(config, fixture_catalog()))
}

/// A visitor: sends requests to a router and keeps its session cookie.
#[derive(Clone)]
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

/// Status and parsed JSON body of a response. Non-JSON bodies become strings.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestClient {
    /// A new visitor with no session.
    #[must_use]
    pub const fn new(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    /// A visitor on a fresh fixture router.
    #[must_use]
    pub fn fixture() -> Self {
        Self::new(test_router())
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    pub async fn post_json(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch_json(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Send a request, attaching and then updating the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(&mut self, method: Method, uri: &str, json: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match json {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or(set_cookie);
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("readable body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse { status, body }
    }
}
