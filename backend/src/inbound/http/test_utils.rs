//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::json;

use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::server::memory_http_state;

/// History length used by handler tests; short keeps seeding cheap.
pub const TEST_HISTORY_DAYS: u32 = 30;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state over fresh in-memory adapters.
pub fn memory_state() -> HttpState {
    memory_http_state(Arc::new(DefaultClock), TEST_HISTORY_DAYS)
}

/// Initialise the full `/api/v1` surface over `state`.
pub async fn init_api(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(configure_api),
        ),
    )
    .await
}

/// Log in with the fixture credential and return the session cookie.
pub async fn login_cookie(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "admin", "password": "password" }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "fixture login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
