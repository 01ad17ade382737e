//! Tests for the login handler.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::MockLoginService;
use crate::domain::{FIXTURE_ORGANIZATION_ID, OrganizationId, Principal, UserId};
use crate::inbound::http::test_utils::{memory_state, test_session_middleware};

#[derive(Debug)]
struct ValidationExpectation<'a> {
    message: &'a str,
    field: &'a str,
    code: &'a str,
}

fn app_with(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").service(login).service(whoami))
}

#[actix_web::get("/whoami")]
async fn whoami(principal: Principal) -> HttpResponse {
    HttpResponse::Ok().body(principal.organization_id().to_string())
}

fn login_request(username: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: username.into(),
            password: password.into(),
        })
        .to_request()
}

#[rstest]
#[case(
    "   ",
    "password",
    ValidationExpectation { message: "username must not be empty", field: "username", code: "empty_username" }
)]
#[case(
    "admin",
    "",
    ValidationExpectation { message: "password must not be empty", field: "password", code: "empty_password" }
)]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] username: &str,
    #[case] password: &str,
    #[case] expected: ValidationExpectation<'_>,
) {
    let app = actix_test::init_service(app_with(memory_state())).await;

    let response = actix_test::call_service(&app, login_request(username, password)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], expected.message);
    assert_eq!(body["details"]["field"], expected.field);
    assert_eq!(body["details"]["code"], expected.code);
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_unauthorised() {
    let app = actix_test::init_service(app_with(memory_state())).await;

    let response = actix_test::call_service(&app, login_request("admin", "nope")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.response().cookies().next().is_none());
}

#[rstest]
#[actix_web::test]
async fn session_carries_the_fixture_organization() {
    let app = actix_test::init_service(app_with(memory_state())).await;

    let response = actix_test::call_service(&app, login_request("admin", "password")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/whoami")
        .cookie(cookie)
        .to_request();
    let body = actix_test::call_and_read_body(&app, request).await;
    assert_eq!(body, FIXTURE_ORGANIZATION_ID.as_bytes());
}

#[rstest]
#[actix_web::test]
async fn login_uses_the_configured_authenticator() {
    let organization_id = OrganizationId::random();
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .withf(|credentials| credentials.username() == "ops")
        .times(1)
        .return_const(Ok(Principal::new(UserId::random(), organization_id)));
    let mut state = memory_state();
    state.login = Arc::new(login_service);
    let app = actix_test::init_service(app_with(state)).await;

    let response = actix_test::call_service(&app, login_request(" ops ", "secret")).await;
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/whoami")
        .cookie(cookie)
        .to_request();
    let body = actix_test::call_and_read_body(&app, request).await;

    assert_eq!(body, organization_id.to_string().as_bytes());
}
