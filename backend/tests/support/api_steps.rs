//! HTTP helpers and steps shared by the API behaviour suites.

use actix_web::http::{Method, header};
use awc::Client;
use rstest_bdd_macros::{given, then};
use serde_json::{Value, json};
use wasteflow::domain::TRACE_ID_HEADER;

use crate::harness::{SharedWorld, WorldFixture, with_world_async};

pub(crate) struct JsonRequest<'a> {
    pub(crate) include_cookie: bool,
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
}

impl<'a> JsonRequest<'a> {
    pub(crate) fn authenticated(method: Method, path: &'a str) -> Self {
        Self {
            include_cookie: true,
            method,
            path,
            payload: None,
        }
    }

    pub(crate) fn anonymous(method: Method, path: &'a str) -> Self {
        Self {
            include_cookie: false,
            method,
            path,
            payload: None,
        }
    }

    pub(crate) fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

fn session_cookie(world: &SharedWorld) -> String {
    world
        .borrow()
        .session_cookie
        .clone()
        .expect("session cookie")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_owned()
}

pub(crate) fn login(world: &SharedWorld, username: &str, password: &str) {
    let payload = json!({ "username": username, "password": password });
    let (status, cookie_header, body) = with_world_async(world, |base_url| async move {
        let mut response = Client::default()
            .post(format!("{base_url}/api/v1/login"))
            .send_json(&payload)
            .await
            .expect("login request");

        let status = response.status().as_u16();
        let cookie_header = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.body().await.expect("login body");
        (status, cookie_header, body)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.session_cookie = cookie_header;
    ctx.last_trace_id = None;
    ctx.last_body = serde_json::from_slice(&body).ok();
}

/// Send a request and record status, trace id and body. Empty bodies are
/// recorded as `null`.
pub(crate) fn perform(world: &SharedWorld, spec: JsonRequest<'_>) {
    let cookie = spec.include_cookie.then(|| session_cookie(world));
    let (status, trace_id, body) = with_world_async(world, |base_url| async move {
        let mut request =
            Client::default().request(spec.method, format!("{base_url}{}", spec.path));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match spec.payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.body().await.expect("body");
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("json body")
        };
        (status, trace_id, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

pub(crate) fn last_body(world: &SharedWorld) -> Value {
    world.borrow().last_body.clone().expect("response body")
}

/// Store the `id` of the last response under `label`.
pub(crate) fn remember_id(world: &SharedWorld, label: &str) {
    let id = last_body(world)
        .get("id")
        .and_then(Value::as_str)
        .expect("response id")
        .to_owned();
    world
        .borrow_mut()
        .remembered_ids
        .insert(label.to_owned(), id);
}

pub(crate) fn remembered_id(world: &SharedWorld, label: &str) -> String {
    world
        .borrow()
        .remembered_ids
        .get(label)
        .cloned()
        .unwrap_or_else(|| panic!("no id remembered for {label}"))
}

#[given("a running Wasteflow server")]
fn a_running_wasteflow_server(world: &WorldFixture) {
    let _ = world;
}

#[given("the client is signed in")]
fn the_client_is_signed_in(world: &WorldFixture) {
    let world = world.world();
    login(&world, "admin", "password");
    assert_eq!(world.borrow().last_status, Some(200), "fixture login");
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(world.world().borrow().last_status, Some(status));
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &WorldFixture, code: String) {
    let body = last_body(&world.world());
    assert_eq!(body.get("code").and_then(Value::as_str), Some(code.as_str()));
}

#[then("the error details name the field {field} with code {code}")]
fn the_error_details_name_the_field(world: &WorldFixture, field: String, code: String) {
    let body = last_body(&world.world());
    let details = body.get("details").expect("error details");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field.as_str()));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code.as_str()));
}

#[then("the error body carries the response trace id")]
fn the_error_body_carries_the_response_trace_id(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
}
