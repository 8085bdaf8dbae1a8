//! Helpers for driving the in-memory ledger over HTTP.

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test;
use chrono::{DateTime, TimeZone, Utc};
use ledger::test_support::SESSION_COOKIE;
use serde_json::Value;

pub const PASSWORD: &str = "secret1";

/// Noon UTC on the given January 2024 day.
pub fn january(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0)
        .single()
        .expect("valid fixture time")
}

pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

pub fn location(res: &ServiceResponse) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

pub fn register_request(email: &str, password: &str, confirm: &str) -> Request {
    test::TestRequest::post()
        .uri("/auth/register")
        .set_form([
            ("email", email),
            ("password", password),
            ("confirmPassword", confirm),
        ])
        .to_request()
}

/// Register `email` and return the signed-in session cookie.
pub async fn register<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, register_request(email, PASSWORD, PASSWORD)).await;
    assert_eq!(res.status().as_u16(), 303, "registration of {email} failed");
    session_cookie(&res).expect("session cookie after registration")
}

/// Submit the create form and assert it redirected.
pub async fn create_item<S>(
    app: &S,
    cookie: &Cookie<'static>,
    amount: &str,
    kind: &str,
    event: &str,
) where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/items/create")
            .cookie(cookie.clone())
            .set_form([
                ("amount", amount),
                ("type", kind),
                ("event", event),
                ("memo", ""),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 303, "creating {event} failed");
}

/// Fetch the listing JSON at `uri` for the signed-in user.
pub async fn listing<S>(app: &S, cookie: &Cookie<'static>, uri: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200, "listing {uri} failed");
    test::read_body_json(res).await
}
