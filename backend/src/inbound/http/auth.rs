//! Login, registration, and logout handlers.
//!
//! ```text
//! GET  /auth/login
//! POST /auth/login     email=...&password=...
//! GET  /auth/register
//! POST /auth/register  email=...&password=...&confirmPassword=...
//! POST /auth/logout
//! ```
//!
//! Successful submissions redirect with `303 See Other`; rejected ones answer
//! with the domain error payload so the form can be redisplayed.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{FormView, ITEMS_PATH, invalid_form, see_other};
use crate::middleware::LOGIN_PATH;

/// Login form body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// The part of an account form that is safe to send back. Passwords are
/// never echoed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AccountFormEcho {
    pub email: String,
}

impl AccountFormEcho {
    fn new(email: &str) -> Self {
        Self {
            email: email.to_owned(),
        }
    }
}

fn form_page(session: &SessionContext) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_some() {
        return Ok(see_other(ITEMS_PATH));
    }
    Ok(HttpResponse::Ok().json(FormView::blank(AccountFormEcho::default())))
}

/// Login form; signed-in users go straight to their ledger.
#[get("/login")]
pub async fn login_page(session: SessionContext) -> ApiResult<HttpResponse> {
    form_page(&session)
}

/// Authenticate and establish a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = LoginCredentials::try_from_parts(&form.email, &form.password)
        .map_err(|err| {
            invalid_form(state.locale, err.message(), Some(&AccountFormEcho::new(&form.email)))
        })?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.sign_in(&user_id)?;
    Ok(see_other(ITEMS_PATH))
}

/// Registration form; signed-in users go straight to their ledger.
#[get("/register")]
pub async fn register_page(session: SessionContext) -> ApiResult<HttpResponse> {
    form_page(&session)
}

/// Create an account and sign it in.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration =
        Registration::try_from_parts(&form.email, &form.password, &form.confirm_password)
            .map_err(|err| {
                invalid_form(state.locale, err.message(), Some(&AccountFormEcho::new(&form.email)))
            })?;
    let user_id = state.registration.register(&registration).await?;
    session.sign_in(&user_id)?;
    Ok(see_other(ITEMS_PATH))
}

/// Drop the session and return to the login form.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    see_other(LOGIN_PATH)
}

/// Register the `/auth` scope.
pub fn configure_auth(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(login_page)
            .service(login)
            .service(register_page)
            .service(register)
            .service(logout),
    );
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
