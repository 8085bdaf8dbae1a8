//! Response shapes shared by the form-driven handlers.

use actix_web::HttpResponse;
use actix_web::http::header;
use serde::Serialize;
use serde_json::json;

use crate::domain::{Error, Locale, Message};

/// Where signed-in users land after login, registration and mutations.
pub const ITEMS_PATH: &str = "/items";

/// A form ready for (re)display, with the error shown above it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView<T> {
    pub form: T,
    pub error: Option<String>,
}

impl<T> FormView<T> {
    /// A form with no error attached.
    pub fn blank(form: T) -> Self {
        Self { form, error: None }
    }
}

/// `303 See Other` to `location`, so browsers follow with a `GET`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Localized validation failure carrying the message key and, when given,
/// the submitted values for redisplay.
pub fn invalid_form<I: Serialize + ?Sized>(
    locale: Locale,
    message: Message,
    input: Option<&I>,
) -> Error {
    let details = match input {
        Some(input) => json!({ "code": message.code(), "input": input }),
        None => json!({ "code": message.code() }),
    };
    Error::invalid_request(message.text(locale)).with_details(details)
}
