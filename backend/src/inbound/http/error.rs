//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers turn
//! domain failures into JSON responses with consistent status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, Message, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace infrastructure failures with a generic payload, keeping the trace
/// id so operators can find the logged detail.
fn redact_infrastructure(error: &Error) -> Error {
    let generic = match error.code() {
        ErrorCode::InternalError => Error::internal("Internal server error"),
        ErrorCode::ServiceUnavailable => Error::service_unavailable("Service unavailable"),
        _ => return error.clone(),
    }
    .with_details(json!({ "code": Message::RequestFailed.code() }));
    error!(
        code = ?error.code(),
        trace_id = error.trace_id().unwrap_or_default(),
        detail = error.message(),
        "request failed"
    );
    match error.trace_id() {
        Some(id) => generic.with_trace_id(id.to_owned()),
        None => generic,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_infrastructure(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
