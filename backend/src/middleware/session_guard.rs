//! Session guard for routes that require a signed-in user.
//!
//! Requests without a valid `user_id` in the session cookie never reach the
//! wrapped service; they are answered with `303 See Other` pointing at the
//! login page.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::HttpResponse;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::inbound::http::session::SessionContext;

/// Path anonymous visitors are sent to.
pub const LOGIN_PATH: &str = "/auth/login";

/// Middleware redirecting anonymous requests to [`LOGIN_PATH`].
///
/// Must be wrapped inside the session middleware so the cookie has been
/// decoded before the guard runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = SessionContext::new(req.get_session());
        // An unreadable session is treated like an absent one.
        let signed_in = matches!(session.user_id(), Ok(Some(_)));
        if !signed_in {
            debug!(path = req.path(), "anonymous request redirected to login");
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish()
                .map_into_right_body();
            return Box::pin(ready(Ok(req.into_response(response))));
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
