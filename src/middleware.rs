use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::{StatusCode, header};
use actix_web::{Error, HttpResponse};

/// Location browsers are sent to when a dashboard request lacks a valid
/// identity.
const SIGNIN_LOCATION: &str = "/signin";

/// Turns `401 Unauthorized` dashboard responses into a redirect to the
/// sign-in page. JSON API routes are mounted outside this middleware so
/// their 401s reach the client untouched.
pub struct RedirectUnauthorized;

impl<S, B> Transform<S, ServiceRequest> for RedirectUnauthorized
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RedirectUnauthorizedMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectUnauthorizedMiddleware { service }))
    }
}

pub struct RedirectUnauthorizedMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RedirectUnauthorizedMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) if res.status() == StatusCode::UNAUTHORIZED => {
                    let (req, _) = res.into_parts();
                    let redirect = signin_redirect().map_into_right_body();
                    Ok(ServiceResponse::new(req, redirect))
                }
                Ok(res) => Ok(res.map_into_left_body()),
                Err(err) => {
                    if err.as_response_error().status_code() == StatusCode::UNAUTHORIZED {
                        // Extractor failures surface as errors, not
                        // responses; wrap them so the browser still gets
                        // the redirect.
                        let redirect = signin_redirect();
                        Err(actix_web::error::InternalError::from_response(err, redirect).into())
                    } else {
                        Err(err)
                    }
                }
            }
        })
    }
}

fn signin_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SIGNIN_LOCATION))
        .finish()
}
