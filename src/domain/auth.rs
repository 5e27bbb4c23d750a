use std::future::Future;
use std::pin::Pin;

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

/// Identity of the signed-in dashboard user, stored as JSON inside the
/// identity cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// Stable subject identifier; used as the owner reference on restaurants.
    pub sub: String,
    /// Email address the user signed in with.
    pub email: String,
    /// Display name shown in the dashboard header.
    pub name: String,
}

impl AuthenticatedUser {
    pub fn new(sub: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
            name: name.into(),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload);
        Box::pin(async move {
            let identity = identity
                .await
                .map_err(|_| ErrorUnauthorized("authentication required"))?;
            let id = identity
                .id()
                .map_err(|_| ErrorUnauthorized("authentication required"))?;
            serde_json::from_str(&id).map_err(|_| ErrorUnauthorized("authentication required"))
        })
    }
}
