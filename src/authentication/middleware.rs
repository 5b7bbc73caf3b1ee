use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

use crate::session_state::TypedSession;
use crate::utils::build_error_response;

#[derive(Copy, Clone, Debug)]
pub struct UserId(Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for UserId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub async fn reject_anonymous_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    match session.viewer_id()? {
        Some(user_id) => {
            req.extensions_mut().insert(UserId(user_id));
            next.call(req).await
        }
        None => {
            let msg = "User has not logged in";
            let response = build_error_response(StatusCode::UNAUTHORIZED, msg.to_string());
            Err(InternalError::from_response(anyhow::anyhow!(msg), response).into())
        }
    }
}

/// The user a read is performed for, if anyone is logged in.
/// Public routes use it to decide whether to merge `is_liked` flags.
#[derive(Copy, Clone, Debug)]
pub struct Viewer(Option<UserId>);

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.map(|id| *id)
    }
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = TypedSession::from_request(req, payload);
        Box::pin(async move {
            let session = session.await?;
            let user_id = session.viewer_id()?;
            Ok(Viewer(user_id.map(UserId)))
        })
    }
}
