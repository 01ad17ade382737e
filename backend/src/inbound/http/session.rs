//! Session helpers keeping handlers free of cookie details.
//!
//! The login handler persists a [`Principal`]; tenant-scoped handlers take a
//! `Principal` argument, which resolves from the session or fails with
//! `401 Unauthorized`.

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::domain::{Error, OrganizationId, Principal, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ORGANIZATION_ID_KEY: &str = "organization_id";

/// Newtype wrapper exposing principal-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated principal in the session cookie.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, principal.user_id().to_string())
            .and_then(|()| {
                self.0
                    .insert(ORGANIZATION_ID_KEY, principal.organization_id().to_string())
            })
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Principal stored in the session, if any.
    ///
    /// Unparseable identifiers are treated as absent.
    pub fn principal(&self) -> Result<Option<Principal>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(user), Some(organization)) = (read(USER_ID_KEY)?, read(ORGANIZATION_ID_KEY)?)
        else {
            return Ok(None);
        };
        match (user.parse::<UserId>(), organization.parse::<OrganizationId>()) {
            (Ok(user_id), Ok(organization_id)) => {
                Ok(Some(Principal::new(user_id, organization_id)))
            }
            _ => {
                warn!("invalid principal in session cookie");
                Ok(None)
            }
        }
    }

    /// Require a principal or return `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.principal()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(SessionContext::new(req.get_session()).require_principal())
    }
}
