//! Driving port for login.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing store, so handler tests can substitute a test double.

use async_trait::async_trait;

use crate::domain::{
    Error, FIXTURE_ORGANIZATION_ID, FIXTURE_USER_ID, LoginCredentials, OrganizationId, Principal,
    UserId,
};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the tenant-scoped identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

/// Stock authenticator: `admin` / `password` signs in as the fixture user of
/// the fixture organization.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        if credentials.username() != "admin" || credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        let user_id: UserId = FIXTURE_USER_ID
            .parse()
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let organization_id: OrganizationId = FIXTURE_ORGANIZATION_ID
            .parse()
            .map_err(|err| Error::internal(format!("invalid fixture organization id: {err}")))?;
        Ok(Principal::new(user_id, organization_id))
    }
}
