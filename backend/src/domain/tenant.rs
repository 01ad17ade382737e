//! Tenant boundary primitives.
//!
//! Every tenant-scoped use-case takes a [`Principal`] resolved from the
//! session. The organization is never read from a request body.

use serde::{Deserialize, Serialize};

use super::vocabulary::uuid_identifier;

uuid_identifier! {
    /// Organization (tenant) identifier.
    OrganizationId
}

uuid_identifier! {
    /// Authenticated user identifier.
    UserId
}

/// Organization seeded by the initial migration and used by the stock login.
pub const FIXTURE_ORGANIZATION_ID: &str = "6f1c2d3e-4b5a-4c7d-8e9f-0a1b2c3d4e5f";

/// User the stock login authenticates as.
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Authenticated caller scoped to one organization.
///
/// # Examples
/// ```
/// use wasteflow::domain::{OrganizationId, Principal, UserId};
///
/// let principal = Principal::new(UserId::random(), OrganizationId::random());
/// assert_ne!(principal.user_id().as_uuid(), principal.organization_id().as_uuid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    user_id: UserId,
    organization_id: OrganizationId,
}

impl Principal {
    /// Pair a user with the organization they act for.
    #[must_use]
    pub const fn new(user_id: UserId, organization_id: OrganizationId) -> Self {
        Self {
            user_id,
            organization_id,
        }
    }

    /// Acting user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Tenant every query is filtered on.
    #[must_use]
    pub const fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }
}
