//! Auth data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profiles::records::{ProfileUuid, Role};

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Profile the token was issued for.
    pub sub: Uuid,

    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_uuid: ProfileUuid,
    pub role: Role,
}

impl Principal {
    /// Sellers and admins may manage orders and the catalog.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self.role, Role::Seller | Role::Admin)
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_roles() {
        let principal = |role| Principal {
            user_uuid: ProfileUuid::new(),
            role,
        };

        assert!(!principal(Role::Customer).is_staff());
        assert!(principal(Role::Seller).is_staff());
        assert!(principal(Role::Admin).is_staff());
        assert!(!principal(Role::Seller).is_admin());
        assert!(principal(Role::Admin).is_admin());
    }
}
