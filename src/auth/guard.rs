//! Ownership authorization
//!
//! Pure decision functions over (identity, resource owner) pairs. Call sites
//! load the resource first, decide here, and only then write.

use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AuthError};

/// The authenticated principal derived from verified credentials or claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

/// Restricts a query to resources owned by or attributed to one identity.
/// Scoped list queries accept this instead of a raw id so the owner always
/// comes out of `scope_to_identity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerFilter {
    pub owner_id: Uuid,
}

/// Allows the operation iff the identity is the resource's owner.
pub fn authorize_owner(identity: &Identity, resource_owner_id: Uuid) -> Result<(), AppError> {
    if identity.id == resource_owner_id {
        Ok(())
    } else {
        Err(AppError::AuthError(AuthError::Forbidden))
    }
}

pub fn scope_to_identity(identity: &Identity) -> OwnerFilter {
    OwnerFilter {
        owner_id: identity.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_with(id: Uuid) -> Identity {
        Identity {
            id,
            email: "ann@example.com".to_string(),
        }
    }

    #[test]
    fn test_owner_is_allowed() {
        let id = Uuid::new_v4();
        assert!(authorize_owner(&identity_with(id), id).is_ok());
    }

    #[test]
    fn test_non_owner_is_denied() {
        let identity = identity_with(Uuid::new_v4());
        let result = authorize_owner(&identity, Uuid::new_v4());

        assert!(matches!(
            result,
            Err(AppError::AuthError(AuthError::Forbidden))
        ));
    }

    #[test]
    fn test_scope_carries_the_identity_id() {
        let identity = identity_with(Uuid::new_v4());
        let filter = scope_to_identity(&identity);
        assert_eq!(filter.owner_id, identity.id);
    }
}
