pub mod assignment;
pub mod book;
pub mod class;
pub mod progress;
pub mod school;
pub mod student;
pub mod user;

use pagewise_auth_types::identity::Identity;
use pagewise_domain::user::UserRole;

use crate::error::ClassroomError;

/// 403 unless the caller holds one of `roles`.
pub(crate) fn require_role(identity: &Identity, roles: &[UserRole]) -> Result<(), ClassroomError> {
    if identity.has_any_role(roles) {
        Ok(())
    } else {
        Err(ClassroomError::Forbidden)
    }
}
