use sea_orm::DatabaseConnection;

use crate::infra::catalog::DbBookRepository;
use crate::infra::db::{
    DbAssignmentRepository, DbClassRepository, DbProgressRepository, DbSchoolRepository,
    DbStudentRepository, DbUserRepository,
};
use crate::tenant::TenantResolution;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tenancy: TenantResolution,
}

impl AppState {
    pub fn school_repo(&self) -> DbSchoolRepository {
        DbSchoolRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn class_repo(&self) -> DbClassRepository {
        DbClassRepository {
            db: self.db.clone(),
        }
    }

    pub fn student_repo(&self) -> DbStudentRepository {
        DbStudentRepository {
            db: self.db.clone(),
        }
    }

    pub fn assignment_repo(&self) -> DbAssignmentRepository {
        DbAssignmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn book_repo(&self) -> DbBookRepository {
        DbBookRepository {
            db: self.db.clone(),
        }
    }

    pub fn progress_repo(&self) -> DbProgressRepository {
        DbProgressRepository {
            db: self.db.clone(),
        }
    }
}
