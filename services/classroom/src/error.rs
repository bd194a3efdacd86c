use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pagewise_domain::tenant::TenantScopeError;

/// Classroom service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ClassroomError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("tenant context is required")]
    TenantRequired,
    #[error("tenant does not match the request tenant")]
    TenantMismatch,
    #[error("invalid tenant id")]
    InvalidTenant,
    #[error("invalid progress values")]
    InvalidProgress,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid subdomain")]
    InvalidSubdomain,
    #[error("invalid page number")]
    InvalidPageNumber,
    #[error("missing data")]
    MissingData,
    #[error("user not found")]
    UserNotFound,
    #[error("school not found")]
    SchoolNotFound,
    #[error("class not found")]
    ClassNotFound,
    #[error("student not found")]
    StudentNotFound,
    #[error("book not found")]
    BookNotFound,
    #[error("page not found")]
    PageNotFound,
    #[error("assignment not found")]
    AssignmentNotFound,
    #[error("progress not found")]
    ProgressNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("school already exists")]
    SchoolAlreadyExists,
    #[error("page number already taken")]
    PageNumberTaken,
    #[error("concurrent progress update, retry")]
    ProgressConflict,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ClassroomError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::TenantRequired => "TENANT_REQUIRED",
            Self::TenantMismatch => "TENANT_MISMATCH",
            Self::InvalidTenant => "INVALID_TENANT",
            Self::InvalidProgress => "INVALID_PROGRESS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidSubdomain => "INVALID_SUBDOMAIN",
            Self::InvalidPageNumber => "INVALID_PAGE_NUMBER",
            Self::MissingData => "MISSING_DATA",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SchoolNotFound => "SCHOOL_NOT_FOUND",
            Self::ClassNotFound => "CLASS_NOT_FOUND",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::PageNotFound => "PAGE_NOT_FOUND",
            Self::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            Self::ProgressNotFound => "PROGRESS_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::SchoolAlreadyExists => "SCHOOL_ALREADY_EXISTS",
            Self::PageNumberTaken => "PAGE_NUMBER_TAKEN",
            Self::ProgressConflict => "PROGRESS_CONFLICT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::TenantRequired | Self::TenantMismatch => StatusCode::FORBIDDEN,
            Self::InvalidTenant
            | Self::InvalidProgress
            | Self::InvalidEmail
            | Self::InvalidSubdomain
            | Self::InvalidPageNumber
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::UserNotFound
            | Self::SchoolNotFound
            | Self::ClassNotFound
            | Self::StudentNotFound
            | Self::BookNotFound
            | Self::PageNotFound
            | Self::AssignmentNotFound
            | Self::ProgressNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists
            | Self::SchoolAlreadyExists
            | Self::PageNumberTaken
            | Self::ProgressConflict => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TenantScopeError> for ClassroomError {
    fn from(err: TenantScopeError) -> Self {
        match err {
            TenantScopeError::Required => Self::TenantRequired,
            TenantScopeError::Mismatch => Self::TenantMismatch,
        }
    }
}

impl IntoResponse for ClassroomError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
