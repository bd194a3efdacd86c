pub mod catalog;
pub mod db;

use sea_orm::{DbErr, SqlErr, TransactionError};

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) fn is_unique_violation_in_txn(err: &TransactionError<DbErr>) -> bool {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => {
            is_unique_violation(e)
        }
    }
}
