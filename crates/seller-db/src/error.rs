//! Mapping of sqlx failures onto store error kinds

use seller_core::{ErrorKind, Stage, StoreError};

/// Convert a sqlx error into a [`StoreError`], keeping it as the source.
pub(crate) fn map_sqlx(err: sqlx::Error) -> StoreError {
    let (kind, stage) = classify(&err);
    StoreError::new(kind, stage, err.to_string()).with_source(err)
}

/// Decide the kind and stage of a sqlx error.
pub(crate) fn classify(err: &sqlx::Error) -> (ErrorKind, Stage) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, Stage::Execute),
        sqlx::Error::Database(db) => {
            let kind = db
                .code()
                .map(|code| classify_sqlstate(&code))
                .unwrap_or(ErrorKind::Invalid);
            (kind, Stage::Execute)
        }
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => (ErrorKind::Invalid, Stage::Decode),
        sqlx::Error::Configuration(_) => (ErrorKind::Invalid, Stage::Execute),
        _ => (ErrorKind::Unavailable, Stage::Execute),
    }
}

/// Classify a PostgreSQL SQLSTATE by its class (first two characters).
pub(crate) fn classify_sqlstate(code: &str) -> ErrorKind {
    match code.get(..2) {
        // integrity constraint violation
        Some("23") => ErrorKind::ConstraintViolation,
        // data exception, e.g. invalid text representation
        Some("22") => ErrorKind::Invalid,
        // connection exception, insufficient resources, operator intervention
        Some("08") | Some("53") | Some("57") => ErrorKind::Unavailable,
        _ => ErrorKind::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found() {
        assert_eq!(
            classify(&sqlx::Error::RowNotFound),
            (ErrorKind::NotFound, Stage::Execute)
        );
    }

    #[test]
    fn test_pool_failures_are_unavailable() {
        assert_eq!(classify(&sqlx::Error::PoolTimedOut).0, ErrorKind::Unavailable);
        assert_eq!(classify(&sqlx::Error::PoolClosed).0, ErrorKind::Unavailable);
    }

    #[test]
    fn test_decode_failures() {
        assert_eq!(
            classify(&sqlx::Error::ColumnNotFound("cost".into())),
            (ErrorKind::Invalid, Stage::Decode)
        );
        assert_eq!(
            classify(&sqlx::Error::Decode("bad timestamp".into())),
            (ErrorKind::Invalid, Stage::Decode)
        );
    }

    #[test]
    fn test_sqlstate_classes() {
        assert_eq!(classify_sqlstate("23505"), ErrorKind::ConstraintViolation);
        assert_eq!(classify_sqlstate("23503"), ErrorKind::ConstraintViolation);
        assert_eq!(classify_sqlstate("22P02"), ErrorKind::Invalid);
        assert_eq!(classify_sqlstate("57014"), ErrorKind::Unavailable);
        assert_eq!(classify_sqlstate("08006"), ErrorKind::Unavailable);
        assert_eq!(classify_sqlstate("42P01"), ErrorKind::Invalid);
        assert_eq!(classify_sqlstate(""), ErrorKind::Invalid);
    }

    #[test]
    fn test_map_keeps_message() {
        let err = map_sqlx(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(err.detail().contains("timed out"));
    }
}
