//! Core error types for AI-Seller RS
//!
//! Every failure raised below the HTTP boundary is a [`StoreError`]. The error carries a
//! closed [`ErrorKind`] chosen where the failure originates (statement builder, pool,
//! row decoder), the [`Stage`] at which it happened, and a trace of
//! `{component}.{method}` frames appended by each layer on the way up.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error used as the underlying cause of a [`StoreError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type for store and use-case operations
pub type StoreResult<T> = Result<T, StoreError>;

/// What went wrong, independent of where.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed row does not exist.
    #[error("not found")]
    NotFound,
    /// The store rejected the write because of a unique, foreign key, not-null or check
    /// constraint.
    #[error("constraint violation")]
    ConstraintViolation,
    /// The store could not be reached, the pool was exhausted, or the request was
    /// cancelled before the round trip finished.
    #[error("unavailable")]
    Unavailable,
    /// The statement or its values were malformed, or a row could not be decoded.
    #[error("invalid")]
    Invalid,
}

impl ErrorKind {
    /// HTTP status code mapping for the boundary layer
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::ConstraintViolation => 409,
            ErrorKind::Unavailable => 503,
            ErrorKind::Invalid => 500,
        }
    }
}

/// Where in a repository call the failure happened.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Statement construction, before any I/O.
    #[error("build")]
    Build,
    /// The round trip to the store.
    #[error("execute")]
    Execute,
    /// Mapping a returned row onto an entity.
    #[error("decode")]
    Decode,
}

/// Error returned by repositories and the use-case facade.
///
/// Context is appended, never replaced: the kind assigned at the origin survives every
/// [`StoreError::context`] call so callers can still branch on [`StoreError::kind`].
#[derive(Error, Debug)]
#[error("{frames}{stage}: {kind}: {detail}", frames = render_trace(.trace.as_slice()))]
pub struct StoreError {
    kind: ErrorKind,
    stage: Stage,
    detail: String,
    /// Innermost frame first.
    trace: Vec<&'static str>,
    #[source]
    source: Option<BoxError>,
}

/// `outer: inner: ` prefix for the display form.
fn render_trace(trace: &[&'static str]) -> String {
    trace.iter().rev().map(|frame| format!("{}: ", frame)).collect()
}

impl StoreError {
    pub fn new(kind: ErrorKind, stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            detail: detail.into(),
            trace: Vec::new(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// A statement could not be constructed. Always a bug in the calling repository.
    pub fn build(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self::new(ErrorKind::Invalid, Stage::Build, source.to_string()).with_source(source)
    }

    pub fn not_found(entity: &'static str, id: &str) -> Self {
        Self::new(
            ErrorKind::NotFound,
            Stage::Execute,
            format!("{} '{}' not found", entity, id),
        )
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Unavailable, Stage::Execute, "request cancelled")
    }

    pub fn deadline_exceeded() -> Self {
        Self::new(ErrorKind::Unavailable, Stage::Execute, "deadline exceeded")
    }

    /// Append a `{component}.{method}` frame.
    pub fn context(mut self, frame: &'static str) -> Self {
        self.trace.push(frame);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Frames, outermost first.
    pub fn trace(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.trace.iter().rev().copied()
    }

    pub fn has_frame(&self, frame: &str) -> bool {
        self.trace.iter().any(|f| *f == frame)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// Append a context frame to the error side of a result.
pub trait ErrorContext<T> {
    fn context(self, frame: &'static str) -> StoreResult<T>;
}

impl<T> ErrorContext<T> for StoreResult<T> {
    fn context(self, frame: &'static str) -> StoreResult<T> {
        self.map_err(|e| e.context(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("column list is empty")]
    struct FakeBuildError;

    #[test]
    fn test_display_renders_outermost_frame_first() {
        let err = StoreError::not_found("product", "p1")
            .context("ProductRepo.get_product")
            .context("ProductUseCase.get_product");

        assert_eq!(
            err.to_string(),
            "ProductUseCase.get_product: ProductRepo.get_product: execute: not found: product 'p1' not found"
        );
    }

    #[test]
    fn test_context_keeps_kind() {
        let err = StoreError::cancelled().context("AuthRepo.get_user");
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(err.stage(), Stage::Execute);
        assert!(err.has_frame("AuthRepo.get_user"));
        assert!(!err.has_frame("AuthRepo.get_role"));
    }

    #[test]
    fn test_build_error_is_invalid_with_source() {
        let err = StoreError::build(FakeBuildError);
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.stage(), Stage::Build);
        assert_eq!(err.detail(), "column list is empty");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_result_ext_appends_frame() {
        let result: StoreResult<()> = Err(StoreError::deadline_exceeded());
        let err = result.context("IntegrationRepo.delete_integration").unwrap_err();
        let frames: Vec<_> = err.trace().collect();
        assert_eq!(frames, vec!["IntegrationRepo.delete_integration"]);
    }

    #[test]
    fn test_kind_and_stage_display() {
        assert_eq!(ErrorKind::ConstraintViolation.to_string(), "constraint violation");
        assert_eq!(Stage::Decode.to_string(), "decode");
        let err = StoreError::new(ErrorKind::Invalid, Stage::Decode, "bad row");
        assert_eq!(err.to_string(), "decode: invalid: bad row");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::ConstraintViolation.status_code(), 409);
        assert_eq!(ErrorKind::Unavailable.status_code(), 503);
        assert_eq!(ErrorKind::Invalid.status_code(), 500);
    }
}
