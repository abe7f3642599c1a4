//! Request context
//!
//! Every capability method takes a [`RequestContext`] as its first argument. It carries a
//! cancellation token, an optional deadline and a request id used in log spans.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Cancellation-bearing context threaded through repositories and use cases
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Set a deadline relative to now. An earlier existing deadline wins.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Derive a context that is cancelled with this one but can also be cancelled alone.
    pub fn child(&self) -> Self {
        Self {
            request_id: self.request_id,
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run `fut` until it completes, the context is cancelled, or the deadline passes.
    ///
    /// On cancellation or deadline the future is dropped, which aborts the in-flight
    /// statement.
    pub async fn run<T, F>(&self, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        if self.is_cancelled() {
            return Err(StoreError::cancelled());
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(StoreError::cancelled()),
            _ = deadline => Err(StoreError::deadline_exceeded()),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_run_returns_future_output() {
        let ctx = RequestContext::new();
        let value = ctx.run(async { Ok::<_, StoreError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_cancelled_context_short_circuits() {
        let ctx = RequestContext::new();
        ctx.cancel();

        let err = ctx
            .run(async { Ok::<_, StoreError>(()) })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(err.detail(), "request cancelled");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_aborts_slow_future() {
        let ctx = RequestContext::new().with_timeout(Duration::from_millis(50));

        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, StoreError>(())
            })
            .await
            .unwrap_err();
        assert_eq!(err.detail(), "deadline exceeded");
    }

    #[tokio::test]
    async fn test_child_is_cancelled_with_parent() {
        let parent = RequestContext::new();
        let child = parent.child();
        parent.cancel();
        assert!(child.is_cancelled());
        assert_eq!(child.request_id(), parent.request_id());
    }

    #[test]
    fn test_earlier_deadline_wins() {
        let ctx = RequestContext::new()
            .with_timeout(Duration::from_secs(1))
            .with_timeout(Duration::from_secs(60));
        let deadline = ctx.deadline().unwrap();
        assert!(deadline <= Instant::now() + Duration::from_secs(1));
    }
}
