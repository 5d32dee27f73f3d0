//! Per-invocation cancellation and deadline context.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("invocation context was cancelled")]
    Cancelled,

    #[error("invocation deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation/deadline carrier for a single invocation.
///
/// Clones share the cancellation flag, so a clone handed to another task can
/// cancel the original.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    request_id: String,
    deadline: Option<SystemTime>,
    cancelled: Arc<AtomicBool>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: SystemTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(SystemTime::now() + timeout)
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn deadline(&self) -> Option<SystemTime> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails once the context is cancelled or its deadline has passed.
    pub fn check(&self) -> Result<(), ContextError> {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if SystemTime::now() >= deadline => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

impl From<&lambda_runtime::Context> for InvocationContext {
    fn from(ctx: &lambda_runtime::Context) -> Self {
        let context = Self::new(ctx.request_id.clone());
        // The runtime reports the deadline in epoch milliseconds; 0 means unset.
        if ctx.deadline == 0 {
            context
        } else {
            context.with_deadline(UNIX_EPOCH + Duration::from_millis(ctx.deadline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_passes_check() {
        let ctx = InvocationContext::new("req-1");
        assert_eq!(ctx.request_id(), "req-1");
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let ctx = InvocationContext::new("req-2");
        let clone = ctx.clone();
        clone.cancel();
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.check(), Err(ContextError::Cancelled));
    }

    #[test]
    fn test_expired_deadline_fails_check() {
        let ctx = InvocationContext::new("req-3").with_deadline(UNIX_EPOCH);
        assert_eq!(ctx.check(), Err(ContextError::DeadlineExceeded));
    }

    #[test]
    fn test_future_deadline_passes_check() {
        let ctx = InvocationContext::new("req-4").with_timeout(Duration::from_secs(60));
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn test_from_lambda_context() {
        let mut lambda_ctx = lambda_runtime::Context::default();
        lambda_ctx.request_id = "lambda-req".to_string();
        lambda_ctx.deadline = 1_000;

        let ctx = InvocationContext::from(&lambda_ctx);
        assert_eq!(ctx.request_id(), "lambda-req");
        assert_eq!(
            ctx.deadline(),
            Some(UNIX_EPOCH + Duration::from_millis(1_000))
        );
        assert_eq!(ctx.check(), Err(ContextError::DeadlineExceeded));
    }
}
