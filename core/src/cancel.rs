#[cfg(test)]
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{GraphError, Result};

/// Cooperative cancellation handle for a running operation.
///
/// Clones share the same flag, so one clone can be handed to a signal
/// handler or another thread while the operation polls another. Engine loops
/// check the token once per queue pop, stack step, or frontier extraction.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
    #[cfg(test)]
    poll_budget: Option<Arc<AtomicUsize>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also trips once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Token that also trips `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Token that trips itself on the poll after `polls` successful ones.
    #[cfg(test)]
    pub(crate) fn trip_after_polls(mut self, polls: usize) -> Self {
        self.poll_budget = Some(Arc::new(AtomicUsize::new(polls)));
        self
    }

    #[cfg(test)]
    fn spend_poll(&self) {
        if let Some(budget) = &self.poll_budget {
            let spent = budget.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
            if spent.is_err() {
                self.cancel();
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        #[cfg(test)]
        self.spend_poll();
        self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Poll an optional token, turning a trip into [`GraphError::Cancelled`].
#[inline]
pub(crate) fn check(cancel: Option<&CancelToken>) -> Result<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(GraphError::Cancelled),
        _ => Ok(()),
    }
}
