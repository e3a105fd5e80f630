//! Per-run execution state shared between a recipe and the driver

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::recipe::{RecipeError, TreeVisitor};

/// State for a single recipe run
///
/// Carries the host's cancellation signal and the queue of visitors a
/// recipe has asked to run after the current visit completes. Recipes keep
/// no state of their own between invocations; anything per-run lives here.
pub struct ExecutionContext {
    cancelled: Arc<AtomicBool>,
    after_visit: VecDeque<Box<dyn TreeVisitor>>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            after_visit: VecDeque::new(),
        }
    }

    /// Build a context observing an externally owned cancellation flag
    pub fn with_cancellation(cancelled: Arc<AtomicBool>) -> Self {
        Self {
            cancelled,
            after_visit: VecDeque::new(),
        }
    }

    /// The flag the host may set to interrupt the run
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Bail out with `RecipeError::Cancelled` if the host asked us to stop
    pub fn check_cancelled(&self) -> Result<(), RecipeError> {
        if self.is_cancelled() {
            Err(RecipeError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Schedule `visitor` to run against the current tree once the active
    /// visit finishes
    ///
    /// Deferred visitors run in scheduling order, each against a fresh
    /// parse of the text produced so far, so multiple insertions into the
    /// same parent compose without invalidating each other's offsets.
    pub fn run_after_visit(&mut self, visitor: Box<dyn TreeVisitor>) {
        self.after_visit.push_back(visitor);
    }

    pub(crate) fn pop_after_visit(&mut self) -> Option<Box<dyn TreeVisitor>> {
        self.after_visit.pop_front()
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_not_cancelled() {
        let ctx = ExecutionContext::new();
        assert!(!ctx.is_cancelled());
        assert!(ctx.check_cancelled().is_ok());
    }

    #[test]
    fn test_cancellation_observed() {
        let ctx = ExecutionContext::new();
        ctx.cancellation_flag().store(true, Ordering::Relaxed);
        assert!(ctx.is_cancelled());
        assert!(matches!(
            ctx.check_cancelled(),
            Err(RecipeError::Cancelled)
        ));
    }
}
