//! Search control: the wall-clock deadline shared by one search.

use std::time::{Duration, Instant};

/// Decides when a search has run out of time.
///
/// The clock starts when the control is created. There is no interrupt:
/// the search polls [`deadline_passed`](Self::deadline_passed) when it
/// enters a node and between iterative-deepening passes, so a pass can
/// overrun the budget by the cost of finishing the sibling loops already
/// in progress.
#[derive(Debug, Clone)]
pub struct SearchControl {
    start: Instant,
    budget: Duration,
}

impl SearchControl {
    /// Start a clock with the given elapsed-time budget.
    pub fn new(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    /// A control whose deadline never passes.
    pub fn unbounded() -> Self {
        Self::new(Duration::MAX)
    }

    /// Return `true` once elapsed time strictly exceeds the budget.
    #[inline]
    pub fn deadline_passed(&self) -> bool {
        self.elapsed() > self.budget
    }

    /// Elapsed time since the control was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The configured budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SearchControl;

    #[test]
    fn zero_budget_expires() {
        let control = SearchControl::new(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert!(control.deadline_passed());
    }

    #[test]
    fn unbounded_never_expires() {
        let control = SearchControl::unbounded();
        assert!(!control.deadline_passed());
        assert_eq!(control.budget(), Duration::MAX);
    }

    #[test]
    fn elapsed_grows() {
        let control = SearchControl::new(Duration::from_secs(60));
        let first = control.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(control.elapsed() > first);
        assert!(!control.deadline_passed());
    }
}
