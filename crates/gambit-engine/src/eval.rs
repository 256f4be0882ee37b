//! Static evaluation at the search horizon.
//!
//! Evaluators see only the numeric [`BoardSnapshot`] and score it from
//! White's perspective (positive = White ahead). The search multiplies by
//! the side multiplier to get the mover's view.

use gambit_core::BoardSnapshot;

/// A pure function from a board snapshot to a score.
///
/// Called at every leaf, so it must be cheap. For negamax to be sound the
/// score should be antisymmetric: mirroring the board must negate it.
pub trait Evaluator {
    /// Score `snapshot` from White's perspective.
    fn evaluate(&self, snapshot: &BoardSnapshot) -> f64;
}

/// Material count: the signed sum over all cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Material;

impl Evaluator for Material {
    #[inline]
    fn evaluate(&self, snapshot: &BoardSnapshot) -> f64 {
        f64::from(snapshot.sum())
    }
}

impl<F> Evaluator for F
where
    F: Fn(&BoardSnapshot) -> f64,
{
    #[inline]
    fn evaluate(&self, snapshot: &BoardSnapshot) -> f64 {
        self(snapshot)
    }
}

/// Evaluate with the default [`Material`] evaluator.
pub fn evaluate(snapshot: &BoardSnapshot) -> f64 {
    Material.evaluate(snapshot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
