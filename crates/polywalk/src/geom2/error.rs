//! Errors surfaced by the walker and the helpers built on top of it.

use thiserror::Error;

/// Which angular neighbor of a constraint is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Smallest positive angular difference: the constraint the walk moves to.
    Next,
    /// Largest negative angular difference: the constraint the walk came from.
    Previous,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Next => f.write_str("next"),
            Side::Previous => f.write_str("previous"),
        }
    }
}

/// Failure of a vertex computation. None of these carry a partial result.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WalkError {
    /// Zero normal, fewer than 3 usable constraints, or malformed arrays.
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },

    /// Constraint `constraint` has no usable neighbor on `side`
    /// (the region is unbounded there, or the constraint is redundant).
    #[error("constraint {constraint} has no {side} neighbor (unbounded or redundant input)")]
    NoNeighbor { constraint: usize, side: Side },

    /// Orientation check failed at walk step `step` (0-based) on `constraint`.
    #[error("orientation check failed at step {step} on constraint {constraint}")]
    Orientation { step: usize, constraint: usize },
}

impl WalkError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }
}
