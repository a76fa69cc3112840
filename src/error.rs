//! Error types for structural misuse of the simulation.
//!
//! Numerical degeneracies (coincident points, near-zero distances) are never
//! errors; they are absorbed by the relaxation kernel.

use core::fmt;

/// Errors that can occur while building or stepping a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// The handle names a point that was removed from its arena.
    StalePoint { index: u32, generation: u32 },
    /// An operation needing two distinct points was handed the same one twice.
    AliasedPoints,
    /// Part index is out of bounds for a constraint system.
    PartOutOfBounds { index: usize, count: usize },
    /// Constraint index is out of bounds for a point.
    ConstraintOutOfBounds { index: usize, count: usize },
    /// Weight must be positive and finite.
    InvalidWeight,
    /// Level data named a constraint kind code that does not exist.
    InvalidConstraintKind { code: i32 },
    /// Path point index is out of bounds for a mover.
    PathPointOutOfBounds { index: usize, count: usize },
    /// A mover path string could not be parsed.
    InvalidPath { reason: &'static str },
    /// A rope needs at least one segment.
    InsufficientSegments,
    /// Rope part `index` holds no constraint towards the part before it.
    BrokenLink { index: usize },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::StalePoint { index, generation } => {
                write!(f, "point {}v{} is no longer alive", index, generation)
            }
            PhysicsError::AliasedPoints => write!(f, "operation needs two distinct points"),
            PhysicsError::PartOutOfBounds { index, count } => {
                write!(f, "part index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::ConstraintOutOfBounds { index, count } => {
                write!(f, "constraint index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::InvalidWeight => write!(f, "weight must be positive and finite"),
            PhysicsError::InvalidConstraintKind { code } => {
                write!(f, "unknown constraint kind code {}", code)
            }
            PhysicsError::PathPointOutOfBounds { index, count } => {
                write!(f, "path point {} out of bounds (count: {})", index, count)
            }
            PhysicsError::InvalidPath { reason } => write!(f, "invalid mover path: {}", reason),
            PhysicsError::InsufficientSegments => write!(f, "rope needs at least 1 segment"),
            PhysicsError::BrokenLink { index } => {
                write!(f, "rope part {} is not attached to its predecessor", index)
            }
        }
    }
}

impl core::error::Error for PhysicsError {}
