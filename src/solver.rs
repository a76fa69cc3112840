//! Gauss-Seidel relaxation over an ordered point collection.

use crate::arena::{PointArena, PointId};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::StepObserver;

/// Relaxes every point of `parts`, in order, `iterations` times.
///
/// Order matters: a pass sees corrections made earlier in the same pass, so
/// callers list rope chains from the anchored end outwards. Processing is
/// strictly sequential.
pub fn satisfy_constraint_array<F: Float, O: StepObserver>(
    arena: &mut PointArena<F>,
    parts: &[PointId],
    iterations: usize,
    observer: &mut O,
) -> Result<(), PhysicsError> {
    for pass in 0..iterations {
        for &id in parts {
            arena.satisfy_constraints(id, observer)?;
        }
        observer.on_relaxation_pass(pass);
    }
    Ok(())
}
