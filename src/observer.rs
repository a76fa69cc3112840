//! Step observer trait for watching a simulation advance.

use crate::arena::PointId;

/// Hooks called while a constraint system steps.
///
/// The crate has no logger of its own; implement this trait to trace,
/// count or profile steps. All methods default to no-ops.
pub trait StepObserver {
    /// Called after every part of a system has been integrated.
    fn on_integrate(&mut self, _parts: usize) {}

    /// Called after each full relaxation pass over a part collection.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Called when `point` holds a constraint whose target was removed
    /// from the arena. The constraint is skipped for that pass.
    fn on_stale_target(&mut self, _point: PointId, _target: PointId) {}

    /// Called when `ConstraintSystem::update` returns.
    fn on_step_complete(&mut self) {}
}

/// Observer that ignores everything.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
