//! The ordered point collection of one physically connected object.

use crate::arena::{PointArena, PointId};
use crate::config::SolverConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::solver::satisfy_constraint_array;
use alloc::vec::Vec;
use core::fmt;

/// Steps the points of one rope or joint chain.
///
/// The system only stores handles; the points live in a `PointArena` that
/// may be shared with other systems. A point must be advanced by at most one
/// system per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSystem {
    parts: Vec<PointId>,
    relaxation_times: usize,
}

impl Default for ConstraintSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintSystem {
    pub fn new() -> Self {
        ConstraintSystem { parts: Vec::new(), relaxation_times: 1 }
    }

    /// Stiffer objects (short rods) want more passes than slack ropes.
    pub fn with_relaxation_times(mut self, relaxation_times: usize) -> Self {
        self.relaxation_times = relaxation_times;
        self
    }

    pub fn relaxation_times(&self) -> usize {
        self.relaxation_times
    }

    pub fn set_relaxation_times(&mut self, relaxation_times: usize) {
        self.relaxation_times = relaxation_times;
    }

    pub fn parts(&self) -> &[PointId] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn add_part(&mut self, id: PointId) {
        self.parts.push(id);
    }

    /// Splices `id` in before the part currently at `index`; `index == len`
    /// appends.
    pub fn add_part_at_index(&mut self, id: PointId, index: usize) -> Result<(), PhysicsError> {
        if index > self.parts.len() {
            return Err(PhysicsError::PartOutOfBounds { index, count: self.parts.len() });
        }
        self.parts.insert(index, id);
        Ok(())
    }

    pub fn remove_part_at_index(&mut self, index: usize) -> Result<PointId, PhysicsError> {
        if index >= self.parts.len() {
            return Err(PhysicsError::PartOutOfBounds { index, count: self.parts.len() });
        }
        Ok(self.parts.remove(index))
    }

    /// Splits off the parts from `index` onwards into a new system with the
    /// same stiffness.
    pub fn split_off(&mut self, index: usize) -> Result<ConstraintSystem, PhysicsError> {
        if index > self.parts.len() {
            return Err(PhysicsError::PartOutOfBounds { index, count: self.parts.len() });
        }
        Ok(ConstraintSystem {
            parts: self.parts.split_off(index),
            relaxation_times: self.relaxation_times,
        })
    }

    /// Integrates every part in order, then runs `relaxation_times` passes.
    ///
    /// Every handle is checked before anything moves, so a stale part leaves
    /// the system untouched.
    pub fn update<F: Float, O: StepObserver>(
        &self,
        arena: &mut PointArena<F>,
        delta: F,
        config: &SolverConfig<F>,
        observer: &mut O,
    ) -> Result<(), PhysicsError> {
        for &id in &self.parts {
            arena.get(id)?;
        }

        for &id in &self.parts {
            arena.integrate(id, delta, config)?;
        }
        observer.on_integrate(self.parts.len());

        satisfy_constraint_array(arena, &self.parts, self.relaxation_times, observer)?;
        observer.on_step_complete();
        Ok(())
    }

    /// Writes every part's position and constraints to `out`.
    pub fn log<F: Float, W: fmt::Write>(&self, arena: &PointArena<F>, out: &mut W) -> fmt::Result {
        for (i, &id) in self.parts.iter().enumerate() {
            let point = match arena.get(id) {
                Ok(point) => point,
                Err(_) => {
                    writeln!(out, "part {} {}: removed", i, id)?;
                    continue;
                }
            };
            write!(out, "part {} {}: {:.2}", i, id, point.pos())?;
            if point.is_pinned() {
                write!(out, " (pinned)")?;
            }
            writeln!(out)?;

            for c in point.constraints() {
                match arena.get(c.target) {
                    Ok(target) => writeln!(
                        out,
                        "  -> {} at {:.2} rest {:.2} {:?}",
                        c.target,
                        target.pos(),
                        c.rest_length,
                        c.kind
                    )?,
                    Err(_) => writeln!(out, "  -> {} removed rest {:.2} {:?}", c.target, c.rest_length, c.kind)?,
                }
            }
        }
        Ok(())
    }
}
