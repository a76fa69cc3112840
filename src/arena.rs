//! Arena storage for constrained points addressed by generation-checked handles.
//!
//! Constraint targets are `PointId`s, not references. Removing a point bumps
//! its slot generation, so constraints still naming it in other systems are
//! detected and skipped instead of reaching a recycled slot.

use crate::config::SolverConfig;
use crate::constrained_point::ConstrainedPoint;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::StepObserver;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

/// Handle to a point in a `PointArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId {
    index: u32,
    generation: u32,
}

impl PointId {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }

    fn stale(self) -> PhysicsError {
        PhysicsError::StalePoint { index: self.index, generation: self.generation }
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Clone, Debug)]
struct Slot<F: Float> {
    generation: u32,
    point: Option<ConstrainedPoint<F>>,
}

/// Owns every constrained point of a level.
#[derive(Clone, Debug)]
pub struct PointArena<F: Float> {
    slots: Vec<Slot<F>>,
    free: Vec<u32>,
    len: usize,
}

impl<F: Float> PointArena<F> {
    pub fn new() -> Self {
        PointArena { slots: Vec::new(), free: Vec::new(), len: 0 }
    }

    pub fn insert(&mut self, point: ConstrainedPoint<F>) -> PointId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.point = Some(point);
            return PointId { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, point: Some(point) });
        PointId { index, generation: 0 }
    }

    /// Takes the point out. Every handle to it becomes stale.
    pub fn remove(&mut self, id: PointId) -> Result<ConstrainedPoint<F>, PhysicsError> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .ok_or(id.stale())?;
        let point = slot.point.take().ok_or(id.stale())?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Ok(point)
    }

    /// Drops every constraint, on any live point, that targets `id`.
    /// Returns how many were removed.
    pub fn detach(&mut self, id: PointId) -> usize {
        let mut removed = 0;
        for point in self.slots.iter_mut().filter_map(|slot| slot.point.as_mut()) {
            let before = point.constraint_count();
            point.retain_constraints(|c| c.target != id);
            removed += before - point.constraint_count();
        }
        removed
    }

    pub fn get(&self, id: PointId) -> Result<&ConstrainedPoint<F>, PhysicsError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.point.as_ref())
            .ok_or(id.stale())
    }

    pub fn get_mut(&mut self, id: PointId) -> Result<&mut ConstrainedPoint<F>, PhysicsError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.point.as_mut())
            .ok_or(id.stale())
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.get(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, &ConstrainedPoint<F>)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.point.as_ref().map(|point| {
                (PointId { index: index as u32, generation: slot.generation }, point)
            })
        })
    }

    /// Mutable access to two distinct points at once.
    pub fn pair_mut(
        &mut self,
        a: PointId,
        b: PointId,
    ) -> Result<(&mut ConstrainedPoint<F>, &mut ConstrainedPoint<F>), PhysicsError> {
        self.get(a)?;
        self.get(b)?;
        if a.index == b.index {
            return Err(PhysicsError::AliasedPoints);
        }

        let (ai, bi) = (a.index as usize, b.index as usize);
        let (first, second) = if ai < bi {
            let (lo, hi) = self.slots.split_at_mut(bi);
            (&mut lo[ai], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(ai);
            (&mut hi[0], &mut lo[bi])
        };
        match (first.point.as_mut(), second.point.as_mut()) {
            (Some(pa), Some(pb)) => Ok((pa, pb)),
            (None, _) => Err(a.stale()),
            (_, None) => Err(b.stale()),
        }
    }

    /// Verlet step for one point.
    pub fn integrate(&mut self, id: PointId, delta: F, config: &SolverConfig<F>) -> Result<(), PhysicsError> {
        self.get_mut(id)?.update(delta, config);
        Ok(())
    }

    /// One relaxation of `id` against each of its constraints, in list order.
    ///
    /// A pinned point snaps to its pin and ignores its constraints.
    /// Constraints naming a removed point are reported to `observer` and
    /// skipped; a constraint naming the point itself is ignored.
    pub fn satisfy_constraints<O: StepObserver>(
        &mut self,
        id: PointId,
        observer: &mut O,
    ) -> Result<(), PhysicsError> {
        if self.get_mut(id)?.snap_to_pin() {
            return Ok(());
        }

        let mut i = 0;
        loop {
            let constraint = match self.get(id)?.constraints().get(i) {
                Some(c) => *c,
                None => break,
            };
            i += 1;

            match self.pair_mut(id, constraint.target) {
                Ok((point, target)) => point.relax_against(&constraint, target),
                Err(PhysicsError::AliasedPoints) => {}
                Err(_) => observer.on_stale_target(id, constraint.target),
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for PointArena<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics on a stale handle, like slice indexing out of bounds.
impl<F: Float> Index<PointId> for PointArena<F> {
    type Output = ConstrainedPoint<F>;

    fn index(&self, id: PointId) -> &Self::Output {
        match self.get(id) {
            Ok(point) => point,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<F: Float> IndexMut<PointId> for PointArena<F> {
    fn index_mut(&mut self, id: PointId) -> &mut Self::Output {
        match self.get_mut(id) {
            Ok(point) => point,
            Err(err) => panic!("{}", err),
        }
    }
}
