//! Ropes ("bungees") built from constrained points and a constraint system.

use crate::arena::{PointArena, PointId};
use crate::config::SolverConfig;
use crate::constrained_point::ConstrainedPoint;
use crate::constraint::ConstraintKind;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::system::ConstraintSystem;
use crate::vec::Vec2;
use alloc::vec::Vec;

/// Configuration for creating a rope.
#[derive(Clone, Debug, PartialEq)]
pub struct RopeConfig<F: Float> {
    pub point_weight: F,
    /// `Equal` for taut ropes, `NotMoreThan` for slack ones.
    pub kind: ConstraintKind,
    pub relaxation_times: usize,
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        RopeConfig {
            point_weight: F::one(),
            kind: ConstraintKind::Equal,
            relaxation_times: 1,
        }
    }
}

/// A chain of points, each constrained to its predecessor.
///
/// Part 0 is the head (usually the anchor). The rope owns its points: they
/// are inserted into the arena by `new`/`lengthen` and removed by
/// `shorten`/`destroy`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rope<F: Float> {
    system: ConstraintSystem,
    point_weight: F,
    kind: ConstraintKind,
}

impl<F: Float> Rope<F> {
    pub fn new(
        arena: &mut PointArena<F>,
        start: Vec2<F>,
        end: Vec2<F>,
        segments: usize,
        config: &RopeConfig<F>,
    ) -> Result<Self, PhysicsError> {
        if segments == 0 {
            return Err(PhysicsError::InsufficientSegments);
        }
        ConstrainedPoint::with_weight(start, config.point_weight)?;

        let count = F::from_usize(segments);
        let segment_length = start.distance(end) / count;
        let mut system = ConstraintSystem::new().with_relaxation_times(config.relaxation_times);
        let mut prev: Option<PointId> = None;

        for i in 0..=segments {
            let pos = start.lerp(end, F::from_usize(i) / count);
            let mut point = ConstrainedPoint::with_weight(pos, config.point_weight)?;
            if let Some(prev) = prev {
                point.add_constraint(prev, segment_length, config.kind);
            }
            let id = arena.insert(point);
            system.add_part(id);
            prev = Some(id);
        }

        Ok(Rope { system, point_weight: config.point_weight, kind: config.kind })
    }

    pub fn system(&self) -> &ConstraintSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut ConstraintSystem {
        &mut self.system
    }

    pub fn parts(&self) -> &[PointId] {
        self.system.parts()
    }

    pub fn head(&self) -> Option<PointId> {
        self.parts().first().copied()
    }

    pub fn tail(&self) -> Option<PointId> {
        self.parts().last().copied()
    }

    pub fn segment_count(&self) -> usize {
        self.system.len().saturating_sub(1)
    }

    /// Pins the head where it currently is.
    pub fn pin_head(&self, arena: &mut PointArena<F>) -> Result<(), PhysicsError> {
        let head = self.head().ok_or(PhysicsError::InsufficientSegments)?;
        let point = arena.get_mut(head)?;
        point.set_pin(point.pos());
        Ok(())
    }

    pub fn positions(&self, arena: &PointArena<F>) -> Result<Vec<Vec2<F>>, PhysicsError> {
        self.parts().iter().map(|&id| arena.get(id).map(|p| p.pos())).collect()
    }

    /// Current length along the chain.
    pub fn length(&self, arena: &PointArena<F>) -> Result<F, PhysicsError> {
        let positions = self.positions(arena)?;
        Ok(positions
            .windows(2)
            .fold(F::zero(), |total, pair| total + pair[0].distance(pair[1])))
    }

    /// Sum of the rest lengths between consecutive parts.
    pub fn rest_length(&self, arena: &PointArena<F>) -> Result<F, PhysicsError> {
        let mut total = F::zero();
        for pair in self.parts().windows(2) {
            if let Some(len) = arena.get(pair[1])?.rest_length(pair[0]) {
                total += len;
            }
        }
        Ok(total)
    }

    pub fn update<O: StepObserver>(
        &self,
        arena: &mut PointArena<F>,
        delta: F,
        config: &SolverConfig<F>,
        observer: &mut O,
    ) -> Result<(), PhysicsError> {
        self.system.update(arena, delta, config, observer)
    }

    /// Pays out rope at the head: a new point is spliced in as part 1,
    /// `rest_length` away from the head, and the old part 1 is re-hooked
    /// onto it. Fails without changing anything if part 1 is not hooked
    /// onto the head.
    pub fn lengthen(&mut self, arena: &mut PointArena<F>, rest_length: F) -> Result<PointId, PhysicsError> {
        let (head, next) = match self.parts() {
            [head, next, ..] => (*head, *next),
            _ => return Err(PhysicsError::InsufficientSegments),
        };
        let head_pos = arena.get(head)?.pos();
        let next_point = arena.get(next)?;
        if !next_point.has_constraint(head) {
            return Err(PhysicsError::BrokenLink { index: 1 });
        }
        let next_pos = next_point.pos();

        let toward = next_pos - head_pos;
        let reach = rest_length.min(toward.length());
        let mut point = ConstrainedPoint::with_weight(head_pos + toward.normalize() * reach, self.point_weight)?;
        point.add_constraint(head, rest_length, self.kind);

        let id = arena.insert(point);
        arena.get_mut(next)?.change_constraint(head, id);
        self.system.add_part_at_index(id, 1)?;
        Ok(id)
    }

    /// Reels in the point right after the head. Returns `false` when only
    /// the head segment is left. Fails without changing anything if part 2
    /// is not hooked onto part 1.
    pub fn shorten(&mut self, arena: &mut PointArena<F>) -> Result<bool, PhysicsError> {
        let (head, gone, next) = match self.parts() {
            [head, gone, next, ..] => (*head, *gone, *next),
            _ => return Ok(false),
        };
        let len = arena.get(gone)?.rest_length(head);
        let next_len = arena
            .get(next)?
            .rest_length(gone)
            .ok_or(PhysicsError::BrokenLink { index: 2 })?;
        let rest = len.map_or(next_len, |len| len.max(next_len));

        arena.get_mut(next)?.change_constraint_and_length(gone, head, rest);
        self.system.remove_part_at_index(1)?;
        arena.remove(gone)?;
        arena.detach(gone);
        Ok(true)
    }

    /// Cuts segment `segment` (between parts `segment` and `segment + 1`).
    /// `self` keeps the head side; the loose end is returned as a new rope.
    pub fn cut(&mut self, arena: &mut PointArena<F>, segment: usize) -> Result<Rope<F>, PhysicsError> {
        let count = self.system.len();
        if segment >= count.saturating_sub(1) {
            return Err(PhysicsError::PartOutOfBounds { index: segment.saturating_add(1), count });
        }
        let parts = self.parts();
        let (upper, lower) = (parts[segment], parts[segment + 1]);
        arena.get_mut(lower)?.remove_constraint(upper);

        let system = self.system.split_off(segment + 1)?;
        Ok(Rope { system, point_weight: self.point_weight, kind: self.kind })
    }

    /// Removes every point of the rope from the arena, dropping any
    /// constraints other objects still hold towards them. Parts that are
    /// already gone are skipped. Returns how many points were removed.
    pub fn destroy(self, arena: &mut PointArena<F>) -> usize {
        let mut removed = 0;
        for &id in self.parts() {
            if arena.remove(id).is_ok() {
                removed += 1;
            }
            arena.detach(id);
        }
        removed
    }
}
