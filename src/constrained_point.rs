//! Verlet-integrated point carrying its outgoing distance constraints.

use crate::arena::PointId;
use crate::config::SolverConfig;
use crate::constraint::{Constraint, ConstraintKind};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::material_point::MaterialPoint;
use crate::mover::Mover;
use crate::vec::Vec2;
use alloc::string::String;
use alloc::vec::Vec;

/// A rope node, joint or hinge.
///
/// Position is advanced by a Verlet step from `prev_pos`; velocity is only
/// reported, never integrated. Constraints are stored on one endpoint but
/// corrected on both during relaxation.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstrainedPoint<F: Float> {
    body: MaterialPoint<F>,
    /// Position before the last integration. `None` until the first step,
    /// which then starts from rest.
    pub prev_pos: Option<Vec2<F>>,
    /// Force gathered during the last integration.
    pub total_force: Vec2<F>,
    pin: Option<Vec2<F>>,
    constraints: Vec<Constraint<F>>,
}

impl<F: Float> ConstrainedPoint<F> {
    pub fn new(pos: Vec2<F>) -> Self {
        Self::from_body(MaterialPoint::new(pos))
    }

    pub fn with_weight(pos: Vec2<F>, weight: F) -> Result<Self, PhysicsError> {
        Ok(Self::from_body(MaterialPoint::with_weight(pos, weight)?))
    }

    /// Point pinned where it stands.
    pub fn pinned(pos: Vec2<F>) -> Self {
        let mut point = Self::new(pos);
        point.set_pin(pos);
        point
    }

    pub fn from_body(body: MaterialPoint<F>) -> Self {
        ConstrainedPoint {
            body,
            prev_pos: None,
            total_force: Vec2::zero(),
            pin: None,
            constraints: Vec::new(),
        }
    }

    pub fn pos(&self) -> Vec2<F> {
        self.body.pos
    }

    pub fn set_pos(&mut self, pos: Vec2<F>) {
        self.body.pos = pos;
    }

    /// Moves the point and forgets its momentum.
    pub fn reset_pos(&mut self, pos: Vec2<F>) {
        self.body.pos = pos;
        self.prev_pos = Some(pos);
    }

    /// Read access to the embedded point mass. Weight changes go through
    /// `set_weight`/`set_inv_weight` so a pin keeps its zero inverse weight.
    pub fn body(&self) -> &MaterialPoint<F> {
        &self.body
    }

    pub fn inv_weight(&self) -> F {
        self.body.inv_weight()
    }

    /// Sets the weight. While pinned the inverse weight stays zero; the new
    /// weight takes effect on `clear_pin`.
    pub fn set_weight(&mut self, weight: F) -> Result<(), PhysicsError> {
        self.body.set_weight(weight)?;
        if self.is_pinned() {
            self.body.set_inv_weight(F::zero());
        }
        Ok(())
    }

    /// Overrides the inverse weight of an unpinned point. Ignored while
    /// pinned. Returns whether it was applied.
    pub fn set_inv_weight(&mut self, inv_weight: F) -> bool {
        if self.is_pinned() {
            return false;
        }
        self.body.set_inv_weight(inv_weight);
        true
    }

    pub fn set_velocity(&mut self, velocity: Vec2<F>) {
        self.body.velocity = velocity;
    }

    /// Local gravity used when the ambient gravity is zero.
    pub fn set_gravity(&mut self, gravity: Vec2<F>) {
        self.body.gravity = gravity;
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.body.disable_gravity = !enabled;
    }

    pub fn pos_string(&self) -> String {
        self.body.pos_string()
    }

    // ---- pinning ---------------------------------------------------------

    pub fn pin(&self) -> Option<Vec2<F>> {
        self.pin
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    /// Clamps the point to `pos` on every relaxation pass. A pinned point
    /// always has zero inverse weight so partners take the whole correction.
    pub fn set_pin(&mut self, pos: Vec2<F>) {
        self.pin = Some(pos);
        self.body.set_inv_weight(F::zero());
    }

    pub fn clear_pin(&mut self) {
        if self.pin.take().is_some() {
            self.body.restore_inv_weight();
        }
    }

    /// Snaps to the pin, if any. Returns whether the point is pinned.
    pub fn snap_to_pin(&mut self) -> bool {
        match self.pin {
            Some(pin) => {
                self.body.pos = pin;
                true
            }
            None => false,
        }
    }

    /// Copies a running mover's position into the point (and into its pin,
    /// so relaxation keeps it there).
    pub fn follow(&mut self, mover: &Mover<F>) {
        if mover.is_paused() {
            return;
        }
        self.body.pos = mover.pos;
        if self.pin.is_some() {
            self.pin = Some(mover.pos);
        }
    }

    // ---- constraint list -------------------------------------------------

    pub fn constraints(&self) -> &[Constraint<F>] {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn add_constraint(&mut self, target: PointId, rest_length: F, kind: ConstraintKind) {
        self.constraints.push(Constraint::new(target, rest_length, kind));
    }

    /// Removes the first constraint towards `target`.
    pub fn remove_constraint(&mut self, target: PointId) -> bool {
        match self.position_of(target) {
            Some(i) => {
                self.constraints.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn remove_constraint_at(&mut self, index: usize) -> Result<Constraint<F>, PhysicsError> {
        if index >= self.constraints.len() {
            return Err(PhysicsError::ConstraintOutOfBounds {
                index,
                count: self.constraints.len(),
            });
        }
        Ok(self.constraints.remove(index))
    }

    pub fn remove_all_constraints(&mut self) {
        self.constraints.clear();
    }

    /// Keeps only the constraints for which `keep` returns `true`.
    pub fn retain_constraints(&mut self, keep: impl FnMut(&Constraint<F>) -> bool) {
        self.constraints.retain(keep);
    }

    /// Re-targets the first constraint towards `from` so it points at `to`,
    /// keeping its rest length and kind.
    pub fn change_constraint(&mut self, from: PointId, to: PointId) -> bool {
        match self.position_of(from) {
            Some(i) => {
                self.constraints[i].target = to;
                true
            }
            None => false,
        }
    }

    pub fn change_rest_length(&mut self, target: PointId, rest_length: F) -> bool {
        match self.position_of(target) {
            Some(i) => {
                self.constraints[i].rest_length = rest_length;
                true
            }
            None => false,
        }
    }

    pub fn change_constraint_and_length(&mut self, from: PointId, to: PointId, rest_length: F) -> bool {
        match self.position_of(from) {
            Some(i) => {
                self.constraints[i].target = to;
                self.constraints[i].rest_length = rest_length;
                true
            }
            None => false,
        }
    }

    pub fn has_constraint(&self, target: PointId) -> bool {
        self.position_of(target).is_some()
    }

    /// Rest length of the first constraint towards `target`.
    pub fn rest_length(&self, target: PointId) -> Option<F> {
        self.position_of(target).map(|i| self.constraints[i].rest_length)
    }

    fn position_of(&self, target: PointId) -> Option<usize> {
        self.constraints.iter().position(|c| c.target == target)
    }

    // ---- simulation ------------------------------------------------------

    /// Verlet step.
    ///
    /// `delta == 0` is legal: velocity is left alone but the previous
    /// displacement is still re-applied.
    pub fn update(&mut self, delta: F, config: &SolverConfig<F>) {
        self.total_force = self.body.gather_force(config.gravity);
        let dt = config.scaled(delta);
        self.body.acceleration = self.total_force * dt * dt;

        let prev_pos = *self.prev_pos.get_or_insert(self.body.pos);
        self.body.pos_delta = self.body.pos - prev_pos + self.body.acceleration;
        if delta > F::zero() {
            self.body.velocity = self.body.pos_delta / delta;
        }

        self.prev_pos = Some(self.body.pos);
        self.body.pos += self.body.pos_delta;
    }

    /// Moves this point and `target` towards satisfying `constraint`.
    ///
    /// Both points are corrected in proportion to their inverse weights;
    /// a pinned target is never moved.
    pub fn relax_against(&mut self, constraint: &Constraint<F>, target: &mut ConstrainedPoint<F>) {
        let mut delta = target.body.pos - self.body.pos;
        if delta.is_zero() {
            delta = Vec2::splat(F::one());
        }

        let dist_sq = delta.length_sq();
        let rest_sq = constraint.rest_length * constraint.rest_length;
        if constraint.kind.is_satisfied(dist_sq, rest_sq) {
            return;
        }

        let inv_self = self.body.inv_weight();
        let inv_target = target.body.inv_weight();
        let inv_sum = inv_self + inv_target;
        if inv_sum == F::zero() {
            return;
        }

        let dist = dist_sq.sqrt();
        let diff = (dist - constraint.rest_length) / (dist.max(F::one()) * inv_sum);

        self.body.pos += delta * (inv_self * diff);
        if !target.is_pinned() {
            target.body.pos -= delta * (inv_target * diff);
        }
    }
}
