//! Plain point mass: position, velocity, acceleration and weight.

use crate::config::SolverConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use alloc::format;
use alloc::string::String;

/// A point mass integrated with explicit Euler.
///
/// `ConstrainedPoint` embeds one of these and replaces the integrator with a
/// Verlet step; free-flying objects (candy pieces, particles) use it directly.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialPoint<F: Float> {
    pub pos: Vec2<F>,
    pub velocity: Vec2<F>,
    pub acceleration: Vec2<F>,
    /// Displacement applied by the most recent `update`.
    pub pos_delta: Vec2<F>,
    /// Local gravity used when the ambient gravity is zero. Default: zero.
    pub gravity: Vec2<F>,
    pub disable_gravity: bool,
    weight: F,
    inv_weight: F,
}

impl<F: Float> MaterialPoint<F> {
    /// Unit-weight point at rest.
    pub fn new(pos: Vec2<F>) -> Self {
        MaterialPoint {
            pos,
            velocity: Vec2::zero(),
            acceleration: Vec2::zero(),
            pos_delta: Vec2::zero(),
            gravity: Vec2::zero(),
            disable_gravity: false,
            weight: F::one(),
            inv_weight: F::one(),
        }
    }

    pub fn with_weight(pos: Vec2<F>, weight: F) -> Result<Self, PhysicsError> {
        let mut point = Self::new(pos);
        point.set_weight(weight)?;
        Ok(point)
    }

    pub fn weight(&self) -> F {
        self.weight
    }

    pub fn inv_weight(&self) -> F {
        self.inv_weight
    }

    /// Sets the weight and its reciprocal. Infinite mass is expressed with
    /// `set_inv_weight(0)` or by pinning, never by a zero weight.
    pub fn set_weight(&mut self, weight: F) -> Result<(), PhysicsError> {
        if !(weight > F::zero()) || !weight.is_finite() {
            return Err(PhysicsError::InvalidWeight);
        }
        self.weight = weight;
        self.inv_weight = F::one() / weight;
        Ok(())
    }

    /// Overrides the inverse weight alone; `0` makes the point immovable
    /// under constraint corrections. `restore_inv_weight` undoes it.
    pub fn set_inv_weight(&mut self, inv_weight: F) {
        self.inv_weight = inv_weight;
    }

    pub fn restore_inv_weight(&mut self) {
        self.inv_weight = F::one() / self.weight;
    }

    /// Force acting on the point this step.
    ///
    /// Ambient gravity wins when it is non-zero; otherwise the point's own
    /// gravity field applies, scaled by its inverse weight.
    pub fn gather_force(&self, ambient: Vec2<F>) -> Vec2<F> {
        if self.disable_gravity {
            Vec2::zero()
        } else if !ambient.is_zero() {
            ambient
        } else {
            self.gravity * self.inv_weight
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec2<F>) {
        self.velocity += impulse * self.inv_weight;
    }

    /// Explicit Euler step.
    pub fn update(&mut self, delta: F, config: &SolverConfig<F>) {
        let dt = config.scaled(delta);
        self.acceleration = self.gather_force(config.gravity);
        self.velocity += self.acceleration * dt;
        self.pos_delta = self.velocity * dt;
        self.pos += self.pos_delta;
    }

    /// `"x.xx, y.yy"`, for debug overlays.
    pub fn pos_string(&self) -> String {
        format!("{:.2}", self.pos)
    }
}
