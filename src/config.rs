//! Step configuration shared by every constraint system in a level.

use crate::float::Float;
use crate::vec::Vec2;

/// Default downward gravity in level units per second squared (y grows downwards).
pub const EARTH_GRAVITY: f32 = 784.0;

/// Default `time_scale`: deltas are expressed in seconds.
pub const TIME_SCALE: f32 = 1.0;

/// Read-only context handed to every integration step.
///
/// Gravity lives here instead of in a process-wide singleton so a level can
/// reorient it between frames (camera rotation, gravity switches) and two
/// levels can be simulated side by side.
///
/// # Builder Pattern
/// ```
/// use bungee::config::SolverConfig;
/// use bungee::vec::Vec2;
///
/// let config: SolverConfig<f32> = SolverConfig::new()
///     .with_gravity(Vec2::new(0.0, 784.0))
///     .with_time_scale(1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig<F: Float> {
    /// Ambient gravity. A zero vector makes points fall back to their own
    /// per-instance gravity. Default: `(0, EARTH_GRAVITY)`.
    pub gravity: Vec2<F>,
    /// Normalisation divisor for `delta` in the integrator. Default: `TIME_SCALE`.
    pub time_scale: F,
}

impl<F: Float> SolverConfig<F> {
    pub fn new() -> Self {
        SolverConfig {
            gravity: Vec2::new(F::zero(), F::from_f32(EARTH_GRAVITY)),
            time_scale: F::from_f32(TIME_SCALE),
        }
    }

    /// Config with gravity switched off; points only move under constraints.
    pub fn weightless() -> Self {
        Self::new().with_gravity(Vec2::zero())
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_scale(mut self, time_scale: F) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Rotate the ambient gravity by `angle` radians (level rotation).
    pub fn rotate_gravity(&mut self, angle: F) {
        self.gravity.rotate_mut(angle);
    }

    /// `delta / time_scale`, the normalised step the integrators use.
    pub fn scaled(&self, delta: F) -> F {
        delta / self.time_scale
    }
}

impl<F: Float> Default for SolverConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
