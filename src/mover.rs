//! Kinematic path follower for moving anchors, hooks and spinning objects.
//!
//! A `Mover` ignores gravity and constraints entirely. Owners copy its
//! `pos` into whatever they drive each frame (see `ConstrainedPoint::follow`).

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec;

/// Fewest points a circular path is built from.
pub const MIN_CIRCLE_POINTS: usize = 3;

/// Drives a position around a closed polyline at per-waypoint speeds.
///
/// The speed stored for waypoint `i` applies while travelling towards it.
/// Reaching the last waypoint wraps to the first (or the other way round when
/// reversed).
#[derive(Clone, Debug, PartialEq)]
pub struct Mover<F: Float> {
    pub pos: Vec2<F>,
    /// Radians per second of self-rotation; independent of the path.
    pub rotate_speed: F,
    pub angle: F,
    path: Vec<Vec2<F>>,
    move_speed: Vec<F>,
    default_speed: F,
    target_point: usize,
    offset: Vec2<F>,
    overrun: F,
    paused: bool,
    reverse: bool,
}

impl<F: Float> Mover<F> {
    pub fn new(capacity: usize, move_speed: F, rotate_speed: F) -> Self {
        Mover {
            pos: Vec2::zero(),
            rotate_speed,
            angle: F::zero(),
            path: Vec::with_capacity(capacity),
            move_speed: Vec::with_capacity(capacity),
            default_speed: move_speed,
            target_point: 0,
            offset: Vec2::zero(),
            overrun: F::zero(),
            paused: false,
            reverse: false,
        }
    }

    pub fn path(&self) -> &[Vec2<F>] {
        &self.path
    }

    pub fn target_point(&self) -> usize {
        self.target_point
    }

    /// Displacement per unit of time towards the current target.
    pub fn offset(&self) -> Vec2<F> {
        self.offset
    }

    /// Time left over from overshooting the last waypoint; spent next update.
    pub fn overrun(&self) -> F {
        self.overrun
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn set_move_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    pub fn add_path_point(&mut self, point: Vec2<F>) {
        self.path.push(point);
        self.move_speed.push(self.default_speed);
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.move_speed.clear();
        self.target_point = 0;
        self.overrun = F::zero();
    }

    /// Sets the speed of every waypoint, including ones added later.
    pub fn set_move_speed(&mut self, speed: F) {
        self.default_speed = speed;
        for s in self.move_speed.iter_mut() {
            *s = speed;
        }
    }

    pub fn set_move_speed_at(&mut self, index: usize, speed: F) -> Result<(), PhysicsError> {
        let count = self.move_speed.len();
        let slot = self
            .move_speed
            .get_mut(index)
            .ok_or(PhysicsError::PathPointOutOfBounds { index, count })?;
        *slot = speed;
        if index == self.target_point {
            self.calculate_offset();
        }
        Ok(())
    }

    pub fn move_speed_at(&self, index: usize) -> Option<F> {
        self.move_speed.get(index).copied()
    }

    /// Replaces the path with one described by level data.
    ///
    /// - `RC<radius>` / `RCC<radius>`: circle of `radius` around `start`,
    ///   clockwise / counter-clockwise on a y-down screen, with
    ///   `round(radius / 2)` evenly spaced points (at least
    ///   `MIN_CIRCLE_POINTS`), the first one straight right of `start`.
    /// - `dx,dy,dx,dy,...`: polyline starting at `start`, each pair an offset
    ///   relative to `start`. A trailing comma is tolerated.
    ///
    /// On error the current path is left untouched.
    pub fn set_path_from_string(&mut self, path: &str, start: Vec2<F>) -> Result<(), PhysicsError> {
        let points = match path.trim().strip_prefix('R') {
            Some(circle) => Self::parse_circle(circle, start)?,
            None => Self::parse_polyline(path, start)?,
        };
        self.clear_path();
        for p in points {
            self.add_path_point(p);
        }
        Ok(())
    }

    fn parse_circle(text: &str, start: Vec2<F>) -> Result<Vec<Vec2<F>>, PhysicsError> {
        let (clockwise, radius) = if let Some(r) = text.strip_prefix("CC") {
            (false, r)
        } else if let Some(r) = text.strip_prefix('C') {
            (true, r)
        } else {
            return Err(PhysicsError::InvalidPath { reason: "circular path must start with RC or RCC" });
        };

        let radius: f32 = radius
            .trim()
            .parse()
            .map_err(|_| PhysicsError::InvalidPath { reason: "circle radius is not a number" })?;
        let radius = F::from_f32(radius);
        if !(radius > F::zero()) || !radius.is_finite() {
            return Err(PhysicsError::InvalidPath { reason: "circle radius must be positive" });
        }

        let count = (radius / F::two()).round().to_usize().max(MIN_CIRCLE_POINTS);
        let mut step = F::two() * F::pi() / F::from_usize(count);
        if !clockwise {
            step = -step;
        }
        Ok((0..count)
            .map(|i| start + Vec2::from_angle(step * F::from_usize(i)) * radius)
            .collect())
    }

    fn parse_polyline(text: &str, start: Vec2<F>) -> Result<Vec<Vec2<F>>, PhysicsError> {
        let text = text.trim();
        let text = text.strip_suffix(',').unwrap_or(text);

        let mut points = Vec::new();
        points.push(start);
        if text.is_empty() {
            return Ok(points);
        }

        let mut coords = text.split(',').map(|s| {
            s.trim()
                .parse::<f32>()
                .map(F::from_f32)
                .map_err(|_| PhysicsError::InvalidPath { reason: "path coordinate is not a number" })
        });
        while let Some(x) = coords.next() {
            let y = coords
                .next()
                .ok_or(PhysicsError::InvalidPath { reason: "path coordinate has no y component" })?;
            points.push(start + Vec2::new(x?, y?));
        }
        Ok(points)
    }

    /// Snaps to the first waypoint and heads for the second.
    pub fn start(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.pos = self.path[0];
        self.overrun = F::zero();
        self.target_point = 1 % self.path.len();
        self.calculate_offset();
    }

    /// Snaps to waypoint `index` and heads for the one after it.
    pub fn jump_to_point(&mut self, index: usize) -> Result<(), PhysicsError> {
        let count = self.path.len();
        let point = *self
            .path
            .get(index)
            .ok_or(PhysicsError::PathPointOutOfBounds { index, count })?;
        self.pos = point;
        self.overrun = F::zero();
        self.target_point = index;
        self.switch_to_next_point();
        Ok(())
    }

    /// Advances by `delta` seconds. Returns whether a waypoint was reached.
    ///
    /// Movement never passes a waypoint within one call: the overshoot is
    /// converted to time and spent on the next call instead.
    pub fn update(&mut self, delta: F) -> bool {
        if self.paused {
            return false;
        }

        let mut switched = false;
        if !self.path.is_empty() {
            let target = self.path[self.target_point];
            if self.pos != target {
                let mut step = delta;
                if self.overrun != F::zero() {
                    step += self.overrun;
                    self.overrun = F::zero();
                }
                self.pos += self.offset * step;

                let left = target - self.pos;
                if !self.offset.x.same_sign(left.x) || !self.offset.y.same_sign(left.y) {
                    let speed = self.offset.length();
                    self.overrun = if speed > F::zero() {
                        (self.pos - target).length() / speed
                    } else {
                        F::zero()
                    };
                    self.pos = target;
                    switched = true;
                }
            } else {
                switched = true;
            }

            if switched {
                self.switch_to_next_point();
            }
        }

        if self.rotate_speed != F::zero() {
            self.angle += self.rotate_speed * delta;
        }
        switched
    }

    fn switch_to_next_point(&mut self) {
        let len = self.path.len();
        if len == 0 {
            return;
        }
        self.target_point = if self.reverse {
            if self.target_point == 0 { len - 1 } else { self.target_point - 1 }
        } else {
            (self.target_point + 1) % len
        };
        self.calculate_offset();
    }

    fn calculate_offset(&mut self) {
        if let (Some(&target), Some(&speed)) =
            (self.path.get(self.target_point), self.move_speed.get(self.target_point))
        {
            self.offset = (target - self.pos).normalize() * speed;
        }
    }
}

/// Moves `value` towards `target` by at most `speed * delta`, never past it.
pub fn move_to_target<F: Float>(value: F, target: F, speed: F, delta: F) -> F {
    move_to_target_with_status(value, target, speed, delta).0
}

/// Like `move_to_target`, also reporting whether this call arrived at the
/// target. Already sitting on the target reports `false`, so callers can fire
/// one-shot events on the `true`.
pub fn move_to_target_with_status<F: Float>(value: F, target: F, speed: F, delta: F) -> (F, bool) {
    if value == target {
        return (value, false);
    }
    let step = speed * delta;
    let next = if target > value {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    };
    (next, next == target)
}
