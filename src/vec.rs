//! 2D vector value type.
//!
//! `Vec2` is `Copy`, so the operator impls (`a + b`, `v * s`, `v / s`) hand back
//! fresh values and never alias. The `*Assign` impls and the `_mut` methods
//! mutate in place for the integrator and relaxation hot paths.

use crate::float::Float;
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    pub fn splat(value: F) -> Self { Vec2 { x: value, y: value } }

    /// Unit vector at `angle` radians from the x axis.
    pub fn from_angle(angle: F) -> Self {
        Vec2 { x: angle.cos(), y: angle.sin() }
    }

    pub fn is_zero(self) -> bool {
        self.x == F::zero() && self.y == F::zero()
    }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D one).
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == F::zero() {
            self
        } else {
            self / len
        }
    }

    /// Rotated by `angle` radians around the origin.
    pub fn rotate(self, angle: F) -> Self {
        let (sin, cos) = (angle.sin(), angle.cos());
        Vec2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn rotate_mut(&mut self, angle: F) {
        *self = self.rotate(angle);
    }

    /// Rotated by `angle` radians around `center`.
    pub fn rotate_around(self, angle: F, center: Self) -> Self {
        (self - center).rotate(angle) + center
    }

    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self) * t
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;
    fn mul(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }
}

impl<F: Float> Div<F> for Vec2<F> {
    type Output = Self;
    fn div(self, s: F) -> Self { Vec2 { x: self.x / s, y: self.y / s } }
}

impl<F: Float> AddAssign for Vec2<F> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<F: Float> SubAssign for Vec2<F> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<F: Float> MulAssign<F> for Vec2<F> {
    fn mul_assign(&mut self, s: F) {
        self.x = self.x * s;
        self.y = self.y * s;
    }
}

impl<F: Float> DivAssign<F> for Vec2<F> {
    fn div_assign(&mut self, s: F) {
        self.x = self.x / s;
        self.y = self.y / s;
    }
}

/// Writes `x, y`, honouring a requested precision: `format!("{:.2}", v)`
/// gives `"1.00, 2.50"`.
impl<F: Float> fmt::Display for Vec2<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}, {:.*}", p, self.x, p, self.y),
            None => write!(f, "{}, {}", self.x, self.y),
        }
    }
}
