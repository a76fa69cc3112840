//! Distance relations between two constrained points.

use crate::arena::PointId;
use crate::error::PhysicsError;
use crate::float::Float;

/// How a constraint compares the current distance against its rest length.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Distance must equal the rest length.
    #[default]
    Equal,
    /// Slack rope: only pulls when the distance exceeds the rest length.
    NotMoreThan,
    /// Strut: only pushes when the distance is below the rest length.
    NotLessThan,
}

impl ConstraintKind {
    /// Numeric code used by level data (`0`, `1`, `2`).
    pub fn code(self) -> i32 {
        match self {
            ConstraintKind::Equal => 0,
            ConstraintKind::NotMoreThan => 1,
            ConstraintKind::NotLessThan => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ConstraintKind::Equal),
            1 => Some(ConstraintKind::NotMoreThan),
            2 => Some(ConstraintKind::NotLessThan),
            _ => None,
        }
    }

    /// Whether a pair at squared distance `dist_sq` already satisfies a
    /// constraint with squared rest length `rest_sq`.
    pub fn is_satisfied<F: Float>(self, dist_sq: F, rest_sq: F) -> bool {
        match self {
            ConstraintKind::Equal => false,
            ConstraintKind::NotMoreThan => dist_sq <= rest_sq,
            ConstraintKind::NotLessThan => dist_sq >= rest_sq,
        }
    }
}

impl TryFrom<i32> for ConstraintKind {
    type Error = PhysicsError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        ConstraintKind::from_code(code).ok_or(PhysicsError::InvalidConstraintKind { code })
    }
}

/// Outgoing edge from the owning point to `target`.
///
/// The target is a non-owning handle: whoever inserted the point into the
/// arena owns it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Constraint<F: Float> {
    pub target: PointId,
    pub rest_length: F,
    pub kind: ConstraintKind,
}

impl<F: Float> Constraint<F> {
    pub fn new(target: PointId, rest_length: F, kind: ConstraintKind) -> Self {
        Constraint { target, rest_length, kind }
    }

    pub fn equal(target: PointId, rest_length: F) -> Self {
        Self::new(target, rest_length, ConstraintKind::Equal)
    }
}
