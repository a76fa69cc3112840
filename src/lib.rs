//! Position-based rope physics for 2D puzzle games.
//!
//! `bungee` simulates ropes, pinned anchors and jointed objects as Verlet
//! points joined by distance constraints, relaxed Gauss-Seidel style in a
//! fixed, caller-controlled order. A separate kinematic `Mover` drives
//! anchors and hooks along preset paths.
//!
//! # Features
//!
//! - **Verlet points**: `ConstrainedPoint` with lazy previous-position setup
//! - **Distance relations**: `Equal`, slack `NotMoreThan`, strut `NotLessThan`
//! - **Pins**: hard positional clamps that donate corrections but never take them
//! - **Handles**: points live in a `PointArena`; stale handles fail safely
//! - **Ropes**: `Rope` with pay-out, reel-in and cutting
//! - **Movers**: polyline and circular paths with overrun compensation
//! - **Observable**: monitor steps via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`
//!
//! # Example
//! ```
//! use bungee::{ConstraintKind, ConstrainedPoint, ConstraintSystem, NoOpStepObserver,
//!              PointArena, SolverConfig, Vec2};
//!
//! let mut arena = PointArena::new();
//! let anchor = arena.insert(ConstrainedPoint::pinned(Vec2::new(0.0f32, 0.0)));
//! let mut weight = ConstrainedPoint::new(Vec2::new(100.0, 0.0));
//! weight.add_constraint(anchor, 50.0, ConstraintKind::Equal);
//! let weight = arena.insert(weight);
//!
//! let mut system = ConstraintSystem::new();
//! system.add_part(anchor);
//! system.add_part(weight);
//! system.update(&mut arena, 1.0 / 60.0, &SolverConfig::weightless(), &mut NoOpStepObserver).unwrap();
//!
//! assert!((arena[weight].pos().x - 50.0).abs() < 1e-4);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod material_point;
pub mod constraint;
pub mod constrained_point;
pub mod arena;
pub mod solver;
pub mod system;
pub mod rope;
pub mod mover;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use material_point::MaterialPoint;
pub use constraint::{Constraint, ConstraintKind};
pub use constrained_point::ConstrainedPoint;
pub use arena::{PointArena, PointId};
pub use solver::satisfy_constraint_array;
pub use system::ConstraintSystem;
pub use rope::{Rope, RopeConfig};
pub use mover::{move_to_target, move_to_target_with_status, Mover};
pub use config::{SolverConfig, EARTH_GRAVITY, TIME_SCALE};
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::PhysicsError;
