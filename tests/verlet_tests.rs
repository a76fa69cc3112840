use approx::assert_abs_diff_eq;
use bungee::{
    ConstrainedPoint, ConstraintKind, ConstraintSystem, Mover, NoOpStepObserver, PhysicsError, PointArena,
    SolverConfig, Vec2,
};

fn free(x: f32, y: f32) -> ConstrainedPoint<f32> {
    ConstrainedPoint::new(Vec2::new(x, y))
}

#[test]
fn first_step_starts_from_rest() {
    let config = SolverConfig::new().with_gravity(Vec2::new(0.0f32, 10.0));
    let mut p = free(0.0, 0.0);
    assert!(p.prev_pos.is_none());

    p.update(1.0, &config);
    assert_eq!(p.pos(), Vec2::new(0.0, 10.0));
    assert_eq!(p.prev_pos, Some(Vec2::new(0.0, 0.0)));
    assert_eq!(p.body().velocity, Vec2::new(0.0, 10.0));

    p.update(1.0, &config);
    assert_eq!(p.pos(), Vec2::new(0.0, 30.0));
    assert_eq!(p.body().pos_delta, Vec2::new(0.0, 20.0));
}

#[test]
fn zero_delta_reapplies_previous_displacement() {
    let config = SolverConfig::weightless();
    let mut p = free(0.0, 0.0);
    p.prev_pos = Some(Vec2::new(-2.0, 0.0));
    p.set_velocity(Vec2::new(7.0, 7.0));

    p.update(0.0, &config);
    assert_eq!(p.pos(), Vec2::new(2.0, 0.0));
    assert_eq!(p.body().velocity, Vec2::new(7.0, 7.0), "velocity untouched when no time passed");
}

#[test]
fn acceleration_scales_with_squared_normalised_step() {
    let config = SolverConfig::new()
        .with_gravity(Vec2::new(0.0f32, 8.0))
        .with_time_scale(2.0);
    let mut p = free(0.0, 0.0);
    p.update(1.0, &config);
    assert_eq!(p.body().acceleration, Vec2::new(0.0, 2.0));
    assert_eq!(p.total_force, Vec2::new(0.0, 8.0));
    assert_eq!(p.pos(), Vec2::new(0.0, 2.0));
}

#[test]
fn disabled_gravity_keeps_point_still() {
    let config = SolverConfig::<f32>::new();
    let mut p = free(4.0, 4.0);
    p.set_gravity_enabled(false);
    for _ in 0..10 {
        p.update(1.0 / 60.0, &config);
    }
    assert_eq!(p.pos(), Vec2::new(4.0, 4.0));
}

#[test]
fn local_gravity_applies_in_weightless_levels() {
    let config = SolverConfig::weightless();
    let mut p = ConstrainedPoint::with_weight(Vec2::new(0.0f32, 0.0), 2.0).unwrap();
    p.set_gravity(Vec2::new(-4.0, 0.0));
    p.update(1.0, &config);
    assert_eq!(p.pos(), Vec2::new(-2.0, 0.0));
}

#[test]
fn free_fall_is_deterministic() {
    let config = SolverConfig::<f64>::new();
    let run = || {
        let mut p = ConstrainedPoint::new(Vec2::new(0.0f64, 0.0));
        (0..120)
            .map(|_| {
                p.update(1.0 / 60.0, &config);
                p.pos()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn pinned_point_ends_every_pass_on_its_pin() {
    let mut arena = PointArena::new();
    let other = arena.insert(free(50.0, 50.0));
    let mut p = ConstrainedPoint::pinned(Vec2::new(5.0f32, 5.0));
    p.add_constraint(other, 1.0, ConstraintKind::Equal);
    p.add_constraint(other, 300.0, ConstraintKind::NotLessThan);
    let p = arena.insert(p);

    for i in 0..20 {
        arena[p].set_pos(Vec2::new(i as f32 * 3.0, -7.0));
        arena.satisfy_constraints(p, &mut NoOpStepObserver).unwrap();
        assert_eq!(arena[p].pos(), Vec2::new(5.0, 5.0));
    }
    assert_eq!(arena[other].pos(), Vec2::new(50.0, 50.0), "pinned point ignores its own constraints");
}

#[test]
fn pinning_zeroes_and_unpinning_restores_inverse_weight() {
    let mut p = ConstrainedPoint::with_weight(Vec2::new(0.0f32, 0.0), 4.0).unwrap();
    p.set_pin(Vec2::new(1.0, 1.0));
    assert_eq!(p.inv_weight(), 0.0);
    assert!(p.is_pinned());
    p.clear_pin();
    assert_eq!(p.inv_weight(), 0.25);
    assert_eq!(p.pin(), None);
}

#[test]
fn slack_constraint_is_noop_within_limit() {
    let mut arena = PointArena::new();
    let a = arena.insert(free(0.0, 0.0));
    let mut b = free(30.0, 40.0);
    b.add_constraint(a, 50.0, ConstraintKind::NotMoreThan);
    let b = arena.insert(b);

    arena.satisfy_constraints(b, &mut NoOpStepObserver).unwrap();
    assert_eq!(arena[a].pos(), Vec2::new(0.0, 0.0));
    assert_eq!(arena[b].pos(), Vec2::new(30.0, 40.0));
}

#[test]
fn slack_constraint_pulls_back_to_limit_when_stretched() {
    let mut arena = PointArena::new();
    let a = arena.insert(free(0.0, 0.0));
    let mut b = free(60.0, 80.0);
    b.add_constraint(a, 50.0, ConstraintKind::NotMoreThan);
    let b = arena.insert(b);

    arena.satisfy_constraints(b, &mut NoOpStepObserver).unwrap();
    let dist = arena[a].pos().distance(arena[b].pos());
    assert!(dist < 100.0);
    assert_abs_diff_eq!(dist, 50.0, epsilon = 1e-4);
}

#[test]
fn strut_constraint_pushes_apart_only_when_too_close() {
    let mut arena = PointArena::new();
    let a = arena.insert(free(0.0, 0.0));
    let mut b = free(10.0, 0.0);
    b.add_constraint(a, 20.0, ConstraintKind::NotLessThan);
    let b = arena.insert(b);

    arena.satisfy_constraints(b, &mut NoOpStepObserver).unwrap();
    assert_eq!(arena[a].pos(), Vec2::new(-5.0, 0.0));
    assert_eq!(arena[b].pos(), Vec2::new(15.0, 0.0));

    arena.satisfy_constraints(b, &mut NoOpStepObserver).unwrap();
    assert_eq!(arena[b].pos(), Vec2::new(15.0, 0.0));
}

#[test]
fn equal_weights_share_the_correction_and_keep_the_midpoint() {
    let mut arena = PointArena::new();
    let a = arena.insert(free(-10.0, 4.0));
    let mut b = free(30.0, 4.0);
    b.add_constraint(a, 20.0, ConstraintKind::Equal);
    let b = arena.insert(b);

    arena.satisfy_constraints(b, &mut NoOpStepObserver).unwrap();
    assert_eq!(arena[a].pos(), Vec2::new(0.0, 4.0));
    assert_eq!(arena[b].pos(), Vec2::new(20.0, 4.0));
}

#[test]
fn infinite_mass_point_never_moves() {
    let mut arena = PointArena::new();
    let mut heavy = free(0.0, 0.0);
    assert!(heavy.set_inv_weight(0.0));
    let heavy = arena.insert(heavy);

    let mut partners = Vec::new();
    for i in 0..4 {
        let angle = i as f32;
        let mut p = free(40.0 * angle.cos(), 40.0 * angle.sin());
        p.add_constraint(heavy, 10.0, ConstraintKind::Equal);
        partners.push(arena.insert(p));
    }
    arena[heavy].add_constraint(partners[0], 25.0, ConstraintKind::Equal);

    for _ in 0..10 {
        arena.satisfy_constraints(heavy, &mut NoOpStepObserver).unwrap();
        for &p in &partners {
            arena.satisfy_constraints(p, &mut NoOpStepObserver).unwrap();
        }
        assert_eq!(arena[heavy].pos(), Vec2::new(0.0, 0.0));
    }
    for &p in &partners[1..] {
        assert_abs_diff_eq!(arena[p].pos().length(), 10.0, epsilon = 1e-3);
    }
}

#[test]
fn pinned_target_takes_no_correction() {
    let mut arena = PointArena::new();
    let anchor = arena.insert(ConstrainedPoint::pinned(Vec2::new(0.0f32, 0.0)));
    let mut b = free(0.0, 100.0);
    b.add_constraint(anchor, 50.0, ConstraintKind::Equal);
    let b = arena.insert(b);

    arena.satisfy_constraints(b, &mut NoOpStepObserver).unwrap();
    assert_eq!(arena[anchor].pos(), Vec2::new(0.0, 0.0));
    assert_eq!(arena[b].pos(), Vec2::new(0.0, 50.0));
}

#[test]
fn reweighting_a_pinned_point_keeps_it_immovable() {
    let mut arena = PointArena::new();
    let mut anchor = ConstrainedPoint::pinned(Vec2::new(0.0f32, 0.0));
    anchor.set_weight(1.0).unwrap();
    assert!(!anchor.set_inv_weight(1.0));
    assert_eq!(anchor.inv_weight(), 0.0);
    let anchor = arena.insert(anchor);

    let mut b = free(100.0, 0.0);
    b.add_constraint(anchor, 50.0, ConstraintKind::Equal);
    let b = arena.insert(b);

    let mut system = ConstraintSystem::new();
    system.add_part(anchor);
    system.add_part(b);
    system
        .update(&mut arena, 1.0 / 60.0, &SolverConfig::weightless(), &mut NoOpStepObserver)
        .unwrap();

    assert!(arena[anchor].is_pinned());
    assert_eq!(arena[anchor].pos(), Vec2::new(0.0, 0.0));
    assert_abs_diff_eq!(arena[b].pos().distance(arena[anchor].pos()), 50.0, epsilon = 1e-4);

    arena[anchor].clear_pin();
    assert_eq!(arena[anchor].inv_weight(), 1.0);
}

#[test]
fn reset_pos_drops_momentum() {
    let config = SolverConfig::weightless();
    let mut p = free(0.0, 0.0);
    p.prev_pos = Some(Vec2::new(-2.0, 0.0));
    p.reset_pos(Vec2::new(5.0, 5.0));
    p.update(1.0 / 60.0, &config);
    assert_eq!(p.pos(), Vec2::new(5.0, 5.0));
}

#[test]
fn coincident_points_separate_without_nan() {
    let mut arena = PointArena::new();
    let a = arena.insert(free(5.0, 5.0));
    let mut b = free(5.0, 5.0);
    b.add_constraint(a, 10.0, ConstraintKind::Equal);
    let b = arena.insert(b);

    arena.satisfy_constraints(b, &mut NoOpStepObserver).unwrap();
    let (pa, pb) = (arena[a].pos(), arena[b].pos());
    assert!(pa.x.is_finite() && pa.y.is_finite() && pb.x.is_finite() && pb.y.is_finite());
    assert_ne!(pa, pb);
}

#[test]
fn near_zero_distance_correction_stays_bounded() {
    let mut arena = PointArena::new();
    let a = arena.insert(free(0.0, 0.0));
    let mut b = free(0.001, 0.0);
    b.add_constraint(a, 10.0, ConstraintKind::Equal);
    let b = arena.insert(b);

    arena.satisfy_constraints(b, &mut NoOpStepObserver).unwrap();
    let dist = arena[a].pos().distance(arena[b].pos());
    assert!(dist < 10.0, "correction must not overshoot the rest length, got {}", dist);
}

#[test]
fn constraint_list_management() {
    let mut arena = PointArena::<f32>::new();
    let a = arena.insert(free(0.0, 0.0));
    let b = arena.insert(free(1.0, 0.0));
    let c = arena.insert(free(2.0, 0.0));
    let mut p = free(3.0, 0.0);

    p.add_constraint(a, 10.0, ConstraintKind::Equal);
    p.add_constraint(b, 20.0, ConstraintKind::NotMoreThan);
    assert!(p.has_constraint(a));
    assert!(!p.has_constraint(c));
    assert_eq!(p.rest_length(b), Some(20.0));
    assert_eq!(p.rest_length(c), None);

    assert!(p.change_rest_length(a, 12.0));
    assert_eq!(p.rest_length(a), Some(12.0));

    assert!(p.change_constraint(a, c));
    assert!(!p.has_constraint(a));
    assert_eq!(p.rest_length(c), Some(12.0));
    assert_eq!(p.constraints()[0].kind, ConstraintKind::Equal);

    assert!(p.change_constraint_and_length(b, a, 5.0));
    assert_eq!(p.rest_length(a), Some(5.0));
    assert_eq!(p.constraints()[1].kind, ConstraintKind::NotMoreThan);
    assert!(!p.change_constraint_and_length(b, a, 5.0));

    assert!(p.remove_constraint(c));
    assert!(!p.remove_constraint(c));
    assert_eq!(p.constraint_count(), 1);

    assert_eq!(
        p.remove_constraint_at(3),
        Err(PhysicsError::ConstraintOutOfBounds { index: 3, count: 1 })
    );
    let removed = p.remove_constraint_at(0).unwrap();
    assert_eq!(removed.target, a);
    assert_eq!(p.constraint_count(), 0);

    p.add_constraint(a, 1.0, ConstraintKind::Equal);
    p.add_constraint(b, 1.0, ConstraintKind::NotLessThan);
    p.remove_all_constraints();
    assert_eq!(p.constraint_count(), 0);
}

#[test]
fn remove_constraint_only_drops_the_first_match() {
    let mut arena = PointArena::<f32>::new();
    let a = arena.insert(free(0.0, 0.0));
    let mut p = free(1.0, 0.0);
    p.add_constraint(a, 1.0, ConstraintKind::Equal);
    p.add_constraint(a, 2.0, ConstraintKind::NotMoreThan);
    assert!(p.remove_constraint(a));
    assert_eq!(p.rest_length(a), Some(2.0));
}

#[test]
fn follow_copies_running_mover_position() {
    let mut mover = Mover::new(2, 10.0f32, 0.0);
    mover.set_path_from_string("100,0", Vec2::new(0.0, 0.0)).unwrap();
    mover.start();
    mover.update(1.0);

    let mut p = ConstrainedPoint::pinned(Vec2::new(0.0, 0.0));
    p.follow(&mover);
    assert_eq!(p.pos(), Vec2::new(10.0, 0.0));
    assert_eq!(p.pin(), Some(Vec2::new(10.0, 0.0)));

    mover.pause();
    mover.pos = Vec2::new(99.0, 99.0);
    p.follow(&mover);
    assert_eq!(p.pos(), Vec2::new(10.0, 0.0));
}

#[test]
fn pos_string_formats_two_decimals() {
    let p = free(1.005, -12.5);
    assert_eq!(p.pos_string(), format!("{:.2}, {:.2}", 1.005f32, -12.5f32));
    assert_eq!(free(3.0, 4.25).pos_string(), "3.00, 4.25");
}
