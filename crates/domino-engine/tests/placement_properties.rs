/**
 * Property tests for the placement chain and the history ledger.
 *
 * Invariants covered:
 * - Consecutive pieces of one gesture sit exactly `spacing` apart.
 * - A gesture that never moves `spacing` away commits nothing.
 * - `k` undos hide exactly the last `min(k, n)` sets.
 * - `restart_history(from)` keeps sets before `from` untouched.
 * - Ending a simulation restores every rest pose.
 */
use domino_engine::{
    HistoryLedger, HistorySet, MemoryWorld, PieceArena, PlacementChain, PlacementConfig, Pose,
    SimulationToggle, WorldObjects,
};
use glam::{Quat, Vec3};
use proptest::prelude::*;

fn run_gesture(targets: &[(f32, f32, f32)], spacing: f32) -> (Vec<Vec3>, PieceArena, MemoryWorld) {
    let config = PlacementConfig {
        spacing,
        ..PlacementConfig::default()
    };
    let mut chain = PlacementChain::new(config);
    let mut arena = PieceArena::new(3);
    let mut world = MemoryWorld::new();

    chain.begin(1).unwrap();
    let mut placed = Vec::new();
    for &(x, y, dt) in targets {
        placed.extend(chain.update(Vec3::new(x, y, 0.0), dt, &mut arena, &mut world).unwrap());
    }
    let set = chain.end(&mut world).unwrap();
    assert_eq!(set.pieces, placed);

    let positions = placed
        .iter()
        .map(|&id| arena.get(id).unwrap().original_pose().position)
        .collect();
    (positions, arena, world)
}

fn commit_sets(counts: &[usize]) -> (HistoryLedger, PieceArena, MemoryWorld) {
    let mut world = MemoryWorld::new();
    let mut arena = PieceArena::new(5);
    let mut ledger = HistoryLedger::new();
    for &n in counts {
        let mut set = HistorySet::new(ledger.next_index());
        for i in 0..n {
            set.push(arena.spawn(&mut world, Pose::at(Vec3::new(i as f32, 0.0, 0.0))));
        }
        ledger.commit(set);
    }
    (ledger, arena, world)
}

proptest! {
    #[test]
    fn consecutive_pieces_are_spacing_apart(
        targets in prop::collection::vec((-4.0f32..4.0, -4.0f32..4.0, 0.01f32..1.0), 1..60),
        spacing in 0.1f32..1.0,
    ) {
        let (positions, _, world) = run_gesture(&targets, spacing);

        for pair in positions.windows(2) {
            let d = pair[0].distance(pair[1]);
            prop_assert!((d - spacing).abs() < 1e-3, "gap {} vs spacing {}", d, spacing);
        }
        // The ghost never outlives the gesture
        prop_assert_eq!(world.len(), positions.len());
    }

    #[test]
    fn first_crossing_places_two_then_one_per_frame(
        dirs in prop::collection::vec(0.0f32..std::f32::consts::TAU, 1..20),
    ) {
        let config = PlacementConfig::default();
        let mut chain = PlacementChain::new(config);
        let mut arena = PieceArena::new(3);
        let mut world = MemoryWorld::new();
        chain.begin(1).unwrap();
        chain.update(Vec3::ZERO, 1.0, &mut arena, &mut world).unwrap();

        // Always jump well past spacing from the origin
        for (i, angle) in dirs.iter().enumerate() {
            let target = Vec3::new(angle.cos(), angle.sin(), 0.0) * 50.0;
            let placed = chain.update(target, 1.0, &mut arena, &mut world).unwrap();
            let expected = if i == 0 { 2 } else { 1 };
            prop_assert_eq!(placed.len(), expected);
        }
    }

    #[test]
    fn short_gestures_commit_nothing(
        targets in prop::collection::vec((-0.1f32..0.1, -0.1f32..0.1, 0.01f32..1.0), 1..30),
    ) {
        // Everything stays within 0.3 of the first target
        let (positions, arena, world) = run_gesture(&targets, 0.3);
        prop_assert!(positions.is_empty());
        prop_assert!(arena.is_empty());
        prop_assert!(world.is_empty());
    }

    #[test]
    fn undo_hides_exactly_the_latest_sets(
        counts in prop::collection::vec(1usize..5, 1..8),
        undos in 0usize..12,
    ) {
        let (mut ledger, mut arena, mut world) = commit_sets(&counts);
        for _ in 0..undos {
            ledger.undo(&mut arena, &mut world);
        }

        let n = counts.len();
        let hidden = undos.min(n);
        prop_assert_eq!(ledger.undo_depth(), hidden);
        for (i, set) in ledger.sets().iter().enumerate() {
            let should_hide = i >= n - hidden;
            for &id in &set.pieces {
                prop_assert_eq!(arena.get(id).unwrap().visible, !should_hide);
            }
        }
    }

    #[test]
    fn undo_then_redo_restores_visibility(
        counts in prop::collection::vec(1usize..5, 1..8),
        undos in 0usize..10,
    ) {
        let (mut ledger, mut arena, mut world) = commit_sets(&counts);
        let before: Vec<bool> = arena.iter().map(|p| p.visible).collect();

        let mut done = 0;
        for _ in 0..undos {
            if ledger.undo(&mut arena, &mut world).is_some() {
                done += 1;
            }
        }
        for _ in 0..done {
            prop_assert!(ledger.redo(&mut arena, &mut world).is_some());
        }

        let after: Vec<bool> = arena.iter().map(|p| p.visible).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(ledger.undo_depth(), 0);
    }

    #[test]
    fn restart_keeps_the_prefix(
        counts in prop::collection::vec(1usize..5, 1..8),
        from in 0usize..10,
    ) {
        let (mut ledger, mut arena, mut world) = commit_sets(&counts);
        let prefix: Vec<HistorySet> = ledger.sets().iter().take(from).cloned().collect();
        let len = ledger.len();

        let destroyed = ledger.restart_history(from, &mut arena, &mut world);

        if from > len {
            prop_assert_eq!(destroyed, 0);
            prop_assert_eq!(ledger.len(), len);
        } else {
            let expected: usize = counts[from..].iter().sum();
            prop_assert_eq!(destroyed, expected);
            prop_assert_eq!(ledger.sets(), &prefix[..]);
            prop_assert_eq!(ledger.undo_depth(), 0);
            prop_assert_eq!(world.len(), counts[..from].iter().sum::<usize>());
        }
    }

    #[test]
    fn ending_simulation_restores_rest_poses(
        rest in prop::collection::vec((-5.0f32..5.0, -5.0f32..5.0, 0.0f32..6.28), 1..10),
        moved in prop::collection::vec((-5.0f32..5.0, -5.0f32..5.0, -5.0f32..5.0), 10),
    ) {
        let mut world = MemoryWorld::new();
        let mut arena = PieceArena::new(9);
        let mut rest_poses = Vec::new();
        for &(x, y, yaw) in &rest {
            let pose = Pose::new(Vec3::new(x, y, 0.0), Quat::from_rotation_z(yaw));
            arena.spawn(&mut world, pose);
            rest_poses.push(pose);
        }

        let mut sim = SimulationToggle::new();
        sim.begin(&arena, &mut world).unwrap();
        for (piece, &(x, y, z)) in arena.iter().zip(moved.iter()) {
            world.displace(piece.object, Pose::at(Vec3::new(x, y, z)));
        }
        sim.end(&arena, &mut world).unwrap();

        for (piece, expected) in arena.iter().zip(rest_poses.iter()) {
            prop_assert_eq!(world.pose(piece.object), Some(*expected));
            prop_assert!(!world.is_awake(piece.object));
        }
    }
}
