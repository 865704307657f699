use cone_grid::camera::{CameraFlipController, CameraRig, OrbitCamera, RigState, ScenePose};
use cone_grid::config::{CameraConfig, StaggerTiming};
use cone_grid::layout::GridSpec;
use cone_grid::sequencer::{Sequencer, SequencerPhase, SequencerState};
use cone_grid::tile_grid::TileGrid;
use cone_grid::tween::{Easing, TweenEvent, TweenSpec, Tweener};
use cone_grid::types::AnimationPhase;

const STEP: f32 = 1.0 / 60.0;

fn tiles(columns: i64, rows: i64) -> TileGrid {
    TileGrid::new(GridSpec::new(columns, rows, 1.4, 0.6).unwrap(), 4.0).unwrap()
}

#[cfg(test)]
mod barrier_tests {
    use super::*;

    #[test]
    fn test_completion_times_increase_with_index() {
        let (k_tiles, stagger, duration) = (9usize, 0.03f32, 1.3f32);
        let mut tweener = Tweener::new();
        for k in 0..k_tiles {
            tweener.schedule(TweenSpec {
                key: k,
                from: 0.0,
                to: 1.0,
                delay: k as f32 * stagger,
                duration,
                easing: Easing::Linear,
            });
        }

        let mut completions = Vec::new();
        for _ in 0..120 {
            for event in tweener.tick(STEP) {
                if let TweenEvent::Completed { key, at, .. } = event {
                    completions.push((key, at));
                }
            }
        }

        assert_eq!(completions.len(), k_tiles);
        for (k, &(key, at)) in completions.iter().enumerate() {
            assert_eq!(key, k, "completions arrive in index order");
            assert!((at - f64::from(k as f32 * stagger + duration)).abs() < 1e-5);
        }

        let (last, _) = completions
            .iter()
            .copied()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert_eq!(last, k_tiles - 1);
    }

    #[test]
    fn test_cycle_hook_fires_once_per_cycle_for_any_size() {
        for (columns, rows) in [(1, 1), (1, 2), (7, 1), (12, 5)] {
            let mut grid = tiles(columns, rows);
            let count = grid.len();
            let timing = StaggerTiming::default();
            let cycle = (count - 1) as f32 * timing.stagger + timing.rise_duration + timing.fall_duration;

            let mut sequencer = Sequencer::new(timing).unwrap();
            let mut calls = Vec::new();
            let mut hook = |state: &SequencerState| {
                calls.push(state.cycle_index);
                !state.orientation_flipped
            };
            sequencer.start(&mut grid);

            // Run a little past one cycle, well short of two
            let frames = ((cycle * 1.5) / STEP) as usize;
            let mut reports = Vec::new();
            for _ in 0..frames {
                reports.extend(sequencer.tick(STEP, &mut grid, &mut hook));
            }

            assert_eq!(reports.len(), 1, "{}x{}", columns, rows);
            assert_eq!(reports[0].last_tile, count - 1);
            assert!((reports[0].completed_at - f64::from(cycle)).abs() < 1e-4);
            drop(hook);
            assert_eq!(calls, vec![0]);
        }
    }

    #[test]
    fn test_cycles_repeat_and_alternate_orientation() {
        let mut grid = tiles(3, 2);
        let mut sequencer = Sequencer::new(StaggerTiming::default()).unwrap();
        let mut rig = CameraRig::new(
            OrbitCamera::new(&CameraConfig::default(), 1.0),
            CameraFlipController::default(),
        );
        sequencer.start(&mut grid);

        let mut reports = Vec::new();
        for _ in 0..(60 * 6) {
            reports.extend(sequencer.tick(STEP, &mut grid, &mut rig));
        }

        // One cycle is 5 * 0.03 + 1.3 = 1.45s
        assert_eq!(reports.len(), 4);
        let flips: Vec<bool> = reports.iter().map(|r| r.orientation_flipped).collect();
        assert_eq!(flips, vec![true, false, true, false]);
        for (n, report) in reports.iter().enumerate() {
            assert_eq!(report.cycle_index, n as u64);
            assert!((report.completed_at - 1.45 * (n + 1) as f64).abs() < 1e-3);
        }
        assert!(!rig.state().flipped);
    }

    #[test]
    fn test_tiles_rest_between_cycles() {
        let mut grid = tiles(1, 1);
        let mut sequencer = Sequencer::new(StaggerTiming::default()).unwrap();
        let mut hook = |_: &SequencerState| true;
        sequencer.start(&mut grid);

        // Rise is done and the elastic fall is under way
        sequencer.tick(0.6, &mut grid, &mut hook);
        let tile = grid.by_index(0).unwrap();
        assert_eq!(tile.phase, AnimationPhase::Falling);
        assert!(tile.shadow_visible);

        // Fall ended at 1.3s, the next rise starts at once
        sequencer.tick(0.705, &mut grid, &mut hook);
        let tile = grid.by_index(0).unwrap();
        assert_eq!(tile.phase, AnimationPhase::Rising);
        assert_eq!(sequencer.state().cycle_index, 1);
        assert_eq!(sequencer.state().tiles_completed, 0);
    }
}

#[cfg(test)]
mod shadow_tests {
    use super::*;

    #[test]
    fn test_fall_completion_hides_shadow() {
        let mut grid = tiles(1, 2);
        let mut sequencer = Sequencer::new(StaggerTiming::default()).unwrap();
        let mut hook = |_: &SequencerState| true;
        sequencer.start(&mut grid);

        // Tile 0 lands at 1.3s, tile 1 at 1.33s
        sequencer.tick(1.31, &mut grid, &mut hook);

        let first = grid.by_index(0).unwrap();
        assert_eq!(first.phase, AnimationPhase::Resting);
        assert!(!first.shadow_visible);
        assert_eq!(first.height, first.rest_height);

        let second = grid.by_index(1).unwrap();
        assert_eq!(second.phase, AnimationPhase::Falling);
        assert!(second.shadow_visible);
    }
}

#[cfg(test)]
mod long_run_tests {
    use super::*;

    #[test]
    fn test_cycles_continue_after_days() {
        let mut grid = tiles(1, 1);
        let mut sequencer = Sequencer::new(StaggerTiming::default()).unwrap();
        let mut hook = |state: &SequencerState| !state.orientation_flipped;
        sequencer.start(&mut grid);

        // 2^19 s of uptime
        for _ in 0..(1 << 19) {
            sequencer.tick(1.0, &mut grid, &mut hook);
        }
        let before = sequencer.now();
        assert_eq!(before, 524_288.0);

        let mut heights = Vec::new();
        let mut cycles = 0;
        for _ in 0..600 {
            cycles += sequencer.tick(STEP, &mut grid, &mut hook).len();
            heights.push(grid.by_index(0).unwrap().height);
        }

        assert!(sequencer.now() > before + 9.9);
        assert!(cycles >= 7, "{} cycles in 10s", cycles);
        assert!(heights.windows(2).any(|w| w[0] != w[1]));
    }
}

#[cfg(test)]
mod degenerate_tests {
    use super::*;

    #[test]
    fn test_empty_grid_never_starts_a_task() {
        for (columns, rows) in [(0, 0), (0, 5), (12, 0)] {
            let mut grid = tiles(columns, rows);
            let mut sequencer = Sequencer::new(StaggerTiming::default()).unwrap();
            let mut flips = 0;
            let mut hook = |_: &SequencerState| {
                flips += 1;
                true
            };

            sequencer.start(&mut grid);
            for _ in 0..600 {
                assert!(sequencer.tick(STEP, &mut grid, &mut hook).is_empty());
            }

            assert_eq!(sequencer.phase(), SequencerPhase::Idle);
            assert!(sequencer.barrier().is_satisfied());
            assert_eq!(sequencer.state().tiles_started, 0);
            assert_eq!(sequencer.pending_tasks(), 0);
            drop(hook);
            assert_eq!(flips, 0);
        }
    }
}

#[cfg(test)]
mod flip_tests {
    use super::*;

    #[test]
    fn test_double_flip_restores_pose() {
        let controller = CameraFlipController::default();
        for start in [RigState::default(), controller.flip(RigState::default())] {
            let back = controller.flip(controller.flip(start));
            assert_eq!(back.flipped, start.flipped);
            assert!(back.pose.approx_eq(&start.pose, 1e-6));
        }
    }

    #[test]
    fn test_rig_double_flip_restores_camera() {
        let mut rig = CameraRig::new(
            OrbitCamera::new(&CameraConfig::default(), 1.0),
            CameraFlipController::default(),
        );
        let camera = rig.camera.position();

        rig.flip();
        assert!(rig.pose().approx_eq(&ScenePose::flipped(), 1e-6));
        rig.flip();

        assert!(rig.pose().approx_eq(&ScenePose::rest(), 1e-6));
        assert!(rig.camera.position().abs_diff_eq(camera, 1e-3));
        assert_eq!(rig.camera.target(), glam::Vec3::ZERO);
    }
}
