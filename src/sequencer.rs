//! Staggered rise/fall cycle across the whole tile grid.
//!
//! Every tile rises with a per-index delay, falls as soon as its own rise
//! ends, and reports its fall completion to a [`CompletionBarrier`]. When the
//! barrier releases, the cycle hook runs once (the camera flip) and a new
//! cycle is scheduled from the exact completion timestamp.
use log::{debug, info, warn};

use crate::config::{ConfigError, StaggerTiming};
use crate::tile_grid::TileGrid;
use crate::tween::{TweenEvent, TweenSpec, Tweener};
use crate::types::AnimationPhase;

/// Upper bound on zero-length re-ticks per step. Legs still due afterwards
/// run on the next tick.
const MAX_CHAINED_PASSES: usize = 4096;

/// Rise or fall leg of one tile's animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Rise,
    Fall,
}

/// Tween key: which tile, which leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLeg {
    pub index: usize,
    pub leg: Leg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerPhase {
    Idle,
    RaisingAll,
    FallingAll,
    /// Transient: the barrier released and the hook is running
    CycleComplete,
}

/// Cross-tile state of the running cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequencerState {
    pub cycle_index: u64,
    pub orientation_flipped: bool,
    pub tiles_started: usize,
    pub tiles_completed: usize,
}

/// Counts arrivals and releases exactly once, when every member has arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionBarrier {
    total: usize,
    arrived: usize,
    released: bool,
}

impl CompletionBarrier {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            arrived: 0,
            released: false,
        }
    }

    /// Record one arrival; true only for the arrival that completes the set
    pub fn arrive(&mut self) -> bool {
        if self.released || self.arrived >= self.total {
            warn!("Barrier arrival after release ({}/{})", self.arrived, self.total);
            return false;
        }

        self.arrived += 1;
        if self.arrived == self.total {
            self.released = true;
            true
        } else {
            false
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.arrived == self.total
    }

    pub fn arrived(&self) -> usize {
        self.arrived
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn reset(&mut self) {
        self.arrived = 0;
        self.released = false;
    }
}

/// Runs once per completed cycle before the next one is scheduled.
/// Returns the orientation in effect afterwards.
pub trait CycleHook {
    fn cycle_complete(&mut self, state: &SequencerState) -> bool;
}

impl<F: FnMut(&SequencerState) -> bool> CycleHook for F {
    fn cycle_complete(&mut self, state: &SequencerState) -> bool {
        self(state)
    }
}

/// Summary of one finished cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub cycle_index: u64,
    pub completed_at: f64,
    /// Index of the tile whose fall released the barrier
    pub last_tile: usize,
    pub orientation_flipped: bool,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    timing: StaggerTiming,
    state: SequencerState,
    phase: SequencerPhase,
    barrier: CompletionBarrier,
    rises_completed: usize,
    tweener: Tweener<TileLeg>,
}

impl Sequencer {
    pub fn new(timing: StaggerTiming) -> Result<Self, ConfigError> {
        timing.validate()?;

        Ok(Self {
            timing,
            state: SequencerState::default(),
            phase: SequencerPhase::Idle,
            barrier: CompletionBarrier::new(0),
            rises_completed: 0,
            tweener: Tweener::new(),
        })
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn phase(&self) -> SequencerPhase {
        self.phase
    }

    pub fn barrier(&self) -> &CompletionBarrier {
        &self.barrier
    }

    pub fn timing(&self) -> &StaggerTiming {
        &self.timing
    }

    /// Sequencer clock in seconds since construction
    pub fn now(&self) -> f64 {
        self.tweener.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tweener.pending()
    }

    /// `Idle -> RaisingAll`. An empty grid satisfies the barrier trivially and
    /// the sequencer stays idle.
    pub fn start(&mut self, tiles: &mut TileGrid) {
        if self.phase != SequencerPhase::Idle {
            debug!("Sequencer already running, start ignored");
            return;
        }

        self.barrier = CompletionBarrier::new(tiles.len());
        if tiles.is_empty() {
            debug!("No tiles to animate, sequencer stays idle");
            return;
        }

        let origin = self.tweener.now();
        self.schedule_cycle(origin, tiles);
    }

    /// Advance by `delta` seconds, applying tile updates and running `hook`
    /// for every cycle that finishes inside this step
    pub fn tick(&mut self, delta: f32, tiles: &mut TileGrid, hook: &mut dyn CycleHook) -> Vec<CycleReport> {
        let mut reports = Vec::new();
        if self.phase == SequencerPhase::Idle {
            return reports;
        }

        let mut events = self.tweener.tick(delta);
        let mut passes = 0;
        loop {
            for event in events {
                if let Some(report) = self.handle(event, tiles, hook) {
                    reports.push(report);
                }
            }

            // Legs chained from a completion inside this step may already be due
            if !self.tweener.has_due() {
                break;
            }
            passes += 1;
            if passes >= MAX_CHAINED_PASSES {
                warn!(
                    "Sequencer fell behind after {} cycles this step, deferring the rest",
                    reports.len()
                );
                break;
            }
            events = self.tweener.tick(0.0);
        }

        reports
    }

    /// Teardown: drop every pending leg and return to idle
    pub fn cancel(&mut self) -> usize {
        let dropped = self.tweener.cancel_all();
        self.phase = SequencerPhase::Idle;
        self.barrier.reset();
        self.rises_completed = 0;
        self.state.tiles_started = 0;
        self.state.tiles_completed = 0;
        debug!("Sequencer cancelled, {} pending legs dropped", dropped);
        dropped
    }

    fn schedule_cycle(&mut self, origin: f64, tiles: &mut TileGrid) {
        self.state.tiles_started = 0;
        self.state.tiles_completed = 0;
        self.rises_completed = 0;
        self.barrier.reset();

        for (index, tile) in tiles.iter().enumerate() {
            self.tweener.schedule_at(
                origin,
                TweenSpec {
                    key: TileLeg { index, leg: Leg::Rise },
                    from: tile.rest_height,
                    to: tile.raised_height,
                    delay: index as f32 * self.timing.stagger,
                    duration: self.timing.rise_duration,
                    easing: self.timing.rise_easing,
                },
            );
        }

        self.phase = SequencerPhase::RaisingAll;
    }

    fn handle(
        &mut self,
        event: TweenEvent<TileLeg>,
        tiles: &mut TileGrid,
        hook: &mut dyn CycleHook,
    ) -> Option<CycleReport> {
        match event {
            TweenEvent::Started { key, .. } => {
                let Some(tile) = tiles.by_index_mut(key.index) else {
                    return None;
                };
                tile.phase = match key.leg {
                    Leg::Rise => {
                        self.state.tiles_started += 1;
                        AnimationPhase::Rising
                    }
                    Leg::Fall => AnimationPhase::Falling,
                };
                None
            }
            TweenEvent::Updated { key, value, .. } => {
                if let Some(tile) = tiles.by_index_mut(key.index) {
                    tile.height = value;
                    if key.leg == Leg::Rise {
                        tile.shadow_visible = true;
                    }
                }
                None
            }
            TweenEvent::Completed { key, value, at, .. } => match key.leg {
                Leg::Rise => {
                    let Some(tile) = tiles.by_index_mut(key.index) else {
                        return None;
                    };
                    tile.height = value;
                    tile.shadow_visible = true;
                    let (from, to) = (tile.raised_height, tile.rest_height);

                    self.rises_completed += 1;
                    if self.rises_completed == tiles.len() {
                        self.phase = SequencerPhase::FallingAll;
                    }

                    self.tweener.schedule_at(
                        at,
                        TweenSpec {
                            key: TileLeg { index: key.index, leg: Leg::Fall },
                            from,
                            to,
                            delay: 0.0,
                            duration: self.timing.fall_duration,
                            easing: self.timing.fall_easing,
                        },
                    );
                    None
                }
                Leg::Fall => {
                    let Some(tile) = tiles.by_index_mut(key.index) else {
                        return None;
                    };
                    tile.height = value;
                    tile.shadow_visible = false;
                    tile.phase = AnimationPhase::Resting;

                    self.state.tiles_completed += 1;
                    if self.barrier.arrive() {
                        Some(self.complete_cycle(key.index, at, tiles, hook))
                    } else {
                        None
                    }
                }
            },
        }
    }

    /// `CycleComplete -> RaisingAll`
    fn complete_cycle(
        &mut self,
        last_tile: usize,
        at: f64,
        tiles: &mut TileGrid,
        hook: &mut dyn CycleHook,
    ) -> CycleReport {
        self.phase = SequencerPhase::CycleComplete;

        if last_tile + 1 != tiles.len() {
            warn!(
                "Cycle {} released by tile {} instead of {}; leg durations are not uniform",
                self.state.cycle_index,
                last_tile,
                tiles.len().saturating_sub(1)
            );
        }

        self.state.orientation_flipped = hook.cycle_complete(&self.state);

        let report = CycleReport {
            cycle_index: self.state.cycle_index,
            completed_at: at,
            last_tile,
            orientation_flipped: self.state.orientation_flipped,
        };
        info!(
            "Cycle {} complete at {:.2}s, flipped: {}",
            report.cycle_index, at, report.orientation_flipped
        );

        self.state.cycle_index += 1;
        self.schedule_cycle(at, tiles);

        report
    }
}
