// Marker scheduler: the per-frame admission / eviction loop.
//
// Keeps at most `capacity` marker groups alive along the path:
// - Below capacity it fills the window with the next candidates.
// - At capacity it swaps the oldest group for the next candidate only when
//   that candidate is strictly closer to the observer (along the path) than
//   the oldest group and within the reveal distance.
// - Each spawn advances a cursor past candidates closer than the minimal
//   spacing, wrapping to 0 once at the end of the candidates.
//
// ```text
// MarkerScheduler
//   ├── PositionSource (observer ground position)
//   ├── InstanceFactory (guide / hazard instances)
//   ├── Session (per start)
//   │   ├── CandidateIndex
//   │   ├── CurveOracle
//   │   └── cursor
//   └── SpawnWindow (live marker groups, oldest first)
// ```

use glam::Vec3;
use log::{debug, info, warn};

use super::candidates::CandidateIndex;
use super::collaborators::{CurveOracle, InstanceFactory, PositionSource, PrefabKind};
use super::config::SpawnerConfig;
use super::error::{InvariantViolation, SchedulerResult, TurnError};
use super::placement::{self, Frame, Pose};
use super::turn::TurnClassifier;
use super::window::{MarkerGroup, SpawnWindow};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No session is running.
    Idle,
    /// The observer position is not available yet.
    ObserverNotReady,
    /// The window was below capacity; `spawned` groups were added.
    Filled { spawned: usize },
    /// The window was full and the oldest group was swapped for a new one.
    Replaced { evicted: usize, spawned: usize },
    /// The window was full and nothing qualified for admission.
    Held,
}

/// Result of considering a hazard marker for a newly spawned group.
#[derive(Debug, Clone, PartialEq)]
pub enum HazardOutcome {
    /// The factory has no hazard prefab.
    Disabled,
    /// The turn at this candidate is below the sharpness threshold.
    NotSharp,
    /// A hazard was placed; `sign` is the turn direction it answers.
    Placed { sign: i8 },
    /// Classification failed; the guides spawned without a hazard.
    Failed(TurnError),
}

/// Running counters, handy for logs and debug overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub ticks: u64,
    pub spawned: u64,
    pub evicted: u64,
    pub hazards_placed: u64,
    pub hazard_failures: u64,
}

/// Per-`start` state. Dropped wholesale on `stop` or restart.
struct Session<C> {
    candidates: CandidateIndex,
    curve: C,
    /// Next candidate to consider.
    next_id: usize,
}

/// Keeps a bounded sliding window of marker groups in step with an observer
/// moving along a path.
pub struct MarkerScheduler<C, F, P>
where
    F: InstanceFactory,
{
    config: SpawnerConfig,
    classifier: TurnClassifier,
    factory: F,
    position: P,
    session: Option<Session<C>>,
    window: SpawnWindow<F::Handle>,
    stats: SchedulerStats,
}

impl<C, F, P> MarkerScheduler<C, F, P>
where
    C: CurveOracle,
    F: InstanceFactory,
    P: PositionSource,
{
    /// Create a stopped scheduler. The configuration is validated here.
    pub fn new(config: SpawnerConfig, factory: F, position: P) -> SchedulerResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier: TurnClassifier::new(config.sharp_turn_angle_deg),
            window: SpawnWindow::new(config.capacity),
            config,
            factory,
            position,
            session: None,
            stats: SchedulerStats::default(),
        })
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Start a session over `raw_positions` (trimmed at both ends) measured
    /// against `curve`. Any previous session and its markers are discarded.
    pub fn start(&mut self, raw_positions: Vec<Vec3>, curve: C) {
        let released = self.clear_state();
        if released > 0 {
            debug!("restart released {released} instances");
        }

        let raw_len = raw_positions.len();
        let candidates = CandidateIndex::from_raw(raw_positions, self.config.trim_margin);
        info!(
            "marker session started: {} candidates ({} recorded), path length {:.1}",
            candidates.len(),
            raw_len,
            curve.path_length()
        );
        self.session = Some(Session {
            candidates,
            curve,
            next_id: 0,
        });
    }

    /// Stop scheduling and destroy every live marker group.
    /// Returns the number of instances destroyed.
    pub fn stop(&mut self) -> usize {
        self.session = None;
        let released = self.clear_state();
        info!("marker session stopped, released {released} instances");
        released
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    fn clear_state(&mut self) -> usize {
        let mut released = 0;
        for group in self.window.drain() {
            released += group.release(&mut self.factory);
        }
        released
    }

    // ------------------------------------------------------------------------
    // Per-frame update
    // ------------------------------------------------------------------------

    /// Read the observer from the position source and run one tick.
    pub fn tick(&mut self) -> SchedulerResult<TickOutcome> {
        if self.session.is_none() {
            return Ok(TickOutcome::Idle);
        }
        match self.position.current_ground_position() {
            Ok(observer) => self.tick_at(observer),
            Err(_) => Ok(TickOutcome::ObserverNotReady),
        }
    }

    /// Run one tick for an observer at `observer`.
    pub fn tick_at(&mut self, observer: Vec3) -> SchedulerResult<TickOutcome> {
        let Some(session) = self.session.as_ref() else {
            return Ok(TickOutcome::Idle);
        };
        self.stats.ticks += 1;

        if !self.window.is_full() {
            let room = self.config.capacity - self.window.len();
            let mut spawned = 0;
            for _ in 0..room {
                if self.peek_next().is_none() {
                    break;
                }
                self.spawn_next()?;
                spawned += 1;
            }
            return Ok(TickOutcome::Filled { spawned });
        }

        let Some(next) = self.peek_next() else {
            return Ok(TickOutcome::Held);
        };
        let oldest = self
            .window
            .oldest()
            .ok_or(InvariantViolation::EvictFromEmptyWindow)?;
        let next_pos = session.candidates.positions()[next];
        let to_next = session.curve.arc_distance(next_pos, observer);
        let to_oldest = session.curve.arc_distance(oldest.anchor(), observer);

        if to_next < to_oldest && to_next < self.config.reveal_distance {
            let evicted = self.remove_oldest()?;
            let spawned = self.spawn_next()?;
            return Ok(TickOutcome::Replaced { evicted, spawned });
        }
        Ok(TickOutcome::Held)
    }

    /// The candidate at the cursor, unless it already holds a live group.
    fn peek_next(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        let next = session.next_id;
        if next >= session.candidates.len() || self.window.contains(next) {
            return None;
        }
        Some(next)
    }

    fn remove_oldest(&mut self) -> SchedulerResult<usize> {
        let group = self.window.pop_oldest()?;
        let index = group.candidate_index();
        group.release(&mut self.factory);
        self.stats.evicted += 1;
        debug!("evicted marker group at candidate {index}");
        Ok(index)
    }

    /// Spawn a marker group at the cursor and advance the cursor.
    fn spawn_next(&mut self) -> SchedulerResult<usize> {
        let session = self.session.as_mut().ok_or(InvariantViolation::NoSession)?;
        let index = session.next_id;
        let candidates = session.candidates.positions();
        let anchor = *candidates.get(index).ok_or(InvariantViolation::CursorOutOfRange {
            cursor: index,
            len: candidates.len(),
        })?;
        if self.window.is_full() {
            return Err(InvariantViolation::WindowOverflow { capacity: self.window.capacity() }.into());
        }
        if self.window.contains(index) {
            return Err(InvariantViolation::DuplicateCandidate(index).into());
        }

        let config = &self.config;
        let frame = Frame::look(placement::heading_at(candidates, index));
        let mut instances = Vec::with_capacity(3);
        for pose in placement::guide_poses(
            anchor,
            &frame,
            config.guide_radius,
            config.guide_height,
            config.guide_tilt_deg.to_radians(),
        ) {
            instances.push(place(&mut self.factory, PrefabKind::Guide, pose));
        }

        let hazard = if !self.factory.provides(PrefabKind::Hazard) {
            HazardOutcome::Disabled
        } else {
            match self.classifier.classify(candidates, index) {
                Ok(turn) if turn.is_sharp => {
                    let pose = placement::hazard_pose(
                        anchor,
                        &frame,
                        config.hazard_ahead_distance,
                        config.hazard_height,
                        turn.sign,
                    );
                    instances.push(place(&mut self.factory, PrefabKind::Hazard, pose));
                    self.stats.hazards_placed += 1;
                    debug!(
                        "hazard at candidate {index}: {:.1} deg turn, sign {}",
                        turn.angle_degrees, turn.sign
                    );
                    HazardOutcome::Placed { sign: turn.sign }
                }
                Ok(_) => HazardOutcome::NotSharp,
                Err(e) => {
                    self.stats.hazard_failures += 1;
                    warn!("skipping hazard at candidate {index}: {e}");
                    HazardOutcome::Failed(e)
                }
            }
        };

        self.window.push(MarkerGroup::new(index, anchor, instances, hazard))?;
        self.stats.spawned += 1;
        debug!("spawned marker group at candidate {index}");

        advance_cursor(session, &self.window, self.config.minimal_spacing, anchor)?;
        Ok(index)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    pub fn window(&self) -> &SpawnWindow<F::Handle> {
        &self.window
    }

    pub fn candidates(&self) -> Option<&CandidateIndex> {
        self.session.as_ref().map(|s| &s.candidates)
    }

    /// Next candidate the scheduler will consider.
    pub fn cursor(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.next_id)
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn position_source(&self) -> &P {
        &self.position
    }

    pub fn position_source_mut(&mut self) -> &mut P {
        &mut self.position
    }
}

fn place<F: InstanceFactory>(factory: &mut F, kind: PrefabKind, pose: Pose) -> F::Handle {
    let handle = factory.instantiate(kind);
    factory.set_position(&handle, pose.position);
    factory.set_orientation(&handle, pose.rotation);
    handle
}

/// Move the cursor past candidates closer than `spacing` to `anchor`,
/// wrapping to 0 at the end. Always steps at least once and stops on the
/// oldest live group's index.
fn advance_cursor<C: CurveOracle, H>(
    session: &mut Session<C>,
    window: &SpawnWindow<H>,
    spacing: f32,
    anchor: Vec3,
) -> Result<(), InvariantViolation> {
    let oldest = window
        .oldest()
        .ok_or(InvariantViolation::CursorAdvanceBeforeSpawn)?
        .candidate_index();

    loop {
        session.next_id = session.candidates.wrapping_next(session.next_id);
        if session.next_id == oldest {
            break;
        }
        let Some(candidate) = session.candidates.get(session.next_id) else {
            break;
        };
        if session.curve.arc_distance(candidate, anchor) >= spacing {
            break;
        }
    }
    Ok(())
}
