use std::time::Duration;

use super::constants::{
    EARTH_ROTATION_MS, INITIAL_HOLD_MS, MANUAL_STAGE_FALLBACK_MS, MARKER_HOLD_MS,
};

/// Discrete phases of the intro animation, in the order they run.
/// The clock only ever moves forward; each stage is visited at most
/// once per page session.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnimationStage {
    Initial = 0,
    EarthRotation = 1,
    ZoomToTarget = 2,
    TargetMarkerShown = 3,
    MainContent = 4,
}

impl AnimationStage {
    pub const ALL: [AnimationStage; 5] = [
        AnimationStage::Initial,
        AnimationStage::EarthRotation,
        AnimationStage::ZoomToTarget,
        AnimationStage::TargetMarkerShown,
        AnimationStage::MainContent,
    ];

    pub fn next(self) -> Option<AnimationStage> {
        match self {
            AnimationStage::Initial => Some(AnimationStage::EarthRotation),
            AnimationStage::EarthRotation => Some(AnimationStage::ZoomToTarget),
            AnimationStage::ZoomToTarget => Some(AnimationStage::TargetMarkerShown),
            AnimationStage::TargetMarkerShown => Some(AnimationStage::MainContent),
            AnimationStage::MainContent => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

/// How a stage moves to its successor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progression {
    /// Auto-advance once the elapsed time reaches the duration.
    Timed(Duration),
    /// Advance only on an explicit `advance()` from the choreographer.
    /// The fallback is a watchdog: if the completion signal is lost the
    /// stage still advances, so the intro can never freeze short of the
    /// terminal stage.
    Manual { fallback: Duration },
    Terminal,
}

/// Per-stage durations. Durations are `Duration`s, so a negative
/// configuration is unrepresentable.
#[derive(Clone, Copy, Debug)]
pub struct StageSchedule {
    pub initial: Duration,
    pub earth_rotation: Duration,
    pub marker_hold: Duration,
    pub manual_fallback: Duration,
}

impl Default for StageSchedule {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(INITIAL_HOLD_MS),
            earth_rotation: Duration::from_millis(EARTH_ROTATION_MS),
            marker_hold: Duration::from_millis(MARKER_HOLD_MS),
            manual_fallback: Duration::from_millis(MANUAL_STAGE_FALLBACK_MS),
        }
    }
}

impl StageSchedule {
    pub fn progression(&self, stage: AnimationStage) -> Progression {
        match stage {
            AnimationStage::Initial => Progression::Timed(self.initial),
            AnimationStage::EarthRotation => Progression::Timed(self.earth_rotation),
            AnimationStage::ZoomToTarget => Progression::Manual {
                fallback: self.manual_fallback,
            },
            AnimationStage::TargetMarkerShown => Progression::Timed(self.marker_hold),
            AnimationStage::MainContent => Progression::Terminal,
        }
    }
}

/// The stage state machine. Owns all intro timing; there are no host
/// timers behind it, only accumulated frame deltas, so dropping the
/// clock cancels everything that was pending.
#[derive(Clone, Debug)]
pub struct StageClock {
    schedule: StageSchedule,
    stage: AnimationStage,
    elapsed: Duration,
    progress: f32,
}

impl StageClock {
    pub fn new(schedule: StageSchedule) -> Self {
        Self {
            schedule,
            stage: AnimationStage::Initial,
            elapsed: Duration::ZERO,
            progress: 0.0,
        }
    }

    pub fn stage(&self) -> AnimationStage {
        self.stage
    }

    /// Fraction of the current stage's duration that has elapsed, in
    /// [0, 1]. Stays 0 for manually progressed and terminal stages.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Move to the next stage. Silent no-op at the terminal stage.
    pub fn advance(&mut self) -> bool {
        match self.stage.next() {
            Some(next) => {
                self.enter(next);
                true
            }
            None => false,
        }
    }

    /// Jump forward to a specific stage (skip-intro). Requests that do
    /// not move forward are ignored, preserving the forward-only
    /// invariant.
    pub fn go_to(&mut self, target: AnimationStage) -> bool {
        if target > self.stage {
            self.enter(target);
            true
        } else {
            false
        }
    }

    /// Accumulate a frame delta. Returns the newly entered stage if this
    /// tick crossed a timed duration (or a manual stage's watchdog).
    pub fn tick(&mut self, dt: Duration) -> Option<AnimationStage> {
        match self.schedule.progression(self.stage) {
            Progression::Timed(duration) => {
                self.elapsed += dt;
                if self.elapsed >= duration {
                    self.advance();
                    Some(self.stage)
                } else {
                    self.progress = if duration.is_zero() {
                        1.0
                    } else {
                        (self.elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
                    };
                    None
                }
            }
            Progression::Manual { fallback } => {
                self.elapsed += dt;
                if self.elapsed >= fallback {
                    self.advance();
                    Some(self.stage)
                } else {
                    None
                }
            }
            Progression::Terminal => None,
        }
    }

    fn enter(&mut self, stage: AnimationStage) {
        self.stage = stage;
        self.elapsed = Duration::ZERO;
        self.progress = 0.0;
    }
}
