//! The playback state machine, free of timers and tasks.
//!
//! [`Playback`] owns a loaded trace and the index of the next step to emit.
//! Each [`Playback::tick`] hands out one step; the scheduling around it lives
//! in [`Player`](crate::Player).
//!
//! ```text
//!            start            pause
//!   Idle ───────────▶ Running ─────▶ Paused
//!    ▲                 │   ▲           │
//!    │    complete     │   └─ resume ──┘
//!    └─────────────────┘
//!    reset returns to Idle from every state
//! ```

use algoviz_core::{Step, Trace};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Running => "running",
            PlaybackState::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Result of advancing a playback by one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// The step at this index was emitted and the index advanced.
    Step(usize, Step),
    /// The trace is exhausted; the playback is Idle again.
    Complete,
    /// Nothing is running.
    Idle,
}

/// Trace, position and state of one playback.
#[derive(Debug, Clone)]
pub struct Playback {
    trace: Option<Trace>,
    index: usize,
    state: PlaybackState,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    pub fn new() -> Self {
        Playback {
            trace: None,
            index: 0,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the next step to emit.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Number of steps in the loaded trace, zero when none is loaded.
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the loaded trace and rewinds to Idle at index 0.
    pub fn load(&mut self, trace: Trace) {
        self.trace = Some(trace);
        self.index = 0;
        self.state = PlaybackState::Idle;
    }

    /// Idle with a trace loaded: run from index 0. Paused: continue from the
    /// current index. Returns whether the state changed.
    pub fn start(&mut self) -> bool {
        match self.state {
            PlaybackState::Idle if self.trace.is_some() => {
                self.index = 0;
                self.state = PlaybackState::Running;
                true
            }
            PlaybackState::Paused => {
                self.state = PlaybackState::Running;
                true
            }
            _ => false,
        }
    }

    /// Running to Paused, keeping the position.
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Paused;
            true
        } else {
            false
        }
    }

    /// Paused to Running.
    pub fn resume(&mut self) -> bool {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Running;
            true
        } else {
            false
        }
    }

    /// Discards the trace and returns to Idle.
    pub fn reset(&mut self) {
        self.trace = None;
        self.index = 0;
        self.state = PlaybackState::Idle;
    }

    pub fn tick(&mut self) -> Tick {
        if self.state != PlaybackState::Running {
            return Tick::Idle;
        }
        match self.trace.as_ref().and_then(|trace| trace.get(self.index)) {
            Some(step) => {
                let tick = Tick::Step(self.index, step.clone());
                self.index += 1;
                tick
            }
            None => {
                self.state = PlaybackState::Idle;
                Tick::Complete
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{Algorithm, ArrayMetrics, ArrayState, SortAlgorithm, StepState};

    fn trace(len: usize) -> Trace {
        let steps = (0..len)
            .map(|i| Step {
                state: StepState::Array(ArrayState::new(vec![i as i64])),
                message: format!("step {i}"),
                metrics: ArrayMetrics::default().into(),
            })
            .collect();
        Trace::new(Algorithm::Sort(SortAlgorithm::Bubble), steps)
    }

    fn drain(playback: &mut Playback) -> Vec<usize> {
        let mut seen = Vec::new();
        while let Tick::Step(index, _) = playback.tick() {
            seen.push(index);
        }
        seen
    }

    #[test]
    fn runs_to_completion_then_idles() {
        let mut playback = Playback::new();
        playback.load(trace(3));
        assert!(playback.start());
        assert_eq!(drain(&mut playback), vec![0, 1, 2]);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.tick(), Tick::Idle);
    }

    #[test]
    fn complete_is_reported_once() {
        let mut playback = Playback::new();
        playback.load(trace(1));
        playback.start();
        assert!(matches!(playback.tick(), Tick::Step(0, _)));
        assert_eq!(playback.tick(), Tick::Complete);
        assert_eq!(playback.tick(), Tick::Idle);
    }

    #[test]
    fn pause_keeps_position() {
        let mut playback = Playback::new();
        playback.load(trace(4));
        playback.start();
        playback.tick();
        playback.tick();
        assert!(playback.pause());
        assert_eq!(playback.tick(), Tick::Idle);
        assert_eq!(playback.index(), 2);

        assert!(playback.start());
        assert_eq!(drain(&mut playback), vec![2, 3]);
    }

    #[test]
    fn start_after_completion_replays() {
        let mut playback = Playback::new();
        playback.load(trace(2));
        playback.start();
        drain(&mut playback);
        assert!(playback.start());
        assert_eq!(drain(&mut playback), vec![0, 1]);
    }

    #[test]
    fn idle_operations_are_noops() {
        let mut playback = Playback::new();
        assert!(!playback.start());
        assert!(!playback.pause());
        assert!(!playback.resume());
        playback.reset();
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(playback.is_empty());
    }

    #[test]
    fn reset_discards_trace() {
        let mut playback = Playback::new();
        playback.load(trace(3));
        playback.start();
        playback.tick();
        playback.reset();
        assert!(playback.trace().is_none());
        assert_eq!(playback.index(), 0);
        assert!(!playback.start());
    }

    #[test]
    fn empty_trace_completes_immediately() {
        let mut playback = Playback::new();
        playback.load(trace(0));
        playback.start();
        assert_eq!(playback.tick(), Tick::Complete);
    }
}
