//! Timer-driven playback of a trace.
//!
//! A [`Player`] wraps a [`Playback`] in a mutex and drives it from a single
//! tokio task that ticks, notifies the [`PlaybackObserver`], then sleeps for
//! the current delay. There is at most one task handle at a time. Every
//! cancel bumps a generation counter, and a task that finds its generation
//! outdated exits without touching the playback.
//!
//! Observer callbacks run outside the state lock, so an observer may call
//! [`Player::pause`] or [`Player::reset`] from inside `on_step`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use algoviz_core::{Step, Trace};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::config::PlayerConfig;
use crate::playback::{Playback, PlaybackState, Tick};
use crate::speed::Speed;

/// Receives emitted steps.
///
/// `on_step` is called once per index in increasing order, `on_complete`
/// once when the trace is exhausted. Both run on a tokio worker and should
/// return quickly.
pub trait PlaybackObserver: Send + Sync + 'static {
    fn on_step(&self, index: usize, step: &Step);

    fn on_complete(&self) {}
}

/// Point-in-time view of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerStatus {
    pub state: PlaybackState,
    /// Index of the next step to emit.
    pub index: usize,
    pub len: usize,
    pub speed: Speed,
}

struct Inner {
    playback: Playback,
    task: Option<JoinHandle<()>>,
    generation: u64,
    speed: Speed,
}

impl Inner {
    /// Aborts the pending tick task, if any, and invalidates its generation.
    fn cancel(&mut self) {
        self.generation += 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct Shared {
    inner: Mutex<Inner>,
    /// Held from tick through notification so callbacks from a cancelled
    /// task cannot interleave with those of its successor.
    emit: Mutex<()>,
    observer: Arc<dyn PlaybackObserver>,
    config: PlayerConfig,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn delay(&self, inner: &Inner) -> Duration {
        let curve = match inner.playback.trace() {
            Some(trace) => self.config.curve_for(trace.family()),
            None => return Duration::ZERO,
        };
        curve.delay(inner.speed)
    }
}

/// Replays traces to an observer at a controllable speed.
///
/// Cloning yields another handle to the same player. Methods that spawn the
/// tick task must be called from within a tokio runtime.
#[derive(Clone)]
pub struct Player {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player").field("status", &self.status()).finish()
    }
}

impl Player {
    pub fn new(observer: Arc<dyn PlaybackObserver>) -> Self {
        Self::with_config(observer, PlayerConfig::default())
    }

    pub fn with_config(observer: Arc<dyn PlaybackObserver>, config: PlayerConfig) -> Self {
        Player {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    playback: Playback::new(),
                    task: None,
                    generation: 0,
                    speed: config.speed,
                }),
                emit: Mutex::new(()),
                observer,
                config,
            }),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.shared.config
    }

    /// Plays `trace` from index 0 at `speed`.
    ///
    /// When the player is Paused on an equal trace, playback continues from
    /// the paused position instead. Any other trace replaces the current one,
    /// cancelling a running playback first.
    pub fn start(&self, trace: Trace, speed: Speed) {
        let mut inner = self.shared.lock();
        inner.speed = speed;

        let same_trace = inner.playback.trace() == Some(&trace);
        if inner.playback.state() == PlaybackState::Paused && same_trace {
            inner.playback.resume();
            tracing::debug!(index = inner.playback.index(), "playback resumed");
        } else {
            inner.cancel();
            inner.playback.load(trace);
            inner.playback.start();
            tracing::debug!(
                len = inner.playback.len(),
                speed = %speed,
                "playback started"
            );
        }
        self.spawn(&mut inner);
    }

    /// Continues a paused playback. No-op in any other state.
    pub fn resume(&self) {
        let mut inner = self.shared.lock();
        if inner.playback.resume() {
            tracing::debug!(index = inner.playback.index(), "playback resumed");
            self.spawn(&mut inner);
        }
    }

    /// Stops ticking and keeps the position. No-op unless Running.
    pub fn pause(&self) {
        let mut inner = self.shared.lock();
        if inner.playback.pause() {
            inner.cancel();
            tracing::debug!(index = inner.playback.index(), "playback paused");
        }
    }

    /// Cancels any pending tick, discards the trace and returns to Idle.
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        inner.cancel();
        if inner.playback.trace().is_some() {
            tracing::debug!("playback reset");
        }
        inner.playback.reset();
    }

    /// Takes effect from the next scheduled tick.
    pub fn set_speed(&self, speed: Speed) {
        self.shared.lock().speed = speed;
    }

    pub fn status(&self) -> PlayerStatus {
        let inner = self.shared.lock();
        PlayerStatus {
            state: inner.playback.state(),
            index: inner.playback.index(),
            len: inner.playback.len(),
            speed: inner.speed,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status().state == PlaybackState::Idle
    }

    fn spawn(&self, inner: &mut Inner) {
        inner.cancel();
        let generation = inner.generation;
        let shared = Arc::clone(&self.shared);
        inner.task = Some(tokio::spawn(run(shared, generation)));
    }
}

// ---------------------------------------------------------------------------
// Tick task
// ---------------------------------------------------------------------------

async fn run(shared: Arc<Shared>, generation: u64) {
    loop {
        let delay = {
            let _emit = shared.emit.lock().unwrap_or_else(PoisonError::into_inner);
            let (tick, delay) = {
                let mut inner = shared.lock();
                if inner.generation != generation {
                    return;
                }
                let tick = inner.playback.tick();
                if !matches!(tick, Tick::Step(..)) {
                    inner.task = None;
                }
                (tick, shared.delay(&inner))
            };

            match tick {
                Tick::Step(index, step) => shared.observer.on_step(index, &step),
                Tick::Complete => {
                    tracing::info!("playback complete");
                    shared.observer.on_complete();
                    return;
                }
                Tick::Idle => return,
            }
            delay
        };
        tokio::time::sleep(delay).await;
    }
}
