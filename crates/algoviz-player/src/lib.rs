//! Step playback for recorded traces.
//!
//! [`Playback`] is the synchronous state machine (Idle, Running, Paused) and
//! [`Player`] drives it from a cancellable tokio task, emitting one step per
//! tick at a delay derived from [`Speed`] and the trace's [`DelayCurve`].

pub mod config;
pub mod playback;
pub mod player;
pub mod speed;

pub use config::PlayerConfig;
pub use playback::{Playback, PlaybackState, Tick};
pub use player::{PlaybackObserver, Player, PlayerStatus};
pub use speed::{DelayCurve, Speed};
