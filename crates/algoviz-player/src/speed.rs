//! Playback speed and the speed-to-delay curves.
//!
//! A [`Speed`] is a percentage in `1..=100`. Each algorithm family maps it to
//! a tick delay through a linear [`DelayCurve`]; a higher speed never gives a
//! longer delay.

use std::time::Duration;

use algoviz_core::AlgorithmFamily;
use serde::{Deserialize, Serialize};

/// Playback speed, clamped to `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(100);

    /// Out-of-range values are clamped rather than rejected.
    pub fn new(percent: u32) -> Self {
        Speed(percent.clamp(1, 100) as u8)
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(50)
    }
}

impl From<u32> for Speed {
    fn from(percent: u32) -> Self {
        Speed::new(percent)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> Self {
        speed.get()
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ---------------------------------------------------------------------------
// DelayCurve
// ---------------------------------------------------------------------------

/// Linear speed-to-delay mapping, all values in milliseconds:
/// `delay = clamp(base - speed * scale, min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayCurve {
    pub base: u64,
    pub scale: u64,
    pub min: u64,
    pub max: u64,
}

impl DelayCurve {
    /// Sorting and searching.
    pub const ARRAY: DelayCurve = DelayCurve {
        base: 500,
        scale: 5,
        min: 5,
        max: 500,
    };

    pub const LIST: DelayCurve = DelayCurve {
        base: 1000,
        scale: 10,
        min: 200,
        max: 1000,
    };

    pub const GRAPH: DelayCurve = DelayCurve {
        base: 2000,
        scale: 20,
        min: 200,
        max: 2000,
    };

    pub const TREE: DelayCurve = DelayCurve::GRAPH;

    /// The preset used for traces of `family`.
    pub fn for_family(family: AlgorithmFamily) -> Self {
        match family {
            AlgorithmFamily::Sort | AlgorithmFamily::Search => DelayCurve::ARRAY,
            AlgorithmFamily::List => DelayCurve::LIST,
            AlgorithmFamily::Graph => DelayCurve::GRAPH,
            AlgorithmFamily::Tree => DelayCurve::TREE,
        }
    }

    /// Tick delay at `speed`. A misconfigured curve with `min > max` yields
    /// `max`.
    pub fn delay(&self, speed: Speed) -> Duration {
        let raw = self
            .base
            .saturating_sub(u64::from(speed.get()).saturating_mul(self.scale));
        Duration::from_millis(raw.max(self.min).min(self.max))
    }
}
