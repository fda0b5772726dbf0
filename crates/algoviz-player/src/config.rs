//! Player configuration.

use algoviz_core::AlgorithmFamily;
use serde::{Deserialize, Serialize};

use crate::speed::{DelayCurve, Speed};

/// Settings for a [`Player`](crate::Player).
///
/// Deserializes from JSON such as
/// `{"speed": 80, "curve": {"base": 300, "scale": 3, "min": 10, "max": 300}}`.
/// Missing fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Speed used when the caller does not pick one.
    pub speed: Speed,
    /// Overrides the per-family preset for every trace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<DelayCurve>,
}

impl PlayerConfig {
    pub fn curve_for(&self, family: AlgorithmFamily) -> DelayCurve {
        self.curve.unwrap_or_else(|| DelayCurve::for_family(family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config: PlayerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.curve_for(AlgorithmFamily::List), DelayCurve::LIST);
    }

    #[test]
    fn curve_override_applies_to_all_families() {
        let config: PlayerConfig = serde_json::from_str(
            r#"{"speed": 80, "curve": {"base": 300, "scale": 3, "min": 10, "max": 300}}"#,
        )
        .unwrap();
        assert_eq!(config.speed, Speed::new(80));
        let curve = config.curve_for(AlgorithmFamily::Graph);
        assert_eq!(curve, config.curve_for(AlgorithmFamily::Sort));
        assert_eq!(curve.base, 300);
    }
}
