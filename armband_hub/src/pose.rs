//! Pose and wearing-state vocabulary reported by the armband.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Pose
// ════════════════════════════════════════════════════════════════════════════

/// A discrete hand configuration classified by the armband's recognizer.
///
/// `Unknown` and `Rest` are delivered like any other pose but never count
/// as a deliberate user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pose {
    /// The classifier could not identify the hand state.
    Unknown,
    /// Hand relaxed, no gesture in progress.
    Rest,
    Fist,
    WaveIn,
    WaveOut,
    FingersSpread,
}

impl Pose {
    /// True for poses that represent a deliberate user action.
    pub fn is_actionable(self) -> bool {
        !matches!(self, Pose::Unknown | Pose::Rest)
    }

    /// Short lowercase label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            Pose::Unknown       => "unknown",
            Pose::Rest          => "rest",
            Pose::Fist          => "fist",
            Pose::WaveIn        => "wave in",
            Pose::WaveOut       => "wave out",
            Pose::FingersSpread => "fingers spread",
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Arm / XDirection
// ════════════════════════════════════════════════════════════════════════════

/// Which arm the band is on, learned from the sync gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arm {
    Left,
    Right,
}

impl Arm {
    pub fn label(self) -> &'static str {
        match self {
            Arm::Left  => "left",
            Arm::Right => "right",
        }
    }
}

/// Which way the band's x-axis points along the forearm.
///
/// Orientation roll and pitch must be negated when the band is worn
/// toward the elbow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XDirection {
    TowardWrist,
    TowardElbow,
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_and_rest_not_actionable() {
        assert!(!Pose::Unknown.is_actionable());
        assert!(!Pose::Rest.is_actionable());
    }

    #[test]
    fn gesture_poses_actionable() {
        for p in [Pose::Fist, Pose::WaveIn, Pose::WaveOut, Pose::FingersSpread] {
            assert!(p.is_actionable(), "{} should be actionable", p);
        }
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(format!("{}", Pose::WaveIn), "wave in");
        assert_eq!(format!("{}", Pose::FingersSpread), "fingers spread");
    }
}
