use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered technology tier ladder.
///
/// Derived `Ord` follows declaration order, so `<` compares tiers directly
/// and `tiers.iter().max()` yields the most advanced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechTier {
    Primitive,
    Basic,
    Mid,
    Advanced,
    High,
    Peak,
}

impl TechTier {
    pub const ALL: [TechTier; 6] = [
        TechTier::Primitive,
        TechTier::Basic,
        TechTier::Mid,
        TechTier::Advanced,
        TechTier::High,
        TechTier::Peak,
    ];

    /// The tier directly above this one, or `None` at the top of the ladder.
    pub fn next(self) -> Option<TechTier> {
        match self {
            TechTier::Primitive => Some(TechTier::Basic),
            TechTier::Basic => Some(TechTier::Mid),
            TechTier::Mid => Some(TechTier::Advanced),
            TechTier::Advanced => Some(TechTier::High),
            TechTier::High => Some(TechTier::Peak),
            TechTier::Peak => None,
        }
    }

    /// How many tiers this one lags behind `era` (0 if at or above it).
    pub fn steps_behind(self, era: TechTier) -> u8 {
        (era as u8).saturating_sub(self as u8)
    }

    pub fn is_peak(self) -> bool {
        self == TechTier::Peak
    }
}

impl fmt::Display for TechTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TechTier::Primitive => "primitive",
            TechTier::Basic => "basic",
            TechTier::Mid => "mid",
            TechTier::Advanced => "advanced",
            TechTier::High => "high",
            TechTier::Peak => "peak",
        };
        f.write_str(s)
    }
}
