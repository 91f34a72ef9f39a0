use serde::{Deserialize, Serialize};

/// Which original template attributes survive a merge, beyond the identity
/// fields (def name, internal index) that are always preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreserveConfig {
    /// Keep the faction's display name and the template label/fixed name.
    pub name: bool,
    pub description: bool,
    /// Keep diplomatic-relation parameters (natural goodwill).
    pub goodwill: bool,
    /// Keep color and icon.
    pub theme: bool,
}

impl Default for PreserveConfig {
    fn default() -> Self {
        Self {
            name: true,
            description: false,
            goodwill: true,
            theme: true,
        }
    }
}

/// Additive compatibility-score weights. Only the hostility hard gate is
/// load-bearing; these just bias selection toward thematic fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub category: i32,
    pub keyword: i32,
    pub prefix: i32,
    pub natural_hostility: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category: 30,
            keyword: 20,
            prefix: 10,
            natural_hostility: 5,
        }
    }
}

/// Tunable upgrade policy. Persisted by the host settings screen; every
/// field has a default so partial settings files load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Per-faction probability of upgrading on an era advance, in [0, 1].
    pub upgrade_chance: f64,
    /// Cap on factions at the top tier, counting ones already there.
    pub max_peak_factions: u32,
    /// Advance exactly one tier per era event instead of jumping to the era.
    pub stepwise: bool,
    pub allow_downgrades: bool,
    pub auto_upgrade_player: bool,
    /// Skip factions lagging more than this many tiers behind the era.
    pub max_tiers_behind: Option<u8>,
    /// Require a positive compatibility score before installing a candidate.
    pub require_similarity: bool,
    /// With strict similarity, fall back to any candidate when none scores
    /// above zero instead of skipping the faction.
    pub ignore_similarity_if_empty: bool,
    pub notify_upgrades: bool,
    pub debug_logging: bool,
    /// When non-empty, only these template def names may be used.
    pub allow_list: Vec<String>,
    /// Blocks templates unless an allow list is in force.
    pub deny_list: Vec<String>,
    pub preserve: PreserveConfig,
    pub weights: ScoreWeights,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            upgrade_chance: 0.75,
            max_peak_factions: 1,
            stepwise: false,
            allow_downgrades: false,
            auto_upgrade_player: false,
            max_tiers_behind: None,
            require_similarity: true,
            ignore_similarity_if_empty: false,
            notify_upgrades: true,
            debug_logging: false,
            allow_list: Vec::new(),
            deny_list: Vec::new(),
            preserve: PreserveConfig::default(),
            weights: ScoreWeights::default(),
        }
    }
}

impl UpgradeConfig {
    /// Clamp out-of-range values. The store is otherwise trusted; no
    /// cross-field validation happens here.
    pub fn validated(mut self) -> Self {
        self.upgrade_chance = self.upgrade_chance.clamp(0.0, 1.0);
        self
    }
}
