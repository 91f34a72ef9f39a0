use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::TemplateCatalog;
use crate::config::UpgradeConfig;
use crate::model::{Faction, FactionTemplate, TechTier};

/// Why a faction was passed over during an era-advance pass. Not an error;
/// every variant is a normal outcome that gets logged and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    PlayerFaction,
    NotHumanlike,
    HiddenTemplate,
    ListExcluded,
    AlreadyAtTier,
    TooFarBehind,
    ChanceRoll,
    PeakCapReached,
    NoCandidates,
    NoCompatibleCandidate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::PlayerFaction => "player faction",
            SkipReason::NotHumanlike => "template is not humanlike",
            SkipReason::HiddenTemplate => "template is hidden",
            SkipReason::ListExcluded => "excluded by allow/deny list",
            SkipReason::AlreadyAtTier => "already at or above target tier",
            SkipReason::TooFarBehind => "too many tiers behind the era",
            SkipReason::ChanceRoll => "lost the upgrade chance roll",
            SkipReason::PeakCapReached => "peak-tier faction cap reached",
            SkipReason::NoCandidates => "no candidate templates at target tier",
            SkipReason::NoCompatibleCandidate => "no compatible candidate template",
        };
        f.write_str(s)
    }
}

/// Allow list, when non-empty, is the only gate; otherwise the deny list
/// blocks.
fn list_allowed(def_name: &str, config: &UpgradeConfig) -> bool {
    if !config.allow_list.is_empty() {
        return config.allow_list.iter().any(|n| n == def_name);
    }
    !config.deny_list.iter().any(|n| n == def_name)
}

/// Whether `faction` may be considered for an upgrade to `target_tier`.
/// Pure; no side effects.
pub fn check_faction(
    faction: &Faction,
    target_tier: TechTier,
    era_tier: TechTier,
    player_faction: Option<u64>,
    config: &UpgradeConfig,
) -> Result<(), SkipReason> {
    if player_faction == Some(faction.id) && !config.auto_upgrade_player {
        return Err(SkipReason::PlayerFaction);
    }
    let template = faction.template();
    if !template.humanlike {
        return Err(SkipReason::NotHumanlike);
    }
    if template.hidden {
        return Err(SkipReason::HiddenTemplate);
    }
    if !list_allowed(&template.def_name, config) {
        return Err(SkipReason::ListExcluded);
    }
    if faction.tier() >= target_tier && !config.allow_downgrades {
        return Err(SkipReason::AlreadyAtTier);
    }
    if let Some(limit) = config.max_tiers_behind {
        if faction.tier().steps_behind(era_tier) > limit {
            return Err(SkipReason::TooFarBehind);
        }
    }
    Ok(())
}

/// Template-side eligibility for upgrade candidates.
pub fn template_allowed(template: &FactionTemplate, config: &UpgradeConfig) -> bool {
    template.humanlike
        && !template.hidden
        && !template.is_player
        && list_allowed(&template.def_name, config)
}

/// All catalog templates usable as upgrade targets at `tier`.
pub fn candidate_templates<'a>(
    catalog: &'a TemplateCatalog,
    tier: TechTier,
    config: &UpgradeConfig,
) -> Vec<&'a Arc<FactionTemplate>> {
    catalog
        .at_tier(tier)
        .filter(|t| template_allowed(t, config))
        .collect()
}
