use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::caches;
use super::context::UpliftContext;
use super::eligibility::{self, SkipReason};
use super::merge::{self, PreserveSet};
use super::scoring;
use crate::model::TechTier;

/// What happened to one faction during an era-advance pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeOutcome {
    Upgraded {
        faction_id: u64,
        from: TechTier,
        to: TechTier,
        /// The candidate template the upgrade content came from.
        template: String,
    },
    Skipped {
        faction_id: u64,
        reason: SkipReason,
    },
    Failed {
        faction_id: u64,
        reason: String,
    },
}

/// Summary of a single era-advance pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraAdvanceReport {
    pub old_tier: TechTier,
    pub new_tier: TechTier,
    pub outcomes: Vec<UpgradeOutcome>,
    pub upgraded: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl EraAdvanceReport {
    pub fn empty(old_tier: TechTier, new_tier: TechTier) -> Self {
        Self {
            old_tier,
            new_tier,
            outcomes: Vec::new(),
            upgraded: 0,
            skipped: 0,
            failed: 0,
        }
    }

    fn record(&mut self, outcome: UpgradeOutcome) {
        match &outcome {
            UpgradeOutcome::Upgraded { .. } => self.upgraded += 1,
            UpgradeOutcome::Skipped { .. } => self.skipped += 1,
            UpgradeOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn outcome_for(&self, faction_id: u64) -> Option<&UpgradeOutcome> {
        self.outcomes.iter().find(|o| match o {
            UpgradeOutcome::Upgraded { faction_id: id, .. }
            | UpgradeOutcome::Skipped { faction_id: id, .. }
            | UpgradeOutcome::Failed { faction_id: id, .. } => *id == faction_id,
        })
    }

    pub fn upgraded_ids(&self) -> Vec<u64> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                UpgradeOutcome::Upgraded { faction_id, .. } => Some(*faction_id),
                _ => None,
            })
            .collect()
    }
}

/// The tier a faction should aim for this pass, or `None` when it has
/// nothing to gain.
///
/// In stepwise mode every faction climbs exactly one tier. Otherwise
/// factions sitting at the old era tier jump straight to the new one, while
/// stragglers still climb a single tier, so one era event never lets a
/// far-behind faction skip multiple tiers.
fn target_tier(
    current: TechTier,
    old_tier: TechTier,
    new_tier: TechTier,
    stepwise: bool,
) -> Option<TechTier> {
    if current >= new_tier {
        return None;
    }
    if stepwise || current != old_tier {
        current.next()
    } else {
        Some(new_tier)
    }
}

/// Top-level driver for faction tech progression.
///
/// One call to [`era_advanced`](Self::era_advanced) runs one full pass over
/// the faction registry. Passes are not reentrant; a pass signalled while
/// another is mid-flight is rejected with an empty report.
#[derive(Debug, Default)]
pub struct UpliftOrchestrator {
    in_progress: bool,
    /// Tier reached per faction, for reporting. Pruned after each pass.
    last_upgraded: HashMap<u64, TechTier>,
}

impl UpliftOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_upgraded(&self) -> &HashMap<u64, TechTier> {
        &self.last_upgraded
    }

    /// Handle a world era-advance event: the world tech tier changed from
    /// `old_tier` to `new_tier`.
    pub fn era_advanced(
        &mut self,
        ctx: &mut UpliftContext,
        old_tier: TechTier,
        new_tier: TechTier,
    ) -> EraAdvanceReport {
        let mut report = EraAdvanceReport::empty(old_tier, new_tier);

        if self.in_progress {
            tracing::warn!(%old_tier, %new_tier, "era-advance pass already running, ignoring");
            return report;
        }
        if !ctx.world.is_ready() {
            tracing::warn!("faction registry not initialized, aborting era-advance pass");
            return report;
        }
        self.in_progress = true;
        ctx.world.era_tier = new_tier;

        let faction_ids: Vec<u64> = ctx.world.factions.keys().copied().collect();
        for id in faction_ids {
            let outcome = self.process_faction(ctx, id, old_tier, new_tier);
            match &outcome {
                UpgradeOutcome::Upgraded {
                    from, to, template, ..
                } => {
                    tracing::info!(faction_id = id, %from, %to, %template, "faction upgraded");
                }
                UpgradeOutcome::Skipped { reason, .. } => {
                    tracing::info!(faction_id = id, %reason, "faction skipped");
                }
                UpgradeOutcome::Failed { reason, .. } => {
                    tracing::warn!(faction_id = id, %reason, "faction upgrade failed");
                }
            }
            report.record(outcome);
        }

        // Drop bookkeeping for factions that left the registry.
        self.last_upgraded
            .retain(|id, _| ctx.world.factions.contains_key(id));

        self.in_progress = false;
        tracing::info!(
            %old_tier,
            %new_tier,
            upgraded = report.upgraded,
            skipped = report.skipped,
            failed = report.failed,
            "era-advance pass complete"
        );
        report
    }

    fn process_faction(
        &mut self,
        ctx: &mut UpliftContext,
        id: u64,
        old_tier: TechTier,
        new_tier: TechTier,
    ) -> UpgradeOutcome {
        let skip = |reason| UpgradeOutcome::Skipped {
            faction_id: id,
            reason,
        };
        let gone = || UpgradeOutcome::Failed {
            faction_id: id,
            reason: "faction left the registry mid-pass".to_string(),
        };

        let Some(faction) = ctx.world.factions.get(&id) else {
            return gone();
        };
        let current = faction.tier();

        let Some(target) = target_tier(current, old_tier, new_tier, ctx.config.stepwise) else {
            return skip(SkipReason::AlreadyAtTier);
        };
        if let Err(reason) = eligibility::check_faction(
            faction,
            target,
            new_tier,
            ctx.world.player_faction,
            ctx.config,
        ) {
            return skip(reason);
        }

        // Probabilistic gating, not an error.
        if ctx.rng.random_range(0.0..1.0) >= ctx.config.upgrade_chance {
            return skip(SkipReason::ChanceRoll);
        }

        // Cap counts factions already at the top tier, including ones
        // upgraded earlier in this same pass.
        if target.is_peak()
            && ctx.world.count_at_tier(TechTier::Peak) as u32 >= ctx.config.max_peak_factions
        {
            return skip(SkipReason::PeakCapReached);
        }

        let candidates = eligibility::candidate_templates(ctx.catalog, target, ctx.config);
        if candidates.is_empty() {
            return skip(SkipReason::NoCandidates);
        }

        let Some(faction) = ctx.world.factions.get(&id) else {
            return gone();
        };
        let Some(chosen) =
            scoring::select_candidate(faction.template(), &candidates, ctx.config, ctx.rng)
        else {
            return skip(SkipReason::NoCompatibleCandidate);
        };

        let preserve = PreserveSet::from_config(&ctx.config.preserve);
        let merged = match merge::merge_templates(faction.template(), chosen, &preserve) {
            Ok(merged) => merged,
            Err(e) => {
                return UpgradeOutcome::Failed {
                    faction_id: id,
                    reason: e.to_string(),
                };
            }
        };

        let chosen_name = chosen.def_name.clone();
        let chosen_label = chosen.label.clone();
        let new_name = (!ctx.config.preserve.name)
            .then(|| merged.fixed_name.clone())
            .flatten();

        let Some(faction) = ctx.world.factions.get_mut(&id) else {
            return gone();
        };
        if let Some(name) = new_name {
            faction.name = name;
        }
        faction.install_template(merged);
        let faction_name = faction.name.clone();

        caches::invalidate_faction(ctx.world, id, ctx.rng);
        self.last_upgraded.insert(id, target);

        if ctx.config.notify_upgrades {
            ctx.notifier.notify(&format!(
                "{faction_name} has advanced from {current} to {target} ({chosen_label})"
            ));
        }

        UpgradeOutcome::Upgraded {
            faction_id: id,
            from: current,
            to: target,
            template: chosen_name,
        }
    }
}
