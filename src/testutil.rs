use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::TemplateCatalog;
use crate::config::UpgradeConfig;
use crate::model::{TechTier, World};
use crate::scenario::Scenario;
use crate::uplift::{
    EraAdvanceReport, Notifier, SkipReason, UpgradeOutcome, UpliftContext, UpliftOrchestrator,
};

// ---------------------------------------------------------------------------
// Pass execution helpers
// ---------------------------------------------------------------------------

/// Notifier that records every message for assertions.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    pub messages: Vec<String>,
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Run a single era-advance pass with a fresh orchestrator and a seeded RNG.
/// Returns the report.
pub fn run_pass(
    world: &mut World,
    catalog: &TemplateCatalog,
    config: &UpgradeConfig,
    seed: u64,
    old_tier: TechTier,
    new_tier: TechTier,
) -> EraAdvanceReport {
    let mut orchestrator = UpliftOrchestrator::new();
    run_pass_with(&mut orchestrator, world, catalog, config, seed, old_tier, new_tier).0
}

/// Run a pass with a caller-owned orchestrator. Returns the report and the
/// messages the notifier collected.
pub fn run_pass_with(
    orchestrator: &mut UpliftOrchestrator,
    world: &mut World,
    catalog: &TemplateCatalog,
    config: &UpgradeConfig,
    seed: u64,
    old_tier: TechTier,
    new_tier: TechTier,
) -> (EraAdvanceReport, Vec<String>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut notifier = CollectingNotifier::default();
    let mut ctx = UpliftContext {
        world,
        catalog,
        config,
        rng: &mut rng,
        notifier: &mut notifier,
    };
    let report = orchestrator.era_advanced(&mut ctx, old_tier, new_tier);
    (report, notifier.messages)
}

/// Config that removes probabilistic gating so passes are exhaustive.
pub fn certain_config() -> UpgradeConfig {
    UpgradeConfig {
        upgrade_chance: 1.0,
        ..UpgradeConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Canned scenarios
// ---------------------------------------------------------------------------

pub struct TribalSetup {
    pub world: World,
    pub catalog: TemplateCatalog,
    pub faction: u64,
}

/// One Basic-tier tribal faction with a settlement, one compatible Mid-tier
/// candidate (`TribeCivil`) and one permanently hostile Mid-tier candidate
/// (`PirateWaster`).
pub fn tribal_setup() -> TribalSetup {
    let mut s = Scenario::new();
    s.template("TribeSavage")
        .tier(TechTier::Basic)
        .category("Tribal")
        .fixed_name("The Gravel Teeth");
    s.template("TribeCivil")
        .tier(TechTier::Mid)
        .category("Tribal")
        .label("civil tribe");
    s.template("PirateWaster")
        .tier(TechTier::Mid)
        .permanently_hostile(true)
        .naturally_hostile(true);
    let faction = s.faction("Gravel Tribe", "TribeSavage");
    s.settlement("Gravel Camp", faction);
    let (world, catalog) = s.build();
    TribalSetup {
        world,
        catalog,
        faction,
    }
}

pub struct PlayerSetup {
    pub world: World,
    pub catalog: TemplateCatalog,
    pub player: u64,
    pub npc: u64,
}

/// A player colony plus one upgradeable NPC faction, with a Mid-tier
/// candidate available for both templates.
pub fn player_setup() -> PlayerSetup {
    let mut s = Scenario::new();
    s.template("Colony").tier(TechTier::Basic).category("Settler");
    s.template("OutlanderRough")
        .tier(TechTier::Basic)
        .category("Outlander");
    s.template("OutlanderCivil")
        .tier(TechTier::Mid)
        .category("Outlander");
    let player = s.faction("New Arrivals", "Colony");
    s.make_player(player);
    let npc = s.faction("Rough Union", "OutlanderRough");
    let (world, catalog) = s.build();
    PlayerSetup {
        world,
        catalog,
        player,
        npc,
    }
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

pub fn assert_upgraded(report: &EraAdvanceReport, faction_id: u64, to: TechTier) {
    match report.outcome_for(faction_id) {
        Some(UpgradeOutcome::Upgraded { to: tier, .. }) if *tier == to => {}
        other => panic!("expected faction {faction_id} upgraded to {to}, got {other:?}"),
    }
}

pub fn assert_skipped(report: &EraAdvanceReport, faction_id: u64, reason: SkipReason) {
    match report.outcome_for(faction_id) {
        Some(UpgradeOutcome::Skipped { reason: r, .. }) if *r == reason => {}
        other => panic!("expected faction {faction_id} skipped ({reason}), got {other:?}"),
    }
}

pub fn faction_tier(world: &World, faction_id: u64) -> TechTier {
    world.factions[&faction_id].tier()
}
