use faction_uplift::model::TechTier;
use faction_uplift::scenario::Scenario;
use faction_uplift::testutil::{
    assert_skipped, assert_upgraded, certain_config, faction_tier, run_pass,
};
use faction_uplift::uplift::SkipReason;
use faction_uplift::UpgradeConfig;

#[test]
fn zero_chance_never_upgrades_anyone() {
    let mut s = Scenario::new();
    s.template("TribeSavage").tier(TechTier::Basic).category("Tribal");
    s.template("TribeCivil").tier(TechTier::Mid).category("Tribal");
    let a = s.faction("Gravel Tribe", "TribeSavage");
    let b = s.faction("Dust Tribe", "TribeSavage");
    let (mut world, catalog) = s.build();

    let config = UpgradeConfig {
        upgrade_chance: 0.0,
        ..UpgradeConfig::default()
    };
    for seed in 0..20 {
        let report = run_pass(
            &mut world,
            &catalog,
            &config,
            seed,
            TechTier::Basic,
            TechTier::Mid,
        );
        assert_eq!(report.upgraded, 0);
        assert_skipped(&report, a, SkipReason::ChanceRoll);
        assert_skipped(&report, b, SkipReason::ChanceRoll);
    }
    assert_eq!(faction_tier(&world, a), TechTier::Basic);
    assert_eq!(faction_tier(&world, b), TechTier::Basic);
}

#[test]
fn factions_at_old_tier_jump_while_stragglers_step() {
    let mut s = Scenario::new();
    s.template("TribePrimitive").tier(TechTier::Primitive).category("Tribal");
    s.template("TribeSavage").tier(TechTier::Basic).category("Tribal");
    s.template("TribeNeolithic").tier(TechTier::Basic).category("Tribal");
    s.template("TribeCivil").tier(TechTier::Advanced).category("Tribal");
    let behind = s.faction("Moss Tribe", "TribePrimitive");
    let current = s.faction("Gravel Tribe", "TribeSavage");
    let (mut world, catalog) = s.build();

    let report = run_pass(
        &mut world,
        &catalog,
        &certain_config(),
        11,
        TechTier::Basic,
        TechTier::Advanced,
    );

    // At the old era tier: straight to the new one.
    assert_upgraded(&report, current, TechTier::Advanced);
    // One tier behind: climbs a single tier, never skipping ahead.
    assert_upgraded(&report, behind, TechTier::Basic);
    assert_eq!(faction_tier(&world, behind), TechTier::Basic);
}

#[test]
fn stepwise_mode_advances_one_tier_only() {
    let mut s = Scenario::new();
    s.template("TribeSavage").tier(TechTier::Basic).category("Tribal");
    s.template("TribeCivil").tier(TechTier::Mid).category("Tribal");
    s.template("TribeAdvanced").tier(TechTier::Advanced).category("Tribal");
    let faction = s.faction("Gravel Tribe", "TribeSavage");
    let (mut world, catalog) = s.build();

    let config = UpgradeConfig {
        stepwise: true,
        ..certain_config()
    };
    let report = run_pass(
        &mut world,
        &catalog,
        &config,
        3,
        TechTier::Basic,
        TechTier::Advanced,
    );
    assert_upgraded(&report, faction, TechTier::Mid);
    assert_eq!(faction_tier(&world, faction), TechTier::Mid);
}

#[test]
fn no_downgrade_without_flag() {
    let mut s = Scenario::new();
    s.template("OutlanderAdvanced").tier(TechTier::Advanced).category("Outlander");
    s.template("OutlanderCivil").tier(TechTier::Mid).category("Outlander");
    let ahead = s.faction("Forward Union", "OutlanderAdvanced");
    let (mut world, catalog) = s.build();

    let report = run_pass(
        &mut world,
        &catalog,
        &certain_config(),
        5,
        TechTier::Basic,
        TechTier::Mid,
    );
    assert_skipped(&report, ahead, SkipReason::AlreadyAtTier);
    assert_eq!(faction_tier(&world, ahead), TechTier::Advanced);
}

#[test]
fn peak_cap_counts_pre_pass_and_in_pass_factions() {
    let mut s = Scenario::new();
    s.template("SpacerHigh").tier(TechTier::High).category("Spacer");
    s.template("ArchoPeak").tier(TechTier::Peak).category("Spacer");
    let first = s.faction("Star Union", "SpacerHigh");
    let second = s.faction("Void Union", "SpacerHigh");
    let settled = s.faction("Archo Court", "ArchoPeak");
    let (mut world, catalog) = s.build();

    // Cap of 1 is already consumed by the pre-existing Peak faction.
    let config = UpgradeConfig {
        max_peak_factions: 1,
        ..certain_config()
    };
    let report = run_pass(
        &mut world,
        &catalog,
        &config,
        7,
        TechTier::High,
        TechTier::Peak,
    );
    assert_eq!(report.upgraded, 0);
    assert_skipped(&report, first, SkipReason::PeakCapReached);
    assert_skipped(&report, second, SkipReason::PeakCapReached);
    assert_skipped(&report, settled, SkipReason::AlreadyAtTier);

    // Cap of 2 admits exactly one more.
    let config = UpgradeConfig {
        max_peak_factions: 2,
        ..certain_config()
    };
    let report = run_pass(
        &mut world,
        &catalog,
        &config,
        7,
        TechTier::High,
        TechTier::Peak,
    );
    assert_eq!(report.upgraded, 1);
    assert_eq!(world.count_at_tier(TechTier::Peak), 2);
}

#[test]
fn player_faction_untouched_by_default() {
    let setup = faction_uplift::testutil::player_setup();
    let mut world = setup.world;
    let catalog = setup.catalog;

    let player_master = catalog.get("Colony").unwrap().clone();
    assert!(world.factions[&setup.player].shares_template(&player_master));

    let report = run_pass(
        &mut world,
        &catalog,
        &certain_config(),
        13,
        TechTier::Basic,
        TechTier::Mid,
    );

    // Same reference as before the pass, not just equal content.
    assert!(world.factions[&setup.player].shares_template(&player_master));
    assert!(world.factions[&setup.player].is_catalog_backed());
    assert_skipped(&report, setup.player, SkipReason::PlayerFaction);
    assert_upgraded(&report, setup.npc, TechTier::Mid);
}

#[test]
fn player_faction_upgrades_with_override() {
    let setup = faction_uplift::testutil::player_setup();
    let mut world = setup.world;

    // The only Mid template is OutlanderCivil; with the override and lenient
    // similarity the player can take it.
    let config = UpgradeConfig {
        auto_upgrade_player: true,
        require_similarity: false,
        ..certain_config()
    };
    let report = run_pass(
        &mut world,
        &setup.catalog,
        &config,
        17,
        TechTier::Basic,
        TechTier::Mid,
    );
    assert_upgraded(&report, setup.player, TechTier::Mid);
    assert!(!world.factions[&setup.player].is_catalog_backed());
}

#[test]
fn zero_candidates_skips_and_pass_completes() {
    let mut s = Scenario::new();
    s.template("TribeSavage").tier(TechTier::Basic).category("Tribal");
    let faction = s.faction("Gravel Tribe", "TribeSavage");
    let (mut world, catalog) = s.build();

    let report = run_pass(
        &mut world,
        &catalog,
        &certain_config(),
        19,
        TechTier::Basic,
        TechTier::Mid,
    );
    assert_skipped(&report, faction, SkipReason::NoCandidates);
    assert_eq!(report.upgraded, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(faction_tier(&world, faction), TechTier::Basic);
}

#[test]
fn deny_listed_faction_is_skipped() {
    let mut s = Scenario::new();
    s.template("TribeSavage").tier(TechTier::Basic).category("Tribal");
    s.template("TribeCivil").tier(TechTier::Mid).category("Tribal");
    let faction = s.faction("Gravel Tribe", "TribeSavage");
    let (mut world, catalog) = s.build();

    let config = UpgradeConfig {
        deny_list: vec!["TribeSavage".to_string()],
        ..certain_config()
    };
    let report = run_pass(
        &mut world,
        &catalog,
        &config,
        23,
        TechTier::Basic,
        TechTier::Mid,
    );
    assert_skipped(&report, faction, SkipReason::ListExcluded);
}

#[test]
fn max_tiers_behind_leaves_stragglers_alone() {
    let mut s = Scenario::new();
    s.template("TribePrimitive").tier(TechTier::Primitive).category("Tribal");
    s.template("TribeSavage").tier(TechTier::Basic).category("Tribal");
    let straggler = s.faction("Moss Tribe", "TribePrimitive");
    let (mut world, catalog) = s.build();

    let config = UpgradeConfig {
        max_tiers_behind: Some(2),
        ..certain_config()
    };
    // Primitive is 4 behind High.
    let report = run_pass(
        &mut world,
        &catalog,
        &config,
        29,
        TechTier::Advanced,
        TechTier::High,
    );
    assert_skipped(&report, straggler, SkipReason::TooFarBehind);
}

#[test]
fn successful_upgrade_notifies_with_faction_name() {
    let setup = faction_uplift::testutil::tribal_setup();
    let mut world = setup.world;
    let mut orchestrator = faction_uplift::UpliftOrchestrator::new();
    let (report, messages) = faction_uplift::testutil::run_pass_with(
        &mut orchestrator,
        &mut world,
        &setup.catalog,
        &certain_config(),
        31,
        TechTier::Basic,
        TechTier::Mid,
    );
    assert_eq!(report.upgraded, 1);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Gravel Tribe"));
    assert!(messages[0].contains("mid"));
    assert_eq!(
        orchestrator.last_upgraded().get(&setup.faction),
        Some(&TechTier::Mid)
    );
}
