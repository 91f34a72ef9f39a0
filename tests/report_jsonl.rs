use std::fs;

use faction_uplift::model::TechTier;
use faction_uplift::report::flush_report_jsonl;
use faction_uplift::testutil::{certain_config, run_pass, tribal_setup};
use faction_uplift::uplift::UpgradeOutcome;

#[test]
fn report_round_trips_through_jsonl() {
    let setup = tribal_setup();
    let mut world = setup.world;
    let report = run_pass(
        &mut world,
        &setup.catalog,
        &certain_config(),
        21,
        TechTier::Basic,
        TechTier::Mid,
    );

    let dir = tempfile::tempdir().unwrap();
    flush_report_jsonl(&report, dir.path()).unwrap();

    let outcomes = fs::read_to_string(dir.path().join("outcomes.jsonl")).unwrap();
    let parsed: Vec<UpgradeOutcome> = outcomes
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(parsed.len(), report.outcomes.len());
    assert!(matches!(
        parsed[0],
        UpgradeOutcome::Upgraded {
            faction_id,
            from: TechTier::Basic,
            to: TechTier::Mid,
            ..
        } if faction_id == setup.faction
    ));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["old_tier"], "basic");
    assert_eq!(summary["new_tier"], "mid");
    assert_eq!(summary["upgraded"], 1);
    assert_eq!(summary["skipped"], 0);
    assert_eq!(summary["failed"], 0);
}

#[test]
fn flush_creates_missing_output_dir() {
    let setup = tribal_setup();
    let mut world = setup.world;
    let report = run_pass(
        &mut world,
        &setup.catalog,
        &certain_config(),
        22,
        TechTier::Basic,
        TechTier::Mid,
    );

    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("reports").join("era_3");
    flush_report_jsonl(&report, &nested).unwrap();
    assert!(nested.join("outcomes.jsonl").is_file());
    assert!(nested.join("summary.json").is_file());
}
