use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::uplift::EraAdvanceReport;

/// Flush an era-advance report to the given output directory.
///
/// Creates the directory if it does not exist. Writes 2 files:
/// - `outcomes.jsonl` — one per-faction outcome per line
/// - `summary.json` — tiers and counters for the whole pass
pub fn flush_report_jsonl(report: &EraAdvanceReport, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut outcomes = BufWriter::new(File::create(output_dir.join("outcomes.jsonl"))?);
    for outcome in &report.outcomes {
        serde_json::to_writer(&mut outcomes, outcome)?;
        outcomes.write_all(b"\n")?;
    }
    outcomes.flush()?;

    let summary = serde_json::json!({
        "old_tier": report.old_tier,
        "new_tier": report.new_tier,
        "upgraded": report.upgraded,
        "skipped": report.skipped,
        "failed": report.failed,
    });
    let mut writer = BufWriter::new(File::create(output_dir.join("summary.json"))?);
    serde_json::to_writer_pretty(&mut writer, &summary)?;
    writer.flush()
}
