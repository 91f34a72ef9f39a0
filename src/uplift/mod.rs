mod caches;
mod context;
mod eligibility;
mod merge;
mod notify;
mod orchestrator;
mod scoring;

pub use caches::{generate_trade_stock, invalidate_faction};
pub use context::UpliftContext;
pub use eligibility::{SkipReason, candidate_templates, check_faction, template_allowed};
pub use merge::{MergeError, PreserveSet, merge_templates};
pub use notify::{LogNotifier, Notifier};
pub use orchestrator::{EraAdvanceReport, UpgradeOutcome, UpliftOrchestrator};
pub use scoring::{score, select_candidate};
