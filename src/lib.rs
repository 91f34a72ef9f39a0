pub mod catalog;
pub mod config;
pub mod model;
pub mod report;
pub mod scenario;
pub mod testutil;
pub mod uplift;

pub use catalog::{CatalogError, TemplateCatalog};
pub use config::{PreserveConfig, ScoreWeights, UpgradeConfig};
pub use model::{
    Faction, FactionTemplate, PawnGenEntry, PawnGenOption, PawnGroupSpec, Settlement, TechTier,
    TemplateSlot, World,
};
pub use uplift::{
    EraAdvanceReport, MergeError, Notifier, SkipReason, UpgradeOutcome, UpliftContext,
    UpliftOrchestrator,
};
