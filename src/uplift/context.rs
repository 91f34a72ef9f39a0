use rand::RngCore;

use super::notify::Notifier;
use crate::catalog::TemplateCatalog;
use crate::config::UpgradeConfig;
use crate::model::World;

/// Context handed to the orchestrator for one era-advance pass.
///
/// Bundled so engine signatures stay stable as collaborators are added.
pub struct UpliftContext<'a> {
    pub world: &'a mut World,
    /// Read-only after load; masters are never edited in place.
    pub catalog: &'a TemplateCatalog,
    pub config: &'a UpgradeConfig,
    pub rng: &'a mut dyn RngCore,
    /// Fire-and-forget user-facing messages.
    pub notifier: &'a mut dyn Notifier,
}
