pub mod faction;
pub mod settlement;
pub mod template;
pub mod tier;
pub mod world;

pub use faction::{Faction, FactionRelation, RelationKind, TemplateSlot};
pub use settlement::{Settlement, TradeGood, TradeStock};
pub use template::{FactionTemplate, GroupKind, GroupRole, PawnGenEntry, PawnGenOption, PawnGroupSpec};
pub use tier::TechTier;
pub use world::World;
