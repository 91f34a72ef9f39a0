use std::sync::Arc;

use super::template::FactionTemplate;
use super::tier::TechTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Ally,
    Neutral,
    Hostile,
}

/// A diplomatic relation record toward another faction.
#[derive(Debug, Clone, PartialEq)]
pub struct FactionRelation {
    pub other: u64,
    pub goodwill: i32,
    pub kind: RelationKind,
}

impl FactionRelation {
    pub fn new(other: u64, goodwill: i32) -> Self {
        let kind = if goodwill <= -40 {
            RelationKind::Hostile
        } else if goodwill >= 40 {
            RelationKind::Ally
        } else {
            RelationKind::Neutral
        };
        Self {
            other,
            goodwill,
            kind,
        }
    }
}

/// A faction's effective-template pointer.
///
/// Before any merge the faction references a shared catalog master, also
/// referenced by every other faction still on that template. After its first
/// merge the faction exclusively owns a private copy.
#[derive(Debug, Clone)]
pub enum TemplateSlot {
    Shared(Arc<FactionTemplate>),
    Owned(Box<FactionTemplate>),
}

/// A live world faction. Identity (id, name, relations) survives template
/// swaps; tier is always derived from the effective template.
#[derive(Debug, Clone)]
pub struct Faction {
    pub id: u64,
    pub name: String,
    pub relations: Vec<FactionRelation>,
    pub template: TemplateSlot,
    /// Derived combat pawn kinds, rebuilt lazily from guard/escort entries.
    pub fighter_cache: Option<Vec<String>>,
}

impl Faction {
    pub fn new(id: u64, name: &str, template: Arc<FactionTemplate>) -> Self {
        Self {
            id,
            name: name.to_string(),
            relations: Vec::new(),
            template: TemplateSlot::Shared(template),
            fighter_cache: None,
        }
    }

    /// Read access through either slot variant.
    pub fn template(&self) -> &FactionTemplate {
        match &self.template {
            TemplateSlot::Shared(t) => t,
            TemplateSlot::Owned(t) => t,
        }
    }

    /// Mutable access to the private copy; `None` while still catalog-backed.
    pub fn owned_template_mut(&mut self) -> Option<&mut FactionTemplate> {
        match &mut self.template {
            TemplateSlot::Shared(_) => None,
            TemplateSlot::Owned(t) => Some(t),
        }
    }

    /// Swap the slot to a private copy carrying the merged content.
    pub fn install_template(&mut self, template: FactionTemplate) {
        self.template = TemplateSlot::Owned(Box::new(template));
    }

    pub fn tier(&self) -> TechTier {
        self.template().tech_tier
    }

    pub fn is_catalog_backed(&self) -> bool {
        matches!(self.template, TemplateSlot::Shared(_))
    }

    /// Whether this faction still points at the given catalog master.
    pub fn shares_template(&self, master: &Arc<FactionTemplate>) -> bool {
        match &self.template {
            TemplateSlot::Shared(t) => Arc::ptr_eq(t, master),
            TemplateSlot::Owned(_) => false,
        }
    }

    /// The derived fighter pool: guard and escort pawn kinds with positive
    /// weight, deduplicated, computed on first access.
    pub fn fighters(&mut self) -> &[String] {
        if self.fighter_cache.is_none() {
            let mut kinds: Vec<String> = Vec::new();
            for group in &self.template().pawn_groups {
                for entry in group.guards.iter().chain(&group.escorts) {
                    if entry.weight > 0.0 && !kinds.contains(&entry.kind) {
                        kinds.push(entry.kind.clone());
                    }
                }
            }
            self.fighter_cache = Some(kinds);
        }
        self.fighter_cache.as_deref().unwrap_or_default()
    }

    /// Set or replace the relation toward `other`.
    pub fn set_relation(&mut self, other: u64, goodwill: i32) {
        self.relations.retain(|r| r.other != other);
        self.relations.push(FactionRelation::new(other, goodwill));
    }

    pub fn relation_with(&self, other: u64) -> Option<&FactionRelation> {
        self.relations.iter().find(|r| r.other == other)
    }
}
