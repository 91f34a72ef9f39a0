use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use super::tier::TechTier;

/// What a pawn group is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Combat,
    Trader,
    Settlement,
    Peaceful,
}

/// The role slot an entry was defined under inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
    Guard,
    Escort,
    Trader,
    Carrier,
}

/// A weighted pawn-kind entry inside one role slot of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawnGenEntry {
    pub kind: String,
    pub weight: f64,
}

impl PawnGenEntry {
    pub fn new(kind: &str, weight: f64) -> Self {
        Self {
            kind: kind.to_string(),
            weight,
        }
    }
}

/// A resolved generation option: the flattened form of a role entry,
/// produced when a group's option pool is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawnGenOption {
    pub kind: String,
    pub weight: f64,
    pub role: GroupRole,
}

/// A named, weighted pool of generation options used to populate raids,
/// guards, and trade caravans.
///
/// The option pool is derived from the role entry lists and memoized in an
/// owned lazy cell: computed on first access via [`options`](Self::options),
/// reset to uncomputed via [`invalidate`](Self::invalidate). Cloning a group
/// deep-copies the entry lists and always starts with a cold cache, so a
/// faction's copy never aliases a catalog master's backing storage.
#[derive(Debug, Serialize, Deserialize)]
pub struct PawnGroupSpec {
    pub name: String,
    pub kind: GroupKind,
    #[serde(default)]
    pub guards: Vec<PawnGenEntry>,
    #[serde(default)]
    pub escorts: Vec<PawnGenEntry>,
    #[serde(default)]
    pub traders: Vec<PawnGenEntry>,
    #[serde(default)]
    pub carriers: Vec<PawnGenEntry>,
    #[serde(skip)]
    cache: OnceCell<Vec<PawnGenOption>>,
}

impl PawnGroupSpec {
    pub fn new(name: &str, kind: GroupKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            guards: Vec::new(),
            escorts: Vec::new(),
            traders: Vec::new(),
            carriers: Vec::new(),
            cache: OnceCell::new(),
        }
    }

    /// The memoized option pool, computed on first access.
    ///
    /// Zero- and negative-weight entries are dropped; options are ordered by
    /// descending weight (ties broken by kind) so generation is deterministic.
    pub fn options(&self) -> &[PawnGenOption] {
        self.cache.get_or_init(|| self.compute_options())
    }

    fn compute_options(&self) -> Vec<PawnGenOption> {
        let roles = [
            (GroupRole::Guard, &self.guards),
            (GroupRole::Escort, &self.escorts),
            (GroupRole::Trader, &self.traders),
            (GroupRole::Carrier, &self.carriers),
        ];
        let mut options: Vec<PawnGenOption> = roles
            .into_iter()
            .flat_map(|(role, entries)| {
                entries.iter().filter(|e| e.weight > 0.0).map(move |e| PawnGenOption {
                    kind: e.kind.clone(),
                    weight: e.weight,
                    role,
                })
            })
            .collect();
        options.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.kind.cmp(&b.kind))
        });
        options
    }

    /// Reset the option pool to uncomputed. Safe to call repeatedly.
    pub fn invalidate(&mut self) {
        self.cache.take();
    }

    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Whether any role entry carries a positive weight.
    pub fn has_viable_entries(&self) -> bool {
        self.guards
            .iter()
            .chain(&self.escorts)
            .chain(&self.traders)
            .chain(&self.carriers)
            .any(|e| e.weight > 0.0)
    }
}

impl Clone for PawnGroupSpec {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            guards: self.guards.clone(),
            escorts: self.escorts.clone(),
            traders: self.traders.clone(),
            carriers: self.carriers.clone(),
            // Copies always start uncomputed.
            cache: OnceCell::new(),
        }
    }
}

/// Immutable-by-convention faction prototype.
///
/// Catalog masters are never edited in place; the merge engine builds a new
/// value and installs it as the faction's private copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionTemplate {
    /// Unique identifier within the catalog.
    pub def_name: String,
    /// Internal catalog index, assigned at load time.
    #[serde(default)]
    pub index: u16,
    pub label: String,
    #[serde(default)]
    pub fixed_name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub tech_tier: TechTier,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub permanently_hostile: bool,
    #[serde(default)]
    pub naturally_hostile: bool,
    #[serde(default = "default_true")]
    pub humanlike: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub is_player: bool,
    /// Baseline goodwill other factions start with toward this one.
    #[serde(default)]
    pub natural_goodwill: i32,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub pawn_groups: Vec<PawnGroupSpec>,
}

fn default_true() -> bool {
    true
}

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl FactionTemplate {
    pub fn new(def_name: &str, label: &str, tech_tier: TechTier) -> Self {
        Self {
            def_name: def_name.to_string(),
            index: 0,
            label: label.to_string(),
            fixed_name: None,
            description: String::new(),
            tech_tier,
            category: None,
            permanently_hostile: false,
            naturally_hostile: false,
            humanlike: true,
            hidden: false,
            is_player: false,
            natural_goodwill: 0,
            color: default_color(),
            icon: String::new(),
            pawn_groups: Vec::new(),
        }
    }

    /// Whether at least one group could actually generate pawns.
    /// Raid and trade generation fails on templates where this is false.
    pub fn has_viable_pawn_groups(&self) -> bool {
        self.pawn_groups.iter().any(|g| g.has_viable_entries())
    }

    pub fn first_viable_group(&self) -> Option<&PawnGroupSpec> {
        self.pawn_groups.iter().find(|g| g.has_viable_entries())
    }
}
