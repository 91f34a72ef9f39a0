use std::collections::BTreeMap;
use std::sync::Arc;

use super::faction::Faction;
use super::settlement::Settlement;
use super::template::FactionTemplate;
use super::tier::TechTier;

/// The live world registry: factions, their settlements, and the global era
/// tier. `BTreeMap` keeps enumeration order stable across runs.
///
/// Factions and settlements draw ids from one counter, so an id identifies
/// at most one entity of either kind and settlement ownership links can
/// never collide with faction ids.
#[derive(Debug)]
pub struct World {
    pub factions: BTreeMap<u64, Faction>,
    pub settlements: BTreeMap<u64, Settlement>,
    pub player_faction: Option<u64>,
    pub era_tier: TechTier,
    next_id: u64,
    initialized: bool,
}

impl World {
    pub fn new() -> Self {
        Self {
            factions: BTreeMap::new(),
            settlements: BTreeMap::new(),
            player_faction: None,
            era_tier: TechTier::Primitive,
            next_id: 1,
            initialized: true,
        }
    }

    /// A world whose faction registry has not been set up yet. Era passes
    /// against it abort without touching anything.
    pub fn uninitialized() -> Self {
        Self {
            initialized: false,
            ..Self::new()
        }
    }

    pub fn is_ready(&self) -> bool {
        self.initialized
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_faction(&mut self, name: &str, template: Arc<FactionTemplate>) -> u64 {
        let id = self.allocate_id();
        self.factions.insert(id, Faction::new(id, name, template));
        id
    }

    pub fn add_settlement(&mut self, name: &str, faction: u64) -> u64 {
        let id = self.allocate_id();
        self.settlements
            .insert(id, Settlement::new(id, name, faction));
        id
    }

    /// Remove a faction and every settlement it owns.
    pub fn remove_faction(&mut self, faction_id: u64) {
        self.factions.remove(&faction_id);
        self.settlements.retain(|_, s| s.faction != faction_id);
    }

    pub fn set_player(&mut self, faction_id: u64) {
        self.player_faction = Some(faction_id);
    }

    pub fn faction_settlement_ids(&self, faction_id: u64) -> Vec<u64> {
        self.settlements
            .values()
            .filter(|s| s.faction == faction_id)
            .map(|s| s.id)
            .collect()
    }

    pub fn count_at_tier(&self, tier: TechTier) -> usize {
        self.factions.values().filter(|f| f.tier() == tier).count()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master(tier: TechTier) -> Arc<FactionTemplate> {
        Arc::new(FactionTemplate::new("TribeSavage", "savage tribe", tier))
    }

    #[test]
    fn new_world_is_ready_and_empty() {
        let world = World::new();
        assert!(world.is_ready());
        assert!(world.factions.is_empty());
        assert!(world.player_faction.is_none());
    }

    #[test]
    fn uninitialized_world_is_not_ready() {
        assert!(!World::uninitialized().is_ready());
    }

    #[test]
    fn ids_unique_across_factions_and_settlements() {
        let mut world = World::new();
        let a = world.add_faction("A", master(TechTier::Basic));
        let camp = world.add_settlement("A Camp", a);
        let b = world.add_faction("B", master(TechTier::Basic));
        let town = world.add_settlement("B Town", b);

        let mut ids = vec![a, camp, b, town];
        ids.dedup();
        assert_eq!(ids, [1, 2, 3, 4]);
        assert!(!world.factions.contains_key(&camp));
        assert!(!world.settlements.contains_key(&b));
    }

    #[test]
    fn remove_faction_drops_its_settlements() {
        let mut world = World::new();
        let a = world.add_faction("A", master(TechTier::Basic));
        let b = world.add_faction("B", master(TechTier::Basic));
        world.add_settlement("A Camp", a);
        world.add_settlement("A Fort", a);
        let b_town = world.add_settlement("B Town", b);

        world.remove_faction(a);
        assert!(!world.factions.contains_key(&a));
        assert!(world.faction_settlement_ids(a).is_empty());
        assert_eq!(world.faction_settlement_ids(b), vec![b_town]);
    }

    #[test]
    fn count_at_tier_reads_effective_templates() {
        let mut world = World::new();
        world.add_faction("A", master(TechTier::Basic));
        world.add_faction("B", master(TechTier::Peak));
        world.add_faction("C", master(TechTier::Peak));
        assert_eq!(world.count_at_tier(TechTier::Peak), 2);
        assert_eq!(world.count_at_tier(TechTier::Mid), 0);
    }
}
