use std::sync::Arc;

use crate::catalog::TemplateCatalog;
use crate::model::{FactionTemplate, GroupKind, PawnGenEntry, PawnGroupSpec, TechTier, World};

// -- Builder-style ref types --

/// Typed reference to a template under construction in a [`Scenario`],
/// enabling chained field mutation. The chain ends when the ref is dropped
/// (or via [`.def_name()`](TemplateRef::def_name) to extract the id).
pub struct TemplateRef<'a> {
    scenario: &'a mut Scenario,
    index: usize,
}

impl<'a> TemplateRef<'a> {
    fn template_mut(&mut self) -> &mut FactionTemplate {
        &mut self.scenario.templates[self.index]
    }

    pub fn tier(mut self, v: TechTier) -> Self { self.template_mut().tech_tier = v; self }
    pub fn label(mut self, v: &str) -> Self { self.template_mut().label = v.to_string(); self }
    pub fn fixed_name(mut self, v: &str) -> Self { self.template_mut().fixed_name = Some(v.to_string()); self }
    pub fn description(mut self, v: &str) -> Self { self.template_mut().description = v.to_string(); self }
    pub fn category(mut self, v: &str) -> Self { self.template_mut().category = Some(v.to_string()); self }
    pub fn permanently_hostile(mut self, v: bool) -> Self { self.template_mut().permanently_hostile = v; self }
    pub fn naturally_hostile(mut self, v: bool) -> Self { self.template_mut().naturally_hostile = v; self }
    pub fn humanlike(mut self, v: bool) -> Self { self.template_mut().humanlike = v; self }
    pub fn hidden(mut self, v: bool) -> Self { self.template_mut().hidden = v; self }
    pub fn player(mut self, v: bool) -> Self { self.template_mut().is_player = v; self }
    pub fn goodwill(mut self, v: i32) -> Self { self.template_mut().natural_goodwill = v; self }
    pub fn color(mut self, v: [f32; 3]) -> Self { self.template_mut().color = v; self }
    pub fn icon(mut self, v: &str) -> Self { self.template_mut().icon = v.to_string(); self }

    /// Add a guard entry to the template's first pawn group.
    pub fn guard(mut self, kind: &str, weight: f64) -> Self {
        self.template_mut().pawn_groups[0].guards.push(PawnGenEntry::new(kind, weight));
        self
    }

    /// Add a trader entry to the template's first pawn group.
    pub fn trader(mut self, kind: &str, weight: f64) -> Self {
        self.template_mut().pawn_groups[0].traders.push(PawnGenEntry::new(kind, weight));
        self
    }

    /// Drop all pawn groups, producing a template that violates the
    /// viable-generation invariant. For failure-path tests.
    pub fn no_pawn_groups(mut self) -> Self {
        self.template_mut().pawn_groups.clear();
        self
    }

    /// Escape hatch: apply an arbitrary closure to the template.
    pub fn with(mut self, f: impl FnOnce(&mut FactionTemplate)) -> Self { f(self.template_mut()); self }

    /// Terminate the chain and return the def name.
    pub fn def_name(self) -> String { self.scenario.templates[self.index].def_name.clone() }
}

struct FactionSpec {
    name: String,
    template: String,
    player: bool,
    relations: Vec<(u64, i32)>,
}

/// Builder for test worlds and catalogs.
///
/// Templates come with one default "base" pawn group (a weighted guard and
/// trader) so the viable-generation invariant holds unless a test opts out.
pub struct Scenario {
    templates: Vec<FactionTemplate>,
    factions: Vec<FactionSpec>,
    settlements: Vec<(String, usize)>,
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
            factions: Vec::new(),
            settlements: Vec::new(),
        }
    }

    /// Register a template and return a builder ref for it.
    pub fn template(&mut self, def_name: &str) -> TemplateRef<'_> {
        let mut template = FactionTemplate::new(def_name, def_name, TechTier::Basic);
        let mut group = PawnGroupSpec::new("base", GroupKind::Settlement);
        group.guards.push(PawnGenEntry::new("grunt", 10.0));
        group.traders.push(PawnGenEntry::new("peddler", 5.0));
        template.pawn_groups.push(group);
        self.templates.push(template);
        let index = self.templates.len() - 1;
        TemplateRef {
            scenario: self,
            index,
        }
    }

    /// Register a faction on a previously registered template. Returns the
    /// faction id it will have in the built world (ids are assigned in
    /// registration order, settlements after factions).
    pub fn faction(&mut self, name: &str, template_def: &str) -> u64 {
        self.factions.push(FactionSpec {
            name: name.to_string(),
            template: template_def.to_string(),
            player: false,
            relations: Vec::new(),
        });
        self.factions.len() as u64
    }

    pub fn make_player(&mut self, faction: u64) {
        self.factions[(faction - 1) as usize].player = true;
    }

    pub fn relate(&mut self, faction: u64, other: u64, goodwill: i32) {
        self.factions[(faction - 1) as usize]
            .relations
            .push((other, goodwill));
    }

    pub fn settlement(&mut self, name: &str, faction: u64) {
        self.settlements
            .push((name.to_string(), (faction - 1) as usize));
    }

    /// Build the world and catalog. Panics on inconsistent setup (unknown
    /// template names, duplicate defs) — this is test support code.
    pub fn build(self) -> (World, TemplateCatalog) {
        let catalog = TemplateCatalog::from_templates(self.templates)
            .unwrap_or_else(|e| panic!("scenario catalog invalid: {e}"));
        let mut world = World::new();

        let mut ids = Vec::with_capacity(self.factions.len());
        for spec in &self.factions {
            let master = catalog
                .get(&spec.template)
                .unwrap_or_else(|| panic!("scenario: unknown template {}", spec.template))
                .clone();
            ids.push(world.add_faction(&spec.name, master));
        }
        for (spec, &id) in self.factions.iter().zip(&ids) {
            if spec.player {
                world.set_player(id);
            }
            for &(other, goodwill) in &spec.relations {
                let other_id = ids[(other - 1) as usize];
                if let Some(faction) = world.factions.get_mut(&id) {
                    faction.set_relation(other_id, goodwill);
                }
                if let Some(faction) = world.factions.get_mut(&other_id) {
                    faction.set_relation(id, goodwill);
                }
            }
        }
        for (name, faction_index) in &self.settlements {
            world.add_settlement(name, ids[*faction_index]);
        }

        (world, catalog)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_world_with_shared_masters() {
        let mut s = Scenario::new();
        s.template("TribeSavage").tier(TechTier::Basic).category("Tribal");
        let a = s.faction("Gravel Tribe", "TribeSavage");
        let b = s.faction("Dust Tribe", "TribeSavage");
        s.settlement("Gravel Camp", a);
        s.relate(a, b, -60);
        let (world, catalog) = s.build();

        let master = catalog.get("TribeSavage").unwrap();
        assert!(world.factions[&a].shares_template(master));
        assert!(world.factions[&b].shares_template(master));
        assert_eq!(world.faction_settlement_ids(a).len(), 1);
        assert_eq!(world.factions[&b].relation_with(a).unwrap().goodwill, -60);
    }

    #[test]
    fn default_templates_satisfy_generation_invariant() {
        let mut s = Scenario::new();
        s.template("TribeSavage");
        let (_, catalog) = s.build();
        assert!(catalog.get("TribeSavage").unwrap().has_viable_pawn_groups());
    }

    #[test]
    fn player_flag_set() {
        let mut s = Scenario::new();
        s.template("Colony").player(true);
        let p = s.faction("New Arrivals", "Colony");
        s.make_player(p);
        let (world, _) = s.build();
        assert_eq!(world.player_faction, Some(p));
    }
}
