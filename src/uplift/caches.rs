use rand::Rng;
use rand::RngCore;

use crate::model::{TechTier, TradeGood, TradeStock, World};

/// Goods available per tier. Regenerated stock always carries silver plus
/// the tier's entries.
const TIER_GOODS: [(TechTier, &[&str]); 6] = [
    (TechTier::Primitive, &["pelts", "wooden_clubs"]),
    (TechTier::Basic, &["pemmican", "bows", "herbal_medicine"]),
    (TechTier::Mid, &["cloth", "revolvers", "penoxycyline"]),
    (TechTier::Advanced, &["components", "assault_rifles", "medicine"]),
    (TechTier::High, &["advanced_components", "charge_rifles", "glitterworld_medicine"]),
    (TechTier::Peak, &["archotech_parts", "persona_weapons", "healer_serum"]),
];

/// Tier-appropriate trade stock, drawn fresh from the goods table.
pub fn generate_trade_stock(tier: TechTier, rng: &mut dyn RngCore) -> TradeStock {
    let mut goods = vec![TradeGood {
        kind: "silver".to_string(),
        quantity: rng.random_range(200..800),
    }];
    if let Some((_, kinds)) = TIER_GOODS.iter().find(|(t, _)| *t == tier) {
        for kind in *kinds {
            goods.push(TradeGood {
                kind: kind.to_string(),
                quantity: rng.random_range(5..40),
            });
        }
    }
    TradeStock { tier, goods }
}

/// Clear every memoized structure derived from the faction's template and
/// regenerate trade stock for its settlements.
///
/// Pawn-group option pools and the fighter cache are merely reset and
/// recomputed lazily on next access; trade stock is rebuilt eagerly because
/// it is often read before the next natural refresh point. Idempotent, and
/// tolerant of factions that no longer exist.
pub fn invalidate_faction(world: &mut World, faction_id: u64, rng: &mut dyn RngCore) {
    let Some(faction) = world.factions.get_mut(&faction_id) else {
        return;
    };

    if let Some(template) = faction.owned_template_mut() {
        for group in &mut template.pawn_groups {
            group.invalidate();
        }
    }
    faction.fighter_cache = None;
    let tier = faction.tier();

    for settlement_id in world.faction_settlement_ids(faction_id) {
        if let Some(settlement) = world.settlements.get_mut(&settlement_id) {
            settlement.trade_stock = Some(generate_trade_stock(tier, rng));
        }
    }
}
