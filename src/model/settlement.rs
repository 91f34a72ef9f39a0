use serde::{Deserialize, Serialize};

use super::tier::TechTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeGood {
    pub kind: String,
    pub quantity: u32,
}

/// Goods a settlement currently offers for trade.
///
/// Regenerated eagerly when the owning faction's template changes, since
/// stock is often read before the next natural refresh point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeStock {
    /// The tier the stock was generated for.
    pub tier: TechTier,
    pub goods: Vec<TradeGood>,
}

/// A faction-owned settlement.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub id: u64,
    pub name: String,
    pub faction: u64,
    pub trade_stock: Option<TradeStock>,
}

impl Settlement {
    pub fn new(id: u64, name: &str, faction: u64) -> Self {
        Self {
            id,
            name: name.to_string(),
            faction,
            trade_stock: None,
        }
    }
}
