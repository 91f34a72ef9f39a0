use std::sync::Arc;

use rand::Rng;
use rand::RngCore;

use crate::config::{ScoreWeights, UpgradeConfig};
use crate::model::FactionTemplate;

/// Thematic identifier keywords. Only the first shared keyword counts.
const THEME_KEYWORDS: [&str; 9] = [
    "tribal", "tribe", "savage", "raider", "pirate", "outlander", "civil", "imperial", "rough",
];

/// Compatibility between a faction's current template and an upgrade
/// candidate. Zero means incompatible: a permanently hostile faction must
/// never silently become peaceable via upgrade, and vice versa.
pub fn score(original: &FactionTemplate, candidate: &FactionTemplate, weights: &ScoreWeights) -> i32 {
    if original.permanently_hostile != candidate.permanently_hostile {
        return 0;
    }

    let mut total = 0;
    if let (Some(a), Some(b)) = (&original.category, &candidate.category) {
        if a == b {
            total += weights.category;
        }
    }
    if shared_keyword(&original.def_name, &candidate.def_name).is_some() {
        total += weights.keyword;
    }
    if prefix_token(&original.def_name) == prefix_token(&candidate.def_name) {
        total += weights.prefix;
    }
    if original.naturally_hostile == candidate.naturally_hostile {
        total += weights.natural_hostility;
    }
    total
}

fn shared_keyword(a: &str, b: &str) -> Option<&'static str> {
    let a = a.to_ascii_lowercase();
    let b = b.to_ascii_lowercase();
    THEME_KEYWORDS
        .iter()
        .find(|kw| a.contains(**kw) && b.contains(**kw))
        .copied()
}

/// Leading namespace/mod-prefix token of an identifier.
fn prefix_token(def_name: &str) -> &str {
    def_name
        .split(['_', '-'])
        .next()
        .unwrap_or(def_name)
}

/// Pick an upgrade target from `candidates`.
///
/// Without the strict-similarity preference every candidate is equally
/// likely. With it, candidates are ranked by score and one is drawn from the
/// top third (minimum one) of the positively scoring ones, keeping outcomes
/// varied while biasing toward thematic fit. When nothing scores above zero
/// the faction is skipped, unless the configured fallback allows ignoring
/// similarity for an otherwise empty pool.
pub fn select_candidate<'a>(
    original: &FactionTemplate,
    candidates: &[&'a Arc<FactionTemplate>],
    config: &UpgradeConfig,
    rng: &mut dyn RngCore,
) -> Option<&'a Arc<FactionTemplate>> {
    if candidates.is_empty() {
        return None;
    }
    if !config.require_similarity {
        return Some(candidates[rng.random_range(0..candidates.len())]);
    }

    let mut scored: Vec<(i32, &'a Arc<FactionTemplate>)> = candidates
        .iter()
        .map(|c| (score(original, c, &config.weights), *c))
        .collect();
    // Descending by score, def_name tiebreak for determinism.
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.def_name.cmp(&b.1.def_name)));

    if config.debug_logging {
        for (s, c) in &scored {
            tracing::debug!(
                original = %original.def_name,
                candidate = %c.def_name,
                score = s,
                "scored upgrade candidate"
            );
        }
    }

    scored.retain(|(s, _)| *s > 0);
    if scored.is_empty() {
        if config.ignore_similarity_if_empty {
            return Some(candidates[rng.random_range(0..candidates.len())]);
        }
        return None;
    }

    let pool = (scored.len() + 2) / 3;
    let pool = pool.max(1);
    Some(scored[rng.random_range(0..pool)].1)
}
