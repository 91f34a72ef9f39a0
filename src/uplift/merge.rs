use std::fmt;

use crate::config::PreserveConfig;
use crate::model::FactionTemplate;

/// Why a merge was rejected. The caller leaves the faction's template slot
/// untouched on any of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Identity fields missing after the merge (empty def name).
    MissingIdentity,
    /// The candidate cannot generate pawns; installing it would break raid
    /// and trade generation downstream.
    NoViablePawnGroups,
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::MissingIdentity => write!(f, "merged template has no identity"),
            MergeError::NoViablePawnGroups => {
                write!(f, "merged template has no viable pawn groups")
            }
        }
    }
}

impl std::error::Error for MergeError {}

/// Which original fields win over the candidate's values. Identity fields
/// (def name, internal index) are always preserved regardless of caller
/// preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreserveSet {
    pub label: bool,
    pub description: bool,
    pub goodwill: bool,
    pub theme: bool,
}

impl PreserveSet {
    pub fn from_config(config: &PreserveConfig) -> Self {
        Self {
            label: config.name,
            description: config.description,
            goodwill: config.goodwill,
            theme: config.theme,
        }
    }
}

/// Snapshot of preserved fields, captured before the field copy and restored
/// after it so preserved values win over the candidate's.
struct PreservedSnapshot {
    def_name: String,
    index: u16,
    label: Option<String>,
    fixed_name: Option<Option<String>>,
    description: Option<String>,
    natural_goodwill: Option<i32>,
    color: Option<[f32; 3]>,
    icon: Option<String>,
}

impl PreservedSnapshot {
    fn capture(original: &FactionTemplate, preserve: &PreserveSet) -> Self {
        Self {
            def_name: original.def_name.clone(),
            index: original.index,
            label: preserve.label.then(|| original.label.clone()),
            fixed_name: preserve.label.then(|| original.fixed_name.clone()),
            description: preserve.description.then(|| original.description.clone()),
            natural_goodwill: preserve.goodwill.then_some(original.natural_goodwill),
            color: preserve.theme.then_some(original.color),
            icon: preserve.theme.then(|| original.icon.clone()),
        }
    }

    fn restore(self, target: &mut FactionTemplate) {
        target.def_name = self.def_name;
        target.index = self.index;
        if let Some(label) = self.label {
            target.label = label;
        }
        if let Some(fixed_name) = self.fixed_name {
            target.fixed_name = fixed_name;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(goodwill) = self.natural_goodwill {
            target.natural_goodwill = goodwill;
        }
        if let Some(color) = self.color {
            target.color = color;
        }
        if let Some(icon) = self.icon {
            target.icon = icon;
        }
    }
}

/// Copy every template field from `src` onto `dst`, explicitly enumerated.
///
/// Destructuring `src` makes this exhaustive: adding a field to
/// `FactionTemplate` without copying it here is a compile error. Pawn groups
/// are rebuilt through `PawnGroupSpec::clone`, which deep-copies the nested
/// entry lists and leaves the option caches cold, so the faction's copy and
/// the catalog candidate never alias the same backing storage.
fn copy_template_fields(dst: &mut FactionTemplate, src: &FactionTemplate) {
    let FactionTemplate {
        def_name,
        index,
        label,
        fixed_name,
        description,
        tech_tier,
        category,
        permanently_hostile,
        naturally_hostile,
        humanlike,
        hidden,
        is_player,
        natural_goodwill,
        color,
        icon,
        pawn_groups,
    } = src;

    dst.def_name = def_name.clone();
    dst.index = *index;
    dst.label = label.clone();
    dst.fixed_name = fixed_name.clone();
    dst.description = description.clone();
    dst.tech_tier = *tech_tier;
    dst.category = category.clone();
    dst.permanently_hostile = *permanently_hostile;
    dst.naturally_hostile = *naturally_hostile;
    dst.humanlike = *humanlike;
    dst.hidden = *hidden;
    dst.is_player = *is_player;
    dst.natural_goodwill = *natural_goodwill;
    dst.color = *color;
    dst.icon = icon.clone();
    dst.pawn_groups = pawn_groups.to_vec();
}

/// Build the faction's post-upgrade template: the candidate's tier-defining
/// content with the preserved original fields restored on top.
///
/// Performed strictly in order: snapshot, field copy, restore, validate. On
/// `Err` nothing has been installed anywhere; the caller keeps the faction's
/// current template pointer.
pub fn merge_templates(
    original: &FactionTemplate,
    candidate: &FactionTemplate,
    preserve: &PreserveSet,
) -> Result<FactionTemplate, MergeError> {
    let snapshot = PreservedSnapshot::capture(original, preserve);

    let mut merged = original.clone();
    copy_template_fields(&mut merged, candidate);
    snapshot.restore(&mut merged);

    if merged.def_name.is_empty() {
        return Err(MergeError::MissingIdentity);
    }
    if !merged.has_viable_pawn_groups() {
        return Err(MergeError::NoViablePawnGroups);
    }
    Ok(merged)
}
