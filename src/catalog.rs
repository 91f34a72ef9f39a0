use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::{FactionTemplate, TechTier};

#[derive(Debug)]
pub enum CatalogError {
    DuplicateDefName(String),
    TooManyTemplates(usize),
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateDefName(name) => {
                write!(f, "duplicate template def_name: {name}")
            }
            CatalogError::TooManyTemplates(n) => {
                write!(f, "catalog holds {n} templates, exceeding the index range")
            }
            CatalogError::Parse(e) => write!(f, "failed to parse template catalog: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

/// Read-only store of all known faction templates, loaded once at startup.
///
/// Masters are handed out as `Arc` so many factions can reference the same
/// prototype until their first merge gives them a private copy.
#[derive(Debug)]
pub struct TemplateCatalog {
    templates: Vec<Arc<FactionTemplate>>,
    by_name: HashMap<String, usize>,
}

impl TemplateCatalog {
    /// Build a catalog, assigning each template its internal index.
    pub fn from_templates(templates: Vec<FactionTemplate>) -> Result<Self, CatalogError> {
        if templates.len() > u16::MAX as usize {
            return Err(CatalogError::TooManyTemplates(templates.len()));
        }
        let mut by_name = HashMap::with_capacity(templates.len());
        let mut masters = Vec::with_capacity(templates.len());
        for (i, mut template) in templates.into_iter().enumerate() {
            if by_name.contains_key(&template.def_name) {
                return Err(CatalogError::DuplicateDefName(template.def_name));
            }
            template.index = i as u16;
            by_name.insert(template.def_name.clone(), i);
            masters.push(Arc::new(template));
        }
        Ok(Self {
            templates: masters,
            by_name,
        })
    }

    /// Load a catalog from a JSON array of templates.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let templates: Vec<FactionTemplate> = serde_json::from_str(json)?;
        Self::from_templates(templates)
    }

    pub fn get(&self, def_name: &str) -> Option<&Arc<FactionTemplate>> {
        self.by_name.get(def_name).map(|&i| &self.templates[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<FactionTemplate>> {
        self.templates.iter()
    }

    pub fn at_tier(&self, tier: TechTier) -> impl Iterator<Item = &Arc<FactionTemplate>> {
        self.templates.iter().filter(move |t| t.tech_tier == tier)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
