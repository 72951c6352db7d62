use chrono::{DateTime, Utc};
use serde::Serialize;

/// Intermediate recipe record produced by a single extractor, before
/// normalization. Field completeness varies by producer: structured data
/// usually fills everything, the heuristic extractor only what it can see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCandidate {
    pub name: String,
    pub description: String,
    /// Raw ingredient lines, document order.
    pub ingredients: Vec<String>,
    /// Raw instruction lines. Order is the cooking order and is preserved
    /// through normalization.
    pub instructions: Vec<String>,
    /// Minutes.
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub total_time: Option<u32>,
    pub servings: Option<u32>,
    /// URL of the primary image, empty when the page exposed none.
    pub image: String,
    pub cuisine: String,
    pub category: String,
    pub calories: Option<u32>,
}

impl RecipeCandidate {
    /// Minimum-content threshold a candidate must meet to stop the cascade.
    /// An extractor that cannot meet it reports no candidate at all so the
    /// next strategy gets its turn.
    pub fn is_usable(&self) -> bool {
        !self.name.is_empty() || self.ingredients.len() >= 2 || self.instructions.len() >= 2
    }
}

/// Canonical recipe, the only shape handed back to the importing caller.
/// Every field has a defined default, all text is cleaned, and `total_time`
/// agrees with `prep_time + cook_time` whenever both are known.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub total_time: Option<u32>,
    pub servings: Option<u32>,
    pub image: String,
    pub cuisine: String,
    pub category: String,
    pub calories: Option<u32>,
    pub source_url: String,
    pub imported_at: DateTime<Utc>,
}
