use crate::fields::clean_text;
use crate::model::{Recipe, RecipeCandidate};
use chrono::Utc;

/// Name given to a recipe whose candidate lost its name during cleaning.
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// Post-process the winning candidate into the canonical shape: clean every
/// text field, drop entries the cleaning emptied, fill defaults, derive
/// `total_time` from `prep + cook` when the page omitted it, and stamp
/// provenance.
pub fn normalize(candidate: RecipeCandidate, source_url: &str) -> Recipe {
    let mut name = clean_text(&candidate.name);
    if name.is_empty() {
        name = UNTITLED_RECIPE.to_string();
    }

    let total_time = candidate.total_time.or(match (candidate.prep_time, candidate.cook_time) {
        (Some(prep), Some(cook)) => Some(prep + cook),
        _ => None,
    });

    Recipe {
        name,
        description: clean_text(&candidate.description),
        ingredients: clean_lines(&candidate.ingredients),
        instructions: clean_lines(&candidate.instructions),
        prep_time: candidate.prep_time,
        cook_time: candidate.cook_time,
        total_time,
        servings: candidate.servings,
        image: candidate.image.trim().to_string(),
        cuisine: clean_text(&candidate.cuisine),
        category: clean_text(&candidate.category),
        calories: candidate.calories,
        source_url: source_url.to_string(),
        imported_at: Utc::now(),
    }
}

fn clean_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| clean_text(line))
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> RecipeCandidate {
        RecipeCandidate {
            name: "  Lemon   <b>Cod</b> ".to_string(),
            description: "Bright and\nsimple.".to_string(),
            ingredients: vec!["2 cod fillets".to_string(), "  ".to_string(), "1 lemon".to_string()],
            instructions: vec!["Season the  cod.".to_string(), "Roast.".to_string()],
            prep_time: Some(10),
            cook_time: Some(15),
            ..Default::default()
        }
    }

    #[test]
    fn test_cleaning_and_defaults() {
        let recipe = normalize(candidate(), "https://example.com/cod");

        assert_eq!(recipe.name, "Lemon Cod");
        assert_eq!(recipe.description, "Bright and simple.");
        assert_eq!(recipe.ingredients, vec!["2 cod fillets", "1 lemon"]);
        assert_eq!(recipe.instructions, vec!["Season the cod.", "Roast."]);
        assert_eq!(recipe.image, "");
        assert_eq!(recipe.cuisine, "");
        assert_eq!(recipe.servings, None);
        assert_eq!(recipe.source_url, "https://example.com/cod");
    }

    #[test]
    fn test_total_time_derived_from_prep_and_cook() {
        let recipe = normalize(candidate(), "https://example.com/cod");
        assert_eq!(recipe.total_time, Some(25));
    }

    #[test]
    fn test_candidate_total_time_wins() {
        let mut c = candidate();
        c.total_time = Some(40);
        let recipe = normalize(c, "https://example.com/cod");
        assert_eq!(recipe.total_time, Some(40));
    }

    #[test]
    fn test_total_time_absent_when_one_side_missing() {
        let mut c = candidate();
        c.cook_time = None;
        let recipe = normalize(c, "https://example.com/cod");
        assert_eq!(recipe.total_time, None);
    }

    #[test]
    fn test_empty_name_gets_placeholder() {
        let mut c = candidate();
        c.name = "   ".to_string();
        let recipe = normalize(c, "https://example.com/cod");
        assert_eq!(recipe.name, UNTITLED_RECIPE);
    }

    #[test]
    fn test_normalize_is_idempotent_modulo_timestamp() {
        let first = normalize(candidate(), "https://example.com/cod");
        let second = normalize(candidate(), "https://example.com/cod");

        assert_eq!(first.name, second.name);
        assert_eq!(first.description, second.description);
        assert_eq!(first.ingredients, second.ingredients);
        assert_eq!(first.instructions, second.instructions);
        assert_eq!(first.total_time, second.total_time);
        assert_eq!(first.source_url, second.source_url);
    }
}
