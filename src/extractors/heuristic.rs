use crate::extractors::{Extractor, ParsingContext};
use crate::fields::{clean_text, looks_like_ingredient};
use crate::model::RecipeCandidate;
use log::debug;
use scraper::{Html, Selector};
use std::ops::RangeInclusive;

/// Pattern-matches generic list and heading structure on pages with no
/// schema annotations at all.
pub struct HeuristicExtractor;

/// Accepted character length for an unordered-list item to count as an
/// ingredient. Empirically tuned; adjust here, not at call sites.
const INGREDIENT_LEN: RangeInclusive<usize> = 4..=199;
/// Accepted character length for an ordered-list item to count as an
/// instruction step. Ordered-list membership is treated as sufficient
/// evidence on its own, so there is no content filter.
const INSTRUCTION_LEN: RangeInclusive<usize> = 11..=999;
/// Either list must reach this many items for the page to count as a recipe.
const MIN_LIST_ITEMS: usize = 2;

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
        .filter(|content| !content.is_empty())
}

fn page_title(document: &Html) -> Option<String> {
    let h1 = Selector::parse("h1").unwrap();
    if let Some(heading) = document.select(&h1).next() {
        let text = clean_text(&heading.text().collect::<Vec<_>>().join(" "));
        if !text.is_empty() {
            return Some(text);
        }
    }

    let title = Selector::parse("title").unwrap();
    document
        .select(&title)
        .next()
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
}

impl Extractor for HeuristicExtractor {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn extract(&self, context: &ParsingContext) -> Option<RecipeCandidate> {
        let document = &context.document;

        let name = page_title(document)?;

        let ul_item = Selector::parse("ul li").unwrap();
        let ingredients: Vec<String> = document
            .select(&ul_item)
            .map(|li| clean_text(&li.text().collect::<Vec<_>>().join(" ")))
            .filter(|text| {
                INGREDIENT_LEN.contains(&text.chars().count()) && looks_like_ingredient(text)
            })
            .collect();

        let ol_item = Selector::parse("ol li").unwrap();
        let instructions: Vec<String> = document
            .select(&ol_item)
            .map(|li| clean_text(&li.text().collect::<Vec<_>>().join(" ")))
            .filter(|text| INSTRUCTION_LEN.contains(&text.chars().count()))
            .collect();

        if ingredients.len() < MIN_LIST_ITEMS && instructions.len() < MIN_LIST_ITEMS {
            debug!(
                "Heuristic pass found only {} ingredient-shaped and {} step-shaped items",
                ingredients.len(),
                instructions.len()
            );
            return None;
        }

        let description = meta_content(document, "meta[name='description']")
            .or_else(|| meta_content(document, "meta[property='og:description']"))
            .unwrap_or_default();
        let image = meta_content(document, "meta[property='og:image']").unwrap_or_default();

        Some(RecipeCandidate {
            name,
            description,
            ingredients,
            instructions,
            image,
            ..Default::default()
        })
    }
}
