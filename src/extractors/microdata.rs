use crate::extractors::{Extractor, ParsingContext};
use crate::fields::{clean_text, parse_duration_str, parse_servings_str};
use crate::model::RecipeCandidate;
use log::debug;
use scraper::{ElementRef, Selector};

/// Reads inline `itemscope`/`itemprop` recipe annotations, the fallback when
/// a page carries no machine-readable script block.
pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a scraper::Html) -> Option<ElementRef<'a>> {
        let selector = Selector::parse("[itemscope]").unwrap();
        for element in document.select(&selector) {
            if let Some(itemtype) = element.value().attr("itemtype") {
                if itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
                {
                    return Some(element);
                }
            }
        }
        None
    }

    fn prop_text(&self, root: ElementRef, prop: &str) -> Option<String> {
        let selector = Selector::parse(&format!("[itemprop='{}']", prop)).unwrap();
        root.select(&selector)
            .next()
            .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
            .filter(|text| !text.is_empty())
    }

    /// Read a property that annotates its machine value as an attribute
    /// (`content` on meta-style tags, `datetime` on `<time>`, `src` on
    /// `<img>`), preferring the attribute over visible text.
    fn prop_attr_or_text(&self, root: ElementRef, prop: &str, attrs: &[&str]) -> Option<String> {
        let selector = Selector::parse(&format!("[itemprop='{}']", prop)).unwrap();
        let element = root.select(&selector).next()?;
        for attr in attrs {
            if let Some(value) = element.value().attr(attr) {
                return Some(value.to_string());
            }
        }
        let text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
        (!text.is_empty()).then_some(text)
    }

    fn prop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        let selector = Selector::parse(&format!("[itemprop='{}']", prop)).unwrap();
        root.select(&selector)
            .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Instructions come in two nesting patterns: one annotated element per
    /// step, or a single annotated container whose `<li>` children are the
    /// steps.
    fn instructions(&self, root: ElementRef) -> Vec<String> {
        for prop in ["recipeInstructions", "instructions"] {
            let selector = Selector::parse(&format!("[itemprop='{}']", prop)).unwrap();
            let elements: Vec<_> = root.select(&selector).collect();
            if elements.is_empty() {
                continue;
            }

            if elements.len() == 1 {
                let li_selector = Selector::parse("li").unwrap();
                let items: Vec<String> = elements[0]
                    .select(&li_selector)
                    .map(|li| clean_text(&li.text().collect::<Vec<_>>().join(" ")))
                    .filter(|text| !text.is_empty())
                    .collect();
                if !items.is_empty() {
                    return items;
                }
            }

            let items: Vec<String> = elements
                .iter()
                .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
                .filter(|text| !text.is_empty())
                .collect();
            if !items.is_empty() {
                return items;
            }
        }
        Vec::new()
    }
}

impl Extractor for MicroDataExtractor {
    fn name(&self) -> &'static str {
        "microdata"
    }

    fn extract(&self, context: &ParsingContext) -> Option<RecipeCandidate> {
        // Scope every lookup to the Recipe item. Global itemprop searches
        // (like "name" or "description") pick up unrelated page content
        // (site title, author bio, ads) on real pages.
        let container = self.find_recipe_container(&context.document)?;
        debug!("Found microdata Recipe container for {}", context.url);

        // 'recipeIngredient' is current schema.org; 'ingredients' is the
        // legacy alias still common in the wild.
        let mut ingredients = self.prop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            ingredients = self.prop_list(container, "ingredients");
        }

        let candidate = RecipeCandidate {
            name: self.prop_text(container, "name").unwrap_or_default(),
            description: self.prop_text(container, "description").unwrap_or_default(),
            ingredients,
            instructions: self.instructions(container),
            prep_time: self
                .prop_attr_or_text(container, "prepTime", &["content", "datetime"])
                .as_deref()
                .and_then(parse_duration_str),
            cook_time: self
                .prop_attr_or_text(container, "cookTime", &["content", "datetime"])
                .as_deref()
                .and_then(parse_duration_str),
            total_time: self
                .prop_attr_or_text(container, "totalTime", &["content", "datetime"])
                .as_deref()
                .and_then(parse_duration_str),
            servings: self
                .prop_text(container, "recipeYield")
                .as_deref()
                .and_then(parse_servings_str),
            image: self
                .prop_attr_or_text(container, "image", &["src", "content"])
                .unwrap_or_default(),
            cuisine: self.prop_text(container, "recipeCuisine").unwrap_or_default(),
            category: self.prop_text(container, "recipeCategory").unwrap_or_default(),
            // microdata nutrition markup is too rare to be worth parsing
            calories: None,
        };

        if !candidate.is_usable() {
            debug!("Microdata container yielded no usable candidate");
            return None;
        }

        Some(candidate)
    }
}
