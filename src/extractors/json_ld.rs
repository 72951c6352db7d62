use crate::extractors::{Extractor, ParsingContext};
use crate::fields::{clean_text, parse_calories, parse_duration, parse_image, parse_servings};
use crate::model::RecipeCandidate;
use log::debug;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;

/// Reads embedded `application/ld+json` recipe markup, the dominant and
/// highest-confidence encoding used by recipe sites.
pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    #[serde(default)]
    name: String,
    description: Option<TextValue>,
    image: Option<Value>,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Vec<String>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "prepTime")]
    prep_time: Option<Value>,
    #[serde(rename = "cookTime")]
    cook_time: Option<Value>,
    #[serde(rename = "totalTime")]
    total_time: Option<Value>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<Value>,
    #[serde(rename = "recipeCuisine")]
    recipe_cuisine: Option<StringOrList>,
    #[serde(rename = "recipeCategory")]
    recipe_category: Option<StringOrList>,
    nutrition: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    String(String),
    Object(TextObject),
}

impl TextValue {
    fn into_string(self) -> String {
        match self {
            TextValue::String(s) => s,
            TextValue::Object(obj) => obj.text,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    String(String),
    List(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    /// One block of text; split into paragraphs downstream.
    Block(String),
    Steps(Vec<InstructionStep>),
}

/// A single entry of a `recipeInstructions` array. Sections must be tried
/// before plain steps: every step field is optional, so a bare step object
/// would otherwise swallow section objects too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionStep {
    Text(String),
    Section(SectionObject),
    Step(StepObject),
}

#[derive(Debug, Deserialize)]
struct StepObject {
    text: Option<String>,
    name: Option<String>,
}

impl StepObject {
    fn into_text(self) -> Option<String> {
        self.text.or(self.name)
    }
}

#[derive(Debug, Deserialize)]
struct SectionObject {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<StepObject>,
}

fn instruction_lines(instructions: RecipeInstructions) -> Vec<String> {
    let lines: Vec<String> = match instructions {
        RecipeInstructions::Block(text) => text.split('\n').map(str::to_string).collect(),
        RecipeInstructions::Steps(steps) => steps
            .into_iter()
            .filter_map(|step| match step {
                InstructionStep::Text(text) => Some(text),
                InstructionStep::Step(step) => step.into_text(),
                // one instruction line per section: sub-steps flattened and
                // joined with spaces
                InstructionStep::Section(section) => {
                    let joined = section
                        .item_list_element
                        .into_iter()
                        .filter_map(StepObject::into_text)
                        .collect::<Vec<_>>()
                        .join(" ");
                    (!joined.is_empty()).then_some(joined)
                }
            })
            .collect(),
    };

    lines
        .iter()
        .map(|line| clean_text(line))
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .any(|t| t.as_str().is_some_and(|t| t.eq_ignore_ascii_case("recipe"))),
        _ => false,
    }
}

/// Locate the Recipe object inside one parsed script block. The recognized
/// containers are a Recipe-typed object itself, a `@graph` wrapper, or a
/// plain array of candidates.
fn find_recipe_node(json: &Value) -> Option<&Value> {
    if is_recipe_type(json) {
        return Some(json);
    }
    if let Some(graph) = json.get("@graph").and_then(Value::as_array) {
        return graph.iter().find(|node| is_recipe_type(node));
    }
    if let Some(nodes) = json.as_array() {
        return nodes.iter().find(|node| is_recipe_type(node));
    }
    None
}

/// Clean up the raw script payload before JSON parsing. Real pages embed
/// trailing commas, HTML comment markers, and leading junk ahead of the
/// object.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}

fn to_candidate(recipe: JsonLdRecipe) -> RecipeCandidate {
    RecipeCandidate {
        name: clean_text(&recipe.name),
        description: recipe
            .description
            .map(|d| clean_text(&d.into_string()))
            .unwrap_or_default(),
        ingredients: recipe
            .recipe_ingredient
            .iter()
            .map(|line| clean_text(line))
            .filter(|line| !line.is_empty())
            .collect(),
        instructions: recipe
            .recipe_instructions
            .map(instruction_lines)
            .unwrap_or_default(),
        prep_time: recipe.prep_time.as_ref().and_then(parse_duration),
        cook_time: recipe.cook_time.as_ref().and_then(parse_duration),
        total_time: recipe.total_time.as_ref().and_then(parse_duration),
        servings: recipe.recipe_yield.as_ref().and_then(parse_servings),
        image: recipe.image.as_ref().map(parse_image).unwrap_or_default(),
        cuisine: match recipe.recipe_cuisine {
            Some(StringOrList::String(c)) => clean_text(&c),
            Some(StringOrList::List(list)) => clean_text(&list.join(", ")),
            None => String::new(),
        },
        category: match recipe.recipe_category {
            Some(StringOrList::String(c)) => clean_text(&c),
            Some(StringOrList::List(list)) => {
                list.first().map(|c| clean_text(c)).unwrap_or_default()
            }
            None => String::new(),
        },
        calories: recipe.nutrition.as_ref().and_then(parse_calories),
    }
}

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn extract(&self, context: &ParsingContext) -> Option<RecipeCandidate> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        // Try each script block in document order until one yields a usable
        // candidate. Malformed blocks are extremely common on real pages and
        // are skipped, never fatal.
        for script in context.document.select(&selector) {
            let cleaned = sanitize_json(&script.inner_html());
            let json: Value = match serde_json::from_str(&cleaned) {
                Ok(json) => json,
                Err(err) => {
                    debug!("Skipping malformed ld+json block: {err}");
                    continue;
                }
            };

            let Some(node) = find_recipe_node(&json) else {
                continue;
            };

            let recipe: JsonLdRecipe = match serde_json::from_value(node.clone()) {
                Ok(recipe) => recipe,
                Err(err) => {
                    debug!("Recipe node did not deserialize: {err}");
                    continue;
                }
            };

            let candidate = to_candidate(recipe);
            if candidate.is_usable() {
                return Some(candidate);
            }
        }

        None
    }
}
