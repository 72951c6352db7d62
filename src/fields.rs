//! Field-level parsers shared by every extractor.
//!
//! Recipe markup in the wild has no contract: a duration may be an ISO-8601
//! string or a bare number, a yield may be `4`, `"4 servings"`, or
//! `["4", "4 servings"]`, an image may be a string, an array, or an object.
//! Each parser here accepts all shapes it has been seen to take and collapses
//! them to one scalar. All parsers are total: malformed input yields the
//! absent sentinel (`None` or `""`), never a panic.

use html_escape::decode_html_entities;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?\s*$").expect("duration pattern is valid")
});

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digits pattern is valid"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Measurement-unit words used by [`looks_like_ingredient`]. Empirically
/// tuned; adjust here, not at call sites.
pub const MEASUREMENT_UNITS: &[&str] = &[
    "cup", "cups", "tablespoon", "tablespoons", "tbsp", "teaspoon", "teaspoons", "tsp", "ounce",
    "ounces", "oz", "pound", "pounds", "lb", "lbs", "gram", "grams", "kg", "ml", "liter", "liters",
    "litre", "litres", "quart", "quarts", "pint", "pints", "gallon", "pinch", "dash", "clove",
    "cloves", "stick", "sticks", "can", "cans", "jar", "jars", "package", "packages", "slice",
    "slices", "handful", "bunch", "sprig", "sprigs",
];

/// Common-ingredient nouns used by [`looks_like_ingredient`].
pub const COMMON_INGREDIENTS: &[&str] = &[
    "flour", "sugar", "salt", "pepper", "butter", "oil", "egg", "eggs", "milk", "cream", "water",
    "garlic", "onion", "onions", "chicken", "beef", "pork", "fish", "cod", "salmon", "shrimp",
    "cheese", "tomato", "tomatoes", "potato", "potatoes", "rice", "pasta", "noodles", "bread",
    "lemon", "lime", "vanilla", "cinnamon", "nutmeg", "basil", "parsley", "cilantro", "thyme",
    "rosemary", "oregano", "ginger", "honey", "vinegar", "soy sauce", "broth", "stock", "carrot",
    "carrots", "celery", "mushroom", "mushrooms", "spinach", "kale", "beans", "lentils",
    "chocolate", "cocoa", "yeast", "baking powder", "baking soda", "cornstarch",
];

static UNITS_RE: LazyLock<Regex> = LazyLock::new(|| word_list_pattern(MEASUREMENT_UNITS));
static FOODS_RE: LazyLock<Regex> = LazyLock::new(|| word_list_pattern(COMMON_INGREDIENTS));

fn word_list_pattern(words: &[&str]) -> Regex {
    let pattern = format!(r"(?i)\b(?:{})\b", words.join("|"));
    Regex::new(&pattern).expect("vocabulary pattern is valid")
}

/// Parse a duration into whole minutes.
///
/// Accepts an ISO-8601 `PT#H#M#S` string (any component may be missing),
/// a bare number already in minutes, or a numeric string. Seconds round up
/// to the next whole minute.
pub fn parse_duration(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_f64().map(|m| m.round().max(0.0) as u32),
        Value::String(s) => parse_duration_str(s),
        _ => None,
    }
}

/// String core of [`parse_duration`], for sources that only carry text.
pub fn parse_duration_str(value: &str) -> Option<u32> {
    if let Some(caps) = DURATION_RE.captures(value) {
        // "PT" with no components at all is not a duration
        if caps.get(1).is_some() || caps.get(2).is_some() || caps.get(3).is_some() {
            let hours: u32 = caps.get(1).map_or(0, |m| m.as_str().parse().unwrap_or(0));
            let minutes: u32 = caps.get(2).map_or(0, |m| m.as_str().parse().unwrap_or(0));
            let seconds: u32 = caps.get(3).map_or(0, |m| m.as_str().parse().unwrap_or(0));
            return Some(hours * 60 + minutes + seconds.div_ceil(60));
        }
    }
    value.trim().parse::<u32>().ok()
}

/// Parse a yield value into an integer serving count.
///
/// Accepts a number, a string containing digits ("Serves 4 people"), or an
/// array whose first element is either of those.
pub fn parse_servings(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_f64().map(|s| s.round().max(0.0) as u32),
        Value::String(s) => parse_servings_str(s),
        Value::Array(items) => items.first().and_then(parse_servings),
        _ => None,
    }
}

/// String core of [`parse_servings`]: first run of digits, if any.
pub fn parse_servings_str(value: &str) -> Option<u32> {
    DIGITS_RE
        .find(value)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Collapse the image field union (string | array | object) to one URL.
/// Returns an empty string when no recognized shape matches.
pub fn parse_image(value: &Value) -> String {
    match value {
        Value::String(url) => url.clone(),
        Value::Array(items) => items.first().map(parse_image).unwrap_or_default(),
        Value::Object(obj) => obj
            .get("url")
            .or_else(|| obj.get("@id"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// Read an integer calorie count out of a nutrition object. The key is
/// matched case-insensitively ("calories", "Calories", ...).
pub fn parse_calories(value: &Value) -> Option<u32> {
    let nutrition = value.as_object()?;
    for (key, field) in nutrition {
        if !key.to_ascii_lowercase().contains("calorie") {
            continue;
        }
        return match field {
            Value::Number(n) => n.as_f64().map(|c| c.round().max(0.0) as u32),
            Value::String(s) => parse_servings_str(s),
            _ => None,
        };
    }
    None
}

/// Normalize free text: decode HTML entities (twice, nested encodings are
/// common), strip embedded markup tags, collapse whitespace runs, trim.
pub fn clean_text(value: &str) -> String {
    let decoded = decode_html_entities(&decode_html_entities(value).into_owned()).into_owned();
    let stripped = TAG_RE.replace_all(&decoded, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Heuristic classifier for ingredient-shaped lines: true when either the
/// measurement-unit or the common-ingredient vocabulary matches anywhere.
/// False positives and negatives are expected; callers treat this as a
/// filter, not a parser.
pub fn looks_like_ingredient(text: &str) -> bool {
    UNITS_RE.is_match(text) || FOODS_RE.is_match(text)
}
