use crate::extractors::ParsingContext;
use crate::fields::{clean_text, parse_servings};
use crate::model::RecipeCandidate;
use crate::providers::ChatCompletion;
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Node, Selector};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

/// Upper bound on the page-text excerpt sent to the model, in characters.
/// Bounds token cost per import; recipe content on real pages sits well
/// within it.
const EXCERPT_CHAR_BUDGET: usize = 12_000;

/// Last-resort extractor: one bounded call to a language-model service.
///
/// Only constructed when a credential is configured, and only invoked after
/// every deterministic strategy came up empty. Every failure mode (transport
/// error, timeout, unparsable reply, model-reported "no recipe") collapses to
/// `None` — there is no stage after this one.
pub struct AiAssistedExtractor {
    provider: Box<dyn ChatCompletion>,
    timeout: Duration,
}

impl AiAssistedExtractor {
    pub fn new(provider: Box<dyn ChatCompletion>, timeout: Duration) -> Self {
        AiAssistedExtractor { provider, timeout }
    }

    pub async fn extract(&self, context: &ParsingContext) -> Option<RecipeCandidate> {
        let excerpt = page_excerpt(&context.document);
        if excerpt.is_empty() {
            debug!("Page has no body text to send to the model");
            return None;
        }

        info!(
            "Deterministic extractors exhausted; asking {} about {}",
            self.provider.provider_name(),
            context.url
        );

        let reply = match timeout(self.timeout, self.provider.complete(&excerpt)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                warn!("Model service call failed: {err}");
                return None;
            }
            Err(_) => {
                warn!("Model service call timed out after {:?}", self.timeout);
                return None;
            }
        };

        let blob = find_json_object(&reply)?;
        let json: Value = match serde_json::from_str(blob) {
            Ok(json) => json,
            Err(err) => {
                warn!("Model reply was not valid JSON: {err}");
                return None;
            }
        };

        if let Some(error) = json["error"].as_str() {
            if !error.is_empty() {
                debug!("Model reported no recipe: {error}");
                return None;
            }
        }

        let mut candidate = RecipeCandidate {
            name: clean_text(json["name"].as_str().unwrap_or_default()),
            description: clean_text(json["description"].as_str().unwrap_or_default()),
            ingredients: string_list(&json["ingredients"]),
            instructions: string_list(&json["instructions"]),
            servings: parse_servings(&json["servings"]),
            ..Default::default()
        };

        if !candidate.is_usable() {
            debug!("Model reply did not reach the usability threshold");
            return None;
        }

        if candidate.name.is_empty() {
            candidate.name = document_title(&context.document);
        }

        Some(candidate)
    }
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(clean_text)
                .filter(|line| !line.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn document_title(document: &Html) -> String {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default()
}

/// Locate the first balanced `{...}` blob in the reply. Models frequently
/// wrap the requested JSON in prose or code fences.
fn find_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in reply[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&reply[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Plain-text rendering of the page body, whitespace-collapsed and truncated
/// to the character budget.
fn page_excerpt(document: &Html) -> String {
    let body = Selector::parse("body").unwrap();
    let Some(body) = document.select(&body).next() else {
        return String::new();
    };

    let mut parts = Vec::new();
    collect_text(&body, &mut parts);

    let mut excerpt = parts.join(" ");
    if let Some((cut, _)) = excerpt.char_indices().nth(EXCERPT_CHAR_BUDGET) {
        excerpt.truncate(cut);
    }
    excerpt
}

fn collect_text(element: &ElementRef, parts: &mut Vec<String>) {
    if is_hidden(element) || should_skip_element(element) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !collapsed.is_empty() {
                    parts.push(collapsed);
                }
            }
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, parts);
                }
            }
            _ => {}
        }
    }
}

fn is_hidden(element: &ElementRef) -> bool {
    element.value().attr("hidden").is_some()
        || element
            .value()
            .attr("style")
            .map(|s| s.contains("display: none") || s.contains("visibility: hidden"))
            .unwrap_or(false)
}

fn should_skip_element(element: &ElementRef) -> bool {
    matches!(
        element.value().name().to_lowercase().as_str(),
        "script" | "style" | "noscript" | "iframe" | "svg" | "template"
    )
}
