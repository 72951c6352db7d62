use crate::model::RecipeCandidate;
use log::{debug, info};
use scraper::Html;

mod ai_assisted;
mod heuristic;
mod json_ld;
mod microdata;

pub use ai_assisted::AiAssistedExtractor;
pub use heuristic::HeuristicExtractor;
pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;

/// Everything an extractor may look at for one import request.
pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

/// One deterministic extraction strategy.
///
/// Returning `None` means "no usable candidate on this page" — an ordinary
/// outcome the cascade recovers from by moving on, never an error.
pub trait Extractor {
    fn name(&self) -> &'static str;
    fn extract(&self, context: &ParsingContext) -> Option<RecipeCandidate>;
}

/// Run the strategies in fixed priority order, stopping at the first usable
/// candidate. Stages never run speculatively and are never retried. The
/// model-backed stage is gated twice: it runs only after every deterministic
/// stage failed, and only when the caller configured a credential at all.
pub async fn run_cascade(
    context: &ParsingContext,
    ai: Option<&AiAssistedExtractor>,
) -> Option<RecipeCandidate> {
    let stages: [&dyn Extractor; 3] = [&JsonLdExtractor, &MicroDataExtractor, &HeuristicExtractor];

    for stage in stages {
        debug!("Trying {} extractor for {}", stage.name(), context.url);
        if let Some(candidate) = stage.extract(context) {
            info!("Extracted recipe candidate via {}", stage.name());
            return Some(candidate);
        }
    }

    match ai {
        Some(extractor) => extractor.extract(context).await,
        None => {
            debug!("No model credential configured; skipping the last-resort stage");
            None
        }
    }
}
