//! Extract structured recipes from arbitrary web pages.
//!
//! The core is a cascade of extraction strategies of decreasing reliability
//! — embedded JSON-LD, microdata annotations, generic list/heading
//! heuristics, and finally one bounded language-model call — followed by a
//! normalization pass that reconciles the wild type and format
//! inconsistencies of real-world recipe markup into one canonical
//! [`Recipe`].

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetcher;
pub mod fields;
pub mod model;
pub mod normalizer;
pub mod providers;

pub use config::{AiProviderConfig, ImportConfig};
pub use error::ImportError;
pub use model::{Recipe, RecipeCandidate};

use extractors::{run_cascade, AiAssistedExtractor, ParsingContext};
use fetcher::RequestFetcher;
use log::debug;
use scraper::Html;
use std::time::Duration;

/// Run the extraction cascade over an already-parsed document.
///
/// Pass `ai: None` when no language-model credential is configured; the
/// last-resort stage is then skipped entirely and a page the deterministic
/// strategies cannot handle yields [`ImportError::NoRecipeFound`].
pub async fn extract_recipe(
    document: Html,
    source_url: &str,
    ai: Option<&AiAssistedExtractor>,
) -> Result<Recipe, ImportError> {
    let context = ParsingContext {
        url: source_url.to_string(),
        document,
    };

    match run_cascade(&context, ai).await {
        Some(candidate) => {
            debug!("Winning candidate: {:#?}", candidate);
            Ok(normalizer::normalize(candidate, source_url))
        }
        None => Err(ImportError::NoRecipeFound),
    }
}

/// Fetch a page and extract its recipe in one call.
pub async fn import_recipe(url: &str, config: &ImportConfig) -> Result<Recipe, ImportError> {
    let fetcher = RequestFetcher::new(Some(Duration::from_secs(config.fetch_timeout)));
    let body = fetcher.fetch(url).await?;
    let document = Html::parse_document(&body);

    let ai = config.ai_extractor();
    extract_recipe(document, url, ai.as_ref()).await
}
