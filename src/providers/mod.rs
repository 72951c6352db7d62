mod open_ai;
mod prompt;

pub use open_ai::OpenAiClient;
pub use prompt::RECIPE_EXTRACTION_PROMPT;

use async_trait::async_trait;
use std::error::Error;

/// Unified interface to a language-model chat completion service.
///
/// The cascade only ever needs one operation: hand over the page text, get
/// the raw reply back. Keeping the seam this narrow lets tests substitute a
/// canned implementation without any network access.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Provider name (e.g. "openai"), for logging.
    fn provider_name(&self) -> &str;

    /// Send one extraction request over `page_text`, returning the raw model
    /// reply. May fail or hang; callers bound it with their own timeout.
    async fn complete(&self, page_text: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}
