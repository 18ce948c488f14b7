use crate::activation::{ScriptFragment, StyleDeclaration};
use crate::error::Result;
use std::future::Future;

/// Source of card markup and comparison payloads
///
/// Implementations own transport and retries; every method returns the raw
/// body (HTML or JSON) for the orchestrator to decode.
pub trait CardDataProvider {
    /// Full HTML document of the latest card version
    fn fetch_card_html(&self, card_id: &str) -> impl Future<Output = Result<String>>;

    /// Comparison JSON for two versions of a card
    fn fetch_comparison(
        &self,
        card_id: &str,
        version1: u32,
        version2: u32,
    ) -> impl Future<Output = Result<String>>;

    /// Tab contents JSON of one card version
    fn fetch_tab_contents(&self, card_id: &str, version: u32)
        -> impl Future<Output = Result<String>>;
}

/// The page that activated fragments are handed to
pub trait PageHost {
    /// Install a style declaration in the page head
    fn inject_style(&mut self, style: StyleDeclaration) -> Result<()>;

    /// Append a fresh script to the page body and run it
    fn run_script(&mut self, script: ScriptFragment) -> Result<()>;
}

/// Trait for configuration validation
pub trait ConfigValidator {
    type Config;

    /// Validate configuration
    fn validate(&self, config: &Self::Config) -> Result<()>;
}
