pub mod extract;
pub mod normalizer;

pub use extract::extract_text;
pub use normalizer::{normalize, NormalizeOptions, NormalizedText, Preset, TextNormalizer};
