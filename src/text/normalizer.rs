//! Whitespace canonicalization for extracted card content

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Tabs, form feeds and the unicode space variants, always folded to an ASCII space
static SPACE_VARIANTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new("[\t\u{0B}\u{0C}\u{00A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}]")
        .expect("Failed to compile space variant regex")
});

static SPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("Failed to compile space run regex"));

static NEWLINE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("Failed to compile newline run regex"));

static LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("Failed to compile line break regex"));

/// Independent switches controlling [`normalize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Trim whitespace from both ends of every line
    pub trim_lines: bool,
    /// Collapse interior runs of spaces into one
    pub collapse_spaces: bool,
    /// Collapse runs of newlines into one
    pub collapse_newlines: bool,
    /// Remove empty lines after the other passes
    pub drop_empty_lines: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            trim_lines: true,
            collapse_spaces: true,
            collapse_newlines: false,
            drop_empty_lines: false,
        }
    }
}

/// Named option sets for the content shapes the viewer deals with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Prose: trimmed lines, single spaces, blank lines kept
    General,
    /// Code snippets: indentation kept, blank line runs collapsed
    Code,
    /// Everything on one line
    Compact,
    Markdown,
}

impl Preset {
    pub fn options(self) -> NormalizeOptions {
        match self {
            Preset::General | Preset::Markdown => NormalizeOptions::default(),
            Preset::Code => NormalizeOptions {
                trim_lines: false,
                collapse_spaces: true,
                collapse_newlines: true,
                drop_empty_lines: false,
            },
            Preset::Compact => NormalizeOptions {
                trim_lines: true,
                collapse_spaces: true,
                collapse_newlines: true,
                drop_empty_lines: true,
            },
        }
    }

    /// Normalize `text` with this preset
    pub fn apply(self, text: &str) -> NormalizedText {
        let normalized = normalize(text, &self.options());
        match self {
            Preset::Compact => NormalizedText(normalized.0.replace('\n', " ")),
            _ => normalized,
        }
    }
}

/// Text that has been through [`normalize`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize `text` so diffs are not polluted by formatting noise
///
/// Idempotent for a fixed set of options. `\r\n` and a lone `\r` count as
/// line breaks.
pub fn normalize(text: &str, options: &NormalizeOptions) -> NormalizedText {
    if text.is_empty() {
        return NormalizedText::default();
    }

    let spaced = SPACE_VARIANTS.replace_all(text, " ");

    let mut lines: Vec<String> = LINE_BREAKS
        .split(&spaced)
        .map(|line| {
            let mut processed = if options.collapse_spaces {
                SPACE_RUNS.replace_all(line, " ").into_owned()
            } else {
                line.to_string()
            };
            if options.trim_lines {
                processed = processed.trim().to_string();
            }
            processed
        })
        .collect();

    if options.drop_empty_lines {
        lines.retain(|line| !line.is_empty());
    }

    let mut result = lines.join("\n");
    if options.collapse_newlines {
        result = NEWLINE_RUNS.replace_all(&result, "\n").into_owned();
    }

    NormalizedText(result)
}

/// Normalizer bound to a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    options: NormalizeOptions,
}

impl TextNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        normalize(text, &self.options)
    }

    /// Extract the visible text of a markup fragment, then normalize it
    pub fn normalize_markup(&self, html: &str) -> NormalizedText {
        self.normalize(&super::extract::extract_text(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_preset() {
        let result = Preset::General.apply("  Hello    world  \n\n  Test   line  \n\n");
        assert_eq!(result.as_str(), "Hello world\n\nTest line\n\n");
    }

    #[test]
    fn test_code_preset_keeps_indentation() {
        let result = Preset::Code.apply("function()   {\n   console.log('test');\n\n\n}");
        assert_eq!(result.as_str(), "function() {\n console.log('test');\n}");
    }

    #[test]
    fn test_compact_preset() {
        let result = Preset::Compact.apply("Title   here\n  Second   line  \n\n  Third   line");
        assert_eq!(result.as_str(), "Title here Second line Third line");
    }

    #[test]
    fn test_unicode_spaces_and_tabs_are_folded() {
        let options = NormalizeOptions::default();
        let result = normalize("Fee:\t\u{00A0}500\u{3000}INR", &options);
        assert_eq!(result.as_str(), "Fee: 500 INR");
    }

    #[test]
    fn test_normalize_markup_uses_visible_text() {
        let normalizer = TextNormalizer::new(Preset::Compact.options());
        let result = normalizer.normalize_markup(
            "<div>\n  <p>Annual   fee:\u{00A0}<b>500</b></p>\n<script>var fee;</script><p>  Waived</p></div>",
        );
        assert_eq!(result.as_str(), "Annual fee: 500\nWaived");
    }

    #[test]
    fn test_empty_input() {
        let result = normalize("", &NormalizeOptions::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_drop_empty_lines() {
        let options = NormalizeOptions {
            drop_empty_lines: true,
            ..NormalizeOptions::default()
        };
        let result = normalize("a\n   \n\nb\r\nc", &options);
        assert_eq!(result.as_str(), "a\nb\nc");
    }

    #[test]
    fn test_idempotent_for_all_option_combinations() {
        let samples = [
            "  Hello    world  \n\n  Test   line  \n\n",
            "x\r\r\nnext\t\tline\u{2028}end",
            "\n\n\n   \u{FEFF}  lead\n\ttrail   \n",
            "",
        ];
        for bits in 0..16u8 {
            let options = NormalizeOptions {
                trim_lines: bits & 1 != 0,
                collapse_spaces: bits & 2 != 0,
                collapse_newlines: bits & 4 != 0,
                drop_empty_lines: bits & 8 != 0,
            };
            for sample in samples {
                let once = normalize(sample, &options);
                let twice = normalize(&once, &options);
                assert_eq!(once, twice, "options {options:?} sample {sample:?}");
            }
        }
    }
}
