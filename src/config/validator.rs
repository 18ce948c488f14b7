use crate::config::types::ViewerConfig;
use crate::error::{CardDiffError, Result};
use crate::traits::ConfigValidator;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static CSS_IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[_a-zA-Z][_a-zA-Z0-9-]*$").expect("Failed to compile CSS identifier regex")
});

/// Configuration validator implementation
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = ViewerConfig;

    fn validate(&self, config: &ViewerConfig) -> Result<()> {
        self.validate_with_context(config, "configuration")
    }
}

impl ConfigValidatorImpl {
    pub fn new() -> Self {
        Self
    }

    /// Validation with the config source named in error messages
    pub fn validate_with_context<P: AsRef<Path>>(
        &self,
        config: &ViewerConfig,
        config_path: P,
    ) -> Result<()> {
        let source = config_path.as_ref().to_string_lossy();
        let diff = &config.diff;

        if diff.old_marker.trim().is_empty() || diff.new_marker.trim().is_empty() {
            return Err(CardDiffError::invalid_config(format!(
                "Empty degenerate-diff marker in {}. Set both [diff] old_marker and new_marker.",
                source
            )));
        }

        if diff.old_marker == diff.new_marker {
            return Err(CardDiffError::invalid_config(format!(
                "[diff] old_marker and new_marker in {} must differ, both are '{}'",
                source, diff.old_marker
            )));
        }

        if diff.old_marker.contains('\n') || diff.new_marker.contains('\n') {
            return Err(CardDiffError::invalid_config(format!(
                "Degenerate-diff markers in {} must be single lines",
                source
            )));
        }

        let highlight = &config.highlight;
        if !CSS_IDENT.is_match(&highlight.marker_class) {
            return Err(CardDiffError::invalid_config(format!(
                "Invalid [highlight] marker_class '{}' in {}. Must be a CSS class name.",
                highlight.marker_class, source
            )));
        }

        for (name, value) in [
            ("active_color", &highlight.active_color),
            ("inactive_color", &highlight.inactive_color),
        ] {
            if value.trim().is_empty() {
                return Err(CardDiffError::invalid_config(format!(
                    "[highlight] {} in {} must not be empty",
                    name, source
                )));
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidatorImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidatorImpl::new().validate(self)
    }

    pub(crate) fn validate_with_context<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ConfigValidatorImpl::new().validate_with_context(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_markers_must_differ() {
        let mut config = ViewerConfig::default();
        config.diff.new_marker = config.diff.old_marker.clone();
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("must differ"));
    }

    #[test]
    fn test_markers_must_not_be_empty() {
        let mut config = ViewerConfig::default();
        config.diff.old_marker = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.diff.new_marker = "end\nmore".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_marker_class_must_be_css_identifier() {
        let mut config = ViewerConfig::default();
        for class in ["kw-mark", "_hit", "-x"] {
            config.highlight.marker_class = class.to_string();
            assert!(config.validate().is_ok(), "{class} should be accepted");
        }
        for class in ["", "two words", "9lives", "a\"b"] {
            config.highlight.marker_class = class.to_string();
            assert!(config.validate().is_err(), "{class} should be rejected");
        }
    }

    #[test]
    fn test_colors_must_not_be_empty() {
        let mut config = ViewerConfig::default();
        config.highlight.inactive_color = String::new();
        assert!(config.validate().is_err());
    }
}
