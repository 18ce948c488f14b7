//! Reading the viewer configuration from disk
//!
//! The config file is optional: embedders either point at a file that must
//! exist ([`ViewerConfig::load_with_validation`]) or at one that may be
//! absent ([`ViewerConfig::load_or_default`]).

use crate::config::types::ViewerConfig;
use crate::error::{CardDiffError, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read a config file; only a missing file maps to `ConfigNotFound`
fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CardDiffError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => CardDiffError::Io(e),
    })
}

impl ViewerConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file without validating it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_toml(&read_config(path.as_ref())?)
    }

    /// Load configuration, naming the file in parse errors, then validate it
    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_config(path)?;

        let config = Self::from_toml(&content).map_err(|e| {
            CardDiffError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate_with_context(path)?;
        Ok(config)
    }

    /// Load and validate `path` if given and present, else use the defaults
    ///
    /// A file that exists but does not parse or validate is still an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        match Self::load_with_validation(path) {
            Err(CardDiffError::ConfigNotFound { path }) => {
                debug!(path = %path.display(), "no viewer config, using defaults");
                Ok(Self::default())
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
[normalize]
collapse_newlines = true

[diff]
mode = "exhaustive"
context_lines = 5

[highlight]
active_color = "#ffa500"
"##
        )
        .unwrap();

        let config = ViewerConfig::load_from_file(file.path()).unwrap();
        assert!(config.normalize.collapse_newlines);
        assert!(config.normalize.trim_lines);
        assert_eq!(config.diff.mode, DiffMode::Exhaustive);
        assert_eq!(config.diff.context_lines, 5);
        assert_eq!(config.diff.old_marker, crate::diff::DEFAULT_OLD_MARKER);
        assert_eq!(config.highlight.active_color, "#ffa500");
        assert_eq!(config.highlight.inactive_color, "yellow");
    }

    #[test]
    fn test_missing_file() {
        let result = ViewerConfig::load_with_validation("/definitely/not/here/card-diff.toml");
        assert!(matches!(result, Err(CardDiffError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[diff\nmode = ").unwrap();

        let error = ViewerConfig::load_with_validation(file.path()).unwrap_err();
        assert!(matches!(error, CardDiffError::InvalidConfig { .. }));
        assert!(error.to_string().contains("Failed to parse TOML"));

        assert!(matches!(
            ViewerConfig::load_from_file(file.path()),
            Err(CardDiffError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_validation_runs_on_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[diff]\nold_marker = \"same\"\nnew_marker = \"same\"").unwrap();

        assert!(ViewerConfig::load_from_file(file.path()).is_ok());
        assert!(ViewerConfig::load_with_validation(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(ViewerConfig::load_or_default(None).unwrap(), ViewerConfig::default());

        let missing = Path::new("/definitely/not/here/card-diff.toml");
        assert_eq!(
            ViewerConfig::load_or_default(Some(missing)).unwrap(),
            ViewerConfig::default()
        );

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[diff]\nmode = \"exhaustive\"").unwrap();
        let config = ViewerConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.diff.mode, DiffMode::Exhaustive);

        let mut broken = NamedTempFile::new().unwrap();
        writeln!(broken, "[highlight]\nmarker_class = \"not a class\"").unwrap();
        assert!(matches!(
            ViewerConfig::load_or_default(Some(broken.path())),
            Err(CardDiffError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_directory_is_an_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            ViewerConfig::load_from_file(dir.path()),
            Err(CardDiffError::Io(_))
        ));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = ViewerConfig::from_toml("").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }
}
