use crate::error::{CardDiffError, Result};
use std::path::Path;

/// Generate the default card-diff.toml template
pub fn default_config_template() -> String {
    r##"# Card diff viewer configuration

# Whitespace normalization applied to both versions before diffing
[normalize]
# Strip leading and trailing whitespace from every line
trim_lines = true
# Collapse interior runs of spaces and tabs into one space
collapse_spaces = true
# Collapse runs of blank lines into one line break
collapse_newlines = false
# Remove lines left empty by the passes above
drop_empty_lines = false

[diff]
# "focused" shows a few lines around each change, "exhaustive" shows everything
mode = "focused"
# Unchanged lines kept around each change in focused mode
context_lines = 3
# Appended to each side when both versions are identical
old_marker = "[end of previous version]"
new_marker = "[end of current version]"

# Keyword search markers
[highlight]
marker_class = "highlighted-keyword"
active_color = "orange"
inactive_color = "yellow"
"##
    .to_string()
}

/// Write the default template to `path` unless a file is already there
///
/// Returns whether a file was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    std::fs::write(path, default_config_template()).map_err(CardDiffError::Io)?;
    Ok(true)
}
