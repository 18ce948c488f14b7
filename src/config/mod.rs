pub mod loader;
pub mod templates;
pub mod types;
pub mod validator;

pub use templates::{default_config_template, ensure_config_file_exists};
pub use types::{DiffConfig, HighlightConfig, ViewerConfig};
pub use validator::ConfigValidatorImpl;
