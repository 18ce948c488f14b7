pub mod aligned;
pub mod data;
pub mod engine;
pub mod renderer;

pub use aligned::{align_comparison, AlignedRow};
pub use data::{DiffMode, DiffOperation, DiffResult, DiffRow, DiffStats};
pub use engine::{DiffEngine, DEFAULT_CONTEXT_LINES, DEFAULT_NEW_MARKER, DEFAULT_OLD_MARKER};
pub use renderer::HtmlDiffRenderer;
