pub mod change_groups;
pub mod cursor;
pub mod registry;

pub use change_groups::{
    rows_from_diff, rows_from_document, scan, ChangeGroup, ChangeGroupIndex, FocusTarget,
    RenderedRow, FOCUS_CLASS,
};
pub use cursor::{CursorState, NavigationCursor};
pub use registry::{ComparisonWorkspace, TabEntry, TabId};
