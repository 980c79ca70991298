use crate::model::{ColumnId, RowId};

/// Editor chrome rendered inside a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeControl {
    Edit,
    Remove,
    Save,
    Cancel,
    /// Text input of the cell in the given column.
    Editor(ColumnId),
}

/// Where a pointer input landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    RowBody(RowId),
    Chrome { row: RowId, control: ChromeControl },
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    DoubleClick,
}

/// Determines whether pointer input may reach the grid's row
/// selection and expand/collapse handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowToggleGuard {
    /// Let the input select or toggle the row.
    Allow,
    /// Swallow the input at its origin.
    Stop,
}

/// Return `true` when the input originates from editor chrome.
pub fn belongs_to_editor_chrome(target: &PointerTarget) -> bool {
    matches!(target, PointerTarget::Chrome { .. })
}

/// Classify pointer input before it reaches row selection or
/// expand/collapse.
pub fn row_toggle_guard(target: &PointerTarget) -> RowToggleGuard {
    if belongs_to_editor_chrome(target) {
        log::trace!("pointer input stopped at editor chrome: {target:?}");
        RowToggleGuard::Stop
    } else {
        RowToggleGuard::Allow
    }
}
