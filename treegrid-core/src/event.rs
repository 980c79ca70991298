use crate::model::{ColumnId, RowId};

/// Keys the grid reacts to while a row is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Escape,
    Other,
}

/// Intents emitted by the grid presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    // Row lifecycle
    AddRoot,
    AddChild,
    EditRow(RowId),
    SaveRow(RowId),
    CancelEdit(RowId),
    RemoveRow(RowId),

    // Editor input
    EditTextChanged {
        row: RowId,
        column: ColumnId,
        value: String,
    },
    CellFocused {
        column: ColumnId,
    },
    KeyDown(EditorKey),

    // Selection
    RowSelected(Option<RowId>),
}

/// Follow-up work the host has to perform after an event was reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEffect {
    /// The forest structure changed; cached layout must be rebuilt.
    LayoutChanged,
    /// Focus the editor of `column` in `row` and select its content.
    FocusEditor { row: RowId, column: ColumnId },
}
