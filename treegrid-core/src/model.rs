use serde::{Deserialize, Serialize};

/// Unique identifier of a row across the whole forest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a configured grid column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ColumnId(u32);

impl ColumnId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal alignment of header or cell content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// What a column hosts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Editable text data.
    #[default]
    Text,
    /// Row action controls (edit/remove, save/cancel). Cells carry no text.
    Actions,
}

/// Static column configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub(crate) id: ColumnId,
    pub(crate) header_text: String,
    pub(crate) width: u32,
    #[serde(default)]
    pub(crate) header_alignment: Alignment,
    #[serde(default)]
    pub(crate) content_alignment: Alignment,
    #[serde(default)]
    pub(crate) fixed_width: bool,
    #[serde(default)]
    pub(crate) kind: ColumnKind,
}

impl Column {
    /// Create a centered text column.
    pub fn new(
        id: ColumnId,
        header_text: impl Into<String>,
        width: u32,
    ) -> Self {
        Self {
            id,
            header_text: header_text.into(),
            width,
            header_alignment: Alignment::Center,
            content_alignment: Alignment::Center,
            fixed_width: false,
            kind: ColumnKind::Text,
        }
    }

    /// Turn this column into the row actions column.
    pub fn actions(mut self) -> Self {
        self.kind = ColumnKind::Actions;
        self
    }

    /// Keep the column from being resized by the host.
    pub fn fixed(mut self) -> Self {
        self.fixed_width = true;
        self
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn header_alignment(&self) -> Alignment {
        self.header_alignment
    }

    pub fn content_alignment(&self) -> Alignment {
        self.content_alignment
    }

    pub fn is_fixed_width(&self) -> bool {
        self.fixed_width
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn is_actions(&self) -> bool {
        self.kind == ColumnKind::Actions
    }
}

/// One column's data for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) column_id: ColumnId,
    pub(crate) row_id: RowId,
    pub(crate) text: String,
    pub(crate) edit_text: String,
    pub(crate) saved: bool,
}

impl Cell {
    /// Create a cell in display mode with the given committed text.
    pub fn new(
        column_id: ColumnId,
        row_id: RowId,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        Self {
            column_id,
            row_id,
            edit_text: text.clone(),
            text,
            saved: true,
        }
    }

    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Id of the owning row. Lookup only, never an owning handle.
    pub fn row_id(&self) -> RowId {
        self.row_id
    }

    /// Committed display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Scratch buffer shown by the editor while the row is in edit mode.
    pub fn edit_text(&self) -> &str {
        &self.edit_text
    }

    /// `true` in display mode, `false` while the editor is open.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub(crate) fn open_editor(&mut self) {
        self.saved = false;
        self.edit_text.clone_from(&self.text);
    }

    pub(crate) fn commit(&mut self) {
        self.saved = true;
        self.text.clone_from(&self.edit_text);
    }

    pub(crate) fn discard(&mut self) {
        self.saved = true;
        self.edit_text.clone_from(&self.text);
    }
}

/// Node of the grid forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub(crate) id: RowId,
    pub(crate) cells: Vec<Cell>,
    pub(crate) children: Vec<Row>,
}

impl Row {
    /// Create a row with one empty display-mode cell per column.
    pub fn new(id: RowId, columns: &[Column]) -> Self {
        Self {
            id,
            cells: columns
                .iter()
                .map(|column| Cell::new(column.id, id, String::new()))
                .collect(),
            children: Vec::new(),
        }
    }

    /// Create a row whose cells are already in edit mode.
    pub(crate) fn blank(id: RowId, columns: &[Column]) -> Self {
        let mut row = Self::new(id, columns);
        for cell in &mut row.cells {
            cell.saved = false;
        }
        row
    }

    /// Append a child row.
    pub fn with_child(mut self, child: Row) -> Self {
        self.children.push(child);
        self
    }

    /// Set the committed text of the cell in `column_id`, if present.
    pub fn with_text(mut self, column_id: ColumnId, text: &str) -> Self {
        if let Some(cell) = self.cell_mut(column_id) {
            cell.text = text.to_string();
            cell.edit_text = text.to_string();
        }
        self
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn children(&self) -> &[Row] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Cell for a column, if the row has one.
    pub fn cell(&self, column_id: ColumnId) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.column_id == column_id)
    }

    pub(crate) fn cell_mut(
        &mut self,
        column_id: ColumnId,
    ) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|cell| cell.column_id == column_id)
    }

    /// Whether any cell is in edit mode.
    pub fn is_editing(&self) -> bool {
        self.cells.iter().any(|cell| !cell.saved)
    }

    pub(crate) fn open_editor(&mut self) {
        for cell in &mut self.cells {
            cell.open_editor();
        }
    }

    pub(crate) fn commit(&mut self) {
        for cell in &mut self.cells {
            cell.commit();
        }
    }

    pub(crate) fn discard(&mut self) {
        for cell in &mut self.cells {
            cell.discard();
        }
    }

    /// Visit this row and all of its descendants depth-first.
    pub(crate) fn visit(&self, visit: &mut impl FnMut(&Row, Option<RowId>)) {
        self.visit_with_parent(None, visit);
    }

    fn visit_with_parent(
        &self,
        parent: Option<RowId>,
        visit: &mut impl FnMut(&Row, Option<RowId>),
    ) {
        visit(self, parent);
        for child in &self.children {
            child.visit_with_parent(Some(self.id), visit);
        }
    }
}
