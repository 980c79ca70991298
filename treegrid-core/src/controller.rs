use crate::config::{GridConfig, RowSeed};
use crate::event::{EditorKey, GridEffect, GridEvent};
use crate::layout::{self, LayoutMetrics};
use crate::model::{Cell, Column, ColumnId, Row, RowId};
use crate::session::{ActiveEdit, EditSession};
use crate::store::RowStore;

/// Owns the row forest and the edit session and applies every row
/// lifecycle operation of the grid.
///
/// All operations are synchronous and never fail: unknown ids and
/// operations whose preconditions do not hold are silent no-ops that
/// return no effects.
#[derive(Debug, Clone)]
pub struct GridController {
    columns: Vec<Column>,
    primary: Option<ColumnId>,
    metrics: LayoutMetrics,
    store: RowStore,
    session: EditSession,
    selected: Option<RowId>,
}

impl GridController {
    /// Create an empty grid.
    ///
    /// Without an explicit `primary` column the first text column gets the
    /// tree indentation.
    pub fn new(
        columns: Vec<Column>,
        primary: Option<ColumnId>,
        metrics: LayoutMetrics,
    ) -> Self {
        let primary = primary.or_else(|| {
            columns
                .iter()
                .find(|column| !column.is_actions())
                .map(Column::id)
        });
        Self {
            columns,
            primary,
            metrics,
            store: RowStore::new(),
            session: EditSession::Idle,
            selected: None,
        }
    }

    /// Create a grid from a loaded configuration, seeding its rows.
    pub fn from_config(config: &GridConfig) -> Self {
        let mut controller = Self::new(
            config.columns.clone(),
            config.primary_column,
            config.layout,
        );
        for seed in &config.rows {
            controller.seed_row(seed, None);
        }
        log::debug!("grid seeded with {} rows", controller.store.len());
        controller
    }

    fn seed_row(&mut self, seed: &RowSeed, parent: Option<RowId>) {
        let id = self.store.next_row_id();
        let row = seed.cells.iter().fold(
            Row::new(id, &self.columns),
            |row, cell| row.with_text(cell.column, &cell.text),
        );
        let index = self.store.children_of(parent).map_or(0, <[Row]>::len);
        if self.store.insert_at(row, index, parent) {
            for child in &seed.children {
                self.seed_row(child, Some(id));
            }
        }
    }

    // --- Read side ---

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Root-level rows in display order.
    pub fn rows(&self) -> &[Row] {
        self.store.roots()
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn current_edit_row_id(&self) -> Option<RowId> {
        self.session.active_row()
    }

    pub fn active_cell(&self) -> Option<ColumnId> {
        self.session.active_cell()
    }

    pub fn is_new_row(&self) -> bool {
        self.session.is_new_row()
    }

    pub fn selected_row(&self) -> Option<RowId> {
        self.selected
    }

    pub fn find_row(&self, id: RowId) -> Option<&Row> {
        self.store.find(id)
    }

    pub fn parent_of(&self, id: RowId) -> Option<&Row> {
        self.store.parent(id)
    }

    pub fn depth(&self, id: RowId) -> usize {
        layout::depth(&self.store, id)
    }

    /// Column that carries the tree indentation.
    pub fn primary_column(&self) -> Option<ColumnId> {
        self.primary
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn cell_width(&self, cell: &Cell) -> i32 {
        layout::cell_width(
            &self.columns,
            self.primary,
            &self.metrics,
            &self.store,
            cell,
        )
    }

    pub fn cell_width_at(&self, row: RowId, column: ColumnId) -> Option<i32> {
        let cell = self.store.find(row)?.cell(column)?;
        Some(self.cell_width(cell))
    }

    // --- Event entry point ---

    /// Apply a UI intent and return the effects the host has to perform.
    pub fn reduce(&mut self, event: GridEvent) -> Vec<GridEffect> {
        use GridEvent::*;

        match event {
            AddRoot => self.add_root(),
            AddChild => self.add_child(),
            EditRow(id) => self.edit_row(id),
            SaveRow(id) => self.save_row(id),
            CancelEdit(id) => self.cancel_edit(id),
            RemoveRow(id) => self.remove_row(id),
            EditTextChanged { row, column, value } => {
                self.set_edit_text(row, column, value);
                Vec::new()
            },
            CellFocused { column } => {
                self.focus_cell(column);
                Vec::new()
            },
            KeyDown(key) => self.key_down(key),
            RowSelected(id) => {
                self.select_row(id);
                Vec::new()
            },
        }
    }

    // --- Operations ---

    /// Insert a blank row at the top of the root list and start editing it.
    pub fn add_root(&mut self) -> Vec<GridEffect> {
        let mut effects = self.reset_session();
        effects.extend(self.insert_new_row(None));
        effects
    }

    /// Insert a blank row as the first child of the selected row and start
    /// editing it. Without a selection the row goes to the top of the root
    /// list.
    pub fn add_child(&mut self) -> Vec<GridEffect> {
        let mut effects = self.reset_session();
        let parent = self.selected.filter(|id| self.store.contains(*id));
        effects.extend(self.insert_new_row(parent));
        effects
    }

    /// Put an existing row into edit mode.
    pub fn edit_row(&mut self, id: RowId) -> Vec<GridEffect> {
        if !self.store.contains(id) || self.session.is_editing(id) {
            return Vec::new();
        }

        let mut effects = self.reset_session();
        let Some(row) = self.store.find_mut(id) else {
            return effects;
        };
        row.open_editor();

        let column = self.first_editable_column();
        self.session.begin(id, column, false);
        log::debug!("grid row {id} entered edit mode");
        if let Some(column) = column {
            effects.push(GridEffect::FocusEditor { row: id, column });
        }
        effects
    }

    /// Commit the edit buffer of the row being edited.
    ///
    /// A freshly added row moves behind all of its siblings.
    pub fn save_row(&mut self, id: RowId) -> Vec<GridEffect> {
        if !self.session.is_editing(id) {
            return Vec::new();
        }
        let Some(edit) = self.session.take() else {
            return Vec::new();
        };

        let mut effects = Vec::new();
        if let Some(row) = self.store.find_mut(id) {
            row.commit();
        }
        if edit.is_new && self.store.move_to_end(id) {
            effects.push(GridEffect::LayoutChanged);
        }
        log::debug!("grid row {id} saved (new: {})", edit.is_new);
        effects
    }

    /// Leave edit mode without committing. A freshly added row is removed.
    pub fn cancel_edit(&mut self, id: RowId) -> Vec<GridEffect> {
        if !self.session.is_editing(id) {
            return Vec::new();
        }
        match self.session.take() {
            Some(edit) => self.abandon(edit),
            None => Vec::new(),
        }
    }

    pub fn key_down(&mut self, key: EditorKey) -> Vec<GridEffect> {
        match (key, self.session.active_row()) {
            (EditorKey::Escape, Some(row)) => self.cancel_edit(row),
            _ => Vec::new(),
        }
    }

    /// Remove a row with its subtree.
    pub fn remove_row(&mut self, id: RowId) -> Vec<GridEffect> {
        if self.store.remove(id).is_none() {
            return Vec::new();
        }
        if let Some(active) = self.session.active_row() {
            if !self.store.contains(active) {
                self.session.take();
            }
        }
        self.prune_selection();
        log::debug!("grid row {id} removed");
        vec![GridEffect::LayoutChanged]
    }

    /// Write into the edit buffer of a cell of the row being edited and make
    /// that cell active.
    pub fn set_edit_text(
        &mut self,
        row: RowId,
        column: ColumnId,
        value: String,
    ) {
        if !self.session.is_editing(row) {
            return;
        }
        let Some(cell) = self
            .store
            .find_mut(row)
            .and_then(|row| row.cell_mut(column))
        else {
            return;
        };
        cell.edit_text = value;
        self.focus_cell(column);
    }

    /// Make `column` the active cell; the actions column never is.
    pub fn focus_cell(&mut self, column: ColumnId) {
        if self
            .columns
            .iter()
            .any(|c| c.id == column && !c.is_actions())
        {
            self.session.focus_cell(column);
        }
    }

    /// Change the selected row; unknown ids clear the selection.
    pub fn select_row(&mut self, id: Option<RowId>) {
        self.selected = id.filter(|id| self.store.contains(*id));
    }

    // --- Helpers ---

    fn insert_new_row(&mut self, parent: Option<RowId>) -> Vec<GridEffect> {
        let id = self.store.next_row_id();
        let row = Row::blank(id, &self.columns);
        if !self.store.insert_at(row, 0, parent) {
            return Vec::new();
        }

        let column = self.first_editable_column();
        self.session.begin(id, column, true);
        match parent {
            Some(parent) => log::debug!("grid row {id} added under {parent}"),
            None => log::debug!("grid row {id} added at root"),
        }

        let mut effects = vec![GridEffect::LayoutChanged];
        if let Some(column) = column {
            effects.push(GridEffect::FocusEditor { row: id, column });
        }
        effects
    }

    /// Clear a dangling edit before a new one starts.
    fn reset_session(&mut self) -> Vec<GridEffect> {
        match self.session.take() {
            Some(edit) => self.abandon(edit),
            None => Vec::new(),
        }
    }

    fn abandon(&mut self, edit: ActiveEdit) -> Vec<GridEffect> {
        if edit.is_new {
            if self.store.remove(edit.row).is_none() {
                return Vec::new();
            }
            self.prune_selection();
            log::debug!("grid row {} discarded", edit.row);
            return vec![GridEffect::LayoutChanged];
        }

        if let Some(row) = self.store.find_mut(edit.row) {
            row.discard();
            log::debug!("grid row {} left edit mode", edit.row);
        }
        Vec::new()
    }

    fn prune_selection(&mut self) {
        if self.selected.is_some_and(|id| !self.store.contains(id)) {
            self.selected = None;
        }
    }

    fn first_editable_column(&self) -> Option<ColumnId> {
        self.columns
            .iter()
            .find(|column| !column.is_actions())
            .or_else(|| self.columns.first())
            .map(Column::id)
    }
}
