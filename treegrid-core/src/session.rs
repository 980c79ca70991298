use crate::model::{ColumnId, RowId};

/// Row currently in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEdit {
    pub row: RowId,
    pub active_cell: Option<ColumnId>,
    pub is_new: bool,
}

/// Single edit slot of the grid. At most one row is ever in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(ActiveEdit),
}

impl EditSession {
    pub fn active(&self) -> Option<&ActiveEdit> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(edit) => Some(edit),
        }
    }

    pub fn active_row(&self) -> Option<RowId> {
        self.active().map(|edit| edit.row)
    }

    pub fn active_cell(&self) -> Option<ColumnId> {
        self.active().and_then(|edit| edit.active_cell)
    }

    /// `true` when the edited row was created by this session.
    pub fn is_new_row(&self) -> bool {
        self.active().is_some_and(|edit| edit.is_new)
    }

    pub fn is_editing(&self, row: RowId) -> bool {
        self.active_row() == Some(row)
    }

    pub(crate) fn begin(
        &mut self,
        row: RowId,
        active_cell: Option<ColumnId>,
        is_new: bool,
    ) {
        *self = EditSession::Editing(ActiveEdit {
            row,
            active_cell,
            is_new,
        });
    }

    /// Leave edit mode, returning what was being edited.
    pub(crate) fn take(&mut self) -> Option<ActiveEdit> {
        match std::mem::take(self) {
            EditSession::Idle => None,
            EditSession::Editing(edit) => Some(edit),
        }
    }

    pub(crate) fn focus_cell(&mut self, column: ColumnId) {
        if let EditSession::Editing(edit) = self {
            edit.active_cell = Some(column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_idle_session_when_queried_then_nothing_is_active() {
        let session = EditSession::default();

        assert_eq!(session.active_row(), None);
        assert_eq!(session.active_cell(), None);
        assert!(!session.is_new_row());
    }

    #[test]
    fn given_second_begin_when_editing_then_previous_edit_is_replaced() {
        let mut session = EditSession::default();
        session.begin(RowId::new(1), Some(ColumnId::new(2)), true);

        session.begin(RowId::new(2), None, false);

        assert!(session.is_editing(RowId::new(2)));
        assert!(!session.is_editing(RowId::new(1)));
        assert!(!session.is_new_row());
    }

    #[test]
    fn given_editing_session_when_taken_then_session_is_idle() {
        let mut session = EditSession::default();
        session.begin(RowId::new(4), Some(ColumnId::new(2)), true);

        let edit = session.take().expect("edit should be active");

        assert_eq!(edit.row, RowId::new(4));
        assert!(edit.is_new);
        assert_eq!(session, EditSession::Idle);
        assert!(session.take().is_none());
    }

    #[test]
    fn given_idle_session_when_focusing_cell_then_nothing_changes() {
        let mut session = EditSession::default();

        session.focus_cell(ColumnId::new(3));

        assert_eq!(session.active_cell(), None);
        assert!(!session.is_editing(RowId::new(1)));
    }
}
