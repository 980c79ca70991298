use std::collections::{HashMap, HashSet};

use crate::model::{Row, RowId};

/// Rooted forest of rows.
///
/// Rows are owned by their parent's child list (or by the root list). A
/// separate `row id -> parent id` index answers structural queries without
/// walking the whole forest, so parent lookups are O(1) and locating a row is
/// O(depth * siblings).
#[derive(Debug, Clone)]
pub struct RowStore {
    roots: Vec<Row>,
    parents: HashMap<RowId, Option<RowId>>,
    next_id: u64,
    layout_revision: u64,
}

impl Default for RowStore {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            parents: HashMap::new(),
            next_id: 1,
            layout_revision: 0,
        }
    }
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store whose root list holds `rows` in order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut store = Self::new();
        for row in rows {
            let index = store.roots.len();
            store.insert_at(row, index, None);
        }
        store
    }

    /// Reserve a fresh id that is not used anywhere in the forest.
    pub fn next_row_id(&mut self) -> RowId {
        let id = RowId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Root-level rows in display order.
    pub fn roots(&self) -> &[Row] {
        &self.roots
    }

    /// Number of rows in the forest, descendants included.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.parents.contains_key(&id)
    }

    /// Counter bumped after every structural mutation.
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    /// Id of the owning parent; `None` for roots and unknown rows.
    pub fn parent_id(&self, id: RowId) -> Option<RowId> {
        self.parents.get(&id).copied().flatten()
    }

    /// Owning parent row; `None` for roots and unknown rows.
    pub fn parent(&self, id: RowId) -> Option<&Row> {
        self.find(self.parent_id(id)?)
    }

    /// Ancestor ids, nearest first.
    pub fn ancestors(&self, id: RowId) -> Vec<RowId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent_id(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent_id(parent);
        }
        ancestors
    }

    /// Locate a row anywhere in the forest.
    pub fn find(&self, id: RowId) -> Option<&Row> {
        let path = self.path_to(id)?;
        let mut list = &self.roots;
        let mut found = None;
        for step in path {
            let row = list.iter().find(|row| row.id == step)?;
            list = &row.children;
            found = Some(row);
        }
        found
    }

    /// Locate a row anywhere in the forest for mutation.
    pub(crate) fn find_mut(&mut self, id: RowId) -> Option<&mut Row> {
        let path = self.path_to(id)?;
        let (last, ancestors) = path.split_last()?;
        let mut list = &mut self.roots;
        for step in ancestors {
            let row = list.iter_mut().find(|row| row.id == *step)?;
            list = &mut row.children;
        }
        list.iter_mut().find(|row| row.id == *last)
    }

    /// Child list of `parent`, or the root list for `None`.
    pub fn children_of(&self, parent: Option<RowId>) -> Option<&[Row]> {
        match parent {
            None => Some(&self.roots),
            Some(id) => self.find(id).map(|row| row.children.as_slice()),
        }
    }

    /// Sibling list the row lives in, the row itself included.
    pub fn siblings(&self, id: RowId) -> Option<&[Row]> {
        if !self.contains(id) {
            return None;
        }
        self.children_of(self.parent_id(id))
    }

    /// Index of the row within its sibling list.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.siblings(id)?.iter().position(|row| row.id == id)
    }

    /// Insert `row` (with its subtree) into the child list of `parent`, or the
    /// root list when `parent` is `None`.
    ///
    /// `index` is clamped to the list bounds. Returns `false` without touching
    /// the forest when the parent is unknown or any id of the inserted subtree
    /// is already taken.
    pub fn insert_at(
        &mut self,
        row: Row,
        index: usize,
        parent: Option<RowId>,
    ) -> bool {
        if let Some(parent_id) = parent {
            if !self.contains(parent_id) {
                log::debug!("row insert skipped: parent {parent_id} not found");
                return false;
            }
        }

        let mut subtree = Vec::new();
        row.visit(&mut |node: &Row, node_parent: Option<RowId>| {
            subtree.push((node.id, node_parent));
        });
        let unique: HashSet<RowId> =
            subtree.iter().map(|(id, _)| *id).collect();
        if unique.len() != subtree.len()
            || unique.iter().any(|id| self.contains(*id))
        {
            log::warn!("row insert skipped: row {} has a duplicate id", row.id);
            return false;
        }

        let Some(list) = self.children_list_mut(parent) else {
            return false;
        };
        let index = index.min(list.len());
        list.insert(index, row);

        for (id, node_parent) in subtree {
            self.parents.insert(id, node_parent.or(parent));
            self.next_id = self.next_id.max(id.get().saturating_add(1));
        }
        self.refresh_layout();
        true
    }

    /// Detach a row and its subtree. `None` when the row is not in the store.
    pub fn remove(&mut self, id: RowId) -> Option<Row> {
        if !self.contains(id) {
            return None;
        }
        let parent = self.parent_id(id);
        let list = self.children_list_mut(parent)?;
        let index = list.iter().position(|row| row.id == id)?;
        let row = list.remove(index);

        row.visit(&mut |node: &Row, _| {
            self.parents.remove(&node.id);
        });
        self.refresh_layout();
        Some(row)
    }

    /// Relocate a row to the last position of its own sibling list.
    pub fn move_to_end(&mut self, id: RowId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let parent = self.parent_id(id);
        let Some(list) = self.children_list_mut(parent) else {
            return false;
        };
        let Some(index) = list.iter().position(|row| row.id == id) else {
            return false;
        };
        let row = list.remove(index);
        list.push(row);
        self.refresh_layout();
        true
    }

    fn children_list_mut(
        &mut self,
        parent: Option<RowId>,
    ) -> Option<&mut Vec<Row>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self.find_mut(id).map(|row| &mut row.children),
        }
    }

    /// Ids from the root down to `id`, inclusive.
    fn path_to(&self, id: RowId) -> Option<Vec<RowId>> {
        if !self.contains(id) {
            return None;
        }
        let mut path = self.ancestors(id);
        path.reverse();
        path.push(id);
        Some(path)
    }

    fn refresh_layout(&mut self) {
        self.layout_revision = self.layout_revision.wrapping_add(1);
        log::trace!("grid layout refresh #{}", self.layout_revision);
    }
}

/// Row visible in a depth-first rendering of the forest.
#[derive(Debug, Clone, Copy)]
pub struct FlattenedRow<'a> {
    /// Zero-based tree depth (`0` for root-level rows).
    pub depth: usize,
    /// Borrowed source row.
    pub row: &'a Row,
}

/// Flatten rows into depth-first display order.
///
/// Children are included only when `is_expanded(row)` holds; sibling order is
/// kept as stored.
pub fn flatten_rows<'a>(
    rows: &'a [Row],
    is_expanded: &impl Fn(&Row) -> bool,
) -> Vec<FlattenedRow<'a>> {
    let mut entries = Vec::new();
    for row in rows {
        push_row(row, 0, is_expanded, &mut entries);
    }
    entries
}

fn push_row<'a>(
    row: &'a Row,
    depth: usize,
    is_expanded: &impl Fn(&Row) -> bool,
    entries: &mut Vec<FlattenedRow<'a>>,
) {
    entries.push(FlattenedRow { depth, row });
    if row.has_children() && is_expanded(row) {
        for child in &row.children {
            push_row(child, depth + 1, is_expanded, entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnId};

    fn columns() -> Vec<Column> {
        vec![Column::new(ColumnId::new(2), "Firstname", 120)]
    }

    fn row(id: u64) -> Row {
        Row::new(RowId::new(id), &columns())
    }

    fn ids(rows: &[Row]) -> Vec<u64> {
        rows.iter().map(|row| row.id().get()).collect()
    }

    #[test]
    fn given_nested_rows_when_store_built_then_parents_are_indexed() {
        let store = RowStore::from_rows(vec![
            row(1).with_child(row(2).with_child(row(3))),
        ]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.parent_id(RowId::new(1)), None);
        assert_eq!(store.parent_id(RowId::new(2)), Some(RowId::new(1)));
        assert_eq!(store.parent_id(RowId::new(3)), Some(RowId::new(2)));
        assert_eq!(
            store.ancestors(RowId::new(3)),
            vec![RowId::new(2), RowId::new(1)]
        );
        let found = store.find(RowId::new(3)).expect("row should exist");
        assert_eq!(found.id(), RowId::new(3));
    }

    #[test]
    fn given_unknown_row_when_queried_then_none_is_returned() {
        let store = RowStore::from_rows(vec![row(1)]);

        assert!(store.find(RowId::new(42)).is_none());
        assert!(store.parent(RowId::new(42)).is_none());
        assert!(store.siblings(RowId::new(42)).is_none());
        assert!(store.ancestors(RowId::new(42)).is_empty());
    }

    #[test]
    fn given_out_of_range_index_when_inserting_then_index_is_clamped() {
        let mut store = RowStore::from_rows(vec![row(1), row(2)]);

        assert!(store.insert_at(row(3), 99, None));

        assert_eq!(ids(store.roots()), vec![1, 2, 3]);
    }

    #[test]
    fn given_parent_when_inserting_at_front_then_row_becomes_first_child() {
        let mut store = RowStore::from_rows(vec![row(1).with_child(row(2))]);

        assert!(store.insert_at(row(3), 0, Some(RowId::new(1))));

        let parent = store.find(RowId::new(1)).expect("parent should exist");
        assert_eq!(ids(parent.children()), vec![3, 2]);
        assert_eq!(store.parent_id(RowId::new(3)), Some(RowId::new(1)));
    }

    #[test]
    fn given_missing_parent_when_inserting_then_store_is_unchanged() {
        let mut store = RowStore::from_rows(vec![row(1)]);
        let revision = store.layout_revision();

        assert!(!store.insert_at(row(3), 0, Some(RowId::new(9))));

        assert_eq!(store.len(), 1);
        assert_eq!(store.layout_revision(), revision);
    }

    #[test]
    fn given_duplicate_id_when_inserting_then_row_is_rejected() {
        let mut store = RowStore::from_rows(vec![row(1).with_child(row(2))]);

        assert!(!store.insert_at(row(2), 0, None));
        assert!(!store.insert_at(row(5).with_child(row(5)), 0, None));

        assert_eq!(ids(store.roots()), vec![1]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn given_row_with_subtree_when_removed_then_every_descendant_is_unindexed() {
        let mut store = RowStore::from_rows(vec![
            row(1).with_child(row(2).with_child(row(3))),
            row(4),
        ]);

        let removed =
            store.remove(RowId::new(2)).expect("row should be removed");

        assert_eq!(removed.children().len(), 1);
        assert!(!store.contains(RowId::new(2)));
        assert!(!store.contains(RowId::new(3)));
        assert_eq!(store.len(), 2);
        assert!(store.remove(RowId::new(2)).is_none());
    }

    #[test]
    fn given_first_sibling_when_moved_to_end_then_others_keep_their_order() {
        let mut store =
            RowStore::from_rows(vec![row(1), row(2), row(3), row(4)]);

        assert!(store.move_to_end(RowId::new(1)));

        assert_eq!(ids(store.roots()), vec![2, 3, 4, 1]);
        assert_eq!(store.position(RowId::new(1)), Some(3));
    }

    #[test]
    fn given_structural_mutations_when_applied_then_layout_revision_advances() {
        let mut store = RowStore::new();
        let start = store.layout_revision();

        store.insert_at(row(1), 0, None);
        store.insert_at(row(2), 0, None);
        store.move_to_end(RowId::new(2));
        store.remove(RowId::new(1));

        assert_eq!(store.layout_revision(), start + 4);
    }

    #[test]
    fn given_seeded_ids_when_next_id_requested_then_it_is_not_taken() {
        let mut store = RowStore::from_rows(vec![row(11)]);

        let id = store.next_row_id();

        assert!(id.get() > 11);
        assert!(!store.contains(id));
    }

    #[test]
    fn given_collapsed_row_when_flattened_then_children_are_hidden() {
        let store = RowStore::from_rows(vec![
            row(1).with_child(row(2).with_child(row(3))),
            row(4).with_child(row(5)),
        ]);

        let collapsed = RowId::new(4);
        let entries =
            flatten_rows(store.roots(), &|row: &Row| row.id() != collapsed);

        let visible: Vec<(u64, usize)> = entries
            .iter()
            .map(|entry| (entry.row.id().get(), entry.depth))
            .collect();
        assert_eq!(visible, vec![(1, 0), (2, 1), (3, 2), (4, 0)]);
    }
}
