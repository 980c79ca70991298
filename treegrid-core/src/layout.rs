use serde::{Deserialize, Serialize};

use crate::model::{Cell, Column, ColumnId, RowId};
use crate::store::RowStore;

/// Padding subtracted from every cell.
pub const DEFAULT_CELL_PADDING: i32 = 4;
/// Fixed part of the primary column padding (expander glyph and gap).
pub const DEFAULT_INDENT_BASE: i32 = 23;
/// Extra primary column padding per tree level.
pub const DEFAULT_INDENT_STEP: i32 = 15;
/// Width used for cells whose column is not configured.
pub const DEFAULT_FALLBACK_WIDTH: u32 = 100;

/// Constants used to derive cell widths from tree position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub cell_padding: i32,
    pub indent_base: i32,
    pub indent_step: i32,
    pub fallback_width: u32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            cell_padding: DEFAULT_CELL_PADDING,
            indent_base: DEFAULT_INDENT_BASE,
            indent_step: DEFAULT_INDENT_STEP,
            fallback_width: DEFAULT_FALLBACK_WIDTH,
        }
    }
}

impl LayoutMetrics {
    /// Horizontal space reserved for indentation at `depth`.
    pub fn indent(&self, depth: usize) -> i32 {
        let depth = i32::try_from(depth).unwrap_or(i32::MAX);
        self.indent_base
            .saturating_add(depth.saturating_mul(self.indent_step))
    }
}

/// Number of ancestor hops from `row` to a root.
///
/// Walks the live parent index on every call; unknown rows report `0`.
pub fn depth(store: &RowStore, row: RowId) -> usize {
    let mut level = 0;
    let mut parent = store.parent_id(row);
    while let Some(id) = parent {
        level += 1;
        parent = store.parent_id(id);
    }
    level
}

/// Width available to the content of `cell`.
///
/// The configured column width minus a fixed padding; the primary column
/// instead reserves room for indentation proportional to the owning row's
/// depth. Narrow columns on deep rows can go negative.
pub fn cell_width(
    columns: &[Column],
    primary: Option<ColumnId>,
    metrics: &LayoutMetrics,
    store: &RowStore,
    cell: &Cell,
) -> i32 {
    let width = columns
        .iter()
        .find(|column| column.id == cell.column_id)
        .map(|column| column.width)
        .unwrap_or(metrics.fallback_width);
    let width = i32::try_from(width).unwrap_or(i32::MAX);

    let padding = if primary == Some(cell.column_id) {
        metrics.indent(depth(store, cell.row_id))
    } else {
        metrics.cell_padding
    };

    width.saturating_sub(padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    const PRIMARY: ColumnId = ColumnId::new(2);
    const LASTNAME: ColumnId = ColumnId::new(3);

    fn columns() -> Vec<Column> {
        vec![
            Column::new(PRIMARY, "Firstname", 120),
            Column::new(LASTNAME, "Lastname", 120),
            Column::new(ColumnId::new(4), "Narrow", 30),
        ]
    }

    fn row(id: u64) -> Row {
        Row::new(RowId::new(id), &columns())
    }

    fn nested_store() -> RowStore {
        RowStore::from_rows(vec![
            row(1).with_child(row(2).with_child(row(3).with_child(row(4)))),
        ])
    }

    fn width_of(store: &RowStore, row: u64, column: ColumnId) -> i32 {
        let row = store.find(RowId::new(row)).expect("row should exist");
        let cell = row.cell(column).expect("cell should exist");
        cell_width(
            &columns(),
            Some(PRIMARY),
            &LayoutMetrics::default(),
            store,
            cell,
        )
    }

    #[test]
    fn given_nested_rows_when_depth_computed_then_each_level_adds_one() {
        let store = nested_store();

        assert_eq!(depth(&store, RowId::new(1)), 0);
        for id in 2..=4 {
            let parent = store.parent_id(RowId::new(id)).expect("has parent");
            assert_eq!(
                depth(&store, RowId::new(id)),
                depth(&store, parent) + 1
            );
        }
        assert_eq!(depth(&store, RowId::new(99)), 0);
    }

    #[test]
    fn given_primary_column_at_depth_two_when_width_computed_then_indent_is_reserved()
     {
        let store = nested_store();

        assert_eq!(width_of(&store, 3, PRIMARY), 120 - (23 + 2 * 15));
        assert_eq!(width_of(&store, 3, PRIMARY), 67);
    }

    #[test]
    fn given_secondary_column_when_width_computed_then_fixed_padding_applies() {
        let store = nested_store();

        assert_eq!(width_of(&store, 1, LASTNAME), 116);
        assert_eq!(width_of(&store, 4, LASTNAME), 116);
    }

    #[test]
    fn given_root_primary_cell_when_width_computed_then_base_indent_applies() {
        let store = nested_store();

        assert_eq!(width_of(&store, 1, PRIMARY), 97);
    }

    #[test]
    fn given_row_moved_to_root_when_width_recomputed_then_live_tree_is_used() {
        let mut store = nested_store();
        assert_eq!(width_of(&store, 2, PRIMARY), 82);

        let moved = store.remove(RowId::new(2)).expect("row should exist");
        store.insert_at(moved, 0, Some(RowId::new(1)));
        let sub = store.remove(RowId::new(4)).expect("row should exist");
        store.insert_at(sub, 0, None);

        assert_eq!(width_of(&store, 4, PRIMARY), 97);
    }

    #[test]
    fn given_narrow_primary_column_on_deep_row_when_width_computed_then_result_is_negative()
     {
        let store = nested_store();
        let row = store.find(RowId::new(4)).expect("row should exist");
        let cell = row.cell(ColumnId::new(4)).expect("cell should exist");

        let width = cell_width(
            &columns(),
            Some(ColumnId::new(4)),
            &LayoutMetrics::default(),
            &store,
            cell,
        );

        assert_eq!(width, 30 - (23 + 3 * 15));
        assert!(width < 0);
    }

    #[test]
    fn given_unconfigured_column_when_width_computed_then_fallback_is_used() {
        let store = nested_store();
        let cell = Cell::new(ColumnId::new(77), RowId::new(1), "");

        let width = cell_width(
            &columns(),
            Some(PRIMARY),
            &LayoutMetrics::default(),
            &store,
            &cell,
        );

        assert_eq!(width, 96);
    }
}
