//! Inline row editing and hierarchy management for tree grids.
//!
//! This crate is UI-agnostic and split into small layers:
//! - the row forest ([`RowStore`], [`Row`], [`Cell`]) with a parent index;
//! - layout helpers ([`depth`], [`cell_width`]) derived from tree position;
//! - the edit lifecycle ([`GridController`], [`EditSession`]) driven by
//!   [`GridEvent`]s and answering with [`GridEffect`]s;
//! - pointer guards ([`row_toggle_guard`]) for the host's dispatch layer;
//! - configuration loading ([`GridConfig`], [`load_initial_grid_config`]).
//!
//! The recommended flow for a host:
//! 1. build the controller from [`load_initial_grid_config`];
//! 2. map UI input onto [`GridEvent`] and feed it to
//!    [`GridController::reduce`];
//! 3. rebuild cached layout on [`GridEffect::LayoutChanged`] and focus the
//!    editor input on [`GridEffect::FocusEditor`] once the next view is
//!    built.
//!
//! # Quick Example
//!
//! ```
//! use treegrid_core::{GridConfig, GridController, GridEffect, GridEvent};
//!
//! let mut grid = GridController::from_config(&GridConfig::default());
//! let effects = grid.reduce(GridEvent::AddRoot);
//! let row = grid.current_edit_row_id().expect("new row is being edited");
//! assert!(effects.contains(&GridEffect::LayoutChanged));
//!
//! let column = grid.active_cell().expect("first column is active");
//! grid.reduce(GridEvent::EditTextChanged {
//!     row,
//!     column,
//!     value: String::from("Alice"),
//! });
//! grid.reduce(GridEvent::SaveRow(row));
//!
//! assert_eq!(grid.rows().last().map(|row| row.id()), Some(row));
//! ```

mod config;
mod controller;
mod errors;
mod event;
mod guards;
mod layout;
mod model;
mod session;
mod store;

pub use config::{
    CellSeed, DEFAULT_PRIMARY_COLUMN, GridConfig, RowSeed, grid_config_path,
    load_grid_config, load_grid_config_from, load_initial_grid_config,
};
pub use controller::GridController;
pub use errors::GridConfigError;
pub use event::{EditorKey, GridEffect, GridEvent};
pub use guards::{
    ChromeControl, PointerKind, PointerTarget, RowToggleGuard,
    belongs_to_editor_chrome, row_toggle_guard,
};
pub use layout::{
    DEFAULT_CELL_PADDING, DEFAULT_FALLBACK_WIDTH, DEFAULT_INDENT_BASE,
    DEFAULT_INDENT_STEP, LayoutMetrics, cell_width, depth,
};
pub use model::{Alignment, Cell, Column, ColumnId, ColumnKind, Row, RowId};
pub use session::{ActiveEdit, EditSession};
pub use store::{FlattenedRow, RowStore, flatten_rows};
