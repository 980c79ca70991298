use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::GridConfigError;
use crate::layout::LayoutMetrics;
use crate::model::{Column, ColumnId};

/// Column that carries the tree indentation by default.
pub const DEFAULT_PRIMARY_COLUMN: ColumnId = ColumnId::new(2);

/// Grid configuration file.
///
/// Every section is optional. Omitted columns fall back to the default
/// column set; omitted rows leave the grid empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_columns")]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_column: Option<ColumnId>,
    #[serde(default)]
    pub layout: LayoutMetrics,
    #[serde(default)]
    pub rows: Vec<RowSeed>,
}

/// Row created when the grid starts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowSeed {
    #[serde(default)]
    pub cells: Vec<CellSeed>,
    #[serde(default)]
    pub children: Vec<RowSeed>,
}

/// Committed text of one seeded cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSeed {
    pub column: ColumnId,
    #[serde(default)]
    pub text: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            primary_column: Some(DEFAULT_PRIMARY_COLUMN),
            layout: LayoutMetrics::default(),
            rows: vec![RowSeed {
                cells: vec![CellSeed {
                    column: DEFAULT_PRIMARY_COLUMN,
                    text: String::from("krishnan"),
                }],
                children: Vec::new(),
            }],
        }
    }
}

fn default_columns() -> Vec<Column> {
    vec![
        Column::new(DEFAULT_PRIMARY_COLUMN, "Firstname", 120),
        Column::new(ColumnId::new(3), "Lastname", 120),
        Column::new(ColumnId::new(5), "company", 120),
        Column::new(ColumnId::new(7), "Edit/Delete", 100)
            .actions()
            .fixed(),
    ]
}

impl GridConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(content: &str) -> Result<Self, GridConfigError> {
        let config: GridConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that column ids are unique and every reference resolves.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        let mut ids = HashSet::new();
        for column in &self.columns {
            if !ids.insert(column.id()) {
                return Err(GridConfigError::DuplicateColumn(column.id()));
            }
        }

        if let Some(primary) = self.primary_column {
            if !ids.contains(&primary) {
                return Err(GridConfigError::UnknownPrimaryColumn(primary));
            }
        }

        let mut pending: Vec<&RowSeed> = self.rows.iter().collect();
        while let Some(seed) = pending.pop() {
            if let Some(cell) =
                seed.cells.iter().find(|cell| !ids.contains(&cell.column))
            {
                return Err(GridConfigError::UnknownSeedColumn(cell.column));
            }
            pending.extend(seed.children.iter());
        }
        Ok(())
    }
}

/// Return the path to the grid configuration file.
pub fn grid_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("treegrid")
            .join("grid.json");
    }
    std::env::temp_dir().join("treegrid").join("grid.json")
}

/// Load the grid configuration from `path`. A missing file yields the
/// default configuration.
pub fn load_grid_config_from(
    path: &Path,
) -> Result<GridConfig, GridConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(GridConfig::default());
        },
        Err(err) => return Err(err.into()),
    };
    GridConfig::from_json_str(&content)
}

/// Load the grid configuration from its default location.
pub fn load_grid_config() -> Result<GridConfig, GridConfigError> {
    load_grid_config_from(&grid_config_path())
}

/// Load the grid configuration, falling back to defaults on error.
pub fn load_initial_grid_config() -> GridConfig {
    match load_grid_config() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Failed to load grid config, using defaults: {err}");
            GridConfig::default()
        },
    }
}
