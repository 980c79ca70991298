#[path = "subscription.rs"]
mod subscription;
#[path = "update.rs"]
mod update;
#[path = "view.rs"]
pub(crate) mod view;

use std::collections::HashSet;

use iced::{Element, Subscription, Task, Theme};
use treegrid_core::{
    GridConfig, GridController, GridEvent, PointerKind, PointerTarget, RowId,
    load_initial_grid_config,
};

pub(crate) const MIN_WINDOW_WIDTH: f32 = 640.0;
pub(crate) const MIN_WINDOW_HEIGHT: f32 = 400.0;

/// App-wide events that drive the root update loop.
#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    // Grid intents
    Grid(GridEvent),
    // Pointer input routed through the row toggle guard
    Pointer {
        target: PointerTarget,
        kind: PointerKind,
    },
    RowHovered(Option<RowId>),
    // Direct operations
    Keyboard(iced::keyboard::Event),
}

/// Root application state.
pub(crate) struct App {
    pub(crate) grid: GridController,
    /// Rows whose children are hidden.
    pub(crate) collapsed: HashSet<RowId>,
    pub(crate) hovered: Option<RowId>,
    /// Widget id attached to the text input of the active cell.
    pub(crate) editor_id: iced::widget::Id,
}

impl App {
    /// Initialize the application and return the first task.
    pub(crate) fn new() -> (Self, Task<AppEvent>) {
        let config = load_initial_grid_config();
        (Self::with_config(&config), Task::none())
    }

    pub(crate) fn with_config(config: &GridConfig) -> Self {
        Self {
            grid: GridController::from_config(config),
            collapsed: HashSet::new(),
            hovered: None,
            editor_id: iced::widget::Id::unique(),
        }
    }

    pub(crate) fn title(&self) -> String {
        match self.grid.current_edit_row_id() {
            Some(row) => format!("TreeGrid - editing row {row}"),
            None => String::from("TreeGrid"),
        }
    }

    pub(crate) fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub(crate) fn update(&mut self, event: AppEvent) -> Task<AppEvent> {
        update::update(self, event)
    }

    pub(crate) fn view(&self) -> Element<'_, AppEvent, Theme, iced::Renderer> {
        view::view(self)
    }

    pub(crate) fn subscription(&self) -> Subscription<AppEvent> {
        subscription::subscription(self)
    }

    /// Whether the children of `row` are rendered.
    pub(crate) fn is_expanded(&self, row: RowId) -> bool {
        !self.collapsed.contains(&row)
    }
}
