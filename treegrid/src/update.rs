use iced::Task;
use iced::keyboard::Key;
use iced::keyboard::key::Named;
use iced::widget::operation;
use treegrid_core::{
    ChromeControl, EditorKey, GridEffect, GridEvent, PointerKind,
    PointerTarget, RowId, RowToggleGuard, row_toggle_guard,
};

use crate::app::{App, AppEvent};

/// Root update loop.
pub(super) fn update(app: &mut App, event: AppEvent) -> Task<AppEvent> {
    match event {
        AppEvent::Grid(event) => apply_grid_event(app, event),
        AppEvent::Pointer { target, kind } => handle_pointer(app, target, kind),
        AppEvent::RowHovered(row) => {
            app.hovered = row;
            Task::none()
        },
        AppEvent::Keyboard(event) => handle_keyboard(app, event),
    }
}

fn apply_grid_event(app: &mut App, event: GridEvent) -> Task<AppEvent> {
    let effects = app.grid.reduce(event);
    let tasks: Vec<Task<AppEvent>> = effects
        .into_iter()
        .map(|effect| run_effect(app, effect))
        .collect();
    Task::batch(tasks)
}

fn run_effect(app: &mut App, effect: GridEffect) -> Task<AppEvent> {
    match effect {
        GridEffect::LayoutChanged => {
            let store = app.grid.store();
            app.collapsed.retain(|row| store.contains(*row));
            if app.hovered.is_some_and(|row| !store.contains(row)) {
                app.hovered = None;
            }
            Task::none()
        },
        GridEffect::FocusEditor { row, column } => {
            for ancestor in app.grid.store().ancestors(row) {
                app.collapsed.remove(&ancestor);
            }
            log::debug!("focusing editor of row {row}, column {column}");
            operation::focus(app.editor_id.clone())
                .chain(operation::select_all(app.editor_id.clone()))
        },
    }
}

fn handle_pointer(
    app: &mut App,
    target: PointerTarget,
    kind: PointerKind,
) -> Task<AppEvent> {
    if row_toggle_guard(&target) == RowToggleGuard::Stop {
        // Chrome handles its own input; the row never sees it.
        return match (target, kind) {
            (PointerTarget::Chrome { row, control }, PointerKind::Press) => {
                apply_grid_event(app, chrome_event(row, control))
            },
            _ => Task::none(),
        };
    }

    match (target, kind) {
        (PointerTarget::RowBody(row), PointerKind::Press) => {
            apply_grid_event(app, GridEvent::RowSelected(Some(row)))
        },
        (PointerTarget::RowBody(row), PointerKind::DoubleClick) => {
            toggle_row(app, row);
            Task::none()
        },
        (PointerTarget::Background, PointerKind::Press) => {
            apply_grid_event(app, GridEvent::RowSelected(None))
        },
        _ => Task::none(),
    }
}

fn chrome_event(row: RowId, control: ChromeControl) -> GridEvent {
    match control {
        ChromeControl::Edit => GridEvent::EditRow(row),
        ChromeControl::Remove => GridEvent::RemoveRow(row),
        ChromeControl::Save => GridEvent::SaveRow(row),
        ChromeControl::Cancel => GridEvent::CancelEdit(row),
        ChromeControl::Editor(column) => GridEvent::CellFocused { column },
    }
}

fn toggle_row(app: &mut App, row: RowId) {
    let has_children =
        app.grid.find_row(row).is_some_and(|row| row.has_children());
    if !has_children {
        return;
    }
    if !app.collapsed.remove(&row) {
        app.collapsed.insert(row);
    }
}

fn handle_keyboard(
    app: &mut App,
    event: iced::keyboard::Event,
) -> Task<AppEvent> {
    if let iced::keyboard::Event::KeyPressed { key, .. } = event {
        if app.grid.current_edit_row_id().is_some() {
            let key = editor_key(&key);
            return apply_grid_event(app, GridEvent::KeyDown(key));
        }
    }

    Task::none()
}

fn editor_key(key: &Key) -> EditorKey {
    if matches!(key, Key::Named(Named::Escape)) {
        EditorKey::Escape
    } else {
        EditorKey::Other
    }
}
