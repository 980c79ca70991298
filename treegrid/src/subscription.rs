use iced::{Event, Subscription, event};

use crate::app::{App, AppEvent};

/// Build the active subscription set from current app state.
///
/// Keyboard events are taken whether or not a widget captured them, so
/// Escape reaches the grid while an editor holds focus.
pub(super) fn subscription(_app: &App) -> Subscription<AppEvent> {
    event::listen_with(|event, _status, _window| match event {
        Event::Keyboard(event) => Some(AppEvent::Keyboard(event)),
        _ => None,
    })
}
