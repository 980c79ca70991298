use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Space, button, column, container, mouse_area, row, scrollable, text,
    text_input,
};
use iced::{Element, Length, Theme};
use treegrid_core::{
    Alignment, Cell, ChromeControl, Column, FlattenedRow, GridEvent,
    PointerKind, PointerTarget, Row, RowId, flatten_rows,
};

use crate::app::{App, AppEvent};
use crate::style;

const ROW_HEIGHT: f32 = 28.0;
const HEADER_HEIGHT: f32 = 30.0;
const FONT_SIZE: f32 = 13.0;
const SPACING: f32 = 8.0;

type GridElement<'a> = Element<'a, AppEvent, Theme, iced::Renderer>;

/// Render the toolbar, column header and visible rows.
pub(crate) fn view(app: &App) -> GridElement<'_> {
    let toolbar = row![
        button(text("Add Root").size(FONT_SIZE))
            .on_press(AppEvent::Grid(GridEvent::AddRoot)),
        button(text("Add Child").size(FONT_SIZE))
            .on_press(AppEvent::Grid(GridEvent::AddChild)),
    ]
    .spacing(SPACING);

    let entries =
        flatten_rows(app.grid.rows(), &|row: &Row| app.is_expanded(row.id()));
    let rows: Vec<GridElement<'_>> = entries
        .into_iter()
        .map(|entry| render_row(app, entry))
        .collect();

    let body = mouse_area(
        scrollable(column(rows).spacing(0))
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .on_press(pointer(PointerTarget::Background, PointerKind::Press))
    .on_exit(AppEvent::RowHovered(None));

    container(column![toolbar, render_header(app), body].spacing(SPACING))
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_header(app: &App) -> GridElement<'_> {
    let cells = app.grid.columns().iter().map(|column| {
        let header: GridElement<'_> =
            container(text(column.header_text()).size(FONT_SIZE))
                .width(column_width(column))
                .height(Length::Fixed(HEADER_HEIGHT))
                .align_x(horizontal(column.header_alignment()))
                .align_y(Vertical::Center)
                .style(style::header_style)
                .into();
        header
    });

    row(cells).into()
}

fn render_row<'a>(app: &'a App, entry: FlattenedRow<'a>) -> GridElement<'a> {
    let row_id = entry.row.id();
    let is_editing = app.grid.session().is_editing(row_id);
    let is_selected = app.grid.selected_row() == Some(row_id);
    let is_hovered = app.hovered == Some(row_id);

    let cells = app
        .grid
        .columns()
        .iter()
        .map(|column| render_cell(app, entry, column, is_editing));
    let content = row(cells)
        .height(Length::Fixed(ROW_HEIGHT))
        .align_y(Vertical::Center);

    let styled_row = container(content).style(move |theme| {
        style::grid_row_style(theme, is_selected, is_hovered, is_editing)
    });

    mouse_area(styled_row)
        .on_enter(AppEvent::RowHovered(Some(row_id)))
        .on_press(pointer(PointerTarget::RowBody(row_id), PointerKind::Press))
        .on_double_click(pointer(
            PointerTarget::RowBody(row_id),
            PointerKind::DoubleClick,
        ))
        .into()
}

fn render_cell<'a>(
    app: &'a App,
    entry: FlattenedRow<'a>,
    column: &'a Column,
    is_editing: bool,
) -> GridElement<'a> {
    let row_id = entry.row.id();

    if column.is_actions() {
        return container(render_actions(row_id, is_editing))
            .width(column_width(column))
            .height(Length::Fill)
            .align_x(horizontal(column.content_alignment()))
            .align_y(Vertical::Center)
            .style(style::cell_style)
            .into();
    }

    let Some(cell) = entry.row.cell(column.id()) else {
        return container(Space::new())
            .width(column_width(column))
            .height(Length::Fill)
            .style(style::cell_style)
            .into();
    };

    let metrics = app.grid.metrics();
    let content_width = Length::Fixed(app.grid.cell_width(cell).max(0) as f32);
    let content = if is_editing {
        render_editor(app, row_id, column, cell, content_width)
    } else {
        text(cell.text())
            .size(FONT_SIZE)
            .width(content_width)
            .align_x(horizontal(column.content_alignment()))
            .into()
    };

    let lead: GridElement<'a> =
        if app.grid.primary_column() == Some(column.id()) {
            let offset = metrics.indent(entry.depth) - metrics.indent_base;
            row![
                Space::new().width(Length::Fixed(offset.max(0) as f32)),
                render_expander(app, entry.row),
            ]
            .into()
        } else {
            let padding = metrics.cell_padding.max(0) as f32 / 2.0;
            Space::new().width(Length::Fixed(padding)).into()
        };

    container(row![lead, content].align_y(Vertical::Center))
        .width(column_width(column))
        .height(Length::Fill)
        .align_y(Vertical::Center)
        .clip(true)
        .style(style::cell_style)
        .into()
}

fn render_expander<'a>(app: &App, row: &Row) -> GridElement<'a> {
    let width =
        Length::Fixed(app.grid.metrics().indent_base.max(0) as f32);
    if !row.has_children() {
        return Space::new().width(width).into();
    }

    let glyph = if app.is_expanded(row.id()) { "▾" } else { "▸" };
    container(text(glyph).size(FONT_SIZE).style(|theme: &Theme| {
        text::Style {
            color: Some(style::expander_color(theme)),
        }
    }))
    .width(width)
    .align_x(Horizontal::Center)
    .into()
}

fn render_editor<'a>(
    app: &'a App,
    row_id: RowId,
    column: &'a Column,
    cell: &'a Cell,
    width: Length,
) -> GridElement<'a> {
    let column_id = column.id();
    // Typing reports the cell as focused through `EditTextChanged`.
    let mut input = text_input("", cell.edit_text())
        .on_input(move |value| {
            AppEvent::Grid(GridEvent::EditTextChanged {
                row: row_id,
                column: column_id,
                value,
            })
        })
        .on_submit(AppEvent::Grid(GridEvent::SaveRow(row_id)))
        .size(FONT_SIZE)
        .width(width)
        .align_x(horizontal(column.content_alignment()));
    if app.grid.active_cell() == Some(column_id) {
        input = input.id(app.editor_id.clone());
    }

    input.into()
}

fn render_actions<'a>(row_id: RowId, is_editing: bool) -> GridElement<'a> {
    let controls = if is_editing {
        [(ChromeControl::Save, "Save"), (ChromeControl::Cancel, "Cancel")]
    } else {
        [(ChromeControl::Edit, "Edit"), (ChromeControl::Remove, "Delete")]
    };

    let buttons = controls.into_iter().map(|(control, label)| {
        let target = PointerTarget::Chrome {
            row: row_id,
            control,
        };
        let control: GridElement<'a> = container(
            button(text(label).size(FONT_SIZE - 1.0))
                .padding([1, 6])
                .on_press(pointer(target, PointerKind::Press)),
        )
        .padding(2)
        .into();
        control
    });

    row(buttons).spacing(2).align_y(Vertical::Center).into()
}

fn pointer(target: PointerTarget, kind: PointerKind) -> AppEvent {
    AppEvent::Pointer { target, kind }
}

fn column_width(column: &Column) -> Length {
    Length::Fixed(column.width() as f32)
}

fn horizontal(alignment: Alignment) -> Horizontal {
    match alignment {
        Alignment::Left => Horizontal::Left,
        Alignment::Center => Horizontal::Center,
        Alignment::Right => Horizontal::Right,
    }
}
