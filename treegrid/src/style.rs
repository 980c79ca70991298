use iced::widget::container;
use iced::{Border, Color, Theme};

pub(crate) fn grid_row_style(
    theme: &Theme,
    is_selected: bool,
    is_hovered: bool,
    is_editing: bool,
) -> container::Style {
    let palette = theme.extended_palette();
    let background = if is_editing {
        let mut color = palette.primary.weak.color;
        color.a = 0.35;
        Some(color.into())
    } else if is_selected {
        let mut color = palette.primary.strong.color;
        color.a = 0.6;
        Some(color.into())
    } else if is_hovered {
        let mut color = palette.background.strong.color;
        color.a = 0.6;
        Some(color.into())
    } else {
        None
    };

    container::Style {
        background,
        text_color: Some(palette.background.base.text),
        ..Default::default()
    }
}

pub(crate) fn header_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        text_color: Some(palette.background.weak.text),
        border: Border {
            width: 0.5,
            color: palette.background.strong.color,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

pub(crate) fn cell_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let mut color = palette.background.strong.color;
    color.a = 0.4;
    container::Style {
        border: Border {
            width: 0.5,
            color,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

/// Text color for the expand/collapse glyph.
pub(crate) fn expander_color(theme: &Theme) -> Color {
    theme.extended_palette().background.strong.text
}
