//! Pixel geometry and drawing of the month grid box

use embedded_graphics::{
    pixelcolor::Gray8,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
};

use super::text_styles::{FontSet, BLACK, LIGHT_GRAY, WHITE};
use crate::calendar_utils::{
    all_weekdays, calendar::COLUMNS, weekday_short_name, GridCell, MonthGrid,
};

pub const CELL_WIDTH: u32 = 40;
pub const CELL_HEIGHT: u32 = 40;
pub const HEADER_HEIGHT: u32 = 30;
/// Distance between the grid box and the right canvas edge
pub const RIGHT_MARGIN: i32 = 20;
pub const TOP: i32 = 120;
const BORDER_WIDTH: u32 = 2;

/// Where every part of the grid lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    top_left: Point,
    rows: u8,
}

impl GridLayout {
    /// Anchor the grid to the top right of a canvas of `canvas_width` pixels
    pub fn new(canvas_width: u32, rows: u8) -> Self {
        let width = (CELL_WIDTH * u32::from(COLUMNS)) as i32;
        let left = canvas_width as i32 - RIGHT_MARGIN - width;
        Self {
            top_left: Point::new(left, TOP),
            rows,
        }
    }

    pub fn bounds(self) -> Rectangle {
        Rectangle::new(
            self.top_left,
            Size::new(
                CELL_WIDTH * u32::from(COLUMNS),
                HEADER_HEIGHT + CELL_HEIGHT * u32::from(self.rows),
            ),
        )
    }

    pub fn header_band(self) -> Rectangle {
        Rectangle::new(
            self.top_left,
            Size::new(CELL_WIDTH * u32::from(COLUMNS), HEADER_HEIGHT),
        )
    }

    pub fn header_cell(self, column: u8) -> Rectangle {
        Rectangle::new(
            self.top_left + Point::new((CELL_WIDTH * u32::from(column)) as i32, 0),
            Size::new(CELL_WIDTH, HEADER_HEIGHT),
        )
    }

    pub fn cell(self, row: u8, column: u8) -> Rectangle {
        Rectangle::new(
            self.top_left
                + Point::new(
                    (CELL_WIDTH * u32::from(column)) as i32,
                    (HEADER_HEIGHT + CELL_HEIGHT * u32::from(row)) as i32,
                ),
            Size::new(CELL_WIDTH, CELL_HEIGHT),
        )
    }

    /// Vertical lines between columns, below the header band
    pub fn column_separators(self) -> impl Iterator<Item = Line> {
        let bounds = self.bounds();
        let top = bounds.top_left.y + HEADER_HEIGHT as i32;
        let bottom = bounds.top_left.y + bounds.size.height as i32 - 1;
        (1..COLUMNS).map(move |column| {
            let x = bounds.top_left.x + (CELL_WIDTH * u32::from(column)) as i32;
            Line::new(Point::new(x, top), Point::new(x, bottom))
        })
    }

    /// Horizontal lines between week rows
    pub fn row_separators(self) -> impl Iterator<Item = Line> {
        let bounds = self.bounds();
        let left = bounds.top_left.x;
        let right = left + bounds.size.width as i32 - 1;
        (1..self.rows).map(move |row| {
            let y = bounds.top_left.y + (HEADER_HEIGHT + CELL_HEIGHT * u32::from(row)) as i32;
            Line::new(Point::new(left, y), Point::new(right, y))
        })
    }
}

/// Fill and text colors of a day cell. Today wins over an event day.
pub fn cell_colors(cell: &GridCell) -> (Option<Gray8>, Gray8) {
    if cell.is_today {
        (Some(BLACK), WHITE)
    } else if cell.has_event {
        (Some(LIGHT_GRAY), BLACK)
    } else {
        (None, BLACK)
    }
}

fn centered() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

pub fn draw_grid<D>(display: &mut D, grid: &MonthGrid, fonts: &FontSet) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray8>,
{
    let layout = GridLayout::new(display.bounding_box().size.width, grid.row_count());
    let line_style = PrimitiveStyle::with_stroke(BLACK, 1);

    layout
        .bounds()
        .into_styled(PrimitiveStyle::with_stroke(BLACK, BORDER_WIDTH))
        .draw(display)?;

    layout
        .header_band()
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)?;
    for (column, weekday) in all_weekdays().into_iter().enumerate() {
        let cell = layout.header_cell(column as u8);
        Text::with_text_style(
            weekday_short_name(weekday),
            cell.center(),
            fonts.text_style(WHITE),
            centered(),
        )
        .draw(display)?;
    }

    for separator in layout.column_separators() {
        separator.into_styled(line_style).draw(display)?;
    }
    for separator in layout.row_separators() {
        separator.into_styled(line_style).draw(display)?;
    }

    for cell in grid.cells() {
        let rect = layout.cell(cell.row, cell.column);
        let (fill, text_color) = cell_colors(cell);
        if let Some(fill) = fill {
            rect.offset(-1)
                .into_styled(PrimitiveStyle::with_fill(fill))
                .draw(display)?;
        }
        let day = cell.day_number.to_string();
        Text::with_text_style(&day, rect.center(), fonts.text_style(text_color), centered())
            .draw(display)?;
    }

    Ok(())
}
