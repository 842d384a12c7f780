pub mod agenda;
pub mod framebuffer;
pub mod grid;
pub mod text_styles;

use chrono::NaiveDateTime;
use embedded_graphics::{
    pixelcolor::Gray8,
    prelude::*,
    text::{Baseline, Text},
};

use crate::calendar_utils::MonthGrid;
use agenda::AgendaLine;
pub use framebuffer::Framebuffer;
pub use text_styles::FontSet;
use text_styles::{BLACK, WHITE};

pub const TITLE: &str = "Upcoming events";
const TITLE_POSITION: Point = Point::new(20, 95);
const FOOTER_X: i32 = 20;
/// Footer baseline distance from the bottom edge
const FOOTER_BOTTOM: i32 = 20;

/// Everything that ends up on one panel, already laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub agenda: Vec<AgendaLine>,
    pub grid: MonthGrid,
    pub rendered_at: NaiveDateTime,
}

pub fn footer_text(rendered_at: NaiveDateTime) -> String {
    format!("Generated {}", rendered_at.format("%Y-%m-%d %H:%M:%S"))
}

/// Draw the whole panel, back to front
pub fn draw_panel<D>(display: &mut D, view: &PanelView, fonts: &FontSet) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray8>,
{
    display.clear(WHITE)?;

    Text::with_baseline(TITLE, TITLE_POSITION, fonts.title_style(), Baseline::Alphabetic)
        .draw(display)?;

    let text_style = fonts.text_style(BLACK);
    for line in &view.agenda {
        Text::with_baseline(&line.text, line.position, text_style, Baseline::Alphabetic)
            .draw(display)?;
    }

    grid::draw_grid(display, &view.grid, fonts)?;

    let height = display.bounding_box().size.height as i32;
    Text::with_baseline(
        &footer_text(view.rendered_at),
        Point::new(FOOTER_X, height - FOOTER_BOTTOM),
        fonts.footer_style(),
        Baseline::Alphabetic,
    )
    .draw(display)?;

    Ok(())
}
