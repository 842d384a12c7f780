//! One render: feed text and the current time in, JPEG bytes out.

use chrono::NaiveDateTime;
use log::{error, info};

use crate::calendar_utils::{EventDaysMask, MonthContext, MonthGrid};
use crate::config::PanelConfig;
use crate::draw::{
    agenda::{layout_agenda, AgendaWidth},
    draw_panel,
    grid::GridLayout,
    FontSet, Framebuffer, PanelView,
};
use crate::error::Result;
use crate::events::{group_by_day, upcoming, LabeledGroup};
use crate::feed::{parse_feed, FeedSource};
use crate::time::Clock;

/// Upcoming events grouped by day, as of `now` (local wall time)
pub fn upcoming_groups(
    text: &str,
    now: NaiveDateTime,
    config: &PanelConfig,
) -> Result<Vec<LabeledGroup>> {
    let events = parse_feed(text, config.offset()?);
    info!("Parsed {} events from feed", events.len());
    let events = upcoming(events, now, config.max_events);
    Ok(group_by_day(events, now.date()))
}

/// Lay out the panel without touching any pixels.
///
/// Agenda lines are cut to end before the grid box starts.
pub fn build_view(
    text: &str,
    now: NaiveDateTime,
    config: &PanelConfig,
    fonts: &FontSet,
) -> Result<PanelView> {
    let groups = upcoming_groups(text, now, config)?;

    let context = MonthContext::from_date(now.date());
    let event_days = EventDaysMask::from_dates(
        context.month_date(),
        groups.iter().flat_map(|group| group.dates()),
    );
    let grid = MonthGrid::build(context, config.row_rule(), event_days);

    let width = AgendaWidth {
        right_edge: GridLayout::new(config.canvas_width, grid.row_count())
            .bounds()
            .top_left
            .x,
        font: fonts.text,
    };

    Ok(PanelView {
        agenda: layout_agenda(&groups, width),
        grid,
        rendered_at: now,
    })
}

/// Fetch the feed, lay out and draw the panel, and encode it as JPEG.
///
/// Any error aborts the whole render; there is no partial image.
pub fn render_panel<S, C>(source: &S, clock: &C, config: &PanelConfig) -> Result<Vec<u8>>
where
    S: FeedSource + ?Sized,
    C: Clock + ?Sized,
{
    config.validate()?;
    let fonts = FontSet::from_reference(&config.font_reference)
        .inspect_err(|e| error!("{e}"))?;
    let mut framebuffer = Framebuffer::new(config.canvas_width, config.canvas_height)?;

    let text = source.fetch()?;
    let now = config.offset()?.local_now(clock)?;
    let view = build_view(&text, now, config, &fonts)?;

    info!("Drawing");
    draw_panel(&mut framebuffer, &view, &fonts).unwrap_or_else(|never| match never {});

    info!("Encoding");
    framebuffer
        .encode_jpeg(config.jpeg_quality)
        .inspect_err(|e| error!("{e}"))
}
