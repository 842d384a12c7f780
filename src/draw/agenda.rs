//! Vertical layout of the upcoming-events list

use embedded_graphics::{mono_font::MonoFont, prelude::Point};

use crate::events::LabeledGroup;

pub const LABEL_X: i32 = 20;
pub const EVENT_X: i32 = 40;
/// Baseline of the first agenda line
pub const START_Y: i32 = 165;
pub const LABEL_ADVANCE: i32 = 50;
pub const EVENT_ADVANCE: i32 = 45;
pub const GROUP_GAP: i32 = 20;
/// Lines whose baseline would fall below this are dropped
pub const MAX_Y: i32 = 500;

pub const NO_EVENTS: &str = "No events.";
/// Appended to lines cut short at the right edge. ProFont has no single-glyph ellipsis.
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Label,
    Event,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaLine {
    pub kind: LineKind,
    pub text: String,
    /// Left end of the text baseline
    pub position: Point,
}

/// Horizontal room the agenda may use: text never reaches past `right_edge`
#[derive(Debug, Clone, Copy)]
pub struct AgendaWidth {
    pub right_edge: i32,
    pub font: &'static MonoFont<'static>,
}

impl AgendaWidth {
    /// Whole glyphs that fit between `x` and the right edge
    fn max_chars(self, x: i32) -> usize {
        let advance = self.font.character_size.width + self.font.character_spacing;
        if advance == 0 {
            return usize::MAX;
        }
        ((self.right_edge - x).max(0) as u32 / advance) as usize
    }

    /// Cut `text` so it fits when drawn from `x`, marking the cut with [`ELLIPSIS`]
    pub fn fit(self, text: String, x: i32) -> String {
        let max_chars = self.max_chars(x);
        if text.chars().count() <= max_chars {
            return text;
        }
        let ellipsis = ELLIPSIS.chars().count();
        if max_chars <= ellipsis {
            return text.chars().take(max_chars).collect();
        }
        let mut cut: String = text.chars().take(max_chars - ellipsis).collect();
        cut.truncate(cut.trim_end().len());
        cut.push_str(ELLIPSIS);
        cut
    }
}

pub fn layout_agenda(groups: &[LabeledGroup], width: AgendaWidth) -> Vec<AgendaLine> {
    if groups.is_empty() {
        return vec![AgendaLine {
            kind: LineKind::Placeholder,
            text: width.fit(NO_EVENTS.to_string(), LABEL_X),
            position: Point::new(LABEL_X, START_Y),
        }];
    }

    let mut lines = Vec::new();
    let mut y = START_Y;
    for group in groups {
        if y > MAX_Y {
            break;
        }
        lines.push(AgendaLine {
            kind: LineKind::Label,
            text: width.fit(format!("- {}", group.label), LABEL_X),
            position: Point::new(LABEL_X, y),
        });
        y += LABEL_ADVANCE;

        for event in &group.events {
            if y > MAX_Y {
                break;
            }
            lines.push(AgendaLine {
                kind: LineKind::Event,
                text: width.fit(
                    format!("{} - {}", event.start.format("%H:%M"), event.summary),
                    EVENT_X,
                ),
                position: Point::new(EVENT_X, y),
            });
            y += EVENT_ADVANCE;
        }

        y += GROUP_GAP;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::text_styles::BLACK;
    use crate::events::{group_by_day, Event};
    use chrono::{NaiveDate, NaiveDateTime};
    use embedded_graphics::{
        geometry::Dimensions,
        mono_font::MonoTextStyle,
        text::{Baseline, Text},
    };

    /// Left edge of the grid box on the default 960 px canvas
    const GRID_LEFT: i32 = 660;

    fn width() -> AgendaWidth {
        AgendaWidth {
            right_edge: GRID_LEFT,
            font: &profont::PROFONT_18_POINT,
        }
    }

    fn right_edge(line: &AgendaLine) -> i32 {
        let style = MonoTextStyle::new(&profont::PROFONT_18_POINT, BLACK);
        let bounds = Text::with_baseline(&line.text, line.position, style, Baseline::Alphabetic)
            .bounding_box();
        bounds.top_left.x + bounds.size.width as i32
    }

    fn at(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn groups(starts: &[NaiveDateTime]) -> Vec<LabeledGroup> {
        let events = starts
            .iter()
            .enumerate()
            .map(|(i, start)| Event {
                start: *start,
                summary: format!("event {i}"),
            })
            .collect();
        group_by_day(events, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn layout(starts: &[NaiveDateTime]) -> Vec<AgendaLine> {
        layout_agenda(&groups(starts), width())
    }

    #[test]
    fn test_empty_agenda() {
        let lines = layout_agenda(&[], width());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::Placeholder);
        assert_eq!(lines[0].text, "No events.");
        assert_eq!(lines[0].position, Point::new(20, 165));
    }

    #[test]
    fn test_single_tomorrow_event() {
        let lines = layout(&[at(20, 9, 0)]);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["- Tomorrow", "09:00 - event 0"]);
        assert_eq!(lines[0].position, Point::new(LABEL_X, 165));
        assert_eq!(lines[1].position, Point::new(EVENT_X, 215));
    }

    #[test]
    fn test_cursor_advances_with_group_gap() {
        let lines = layout(&[at(19, 18, 0), at(20, 9, 5)]);
        let ys: Vec<_> = lines.iter().map(|l| l.position.y).collect();
        // label, event, gap, label, event
        assert_eq!(ys, [165, 215, 280, 330]);
        assert_eq!(lines[2].text, "- Tomorrow");
        assert_eq!(lines[3].text, "09:05 - event 1");
    }

    #[test]
    fn test_overflow_is_dropped() {
        // five separate days need 5 * 115 px, far more than fits
        let lines = layout(&[
            at(21, 8, 0),
            at(22, 8, 0),
            at(23, 8, 0),
            at(24, 8, 0),
            at(25, 8, 0),
        ]);
        assert!(lines.iter().all(|l| l.position.y <= MAX_Y));
        // 165, 215 | 280, 330 | 395, 445 | 510 is past the bound
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.last().unwrap().kind, LineKind::Event);
    }

    #[test]
    fn test_overflow_inside_group() {
        let starts: Vec<_> = (0..9).map(|h| at(19, 10 + h, 0)).collect();
        let lines = layout(&starts);
        // label at 165, events at 215, 260, 305, 350, 395, 440, 485
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[7].position.y, 485);
    }

    #[test]
    fn test_long_summary_stays_left_of_grid() {
        let event = Event {
            start: at(20, 9, 0),
            summary: "Dentist appointment at the clinic on Main Street downtown".into(),
        };
        let groups = group_by_day(vec![event], NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let lines = layout_agenda(&groups, width());
        assert_eq!(lines.len(), 2);
        assert!(lines[1].text.starts_with("09:00 - Dentist appointment"));
        assert!(lines[1].text.ends_with(ELLIPSIS), "{}", lines[1].text);
        for line in &lines {
            assert!(right_edge(line) <= GRID_LEFT, "{:?} ends at {}", line.text, right_edge(line));
        }
    }

    #[test]
    fn test_short_lines_are_untouched() {
        let lines = layout(&[at(20, 9, 0)]);
        assert!(lines.iter().all(|l| !l.text.ends_with(ELLIPSIS)));
        assert!(lines.iter().all(|l| right_edge(l) <= GRID_LEFT));
    }

    #[test]
    fn test_fit_counts_characters() {
        let narrow = AgendaWidth {
            right_edge: EVENT_X + 12 * 5,
            ..width()
        };
        let advance = narrow.font.character_size.width + narrow.font.character_spacing;
        let fits = (60 / advance) as usize;
        let fitted = narrow.fit("ääääääääääääääää".to_string(), EVENT_X);
        assert_eq!(fitted.chars().count(), fits);
        assert_eq!(narrow.fit("ab".to_string(), EVENT_X), "ab");
        assert_eq!(narrow.fit("abc".to_string(), GRID_LEFT), "");
    }
}
