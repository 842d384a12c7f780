//! Upcoming events: filtering, ordering and grouping by display day

use core::fmt::{self, Write};

use arrayvec::ArrayString;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Default amount of events shown on the panel
pub const MAX_EVENTS: usize = 5;

/// A calendar event with its start already shifted to local wall time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: NaiveDateTime,
    pub summary: String,
}

/// Keep events starting at or after `now`, nearest first, at most `max_events` of them.
///
/// Events with the same start keep their feed order.
pub fn upcoming(mut events: Vec<Event>, now: NaiveDateTime, max_events: usize) -> Vec<Event> {
    events.retain(|event| event.start >= now);
    events.sort_by_key(|event| event.start);
    events.truncate(max_events);
    events
}

/// `dd.mm.yyyy` is the longest label
pub type DateLabel = ArrayString<16>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Today,
    Tomorrow,
    Date(DateLabel),
}

impl DayLabel {
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        if date == today {
            return Self::Today;
        }
        if today.succ_opt() == Some(date) {
            return Self::Tomorrow;
        }
        let mut label = DateLabel::new();
        // Cannot overflow: the longest output is 10 characters for 4-digit years
        let _ = if date.year() == today.year() {
            write!(label, "{:02}.{:02}", date.day(), date.month())
        } else {
            write!(label, "{:02}.{:02}.{}", date.day(), date.month(), date.year())
        };
        Self::Date(label)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::Date(label) => label.as_str(),
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledGroup {
    pub label: DayLabel,
    pub events: Vec<Event>,
}

impl LabeledGroup {
    /// Local dates of every event in the group
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.events.iter().map(|event| event.start.date())
    }
}

/// Group events under their day label.
///
/// Groups appear in the order their label is first seen. A later event whose label matches an
/// earlier group joins that group even when other groups came in between.
pub fn group_by_day(events: Vec<Event>, today: NaiveDate) -> Vec<LabeledGroup> {
    let mut groups: Vec<LabeledGroup> = Vec::new();
    for event in events {
        let label = DayLabel::for_date(event.start.date(), today);
        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.events.push(event),
            None => groups.push(LabeledGroup {
                label,
                events: vec![event],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn event(start: NaiveDateTime, summary: &str) -> Event {
        Event {
            start,
            summary: summary.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_upcoming_drops_past_and_sorts() {
        let now = at(2026, 10, 19, 12, 0);
        let events = vec![
            event(at(2026, 10, 21, 9, 0), "later"),
            event(at(2026, 10, 19, 11, 59), "past"),
            event(at(2026, 10, 19, 12, 0), "now"),
            event(at(2026, 10, 20, 9, 0), "tomorrow"),
        ];
        let result = upcoming(events, now, MAX_EVENTS);
        let summaries: Vec<_> = result.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, ["now", "tomorrow", "later"]);
    }

    #[test]
    fn test_upcoming_truncates_to_nearest() {
        let now = at(2026, 10, 19, 0, 0);
        let events: Vec<_> = (1..=7)
            .rev()
            .map(|d| event(at(2026, 10, 19 + d, 8, 0), &format!("e{d}")))
            .collect();
        let result = upcoming(events, now, 5);
        assert_eq!(result.len(), 5);
        assert_eq!(result[0].summary, "e1");
        assert_eq!(result[4].summary, "e5");
        assert!(result.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn test_upcoming_keeps_feed_order_for_ties() {
        let now = at(2026, 10, 19, 0, 0);
        let start = at(2026, 10, 22, 10, 0);
        let events = vec![event(start, "first"), event(start, "second")];
        let result = upcoming(events, now, 5);
        assert_eq!(result[0].summary, "first");
        assert_eq!(result[1].summary, "second");
    }

    #[test]
    fn test_day_label() {
        let today = today();
        assert_eq!(DayLabel::for_date(today, today), DayLabel::Today);
        assert_eq!(
            DayLabel::for_date(today.succ_opt().unwrap(), today),
            DayLabel::Tomorrow
        );
        let same_year = DayLabel::for_date(NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(), today);
        assert_eq!(same_year.as_str(), "03.11");
        let next_year = DayLabel::for_date(NaiveDate::from_ymd_opt(2027, 1, 5).unwrap(), today);
        assert_eq!(next_year.to_string(), "05.01.2027");
    }

    #[test]
    fn test_tomorrow_across_year_end() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_eq!(DayLabel::for_date(tomorrow, today), DayLabel::Tomorrow);
    }

    #[test]
    fn test_group_by_day_preserves_first_occurrence() {
        let events = vec![
            event(at(2026, 10, 19, 15, 0), "a"),
            event(at(2026, 10, 19, 18, 0), "b"),
            event(at(2026, 10, 20, 9, 0), "c"),
            event(at(2026, 10, 25, 9, 0), "d"),
        ];
        let groups = group_by_day(events, today());
        let labels: Vec<_> = groups.iter().map(|g| g.label.to_string()).collect();
        assert_eq!(labels, ["Today", "Tomorrow", "25.10"]);
        assert_eq!(groups[0].events.len(), 2);
        assert_eq!(groups[0].events[1].summary, "b");
        assert_eq!(
            groups[2].dates().collect::<Vec<_>>(),
            [NaiveDate::from_ymd_opt(2026, 10, 25).unwrap()]
        );
    }

    #[test]
    fn test_group_by_day_empty() {
        assert!(group_by_day(Vec::new(), today()).is_empty());
    }
}
