//! Fetch a remote iCalendar feed and read its VEVENT blocks into [`Event`]s.
//!
//! Each VEVENT is parsed on its own: a block that fails to parse, or lacks a usable `DTSTART`
//! or `SUMMARY`, is dropped and never aborts the rest of the feed.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use icalendar::{
    parser::{read_calendar, unfold, Property},
    CalendarDateTime, DatePerhapsTime,
};
use log::{debug, error};

use crate::error::{PanelError, Result};
use crate::events::Event;
use crate::time::LocalOffset;

/// Somewhere the feed text comes from
pub trait FeedSource {
    fn fetch(&self) -> Result<String>;
}

/// Feed text already in memory
#[derive(Debug, Clone)]
pub struct StaticFeed(pub String);

impl FeedSource for StaticFeed {
    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// A `.ics` file on disk
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileFeedSource {
    fn fetch(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| PanelError::FeedFetch(format!("{}: {e}", self.path.display())))
            .inspect_err(|e| error!("{e}"))
    }
}

/// Feed served over HTTP(S). One blocking GET, no retries.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    url: String,
}

#[cfg(feature = "http")]
impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "http")]
impl FeedSource for HttpFeedSource {
    fn fetch(&self) -> Result<String> {
        log::info!("Fetching feed from {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| PanelError::FeedFetch(format!("HTTP client error: {e}")))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| PanelError::FeedFetch(format!("HTTP request failed: {e}")))
            .inspect_err(|e| error!("{e}"))?;

        let status = response.status();
        if !status.is_success() {
            error!("Feed request returned {status}");
            return Err(PanelError::FeedFetch(format!("unexpected status: {status}")));
        }

        response
            .text()
            .map_err(|e| PanelError::FeedFetch(format!("failed to read body: {e}")))
    }
}

/// Fields read from one VEVENT, before the start is localized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    /// `DTSTART` value as written in the feed, after unfolding
    pub raw_start: String,
    /// `raw_start` read as a UTC wall time, if it parses
    pub start: Option<NaiveDateTime>,
    pub summary: String,
}

fn is_marker(line: &str, marker: &str, component: &str) -> bool {
    line.split_once(':').is_some_and(|(name, value)| {
        name.trim().eq_ignore_ascii_case(marker) && value.trim().eq_ignore_ascii_case(component)
    })
}

/// Cut the unfolded feed into the text of every complete `BEGIN:VEVENT`..`END:VEVENT` block.
///
/// A block that is never closed, or is interrupted by another `BEGIN:VEVENT`, is dropped.
fn vevent_blocks(unfolded: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut open: Option<Vec<&str>> = None;

    for line in unfolded.lines().map(|line| line.trim_end_matches('\r')) {
        if is_marker(line, "BEGIN", "VEVENT") {
            if open.is_some() {
                debug!("Unterminated VEVENT block, skipping");
            }
            open = Some(vec![line]);
        } else if let Some(lines) = open.as_mut() {
            lines.push(line);
            if is_marker(line, "END", "VEVENT") {
                blocks.extend(open.take().map(|lines| lines.join("\r\n")));
            }
        }
    }

    if open.is_some() {
        debug!("Unterminated VEVENT block at end of feed, skipping");
    }
    blocks
}

/// Read `DTSTART` with the calendar crate's value parser, falling back to [`parse_start`]
fn read_start(prop: &Property) -> Option<NaiveDateTime> {
    match DatePerhapsTime::try_from(prop).ok() {
        Some(DatePerhapsTime::Date(date)) => Some(date.and_time(NaiveTime::MIN)),
        Some(DatePerhapsTime::DateTime(CalendarDateTime::Utc(utc))) => Some(utc.naive_utc()),
        Some(DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive))) => Some(naive),
        // TZID is not resolved; the wall time is taken as UTC like every other start
        Some(DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. })) => {
            Some(date_time)
        }
        None => parse_start(prop.val.as_ref()),
    }
}

/// Parse one VEVENT block. Properties of nested components such as VALARM are not looked at.
fn read_vevent(block: &str) -> Option<RawEvent> {
    let wrapped = format!("BEGIN:VCALENDAR\r\n{block}\r\nEND:VCALENDAR\r\n");
    let calendar = read_calendar(&wrapped)
        .inspect_err(|e| debug!("Unreadable VEVENT block, skipping: {e}"))
        .ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    let (Some(start), Some(summary)) = (vevent.find_prop("DTSTART"), vevent.find_prop("SUMMARY"))
    else {
        debug!("VEVENT without DTSTART or SUMMARY, skipping");
        return None;
    };

    Some(RawEvent {
        raw_start: start.val.as_ref().trim().to_string(),
        start: read_start(start),
        summary: unescape_text(summary.val.as_ref()).trim().to_string(),
    })
}

/// Unfold continuation lines, then read `DTSTART` and `SUMMARY` out of every complete VEVENT
pub fn extract_raw_events(text: &str) -> Vec<RawEvent> {
    let unfolded = unfold(text);
    vevent_blocks(&unfolded)
        .iter()
        .filter_map(|block| read_vevent(block))
        .collect()
}

/// Undo iCalendar TEXT escaping, which the content-line parser leaves in place.
/// Line breaks become spaces since summaries are drawn on one line.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n' | 'N') => out.push(' '),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            '\r' | '\n' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y%m%d", "%Y-%m-%d"];

/// Parse a start value into a UTC wall time. All-day dates start at midnight.
pub fn parse_start(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    let value = raw.trim_end_matches(['Z', 'z']);
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Read, parse and localize every event in the feed, in feed order
pub fn parse_feed(text: &str, offset: LocalOffset) -> Vec<Event> {
    extract_raw_events(text)
        .into_iter()
        .filter_map(|raw| {
            if raw.summary.is_empty() {
                debug!("Empty SUMMARY, skipping event");
                return None;
            }
            let Some(start) = raw.start else {
                debug!("Unparsable DTSTART {:?}, skipping event", raw.raw_start);
                return None;
            };
            let Some(start) = offset.localize(start) else {
                debug!("DTSTART {:?} out of range after offset, skipping event", raw.raw_start);
                return None;
            };
            Some(Event {
                start,
                summary: raw.summary,
            })
        })
        .collect()
}
