use crate::calendar_utils::RowRule;
use crate::draw::FontSet;
use crate::error::{PanelError, Result};
use crate::events::MAX_EVENTS;
use crate::time::LocalOffset;

pub const DEFAULT_WIDTH: u32 = 960;
pub const DEFAULT_HEIGHT: u32 = 540;
pub const DEFAULT_JPEG_QUALITY: u8 = 90;
/// Largest accepted canvas width or height
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Everything a single render needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub feed_url: String,
    /// Added to every parsed instant and to "now"
    pub utc_offset_seconds: i64,
    pub max_events: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_reference: String,
    pub jpeg_quality: u8,
    /// Reserve only as many grid rows as the month spans
    pub exact_row_count: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            feed_url: String::new(),
            utc_offset_seconds: 0,
            max_events: MAX_EVENTS,
            canvas_width: DEFAULT_WIDTH,
            canvas_height: DEFAULT_HEIGHT,
            font_reference: FontSet::DEFAULT_REFERENCE.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            exact_row_count: false,
        }
    }
}

impl PanelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_events == 0 {
            return Err(PanelError::Config("max_events must be at least 1".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(PanelError::Config(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        let sides = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ];
        for (name, side) in sides {
            if !(1..=MAX_CANVAS_SIDE).contains(&side) {
                return Err(PanelError::Config(format!(
                    "{name} must be within 1..={MAX_CANVAS_SIDE}, got {side}"
                )));
            }
        }
        self.offset()?;
        Ok(())
    }

    pub fn offset(&self) -> Result<LocalOffset> {
        LocalOffset::from_seconds(self.utc_offset_seconds).ok_or_else(|| {
            PanelError::Config(format!(
                "utc_offset_seconds out of range: {}",
                self.utc_offset_seconds
            ))
        })
    }

    pub fn row_rule(&self) -> RowRule {
        if self.exact_row_count {
            RowRule::Exact
        } else {
            RowRule::Compatible
        }
    }
}
