use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use info_panel::{
    config::{DEFAULT_HEIGHT, DEFAULT_JPEG_QUALITY, DEFAULT_WIDTH},
    draw::FontSet,
    events::MAX_EVENTS,
    feed::{FeedSource, FileFeedSource, HttpFeedSource},
    render_panel,
    time::SystemClock,
    PanelConfig,
};
use log::info;

/// Render upcoming calendar events into a JPEG for an e-paper info panel
#[derive(Parser)]
#[command(name = "info-panel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// iCalendar feed URL
    #[arg(long, env = "INFO_PANEL_FEED_URL", required_unless_present = "feed_file")]
    feed_url: Option<String>,

    /// Read the feed from a local .ics file instead of fetching it
    #[arg(long)]
    feed_file: Option<PathBuf>,

    /// Seconds added to every UTC time before display
    #[arg(long, env = "INFO_PANEL_UTC_OFFSET", default_value_t = 0, allow_hyphen_values = true)]
    utc_offset: i64,

    #[arg(long, default_value_t = MAX_EVENTS)]
    max_events: usize,

    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// `profont` or `profont-<size>`
    #[arg(long, env = "INFO_PANEL_FONT", default_value = FontSet::DEFAULT_REFERENCE)]
    font: String,

    /// JPEG quality, 1 to 100
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Size the month grid to the weeks the month actually spans
    #[arg(long)]
    exact_rows: bool,

    /// Where to write the JPEG. Stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> PanelConfig {
        PanelConfig {
            feed_url: self.feed_url.clone().unwrap_or_default(),
            utc_offset_seconds: self.utc_offset,
            max_events: self.max_events,
            canvas_width: self.width,
            canvas_height: self.height,
            font_reference: self.font.clone(),
            jpeg_quality: self.quality,
            exact_row_count: self.exact_rows,
        }
    }

    fn source(&self, config: &PanelConfig) -> Box<dyn FeedSource> {
        match &self.feed_file {
            Some(path) => Box::new(FileFeedSource::new(path)),
            None => Box::new(HttpFeedSource::new(&config.feed_url)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let config = cli.config();
    let source = cli.source(&config);

    info!("Rendering panel");
    let jpeg = render_panel(source.as_ref(), &SystemClock, &config)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &jpeg)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", jpeg.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&jpeg)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
