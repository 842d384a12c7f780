//! Render upcoming calendar events and a month grid into a single JPEG for an e-paper info panel.
//!
//! The pipeline is a single pass: the feed is fetched through a [`feed::FeedSource`], scraped
//! into events, filtered against an injected [`time::Clock`], grouped by day, laid out, drawn
//! onto an `embedded-graphics` canvas and encoded.

pub mod calendar_utils;
pub mod config;
pub mod draw;
pub mod error;
pub mod events;
pub mod feed;
pub mod render;
pub mod time;

pub use config::PanelConfig;
pub use error::{PanelError, Result};
pub use render::render_panel;
