//! Scraper for the codeia.dev pricing and lessons pages.
//! Renders both pages in headless Chrome, extracts the records, downloads lesson covers
//! and writes JSON, CSV and a text report under the output directory.

mod macros;

pub mod browser;
pub mod config;
mod error;
pub mod export;
pub mod model;
pub mod parse;
pub mod process;
pub mod report;
pub mod request;
pub mod scrape;

pub use config::Config;
pub use error::{Error, Result};

const SITE_BASE: &str = "https://codeia.dev";
const PRICING_URL: &str = "https://codeia.dev/precios";
const LESSONS_URL: &str = "https://codeia.dev/lecciones";
const OUTPUT_DIR: &str = "output";
const LOG_FILE: &str = "scraper.log";

const PRICING_SETTLE_SECS: u64 = 3;
const LESSONS_SETTLE_SECS: u64 = 4;
const LESSONS_SCROLL_SETTLE_SECS: u64 = 2;
const IMAGE_TIMEOUT_SECS: u64 = 10;
/// Longest file stem derived from a lesson title.
const MAX_FILENAME_LEN: usize = 50;
