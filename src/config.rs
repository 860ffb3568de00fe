use std::path::PathBuf;
use std::time::Duration;

use crate::browser::{BrowserConfig, PageLoad};
use crate::{
    IMAGE_TIMEOUT_SECS, LESSONS_SCROLL_SETTLE_SECS, LESSONS_SETTLE_SECS, LESSONS_URL, LOG_FILE,
    OUTPUT_DIR, PRICING_SETTLE_SECS, PRICING_URL, SITE_BASE,
};

/// Everything a run needs. There is no CLI, only a handful of environment overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub site_base: String,
    pub pricing_url: String,
    pub lessons_url: String,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub browser: BrowserConfig,
    pub pricing_load: PageLoad,
    pub lessons_load: PageLoad,
    pub image_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_base: SITE_BASE.to_string(),
            pricing_url: PRICING_URL.to_string(),
            lessons_url: LESSONS_URL.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            log_file: PathBuf::from(LOG_FILE),
            browser: BrowserConfig::default(),
            pricing_load: PageLoad {
                settle: Duration::from_secs(PRICING_SETTLE_SECS),
                scroll_settle: None,
            },
            lessons_load: PageLoad {
                settle: Duration::from_secs(LESSONS_SETTLE_SECS),
                scroll_settle: Some(Duration::from_secs(LESSONS_SCROLL_SETTLE_SECS)),
            },
            image_timeout: Duration::from_secs(IMAGE_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Defaults, with `CODEIA_OUTPUT_DIR`, `CODEIA_LOG_FILE` and `CHROME_PATH` applied on top.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty("CODEIA_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(file) = non_empty("CODEIA_LOG_FILE") {
            self.log_file = PathBuf::from(file);
        }
        if let Some(chrome) = non_empty("CHROME_PATH") {
            self.browser.chrome_path = Some(PathBuf::from(chrome));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site() {
        let config = Config::default();
        assert_eq!(config.pricing_url, "https://codeia.dev/precios");
        assert_eq!(config.lessons_url, "https://codeia.dev/lecciones");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.pricing_load.settle, Duration::from_secs(3));
        assert!(config.pricing_load.scroll_settle.is_none());
        assert_eq!(
            config.lessons_load.scroll_settle,
            Some(Duration::from_secs(2))
        );
        assert_eq!(config.image_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_apply_and_ignore_blank_values() {
        let config = Config::default().with_overrides(|key| match key {
            "CODEIA_OUTPUT_DIR" => Some("/tmp/codeia".to_string()),
            "CHROME_PATH" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.output_dir, PathBuf::from("/tmp/codeia"));
        assert_eq!(config.log_file, PathBuf::from("scraper.log"));
        assert!(config.browser.chrome_path.is_none());
    }
}
