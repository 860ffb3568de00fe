use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use tokio::task::spawn_blocking;
use tracing::{debug, info};

use crate::{Error, Result};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Chrome launch settings.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub width: u32,
    pub height: u32,
    pub user_agent: String,
    /// Chrome binary to launch. `None` lets headless_chrome locate one.
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            width: 1920,
            height: 1080,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_path: None,
        }
    }
}

impl BrowserConfig {
    fn args(&self) -> Vec<String> {
        vec![
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            format!("--user-agent={}", self.user_agent),
        ]
    }
}

/// Fixed waits that let the client-side app render before the DOM is read.
#[derive(Debug, Clone, Copy)]
pub struct PageLoad {
    pub settle: Duration,
    /// When set, scroll to the bottom after settling and wait this long again.
    pub scroll_settle: Option<Duration>,
}

/// One Chrome process. The process is killed when the session drops.
pub struct BrowserSession {
    browser: Browser,
}

impl BrowserSession {
    pub fn launch(config: &BrowserConfig) -> Result<Self> {
        info!("Launching browser (headless: {})", config.headless);

        let args = config.args();
        let os_args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

        let options = LaunchOptionsBuilder::default()
            .headless(config.headless)
            .sandbox(false)
            .window_size(Some((config.width, config.height)))
            .path(config.chrome_path.clone())
            .args(os_args)
            .build()
            .map_err(|e| Error::browser("Failed to build launch options", e))?;

        let browser =
            Browser::new(options).map_err(|e| Error::browser("Failed to launch browser", e))?;

        Ok(Self { browser })
    }

    /// Loads `url`, waits as `load` says and returns the rendered page source.
    pub fn render(&self, url: &str, load: &PageLoad) -> Result<String> {
        let tab = self.tab()?;

        info!("Navigating to: {url}");
        tab.navigate_to(url)
            .map_err(|e| Error::browser(&format!("Failed to navigate to {url}"), e))?;
        tab.wait_until_navigated()
            .map_err(|e| Error::browser("Navigation timeout", e))?;

        std::thread::sleep(load.settle);

        if let Some(scroll_settle) = load.scroll_settle {
            debug!("Scrolling to the bottom of {url}");
            tab.evaluate(SCROLL_TO_BOTTOM, false)
                .map_err(|e| Error::browser("Scroll failed", e))?;
            std::thread::sleep(scroll_settle);
        }

        let html = tab
            .get_content()
            .map_err(|e| Error::browser("Failed to get page source", e))?;
        debug!("Page source for {url}: {} bytes", html.len());

        Ok(html)
    }

    fn tab(&self) -> Result<Arc<Tab>> {
        self.browser
            .new_tab()
            .map_err(|e| Error::browser("Failed to open tab", e))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        info!("Closing browser");
    }
}

/// Launches a browser, renders one page and shuts the browser down again, whatever the outcome.
/// The blocking CDP calls run on the blocking pool.
pub async fn render_page(config: BrowserConfig, url: String, load: PageLoad) -> Result<String> {
    spawn_blocking(move || -> Result<String> {
        let session = BrowserSession::launch(&config)?;
        session.render(&url, &load)
    })
    .await?
}
