//! Page-level flows. Failures here never bubble up: they are logged and returned as
//! [`ErrorRecord`]s next to whatever records could be extracted.

use std::path::Path;

use reqwest::Client;
use tokio::task::spawn_blocking;
use tracing::{error, info, warn};

use crate::browser::render_page;
use crate::model::{ErrorKind, ErrorRecord, Lesson, PricingPlan};
use crate::parse::{lessons::extract_lessons, pricing::extract_plans};
use crate::request::{download_image, normalize_filename, resolve_url};
use crate::{Config, Result, MAX_FILENAME_LEN};

pub async fn scrape_pricing(config: &Config) -> (Vec<PricingPlan>, Vec<ErrorRecord>) {
    info!("Scraping pricing: {}", config.pricing_url);

    match try_scrape_pricing(config).await {
        Ok(plans) => {
            for plan in &plans {
                info!("Plan extracted: {}", plan.name);
            }
            (plans, Vec::new())
        }
        Err(e) => {
            let message = format!("Failed to scrape pricing: {e}");
            error!("{message}");
            let record = ErrorRecord::new(ErrorKind::ScrapingPricing, message, &config.pricing_url);
            (Vec::new(), vec![record])
        }
    }
}

async fn try_scrape_pricing(config: &Config) -> Result<Vec<PricingPlan>> {
    let html = render_page(
        config.browser.clone(),
        config.pricing_url.clone(),
        config.pricing_load,
    )
    .await?;

    let plans = spawn_blocking(move || extract_plans(&html)).await?;
    info!("Pricing cards found: {}", plans.len());
    Ok(plans)
}

pub async fn scrape_lessons(
    config: &Config,
    client: &Client,
    images_dir: &Path,
) -> (Vec<Lesson>, Vec<ErrorRecord>) {
    info!("Scraping lessons: {}", config.lessons_url);

    match try_render_lessons(config).await {
        Ok(items) => collect_lessons(items, client, images_dir, config).await,
        Err(e) => {
            let message = format!("Failed to scrape lessons: {e}");
            error!("{message}");
            let record = ErrorRecord::new(ErrorKind::ScrapingLessons, message, &config.lessons_url);
            (Vec::new(), vec![record])
        }
    }
}

async fn try_render_lessons(config: &Config) -> Result<Vec<Lesson>> {
    let html = render_page(
        config.browser.clone(),
        config.lessons_url.clone(),
        config.lessons_load,
    )
    .await?;

    let site_base = config.site_base.clone();
    let items = spawn_blocking(move || extract_lessons(&html, &site_base)).await??;
    info!("Lesson items found: {}", items.len());
    Ok(items)
}

/// Downloads each lesson's cover image and fills in its file name.
/// A failed download is recorded and the loop moves on.
pub async fn collect_lessons(
    items: Vec<Lesson>,
    client: &Client,
    images_dir: &Path,
    config: &Config,
) -> (Vec<Lesson>, Vec<ErrorRecord>) {
    let mut lessons = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for (idx, mut lesson) in items.into_iter().enumerate() {
        let idx = idx + 1;
        if !lesson.image_url.is_empty() {
            let mut stem = normalize_filename(&lesson.title, MAX_FILENAME_LEN);
            if stem.is_empty() {
                stem = format!("leccion-{idx}");
            }
            match fetch_cover(client, config, &lesson.image_url, images_dir, &stem).await {
                Ok(file_name) => lesson.image_file = file_name,
                Err(e) => {
                    let message = format!("Failed to download image {}: {e}", lesson.image_url);
                    warn!("{message}");
                    errors.push(ErrorRecord::new(
                        ErrorKind::ImageDownload,
                        message,
                        &lesson.image_url,
                    ));
                }
            }
        }

        info!("Lesson extracted: {}", lesson.title);
        lessons.push(lesson);
    }

    (lessons, errors)
}

async fn fetch_cover(
    client: &Client,
    config: &Config,
    image_url: &str,
    images_dir: &Path,
    stem: &str,
) -> Result<String> {
    let url = resolve_url(&config.site_base, image_url)?;
    download_image(client, &url, images_dir, stem).await
}
