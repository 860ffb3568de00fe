use std::path::PathBuf;

use chrono::Local;
use tracing::{info, warn};

use crate::export::{save_lessons, save_plans, OutputPaths};
use crate::model::{ErrorRecord, Lesson, PricingPlan};
use crate::report::{generate_report, write_report};
use crate::request::image_client;
use crate::scrape::{scrape_lessons, scrape_pricing};
use crate::{info_time, Config, Result};

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub plans: Vec<PricingPlan>,
    pub lessons: Vec<Lesson>,
    pub errors: Vec<ErrorRecord>,
    pub report_path: PathBuf,
}

/// Scrapes both pages, writes the exports and the report.
/// Page and item failures end up in the report; only output-tree or HTTP client setup failures end the run early.
pub async fn process_site(config: &Config) -> Result<RunSummary> {
    let start_time = Local::now();
    info_time!("Started scraping codeia.dev");

    let paths = OutputPaths::create(&config.output_dir)?;
    info!("Output directories created under {}", paths.base.display());

    let mut errors = Vec::new();

    let (plans, pricing_errors) = scrape_pricing(config).await;
    errors.extend(pricing_errors);
    if plans.is_empty() {
        warn!("No pricing plans extracted");
    } else {
        save_plans(&plans, &paths)?;
        info_time!(start_time, "{} pricing plans extracted", plans.len());
    }

    let client = image_client(config.image_timeout)?;
    let (lessons, lesson_errors) = scrape_lessons(config, &client, &paths.images_lessons).await;
    errors.extend(lesson_errors);
    if lessons.is_empty() {
        warn!("No lessons extracted");
    } else {
        save_lessons(&lessons, &paths)?;
        info_time!(start_time, "{} lessons extracted", lessons.len());
    }

    let report = generate_report(&plans, &lessons, &errors);
    let report_path = write_report(&report, &paths.base, Local::now()).await?;
    info!("Report saved to {}", report_path.display());

    print!("{}", console_block(&report));

    info_time!(
        start_time,
        "Scraping finished with {} errors, results in {}",
        errors.len(),
        paths.base.display()
    );

    Ok(RunSummary {
        plans,
        lessons,
        errors,
        report_path,
    })
}

/// The report as echoed to stdout: two blank lines, then the report.
fn console_block(report: &str) -> String {
    format!("\n\n{report}\n")
}
