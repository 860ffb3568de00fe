use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::model::{ErrorRecord, Lesson, PricingPlan};
use crate::Result;

const RULE_WIDTH: usize = 60;
const PREVIEW_LESSONS: usize = 5;

/// Renders the plain-text run summary.
pub fn generate_report(plans: &[PricingPlan], lessons: &[Lesson], errors: &[ErrorRecord]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines: Vec<String> = vec![
        rule.clone(),
        "INFORME DE SCRAPING - CODEIA.DEV".to_string(),
        rule.clone(),
        String::new(),
    ];

    lines.push("--- PRECIOS ---".to_string());
    lines.push(format!("Total de planes extraídos: {}", plans.len()));
    for (i, plan) in plans.iter().enumerate() {
        lines.push(format!("\n  Plan {}: {}", i + 1, plan.name));
        lines.push(format!("  Precio: {}", plan.price));
        lines.push(format!("  Características: {}", plan.features.len()));
    }
    lines.push(String::new());

    lines.push("--- LECCIONES ---".to_string());
    lines.push(format!("Total de lecciones extraídas: {}", lessons.len()));
    if !lessons.is_empty() {
        lines.push("\nLecciones por categoría:".to_string());
        for (category, count) in category_counts(lessons) {
            lines.push(format!("  - {category}: {count}"));
        }

        lines.push(format!("\nPrimeras {PREVIEW_LESSONS} lecciones:"));
        for (i, lesson) in lessons.iter().take(PREVIEW_LESSONS).enumerate() {
            lines.push(format!("\n  {}. {}", i + 1, lesson.title));
            lines.push(format!("     Categoría: {}", lesson.category));
            lines.push(format!("     Visualizaciones: {}", lesson.views));
        }
    }
    lines.push(String::new());

    lines.push("--- ERRORES ---".to_string());
    if errors.is_empty() {
        lines.push("No se encontraron errores.".to_string());
    } else {
        lines.push(format!("Total de errores: {}", errors.len()));
        for (i, err) in errors.iter().enumerate() {
            lines.push(format!("\n  Error {}:", i + 1));
            lines.push(format!("  Tipo: {}", err.kind.tag()));
            lines.push(format!("  Mensaje: {}", err.message));
            lines.push(format!("  URL: {}", err.url));
        }
    }

    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}

/// Lessons per category, in the order each category first appears.
fn category_counts(lessons: &[Lesson]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for lesson in lessons {
        match counts.iter_mut().find(|(cat, _)| *cat == lesson.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((&lesson.category, 1)),
        }
    }
    counts
}

/// `informe_YYYYMMDD_HHMMSS.txt` under `dir`.
pub fn report_path(dir: &Path, at: DateTime<Local>) -> PathBuf {
    dir.join(format!("informe_{}.txt", at.format("%Y%m%d_%H%M%S")))
}

pub async fn write_report(report: &str, dir: &Path, at: DateTime<Local>) -> Result<PathBuf> {
    let path = report_path(dir, at);
    tokio::fs::write(&path, report).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::ErrorKind;

    fn lesson(title: &str, category: &str) -> Lesson {
        Lesson {
            title: title.to_string(),
            description: String::new(),
            tags: Vec::new(),
            date: String::new(),
            views: "7".to_string(),
            category: category.to_string(),
            duration: String::new(),
            image_file: String::new(),
            image_url: String::new(),
            video_url: String::new(),
        }
    }

    #[test]
    fn empty_run() {
        let report = generate_report(&[], &[], &[]);
        assert!(report.starts_with(&"=".repeat(60)));
        assert!(report.contains("Total de planes extraídos: 0"));
        assert!(report.contains("Total de lecciones extraídas: 0"));
        assert!(report.contains("No se encontraron errores."));
        assert!(!report.contains("Lecciones por categoría"));
    }

    #[test]
    fn empty_run_layout() {
        let rule = "=".repeat(60);
        let expected = [
            rule.as_str(),
            "INFORME DE SCRAPING - CODEIA.DEV",
            rule.as_str(),
            "",
            "--- PRECIOS ---",
            "Total de planes extraídos: 0",
            "",
            "--- LECCIONES ---",
            "Total de lecciones extraídas: 0",
            "",
            "--- ERRORES ---",
            "No se encontraron errores.",
            "",
            rule.as_str(),
        ]
        .join("\n");
        assert_eq!(generate_report(&[], &[], &[]), expected);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let lessons = vec![
            lesson("a", "IA"),
            lesson("b", "Rust"),
            lesson("c", "IA"),
        ];
        assert_eq!(category_counts(&lessons), vec![("IA", 2), ("Rust", 1)]);

        let report = generate_report(&[], &lessons, &[]);
        let ia = report.find("  - IA: 2").unwrap();
        let rust = report.find("  - Rust: 1").unwrap();
        assert!(ia < rust);
    }

    #[test]
    fn preview_is_capped() {
        let lessons: Vec<Lesson> = (1..=7).map(|i| lesson(&format!("L{i}"), "IA")).collect();
        let report = generate_report(&[], &lessons, &[]);
        assert!(report.contains("  5. L5"));
        assert!(!report.contains("  6. L6"));
    }

    #[test]
    fn plans_and_errors_are_listed() {
        let plans = vec![PricingPlan::new("Pro".into(), "$19".into(), vec!["Cursos".into()])];
        let errors = vec![ErrorRecord::new(
            ErrorKind::ScrapingLessons,
            "Failed to scrape lessons: boom",
            "https://codeia.dev/lecciones",
        )];
        let report = generate_report(&plans, &[], &errors);
        assert!(report.contains("  Plan 1: Pro\n  Precio: $19\n  Características: 1"));
        assert!(report.contains("Total de errores: 1"));
        assert!(report.contains("  Tipo: scraping_lecciones"));
        assert!(report.contains("  URL: https://codeia.dev/lecciones"));
    }

    #[test]
    fn report_file_is_timestamped() {
        let at = Local.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        let path = report_path(Path::new("output"), at);
        assert_eq!(path, PathBuf::from("output/informe_20250309_140507.txt"));
    }
}
