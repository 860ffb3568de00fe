use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::model::{Lesson, PricingPlan};
use crate::Result;

pub const FEATURE_SEPARATOR: &str = " | ";
pub const TAG_SEPARATOR: &str = ", ";

/// Output layout rooted at the configured output directory.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub base: PathBuf,
    pub data: PathBuf,
    pub images_pricing: PathBuf,
    pub images_lessons: PathBuf,
}

impl OutputPaths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            data: base.join("data"),
            images_pricing: base.join("images").join("precios"),
            images_lessons: base.join("images").join("lecciones"),
            base,
        }
    }

    /// Builds the layout and creates every directory in it.
    pub fn create(base: impl Into<PathBuf>) -> Result<Self> {
        let paths = Self::new(base);
        for dir in [&paths.base, &paths.data, &paths.images_pricing, &paths.images_lessons] {
            fs::create_dir_all(dir)?;
        }
        Ok(paths)
    }
}

/// Pretty-printed JSON, two-space indent, non-ASCII left as is.
pub fn save_json<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    info!("JSON saved: {}", path.display());
    Ok(())
}

/// Header plus one row per record. Nothing is written for an empty slice.
pub fn save_csv<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    if rows.is_empty() {
        warn!("No rows to save to {}", path.display());
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("CSV saved: {}", path.display());
    Ok(())
}

/// A [`PricingPlan`] with its features joined into one cell.
#[derive(Debug, Serialize)]
pub struct PricingPlanRow<'a> {
    #[serde(rename = "nombre")]
    pub name: &'a str,
    #[serde(rename = "precio")]
    pub price: &'a str,
    #[serde(rename = "caracteristicas")]
    pub features: String,
    #[serde(rename = "num_caracteristicas")]
    pub feature_count: usize,
}

impl<'a> From<&'a PricingPlan> for PricingPlanRow<'a> {
    fn from(plan: &'a PricingPlan) -> Self {
        Self {
            name: &plan.name,
            price: &plan.price,
            features: plan.features.join(FEATURE_SEPARATOR),
            feature_count: plan.feature_count,
        }
    }
}

/// A [`Lesson`] with its tags joined into one cell.
#[derive(Debug, Serialize)]
pub struct LessonRow<'a> {
    #[serde(rename = "titulo")]
    pub title: &'a str,
    #[serde(rename = "descripcion")]
    pub description: &'a str,
    #[serde(rename = "etiquetas")]
    pub tags: String,
    #[serde(rename = "fecha")]
    pub date: &'a str,
    #[serde(rename = "visualizaciones")]
    pub views: &'a str,
    #[serde(rename = "categoria")]
    pub category: &'a str,
    #[serde(rename = "duracion")]
    pub duration: &'a str,
    #[serde(rename = "imagen_portada")]
    pub image_file: &'a str,
    #[serde(rename = "imagen_url")]
    pub image_url: &'a str,
    #[serde(rename = "url_video")]
    pub video_url: &'a str,
}

impl<'a> From<&'a Lesson> for LessonRow<'a> {
    fn from(lesson: &'a Lesson) -> Self {
        Self {
            title: &lesson.title,
            description: &lesson.description,
            tags: lesson.tags.join(TAG_SEPARATOR),
            date: &lesson.date,
            views: &lesson.views,
            category: &lesson.category,
            duration: &lesson.duration,
            image_file: &lesson.image_file,
            image_url: &lesson.image_url,
            video_url: &lesson.video_url,
        }
    }
}

pub fn save_plans(plans: &[PricingPlan], paths: &OutputPaths) -> Result<()> {
    save_json(plans, &paths.data.join("precios.json"))?;
    let rows: Vec<PricingPlanRow> = plans.iter().map(PricingPlanRow::from).collect();
    save_csv(&rows, &paths.data.join("precios.csv"))
}

pub fn save_lessons(lessons: &[Lesson], paths: &OutputPaths) -> Result<()> {
    save_json(lessons, &paths.data.join("lecciones.json"))?;
    let rows: Vec<LessonRow> = lessons.iter().map(LessonRow::from).collect();
    save_csv(&rows, &paths.data.join("lecciones.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_builds_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = OutputPaths::create(tmp.path().join("output")).unwrap();
        assert!(paths.data.is_dir());
        assert!(paths.images_pricing.ends_with("images/precios"));
        assert!(paths.images_pricing.is_dir());
        assert!(paths.images_lessons.is_dir());
    }

    #[test]
    fn empty_csv_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("empty.csv");
        save_csv::<LessonRow>(&[], &path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn plan_row_joins_features() {
        let plan = PricingPlan::new(
            "Pro".into(),
            "$19".into(),
            vec!["Cursos".into(), "Soporte".into()],
        );
        let row = PricingPlanRow::from(&plan);
        assert_eq!(row.features, "Cursos | Soporte");
        assert_eq!(row.feature_count, 2);
    }

    #[test]
    fn json_keeps_unicode() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("precios.json");
        let plan = PricingPlan::new("Básico".into(), "€5".into(), vec![]);
        save_json(&[plan], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"nombre\": \"Básico\""));
        assert!(text.contains("\n  {"));
    }
}
