//! Records produced by a run. Field names serialize to the site's Spanish keys.

use serde::Serialize;

pub const DEFAULT_PRICE: &str = "No especificado";
pub const DEFAULT_DATE: &str = "No especificada";
pub const DEFAULT_VIEWS: &str = "0";
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingPlan {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: String,
    #[serde(rename = "caracteristicas")]
    pub features: Vec<String>,
    #[serde(rename = "num_caracteristicas")]
    pub feature_count: usize,
}

impl PricingPlan {
    pub fn new(name: String, price: String, features: Vec<String>) -> Self {
        Self {
            name,
            price,
            feature_count: features.len(),
            features,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "etiquetas")]
    pub tags: Vec<String>,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "visualizaciones")]
    pub views: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "duracion")]
    pub duration: String,
    /// File name under `images/lecciones`, empty when there was no image or the download failed.
    #[serde(rename = "imagen_portada")]
    pub image_file: String,
    #[serde(rename = "imagen_url")]
    pub image_url: String,
    #[serde(rename = "url_video")]
    pub video_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ScrapingPricing,
    ScrapingLessons,
    ImageDownload,
}

impl ErrorKind {
    /// Tag shown in the report.
    pub fn tag(self) -> &'static str {
        match self {
            ErrorKind::ScrapingPricing => "scraping_precios",
            ErrorKind::ScrapingLessons => "scraping_lecciones",
            ErrorKind::ImageDownload => "descarga_imagen",
        }
    }
}

/// A failure that was logged and recorded instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
    pub url: String,
}

impl ErrorRecord {
    pub fn new(kind: ErrorKind, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            url: url.into(),
        }
    }
}
