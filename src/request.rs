use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::info;
use url::Url;

use crate::{Error, Result};

/// One client for every image on a page. `timeout` bounds connect plus read.
pub fn image_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Downloads `url` into `dir` as `{file_stem}{ext}` and returns that file name.
/// Any non-2xx response is an error.
pub async fn download_image(client: &Client, url: &str, dir: &Path, file_stem: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;

    let ext = match url_extension(url) {
        Some(ext) => ext,
        None => {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            content_type_extension(content_type).to_string()
        }
    };

    let file_name = format!("{file_stem}{ext}");
    let path = dir.join(&file_name);
    let bytes = response.bytes().await?;
    tokio::fs::write(&path, &bytes).await?;

    info!("Image downloaded: {} ({} bytes)", path.display(), bytes.len());
    Ok(file_name)
}

/// Absolute URLs pass through, relative ones are joined onto `site_base`.
pub fn resolve_url(site_base: &str, src: &str) -> Result<String> {
    let url_err = |url: &str, source| Error::Url {
        url: url.to_string(),
        source,
    };
    match Url::parse(src) {
        Ok(url) => Ok(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(site_base).map_err(|e| url_err(site_base, e))?;
            base.join(src).map(String::from).map_err(|e| url_err(src, e))
        }
        Err(e) => Err(url_err(src, e)),
    }
}

/// Turns a title into a file stem: word characters, whitespace and `-` survive,
/// whitespace and `_` runs become `-`, lowercased, capped at `max_len` characters.
pub fn normalize_filename(text: &str, max_len: usize) -> String {
    static PATTERNS: OnceLock<(Regex, Regex)> = OnceLock::new();
    let (special, separators) = PATTERNS.get_or_init(|| {
        (
            Regex::new(r"[^\w\s-]").expect("valid regex"),
            Regex::new(r"[\s_]+").expect("valid regex"),
        )
    });

    let cleaned = special.replace_all(text, "");
    let dashed = separators.replace_all(&cleaned, "-").to_lowercase();
    dashed.trim_matches('-').chars().take(max_len).collect()
}

/// Extension (with the dot) of the last path segment, ignoring query and fragment.
fn url_extension(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let ext = Path::new(url.path()).extension()?.to_str()?;
    (!ext.is_empty()).then(|| format!(".{ext}"))
}

fn content_type_extension(content_type: &str) -> &'static str {
    if content_type.contains("jpeg") || content_type.contains("jpg") {
        ".jpg"
    } else if content_type.contains("png") {
        ".png"
    } else if content_type.contains("webp") {
        ".webp"
    } else {
        ".jpg"
    }
}
