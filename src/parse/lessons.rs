use scraper::{ElementRef, Html};

use super::{class_contains_all, create_selector, find_all, find_first, find_next, is_tag, stripped_text};
use crate::model::{Lesson, DEFAULT_CATEGORY, DEFAULT_DATE, DEFAULT_VIEWS};
use crate::Result;

const LINK_SELECTOR: &str = "a[href]";
const ITEM_CLASSES: &[&str] = &["block", "group"];
const BADGE_CLASSES: &[&str] = &["inline-flex", "rounded-full"];

/// Extracts the lesson cards in document order.
pub fn extract_lessons(html: &str, site_base: &str) -> Result<Vec<Lesson>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();
    let link_selector = create_selector(LINK_SELECTOR)?;

    let lessons = doc
        .select(&link_selector)
        .filter(is_lesson_item)
        .enumerate()
        .map(|(idx, item)| extract_lesson(&root, &item, idx + 1, site_base))
        .collect();

    Ok(lessons)
}

/// The card link's class list is exactly `block group`, whatever the spacing.
fn is_lesson_item(link: &ElementRef) -> bool {
    link.value()
        .attr("class")
        .is_some_and(|class| class.split_whitespace().eq(ITEM_CLASSES.iter().copied()))
}

fn extract_lesson(root: &ElementRef, item: &ElementRef, idx: usize, site_base: &str) -> Lesson {
    let href = item.value().attr("href").unwrap_or_default();
    let video_url = video_url(site_base, href);

    let title = find_first(item, |el| {
        is_tag(el, &["h3"]) && class_contains_all(el, &["font-semibold"])
    })
    .map(|el| stripped_text(&el))
    .unwrap_or_else(|| format!("Lección {idx}"));

    let description = find_first(item, |el| {
        is_tag(el, &["p"]) && class_contains_all(el, &["text-muted-foreground", "line-clamp"])
    })
    .map(|el| stripped_text(&el))
    .unwrap_or_default();

    let badges = find_all(item, |el| is_tag(el, &["div"]) && class_contains_all(el, BADGE_CLASSES));
    // The first badge is the category, even when it only holds an icon.
    let category = badges
        .first()
        .map(stripped_text)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let tags = badges
        .iter()
        .map(stripped_text)
        .filter(|text| text.chars().count() > 1 && !text.starts_with("<?"))
        .collect();

    let date = icon_label(root, item, "lucide-calendar").unwrap_or_else(|| DEFAULT_DATE.to_string());
    let views = icon_label(root, item, "lucide-users").unwrap_or_else(|| DEFAULT_VIEWS.to_string());

    let duration = find_first(item, |el| {
        is_tag(el, &["div"]) && class_contains_all(el, &["absolute", "bottom-2"])
    })
    .map(|el| stripped_text(&el))
    .unwrap_or_default();

    let image_url = find_first(item, |el| is_tag(el, &["img"]))
        .and_then(|img| {
            let value = img.value();
            value
                .attr("src")
                .filter(|src| !src.is_empty())
                .or_else(|| value.attr("data-src"))
                .map(str::to_string)
        })
        .unwrap_or_default();

    Lesson {
        title,
        description,
        tags,
        date,
        views,
        category,
        duration,
        image_file: String::new(),
        image_url,
        video_url,
    }
}

/// Text of the `<span>` that follows the lucide icon named `icon`, if the item has that icon.
fn icon_label(root: &ElementRef, item: &ElementRef, icon: &str) -> Option<String> {
    let svg = find_first(item, |el| is_tag(el, &["svg"]) && class_contains_all(el, &[icon]))?;
    find_next(root, &svg, |el| is_tag(el, &["span"])).map(|span| stripped_text(&span))
}

/// Site-relative hrefs are prefixed with the site base. Anything else is kept as written.
fn video_url(site_base: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{site_base}{href}")
    } else {
        href.to_string()
    }
}
