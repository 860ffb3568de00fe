use scraper::{ElementRef, Html};

use super::{class_contains_any, find_all, find_first, is_tag, stripped_text};
use crate::model::{PricingPlan, DEFAULT_PRICE};

const CARD_TAGS: &[&str] = &["div", "section"];
const CARD_CLASS_TERMS: &[&str] = &["price", "pricing", "plan", "card"];
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4"];
const HEADING_CLASS_TERMS: &[&str] = &["title", "name", "heading"];
const PRICE_TAGS: &[&str] = &["span", "div", "p"];
const PRICE_CLASS_TERMS: &[&str] = &["price", "cost", "amount"];
const CURRENCY_MARKERS: &[&str] = &["$", "€", "USD"];
const FEATURE_TAGS: &[&str] = &["li", "p"];

/// Features shorter than this are icons or separators.
const MIN_FEATURE_LEN: usize = 4;

/// Extracts every pricing card on the page, in document order.
/// Cards nested inside other cards are reported too.
pub fn extract_plans(html: &str) -> Vec<PricingPlan> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    super::descendants(&root)
        .filter(|el| is_tag(el, CARD_TAGS) && class_contains_any(el, CARD_CLASS_TERMS))
        .enumerate()
        .map(|(idx, card)| extract_plan(&card, idx + 1))
        .collect()
}

fn extract_plan(card: &ElementRef, idx: usize) -> PricingPlan {
    let name = find_first(card, |el| {
        is_tag(el, HEADING_TAGS) && class_contains_any(el, HEADING_CLASS_TERMS)
    })
    .or_else(|| find_first(card, |el| is_tag(el, HEADING_TAGS)))
    .map(|el| stripped_text(&el))
    .unwrap_or_else(|| format!("Plan {idx}"));

    let price = find_first(card, |el| {
        is_tag(el, PRICE_TAGS) && class_contains_any(el, PRICE_CLASS_TERMS)
    })
    .map(|el| stripped_text(&el))
    .or_else(|| currency_text(card))
    .unwrap_or_else(|| DEFAULT_PRICE.to_string());

    let mut feature_nodes = find_all(card, |el| {
        is_tag(el, FEATURE_TAGS) && class_contains_any(el, &["feature"])
    });
    if feature_nodes.is_empty() {
        feature_nodes = find_all(card, |el| is_tag(el, &["li"]));
    }
    let features = feature_nodes
        .iter()
        .map(stripped_text)
        .filter(|text| text.chars().count() >= MIN_FEATURE_LEN)
        .collect();

    PricingPlan::new(name, price, features)
}

/// First text node in the card that mentions a currency.
fn currency_text(card: &ElementRef) -> Option<String> {
    card.text()
        .find(|text| CURRENCY_MARKERS.iter().any(|marker| text.contains(marker)))
        .map(|text| text.trim().to_string())
}
