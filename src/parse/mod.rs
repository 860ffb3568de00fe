//! DOM extraction for the rendered pages.
//!
//! The site's markup is matched by class-name substrings, the way the page's utility classes
//! are laid out, so most lookups here are predicates over descendants rather than CSS selectors.

pub mod lessons;
pub mod pricing;

use scraper::{ElementRef, Selector};

use crate::{Error, Result};

#[inline]
pub(crate) fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseInvalidSelector(sel_str.into()))
}

/// True if the element's raw `class` attribute contains every one of `terms`.
pub(crate) fn class_contains_all(el: &ElementRef, terms: &[&str]) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|class| terms.iter().all(|term| class.contains(term)))
}

/// Case-insensitive: true if the element's `class` contains any of `terms`.
pub(crate) fn class_contains_any(el: &ElementRef, terms: &[&str]) -> bool {
    el.value().attr("class").is_some_and(|class| {
        let class = class.to_lowercase();
        terms.iter().any(|term| class.contains(term))
    })
}

pub(crate) fn is_tag(el: &ElementRef, tags: &[&str]) -> bool {
    tags.contains(&el.value().name())
}

/// All descendant text nodes, each trimmed, empty ones dropped, glued together.
pub(crate) fn stripped_text(el: &ElementRef) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Descendant elements (not `el` itself) in document order.
pub(crate) fn descendants<'a>(el: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

pub(crate) fn find_first<'a>(
    el: &ElementRef<'a>,
    pred: impl Fn(&ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    descendants(el).find(|d| pred(d))
}

pub(crate) fn find_all<'a>(
    el: &ElementRef<'a>,
    pred: impl Fn(&ElementRef<'a>) -> bool,
) -> Vec<ElementRef<'a>> {
    descendants(el).filter(|d| pred(d)).collect()
}

/// First element after `anchor` in document order that satisfies `pred`.
/// The search starts with `anchor`'s own children and runs past its subtree to the end of `root`.
pub(crate) fn find_next<'a>(
    root: &ElementRef<'a>,
    anchor: &ElementRef<'a>,
    pred: impl Fn(&ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip_while(|node| node.id() != anchor.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| pred(el))
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    const SNIPPET: &str = r#"
        <div id="box" class="Card Pricing-Item">
            <p class="text-sm  text-muted-foreground">  Hola
                <b> mundo </b> </p>
            <svg class="lucide lucide-calendar"></svg>
        </div>
        <span>after</span>
    "#;

    fn first<'a>(doc: &'a Html, sel: &str) -> ElementRef<'a> {
        doc.select(&create_selector(sel).unwrap()).next().unwrap()
    }

    #[test]
    fn class_matching() {
        let doc = Html::parse_document(SNIPPET);
        let div = first(&doc, "#box");
        assert!(class_contains_any(&div, &["pricing"]));
        assert!(!class_contains_all(&div, &["pricing"]));
        assert!(class_contains_all(&div, &["Card", "Pricing"]));
    }

    #[test]
    fn stripped_text_glues_trimmed_pieces() {
        let doc = Html::parse_document(SNIPPET);
        let p = first(&doc, "p");
        assert_eq!(stripped_text(&p), "Holamundo");
    }

    #[test]
    fn find_next_leaves_the_subtree() {
        let doc = Html::parse_document(SNIPPET);
        let svg = first(&doc, "svg");
        let span = find_next(&doc.root_element(), &svg, |el| is_tag(el, &["span"])).unwrap();
        assert_eq!(stripped_text(&span), "after");
    }

    #[test]
    fn descendants_exclude_self() {
        let doc = Html::parse_document(SNIPPET);
        let div = first(&doc, "#box");
        assert!(find_first(&div, |el| is_tag(el, &["div"])).is_none());
        assert_eq!(find_all(&div, |el| is_tag(el, &["p", "b"])).len(), 2);
    }

    #[test]
    fn invalid_selector_is_an_error() {
        assert!(matches!(
            create_selector("div[[["),
            Err(Error::ParseInvalidSelector(_))
        ));
    }
}
