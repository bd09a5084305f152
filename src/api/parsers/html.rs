use scraper::{ElementRef, Selector};

use crate::errors::ParseError;

pub fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector { css })
}

/// Visible text with runs of whitespace collapsed
pub fn text_of(element: ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Text of the first match under `element`, if any
pub fn child_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(text_of)
}

/// Like [`child_text`] but absent or blank cells are `None`
pub fn non_empty(element: ElementRef, selector: &Selector) -> Option<String> {
    child_text(element, selector).filter(|text| !text.is_empty())
}
