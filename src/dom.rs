//! DOM Binding Helpers
//!
//! Thin selection and binding primitives over `web-sys`. Optional page
//! regions are the norm here: every helper treats "element not found" as a
//! valid, silent outcome, so pages can share code even when a template omits
//! a block.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, UrlSearchParams, Window};

pub fn window() -> Window {
    web_sys::window().expect("no window")
}

pub fn document() -> Document {
    window().document().expect("no document")
}

/// First element matching the selector, if any
pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

/// All elements matching the selector, in document order
pub fn query_all(selector: &str) -> Vec<Element> {
    let list = match document().query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_html(selector: &str) -> Option<HtmlElement> {
    query(selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_input(selector: &str) -> Option<HtmlInputElement> {
    query(selector).and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

pub fn query_select(selector: &str) -> Option<HtmlSelectElement> {
    query(selector).and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
}

/// Set an element's text. Missing element is a no-op; missing value clears.
pub fn bind_text(selector: &str, value: Option<&str>) {
    if let Some(element) = query(selector) {
        element.set_text_content(Some(value.unwrap_or("")));
    }
}

/// Current value of an input, or empty when the input is absent
pub fn input_value(selector: &str) -> String {
    query_input(selector).map(|input| input.value()).unwrap_or_default()
}

pub fn set_input_value(selector: &str, value: &str) {
    if let Some(input) = query_input(selector) {
        input.set_value(value);
    }
}

/// Toggle an optional region via the `hidden` attribute
pub fn set_visible(selector: &str, visible: bool) {
    if let Some(element) = query_html(selector) {
        element.set_hidden(!visible);
    }
}

/// Page identifier stamped on `<body data-page="...">` by the server
pub fn page_ident() -> Option<String> {
    document().body().and_then(|body| body.get_attribute("data-page"))
}

/// The `item` query parameter scoping per-item detail pages
pub fn query_item() -> Option<String> {
    let search = window().location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params
        .get("item")
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
}

pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

pub fn redirect(url: &str) {
    let _ = window().location().set_href(url);
}

/// Replace the element's click handler. Property assignment keeps re-wiring
/// idempotent across full-page refreshes.
pub fn on_click(element: &HtmlElement, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    element.set_onclick(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}

/// Replace the element's change handler
pub fn on_change(element: &HtmlElement, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    element.set_onchange(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}

/// Replace the element's submit handler
pub fn on_submit(element: &HtmlElement, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    element.set_onsubmit(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}
