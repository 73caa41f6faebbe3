//! Threadwatch Dashboard
//!
//! Browser client for the Threadwatch analytics dashboard, compiled to
//! WebAssembly. The server renders the page shells; this module reads the
//! page identifier stamped on the document, pulls JSON from the dashboard
//! API and rebuilds page fragments in place.
//!
//! # Architecture
//!
//! - `api`: typed client for the REST endpoints, cookie-authenticated
//! - `dom`: selection and binding primitives tolerant of absent elements
//! - `format`: fallback formatters for partially-absent server values
//! - `render`: full-teardown list and fragment rendering
//! - `selector`: dependent metric/bucket selection controllers
//! - `actions`: delegated mutating controls, write-then-refetch
//! - `pages`: the page registry and one initializer per page kind
//!
//! Every refresh is a full fetch-and-rebuild cycle; no client-side state
//! survives between renders.

use wasm_bindgen::prelude::*;

pub mod actions;
pub mod api;
pub mod dom;
pub mod format;
pub mod pages;
pub mod render;
pub mod selector;

/// Entry point: install the panic hook and initialize the current page
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    pages::boot();
}
