//! Pages
//!
//! One initializer per page kind. The server stamps the page identifier on
//! the document body; `boot` reads it once, dispatches to the matching
//! initializer and wraps the whole run in a single failure boundary that
//! logs and swallows. Pages other than login propagate failures with `?`.

use std::future::Future;

use crate::api::client::{FetchError, ParserStatus};
use crate::dom;

pub mod accounts;
pub mod history;
pub mod home;
pub mod login;
pub mod overview;
pub mod parsers;
pub mod posts;

/// The closed set of pages this client knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Home,
    Overview,
    Accounts,
    Posts,
    PostStats,
    AccountStats,
    History,
    HistoryPost,
    Parsers,
}

impl Page {
    /// Map a page identifier to its page kind; unknown identifiers get no
    /// initialization at all
    pub fn from_ident(ident: &str) -> Option<Page> {
        match ident {
            "login" => Some(Page::Login),
            "home" => Some(Page::Home),
            "threads" => Some(Page::Overview),
            "threads-accounts" => Some(Page::Accounts),
            "threads-posts" => Some(Page::Posts),
            "threads-post-stats" => Some(Page::PostStats),
            "threads-account-stats" => Some(Page::AccountStats),
            "threads-history" => Some(Page::History),
            "threads-history-post" => Some(Page::HistoryPost),
            "threads-parsers" => Some(Page::Parsers),
            _ => None,
        }
    }
}

/// Run the page's initializer
pub async fn dispatch(page: Page) -> Result<(), FetchError> {
    match page {
        Page::Login => login::init().await,
        Page::Home => home::init().await,
        Page::Overview => overview::init().await,
        Page::Accounts => accounts::init_list().await,
        Page::Posts => posts::init_list().await,
        Page::PostStats => posts::init_stats().await,
        Page::AccountStats => accounts::init_stats().await,
        Page::History => history::init_list().await,
        Page::HistoryPost => history::init_detail().await,
        Page::Parsers => parsers::init().await,
    }
}

/// Read the page identifier and dispatch, exactly once at load time
pub fn boot() {
    let Some(ident) = dom::page_ident() else {
        return;
    };
    let Some(page) = Page::from_ident(&ident) else {
        return;
    };
    spawn_page(dispatch(page));
}

/// Top-level failure boundary: log and leave the page as it is
pub(crate) fn spawn_page<F>(future: F)
where
    F: Future<Output = Result<(), FetchError>> + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = future.await {
            web_sys::console::error_1(&format!("threadwatch: page init failed: {err}").into());
        }
    });
}

/// Bind the aggregate scraper badge: status text plus a `status-{color}`
/// class from the server's color key
pub(crate) fn bind_parser_badge(selector: &str, status: &ParserStatus) {
    let Some(badge) = dom::query(selector) else {
        return;
    };
    badge.set_text_content(Some(&status.text));
    let classes = badge.class_list();
    for stale in ["status-idle", "status-ok", "status-bad"] {
        let _ = classes.remove_1(stale);
    }
    let color = match status.color.as_str() {
        "ok" => "status-ok",
        "bad" => "status-bad",
        _ => "status-idle",
    };
    let _ = classes.add_1(color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_ident_maps_to_a_page() {
        assert_eq!(Page::from_ident("login"), Some(Page::Login));
        assert_eq!(Page::from_ident("home"), Some(Page::Home));
        assert_eq!(Page::from_ident("threads"), Some(Page::Overview));
        assert_eq!(Page::from_ident("threads-accounts"), Some(Page::Accounts));
        assert_eq!(Page::from_ident("threads-posts"), Some(Page::Posts));
        assert_eq!(Page::from_ident("threads-post-stats"), Some(Page::PostStats));
        assert_eq!(
            Page::from_ident("threads-account-stats"),
            Some(Page::AccountStats)
        );
        assert_eq!(Page::from_ident("threads-history"), Some(Page::History));
        assert_eq!(
            Page::from_ident("threads-history-post"),
            Some(Page::HistoryPost)
        );
        assert_eq!(Page::from_ident("threads-parsers"), Some(Page::Parsers));
    }

    #[test]
    fn test_unknown_idents_get_no_initializer() {
        assert_eq!(Page::from_ident(""), None);
        assert_eq!(Page::from_ident("settings"), None);
        assert_eq!(Page::from_ident("THREADS"), None);
    }
}
