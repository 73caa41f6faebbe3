//! Action Wiring
//!
//! Delegated event handling for mutating controls. One listener pair per
//! container inspects the event target for a marker attribute, turns it into
//! a typed action request, issues the write, and re-runs the page's full
//! initializer. The UI is only ever as fresh as the latest re-fetch; there
//! are no optimistic updates.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::api::client::{self, Ack, FetchError};
use crate::dom;

const MARKERS: [&str; 8] = [
    "data-remove-account",
    "data-auto-toggle",
    "data-remove-post",
    "data-track-post",
    "data-delete-history",
    "data-parser-action",
    "data-refresh-post",
    "data-refresh-account",
];

/// A mutating request extracted from a marked UI element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RemoveAccount(String),
    ToggleAutoTrack { account: String, enabled: bool },
    RemovePost(String),
    TrackPost(String),
    DeleteHistoryItem(String),
    ControlParser(String),
    RefreshPost(String),
    RefreshAccount(String),
}

impl Action {
    /// Classify a marked element. Toggles act only on `change` events, every
    /// other marker only on `click`, so a checkbox click never double-fires.
    pub fn from_marker(event_kind: &str, marker: &str, value: &str, checked: bool) -> Option<Action> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let value = value.to_string();
        match (event_kind, marker) {
            ("change", "data-auto-toggle") => Some(Action::ToggleAutoTrack {
                account: value,
                enabled: checked,
            }),
            ("click", "data-remove-account") => Some(Action::RemoveAccount(value)),
            ("click", "data-remove-post") => Some(Action::RemovePost(value)),
            ("click", "data-track-post") => Some(Action::TrackPost(value)),
            ("click", "data-delete-history") => Some(Action::DeleteHistoryItem(value)),
            ("click", "data-parser-action") => Some(Action::ControlParser(value)),
            ("click", "data-refresh-post") => Some(Action::RefreshPost(value)),
            ("click", "data-refresh-account") => Some(Action::RefreshAccount(value)),
            _ => None,
        }
    }

    /// Write endpoint handling this action
    pub fn endpoint(&self) -> &'static str {
        match self {
            Action::RemoveAccount(_) => "/api/threads/accounts/remove",
            Action::ToggleAutoTrack { .. } => "/api/threads/accounts/auto_toggle",
            Action::RemovePost(_) => "/api/threads/posts/remove",
            Action::TrackPost(_) => "/api/threads/posts/add",
            Action::DeleteHistoryItem(_) => "/api/threads/history/delete",
            Action::ControlParser(_) => "/api/threads/parsers/control",
            Action::RefreshPost(_) => "/api/threads/posts/refresh",
            Action::RefreshAccount(_) => "/api/threads/accounts/refresh",
        }
    }

    /// Form fields identifying the target by its identity string
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Action::RemoveAccount(account) => vec![("account", account.clone())],
            Action::ToggleAutoTrack { account, enabled } => vec![
                ("account", account.clone()),
                ("enabled", if *enabled { "1" } else { "0" }.to_string()),
            ],
            Action::RemovePost(post) | Action::TrackPost(post) => vec![("post", post.clone())],
            Action::DeleteHistoryItem(item) => vec![("item", item.clone())],
            Action::ControlParser(action) => vec![("action", action.clone())],
            Action::RefreshPost(item) | Action::RefreshAccount(item) => {
                vec![("item", item.clone())]
            }
        }
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Action::DeleteHistoryItem(_))
    }

    pub fn confirm_message(&self) -> &'static str {
        "Delete this post and its tracking history?"
    }

    /// Extract an action from a delegated event, walking from the target up
    /// through its ancestors until a marked element is found
    pub fn from_event(event: &web_sys::Event) -> Option<Action> {
        let kind = event.type_();
        let target = event.target()?.dyn_into::<Element>().ok()?;
        let mut current = Some(target);
        while let Some(element) = current {
            for marker in MARKERS {
                if let Some(value) = element.get_attribute(marker) {
                    let checked = element
                        .dyn_ref::<HtmlInputElement>()
                        .map(|input| input.checked())
                        .unwrap_or(false);
                    if let Some(action) = Action::from_marker(&kind, marker, &value, checked) {
                        return Some(action);
                    }
                }
            }
            current = element.parent_element();
        }
        None
    }
}

/// Issue the single write request for an action
pub async fn run(action: &Action) -> Result<Ack, FetchError> {
    client::submit_form(
        &format!("{}{}", client::api_base(), action.endpoint()),
        &action.fields(),
    )
    .await
}

/// Attach the delegated click and change handlers to a container. Events on
/// unmarked elements are ignored; destructive actions ask for confirmation
/// before any request goes out. After the write, `reinit` re-runs the page's
/// initializer whether the write succeeded or not.
pub fn delegate(container: &HtmlElement, reinit: fn()) {
    dom::on_click(container, move |event| handle(event, reinit));
    dom::on_change(container, move |event| handle(event, reinit));
}

fn handle(event: web_sys::Event, reinit: fn()) {
    let Some(action) = Action::from_event(&event) else {
        return;
    };
    if action.needs_confirmation() && !dom::confirm(action.confirm_message()) {
        return;
    }
    spawn_local(async move {
        if let Err(err) = run(&action).await {
            web_sys::console::error_1(&format!("threadwatch: write failed: {err}").into());
        }
        reinit();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_acts_only_on_change_events() {
        let action = Action::from_marker("change", "data-auto-toggle", "@handle", true);
        assert_eq!(
            action,
            Some(Action::ToggleAutoTrack {
                account: "@handle".to_string(),
                enabled: true,
            })
        );
        assert_eq!(Action::from_marker("click", "data-auto-toggle", "@handle", true), None);
    }

    #[test]
    fn test_buttons_act_only_on_click_events() {
        let action = Action::from_marker("click", "data-remove-account", "@handle", false);
        assert_eq!(action, Some(Action::RemoveAccount("@handle".to_string())));
        assert_eq!(Action::from_marker("change", "data-remove-account", "@handle", false), None);
    }

    #[test]
    fn test_empty_or_unknown_markers_are_ignored() {
        assert_eq!(Action::from_marker("click", "data-remove-account", "  ", false), None);
        assert_eq!(Action::from_marker("click", "data-unrelated", "x", false), None);
    }

    #[test]
    fn test_toggle_serializes_enabled_flag() {
        let on = Action::ToggleAutoTrack {
            account: "@handle".to_string(),
            enabled: true,
        };
        assert_eq!(
            on.fields(),
            vec![
                ("account", "@handle".to_string()),
                ("enabled", "1".to_string()),
            ]
        );

        let off = Action::ToggleAutoTrack {
            account: "@handle".to_string(),
            enabled: false,
        };
        assert_eq!(off.fields()[1], ("enabled", "0".to_string()));
    }

    #[test]
    fn test_actions_target_their_identity_string() {
        let url = "https://www.threads.net/@a/post/1".to_string();
        assert_eq!(
            Action::TrackPost(url.clone()).fields(),
            vec![("post", url.clone())]
        );
        assert_eq!(
            Action::DeleteHistoryItem(url.clone()).fields(),
            vec![("item", url)]
        );
        assert_eq!(
            Action::ControlParser("restart_all".to_string()).fields(),
            vec![("action", "restart_all".to_string())]
        );
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            Action::RemovePost(String::from("p")).endpoint(),
            "/api/threads/posts/remove"
        );
        assert_eq!(
            Action::TrackPost(String::from("p")).endpoint(),
            "/api/threads/posts/add"
        );
        assert_eq!(
            Action::RefreshAccount(String::from("a")).endpoint(),
            "/api/threads/accounts/refresh"
        );
    }

    #[test]
    fn test_only_history_delete_needs_confirmation() {
        assert!(Action::DeleteHistoryItem(String::from("x")).needs_confirmation());
        assert!(!Action::RemovePost(String::from("x")).needs_confirmation());
        assert!(!Action::ControlParser(String::from("stop_all")).needs_confirmation());
    }
}
