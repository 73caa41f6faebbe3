//! Login Page
//!
//! The only page that handles its own failures: bad credentials and
//! transport trouble both surface as an inline message next to the form.

use wasm_bindgen_futures::spawn_local;

use crate::api::client::{self, Ack, FetchError};
use crate::dom;

pub async fn init() -> Result<(), FetchError> {
    let Some(form) = dom::query_html("#login-form") else {
        return Ok(());
    };
    dom::on_submit(&form, |event| {
        event.prevent_default();
        let username = dom::input_value("#login-username");
        let password = dom::input_value("#login-password");
        spawn_local(async move {
            match client::login(username.trim(), &password).await {
                Ok(ack) if ack.ok => dom::redirect("/"),
                Ok(ack) => show_error(ack.error.as_deref().unwrap_or("Login failed")),
                Err(err) => show_error(&error_text(&err)),
            }
        });
    });
    Ok(())
}

/// Prefer the server's `error` text when the failure body carries one
fn error_text(err: &FetchError) -> String {
    if let FetchError::Http { body, .. } = err {
        if let Ok(ack) = serde_json::from_str::<Ack>(body) {
            if let Some(error) = ack.error {
                return error;
            }
        }
    }
    err.to_string()
}

fn show_error(message: &str) {
    dom::bind_text("#login-error", Some(message));
    dom::set_visible("#login-error", true);
}
