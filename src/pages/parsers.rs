//! Parser Control Page
//!
//! Scraper process health plus the start/stop/restart controls.

use crate::actions;
use crate::api::client::{self, FetchError};
use crate::dom;

pub async fn init() -> Result<(), FetchError> {
    let data = client::fetch_parsers().await?;
    dom::bind_text("#who", Some(&data.who));
    super::bind_parser_badge("#parser-status", &data.parser_status);
    dom::bind_text("#posts-parser-state", Some(state_text(data.status_posts)));
    dom::bind_text("#accounts-parser-state", Some(state_text(data.status_accounts)));

    if let Some(controls) = dom::query_html("#parser-controls") {
        actions::delegate(&controls, refresh);
    }
    Ok(())
}

fn refresh() {
    super::spawn_page(init());
}

fn state_text(running: bool) -> &'static str {
    if running {
        "Running"
    } else {
        "Stopped"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_text() {
        assert_eq!(state_text(true), "Running");
        assert_eq!(state_text(false), "Stopped");
    }
}
