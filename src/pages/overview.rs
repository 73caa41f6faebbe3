//! Threads Overview Page
//!
//! Landing page of the analytics section: the signed-in user plus the
//! aggregate scraper health badge.

use crate::api::client::{self, FetchError};
use crate::dom;

pub async fn init() -> Result<(), FetchError> {
    let data = client::fetch_overview().await?;
    dom::bind_text("#who", Some(&data.who));
    super::bind_parser_badge("#parser-status", &data.parser_status);
    Ok(())
}
