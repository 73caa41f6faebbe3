//! Tracking History Pages
//!
//! Finalized first-24-hours tracking: the list of completed posts and the
//! per-post hourly detail with its metric/bucket cascade.

use crate::actions;
use crate::api::client::{self, FetchError, HistoryItem};
use crate::dom;
use crate::format;
use crate::render::{self, escape_html};
use crate::selector;

pub async fn init_list() -> Result<(), FetchError> {
    let data = client::fetch_history().await?;
    dom::bind_text("#who", Some(&data.who));

    if let Some(list) = dom::query("#history-list") {
        render::render_list(&list, &data.items, history_row, "No finished tracking yet");
    }
    if let Some(list) = dom::query_html("#history-list") {
        actions::delegate(&list, refresh_list);
    }
    Ok(())
}

fn refresh_list() {
    super::spawn_page(init_list());
}

fn history_row(item: &HistoryItem) -> String {
    let url = escape_html(&item.url);
    let detail_href = format!(
        "/threads/history/post?item={}",
        urlencoding::encode(&item.url)
    );
    format!(
        "<li class=\"list-row\" data-item=\"{url}\">\
         <a class=\"row-link\" href=\"{detail_href}\">{url}</a>\
         <span class=\"row-date\">{post_date}</span>\
         <span class=\"row-started\">{started}</span>\
         <span class=\"row-completed\">{completed}</span>\
         <button type=\"button\" class=\"row-remove\" data-delete-history=\"{url}\">Delete</button>\
         </li>",
        post_date = escape_html(&format::text_or_dash(&item.post_date)),
        started = escape_html(&format::text_or_dash(&item.started_at_human)),
        completed = escape_html(&format::text_or_dash(&item.completed_at_human)),
    )
}

/// Hourly detail for one finalized post
pub async fn init_detail() -> Result<(), FetchError> {
    let Some(item) = dom::query_item() else {
        return Ok(());
    };
    let data = client::fetch_history_post(&item).await?;

    dom::bind_text("#who", Some(&data.who));
    if let Some(link) = dom::query("#post-url") {
        link.set_text_content(Some(&data.item));
        let _ = link.set_attribute("href", &data.item);
    }
    dom::bind_text("#post-date", Some(&format::text_or_dash(&data.post_date)));
    dom::bind_text("#ready-hours", Some(&data.ready_hours.to_string()));
    dom::bind_text("#started-at", Some(&format::text_or_dash(&data.started_at_human)));
    dom::bind_text("#completed-at", Some(&format::text_or_dash(&data.completed_at_human)));

    selector::install_cascade(
        "#metric-select",
        "#hour-select",
        "#hour-delta",
        "#hourly-empty",
        &data.metric_options,
        data.hourly_by_metric,
    );
    Ok(())
}
