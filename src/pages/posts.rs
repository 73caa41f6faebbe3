//! Post Pages
//!
//! The tracked-posts list and the per-post statistics page.

use wasm_bindgen_futures::spawn_local;

use crate::actions;
use crate::api::client::{self, FetchError};
use crate::dom;
use crate::format;
use crate::render::{self, escape_html};
use crate::selector;

/// Post list: one row per tracked post URL with its stats link and a remove
/// button
pub async fn init_list() -> Result<(), FetchError> {
    let data = client::fetch_posts().await?;
    dom::bind_text("#who", Some(&data.who));

    if let Some(list) = dom::query("#posts-list") {
        render::render_list(&list, &data.posts, |post| post_row(post), "No posts yet");
    }

    if let Some(form) = dom::query_html("#post-form") {
        dom::on_submit(&form, |event| {
            event.prevent_default();
            let post = dom::input_value("#post-input");
            if post.trim().is_empty() {
                return;
            }
            spawn_local(async move {
                if let Err(err) = client::add_post(post.trim()).await {
                    web_sys::console::error_1(
                        &format!("threadwatch: add post failed: {err}").into(),
                    );
                }
                dom::set_input_value("#post-input", "");
                refresh_list();
            });
        });
    }

    if let Some(list) = dom::query_html("#posts-list") {
        actions::delegate(&list, refresh_list);
    }
    Ok(())
}

fn refresh_list() {
    super::spawn_page(init_list());
}

fn post_row(post: &str) -> String {
    let url = escape_html(post);
    let stats_href = format!("/threads/posts/stats?item={}", urlencoding::encode(post));
    format!(
        "<li class=\"list-row\" data-item=\"{url}\">\
         <a class=\"row-link\" href=\"{stats_href}\">{url}</a>\
         <button type=\"button\" class=\"row-remove\" data-remove-post=\"{url}\">Remove</button>\
         </li>"
    )
}

/// Per-post statistics: the five counters, the capture date, the comment
/// block and the dynamics card grid
pub async fn init_stats() -> Result<(), FetchError> {
    let Some(item) = dom::query_item() else {
        return Ok(());
    };
    let data = client::fetch_post_stats(&item).await?;
    let stats = &data.stats;

    dom::bind_text("#who", Some(&data.who));
    if let Some(link) = dom::query("#post-url") {
        link.set_text_content(Some(&data.item));
        let _ = link.set_attribute("href", &data.item);
    }
    dom::bind_text(
        "#post-date",
        Some(&format::stat_date_text(&stats.date_time, &data.post_date)),
    );

    let counters = [
        ("#stat-views", stats.views),
        ("#stat-likes", stats.likes),
        ("#stat-comments", stats.comments),
        ("#stat-repost", stats.repost),
        ("#stat-shared", stats.shared),
    ];
    for (selector, value) in counters {
        dom::bind_text(selector, Some(&format::count_text(value)));
    }

    // Optional region: templates without a comment block skip it silently.
    if let Some(container) = dom::query("#comments") {
        container.set_inner_html(&render::comments_html(
            &stats.comments_threads,
            &stats.comments_list,
        ));
    }

    selector::install_metric_grid("#dynamics-metric", "#dynamics-grid", data.dynamics);

    if let Some(button) = dom::query("#refresh-button") {
        let _ = button.set_attribute("data-refresh-post", &data.item);
    }
    if let Some(container) = dom::query_html("#post-stats") {
        actions::delegate(&container, refresh_stats);
    }
    Ok(())
}

fn refresh_stats() {
    super::spawn_page(init_stats());
}
