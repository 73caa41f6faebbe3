//! Account Pages
//!
//! The tracked-accounts list and the per-account statistics page.

use std::collections::HashSet;

use wasm_bindgen_futures::spawn_local;

use crate::actions;
use crate::api::client::{self, FetchError, PostRef};
use crate::dom;
use crate::format;
use crate::render::{self, escape_html};
use crate::selector;

/// Account list: one row per tracked account with its stats link, the
/// auto-track toggle and a remove button
pub async fn init_list() -> Result<(), FetchError> {
    let data = client::fetch_accounts().await?;
    dom::bind_text("#who", Some(&data.who));

    if let Some(list) = dom::query("#accounts-list") {
        render::render_list(
            &list,
            &data.accounts,
            |account| {
                let auto = data.auto_add.get(account.as_str()).copied().unwrap_or(true);
                account_row(account, auto)
            },
            "No accounts yet",
        );
    }

    if let Some(form) = dom::query_html("#account-form") {
        dom::on_submit(&form, |event| {
            event.prevent_default();
            let account = dom::input_value("#account-input");
            if account.trim().is_empty() {
                return;
            }
            spawn_local(async move {
                if let Err(err) = client::add_account(account.trim()).await {
                    web_sys::console::error_1(
                        &format!("threadwatch: add account failed: {err}").into(),
                    );
                }
                dom::set_input_value("#account-input", "");
                refresh_list();
            });
        });
    }

    if let Some(list) = dom::query_html("#accounts-list") {
        actions::delegate(&list, refresh_list);
    }
    Ok(())
}

fn refresh_list() {
    super::spawn_page(init_list());
}

fn account_row(account: &str, auto: bool) -> String {
    let name = escape_html(account);
    let stats_href = format!(
        "/threads/accounts/stats?item={}",
        urlencoding::encode(account)
    );
    let checked = if auto { " checked" } else { "" };
    format!(
        "<li class=\"list-row\" data-item=\"{name}\">\
         <a class=\"row-link\" href=\"{stats_href}\">{name}</a>\
         <label class=\"row-toggle\">\
         <input type=\"checkbox\" data-auto-toggle=\"{name}\"{checked}>\
         auto-track latest post</label>\
         <button type=\"button\" class=\"row-remove\" data-remove-account=\"{name}\">Remove</button>\
         </li>"
    )
}

/// Per-account statistics: followers, dynamics cards, the hourly view for
/// the latest tracked post, and the posts discovered on the account
pub async fn init_stats() -> Result<(), FetchError> {
    let Some(item) = dom::query_item() else {
        return Ok(());
    };
    let data = client::fetch_account_stats(&item).await?;

    dom::bind_text("#who", Some(&data.who));
    dom::bind_text("#account-name", Some(&data.item));
    dom::bind_text("#followers", Some(&format::count_text(data.stats.followers)));

    if let Some(link) = dom::query("#latest-post-url") {
        if data.latest_post.url.is_empty() {
            link.set_text_content(Some(format::PLACEHOLDER));
            let _ = link.remove_attribute("href");
        } else {
            link.set_text_content(Some(&data.latest_post.url));
            let _ = link.set_attribute("href", &data.latest_post.url);
        }
    }
    dom::bind_text("#latest-post-date", Some(&data.latest_post.date_time.display()));

    if let Some(grid) = dom::query("#followers-dynamics") {
        grid.set_inner_html(&render::dynamics_html(&data.followers_dynamics));
    }

    let since = &data.followers_since_post;
    dom::set_visible("#since-post", !since.post_url.is_empty());
    if !since.post_url.is_empty() {
        dom::bind_text("#since-post-delta", Some(&since.delta.to_string()));
        dom::bind_text("#since-post-url", Some(&since.post_url));
    }

    selector::install_bucket_select(
        "#hourly-select",
        "#hourly-delta",
        "#hourly-empty",
        &data.post_hourly_options,
    );

    if let Some(list) = dom::query("#account-posts") {
        let tracked: HashSet<&str> = data.tracked_posts.iter().map(String::as_str).collect();
        render::render_list(
            &list,
            &data.posts,
            |post| post_row(post, tracked.contains(post.url.as_str())),
            "No posts discovered yet",
        );
    }

    // The refresh control lives in the template; stamp it with the account
    // so the delegated handler knows its target.
    if let Some(button) = dom::query("#refresh-button") {
        let _ = button.set_attribute("data-refresh-account", &data.item);
    }
    if let Some(container) = dom::query_html("#account-stats") {
        actions::delegate(&container, refresh_stats);
    }
    Ok(())
}

fn refresh_stats() {
    super::spawn_page(init_stats());
}

fn post_row(post: &PostRef, tracked: bool) -> String {
    let url = escape_html(&post.url);
    let stats_href = format!("/threads/posts/stats?item={}", urlencoding::encode(&post.url));
    let date = escape_html(&post.date_time.display());
    let control = if tracked {
        "<span class=\"row-tracked\">Tracked</span>".to_string()
    } else {
        format!("<button type=\"button\" class=\"row-track\" data-track-post=\"{url}\">Track</button>")
    };
    format!(
        "<li class=\"list-row\" data-item=\"{url}\">\
         <a class=\"row-link\" href=\"{stats_href}\">{url}</a>\
         <span class=\"row-date\">{date}</span>\
         {control}\
         </li>"
    )
}
