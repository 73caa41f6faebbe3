//! HTTP API Client
//!
//! Functions for communicating with the Threadwatch REST API. Both
//! primitives ride on the browser's ambient session cookie; callers never
//! handle credentials themselves.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::format::DateValue;

/// Errors that can occur while talking to the API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-success HTTP status; the message is the raw response body
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Get the API base URL from local storage or use the same-origin default
pub fn api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("threadwatch_api_url") {
                url
            } else {
                String::new()
            }
        } else {
            String::new()
        }
    } else {
        String::new()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("threadwatch_api_url", url);
        }
    }
}

// ============ Response Types ============

/// Outcome of a write endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
}

/// Aggregate scraper health shown on the overview and parser pages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParserStatus {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub has_tasks: bool,
    #[serde(default)]
    pub posts_running: bool,
    #[serde(default)]
    pub accounts_running: bool,
    #[serde(default)]
    pub posts_ok: bool,
    #[serde(default)]
    pub accounts_ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct OverviewResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub parser_status: ParserStatus,
}

#[derive(Debug, Deserialize)]
pub struct AccountsResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub accounts: Vec<String>,
    /// Auto-track flag per account handle; absent entries default to on
    #[serde(default)]
    pub auto_add: HashMap<String, bool>,
}

#[derive(Debug, Deserialize)]
pub struct PostsResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub posts: Vec<String>,
}

/// One comment scraped from a post
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
}

/// Time-windowed delta for one metric, pre-aggregated server-side
#[derive(Debug, Clone, Deserialize)]
pub struct DynamicsEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub delta: i64,
}

/// One hour of a tracked post's first 24 hours
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyBucket {
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub delta: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricOption {
    pub key: String,
    #[serde(default)]
    pub label: String,
}

/// Counters for a single post. Every field may be absent until the parser
/// first visits the post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostStats {
    #[serde(default)]
    pub views: Option<i64>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub comments: Option<i64>,
    #[serde(default)]
    pub repost: Option<i64>,
    #[serde(default)]
    pub shared: Option<i64>,
    #[serde(default, rename = "dateTime")]
    pub date_time: DateValue,
    #[serde(default)]
    pub comments_list: Vec<Comment>,
    #[serde(default)]
    pub comments_threads: Vec<Vec<Comment>>,
}

#[derive(Debug, Deserialize)]
pub struct PostStatsResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub stats: PostStats,
    #[serde(default)]
    pub post_date: DateValue,
    #[serde(default)]
    pub dynamics: HashMap<String, Vec<DynamicsEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountStats {
    #[serde(default)]
    pub followers: Option<i64>,
}

/// A post discovered on a tracked account
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostRef {
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "dateTime")]
    pub date_time: DateValue,
}

/// Follower delta since the account's latest post went up
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SincePost {
    #[serde(default)]
    pub delta: i64,
    #[serde(default)]
    pub post_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AccountStatsResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub stats: AccountStats,
    #[serde(default)]
    pub posts: Vec<PostRef>,
    #[serde(default)]
    pub latest_post: PostRef,
    #[serde(default)]
    pub tracked_posts: Vec<String>,
    #[serde(default)]
    pub followers_dynamics: Vec<DynamicsEntry>,
    #[serde(default)]
    pub followers_since_post: SincePost,
    #[serde(default)]
    pub post_hourly_options: Vec<HourlyBucket>,
}

/// A post whose first-24-hours tracking has finalized
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryItem {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub started_at_human: String,
    #[serde(default)]
    pub completed_at: String,
    #[serde(default)]
    pub completed_at_human: String,
    #[serde(default)]
    pub post_date: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryPostResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub post_date: String,
    #[serde(default)]
    pub metric_options: Vec<MetricOption>,
    #[serde(default)]
    pub hourly_by_metric: HashMap<String, Vec<HourlyBucket>>,
    #[serde(default)]
    pub ready_hours: i64,
    #[serde(default)]
    pub started_at_human: String,
    #[serde(default)]
    pub completed_at_human: String,
}

#[derive(Debug, Deserialize)]
pub struct ParsersResponse {
    pub ok: bool,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub status_posts: bool,
    #[serde(default)]
    pub status_accounts: bool,
    #[serde(default)]
    pub parser_status: ParserStatus,
}

// ============ Request Primitives ============

/// Authenticated GET returning parsed JSON
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = Request::get(url)
        .credentials(RequestCredentials::SameOrigin)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Http {
            status: response.status(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}

/// Authenticated form-encoded POST returning parsed JSON
pub async fn submit_form<T: DeserializeOwned>(
    url: &str,
    fields: &[(&str, String)],
) -> Result<T, FetchError> {
    let response = Request::post(url)
        .credentials(RequestCredentials::SameOrigin)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form_encode(fields))
        .map_err(|e| FetchError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Http {
            status: response.status(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}

fn form_encode(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

// ============ API Functions ============

/// Sign in with username and password
pub async fn login(username: &str, password: &str) -> Result<Ack, FetchError> {
    submit_form(
        &format!("{}/api/login", api_base()),
        &[
            ("username", username.to_string()),
            ("password", password.to_string()),
        ],
    )
    .await
}

/// Drop the current session
pub async fn logout() -> Result<Ack, FetchError> {
    submit_form(&format!("{}/api/logout", api_base()), &[]).await
}

/// Fetch the signed-in user
pub async fn fetch_me() -> Result<MeResponse, FetchError> {
    fetch_json(&format!("{}/api/me", api_base())).await
}

/// Fetch the overview payload (user plus scraper health)
pub async fn fetch_overview() -> Result<OverviewResponse, FetchError> {
    fetch_json(&format!("{}/api/threads", api_base())).await
}

/// Fetch tracked accounts with their auto-track flags
pub async fn fetch_accounts() -> Result<AccountsResponse, FetchError> {
    fetch_json(&format!("{}/api/threads/accounts", api_base())).await
}

/// Start tracking an account
pub async fn add_account(account: &str) -> Result<Ack, FetchError> {
    submit_form(
        &format!("{}/api/threads/accounts/add", api_base()),
        &[("account", account.to_string())],
    )
    .await
}

/// Fetch per-account statistics
pub async fn fetch_account_stats(item: &str) -> Result<AccountStatsResponse, FetchError> {
    fetch_json(&format!(
        "{}/api/threads/accounts/stats?item={}",
        api_base(),
        urlencoding::encode(item)
    ))
    .await
}

/// Fetch tracked posts
pub async fn fetch_posts() -> Result<PostsResponse, FetchError> {
    fetch_json(&format!("{}/api/threads/posts", api_base())).await
}

/// Start tracking a post
pub async fn add_post(post: &str) -> Result<Ack, FetchError> {
    submit_form(
        &format!("{}/api/threads/posts/add", api_base()),
        &[("post", post.to_string())],
    )
    .await
}

/// Fetch per-post statistics
pub async fn fetch_post_stats(item: &str) -> Result<PostStatsResponse, FetchError> {
    fetch_json(&format!(
        "{}/api/threads/posts/stats?item={}",
        api_base(),
        urlencoding::encode(item)
    ))
    .await
}

/// Fetch finalized tracking history
pub async fn fetch_history() -> Result<HistoryResponse, FetchError> {
    fetch_json(&format!("{}/api/threads/history", api_base())).await
}

/// Fetch hourly metrics for one finalized post
pub async fn fetch_history_post(item: &str) -> Result<HistoryPostResponse, FetchError> {
    fetch_json(&format!(
        "{}/api/threads/history/post?item={}",
        api_base(),
        urlencoding::encode(item)
    ))
    .await
}

/// Fetch scraper process status
pub async fn fetch_parsers() -> Result<ParsersResponse, FetchError> {
    fetch_json(&format!("{}/api/threads/parsers", api_base())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_encode() {
        let body = form_encode(&[
            ("account", "@some user".to_string()),
            ("enabled", "1".to_string()),
        ]);
        assert_eq!(body, "account=%40some%20user&enabled=1");
    }

    #[test]
    fn test_form_encode_empty_value() {
        assert_eq!(form_encode(&[("item", String::new())]), "item=");
    }

    #[test]
    fn test_post_stats_defaults_when_empty() {
        let stats: PostStats = serde_json::from_value(json!({})).unwrap();
        assert_eq!(stats.views, None);
        assert!(stats.comments_list.is_empty());
        assert!(stats.comments_threads.is_empty());
        assert!(!stats.date_time.has_value());
    }

    #[test]
    fn test_post_stats_keeps_zero_counts() {
        let stats: PostStats = serde_json::from_value(json!({
            "views": 0,
            "likes": null,
            "dateTime": {"msk_human": "2024-05-01 10:00:00 MSK"},
            "comments_threads": [[{"username": "a", "text": "hi"}]],
        }))
        .unwrap();
        assert_eq!(stats.views, Some(0));
        assert_eq!(stats.likes, None);
        assert!(stats.date_time.has_value());
        assert_eq!(stats.comments_threads[0][0].username, "a");
    }

    #[test]
    fn test_account_stats_response_tolerates_sparse_payload() {
        let response: AccountStatsResponse = serde_json::from_value(json!({
            "ok": true,
            "item": "@handle",
            "stats": {"followers": 120},
            "followers_since_post": {},
            "posts": [{"url": "https://example.com/p/1", "dateTime": {}}],
        }))
        .unwrap();
        assert_eq!(response.stats.followers, Some(120));
        assert!(response.followers_since_post.post_url.is_empty());
        assert_eq!(response.posts.len(), 1);
        assert!(response.tracked_posts.is_empty());
    }
}
