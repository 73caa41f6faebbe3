//! List Renderer
//!
//! Builds HTML fragments from fetched collections and swaps them into
//! containers wholesale. Every refresh clears the target and rebuilds it
//! from scratch; lists here are small and refreshes are user-triggered, so
//! there is no diffing layer.

use web_sys::Element;

use crate::api::client::{Comment, DynamicsEntry};

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn empty_state(message: &str) -> String {
    format!("<div class=\"empty-state\">{}</div>", escape_html(message))
}

/// One fragment per item in input order, or a single empty-state fragment
pub fn list_html<T>(
    items: &[T],
    render_item: impl Fn(&T) -> String,
    empty_message: &str,
) -> String {
    if items.is_empty() {
        return empty_state(empty_message);
    }
    items.iter().map(render_item).collect()
}

/// Replace a container's children with the rendered collection
pub fn render_list<T>(
    container: &Element,
    items: &[T],
    render_item: impl Fn(&T) -> String,
    empty_message: &str,
) {
    container.set_inner_html(&list_html(items, render_item, empty_message));
}

/// Comment block for a post. Three mutually exclusive shapes, checked in
/// order: threaded, flat, empty.
pub fn comments_html(threads: &[Vec<Comment>], flat: &[Comment]) -> String {
    if !threads.is_empty() {
        let mut html = String::new();
        for (position, thread) in threads.iter().enumerate() {
            html.push_str(&format!(
                "<div class=\"thread-header\">Thread {} · {} comments</div>",
                position + 1,
                thread.len()
            ));
            for comment in thread {
                html.push_str(&comment_html(comment));
            }
        }
        html
    } else if !flat.is_empty() {
        flat.iter().map(comment_html).collect()
    } else {
        empty_state("No comments yet")
    }
}

fn comment_html(comment: &Comment) -> String {
    format!(
        "<div class=\"comment\"><span class=\"comment-author\">{}</span><span class=\"comment-text\">{}</span></div>",
        escape_html(&comment.username),
        escape_html(&comment.text)
    )
}

/// Card grid for one metric's time-windowed deltas
pub fn dynamics_html(entries: &[DynamicsEntry]) -> String {
    if entries.is_empty() {
        return empty_state("Not enough data yet");
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "<div class=\"dynamics-card\"><span class=\"dynamics-label\">{}</span><span class=\"dynamics-delta\">{}</span></div>",
                escape_html(&entry.label),
                entry.delta
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(username: &str, text: &str) -> Comment {
        Comment {
            username: username.to_string(),
            text: text.to_string(),
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_empty_collection_renders_single_empty_state() {
        let items: Vec<String> = Vec::new();
        let html = list_html(&items, |item| item.clone(), "Nothing here");
        assert_eq!(count(&html, "empty-state"), 1);
        assert!(html.contains("Nothing here"));
    }

    #[test]
    fn test_items_render_in_input_order() {
        let items = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        let html = list_html(&items, |item| format!("<li>{}</li>", item), "none");
        assert_eq!(html, "<li>b</li><li>a</li><li>c</li>");
        assert_eq!(count(&html, "<li>"), items.len());
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let items = vec![1, 2, 3];
        let first = list_html(&items, |n| format!("<li>{}</li>", n), "none");
        let second = list_html(&items, |n| format!("<li>{}</li>", n), "none");
        assert_eq!(first, second);
    }

    #[test]
    fn test_threaded_comments_render_headers_then_flattened_threads() {
        let threads = vec![
            vec![comment("a", "1"), comment("b", "2"), comment("c", "3")],
            vec![comment("d", "4")],
        ];
        let html = comments_html(&threads, &[]);
        assert_eq!(count(&html, "thread-header"), 2);
        assert_eq!(count(&html, "class=\"comment\""), 4);
        assert!(html.contains("Thread 1 · 3 comments"));
        assert!(html.contains("Thread 2 · 1 comments"));
        let first_thread = html.find("Thread 1").unwrap();
        let second_thread = html.find("Thread 2").unwrap();
        assert!(first_thread < second_thread);
    }

    #[test]
    fn test_flat_comments_render_without_headers() {
        let flat = vec![comment("a", "1"), comment("b", "2")];
        let html = comments_html(&[], &flat);
        assert_eq!(count(&html, "thread-header"), 0);
        assert_eq!(count(&html, "class=\"comment\""), 2);
    }

    #[test]
    fn test_no_comments_renders_single_empty_state() {
        let html = comments_html(&[], &[]);
        assert_eq!(count(&html, "empty-state"), 1);
        assert_eq!(count(&html, "class=\"comment\""), 0);
    }

    #[test]
    fn test_threaded_shape_wins_over_flat() {
        let threads = vec![vec![comment("a", "1")]];
        let flat = vec![comment("x", "ignored"), comment("y", "ignored")];
        let html = comments_html(&threads, &flat);
        assert_eq!(count(&html, "thread-header"), 1);
        assert_eq!(count(&html, "class=\"comment\""), 1);
    }

    #[test]
    fn test_comment_text_is_escaped() {
        let html = comments_html(&[], &[comment("<script>", "a & b")]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_dynamics_grid() {
        let entries = vec![
            DynamicsEntry { label: "15 min".to_string(), delta: 4 },
            DynamicsEntry { label: "1 hour".to_string(), delta: -2 },
        ];
        let html = dynamics_html(&entries);
        assert_eq!(count(&html, "dynamics-card"), 2);
        assert!(html.contains(">4<"));
        assert!(html.contains(">-2<"));
        assert_eq!(count(&dynamics_html(&[]), "empty-state"), 1);
    }
}
