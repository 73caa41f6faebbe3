//! Cascading Selector Controller
//!
//! Dependent selection: a primary metric selector determines the option set
//! of a secondary time-bucket selector, which determines one highlighted
//! delta. Bucket data is attached to the options when they are built, so
//! changing a selection never touches the network.

use std::collections::HashMap;

use web_sys::{HtmlOptionElement, HtmlSelectElement};

use crate::api::client::{DynamicsEntry, HourlyBucket, MetricOption};
use crate::dom;
use crate::render;

/// Post metrics in display order, with client-side labels for the pages
/// whose templates do not carry the option list.
pub const METRICS: [(&str, &str); 5] = [
    ("views", "Views"),
    ("likes", "Likes"),
    ("comments", "Comments"),
    ("repost", "Reposts"),
    ("shared", "Shares"),
];

/// What the secondary selector should show for one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPlan {
    /// Option label plus the delta carried as option data
    pub options: Vec<(String, i64)>,
    /// Derived display value: the default (first) option's delta
    pub derived: String,
    /// Whether the empty-state indicator should be shown
    pub empty: bool,
}

/// Plan the secondary selector for a metric's bucket list
pub fn bucket_plan(buckets: &[HourlyBucket]) -> BucketPlan {
    match buckets.first() {
        None => BucketPlan {
            options: Vec::new(),
            derived: "0".to_string(),
            empty: true,
        },
        Some(first) => BucketPlan {
            options: buckets
                .iter()
                .map(|bucket| (bucket.range.clone(), bucket.delta))
                .collect(),
            derived: first.delta.to_string(),
            empty: false,
        },
    }
}

/// Rebuild the bucket selector from a plan, update the derived display and
/// toggle the empty-state indicator
fn apply_plan(
    select: &HtmlSelectElement,
    value_selector: &str,
    empty_selector: &str,
    plan: &BucketPlan,
) {
    select.set_inner_html("");
    for (label, delta) in &plan.options {
        if let Ok(option) = HtmlOptionElement::new_with_text_and_value(label, label) {
            let _ = option.set_attribute("data-delta", &delta.to_string());
            let _ = select.append_child(&option);
        }
    }
    dom::bind_text(value_selector, Some(&plan.derived));
    dom::set_visible(empty_selector, plan.empty);
}

/// Delta attached to the currently selected option
fn selected_delta(select: &HtmlSelectElement) -> Option<String> {
    let index = select.selected_index();
    if index < 0 {
        return None;
    }
    select
        .options()
        .item(index as u32)?
        .get_attribute("data-delta")
}

/// One-level variant: a single bucket selector driving one delta display
pub fn install_bucket_select(
    select_selector: &str,
    value_selector: &str,
    empty_selector: &str,
    buckets: &[HourlyBucket],
) {
    let Some(select) = dom::query_select(select_selector) else {
        return;
    };
    apply_plan(&select, value_selector, empty_selector, &bucket_plan(buckets));

    let value_selector = value_selector.to_string();
    let select_handle = select.clone();
    dom::on_change(&select, move |_| {
        let delta = selected_delta(&select_handle).unwrap_or_else(|| "0".to_string());
        dom::bind_text(&value_selector, Some(&delta));
    });
}

/// Two-level cascade: metric selector feeding a bucket selector feeding one
/// delta display. All bucket data is pre-fetched; an empty option list still
/// runs and just shows the empty state.
pub fn install_cascade(
    metric_selector: &str,
    bucket_selector: &str,
    value_selector: &str,
    empty_selector: &str,
    options: &[MetricOption],
    buckets_by_metric: HashMap<String, Vec<HourlyBucket>>,
) {
    let Some(metric_select) = dom::query_select(metric_selector) else {
        return;
    };
    let Some(bucket_select) = dom::query_select(bucket_selector) else {
        return;
    };

    metric_select.set_inner_html("");
    for option in options {
        if let Ok(element) = HtmlOptionElement::new_with_text_and_value(&option.label, &option.key)
        {
            let _ = metric_select.append_child(&element);
        }
    }

    let initial_key = options.first().map(|o| o.key.clone()).unwrap_or_default();
    let initial = buckets_by_metric
        .get(&initial_key)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    apply_plan(&bucket_select, value_selector, empty_selector, &bucket_plan(initial));

    {
        let metric_handle = metric_select.clone();
        let bucket_handle = bucket_select.clone();
        let value_selector = value_selector.to_string();
        let empty_selector = empty_selector.to_string();
        dom::on_change(&metric_select, move |_| {
            let key = metric_handle.value();
            let buckets = buckets_by_metric
                .get(&key)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            apply_plan(
                &bucket_handle,
                &value_selector,
                &empty_selector,
                &bucket_plan(buckets),
            );
        });
    }

    {
        let bucket_handle = bucket_select.clone();
        let value_selector = value_selector.to_string();
        dom::on_change(&bucket_select, move |_| {
            let delta = selected_delta(&bucket_handle).unwrap_or_else(|| "0".to_string());
            dom::bind_text(&value_selector, Some(&delta));
        });
    }
}

/// One-level grid variant: selecting a metric reveals that metric's card
/// grid, rebuilt from pre-fetched dynamics. Defaults to the first metric.
pub fn install_metric_grid(
    select_selector: &str,
    grid_selector: &str,
    dynamics: HashMap<String, Vec<DynamicsEntry>>,
) {
    let Some(select) = dom::query_select(select_selector) else {
        return;
    };
    select.set_inner_html("");
    for (key, label) in METRICS {
        if let Ok(option) = HtmlOptionElement::new_with_text_and_value(label, key) {
            let _ = select.append_child(&option);
        }
    }

    let grid_selector_owned = grid_selector.to_string();
    render_grid(&grid_selector_owned, &dynamics, METRICS[0].0);

    let select_handle = select.clone();
    dom::on_change(&select, move |_| {
        render_grid(&grid_selector_owned, &dynamics, &select_handle.value());
    });
}

fn render_grid(grid_selector: &str, dynamics: &HashMap<String, Vec<DynamicsEntry>>, key: &str) {
    if let Some(grid) = dom::query(grid_selector) {
        let entries = dynamics.get(key).map(Vec::as_slice).unwrap_or(&[]);
        grid.set_inner_html(&render::dynamics_html(entries));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(range: &str, delta: i64) -> HourlyBucket {
        HourlyBucket {
            hour: None,
            range: range.to_string(),
            delta,
        }
    }

    #[test]
    fn test_plan_uses_first_bucket_as_default() {
        let plan = bucket_plan(&[
            bucket("10:00–11:00", 7),
            bucket("11:00–12:00", 3),
            bucket("12:00–13:00", 0),
        ]);
        assert_eq!(plan.options.len(), 3);
        assert_eq!(plan.derived, "7");
        assert!(!plan.empty);
        assert_eq!(plan.options[2], ("12:00–13:00".to_string(), 0));
    }

    #[test]
    fn test_plan_for_empty_metric() {
        let plan = bucket_plan(&[]);
        assert!(plan.options.is_empty());
        assert_eq!(plan.derived, "0");
        assert!(plan.empty);
    }

    #[test]
    fn test_metric_order_starts_with_views() {
        assert_eq!(METRICS[0].0, "views");
    }
}
