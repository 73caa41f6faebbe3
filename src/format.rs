//! Display Formatters
//!
//! Pure helpers that turn partially-absent server values into display text.
//! Timestamps arrive from the API in three shapes: a structured object with
//! `msk_human`/`msk`/`raw` fields, a bare string, or nothing at all.

use serde::{Deserialize, Deserializer};

/// Shown wherever a value is absent. Zero is a value and is never replaced.
pub const PLACEHOLDER: &str = "—";

/// A timestamp as the API delivers it.
///
/// `Structured` keeps the three textual fields the backend fills in: a
/// human-readable MSK form, an ISO MSK form, and whatever raw text the
/// scraper captured. Display always prefers the human form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DateValue {
    Structured {
        human: String,
        msk: String,
        raw: String,
    },
    Plain(String),
    #[default]
    Missing,
}

impl DateValue {
    /// Build from any JSON shape. Unknown shapes collapse to `Missing`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(fields) => {
                let text = |key: &str| {
                    fields
                        .get(key)
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                };
                DateValue::Structured {
                    human: text("msk_human"),
                    msk: text("msk"),
                    raw: text("raw"),
                }
            }
            serde_json::Value::String(text) => DateValue::Plain(text.clone()),
            _ => DateValue::Missing,
        }
    }

    /// Display text: `msk_human`, then `msk`, then `raw`, then a plain
    /// string, then the placeholder.
    pub fn display(&self) -> String {
        match self {
            DateValue::Structured { human, msk, raw } => [human, msk, raw]
                .into_iter()
                .find(|field| !field.is_empty())
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            DateValue::Plain(text) if !text.is_empty() => text.clone(),
            _ => PLACEHOLDER.to_string(),
        }
    }

    /// Whether any textual field is populated.
    pub fn has_value(&self) -> bool {
        match self {
            DateValue::Structured { human, msk, raw } => {
                !human.is_empty() || !msk.is_empty() || !raw.is_empty()
            }
            DateValue::Plain(text) => !text.trim().is_empty(),
            DateValue::Missing => false,
        }
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(DateValue::from_json(&value))
    }
}

/// Date shown on a post-statistics page. The date captured with the stats
/// wins over the record's own post date whenever it is populated; the post
/// date only fills the gap for posts the parser has not visited yet.
pub fn stat_date_text(stats_date: &DateValue, post_date: &DateValue) -> String {
    if stats_date.has_value() {
        stats_date.display()
    } else {
        post_date.display()
    }
}

/// Scalar metric display. `Some(0)` renders as `"0"`.
pub fn count_text(value: Option<i64>) -> String {
    match value {
        Some(count) => count.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Server-formatted text with the placeholder fallback.
pub fn text_or_dash(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> DateValue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_display_prefers_human_field() {
        let date = parse(json!({"msk_human": "A", "msk": "B", "raw": "C"}));
        assert_eq!(date.display(), "A");
    }

    #[test]
    fn test_display_falls_back_in_order() {
        assert_eq!(parse(json!({"msk": "B", "raw": "C"})).display(), "B");
        assert_eq!(parse(json!({"raw": "C"})).display(), "C");
        assert_eq!(parse(json!({})).display(), PLACEHOLDER);
    }

    #[test]
    fn test_display_plain_string() {
        assert_eq!(parse(json!("2024-05-01 10:00")).display(), "2024-05-01 10:00");
        assert_eq!(parse(json!("")).display(), PLACEHOLDER);
    }

    #[test]
    fn test_unknown_shapes_are_missing() {
        assert_eq!(parse(json!(null)), DateValue::Missing);
        assert_eq!(parse(json!(42)), DateValue::Missing);
        assert_eq!(parse(json!(["x"])), DateValue::Missing);
    }

    #[test]
    fn test_has_value() {
        assert!(parse(json!({"raw": "C"})).has_value());
        assert!(!parse(json!({"msk_human": "", "msk": "", "raw": ""})).has_value());
        assert!(parse(json!("x")).has_value());
        assert!(!parse(json!("  ")).has_value());
        assert!(!DateValue::Missing.has_value());
    }

    #[test]
    fn test_stat_date_prefers_embedded_date() {
        let stats_date = parse(json!({"msk_human": "captured"}));
        let post_date = parse(json!({"msk_human": "published"}));
        assert_eq!(stat_date_text(&stats_date, &post_date), "captured");
    }

    #[test]
    fn test_stat_date_falls_back_to_post_date() {
        let empty = parse(json!({"msk_human": "", "msk": "", "raw": ""}));
        let post_date = parse(json!({"msk_human": "published"}));
        assert_eq!(stat_date_text(&empty, &post_date), "published");
        assert_eq!(stat_date_text(&DateValue::Missing, &post_date), "published");
    }

    #[test]
    fn test_count_text_zero_is_a_value() {
        assert_eq!(count_text(Some(0)), "0");
        assert_eq!(count_text(Some(1500)), "1500");
        assert_eq!(count_text(None), PLACEHOLDER);
    }

    #[test]
    fn test_text_or_dash() {
        assert_eq!(text_or_dash("2024-05-01 10:00 MSK"), "2024-05-01 10:00 MSK");
        assert_eq!(text_or_dash("   "), PLACEHOLDER);
        assert_eq!(text_or_dash(""), PLACEHOLDER);
    }
}
