//! HTML composition helpers for outbound timeline items.
//!
//! Pure functions: no I/O, no allocation beyond the output string. All
//! interpolated values pass through [`escape_html`]; titles and feed text
//! come from third-party APIs and must not be able to inject markup.

use crate::defaults::{NEARBY_EVENTS_LIMIT, SOCIAL_FEED_LIMIT};

/// Escape a string for safe interpolation into HTML text or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the nearby-events card: a labeled header plus an unordered list of
/// event titles, capped at [`NEARBY_EVENTS_LIMIT`] entries.
///
/// Zero titles renders an empty list element, not an error.
pub fn nearby_events_html(titles: &[String]) -> String {
    let mut html = String::from(
        "<article><section><div class=\"text-normal\">\
         <p style=\"color: #f16924;\">Nearby Events</p><ul class=\"text-x-small\">",
    );
    for title in titles.iter().take(NEARBY_EVENTS_LIMIT) {
        html.push_str("<li>");
        html.push_str(&escape_html(title));
        html.push_str("</li>");
    }
    html.push_str("</ul></div></section></article>");
    html
}

/// Render one social feed entry as a photo card.
///
/// The `<img>` tag appears only when an image URL is present and the text
/// paragraph only when text is present; an entry with neither still yields
/// the minimal wrapper.
pub fn social_entry_html(text: Option<&str>, image_url: Option<&str>) -> String {
    let mut html = String::from("<article class=\"photo\" style=\"background-color:#00a2a5\">");
    if let Some(url) = image_url {
        html.push_str("<img src=\"");
        html.push_str(&escape_html(url));
        html.push_str("\" height=\"100%\">");
    }
    html.push_str("<div class=\"photo-overlay\"></div><section>");
    if let Some(text) = text {
        html.push_str("<p class=\"text-auto-size\">");
        html.push_str(&escape_html(text));
        html.push_str("</p>");
    }
    html.push_str("</section></article>");
    html
}

/// Extract up to [`SOCIAL_FEED_LIMIT`] `(text, low-resolution image URL)`
/// pairs from a social feed response.
///
/// Entries live in the feed's `data` array; both fields are optional per
/// entry. A feed without a `data` array yields no entries.
pub fn social_feed_entries(feed: &serde_json::Value) -> Vec<(Option<String>, Option<String>)> {
    let Some(entries) = feed.get("data").and_then(|d| d.as_array()) else {
        return Vec::new();
    };
    entries
        .iter()
        .take(SOCIAL_FEED_LIMIT)
        .map(|entry| {
            let text = entry
                .get("text")
                .and_then(|t| t.as_str())
                .map(str::to_string);
            let image = entry
                .get("images")
                .and_then(|i| i.get("low_resolution"))
                .and_then(|u| u.as_str())
                .map(str::to_string);
            (text, image)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(
            escape_html(r#"<b a="1">&'x'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#39;x&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_nearby_events_html_basic() {
        let titles = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let html = nearby_events_html(&titles);
        assert!(html.contains("Nearby Events"));
        assert_eq!(html.matches("<li>").count(), 3);
        assert!(html.contains("<li>A</li><li>B</li><li>C</li>"));
        assert!(html.ends_with("</ul></div></section></article>"));
    }

    #[test]
    fn test_nearby_events_html_empty_list() {
        let html = nearby_events_html(&[]);
        assert!(html.contains("<ul class=\"text-x-small\"></ul>"));
    }

    #[test]
    fn test_nearby_events_html_caps_entries() {
        for n in [0usize, 1, 5, 6, 100] {
            let titles: Vec<String> = (0..n).map(|i| format!("event {i}")).collect();
            let html = nearby_events_html(&titles);
            assert_eq!(html.matches("<li>").count(), n.min(NEARBY_EVENTS_LIMIT));
        }
    }

    #[test]
    fn test_nearby_events_html_escapes_titles() {
        let titles = vec!["<script>alert(1)</script>".to_string()];
        let html = nearby_events_html(&titles);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_social_entry_html_with_both() {
        let html = social_entry_html(Some("hello"), Some("https://cdn/img.jpg"));
        assert_eq!(html.matches("<img").count(), 1);
        assert!(html.contains("src=\"https://cdn/img.jpg\""));
        assert!(html.contains("<p class=\"text-auto-size\">hello</p>"));
    }

    #[test]
    fn test_social_entry_html_image_only() {
        let html = social_entry_html(None, Some("https://cdn/img.jpg"));
        assert_eq!(html.matches("<img").count(), 1);
        assert!(!html.contains("<p class="));
    }

    #[test]
    fn test_social_entry_html_text_only() {
        let html = social_entry_html(Some("just words"), None);
        assert_eq!(html.matches("<img").count(), 0);
        assert!(html.contains("just words"));
    }

    #[test]
    fn test_social_entry_html_degenerate_wrapper() {
        // Neither text nor image still produces the minimal card.
        let html = social_entry_html(None, None);
        assert!(html.starts_with("<article class=\"photo\""));
        assert!(html.ends_with("</section></article>"));
        assert_eq!(html.matches("<img").count(), 0);
    }

    #[test]
    fn test_social_feed_entries_extraction() {
        let feed = json!({
            "data": [
                {"text": "first", "images": {"low_resolution": "https://cdn/1.jpg"}},
                {"text": "second"},
                {"images": {"low_resolution": "https://cdn/3.jpg"}},
                {}
            ]
        });
        let entries = social_feed_entries(&feed);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].0.as_deref(), Some("first"));
        assert_eq!(entries[0].1.as_deref(), Some("https://cdn/1.jpg"));
        assert_eq!(entries[1].1, None);
        assert_eq!(entries[2].0, None);
        assert_eq!(entries[3], (None, None));
    }

    #[test]
    fn test_social_feed_entries_caps_at_limit() {
        let data: Vec<_> = (0..20).map(|i| json!({"text": format!("e{i}")})).collect();
        let feed = json!({ "data": data });
        assert_eq!(social_feed_entries(&feed).len(), SOCIAL_FEED_LIMIT);
    }

    #[test]
    fn test_social_feed_entries_missing_data_array() {
        assert!(social_feed_entries(&json!({})).is_empty());
        assert!(social_feed_entries(&json!({"data": "oops"})).is_empty());
    }
}
