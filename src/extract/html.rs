//! Minimal regex-based HTML helpers shared by the extractors.
//!
//! Deliberately shallow: extraction must never raise on malformed or
//! non-HTML input, so these helpers degrade to returning the input text
//! (tags stripped) or nothing at all.

use regex::Regex;

/// Inner markup of the first element carrying the given class.
///
/// Matching stops at the first closing tag, which is sufficient for the
/// leaf-level info blocks the site extractors target.
pub fn element_inner(html: &str, class: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)<[a-z][a-z0-9]*[^>]*class=["'][^"']*{}[^"']*["'][^>]*>(.*?)</[a-z][a-z0-9]*>"#,
        regex::escape(class)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Content attribute of a named `<meta>` tag, either attribute order.
pub fn meta_content(html: &str, name: &str) -> Option<String> {
    let name = regex::escape(name);
    let patterns = [
        format!(r#"(?is)<meta[^>]*name=["']{name}["'][^>]*content=["']([^"']*)["']"#),
        format!(r#"(?is)<meta[^>]*content=["']([^"']*)["'][^>]*name=["']{name}["']"#),
    ];

    for pattern in &patterns {
        if let Some(content) = Regex::new(pattern)
            .ok()
            .and_then(|re| re.captures(html))
            .and_then(|cap| cap.get(1))
            .map(|m| decode_entities(m.as_str().trim()))
        {
            if !content.is_empty() {
                return Some(content);
            }
        }
    }
    None
}

/// Markup reduced to visible text: scripts, styles, and tags removed,
/// `<br>` turned into newlines, entities decoded, whitespace collapsed
/// per line.
pub fn visible_text(html: &str) -> String {
    let script_pattern = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    let br_pattern = Regex::new(r"(?i)<br\s*/?>").unwrap();
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();

    let mut text = script_pattern.replace_all(html, "").to_string();
    text = style_pattern.replace_all(&text, "").to_string();
    text = br_pattern.replace_all(&text, "\n").to_string();
    text = tag_pattern.replace_all(&text, " ").to_string();
    text = decode_entities(&text);

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode the handful of entities that matter for field text.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_inner_by_class() {
        let html = r#"<div class="wrap"><div class="info-block">Price : $1995<br>Beds : 3</div></div>"#;
        let inner = element_inner(html, "info-block").unwrap();
        assert!(inner.contains("Price : $1995"));
        assert!(inner.contains("Beds : 3"));
    }

    #[test]
    fn test_element_inner_missing() {
        assert!(element_inner("<p>nothing here</p>", "info-block").is_none());
        assert!(element_inner("not html at all", "info-block").is_none());
    }

    #[test]
    fn test_meta_content_both_orders() {
        let a = r#"<meta name="description" content="Located at 12 Elm" />"#;
        let b = r#"<meta content="Located at 12 Elm" name="description" />"#;
        assert_eq!(meta_content(a, "description").as_deref(), Some("Located at 12 Elm"));
        assert_eq!(meta_content(b, "description").as_deref(), Some("Located at 12 Elm"));
        assert!(meta_content(a, "keywords").is_none());
    }

    #[test]
    fn test_visible_text_strips_scripts_and_tags() {
        let html = r#"
            <script>var hidden = 1;</script>
            <style>.x { color: red }</style>
            <h1>For &amp; Rent</h1>
            <p>Only   $1,995 per month</p>
        "#;
        let text = visible_text(html);
        assert!(!text.contains("hidden"));
        assert!(!text.contains("color"));
        assert!(text.contains("For & Rent"));
        assert!(text.contains("Only $1,995 per month"));
    }

    #[test]
    fn test_visible_text_handles_non_html() {
        let text = visible_text("just some words, no markup");
        assert_eq!(text, "just some words, no markup");
        assert_eq!(visible_text(""), "");
    }

    #[test]
    fn test_br_becomes_newline() {
        let text = visible_text("Price : $1995<br>Beds : 3<br/>Baths : 2");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["Price : $1995", "Beds : 3", "Baths : 2"]);
    }
}
