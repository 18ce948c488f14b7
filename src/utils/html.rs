//! HTML escaping helpers shared by the serializer and the diff renderer

/// Escape HTML special characters for element content and attribute-free output
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape text node content
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{a0}', "&nbsp;")
}

/// Escape a double-quoted attribute value
pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\u{a0}', "&nbsp;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escaping() {
        let text = "<script>alert('xss')</script>";
        let escaped = escape_html(text);

        assert_eq!(escaped, "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;");
        assert!(!escaped.contains("<script>"));
    }

    #[test]
    fn test_text_and_attribute_escaping() {
        assert_eq!(escape_text("a < b & \"c\""), "a &lt; b &amp; \"c\"");
        assert_eq!(escape_attribute("say \"hi\" & <go>"), "say &quot;hi&quot; &amp; <go>");
    }
}
