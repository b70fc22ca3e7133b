/// Appends `value` to `out`, replacing the five HTML-significant characters with entities.
pub(crate) fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

/// HTML-escapes a string the way `{{name}}` interpolation does.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    push_escaped(&mut out, value);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>&'\""), "&lt;b&gt;&amp;&apos;&quot;");
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }
}
