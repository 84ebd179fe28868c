/// Escape a string for HTML text, attribute values and XML character data.
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_basic_characters() {
        assert_eq!(html_escape("Notes on CS"), "Notes on CS");
        assert_eq!(html_escape("AI & ML"), "AI &amp; ML");
        assert_eq!(html_escape("Vec<u8>"), "Vec&lt;u8&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#x27;s");
    }

    #[test]
    fn test_html_escape_attribute_breakout() {
        assert_eq!(
            html_escape("\" onmouseover=\"alert(1)"),
            "&quot; onmouseover=&quot;alert(1)"
        );
        assert_eq!(
            html_escape("</title><script>x()</script>"),
            "&lt;/title&gt;&lt;script&gt;x()&lt;/script&gt;"
        );
    }

    #[test]
    fn test_html_escape_passthrough() {
        assert_eq!(html_escape(""), "");
        assert_eq!(html_escape("Autumn – Blog"), "Autumn – Blog");
        assert_eq!(html_escape("ジャズ理論"), "ジャズ理論");
    }
}
