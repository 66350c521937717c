//! User text sanitization
//!
//! Grievance text is rendered as markup by the portal views, so every tag
//! is stripped before storage except a small formatting allowlist. Kept
//! tags are re-emitted in canonical form with all attributes dropped.

/// Formatting tags preserved in sanitized text
const ALLOWED_TAGS: [&str; 5] = ["b", "i", "em", "strong", "br"];

/// Strip markup and control characters from user text.
///
/// - Tags outside the allowlist are removed entirely, keeping their inner
///   text. Allowed tags are normalized to lowercase with attributes
///   dropped (`<B class="x">` becomes `<b>`, `<br/>` becomes `<br>`).
/// - A `<` not followed by a letter or `/` is kept as literal text; an
///   unterminated tag is dropped to the end of input.
/// - Control characters are removed, keeping newline and tab.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' && matches!(chars.peek(), Some(&n) if n.is_ascii_alphabetic() || n == '/') {
            let mut span = String::new();
            let mut terminated = false;
            for t in chars.by_ref() {
                if t == '>' {
                    terminated = true;
                    break;
                }
                span.push(t);
            }
            if terminated {
                if let Some(tag) = canonical_tag(&span) {
                    out.push_str(&tag);
                }
            }
        } else if c == '\n' || c == '\t' {
            out.push(c);
        } else if !c.is_control() {
            out.push(c);
        }
    }

    out
}

/// Canonical form of an allowed tag span, `None` for everything else
fn canonical_tag(span: &str) -> Option<String> {
    let body = span.strip_prefix('/');
    let closing = body.is_some();
    let body = body.unwrap_or(span);

    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return None;
    }

    if closing {
        Some(format!("</{}>", name))
    } else {
        Some(format!("<{}>", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize_text("Left dishes in the sink"), "Left dishes in the sink");
    }

    #[test]
    fn test_script_tags_stripped() {
        assert_eq!(
            sanitize_text("<script>alert(1)</script>hello"),
            "alert(1)hello"
        );
    }

    #[test]
    fn test_formatting_tags_kept() {
        assert_eq!(
            sanitize_text("<b>very</b> <em>annoyed</em><br>today"),
            "<b>very</b> <em>annoyed</em><br>today"
        );
    }

    #[test]
    fn test_attributes_dropped_from_allowed_tags() {
        assert_eq!(
            sanitize_text(r#"<b onclick="evil()">bold</b>"#),
            "<b>bold</b>"
        );
        assert_eq!(sanitize_text("<BR/>"), "<br>");
    }

    #[test]
    fn test_literal_angle_brackets_kept() {
        assert_eq!(sanitize_text("5 < 6 and 7 > 2"), "5 < 6 and 7 > 2");
        assert_eq!(sanitize_text("i <3 u"), "i <3 u");
    }

    #[test]
    fn test_unterminated_tag_dropped() {
        assert_eq!(sanitize_text("truncated <a href="), "truncated ");
    }

    #[test]
    fn test_control_characters_removed() {
        assert_eq!(sanitize_text("a\u{0007}b\u{001b}[31mc"), "ab[31mc");
        assert_eq!(sanitize_text("line\nbreak\tkept"), "line\nbreak\tkept");
    }

    #[test]
    fn test_nested_disallowed_tags() {
        assert_eq!(
            sanitize_text("<div><b>kept</b><img src=x onerror=alert(1)></div>"),
            "<b>kept</b>"
        );
    }
}
