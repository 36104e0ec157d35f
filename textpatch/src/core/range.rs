//! Replace the text between two literal targets.

/// Result of rewriting a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeEdit {
    /// Bytes `start..end` of the original text were replaced.
    Rewritten {
        text: String,
        start: usize,
        end: usize,
    },
    /// `start` is missing, or `until` does not occur at or after it.
    TargetsNotFound,
}

/// Replace from the first `start` up to (not including) the first `until`
/// found at or after it.
///
/// `start` is part of the replaced span; `until` is kept, so the replacement
/// lands directly in front of it.
pub fn rewrite_range(text: &str, start: &str, until: &str, replacement: &str) -> RangeEdit {
    let Some(start_at) = text.find(start) else {
        return RangeEdit::TargetsNotFound;
    };
    let Some(offset) = text[start_at..].find(until) else {
        return RangeEdit::TargetsNotFound;
    };
    let end = start_at + offset;

    let mut out = String::with_capacity(text.len() - (end - start_at) + replacement.len());
    out.push_str(&text[..start_at]);
    out.push_str(replacement);
    out.push_str(&text[end..]);

    RangeEdit::Rewritten {
        text: out,
        start: start_at,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "      <section className=\"card\">\r\n        <div className=\"status\">";
    const UNTIL: &str = "      <section className=\"card\">\r\n        <div>\r\n          <h2>Advanced</h2>";

    #[test]
    fn replaces_up_to_following_target() {
        let text = format!("<main>\r\n{START}\r\n          old\r\n        </div>\r\n      </section>\r\n{UNTIL}\r\n</main>\r\n");
        let RangeEdit::Rewritten { text: out, .. } =
            rewrite_range(&text, START, UNTIL, "      <LocalAvatarEngineStatusPanel />\n")
        else {
            panic!("expected rewrite");
        };
        assert_eq!(
            out,
            format!("<main>\r\n      <LocalAvatarEngineStatusPanel />\n{UNTIL}\r\n</main>\r\n")
        );
    }

    #[test]
    fn reports_span_and_keeps_until() {
        assert_eq!(
            rewrite_range("ab[cd]ef", "[", "]", "X"),
            RangeEdit::Rewritten {
                text: "abX]ef".to_string(),
                start: 2,
                end: 5,
            }
        );
    }

    #[test]
    fn until_before_start_is_not_found() {
        assert_eq!(
            rewrite_range("] then [", "[", "]", "X"),
            RangeEdit::TargetsNotFound
        );
    }

    #[test]
    fn missing_start_is_not_found() {
        assert_eq!(
            rewrite_range("no targets", "[", "]", "X"),
            RangeEdit::TargetsNotFound
        );
    }

    #[test]
    fn until_may_begin_at_start() {
        // The search for `until` includes the start position itself.
        assert_eq!(
            rewrite_range("a<<b", "<<", "<", "X"),
            RangeEdit::Rewritten {
                text: "aX<<b".to_string(),
                start: 1,
                end: 1,
            }
        );
    }
}
