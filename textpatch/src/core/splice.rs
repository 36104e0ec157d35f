//! Replace the delimited section that encloses a marker.

/// Result of splicing a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice {
    /// Bytes `start..end` of the original text were replaced.
    Spliced {
        text: String,
        start: usize,
        end: usize,
    },
    /// The marker does not occur in the text.
    MarkerNotFound,
    /// The marker exists but `open` does not precede it or `close` does not follow it.
    BoundsNotFound,
}

/// Replace the section around the first `marker` with `replacement`.
///
/// The section starts at the last `open` beginning at or before the marker and
/// ends after the first `close` beginning at or after it. Both delimiters are
/// part of the replaced span.
pub fn splice_section(
    text: &str,
    marker: &str,
    open: &str,
    close: &str,
    replacement: &str,
) -> Splice {
    let Some(marker_at) = text.find(marker) else {
        return Splice::MarkerNotFound;
    };

    // Any `open` starting at or before the marker ends within this bound.
    let mut bound = (marker_at + open.len()).min(text.len());
    while !text.is_char_boundary(bound) {
        bound -= 1;
    }
    let start = text[..bound].rfind(open);
    let end = text[marker_at..]
        .find(close)
        .map(|offset| marker_at + offset + close.len());

    let (Some(start), Some(end)) = (start, end) else {
        return Splice::BoundsNotFound;
    };

    let mut out = String::with_capacity(text.len() - (end - start) + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);

    Splice::Spliced {
        text: out,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<main>\n      <section className=\"card\">\n        <h2>Voice</h2>\n      </section>\n      <section className=\"card\">\n        <h2>Local Engine Status</h2>\n      </section>\n</main>\n";

    #[test]
    fn replaces_nearest_enclosing_section() {
        let outcome = splice_section(
            PAGE,
            "Local Engine Status",
            "<section",
            "</section>",
            "<LocalAvatarEngineStatusPanel />",
        );
        let Splice::Spliced { text, .. } = outcome else {
            panic!("expected splice");
        };
        assert_eq!(
            text,
            "<main>\n      <section className=\"card\">\n        <h2>Voice</h2>\n      </section>\n      <LocalAvatarEngineStatusPanel />\n</main>\n"
        );
    }

    #[test]
    fn reports_span_of_replaced_bytes() {
        let outcome = splice_section("ab[c M d]ef", "M", "[", "]", "X");
        assert_eq!(
            outcome,
            Splice::Spliced {
                text: "abXef".to_string(),
                start: 2,
                end: 9,
            }
        );
    }

    #[test]
    fn open_delimiter_may_start_at_marker() {
        let outcome = splice_section("a<x>b", "<x", "<x", ">", "-");
        assert_eq!(
            outcome,
            Splice::Spliced {
                text: "a-b".to_string(),
                start: 1,
                end: 4,
            }
        );
    }

    #[test]
    fn self_overlapping_open_takes_nearest_start() {
        let outcome = splice_section("aaaM]", "M", "aa", "]", "X");
        assert_eq!(
            outcome,
            Splice::Spliced {
                text: "aX".to_string(),
                start: 1,
                end: 5,
            }
        );
    }

    #[test]
    fn open_after_marker_is_ignored() {
        let outcome = splice_section("[a M [b] c]", "M", "[", "]", "X");
        assert_eq!(
            outcome,
            Splice::Spliced {
                text: "X c]".to_string(),
                start: 0,
                end: 8,
            }
        );
    }

    #[test]
    fn bound_clamps_to_char_boundary() {
        // Marker plus `open` length lands inside the two-byte `é`.
        let outcome = splice_section("<x>Mé>", "M", "<x", ">", "-");
        assert_eq!(
            outcome,
            Splice::Spliced {
                text: "-".to_string(),
                start: 0,
                end: 7,
            }
        );
    }

    #[test]
    fn missing_marker() {
        assert_eq!(
            splice_section(PAGE, "Nope", "<section", "</section>", ""),
            Splice::MarkerNotFound
        );
    }

    #[test]
    fn missing_bounds() {
        assert_eq!(
            splice_section("marker </section>", "marker", "<section", "</section>", ""),
            Splice::BoundsNotFound
        );
        assert_eq!(
            splice_section("<section marker", "marker", "<section", "</section>", ""),
            Splice::BoundsNotFound
        );
    }
}
