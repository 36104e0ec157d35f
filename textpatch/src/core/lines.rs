//! Line splitting that keeps terminators attached.

/// Split `text` into lines, each keeping its `\n` or `\r\n` terminator.
///
/// Joining the result reproduces `text` exactly. The final line has no
/// terminator when the text does not end with a newline.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// The terminator at the end of `line`: `"\r\n"`, `"\n"`, or `""`.
pub fn terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// `line` without its terminator.
pub fn line_body(line: &str) -> &str {
    &line[..line.len() - terminator(line).len()]
}

/// Return `line` unchanged if it already ends a line, otherwise append `ending`.
pub fn ensure_terminator(line: &str, ending: &str) -> String {
    if terminator(line).is_empty() {
        format!("{line}{ending}")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_terminators_and_rejoins() {
        let text = "a\r\nb\n\nc";
        let lines = split_lines(text);
        assert_eq!(lines, vec!["a\r\n", "b\n", "\n", "c"]);
        assert_eq!(lines.concat(), text);
    }

    #[test]
    fn split_empty_text_has_no_lines() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn body_strips_only_the_terminator() {
        assert_eq!(line_body("x \r\n"), "x ");
        assert_eq!(line_body("x\n"), "x");
        assert_eq!(line_body("x"), "x");
        assert_eq!(line_body("\r"), "\r");
    }

    #[test]
    fn ensure_terminator_leaves_terminated_lines_alone() {
        assert_eq!(ensure_terminator("x\n", "\r\n"), "x\n");
        assert_eq!(ensure_terminator("x", "\r\n"), "x\r\n");
        assert_eq!(ensure_terminator("x", ""), "x");
    }
}
