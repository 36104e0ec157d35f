//! First-match anchored line replacement with a follow-up insertion.

use super::lines::{ensure_terminator, line_body, split_lines, terminator};

/// Result of patching text at an anchor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinePatch {
    /// Anchor found at `line_index` (0-based); `text` holds the patched content.
    Patched { text: String, line_index: usize },
    /// No line equals the anchor.
    AnchorNotFound,
}

/// Index of the first line whose body equals the anchor's body.
///
/// Terminators are ignored on both sides, so `"x\n"`, `"x\r\n"` and an
/// unterminated final `"x"` all match the anchor `"x"`.
pub fn find_anchor(lines: &[&str], anchor: &str) -> Option<usize> {
    let wanted = line_body(anchor);
    lines.iter().position(|line| line_body(line) == wanted)
}

/// Replace the first line equal to `anchor` with `replacement` and insert
/// `insertion` right after it.
///
/// A payload line without a terminator borrows the matched line's terminator.
/// The replacement line always ends a line (falling back to `\n` when the
/// anchor was the unterminated last line), so the insertion stays on its own
/// line. Lines after the anchor shift down by one and are otherwise untouched.
pub fn patch_lines(text: &str, anchor: &str, replacement: &str, insertion: &str) -> LinePatch {
    let lines = split_lines(text);
    let Some(line_index) = find_anchor(&lines, anchor) else {
        return LinePatch::AnchorNotFound;
    };

    let ending = terminator(lines[line_index]);
    let replacement_ending = if ending.is_empty() { "\n" } else { ending };

    let mut out = String::with_capacity(text.len() + replacement.len() + insertion.len() + 2);
    out.extend(lines[..line_index].iter().copied());
    out.push_str(&ensure_terminator(replacement, replacement_ending));
    out.push_str(&ensure_terminator(insertion, ending));
    out.extend(lines[line_index + 1..].iter().copied());

    LinePatch::Patched {
        text: out,
        line_index,
    }
}
