//! Literal, non-overlapping substring replacement.

/// Text after replacement plus how many occurrences were replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    pub occurrences: usize,
}

impl Replacement {
    pub fn changed(&self) -> bool {
        self.occurrences > 0
    }
}

/// Replace every occurrence of `from` with `to`, scanning left to right.
///
/// Matching is exact and case-sensitive. After a match the scan resumes past
/// the matched region, so overlapping candidates are not re-matched. An empty
/// `from` matches nothing.
pub fn replace_literal(text: &str, from: &str, to: &str) -> Replacement {
    if from.is_empty() {
        return Replacement {
            text: text.to_string(),
            occurrences: 0,
        };
    }

    let mut out = String::with_capacity(text.len());
    let mut occurrences = 0;
    let mut last = 0;
    for (start, matched) in text.match_indices(from) {
        out.push_str(&text[last..start]);
        out.push_str(to);
        last = start + matched.len();
        occurrences += 1;
    }
    out.push_str(&text[last..]);

    Replacement {
        text: out,
        occurrences,
    }
}
