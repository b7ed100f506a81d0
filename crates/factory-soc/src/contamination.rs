//! Prose and refusal detection
//!
//! Models often wrap a patch in conversational text or refuse outright.
//! Both are advisory: prose is recorded as a parse error, refusals are
//! caught by the input pre-check.

/// Line prefixes that mark conversational prose
pub const DEFAULT_PROSE_MARKERS: &[&str] = &[
    "here's",
    "here is",
    "let me",
    "sure,",
    "sure!",
    "based on",
    "i'll",
    "i will",
    "certainly",
    "of course",
    "below is",
    "this patch",
];

/// Phrases that mark a model refusal
pub const DEFAULT_REFUSAL_PHRASES: &[&str] = &[
    "i cannot",
    "i can't",
    "i'm unable to",
    "i am unable to",
    "i'm not able to",
    "i apologize",
    "as an ai",
    "i won't be able",
];

/// 1-based numbers and text of lines starting with a prose marker
///
/// Markers must be lower case; lines are trimmed and case-folded.
#[must_use]
pub fn prose_lines<'a, S: AsRef<str>>(input: &'a str, markers: &[S]) -> Vec<(usize, &'a str)> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let folded = line.trim().to_lowercase();
            markers.iter().any(|m| folded.starts_with(m.as_ref()))
        })
        .map(|(i, line)| (i + 1, line.trim()))
        .collect()
}

/// Case-insensitive substring match against refusal phrases
///
/// Phrases must be lower case.
#[must_use]
pub fn is_refusal<S: AsRef<str>>(text: &str, phrases: &[S]) -> bool {
    let folded = text.to_lowercase();
    phrases.iter().any(|p| folded.contains(p.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_phrases() {
        assert!(is_refusal("I cannot help you with this request.", DEFAULT_REFUSAL_PHRASES));
        assert!(is_refusal("Sorry, AS AN AI I must decline", DEFAULT_REFUSAL_PHRASES));
        assert!(!is_refusal("### FACTORY/1 PATCH", DEFAULT_REFUSAL_PHRASES));
    }

    #[test]
    fn prose_lines_numbered_from_one() {
        let input = "### FACTORY/1 PATCH\nHere's the patch you asked for\n- file: a.py\n  Let me explain";
        let found = prose_lines(input, DEFAULT_PROSE_MARKERS);
        assert_eq!(
            found,
            vec![(2, "Here's the patch you asked for"), (4, "Let me explain")]
        );
    }

    #[test]
    fn markers_are_prefixes_only() {
        assert!(prose_lines("+ # here's a comment in code", DEFAULT_PROSE_MARKERS).is_empty());
    }
}
