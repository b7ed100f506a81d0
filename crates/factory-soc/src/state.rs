//! Parser state machine
//!
//! [`transition`] is a pure function from `(state, line)` to the next
//! state and the effects the parser must apply. The parser owns all
//! buffers; the state machine never sees them.

use crate::grammar::LineKind;
use std::fmt;

/// Position in the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParserState {
    #[default]
    ExpectingHeader,
    ExpectingFiles,
    /// Inside a fenced diff block
    InDiff,
    /// Inside a bare unified diff (no fence)
    InRawDiff,
    ExpectingTrailer,
    Done,
}

impl ParserState {
    /// Whether lines are being accumulated into the diff buffer
    #[inline]
    #[must_use]
    pub fn in_diff(&self) -> bool {
        matches!(self, Self::InDiff | Self::InRawDiff)
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ExpectingHeader => "expecting_header",
            Self::ExpectingFiles => "expecting_files",
            Self::InDiff => "in_diff",
            Self::InRawDiff => "in_raw_diff",
            Self::ExpectingTrailer => "expecting_trailer",
            Self::Done => "done",
        })
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<'a> {
    /// Declare a file (subject to the path policy)
    RecordFile(&'a str),
    /// Fence opened
    OpenDiff,
    /// Fence closed
    CloseDiff,
    /// Switch to the bare-diff fallback: harvest file references from the
    /// whole input
    HarvestRawFiles,
    /// Append the raw line to the diff buffer
    AppendDiff(&'a str),
    /// Structural error; parsing stops
    Fatal(&'static str),
    /// Structural error; parsing continues
    Unexpected(&'static str),
}

/// Compute the next state and effects for one line
#[must_use]
pub fn transition(state: ParserState, line: &str) -> (ParserState, Vec<Effect<'_>>) {
    use ParserState as S;

    let kind = LineKind::classify(line);
    match (state, kind) {
        (S::ExpectingHeader, LineKind::Blank) => (state, Vec::new()),
        (S::ExpectingHeader, LineKind::Header) => (S::ExpectingFiles, Vec::new()),
        (S::ExpectingHeader, _) => (state, vec![Effect::Fatal("invalid header")]),

        (S::ExpectingFiles, LineKind::Blank) => (state, Vec::new()),
        (S::ExpectingFiles, LineKind::File(path)) => (state, vec![Effect::RecordFile(path)]),
        (S::ExpectingFiles, LineKind::FenceOpen) => (S::InDiff, vec![Effect::OpenDiff]),
        (S::ExpectingFiles, LineKind::RawDiffHeader) => (
            S::InRawDiff,
            vec![Effect::HarvestRawFiles, Effect::AppendDiff(line)],
        ),
        (S::ExpectingFiles, _) => (
            state,
            vec![Effect::Unexpected("expected file list or diff start")],
        ),

        (S::InDiff, LineKind::FenceClose) => (S::ExpectingTrailer, vec![Effect::CloseDiff]),
        // Trailer inside an open fence ends parsing; the fence stays open
        (S::InDiff, LineKind::Trailer) => (S::Done, Vec::new()),
        (S::InDiff, _) => (state, vec![Effect::AppendDiff(line)]),

        (S::InRawDiff, LineKind::Trailer) => (S::Done, Vec::new()),
        (S::InRawDiff, _) => (state, vec![Effect::AppendDiff(line)]),

        (S::ExpectingTrailer | S::Done, LineKind::Blank) => (state, Vec::new()),
        (S::ExpectingTrailer, LineKind::Trailer) => (S::Done, Vec::new()),
        (S::ExpectingTrailer, _) => (state, vec![Effect::Unexpected("expected trailer")]),

        (S::Done, _) => (state, vec![Effect::Unexpected("unexpected content after trailer")]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParserState as S;

    #[test]
    fn happy_path_table() {
        let cases: &[(S, &str, S)] = &[
            (S::ExpectingHeader, "", S::ExpectingHeader),
            (S::ExpectingHeader, "### FACTORY/1 PATCH", S::ExpectingFiles),
            (S::ExpectingFiles, "- file: a.py", S::ExpectingFiles),
            (S::ExpectingFiles, "```diff", S::InDiff),
            (S::InDiff, "+print(1)", S::InDiff),
            (S::InDiff, "```", S::ExpectingTrailer),
            (S::ExpectingTrailer, "", S::ExpectingTrailer),
            (S::ExpectingTrailer, "### END", S::Done),
            (S::Done, "  ", S::Done),
        ];
        for (from, line, to) in cases {
            let (next, _) = transition(*from, line);
            assert_eq!(next, *to, "{from} + {line:?}");
        }
    }

    #[test]
    fn non_header_first_line_is_fatal() {
        let (next, effects) = transition(S::ExpectingHeader, "Here is your patch");
        assert_eq!(next, S::ExpectingHeader);
        assert_eq!(effects, vec![Effect::Fatal("invalid header")]);
    }

    #[test]
    fn file_entry_recorded() {
        let (_, effects) = transition(S::ExpectingFiles, "- file: backend/app.py");
        assert_eq!(effects, vec![Effect::RecordFile("backend/app.py")]);
    }

    #[test]
    fn raw_diff_fallback() {
        let (next, effects) = transition(S::ExpectingFiles, "--- a/backend/app.py");
        assert_eq!(next, S::InRawDiff);
        assert_eq!(
            effects,
            vec![Effect::HarvestRawFiles, Effect::AppendDiff("--- a/backend/app.py")]
        );
        assert_eq!(transition(S::InRawDiff, "### END").0, S::Done);
    }

    #[test]
    fn trailer_inside_fence_finishes() {
        let (next, effects) = transition(S::InDiff, "### END");
        assert_eq!(next, S::Done);
        assert!(effects.is_empty());
    }

    #[test]
    fn diff_lines_kept_verbatim() {
        let (_, effects) = transition(S::InDiff, " context line");
        assert_eq!(effects, vec![Effect::AppendDiff(" context line")]);
        let (_, effects) = transition(S::InDiff, "");
        assert_eq!(effects, vec![Effect::AppendDiff("")]);
    }

    #[test]
    fn stray_lines_are_non_fatal() {
        let (next, effects) = transition(S::ExpectingFiles, "some words");
        assert_eq!(next, S::ExpectingFiles);
        assert_eq!(effects, vec![Effect::Unexpected("expected file list or diff start")]);

        let (_, effects) = transition(S::ExpectingTrailer, "more");
        assert_eq!(effects, vec![Effect::Unexpected("expected trailer")]);

        let (_, effects) = transition(S::Done, "after");
        assert_eq!(effects, vec![Effect::Unexpected("unexpected content after trailer")]);
    }

    #[test]
    fn state_names() {
        assert_eq!(S::InRawDiff.to_string(), "in_raw_diff");
        assert!(S::InDiff.in_diff());
        assert!(!S::Done.in_diff());
    }
}
