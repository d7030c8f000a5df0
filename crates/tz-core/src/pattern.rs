//! Recognition of machine-readable UTC timestamps embedded in free text.

use std::sync::LazyLock;

use regex::Regex;

/// Date, then any run of time characters, closed by a literal `Z`.
///
/// Digits are spelled as `[0-9]` because `\d` also accepts non-ASCII digits.
const TIMESTAMP_PATTERN: &str = r"[0-9]{4}-[0-9]{2}-[0-9]{2}[:.T0-9-]*Z";

/// Pre-compiled timestamp regex.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TIMESTAMP_PATTERN).unwrap());

/// One piece of a text value after splitting on the timestamp pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text between timestamps. May be empty.
    Literal(&'a str),
    /// A matched machine-readable timestamp.
    Timestamp(&'a str),
}

impl<'a> Segment<'a> {
    /// Returns the underlying text of the segment.
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Literal(s) | Self::Timestamp(s) => s,
        }
    }

    pub const fn is_timestamp(&self) -> bool {
        matches!(self, Self::Timestamp(_))
    }
}

/// Immutable matcher for the `YYYY-MM-DD...Z` timestamp shape.
///
/// Build it once and reuse it: every call is independent of the previous
/// ones, no scanning position is carried between inputs.
#[derive(Debug, Clone)]
pub struct TimestampPattern {
    regex: Regex,
}

impl Default for TimestampPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampPattern {
    pub fn new() -> Self {
        Self {
            regex: TIMESTAMP_RE.clone(),
        }
    }

    /// Returns true if `text` contains at least one timestamp.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns true if the whole of `text` is a single timestamp.
    pub fn is_exact_match(&self, text: &str) -> bool {
        self.regex
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len())
    }

    /// Iterates over every timestamp in `text`, left to right.
    pub fn find_iter<'h>(&self, text: &'h str) -> impl Iterator<Item = &'h str> {
        self.regex.find_iter(text).map(|m| m.as_str())
    }

    /// Splits `text` into alternating literal and timestamp segments.
    ///
    /// The result always starts and ends with a literal, so `n` matches give
    /// `2n + 1` segments. Concatenating the segments yields `text` again.
    pub fn split<'h>(&self, text: &'h str) -> Vec<Segment<'h>> {
        let mut segments = Vec::new();
        let mut last = 0;
        for m in self.regex.find_iter(text) {
            segments.push(Segment::Literal(&text[last..m.start()]));
            segments.push(Segment::Timestamp(m.as_str()));
            last = m.end();
        }
        segments.push(Segment::Literal(&text[last..]));
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(segments: &[Segment<'_>]) -> String {
        segments.iter().map(Segment::as_str).collect()
    }

    #[test]
    fn empty_input_is_single_empty_literal() {
        let pattern = TimestampPattern::new();
        assert_eq!(pattern.split(""), vec![Segment::Literal("")]);
        assert!(!pattern.is_match(""));
    }

    #[test]
    fn whole_string_match_has_empty_flanks() {
        let pattern = TimestampPattern::new();
        assert_eq!(
            pattern.split("2024-02-08T20:03:14Z"),
            vec![
                Segment::Literal(""),
                Segment::Timestamp("2024-02-08T20:03:14Z"),
                Segment::Literal(""),
            ]
        );
    }

    #[test]
    fn splits_every_occurrence() {
        let pattern = TimestampPattern::new();
        let text = "a2024-02-08T20:03:14Zb2024-02-09T04:16:56Zc";
        let segments = pattern.split(text);

        assert_eq!(
            segments,
            vec![
                Segment::Literal("a"),
                Segment::Timestamp("2024-02-08T20:03:14Z"),
                Segment::Literal("b"),
                Segment::Timestamp("2024-02-09T04:16:56Z"),
                Segment::Literal("c"),
            ]
        );
        assert_eq!(join(&segments), text);
    }

    #[test]
    fn split_is_lossless_for_mixed_text() {
        let pattern = TimestampPattern::new();
        let inputs = [
            "no timestamps here",
            "2024-02-08T20:03:14Z - Sweep drive",
            "started 2024-02-08T20:03:14.123Z, ended 2024-02-08T21:00:00Z.",
            "back-to-back 2024-02-08T20:03:14Z2024-02-08T20:03:15Z",
            "unicode ✓ 2024-02-08T20:03:14Z ✓",
        ];
        for input in inputs {
            let segments = pattern.split(input);
            assert_eq!(join(&segments), input, "lossy split for {input:?}");
            assert_eq!(segments.len() % 2, 1);
            for (i, segment) in segments.iter().enumerate() {
                assert_eq!(segment.is_timestamp(), i % 2 == 1);
            }
        }
    }

    #[test]
    fn adjacent_timestamps_stop_at_first_z() {
        let pattern = TimestampPattern::new();
        let found: Vec<_> = pattern
            .find_iter("2024-02-08T20:03:14Z2024-02-08T20:03:15Z")
            .collect();
        assert_eq!(found, ["2024-02-08T20:03:14Z", "2024-02-08T20:03:15Z"]);
    }

    #[test]
    fn rejects_other_shapes() {
        let pattern = TimestampPattern::new();
        for text in [
            "2024-02-08T20:03:14",
            "2024-02-08T20:03:14+01:00",
            "24-02-08T20:03:14Z",
            "2024/02/08T20:03:14Z",
            "Feb 8 2024 20:03 UTC",
            "２０２４-02-08T20:03:14Z",
            "2024-02-08 20:03:14Z",
        ] {
            assert!(!pattern.is_match(text), "unexpected match in {text:?}");
        }
    }

    #[test]
    fn accepts_date_only_and_fractional_shapes() {
        let pattern = TimestampPattern::new();
        assert!(pattern.is_exact_match("2024-02-08Z"));
        assert!(pattern.is_exact_match("2024-02-08T20:03:14.123456Z"));
        assert!(!pattern.is_exact_match("at 2024-02-08T20:03:14Z"));
    }

    #[test]
    fn reuse_does_not_leak_position() {
        let pattern = TimestampPattern::new();
        let text = "x 2024-02-08T20:03:14Z y";
        assert!(pattern.is_match(text));
        assert!(pattern.is_match(text));
        assert_eq!(pattern.split(text), pattern.split(text));
    }
}
