//! Reconciles the aligner's word stream against the parsed phrases.

use crate::align::{PhraseTiming, WordAlignment, round_timestamp};
use crate::error::{Result, SlidecastError};
use crate::transcript::Phrase;

/// Match every phrase token against the aligner's word sequence, in order,
/// and derive per-phrase start/end timestamps.
///
/// A cursor advances over the alignment slice; each entry is consumed by
/// exactly one phrase token. The aligner's token must equal the transcript
/// token with surrounding punctuation stripped; any divergence means the
/// aligner heard something else, and no downstream output can be trusted.
/// The whole sequence must be consumed: leftover entries are an error too.
pub fn reconcile(phrases: &[Phrase], words: &[WordAlignment]) -> Result<Vec<PhraseTiming>> {
    let mut cursor = 0usize;
    let mut timings = Vec::with_capacity(phrases.len());

    for phrase in phrases {
        let mut span: Option<(f64, f64)> = None;

        for token in phrase.words() {
            let entry =
                words
                    .get(cursor)
                    .ok_or_else(|| SlidecastError::AlignmentExhausted {
                        word: token.to_string(),
                        phrase: phrase.cleaned().to_string(),
                    })?;

            let expected = strip_punctuation(token);
            if entry.word != expected {
                return Err(SlidecastError::AlignmentMismatch {
                    expected: expected.to_string(),
                    actual: entry.word.clone(),
                    position: cursor,
                });
            }

            span = match span {
                None => Some((entry.start, entry.end)),
                Some((start, _)) => Some((start, entry.end)),
            };
            cursor += 1;
        }

        // The parser never emits a wordless phrase.
        let (start, end) = span.ok_or_else(|| SlidecastError::AlignerOutput {
            message: format!("phrase '{}' has no word tokens", phrase.cleaned()),
        })?;

        timings.push(PhraseTiming {
            text: phrase.cleaned().to_string(),
            start: round_timestamp(start),
            end: round_timestamp(end),
        });
    }

    if cursor != words.len() {
        return Err(SlidecastError::AlignmentLeftover {
            remaining: words.len() - cursor,
        });
    }

    Ok(timings)
}

/// Strip leading and trailing ASCII punctuation from a transcript token, so
/// "world," matches the aligner's "world".
fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Transcript;

    fn word(text: &str, start: f64, end: f64) -> WordAlignment {
        WordAlignment {
            word: text.to_string(),
            start,
            end,
        }
    }

    fn reference_words() -> Vec<WordAlignment> {
        vec![
            word("Hello", 0.0, 0.4),
            word("world", 0.4, 0.8),
            word("cat", 0.8, 1.2),
            word("Goodbye", 2.0, 2.5),
            word("dog", 2.5, 2.8),
            word("video", 2.8, 3.2),
        ]
    }

    #[test]
    fn derives_phrase_timings_in_order() {
        let t = Transcript::parse("Hello world [cat]\nGoodbye {dog video}").unwrap();
        let timings = reconcile(t.phrases(), &reference_words()).unwrap();

        assert_eq!(timings.len(), 2);
        assert_eq!(timings[0].text, "Hello world cat");
        assert_eq!(timings[0].start, 0.0);
        assert_eq!(timings[0].end, 1.2);
        assert_eq!(timings[1].text, "Goodbye dog video");
        assert_eq!(timings[1].start, 2.0);
        assert_eq!(timings[1].end, 3.2);
    }

    #[test]
    fn single_word_phrase_uses_one_entry_for_both_ends() {
        let t = Transcript::parse("Hello").unwrap();
        let timings = reconcile(t.phrases(), &[word("Hello", 0.5, 0.9)]).unwrap();
        assert_eq!(timings[0].start, 0.5);
        assert_eq!(timings[0].end, 0.9);
    }

    #[test]
    fn consumes_exactly_one_entry_per_token() {
        let t = Transcript::parse("one two / three").unwrap();
        let words = vec![
            word("one", 0.0, 0.2),
            word("two", 0.2, 0.4),
            word("three", 0.4, 0.6),
        ];
        let timings = reconcile(t.phrases(), &words).unwrap();
        assert_eq!(timings.len(), 2);
        assert_eq!(timings[0].start, 0.0);
        assert_eq!(timings[0].end, 0.4);
        assert_eq!(timings[1].start, 0.4);
    }

    #[test]
    fn punctuation_on_transcript_tokens_is_ignored_for_matching() {
        let t = Transcript::parse("Hello, world!").unwrap();
        let words = vec![word("Hello", 0.0, 0.3), word("world", 0.3, 0.7)];
        let timings = reconcile(t.phrases(), &words).unwrap();
        assert_eq!(timings[0].text, "Hello, world!");
        assert_eq!(timings[0].end, 0.7);
    }

    #[test]
    fn timestamps_are_rounded_to_two_decimals() {
        let t = Transcript::parse("Hello world").unwrap();
        let words = vec![word("Hello", 0.111_4, 0.25), word("world", 0.25, 0.987_6)];
        let timings = reconcile(t.phrases(), &words).unwrap();
        assert_eq!(timings[0].start, 0.11);
        assert_eq!(timings[0].end, 0.99);
    }

    #[test]
    fn mismatched_word_is_fatal_with_position() {
        let t = Transcript::parse("Hello world").unwrap();
        let words = vec![word("Hello", 0.0, 0.3), word("word", 0.3, 0.7)];
        let err = reconcile(t.phrases(), &words).unwrap_err();
        match err {
            SlidecastError::AlignmentMismatch {
                expected,
                actual,
                position,
            } => {
                assert_eq!(expected, "world");
                assert_eq!(actual, "word");
                assert_eq!(position, 1);
            }
            other => panic!("expected AlignmentMismatch, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_stream_is_fatal() {
        let t = Transcript::parse("Hello world").unwrap();
        let words = vec![word("Hello", 0.0, 0.3)];
        let err = reconcile(t.phrases(), &words).unwrap_err();
        match err {
            SlidecastError::AlignmentExhausted { word, phrase } => {
                assert_eq!(word, "world");
                assert_eq!(phrase, "Hello world");
            }
            other => panic!("expected AlignmentExhausted, got {other:?}"),
        }
    }

    #[test]
    fn leftover_entries_are_fatal() {
        let t = Transcript::parse("Hello").unwrap();
        let words = vec![word("Hello", 0.0, 0.3), word("extra", 0.3, 0.5)];
        let err = reconcile(t.phrases(), &words).unwrap_err();
        assert!(matches!(
            err,
            SlidecastError::AlignmentLeftover { remaining: 1 }
        ));
    }

    #[test]
    fn input_sequence_is_left_intact() {
        // Cursor-based consumption: the caller's slice is untouched and
        // remains inspectable after reconciliation.
        let t = Transcript::parse("Hello").unwrap();
        let words = vec![word("Hello", 0.0, 0.3)];
        let before = words.clone();
        let _ = reconcile(t.phrases(), &words).unwrap();
        assert_eq!(words, before);
    }

    #[test]
    fn duplicate_phrases_each_get_their_own_entries() {
        let t = Transcript::parse("again / again").unwrap();
        let words = vec![word("again", 0.0, 0.4), word("again", 1.0, 1.4)];
        let timings = reconcile(t.phrases(), &words).unwrap();
        assert_eq!(timings[0].start, 0.0);
        assert_eq!(timings[1].start, 1.0);
    }

    #[test]
    fn strip_punctuation_trims_both_ends_only() {
        assert_eq!(strip_punctuation("world,"), "world");
        assert_eq!(strip_punctuation("\"quoted!\""), "quoted");
        assert_eq!(strip_punctuation("don't"), "don't");
        assert_eq!(strip_punctuation("..."), "");
    }
}
