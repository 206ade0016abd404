//! Scanner for the bracket annotation mini-syntax.
//!
//! A fragment is plain text with at most one `[label]` (random) or `{label}`
//! (relevant) annotation. The scanner walks the fragment once, collecting the
//! cleaned text (all four bracket characters removed) and the annotation, and
//! rejects malformed markup. New annotation kinds only need a new entry in
//! [`BracketKind`].

use crate::error::{Result, SlidecastError};
use crate::transcript::phrase::ImageMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketKind {
    Square,
    Curly,
}

impl BracketKind {
    fn open(c: char) -> Option<Self> {
        match c {
            '[' => Some(BracketKind::Square),
            '{' => Some(BracketKind::Curly),
            _ => None,
        }
    }

    fn close(c: char) -> Option<Self> {
        match c {
            ']' => Some(BracketKind::Square),
            '}' => Some(BracketKind::Curly),
            _ => None,
        }
    }

    fn open_char(self) -> char {
        match self {
            BracketKind::Square => '[',
            BracketKind::Curly => '{',
        }
    }

    fn mode(self) -> ImageMode {
        match self {
            BracketKind::Square => ImageMode::Random,
            BracketKind::Curly => ImageMode::Relevant,
        }
    }
}

/// Result of scanning one fragment.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScannedFragment {
    /// Fragment text with bracket characters removed, whitespace normalized.
    pub cleaned: String,
    /// The annotation found, if any: trimmed label plus selection mode.
    pub annotation: Option<(String, ImageMode)>,
}

/// Scan a single fragment for its annotation and cleaned text.
///
/// Cleaning keeps the label text in place (only the bracket characters are
/// removed), so cleaning is idempotent and an already-clean fragment passes
/// through unchanged.
pub(crate) fn scan_fragment(fragment: &str) -> Result<ScannedFragment> {
    let mut cleaned = String::with_capacity(fragment.len());
    let mut label = String::new();
    let mut open: Option<BracketKind> = None;
    let mut found: Option<(String, ImageMode)> = None;

    for c in fragment.chars() {
        if let Some(kind) = BracketKind::open(c) {
            // A second annotation, nested or sequential, is not allowed.
            let prior = open
                .map(BracketKind::mode)
                .or_else(|| found.as_ref().map(|(_, mode)| *mode));
            if let Some(prior) = prior {
                return Err(if prior == kind.mode() {
                    SlidecastError::DuplicateAnnotation {
                        fragment: fragment.to_string(),
                    }
                } else {
                    SlidecastError::ConflictingAnnotation {
                        fragment: fragment.to_string(),
                    }
                });
            }
            open = Some(kind);
            label.clear();
        } else if let Some(kind) = BracketKind::close(c) {
            match open {
                Some(k) if k == kind => {
                    found = Some((label.trim().to_string(), kind.mode()));
                    open = None;
                }
                _ => {
                    return Err(SlidecastError::UnexpectedClosingBracket {
                        close: c,
                        fragment: fragment.to_string(),
                    });
                }
            }
        } else {
            cleaned.push(c);
            if open.is_some() {
                label.push(c);
            }
        }
    }

    if let Some(kind) = open {
        return Err(SlidecastError::UnterminatedAnnotation {
            open: kind.open_char(),
            fragment: fragment.to_string(),
        });
    }

    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    Ok(ScannedFragment {
        cleaned,
        annotation: found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fragment_has_no_annotation() {
        let scanned = scan_fragment("Hello world").unwrap();
        assert_eq!(scanned.cleaned, "Hello world");
        assert_eq!(scanned.annotation, None);
    }

    #[test]
    fn square_brackets_mark_random_topic() {
        let scanned = scan_fragment("Hello world [cat]").unwrap();
        assert_eq!(scanned.cleaned, "Hello world cat");
        assert_eq!(
            scanned.annotation,
            Some(("cat".to_string(), ImageMode::Random))
        );
    }

    #[test]
    fn curly_brackets_mark_relevant_topic() {
        let scanned = scan_fragment("Goodbye {dog video}").unwrap();
        assert_eq!(scanned.cleaned, "Goodbye dog video");
        assert_eq!(
            scanned.annotation,
            Some(("dog video".to_string(), ImageMode::Relevant))
        );
    }

    #[test]
    fn annotation_in_the_middle_keeps_label_text_in_place() {
        let scanned = scan_fragment("the [grand canyon] at dawn").unwrap();
        assert_eq!(scanned.cleaned, "the grand canyon at dawn");
        assert_eq!(
            scanned.annotation,
            Some(("grand canyon".to_string(), ImageMode::Random))
        );
    }

    #[test]
    fn both_styles_is_a_conflict() {
        let err = scan_fragment("Hello [cat] {dog}").unwrap_err();
        assert!(matches!(
            err,
            SlidecastError::ConflictingAnnotation { .. }
        ));
    }

    #[test]
    fn both_styles_conflict_regardless_of_order() {
        let err = scan_fragment("{dog} Hello [cat]").unwrap_err();
        assert!(matches!(
            err,
            SlidecastError::ConflictingAnnotation { .. }
        ));
    }

    #[test]
    fn nested_other_style_is_a_conflict() {
        let err = scan_fragment("[a {b} c]").unwrap_err();
        assert!(matches!(
            err,
            SlidecastError::ConflictingAnnotation { .. }
        ));
    }

    #[test]
    fn two_square_annotations_are_duplicates() {
        let err = scan_fragment("[cat] and [dog]").unwrap_err();
        assert!(matches!(err, SlidecastError::DuplicateAnnotation { .. }));
    }

    #[test]
    fn nested_same_style_is_a_duplicate() {
        let err = scan_fragment("[a [b]]").unwrap_err();
        assert!(matches!(err, SlidecastError::DuplicateAnnotation { .. }));
    }

    #[test]
    fn unterminated_bracket_is_rejected() {
        let err = scan_fragment("Hello [cat").unwrap_err();
        assert!(matches!(
            err,
            SlidecastError::UnterminatedAnnotation { open: '[', .. }
        ));
    }

    #[test]
    fn stray_closing_bracket_is_rejected() {
        let err = scan_fragment("Hello cat]").unwrap_err();
        assert!(matches!(
            err,
            SlidecastError::UnexpectedClosingBracket { close: ']', .. }
        ));
    }

    #[test]
    fn mismatched_close_is_rejected() {
        let err = scan_fragment("{dog]").unwrap_err();
        assert!(matches!(
            err,
            SlidecastError::UnexpectedClosingBracket { close: ']', .. }
        ));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = scan_fragment("Hello world [cat]").unwrap();
        let twice = scan_fragment(&once.cleaned).unwrap();
        assert_eq!(once.cleaned, twice.cleaned);
    }

    #[test]
    fn cleaning_normalizes_whitespace() {
        let scanned = scan_fragment("  Hello   world\t[cat]  ").unwrap();
        assert_eq!(scanned.cleaned, "Hello world cat");
    }

    #[test]
    fn label_is_trimmed() {
        let scanned = scan_fragment("x [  cat  ]").unwrap();
        assert_eq!(
            scanned.annotation,
            Some(("cat".to_string(), ImageMode::Random))
        );
    }

    #[test]
    fn empty_brackets_yield_empty_label() {
        let scanned = scan_fragment("Hello []").unwrap();
        assert_eq!(scanned.cleaned, "Hello");
        assert_eq!(scanned.annotation, Some((String::new(), ImageMode::Random)));
    }

    #[test]
    fn non_bracket_punctuation_is_preserved() {
        let scanned = scan_fragment("Wait, really? [surprise]").unwrap();
        assert_eq!(scanned.cleaned, "Wait, really? surprise");
    }
}
