//! Annotated transcript parsing.
//!
//! A transcript is plain text where line breaks separate independent
//! segments and a slash (optionally space-padded) separates phrases within a
//! line. Each phrase may carry one topic annotation: `[label]` for a random
//! image pick, `{label}` for the most relevant result. Unannotated phrases
//! use their own text as the search label.

mod phrase;
mod scanner;

pub use phrase::{ImageMode, Phrase, TopicAnnotation};

use crate::error::{Result, SlidecastError};
use scanner::scan_fragment;

/// A parsed transcript: ordered phrases plus the annotation-free text
/// handed to the forced aligner.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    phrases: Vec<Phrase>,
    cleaned: String,
}

impl Transcript {
    /// Parse raw transcript text into phrases with topic annotations.
    ///
    /// Fragments that are empty after cleaning are skipped; a transcript
    /// with no phrases at all is an error.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut phrases = Vec::new();

        for fragment in split_fragments(raw) {
            let scanned = scan_fragment(fragment)?;
            if scanned.cleaned.is_empty() {
                continue;
            }

            // An annotation with an empty label falls back to the phrase
            // text, same as an unannotated phrase (but keeps its mode).
            let topic = match scanned.annotation {
                Some((label, mode)) if !label.is_empty() => TopicAnnotation { label, mode },
                Some((_, mode)) => TopicAnnotation {
                    label: scanned.cleaned.clone(),
                    mode,
                },
                None => TopicAnnotation {
                    label: scanned.cleaned.clone(),
                    mode: ImageMode::Random,
                },
            };

            phrases.push(Phrase::new(
                fragment.to_string(),
                scanned.cleaned,
                topic,
            ));
        }

        if phrases.is_empty() {
            return Err(SlidecastError::EmptyTranscript);
        }

        let cleaned = phrases
            .iter()
            .map(Phrase::cleaned)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self { phrases, cleaned })
    }

    /// Phrases in transcript order.
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    /// The annotation-free transcript: cleaned phrases space-joined in order.
    pub fn cleaned_text(&self) -> &str {
        &self.cleaned
    }

    /// Topic annotations in transcript order.
    pub fn topics(&self) -> impl Iterator<Item = &TopicAnnotation> {
        self.phrases.iter().map(Phrase::topic)
    }

    /// Total number of word tokens across all phrases.
    pub fn word_count(&self) -> usize {
        self.phrases.iter().map(Phrase::word_count).sum()
    }
}

/// Split on line breaks, then on the slash delimiter, trimming each fragment.
/// Empty fragments (blank lines, doubled slashes) are dropped.
fn split_fragments(raw: &str) -> Vec<&str> {
    raw.lines()
        .flat_map(|line| line.split('/'))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
