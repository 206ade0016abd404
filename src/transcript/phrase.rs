//! Phrase and topic annotation types.

/// How the image for a topic is selected from search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMode {
    /// Any image matching the label will do; one is picked arbitrarily.
    Random,
    /// The single most relevant search result must be used.
    Relevant,
}

impl ImageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMode::Random => "random",
            ImageMode::Relevant => "relevant",
        }
    }
}

impl std::fmt::Display for ImageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The visual attached to a phrase: an image-search label plus selection mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicAnnotation {
    /// Image-search query. Defaults to the phrase's own cleaned text when
    /// the phrase carries no bracket annotation.
    pub label: String,
    pub mode: ImageMode,
}

/// One delimiter-separated unit of the transcript.
///
/// Constructed only by [`Transcript::parse`](crate::transcript::Transcript::parse);
/// the parser guarantees every phrase has at least one word token.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    raw: String,
    cleaned: String,
    topic: TopicAnnotation,
}

impl Phrase {
    pub(crate) fn new(raw: String, cleaned: String, topic: TopicAnnotation) -> Self {
        Self {
            raw,
            cleaned,
            topic,
        }
    }

    /// Original fragment text, annotation markup included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Fragment text with markup stripped and whitespace normalized.
    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    pub fn topic(&self) -> &TopicAnnotation {
        &self.topic
    }

    /// Ordered word tokens of the cleaned text.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.cleaned.split_whitespace()
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}
