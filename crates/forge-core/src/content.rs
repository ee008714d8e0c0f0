use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ForgeError, Result};

/// The kind of piece the user wants written.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    #[default]
    MarketingCopy,
    BlogPost,
    SocialMediaCaption,
}

impl ContentType {
    /// Get all content types in selector order.
    pub fn all() -> &'static [ContentType] {
        &[
            ContentType::MarketingCopy,
            ContentType::BlogPost,
            ContentType::SocialMediaCaption,
        ]
    }

    /// Display label, embedded verbatim in the instruction text.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::MarketingCopy => "Marketing Copy",
            ContentType::BlogPost => "Blog Post",
            ContentType::SocialMediaCaption => "Social Media Caption",
        }
    }

    /// Numeric index (0-based).
    pub fn index(&self) -> usize {
        match self {
            ContentType::MarketingCopy => 0,
            ContentType::BlogPost => 1,
            ContentType::SocialMediaCaption => 2,
        }
    }

    /// Cycle to the next content type, wrapping around.
    pub fn next(&self) -> ContentType {
        cycle(Self::all(), self.index(), 1)
    }

    /// Cycle to the previous content type, wrapping around.
    pub fn prev(&self) -> ContentType {
        cycle(Self::all(), self.index(), -1)
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            ContentType::MarketingCopy => &["marketing copy", "marketing"],
            ContentType::BlogPost => &["blog post", "blog"],
            ContentType::SocialMediaCaption => {
                &["social media caption", "social media", "social", "caption"]
            }
        }
    }
}

/// Tone of voice requested from the model.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Witty,
    Enthusiastic,
    Formal,
}

impl Tone {
    pub fn all() -> &'static [Tone] {
        &[
            Tone::Professional,
            Tone::Casual,
            Tone::Witty,
            Tone::Enthusiastic,
            Tone::Formal,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Witty => "Witty",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Formal => "Formal",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tone::Professional => 0,
            Tone::Casual => 1,
            Tone::Witty => 2,
            Tone::Enthusiastic => 3,
            Tone::Formal => 4,
        }
    }

    pub fn next(&self) -> Tone {
        cycle(Self::all(), self.index(), 1)
    }

    pub fn prev(&self) -> Tone {
        cycle(Self::all(), self.index(), -1)
    }
}

/// Target length of the generated piece.
///
/// The word count is advisory: it is written into the instruction and left
/// to the model to honour. Nothing downstream truncates or counts words.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub fn all() -> &'static [Length] {
        &[Length::Short, Length::Medium, Length::Long]
    }

    /// Full label including the word-count hint, e.g. "Short (approx. 50 words)".
    pub fn label(&self) -> &'static str {
        match self {
            Length::Short => "Short (approx. 50 words)",
            Length::Medium => "Medium (approx. 150 words)",
            Length::Long => "Long (approx. 300 words)",
        }
    }

    /// Label without the hint, for compact selectors.
    pub fn short_label(&self) -> &'static str {
        match self {
            Length::Short => "Short",
            Length::Medium => "Medium",
            Length::Long => "Long",
        }
    }

    /// Approximate number of words the model is asked for.
    pub fn approx_words(&self) -> u32 {
        match self {
            Length::Short => 50,
            Length::Medium => 150,
            Length::Long => 300,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Length::Short => 0,
            Length::Medium => 1,
            Length::Long => 2,
        }
    }

    pub fn next(&self) -> Length {
        cycle(Self::all(), self.index(), 1)
    }

    pub fn prev(&self) -> Length {
        cycle(Self::all(), self.index(), -1)
    }
}

fn cycle<T: Copy>(all: &[T], index: usize, step: isize) -> T {
    let len = all.len() as isize;
    let next = (index as isize + step).rem_euclid(len);
    all[next as usize]
}

/// Lowercase and collapse `-`/`_` separators so "blog-post", "Blog_Post" and
/// "Blog Post" all compare equal.
fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn expected_labels(labels: impl Iterator<Item = &'static str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

impl FromStr for ContentType {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        ContentType::all()
            .iter()
            .find(|ct| ct.aliases().contains(&wanted.as_str()))
            .copied()
            .ok_or_else(|| ForgeError::UnknownOption {
                kind: "content type",
                value: s.to_string(),
                expected: expected_labels(ContentType::all().iter().map(|c| c.label())),
            })
    }
}

impl FromStr for Tone {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Tone::all()
            .iter()
            .find(|t| normalize(t.label()) == wanted)
            .copied()
            .ok_or_else(|| ForgeError::UnknownOption {
                kind: "tone",
                value: s.to_string(),
                expected: expected_labels(Tone::all().iter().map(|t| t.label())),
            })
    }
}

impl FromStr for Length {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Length::all()
            .iter()
            .find(|l| normalize(l.short_label()) == wanted || normalize(l.label()) == wanted)
            .copied()
            .ok_or_else(|| ForgeError::UnknownOption {
                kind: "length",
                value: s.to_string(),
                expected: expected_labels(Length::all().iter().map(|l| l.short_label())),
            })
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One submission to the text-generation service.
///
/// Built fresh per submission and never mutated. Construction rejects an
/// empty or whitespace-only prompt, so every value carries real text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    content_type: ContentType,
    prompt: String,
    tone: Tone,
    length: Length,
}

impl GenerationRequest {
    pub fn new(
        content_type: ContentType,
        prompt: impl Into<String>,
        tone: Tone,
        length: Length,
    ) -> Result<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ForgeError::EmptyPrompt);
        }
        Ok(Self {
            content_type,
            prompt,
            tone,
            length,
        })
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// The prompt exactly as the user typed it.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn length(&self) -> Length {
        self.length
    }
}

/// Result of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Text returned by the provider, untouched.
    Success(String),
    /// Human-readable description of what went wrong.
    Failure(String),
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success(_))
    }

    /// The generated text, if this is a success.
    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Success(text) => Some(text),
            GenerationOutcome::Failure(_) => None,
        }
    }

    /// The string shown to the user for either variant.
    pub fn message(&self) -> &str {
        match self {
            GenerationOutcome::Success(text) | GenerationOutcome::Failure(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_form() {
        assert_eq!(ContentType::default(), ContentType::MarketingCopy);
        assert_eq!(Tone::default(), Tone::Professional);
        assert_eq!(Length::default(), Length::Medium);
    }

    #[test]
    fn cycling_wraps_both_ways() {
        assert_eq!(ContentType::SocialMediaCaption.next(), ContentType::MarketingCopy);
        assert_eq!(ContentType::MarketingCopy.prev(), ContentType::SocialMediaCaption);
        assert_eq!(Tone::Formal.next(), Tone::Professional);
        assert_eq!(Tone::Casual.prev(), Tone::Professional);
        assert_eq!(Length::Short.prev(), Length::Long);
        assert_eq!(Length::Medium.next(), Length::Long);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, ct) in ContentType::all().iter().enumerate() {
            assert_eq!(ct.index(), i);
        }
        for (i, tone) in Tone::all().iter().enumerate() {
            assert_eq!(tone.index(), i);
        }
        for (i, length) in Length::all().iter().enumerate() {
            assert_eq!(length.index(), i);
        }
    }

    #[test]
    fn length_labels_carry_word_hint() {
        for length in Length::all() {
            let hint = format!("approx. {} words", length.approx_words());
            assert!(length.label().contains(&hint));
            assert!(length.label().starts_with(length.short_label()));
        }
    }

    #[test]
    fn parses_labels_and_aliases() {
        assert_eq!("blog-post".parse::<ContentType>().unwrap(), ContentType::BlogPost);
        assert_eq!("Blog Post".parse::<ContentType>().unwrap(), ContentType::BlogPost);
        assert_eq!("social".parse::<ContentType>().unwrap(), ContentType::SocialMediaCaption);
        assert_eq!("WITTY".parse::<Tone>().unwrap(), Tone::Witty);
        assert_eq!("long".parse::<Length>().unwrap(), Length::Long);
        assert_eq!(
            "Short (approx. 50 words)".parse::<Length>().unwrap(),
            Length::Short
        );
    }

    #[test]
    fn unknown_option_lists_choices() {
        let err = "sarcastic".parse::<Tone>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("sarcastic"));
        assert!(msg.contains("Enthusiastic"));
    }

    #[test]
    fn request_rejects_blank_prompts() {
        for prompt in ["", "   ", "\n\t "] {
            let err = GenerationRequest::new(
                ContentType::BlogPost,
                prompt,
                Tone::Casual,
                Length::Short,
            )
            .unwrap_err();
            assert!(matches!(err, ForgeError::EmptyPrompt));
        }
    }

    #[test]
    fn request_keeps_prompt_verbatim() {
        let req = GenerationRequest::new(
            ContentType::BlogPost,
            "  eco sneakers \n",
            Tone::Witty,
            Length::Short,
        )
        .unwrap();
        assert_eq!(req.prompt(), "  eco sneakers \n");
        assert_eq!(req.tone(), Tone::Witty);
    }

    #[test]
    fn outcome_accessors() {
        let ok = GenerationOutcome::Success("hello".into());
        assert!(ok.is_success());
        assert_eq!(ok.text(), Some("hello"));

        let failed = GenerationOutcome::Failure("boom".into());
        assert!(!failed.is_success());
        assert_eq!(failed.text(), None);
        assert_eq!(failed.message(), "boom");
    }
}
