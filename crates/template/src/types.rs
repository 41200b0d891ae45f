//! Core data types produced by the template compiler.

use std::fmt;

use serde::Serialize;

use crate::error::LiteralError;

/// Content rating of an image.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Safety {
    /// Safe for any audience.
    #[default]
    Safe,
    /// Borderline content.
    Questionable,
    /// Explicit content.
    Explicit,
}

impl Safety {
    /// Parse one of the accepted spellings (`safe/Safe/s/S`, ...). Case-sensitive.
    pub fn parse(s: &str) -> Result<Self, LiteralError> {
        match s {
            "safe" | "Safe" | "s" | "S" => Ok(Self::Safe),
            "questionable" | "Questionable" | "q" | "Q" => Ok(Self::Questionable),
            "explicit" | "Explicit" | "e" | "E" => Ok(Self::Explicit),
            other => Err(LiteralError(format!(
                "invalid safety rating '{}': expected safe, questionable or explicit",
                other
            ))),
        }
    }
}

impl fmt::Display for Safety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Safe => "safe",
            Self::Questionable => "questionable",
            Self::Explicit => "explicit",
        })
    }
}

/// Resampling quality used when scaling images for display.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    /// Nearest-neighbour scaling.
    Fast,
    /// Filtered scaling.
    #[default]
    Smooth,
}

impl ImageQuality {
    /// Parse one of the accepted spellings (`fast/Fast/f/F`, `smooth/Smooth/s/S`).
    pub fn parse(s: &str) -> Result<Self, LiteralError> {
        match s {
            "fast" | "Fast" | "f" | "F" => Ok(Self::Fast),
            "smooth" | "Smooth" | "s" | "S" => Ok(Self::Smooth),
            other => Err(LiteralError(format!(
                "invalid image quality '{}': expected fast or smooth",
                other
            ))),
        }
    }
}

/// Selection mode of an option question.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Exactly one option may be chosen.
    Radio,
    /// Any number of options may be chosen.
    Check,
}

/// One choice of an option question. An empty `tag` selects nothing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionOption {
    /// Label shown to the user.
    pub name: String,
    /// Tag applied when this option is chosen.
    pub tag: String,
}

impl QuestionOption {
    /// Build an option from a label and tag.
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }
}

/// One prompt of the questionnaire, in template order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    /// Free-text tag entry.
    Entry {
        /// Prompt text.
        text: String,
    },
    /// Tags applied to every image of the session.
    SessionTags {
        /// Prompt text.
        text: String,
    },
    /// Image name entry.
    Name {
        /// Prompt text.
        text: String,
    },
    /// Image source entry.
    Source {
        /// Prompt text.
        text: String,
    },
    /// Safety rating selector.
    Safety {
        /// Prompt text.
        text: String,
    },
    /// Editor for the image's full tag list.
    ImageTagsEntry {
        /// Prompt text.
        text: String,
    },
    /// Radio or check list of tag options.
    Options {
        /// Single or multiple selection.
        kind: OptionKind,
        /// Prompt text.
        text: String,
        /// Choices in template order.
        options: Vec<QuestionOption>,
    },
}

impl Question {
    /// Prompt text of any question.
    pub fn text(&self) -> &str {
        match self {
            Self::Entry { text }
            | Self::SessionTags { text }
            | Self::Name { text }
            | Self::Source { text }
            | Self::Safety { text }
            | Self::ImageTagsEntry { text }
            | Self::Options { text, .. } => text,
        }
    }

    /// Short kind label, e.g. for summaries.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Entry { .. } => "entry",
            Self::SessionTags { .. } => "session_tags",
            Self::Name { .. } => "name",
            Self::Source { .. } => "source",
            Self::Safety { .. } => "safety",
            Self::ImageTagsEntry { .. } => "image_tags_entry",
            Self::Options {
                kind: OptionKind::Radio,
                ..
            } => "radio",
            Self::Options {
                kind: OptionKind::Check,
                ..
            } => "check",
        }
    }

    /// Options of an option question, empty for other kinds.
    pub fn options(&self) -> &[QuestionOption] {
        match self {
            Self::Options { options, .. } => options,
            _ => &[],
        }
    }
}
