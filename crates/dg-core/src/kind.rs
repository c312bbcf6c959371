//! Artifact kinds and target languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a submitted snippet is.
///
/// Set once per request (by the classifier or by the caller) and never
/// changed afterwards. Selects both the prompt template and the shape of
/// the documentation the provider is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// A plain function: documented by `params`, `description`, `usage`
    Function,
    /// A UI component: documented by `props`, `description`, `usage`
    Component,
    /// Unrecognized or ambiguous code
    None,
}

impl ArtifactKind {
    /// Map a classifier reply onto a kind.
    ///
    /// Only the exact words `Function` and `Component` (surrounding
    /// whitespace ignored) are recognized. Everything else, including an
    /// empty reply, is `None`.
    #[must_use]
    pub fn from_reply(reply: &str) -> Self {
        match reply.trim() {
            "Function" => ArtifactKind::Function,
            "Component" => ArtifactKind::Component,
            _ => ArtifactKind::None,
        }
    }

    /// Whether documentation can be generated for this kind.
    #[must_use]
    pub fn is_documentable(self) -> bool {
        !matches!(self, ArtifactKind::None)
    }

    /// Get the name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::Function => "Function",
            ArtifactKind::Component => "Component",
            ArtifactKind::None => "None",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Natural language of the generated documentation.
///
/// Only changes the prose the provider writes; the JSON keys stay the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetLanguage {
    /// English (also used when no language is given)
    #[default]
    En,
    /// Romanian
    Ro,
}

impl TargetLanguage {
    /// All supported languages.
    pub const ALL: [TargetLanguage; 2] = [TargetLanguage::En, TargetLanguage::Ro];

    /// Get the short code of this language.
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::En => "En",
            TargetLanguage::Ro => "Ro",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a language name is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0} (expected En or Ro)")]
pub struct LanguageParseError(pub String);

impl FromStr for TargetLanguage {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(TargetLanguage::En),
            "ro" | "romanian" => Ok(TargetLanguage::Ro),
            _ => Err(LanguageParseError(s.to_string())),
        }
    }
}
