//! Template identifiers and the chat topics some templates choose from.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named preset controlling model behavior for one category of tutoring task.
///
/// Names resolve leniently through [`Template::from_name`]: both the value form
/// (`generate_title`) and the symbolic key form (`GENERATE_TITLE`) are
/// accepted, and anything unrecognized falls back to [`Template::Default`].
///
/// # Examples
///
/// ```
/// use aitutor_core::Template;
///
/// assert_eq!(Template::from_name("tutor"), Template::Tutor);
/// assert_eq!(Template::from_name("EXPLAIN_LIKE_IM_5"), Template::ExplainLikeIm5);
/// assert_eq!(Template::from_name("poetry"), Template::Default);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Template {
    /// General purpose answer
    #[default]
    #[serde(rename = "default")]
    #[strum(serialize = "default")]
    Default,
    /// Conversational tutoring
    #[serde(rename = "tutor")]
    #[strum(serialize = "tutor")]
    Tutor,
    /// Short summary of the input
    #[serde(rename = "summarize")]
    #[strum(serialize = "summarize")]
    Summarize,
    /// Chat title and topic
    #[serde(rename = "generate_title")]
    #[strum(serialize = "generate_title")]
    GenerateTitle,
    /// Image generation
    #[serde(rename = "generate_image")]
    #[strum(serialize = "generate_image")]
    GenerateImage,
    /// Explanation for a five year old
    #[serde(rename = "explain_like_im_5")]
    #[strum(serialize = "explain_like_im_5")]
    ExplainLikeIm5,
    /// Multiple choice quiz question
    #[serde(rename = "multiple_choice_question")]
    #[strum(serialize = "multiple_choice_question")]
    MultipleChoiceQuestion,
}

impl Template {
    /// Resolves a template name, falling back to [`Template::Default`].
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase();
        Self::from_str(&normalized).unwrap_or_default()
    }

    /// Resolves an optional template name, falling back to [`Template::Default`].
    pub fn from_optional_name(name: Option<&str>) -> Self {
        name.map(Self::from_name).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Chat topics a generated title is filed under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Topic {
    Math,
    Science,
    English,
    Filipino,
}
