//! Replacement strategies for matched logging calls.

use std::fmt;
use std::str::FromStr;

/// Placeholder substituted with the matched call text in template strategies.
pub const CALL_PLACEHOLDER: &str = "{call}";

/// Built-in replacement strategies.
///
/// Callers that need something else pass their own closure to
/// [`crate::engine::process_with`]; this enum only covers what can be named
/// in configuration.
///
/// The comment strategies copy the call text verbatim. A call whose text
/// contains `*/` closes the comment early and the output no longer parses;
/// use a template such as `// {call}` for such sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// `/* call */`
    Comment,
    /// `null /* call */`, keeps an expression in place of the call
    NullComment,
    /// Free-form text with `{call}` replaced by the matched text
    Template(String),
}

impl Strategy {
    /// Default strategy for the semicolon setting.
    ///
    /// When the trailing semicolon is swallowed the whole statement can become
    /// a comment; otherwise an expression must stay in front of the `;`.
    #[must_use]
    pub fn default_for(remove_semicolon: bool) -> Self {
        if remove_semicolon {
            Self::Comment
        } else {
            Self::NullComment
        }
    }

    /// Replacement text for the matched call.
    #[must_use]
    pub fn apply(&self, call: &str) -> String {
        match self {
            Self::Comment => format!("/* {call} */"),
            Self::NullComment => format!("null /* {call} */"),
            Self::Template(template) => template.replace(CALL_PLACEHOLDER, call),
        }
    }
}

/// Error returned when a strategy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}`: expected `comment`, `null`, or a template containing `{{call}}`")]
pub struct StrategyError(pub String);

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "comment" => Ok(Self::Comment),
            "null" | "null-comment" => Ok(Self::NullComment),
            template if template.contains(CALL_PLACEHOLDER) => {
                Ok(Self::Template(template.to_owned()))
            }
            other => Err(StrategyError(other.to_owned())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment => f.write_str("comment"),
            Self::NullComment => f.write_str("null"),
            Self::Template(template) => f.write_str(template),
        }
    }
}
