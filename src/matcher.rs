// Output matching rules for captured sample output

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Expected output of every sample unless a language says otherwise
pub const DEFAULT_GREETING: &str = "Hello, world!";

/// How a single check inside [`MatchRule::SubstringAnywhere`] is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Value must occur anywhere in the full output
    In,
    /// Last line must begin with the value
    StartsWith,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCheck {
    pub kind: CheckKind,
    pub value: String,
}

impl MatchCheck {
    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            kind: CheckKind::In,
            value: value.into(),
        }
    }

    pub fn starts_with(value: impl Into<String>) -> Self {
        Self {
            kind: CheckKind::StartsWith,
            value: value.into(),
        }
    }

    fn passes(&self, output: &str, last: &str) -> bool {
        match self.kind {
            CheckKind::In => output.contains(&self.value),
            CheckKind::StartsWith => last.starts_with(&self.value),
        }
    }
}

/// Policy deciding whether captured output indicates success.
///
/// In a registry file a rule is a map with exactly one key, e.g.
/// `starts_with_last_line: "Hello, world! ("`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleMap", into = "RuleMap")]
pub enum MatchRule {
    ExactLastLine(String),
    StartsWithLastLine(String),
    /// Every check must pass
    SubstringAnywhere(Vec<MatchCheck>),
}

/// Serialized form of [`MatchRule`]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exact_last_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    starts_with_last_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    substring_anywhere: Option<Vec<MatchCheck>>,
}

impl TryFrom<RuleMap> for MatchRule {
    type Error = String;

    fn try_from(map: RuleMap) -> std::result::Result<Self, Self::Error> {
        match (map.exact_last_line, map.starts_with_last_line, map.substring_anywhere) {
            (Some(line), None, None) => Ok(MatchRule::ExactLastLine(line)),
            (None, Some(prefix), None) => Ok(MatchRule::StartsWithLastLine(prefix)),
            (None, None, Some(checks)) => Ok(MatchRule::SubstringAnywhere(checks)),
            _ => Err("a match rule needs exactly one of exact_last_line, \
                      starts_with_last_line or substring_anywhere"
                .to_string()),
        }
    }
}

impl From<MatchRule> for RuleMap {
    fn from(rule: MatchRule) -> Self {
        match rule {
            MatchRule::ExactLastLine(line) => RuleMap {
                exact_last_line: Some(line),
                ..RuleMap::default()
            },
            MatchRule::StartsWithLastLine(prefix) => RuleMap {
                starts_with_last_line: Some(prefix),
                ..RuleMap::default()
            },
            MatchRule::SubstringAnywhere(checks) => RuleMap {
                substring_anywhere: Some(checks),
                ..RuleMap::default()
            },
        }
    }
}

impl Default for MatchRule {
    fn default() -> Self {
        MatchRule::ExactLastLine(DEFAULT_GREETING.to_string())
    }
}

impl MatchRule {
    pub fn matches(&self, output: &str) -> bool {
        let last = last_line(output);
        match self {
            MatchRule::ExactLastLine(expected) => last == expected.as_str(),
            MatchRule::StartsWithLastLine(prefix) => last.starts_with(prefix.as_str()),
            MatchRule::SubstringAnywhere(checks) => {
                checks.iter().all(|check| check.passes(output, last))
            }
        }
    }

    /// Validate `output` for a language, echoing the whole output on failure
    pub fn check(&self, language: &str, display_name: &str, output: &str) -> Result<()> {
        if self.matches(output) {
            return Ok(());
        }

        tracing::debug!(language = %language, rule = ?self, "Output did not satisfy rule");
        Err(MatchError::Mismatch {
            language: language.to_string(),
            display_name: display_name.to_string(),
            output: output.to_string(),
        }
        .into())
    }
}

/// Final line of `output`; `\n` and `\r\n` both terminate a line.
/// Empty output has an empty last line.
pub fn last_line(output: &str) -> &str {
    output.lines().last().unwrap_or("")
}
