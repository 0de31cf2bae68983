//! Command configuration records and the closed enumerations they reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a permission or issue-type string is outside its enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionParseError {
    #[error("unrecognized permission level '{0}' (expected none, read, write or admin)")]
    Permission(String),
    #[error("unrecognized issue type '{0}' (expected issue, pull-request or both)")]
    IssueType(String),
}

/// Repository role granted to an actor, or required by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    None,
    Read,
    Write,
    Admin,
}

impl PermissionLevel {
    /// Position in the fixed `none < read < write < admin` ordering.
    pub fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Read => 1,
            Self::Write => 2,
            Self::Admin => 3,
        }
    }

    /// Returns true when this level satisfies `required`.
    pub fn satisfies(self, required: Self) -> bool {
        self.rank() >= required.rank()
    }

    /// `none` is an actor role only; commands cannot require it.
    pub fn is_configurable(self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for PermissionLevel {
    type Err = PermissionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "none" => Ok(Self::None),
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "admin" => Ok(Self::Admin),
            other => Err(PermissionParseError::Permission(other.to_string())),
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of container a comment was posted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    Issue,
    PullRequest,
}

/// Container kinds a command is allowed to fire on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Issue,
    PullRequest,
    Both,
}

impl IssueType {
    pub fn applies_to(self, kind: IssueKind) -> bool {
        matches!(
            (self, kind),
            (Self::Both, _)
                | (Self::Issue, IssueKind::Issue)
                | (Self::PullRequest, IssueKind::PullRequest)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "pull-request",
            Self::Both => "both",
        }
    }
}

impl FromStr for IssueType {
    type Err = PermissionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "issue" => Ok(Self::Issue),
            "pull-request" => Ok(Self::PullRequest),
            "both" => Ok(Self::Both),
            other => Err(PermissionParseError::IssueType(other.to_string())),
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default values applied to every field a configuration source leaves out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDefaults {
    pub permission: &'static str,
    pub issue_type: &'static str,
    pub allow_edits: bool,
    pub repository: &'static str,
    pub event_type_suffix: &'static str,
}

pub const COMMAND_DEFAULTS: CommandDefaults = CommandDefaults {
    permission: "write",
    issue_type: "both",
    allow_edits: false,
    repository: "",
    event_type_suffix: "-command",
};

/// Optional per-command settings as they arrive from a configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfigOverrides {
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub allow_edits: Option<bool>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub event_type_suffix: Option<String>,
}

/// Resolved settings for one slash command.
///
/// `permission` and `issue_type` keep the configured text so that out-of-range values
/// survive resolution and can be reported by
/// [`config_is_valid`](crate::command_config_validation::config_is_valid).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub command: String,
    pub permission: String,
    pub issue_type: String,
    pub allow_edits: bool,
    pub repository: String,
    pub event_type_suffix: String,
}

impl CommandConfig {
    /// Builds a record from `overrides`, falling back to `defaults` field by field.
    ///
    /// Empty `permission`, `issue_type` and `event_type_suffix` values fall back to the
    /// default; any other value, whitespace included, is kept verbatim. `repository` and
    /// `allow_edits` are taken verbatim whenever present.
    pub fn resolve(
        command: impl Into<String>,
        overrides: &CommandConfigOverrides,
        defaults: &CommandDefaults,
    ) -> Self {
        Self {
            command: command.into(),
            permission: non_empty_or(overrides.permission.as_deref(), defaults.permission),
            issue_type: non_empty_or(overrides.issue_type.as_deref(), defaults.issue_type),
            allow_edits: overrides.allow_edits.unwrap_or(defaults.allow_edits),
            repository: overrides
                .repository
                .clone()
                .unwrap_or_else(|| defaults.repository.to_string()),
            event_type_suffix: non_empty_or(
                overrides.event_type_suffix.as_deref(),
                defaults.event_type_suffix,
            ),
        }
    }

    pub fn permission_level(&self) -> Result<PermissionLevel, PermissionParseError> {
        self.permission.parse()
    }

    pub fn parsed_issue_type(&self) -> Result<IssueType, PermissionParseError> {
        self.issue_type.parse()
    }

    /// Event type sent with the dispatch for this command.
    pub fn event_type(&self) -> String {
        format!("{}{}", self.command, self.event_type_suffix)
    }
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}
