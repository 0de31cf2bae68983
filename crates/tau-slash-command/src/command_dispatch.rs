//! Selection of dispatch targets for a parsed slash command.

use serde::Serialize;
use serde_json::{json, Value};

use crate::command_config::{CommandConfig, IssueKind};
use crate::command_permission::actor_has_permission;
use crate::slash_command_payload::SlashCommandPayload;

/// Facts about the comment that triggered a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContext {
    pub issue_kind: IssueKind,
    /// True when the comment was edited rather than newly created.
    pub edited: bool,
    /// Role granted to the commenting actor, as reported by the host.
    pub actor_permission: String,
    /// `owner/repo` the comment was posted in.
    pub repository: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchSkipReason {
    InvalidIssueType,
    IssueTypeMismatch,
    EditNotAllowed,
    PermissionDenied,
}

impl DispatchSkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidIssueType => "invalid_issue_type",
            Self::IssueTypeMismatch => "issue_type_mismatch",
            Self::EditNotAllowed => "edit_not_allowed",
            Self::PermissionDenied => "permission_denied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchTarget {
    pub repository: String,
    pub event_type: String,
    pub config: CommandConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDispatch {
    pub config: CommandConfig,
    pub reason: DispatchSkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchPlan {
    pub targets: Vec<DispatchTarget>,
    pub skipped: Vec<SkippedDispatch>,
}

impl DispatchPlan {
    /// Returns true when at least one configured record matched the command name.
    pub fn matched_command(&self) -> bool {
        !self.targets.is_empty() || !self.skipped.is_empty()
    }

    pub fn skipped_for(&self, reason: DispatchSkipReason) -> usize {
        self.skipped
            .iter()
            .filter(|skipped| skipped.reason == reason)
            .count()
    }
}

/// Returns the first record configured for `command`.
pub fn find_command_config<'a>(
    configs: &'a [CommandConfig],
    command: &str,
) -> Option<&'a CommandConfig> {
    configs.iter().find(|config| config.command == command)
}

fn skip_reason(config: &CommandConfig, context: &CommentContext) -> Option<DispatchSkipReason> {
    let Ok(issue_type) = config.parsed_issue_type() else {
        return Some(DispatchSkipReason::InvalidIssueType);
    };
    if !issue_type.applies_to(context.issue_kind) {
        return Some(DispatchSkipReason::IssueTypeMismatch);
    }
    if context.edited && !config.allow_edits {
        return Some(DispatchSkipReason::EditNotAllowed);
    }
    if !actor_has_permission(&context.actor_permission, &config.permission) {
        return Some(DispatchSkipReason::PermissionDenied);
    }
    None
}

/// Evaluates every record configured for the payload's command, in table order.
///
/// Duplicate records for one command each produce their own target, which lets one
/// command fan out to several repositories.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(command = %payload.command, issue_kind = ?context.issue_kind, edited = context.edited)
)]
pub fn plan_dispatches(
    configs: &[CommandConfig],
    payload: &SlashCommandPayload,
    context: &CommentContext,
) -> DispatchPlan {
    let mut plan = DispatchPlan::default();
    for config in configs
        .iter()
        .filter(|config| config.command == payload.command)
    {
        if let Some(reason) = skip_reason(config, context) {
            tracing::debug!(
                event_type = %config.event_type(),
                reason = reason.as_str(),
                "skipping command dispatch"
            );
            plan.skipped.push(SkippedDispatch {
                config: config.clone(),
                reason,
            });
            continue;
        }

        let repository = if config.repository.is_empty() {
            context.repository.clone()
        } else {
            config.repository.clone()
        };
        plan.targets.push(DispatchTarget {
            repository,
            event_type: config.event_type(),
            config: config.clone(),
        });
    }
    tracing::debug!(
        targets = plan.targets.len(),
        skipped = plan.skipped.len(),
        "planned command dispatches"
    );
    plan
}

/// Client payload sent with every dispatch event.
pub fn build_client_payload(payload: &SlashCommandPayload, github_context: Value) -> Value {
    json!({
        "slash_command": payload,
        "github": github_context,
    })
}
