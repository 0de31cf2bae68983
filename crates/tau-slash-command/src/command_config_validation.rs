use crate::command_config::{CommandConfig, IssueType, PermissionLevel};

/// Returns true when the record's `permission` is a configurable level.
pub fn command_permission_is_valid(config: &CommandConfig) -> bool {
    config
        .permission
        .parse::<PermissionLevel>()
        .is_ok_and(PermissionLevel::is_configurable)
}

pub fn command_issue_type_is_valid(config: &CommandConfig) -> bool {
    config.issue_type.parse::<IssueType>().is_ok()
}

/// Returns true when every record uses in-range `permission` and `issue_type` values.
///
/// Stops at the first invalid record. Other fields are not range-checked.
pub fn config_is_valid(configs: &[CommandConfig]) -> bool {
    configs
        .iter()
        .all(|config| command_permission_is_valid(config) && command_issue_type_is_valid(config))
}
