use crate::command_config::PermissionLevel;

/// Returns true when `actor_permission` ranks at or above `required_permission`.
///
/// Unrecognized role strings on either side deny.
pub fn actor_has_permission(actor_permission: &str, required_permission: &str) -> bool {
    let actor = match actor_permission.parse::<PermissionLevel>() {
        Ok(level) => level,
        Err(error) => {
            tracing::warn!(%error, "denying command for unrecognized actor permission");
            return false;
        }
    };
    let required = match required_permission.parse::<PermissionLevel>() {
        Ok(level) => level,
        Err(error) => {
            tracing::warn!(%error, "denying command for unrecognized required permission");
            return false;
        }
    };
    actor.satisfies(required)
}
