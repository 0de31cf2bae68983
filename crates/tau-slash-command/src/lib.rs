//! Slash-command parsing and command configuration for Tau issue/PR comment dispatch.
//!
//! Turns comment bodies into structured command payloads, resolves the per-command
//! configuration table from a command list or JSON, validates it, and decides which
//! dispatch events an actor may trigger. All functions are pure; network and file
//! access stay with the caller.

pub mod command_config;
pub mod command_config_source;
pub mod command_config_validation;
pub mod command_dispatch;
pub mod command_permission;
pub mod slash_command_comment;
pub mod slash_command_payload;

pub use command_config::{
    CommandConfig, CommandConfigOverrides, CommandDefaults, IssueKind, IssueType,
    PermissionLevel, PermissionParseError, COMMAND_DEFAULTS,
};
pub use command_config_source::{
    command_configs_from_json, command_configs_from_list, read_command_config_file,
    resolve_command_configs, CommandConfigError, CommandConfigSource, SlashCommandInputs,
};
pub use command_config_validation::config_is_valid;
pub use command_dispatch::{
    build_client_payload, find_command_config, plan_dispatches, CommentContext,
    DispatchPlan, DispatchSkipReason, DispatchTarget, SkippedDispatch,
};
pub use command_permission::actor_has_permission;
pub use slash_command_comment::{slash_command_from_comment, tokenize_slash_command};
pub use slash_command_payload::{
    parse_slash_command, NamedArgs, SlashCommandArgs, SlashCommandPayload, UnnamedArgs,
};
