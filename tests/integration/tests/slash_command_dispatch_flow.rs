use std::fs;
use std::sync::Once;

use anyhow::{Context, Result};
use serde_json::json;
use tau_slash_command::{
    build_client_payload, config_is_valid, plan_dispatches, read_command_config_file,
    resolve_command_configs, slash_command_from_comment, CommandConfigSource, CommentContext,
    DispatchSkipReason, IssueKind, SlashCommandInputs,
};

static TRACING: Once = Once::new();

fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    });
}

fn pull_request_context(actor_permission: &str) -> CommentContext {
    CommentContext {
        issue_kind: IssueKind::PullRequest,
        edited: false,
        actor_permission: actor_permission.to_string(),
        repository: "tau-labs/app".to_string(),
    }
}

#[test]
fn integration_command_list_inputs_dispatch_parsed_comment() -> Result<()> {
    init_test_tracing();
    let inputs: SlashCommandInputs = serde_json::from_value(json!({
        "commands": "deploy, rollback,\nstatus",
        "permission": "write",
        "issue_type": "pull-request",
        "static_args": ["region=eu"]
    }))?;
    let source = CommandConfigSource::from_inputs(&inputs)?;
    let configs = resolve_command_configs(&source, read_command_config_file)?;
    assert!(config_is_valid(&configs));
    assert_eq!(configs.len(), 3);

    let payload = slash_command_from_comment(
        "/Deploy branch=main canary\nShip it after review.",
        &inputs.static_args,
    )
    .context("comment should carry a slash command")?;
    let plan = plan_dispatches(&configs, &payload, &pull_request_context("admin"));
    assert_eq!(plan.targets.len(), 1);
    assert_eq!(plan.targets[0].repository, "tau-labs/app");
    assert_eq!(plan.targets[0].event_type, "deploy-command");

    let client_payload = build_client_payload(&payload, json!({ "event_name": "issue_comment" }));
    assert_eq!(
        client_payload["slash_command"],
        json!({
            "command": "deploy",
            "args": {
                "all": "branch=main canary region=eu",
                "unnamed": { "all": "canary", "arg1": "canary" },
                "named": { "branch": "main", "region": "eu" }
            }
        })
    );
    Ok(())
}

#[test]
fn integration_json_file_config_routes_commands_per_record() -> Result<()> {
    init_test_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slash-commands.json");
    fs::write(
        &path,
        r#"[
            { "command": "rebase", "permission": "write", "allow_edits": true },
            { "command": "release", "permission": "admin", "repository": "tau-labs/infra",
              "event_type_suffix": "-release" },
            { "command": "help", "permission": "read", "issue_type": "issue" }
        ]"#,
    )?;
    let inputs = SlashCommandInputs {
        config_from_file: path.display().to_string(),
        ..SlashCommandInputs::default()
    };
    let source = CommandConfigSource::from_inputs(&inputs)?;
    let configs = resolve_command_configs(&source, read_command_config_file)?;
    assert!(config_is_valid(&configs));

    let release = slash_command_from_comment("/release v1.2.0", &[]).context("release")?;
    let denied = plan_dispatches(&configs, &release, &pull_request_context("write"));
    assert!(denied.targets.is_empty());
    assert_eq!(denied.skipped_for(DispatchSkipReason::PermissionDenied), 1);
    let allowed = plan_dispatches(&configs, &release, &pull_request_context("admin"));
    assert_eq!(allowed.targets[0].repository, "tau-labs/infra");
    assert_eq!(allowed.targets[0].event_type, "release-release");

    let help = slash_command_from_comment("/help", &[]).context("help")?;
    let plan = plan_dispatches(&configs, &help, &pull_request_context("admin"));
    assert_eq!(plan.skipped_for(DispatchSkipReason::IssueTypeMismatch), 1);

    let rebase = slash_command_from_comment("/rebase", &[]).context("rebase")?;
    let mut edited = pull_request_context("write");
    edited.edited = true;
    let plan = plan_dispatches(&configs, &rebase, &edited);
    assert_eq!(plan.targets.len(), 1);
    Ok(())
}

#[test]
fn integration_invalid_json_config_aborts_resolution() {
    init_test_tracing();
    let inputs = SlashCommandInputs {
        config: r#"[{"command":"deploy"},{"permission":"admin"}]"#.to_string(),
        ..SlashCommandInputs::default()
    };
    let source = CommandConfigSource::from_inputs(&inputs).expect("json source");
    let error = resolve_command_configs(&source, read_command_config_file)
        .expect_err("missing command should fail");
    assert_eq!(
        error.to_string(),
        "command configuration entry 1 is missing a 'command' value"
    );
}

#[test]
fn integration_out_of_range_config_is_reported_by_validation() -> Result<()> {
    init_test_tracing();
    let inputs = SlashCommandInputs {
        config: r#"[{"command":"deploy","permission":"owner"}]"#.to_string(),
        ..SlashCommandInputs::default()
    };
    let configs = resolve_command_configs(
        &CommandConfigSource::from_inputs(&inputs)?,
        read_command_config_file,
    )?;
    assert_eq!(configs[0].permission, "owner");
    assert!(!config_is_valid(&configs));
    Ok(())
}
