#![no_main]

use libfuzzer_sys::fuzz_target;
use tau_slash_command::{command_configs_from_json, config_is_valid, COMMAND_DEFAULTS};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Ok(configs) = command_configs_from_json(&raw) else {
        return;
    };
    for config in &configs {
        assert!(!config.command.trim().is_empty());
        assert!(!config.permission.trim().is_empty());
        assert!(!config.issue_type.trim().is_empty());
        assert!(!config.event_type_suffix.trim().is_empty());
    }
    if configs.iter().all(|config| {
        config.permission == COMMAND_DEFAULTS.permission
            && config.issue_type == COMMAND_DEFAULTS.issue_type
    }) {
        assert!(config_is_valid(&configs));
    }
});
