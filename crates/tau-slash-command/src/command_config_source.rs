//! Resolution of the command table from one of the three configuration sources.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command_config::{CommandConfig, CommandConfigOverrides, COMMAND_DEFAULTS};

/// Error returned when the command table cannot be resolved.
#[derive(Debug, Error)]
pub enum CommandConfigError {
    #[error("invalid command configuration JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("command configuration entry {index} is missing a 'command' value")]
    MissingCommand { index: usize },
    #[error("'config' and 'config_from_file' cannot both be set")]
    ConflictingSources,
    #[error("no command configuration: set 'commands', 'config' or 'config_from_file'")]
    MissingSource,
    #[error("failed to read command configuration file '{}'", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Raw dispatcher inputs as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlashCommandInputs {
    /// Comma-separated command names sharing the flags below.
    pub commands: String,
    #[serde(flatten)]
    pub shared: CommandConfigOverrides,
    /// JSON array of per-command records.
    pub config: String,
    /// Path to a file holding the JSON array.
    pub config_from_file: String,
    /// `key=value` arguments appended to every parsed command.
    pub static_args: Vec<String>,
}

/// Configuration source, disambiguated before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandConfigSource {
    CommandList {
        commands: String,
        shared: CommandConfigOverrides,
    },
    Json {
        text: String,
    },
    JsonFile {
        path: PathBuf,
    },
}

impl CommandConfigSource {
    /// Picks the source configured on `inputs`.
    ///
    /// `config` and `config_from_file` are mutually exclusive and take precedence over
    /// `commands`.
    pub fn from_inputs(inputs: &SlashCommandInputs) -> Result<Self, CommandConfigError> {
        let config = inputs.config.trim();
        let config_from_file = inputs.config_from_file.trim();
        match (config.is_empty(), config_from_file.is_empty()) {
            (false, false) => Err(CommandConfigError::ConflictingSources),
            (false, true) => Ok(Self::Json {
                text: inputs.config.clone(),
            }),
            (true, false) => Ok(Self::JsonFile {
                path: PathBuf::from(config_from_file),
            }),
            (true, true) if inputs.commands.trim().is_empty() => {
                Err(CommandConfigError::MissingSource)
            }
            (true, true) => Ok(Self::CommandList {
                commands: inputs.commands.clone(),
                shared: inputs.shared.clone(),
            }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::CommandList { .. } => "command_list",
            Self::Json { .. } => "json",
            Self::JsonFile { .. } => "json_file",
        }
    }
}

/// Resolves the ordered command table for `source`.
///
/// File contents are obtained through `read_file`; pass [`read_command_config_file`] to
/// read from disk. Any failure aborts the whole resolution.
#[tracing::instrument(level = "debug", skip_all, fields(source = source.kind()))]
pub fn resolve_command_configs<F>(
    source: &CommandConfigSource,
    read_file: F,
) -> Result<Vec<CommandConfig>, CommandConfigError>
where
    F: Fn(&Path) -> io::Result<String>,
{
    let configs = match source {
        CommandConfigSource::CommandList { commands, shared } => {
            command_configs_from_list(commands, shared)
        }
        CommandConfigSource::Json { text } => command_configs_from_json(text)?,
        CommandConfigSource::JsonFile { path } => {
            let text = read_file(path).map_err(|source| CommandConfigError::ReadFile {
                path: path.clone(),
                source,
            })?;
            command_configs_from_json(&text)?
        }
    };
    tracing::debug!(commands = configs.len(), "resolved command configuration");
    Ok(configs)
}

/// Builds one record per comma-separated name, all sharing `shared`.
///
/// All whitespace is removed before splitting, including whitespace inside names. Empty
/// entries are kept, so `""` resolves to a single record with an empty name.
pub fn command_configs_from_list(
    commands: &str,
    shared: &CommandConfigOverrides,
) -> Vec<CommandConfig> {
    let stripped = commands
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>();
    stripped
        .split(',')
        .map(|command| CommandConfig::resolve(command, shared, &COMMAND_DEFAULTS))
        .collect()
}

#[derive(Debug, Deserialize)]
struct JsonCommandConfig {
    #[serde(default)]
    command: Option<String>,
    #[serde(flatten)]
    overrides: CommandConfigOverrides,
}

/// Parses a JSON array of command records, defaulting each record independently.
pub fn command_configs_from_json(text: &str) -> Result<Vec<CommandConfig>, CommandConfigError> {
    let entries: Vec<JsonCommandConfig> = serde_json::from_str(text)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry.command {
            Some(command) if !command.trim().is_empty() => Ok(CommandConfig::resolve(
                command,
                &entry.overrides,
                &COMMAND_DEFAULTS,
            )),
            _ => Err(CommandConfigError::MissingCommand { index }),
        })
        .collect()
}

pub fn read_command_config_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}
