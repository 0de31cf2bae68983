//! Classification of slash-command words into named and positional arguments.

use std::sync::OnceLock;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

const NAMED_ARGUMENT_PATTERN: &str = r"^([A-Za-z0-9]+)=(\S+)$";

fn named_argument_regex() -> &'static Regex {
    static NAMED_ARGUMENT: OnceLock<Regex> = OnceLock::new();
    NAMED_ARGUMENT.get_or_init(|| {
        Regex::new(NAMED_ARGUMENT_PATTERN).expect("named argument pattern compiles")
    })
}

/// Positional arguments in their original left-to-right order.
///
/// Serializes as `{"all": "...", "arg1": "...", ..., "argN": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnnamedArgs {
    values: Vec<String>,
}

impl UnnamedArgs {
    /// Positional arguments joined with single spaces.
    pub fn all(&self) -> String {
        self.values.join(" ")
    }

    /// Looks up a positional argument by its 1-based position.
    pub fn get(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl Serialize for UnnamedArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("all", &self.all())?;
        for (index, value) in self.values.iter().enumerate() {
            map.serialize_entry(&format!("arg{}", index + 1), value)?;
        }
        map.end()
    }
}

/// `key=value` arguments in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedArgs {
    entries: Vec<(String, String)>,
}

impl NamedArgs {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Records `key` unless it is already present. Returns false for a dropped duplicate.
    fn insert_first(&mut self, key: &str, value: &str) -> bool {
        if self.get(key).is_some() {
            return false;
        }
        self.entries.push((key.to_string(), value.to_string()));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Serialize for NamedArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlashCommandArgs {
    /// Every argument word joined with single spaces.
    pub all: String,
    pub unnamed: UnnamedArgs,
    pub named: NamedArgs,
}

/// Parsed command name and classified arguments of one comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlashCommandPayload {
    pub command: String,
    pub args: SlashCommandArgs,
}

/// Returns the `(key, value)` pair when `word` is a well-formed named argument.
pub fn parse_named_argument(word: &str) -> Option<(&str, &str)> {
    let captures = named_argument_regex().captures(word)?;
    let key = captures.get(1)?.as_str();
    let value = captures.get(2)?.as_str();
    Some((key, value))
}

/// Builds the payload for whitespace-split `words`, the first being the command.
///
/// Returns `None` when `words` is empty.
pub fn parse_slash_command<S: AsRef<str>>(words: &[S]) -> Option<SlashCommandPayload> {
    let (command, arguments) = words.split_first()?;
    let mut named = NamedArgs::default();
    let mut unnamed = UnnamedArgs::default();
    for word in arguments {
        let word = word.as_ref();
        match parse_named_argument(word) {
            Some((key, value)) => {
                if !named.insert_first(key, value) {
                    tracing::debug!(key, "dropping repeated named argument");
                }
            }
            None => unnamed.values.push(word.to_string()),
        }
    }

    Some(SlashCommandPayload {
        command: command.as_ref().to_string(),
        args: SlashCommandArgs {
            all: arguments
                .iter()
                .map(|word| word.as_ref())
                .collect::<Vec<&str>>()
                .join(" "),
            unnamed,
            named,
        },
    })
}
