use crate::slash_command_payload::{parse_slash_command, SlashCommandPayload};

pub const SLASH_COMMAND_TRIGGER: char = '/';

/// Splits the first line of a comment into slash-command words.
///
/// Returns `None` unless the trimmed first line starts with the trigger immediately
/// followed by a command word. The trigger is stripped and the command word is
/// lowercased; argument words keep their case.
pub fn tokenize_slash_command(body: &str) -> Option<Vec<String>> {
    let first_line = body.lines().next().unwrap_or_default().trim();
    let rest = first_line.strip_prefix(SLASH_COMMAND_TRIGGER)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut words = rest.split_whitespace();
    let command = words.next()?.to_lowercase();
    Some(
        std::iter::once(command)
            .chain(words.map(str::to_string))
            .collect(),
    )
}

/// Tokenizes `body`, appends `static_args`, and classifies the resulting words.
///
/// Static arguments come after the typed ones, so a named key typed in the comment wins.
pub fn slash_command_from_comment(
    body: &str,
    static_args: &[String],
) -> Option<SlashCommandPayload> {
    let mut words = tokenize_slash_command(body)?;
    words.extend(
        static_args
            .iter()
            .flat_map(|arg| arg.split_whitespace())
            .map(str::to_string),
    );
    parse_slash_command(&words)
}
