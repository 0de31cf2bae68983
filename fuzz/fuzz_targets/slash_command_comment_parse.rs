#![no_main]

use libfuzzer_sys::fuzz_target;
use tau_slash_command::{slash_command_from_comment, tokenize_slash_command};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Some(words) = tokenize_slash_command(&raw) else {
        assert!(slash_command_from_comment(&raw, &[]).is_none());
        return;
    };
    assert!(!words.is_empty());
    assert!(words.iter().all(|word| !word.is_empty()));

    let payload = slash_command_from_comment(&raw, &[]).expect("tokenized comment parses");
    let arguments = &words[1..];
    assert_eq!(payload.command, words[0]);
    assert_eq!(payload.args.all, arguments.join(" "));
    assert!(payload.args.named.len() + payload.args.unnamed.len() <= arguments.len());
    if payload.args.named.is_empty() {
        assert_eq!(payload.args.unnamed.all(), payload.args.all);
    }
});
