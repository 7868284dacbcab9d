//! Input helpers shared by the note commands.

use std::io::{self, IsTerminal, Read};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::CliError;

/// Read note content from `--content`, piped stdin, or `$EDITOR`.
///
/// Returns `None` when `--no-input` is set on a terminal without content.
/// The editor starts from `initial`. Empty content is allowed.
pub fn read_note_content(
    content: Option<String>,
    no_input: bool,
    editor_override: Option<&str>,
    initial: &str,
) -> anyhow::Result<Option<String>> {
    if let Some(value) = content {
        return Ok(Some(value));
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(Some(strip_final_newline(buffer)));
    }

    if no_input {
        return Ok(None);
    }

    read_from_editor(editor_override, initial).map(Some)
}

fn strip_final_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Open the editor on a temp file seeded with `initial`.
fn read_from_editor(editor_override: Option<&str>, initial: &str) -> anyhow::Result<String> {
    let editor = editor_override
        .map(String::from)
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| {
            CliError::invalid_input_with_hint(
                "$EDITOR is not set",
                "Hint: Use --content, pipe content via stdin, or set [ui] editor in the config.",
            )
        })?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let path = std::env::temp_dir().join(format!("memo_note_{}_{}.md", std::process::id(), nanos));
    std::fs::write(&path, initial)
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;

    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(&path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor: {}", e));
    let status = match status {
        Ok(status) => status,
        Err(err) => {
            let _ = std::fs::remove_file(&path);
            return Err(err);
        }
    };
    if !status.success() {
        let _ = std::fs::remove_file(&path);
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?;
    let _ = std::fs::remove_file(&path);
    Ok(strip_final_newline(contents))
}

/// Check `--format`, accepting `table` and `plain`.
pub fn validate_format(format: Option<&str>) -> anyhow::Result<()> {
    match format {
        None | Some("table") | Some("plain") => Ok(()),
        Some(other) => Err(CliError::invalid_input_with_hint(
            format!("Unknown format: {}", other),
            "Hint: Use --format table or --format plain.",
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_flag_wins_even_when_empty() {
        let out = read_note_content(Some(String::new()), true, None, "old").unwrap();
        assert_eq!(out.as_deref(), Some(""));
    }

    #[test]
    fn test_strip_final_newline() {
        assert_eq!(strip_final_newline("a\nb\n".to_string()), "a\nb");
        assert_eq!(strip_final_newline("a\r\n".to_string()), "a");
        assert_eq!(strip_final_newline("a\n\n".to_string()), "a\n");
    }

    #[test]
    fn test_validate_format() {
        assert!(validate_format(None).is_ok());
        assert!(validate_format(Some("plain")).is_ok());
        assert!(validate_format(Some("csv")).is_err());
    }
}
