//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};

use memo_core::gate::{
    GateView, PROMPT_ACTION, PROMPT_TITLE, UNAVAILABLE_BODY, UNAVAILABLE_TITLE, VERIFYING_TEXT,
};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Memo · command (context)"
/// Plain mode: "memo command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Memo", styles::bold(), ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("memo {}", command),
        OutputMode::Json => String::new(),
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let marker = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        marker
    } else {
        format!("{} {}", marker, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line. Accepts text with or without a leading "Hint:".
pub fn hint(ctx: &UiContext, text: &str) -> String {
    let text = text.strip_prefix("Hint:").map(str::trim_start).unwrap_or(text);
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        lines.extend(items.iter().map(|(k, v)| format!("  {}", kv(ctx, k, v))));
    } else {
        lines.push("status=ok".to_string());
        lines.extend(items.iter().map(|(k, v)| kv(ctx, k, v)));
    }
    lines.join("\n")
}

/// Render rows as a bordered table (pretty) or tab-separated lines (plain).
pub fn simple_table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    if ctx.unicode {
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(ctx.width.min(u16::MAX as usize) as u16)
        .set_header(headers.to_vec());
    for row in rows {
        table.add_row(row.clone());
    }
    table.to_string()
}

/// Render what the gate shows instead of the notes.
pub fn gate_view(ctx: &UiContext, view: &GateView<'_>) -> String {
    let pretty = ctx.mode.is_pretty();
    match view {
        GateView::Progress => {
            if pretty {
                VERIFYING_TEXT.to_string()
            } else {
                "gate=verifying".to_string()
            }
        }
        GateView::Unavailable => {
            if pretty {
                format!(
                    "{}\n{}",
                    badge(ctx, Badge::Warn, UNAVAILABLE_TITLE),
                    UNAVAILABLE_BODY
                )
            } else {
                format!("gate=unavailable\nmessage={}", UNAVAILABLE_BODY)
            }
        }
        GateView::Prompt { failure } => {
            let mut lines = Vec::new();
            if pretty {
                lines.push(styled(PROMPT_TITLE, styles::bold(), ctx.color));
                if let Some(failure) = failure {
                    lines.push(badge(ctx, Badge::Err, &failure.message()));
                }
                lines.push(hint(ctx, &format!("{}: memo verify", PROMPT_ACTION)));
            } else {
                lines.push(format!(
                    "gate={}",
                    if failure.is_some() { "error" } else { "need" }
                ));
                if let Some(failure) = failure {
                    lines.push(format!("error={}", failure.message()));
                }
            }
            lines.join("\n")
        }
        GateView::Open => {
            if pretty {
                badge(ctx, Badge::Ok, "Verified")
            } else {
                "gate=ok".to_string()
            }
        }
    }
}

/// Print a line unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
    } else {
        lines.push(format!("error={}", message));
    }
    if let Some(h) = error_hint {
        lines.push(hint(ctx, h));
    }
    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
