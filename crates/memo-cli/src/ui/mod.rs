//! UI primitives for the memo CLI.
//!
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges and text styles
//! - **Render**: Tables, headers, receipts, hints, the gate screens
//! - **Progress**: Spinner for the verification call
//! - **Format**: Truncation, ids and timestamps

mod context;
pub mod format;
pub mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;

pub use render::{
    blank_line, gate_view, header, hint, kv, print, print_error, receipt, simple_table,
};

pub use progress::Spinner;

pub use format::{format_timestamp, short_id, single_line, truncate};
