//! Output mode routing logic.

/// How command results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// JSON document on stdout, nothing else
    Json,
    /// Stable `key=value` lines for scripts
    #[default]
    Plain,
    /// Colors, tables and badges for a terminal
    Pretty,
}

impl OutputMode {
    /// Pick a mode from flags and the environment.
    ///
    /// `--json` wins over everything. `--format plain` and `TERM=dumb` force
    /// plain. Otherwise a terminal gets pretty output and a pipe gets plain.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            Self::Json
        } else if format_flag == Some("plain") || term_is_dumb || !is_tty {
            Self::Plain
        } else {
            Self::Pretty
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
