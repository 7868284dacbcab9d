use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use memo_core::{VerificationLevel, VERSION};

/// SimpleMemo - notes behind a World ID verification gate
#[derive(Parser)]
#[command(name = "memo")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the local storage file
    #[arg(short, long, global = true, env = "MEMO_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Increase diagnostic logging (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Identity settings that override the config file
#[derive(Args, Debug, Default)]
pub struct IdentityArgs {
    /// Application identifier registered with the provider
    #[arg(long, env = "MEMO_APP_ID")]
    pub app_id: Option<String>,

    /// Action identifier the proof is scoped to
    #[arg(long, env = "MEMO_ACTION_ID")]
    pub action_id: Option<String>,

    /// Credential level to request (orb, device)
    #[arg(long)]
    pub level: Option<VerificationLevel>,

    /// Provider bridge command
    #[arg(long, env = "MEMO_PROVIDER")]
    pub provider: Option<String>,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Set default editor
    #[arg(long)]
    pub editor: Option<String>,

    /// Set timezone for displayed dates
    #[arg(long)]
    pub timezone: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `verify` command
#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Optional signal bound into the proof
    #[arg(long)]
    pub signal: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `new` command
#[derive(Args)]
pub struct NewArgs {
    /// Note content (overrides stdin/editor)
    #[arg(long, alias = "body")]
    pub content: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New content (overrides stdin/editor)
    #[arg(long, alias = "body")]
    pub content: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file with identity and provider settings
    Init(InitArgs),

    /// Verify with World ID to unlock notes
    Verify(VerifyArgs),

    /// Show gate state and storage location
    Status(StatusArgs),

    /// List notes, newest first
    List(ListArgs),

    /// Create a note
    New(NewArgs),

    /// Show a note
    Show(ShowArgs),

    /// Replace a note's content
    Edit(EditArgs),

    /// Delete a note after confirmation
    Delete(DeleteArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete_with_yes() {
        let cli = Cli::try_parse_from(["memo", "delete", "abc", "--yes"]).unwrap();
        match cli.command {
            Some(Commands::Delete(args)) => {
                assert_eq!(args.id, "abc");
                assert!(args.yes);
            }
            _ => panic!("expected delete"),
        }
    }

    #[test]
    fn test_parse_level() {
        let cli = Cli::try_parse_from(["memo", "verify", "--level", "device"]).unwrap();
        match cli.command {
            Some(Commands::Verify(args)) => {
                assert_eq!(args.identity.level, Some(VerificationLevel::Device));
            }
            _ => panic!("expected verify"),
        }
    }
}
