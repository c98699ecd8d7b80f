use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kith")]
#[command(about = "Track how an account's followers and following change between snapshots")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory snapshots are read from and written to
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List an account's snapshots, most recent first
    List(ListArgs),

    /// Compare two snapshots of an account
    Diff(DiffArgs),

    /// Validate a snapshot file and summarize it
    Show(ShowArgs),

    /// Store a new snapshot from exported username lists
    Record(RecordArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Account name, with or without a leading @
    pub account: String,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Account name, with or without a leading @
    pub account: String,

    /// Older snapshot file (defaults to the second most recent)
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Newer snapshot file (defaults to the most recent)
    #[arg(long)]
    pub to: Option<PathBuf>,

    /// Also print the usernames in every category
    #[arg(long, default_value_t = false)]
    pub lists: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Snapshot file to load
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct RecordArgs {
    /// Account name, with or without a leading @
    pub account: String,

    /// File with one follower username per line
    #[arg(long)]
    pub followers: PathBuf,

    /// File with one followed username per line
    #[arg(long)]
    pub following: PathBuf,

    /// Display name reported by the profile
    #[arg(long)]
    pub full_name: Option<String>,

    /// Mark the account as private
    #[arg(long, default_value_t = false)]
    pub private: bool,

    /// Follower count shown on the profile
    #[arg(long)]
    pub expected_followers: Option<u64>,

    /// Following count shown on the profile
    #[arg(long)]
    pub expected_following: Option<u64>,
}

impl RecordArgs {
    /// true when any profile detail was given on the command line
    pub fn has_account_info(&self) -> bool {
        self.full_name.is_some()
            || self.private
            || self.expected_followers.is_some()
            || self.expected_following.is_some()
    }
}

/// Normalize an account argument: trim and drop a leading @.
pub fn account_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_name_drops_sigil_and_whitespace() {
        assert_eq!(account_name("  @demo "), "demo");
        assert_eq!(account_name("demo"), "demo");
        assert_eq!(account_name("   "), "");
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["kith", "diff", "demo", "--json", "-vv", "--lists"]).unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.verbose, 2);
        match cli.command {
            Command::Diff(args) => {
                assert_eq!(args.account, "demo");
                assert!(args.lists);
                assert!(args.from.is_none());
            }
            _ => panic!("expected diff"),
        }
    }

    #[test]
    fn record_requires_both_lists() {
        assert!(Cli::try_parse_from(["kith", "record", "demo", "--followers", "f.txt"]).is_err());
    }
}
