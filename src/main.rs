use clap::Parser;
use kith::cli::{self, Cli, Command, DiffArgs, RecordArgs};
use kith::config::Config;
use kith::logging;
use kith::report;
use kith::snapshot::{self, AccountInfo, Snapshot};
use kith::store::{Comparator, SnapshotStore};
use std::path::PathBuf;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn require_account(raw: &str) -> &str {
    let account = cli::account_name(raw);
    if account.is_empty() {
        fail("Enter an account name (without @).");
    }
    account
}

fn run_diff(args: &DiffArgs, store: &SnapshotStore, config: &Config) {
    let account = require_account(&args.account);

    let (from, to): (PathBuf, PathBuf) = match (&args.from, &args.to) {
        (Some(from), Some(to)) => (from.clone(), to.clone()),
        (None, None) => match store.latest_pair(account) {
            Some((older, newer)) => (older.path, newer.path),
            None => fail(format!(
                "Need at least 2 snapshots of '{account}' in {} to compare. Run 'kith record' a few times.",
                store.data_dir().display()
            )),
        },
        _ => fail("Both --from and --to must be specified together."),
    };

    if from == to {
        fail("Select two different snapshots to compare.");
    }

    let comparator = Comparator::new();
    let Some(report) = comparator.compare(&from, &to) else {
        fail("Could not compare the snapshots. Check that both files are valid and belong to the same account.");
    };

    if let Err(e) = report.ensure_account(account) {
        fail(format!("Snapshots do not match the requested account: {e}"));
    }

    if let Err(e) = report::print_comparison(&report, config, args.lists) {
        fail(format!("Error rendering report: {e}"));
    }
}

fn run_record(args: &RecordArgs, config: &Config) {
    let account = require_account(&args.account);

    let followers = snapshot::read_user_list(&args.followers)
        .unwrap_or_else(|e| fail(format!("Error reading followers: {e}")));
    let following = snapshot::read_user_list(&args.following)
        .unwrap_or_else(|e| fail(format!("Error reading following: {e}")));

    let account_info = args.has_account_info().then(|| AccountInfo {
        is_private: args.private,
        follower_count: args.expected_followers.unwrap_or(followers.len() as u64),
        following_count: args.expected_following.unwrap_or(following.len() as u64),
        full_name: args.full_name.clone().unwrap_or_default(),
    });

    if let Err(e) = config.ensure_data_dir() {
        fail(format!("Error preparing data directory: {e}"));
    }

    let captured_at = chrono::Local::now().naive_local();
    let snapshot = Snapshot::new(account, followers, following, account_info, captured_at);

    match snapshot::write(&config.data_dir, &snapshot, captured_at) {
        Ok(path) => {
            println!("Saved snapshot of @{account}: {}", path.display());
            println!(
                "  {} followers, {} following",
                snapshot.followers.len(),
                snapshot.following.len()
            );
        }
        Err(e) => fail(format!("Error saving snapshot: {e}")),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = Config::from_args(&cli.global).unwrap_or_else(|e| fail(format!("Error: {e}")));

    if let Err(e) = logging::init(&config, cli.global.quiet) {
        eprintln!("warning: logging disabled: {e}");
    }

    let store = SnapshotStore::new(&config);

    match cli.command {
        Command::List(args) => {
            let account = require_account(&args.account);
            let snapshots = store.find_snapshots(account);

            if let Err(e) = report::print_catalog(account, &snapshots, &config) {
                fail(format!("Error rendering catalog: {e}"));
            }
        }
        Command::Diff(args) => run_diff(&args, &store, &config),
        Command::Show(args) => match snapshot::load(&args.path) {
            Ok(snapshot) => {
                if let Err(e) = report::print_snapshot(&snapshot, &config) {
                    fail(format!("Error rendering snapshot: {e}"));
                }
            }
            Err(e) => fail(format!("Error loading snapshot: {e}")),
        },
        Command::Record(args) => run_record(&args, &config),
    }
}
