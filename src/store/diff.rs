//! Snapshot comparison engine.
//!
//! Compares two snapshots of the same account and reports:
//! - Follower and following deltas between the "from" and "to" snapshot
//! - Current relationship categories taken from the "to" snapshot alone
//! - Counts and net changes derived from the above
//!
//! Lists are compared as sets, so duplicates and ordering in the source
//! files never affect the result. Every list in the report is sorted.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::snapshot::{self, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub account: String,
    pub comparison_info: ComparisonInfo,
    pub changes: Changes,
    pub current_relationships: CurrentRelationships,
    pub stats: ComparisonStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonInfo {
    pub file1: FileSummary,
    pub file2: FileSummary,
}

/// Per-input metadata. Counts are of distinct usernames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub filename: String,
    pub extraction_date: String,
    pub followers_count: usize,
    pub following_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Changes {
    pub new_followers: Vec<String>,
    pub lost_followers: Vec<String>,
    pub new_following: Vec<String>,
    pub unfollowed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentRelationships {
    pub mutual_follows: Vec<String>,
    /// Accounts followed that do not follow back.
    pub follows_but_not_followed: Vec<String>,
    /// Followers that are not followed back.
    pub followed_but_not_following: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonStats {
    pub followers_gained: usize,
    pub followers_lost: usize,
    pub net_followers_change: i64,
    pub new_following_count: usize,
    pub unfollowed_count: usize,
    pub net_following_change: i64,
    pub mutual_follows_count: usize,
    pub follows_but_not_followed_count: usize,
    pub followed_but_not_following_count: usize,
}

impl ComparisonReport {
    /// Check the report is about `account`, for callers that asked for one
    /// account but chose the files themselves.
    pub fn ensure_account(&self, account: &str) -> Result<()> {
        if self.account == account {
            Ok(())
        } else {
            Err(Error::AccountMismatch {
                from: account.to_string(),
                to: self.account.clone(),
            })
        }
    }
}

/// Loads snapshot files and compares them.
///
/// Failures are logged and surface as `None`; nothing here returns an error
/// to the caller. Use [`snapshot::load`] directly when the precise failure
/// has to be shown to a user.
#[derive(Debug, Default, Clone, Copy)]
pub struct Comparator;

impl Comparator {
    pub fn new() -> Self {
        Comparator
    }

    /// Load and validate one snapshot, logging any failure.
    pub fn load_snapshot(&self, path: &Path) -> Option<Snapshot> {
        match snapshot::load(path) {
            Ok(snapshot) => {
                info!(path = %path.display(), account = %snapshot.account, "snapshot loaded");
                Some(snapshot)
            }
            Err(e) => {
                error!(path = %path.display(), "failed to load snapshot: {e}");
                None
            }
        }
    }

    /// Compare the snapshot at `from` (older) with the one at `to` (newer).
    ///
    /// The order is taken on trust; swapping the paths swaps the meaning of
    /// gained and lost.
    pub fn compare(&self, from: &Path, to: &Path) -> Option<ComparisonReport> {
        let from_snapshot = self.load_snapshot(from);
        let to_snapshot = self.load_snapshot(to);
        let (from_snapshot, to_snapshot) = (from_snapshot?, to_snapshot?);

        match compare_snapshots(&from_snapshot, &to_snapshot, &file_name(from), &file_name(to)) {
            Ok(report) => {
                info!(
                    account = %report.account,
                    followers_gained = report.stats.followers_gained,
                    followers_lost = report.stats.followers_lost,
                    "snapshots compared"
                );
                Some(report)
            }
            Err(e) => {
                error!(from = %from.display(), to = %to.display(), "{e}");
                None
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Compare two already-loaded snapshots.
///
/// `from_name` and `to_name` label the inputs in the report.
pub fn compare_snapshots(
    from: &Snapshot,
    to: &Snapshot,
    from_name: &str,
    to_name: &str,
) -> Result<ComparisonReport> {
    if from.account != to.account {
        return Err(Error::AccountMismatch {
            from: from.account.clone(),
            to: to.account.clone(),
        });
    }

    let followers_from = to_set(&from.followers);
    let following_from = to_set(&from.following);
    let followers_to = to_set(&to.followers);
    let following_to = to_set(&to.following);

    let changes = Changes {
        new_followers: sorted(followers_to.difference(&followers_from)),
        lost_followers: sorted(followers_from.difference(&followers_to)),
        new_following: sorted(following_to.difference(&following_from)),
        unfollowed: sorted(following_from.difference(&following_to)),
    };

    let current_relationships = CurrentRelationships {
        mutual_follows: sorted(followers_to.intersection(&following_to)),
        follows_but_not_followed: sorted(following_to.difference(&followers_to)),
        followed_but_not_following: sorted(followers_to.difference(&following_to)),
    };

    let stats = ComparisonStats {
        followers_gained: changes.new_followers.len(),
        followers_lost: changes.lost_followers.len(),
        net_followers_change: net(changes.new_followers.len(), changes.lost_followers.len()),
        new_following_count: changes.new_following.len(),
        unfollowed_count: changes.unfollowed.len(),
        net_following_change: net(changes.new_following.len(), changes.unfollowed.len()),
        mutual_follows_count: current_relationships.mutual_follows.len(),
        follows_but_not_followed_count: current_relationships.follows_but_not_followed.len(),
        followed_but_not_following_count: current_relationships.followed_but_not_following.len(),
    };

    Ok(ComparisonReport {
        account: to.account.clone(),
        comparison_info: ComparisonInfo {
            file1: FileSummary {
                filename: from_name.to_string(),
                extraction_date: from.extraction_date.clone(),
                followers_count: followers_from.len(),
                following_count: following_from.len(),
            },
            file2: FileSummary {
                filename: to_name.to_string(),
                extraction_date: to.extraction_date.clone(),
                followers_count: followers_to.len(),
                following_count: following_to.len(),
            },
        },
        changes,
        current_relationships,
        stats,
    })
}

fn to_set(names: &[String]) -> BTreeSet<&str> {
    names.iter().map(String::as_str).collect()
}

// BTreeSet iterators already yield in ascending order
fn sorted<'a, 'b: 'a>(names: impl Iterator<Item = &'a &'b str>) -> Vec<String> {
    names.map(|name| (*name).to_string()).collect()
}

fn net(gained: usize, lost: usize) -> i64 {
    let gained = i64::try_from(gained).unwrap_or(i64::MAX);
    let lost = i64::try_from(lost).unwrap_or(i64::MAX);
    gained.saturating_sub(lost)
}
