//! Plain-text rendering for terminal output.
//!
//! Every function returns the full text instead of printing, so the output
//! can be checked in tests and reused by other front ends.

use crate::snapshot::Snapshot;
use crate::store::diff::ComparisonReport;
use crate::store::SnapshotDescriptor;

const RULE_WIDTH: usize = 40;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn row(output: &mut String, label: &str, value: impl std::fmt::Display) {
    output.push_str(&format!("  {label:30} {value:>8}\n"));
}

pub fn render_comparison(report: &ComparisonReport) -> String {
    let info = &report.comparison_info;
    let stats = &report.stats;
    let mut output = String::new();

    output.push_str(&format!("\nComparing snapshots of @{}\n", report.account));
    output.push_str(&rule());
    output.push('\n');
    for (label, file) in [("from", &info.file1), ("to", &info.file2)] {
        output.push_str(&format!(
            "  {label:<5} {} ({})\n        {} followers, {} following\n",
            file.filename, file.extraction_date, file.followers_count, file.following_count
        ));
    }

    output.push_str(&format!("\nFollowers\n{}\n", rule()));
    row(&mut output, "gained", stats.followers_gained);
    row(&mut output, "lost", stats.followers_lost);
    row(&mut output, "net change", format!("{:+}", stats.net_followers_change));

    output.push_str(&format!("\nFollowing\n{}\n", rule()));
    row(&mut output, "started following", stats.new_following_count);
    row(&mut output, "unfollowed", stats.unfollowed_count);
    row(&mut output, "net change", format!("{:+}", stats.net_following_change));

    output.push_str(&format!("\nCurrent relationships\n{}\n", rule()));
    row(&mut output, "mutual", stats.mutual_follows_count);
    row(&mut output, "not following back", stats.follows_but_not_followed_count);
    row(&mut output, "not followed back", stats.followed_but_not_following_count);

    output
}

/// Username lists for every category, with a note for empty ones.
pub fn render_lists(report: &ComparisonReport) -> String {
    let changes = &report.changes;
    let rel = &report.current_relationships;

    let sections: [(&str, &[String], &str); 7] = [
        ("New followers", changes.new_followers.as_slice(), "No new followers"),
        ("Lost followers", changes.lost_followers.as_slice(), "No followers lost"),
        ("Started following", changes.new_following.as_slice(), "No new accounts followed"),
        ("Unfollowed", changes.unfollowed.as_slice(), "Nobody was unfollowed"),
        ("Mutual follows", rel.mutual_follows.as_slice(), "No mutual follows"),
        (
            "Not following back",
            rel.follows_but_not_followed.as_slice(),
            "Everyone followed follows back",
        ),
        (
            "Not followed back",
            rel.followed_but_not_following.as_slice(),
            "Every follower is followed back",
        ),
    ];

    let mut output = String::new();
    for (title, names, empty) in sections {
        output.push_str(&format!("\n{title} ({})\n{}\n", names.len(), rule()));
        if names.is_empty() {
            output.push_str(&format!("  {empty}\n"));
        }
        for name in names {
            output.push_str(&format!("  - @{name}\n"));
        }
    }

    output
}

pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let info = snapshot.account_info.clone().unwrap_or_default();
    let stats = snapshot.stats.clone().unwrap_or_default();
    let full_name = if info.full_name.is_empty() { "n/a" } else { info.full_name.as_str() };

    let mut output = String::new();
    output.push_str(&format!("\n@{}\n{}\n", snapshot.account, rule()));
    output.push_str(&format!("  name:      {full_name}\n"));
    output.push_str(&format!("  private:   {}\n", if info.is_private { "yes" } else { "no" }));
    output.push_str(&format!("  captured:  {}\n", snapshot.extraction_date));

    output.push_str(&format!("\nCapture stats\n{}\n", rule()));
    output.push_str(&format!(
        "  followers  {} / {} expected\n",
        stats.total_followers, stats.expected_followers
    ));
    output.push_str(&format!(
        "  following  {} / {} expected\n",
        stats.total_following, stats.expected_following
    ));

    output.push_str(&format!("\nLists\n{}\n", rule()));
    row(&mut output, "followers", snapshot.followers.len());
    row(&mut output, "following", snapshot.following.len());

    output
}

pub fn render_catalog(account: &str, snapshots: &[SnapshotDescriptor]) -> String {
    if snapshots.is_empty() {
        return format!("No snapshots found for '{account}'.\n");
    }

    let mut output = format!("{} snapshot(s) for @{account}:\n", snapshots.len());
    for (i, snapshot) in snapshots.iter().enumerate() {
        output.push_str(&format!("  {:>3}. {}\n", i + 1, snapshot.display_name));
    }
    output
}
