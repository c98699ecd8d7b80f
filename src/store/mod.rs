//! File-based snapshot storage.
//!
//! Snapshots live as JSON files in one flat data directory shared by every
//! tracked account:
//! - catalog: finds an account's snapshots and orders them by capture time
//! - diff: loads two snapshots and computes the relationship changes
//!
//! Nothing in this module writes to the data directory.

pub mod catalog;
pub mod diff;

pub use catalog::{find_snapshots, SnapshotDescriptor, SnapshotStore};
pub use diff::{compare_snapshots, Comparator, ComparisonReport};
