pub mod json;
pub mod table;

use crate::config::Config;
use crate::snapshot::Snapshot;
use crate::store::diff::ComparisonReport;
use crate::store::SnapshotDescriptor;

pub fn print_comparison(report: &ComparisonReport, config: &Config, lists: bool) -> serde_json::Result<()> {
    if config.json_output {
        println!("{}", json::render(report)?);
    } else {
        print!("{}", table::render_comparison(report));
        if lists {
            print!("{}", table::render_lists(report));
        }
    }
    Ok(())
}

pub fn print_snapshot(snapshot: &Snapshot, config: &Config) -> serde_json::Result<()> {
    if config.json_output {
        println!("{}", json::render(snapshot)?);
    } else {
        print!("{}", table::render_snapshot(snapshot));
    }
    Ok(())
}

pub fn print_catalog(account: &str, snapshots: &[SnapshotDescriptor], config: &Config) -> serde_json::Result<()> {
    if config.json_output {
        println!("{}", json::render(snapshots)?);
    } else {
        print!("{}", table::render_catalog(account, snapshots));
    }
    Ok(())
}
