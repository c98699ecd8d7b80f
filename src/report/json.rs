//! JSON output for reports and snapshots.
//!
//! Field order follows the struct definitions, so identical inputs always
//! render to identical bytes.

use serde::Serialize;

pub fn render<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;
    use crate::store::diff::compare_snapshots;

    fn snap(followers: &[&str]) -> Snapshot {
        Snapshot {
            account: "demo".to_string(),
            followers: followers.iter().map(|s| s.to_string()).collect(),
            following: vec!["carol".to_string()],
            extraction_date: "2024-01-15 12:30:00".to_string(),
            account_info: None,
            stats: None,
        }
    }

    #[test]
    fn report_keys_follow_report_layout() {
        let report = compare_snapshots(&snap(&["alice"]), &snap(&["bob"]), "a.json", "b.json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&render(&report).unwrap()).unwrap();

        assert_eq!(value["account"], "demo");
        assert_eq!(value["comparison_info"]["file1"]["filename"], "a.json");
        assert_eq!(value["comparison_info"]["file2"]["extraction_date"], "2024-01-15 12:30:00");
        assert_eq!(value["changes"]["new_followers"][0], "bob");
        assert_eq!(value["changes"]["lost_followers"][0], "alice");
        assert_eq!(value["current_relationships"]["follows_but_not_followed"][0], "carol");
        assert_eq!(value["stats"]["net_followers_change"], 0);
    }

    #[test]
    fn snapshot_without_optional_sections_omits_them() {
        let text = render(&snap(&["alice"])).unwrap();
        assert!(!text.contains("account_info"));
        assert!(!text.contains("\"stats\""));
    }
}
