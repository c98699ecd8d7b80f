//! Snapshot file format.
//!
//! One snapshot is one capture of an account's follower and following lists,
//! stored as `{account}_data_{YYYYMMDDHHMM}.json`. Files are written once and
//! never modified afterwards.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Keys every snapshot file must carry at the top level.
pub const REQUIRED_KEYS: [&str; 4] = ["account", "followers", "following", "extraction_date"];

/// Format of the human-readable `extraction_date` field.
pub const EXTRACTION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the timestamp embedded in snapshot filenames.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub account: String,
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub extraction_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_info: Option<AccountInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CaptureStats>,
}

/// Profile details reported by the platform at capture time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    pub is_private: bool,
    pub follower_count: u64,
    pub following_count: u64,
    pub full_name: String,
}

/// Counts recorded alongside the lists: what was fetched vs what the
/// profile claimed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureStats {
    pub total_followers: u64,
    pub total_following: u64,
    pub expected_followers: u64,
    pub expected_following: u64,
}

impl Snapshot {
    pub fn new(
        account: impl Into<String>,
        followers: Vec<String>,
        following: Vec<String>,
        account_info: Option<AccountInfo>,
        captured_at: NaiveDateTime,
    ) -> Self {
        let stats = CaptureStats {
            total_followers: followers.len() as u64,
            total_following: following.len() as u64,
            expected_followers: account_info.as_ref().map_or(0, |i| i.follower_count),
            expected_following: account_info.as_ref().map_or(0, |i| i.following_count),
        };

        Snapshot {
            account: account.into(),
            followers,
            following,
            extraction_date: captured_at.format(EXTRACTION_DATE_FORMAT).to_string(),
            account_info,
            stats: Some(stats),
        }
    }
}

/// Filename a snapshot of `account` captured at `captured_at` is stored under.
pub fn file_name(account: &str, captured_at: NaiveDateTime) -> String {
    format!(
        "{account}_data_{}.json",
        captured_at.format(FILE_TIMESTAMP_FORMAT)
    )
}

/// Load a snapshot file and check it has the snapshot shape.
///
/// Unreadable files yield [`Error::Io`], non-JSON content yields
/// [`Error::NotJson`], and JSON lacking one of [`REQUIRED_KEYS`] yields
/// [`Error::MissingKey`] naming the first absent key.
pub fn load(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&raw, path)
}

fn parse(raw: &str, path: &Path) -> Result<Snapshot> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|source| Error::NotJson {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(key) = REQUIRED_KEYS.into_iter().find(|key| value.get(key).is_none()) {
        return Err(Error::MissingKey {
            path: path.to_path_buf(),
            key,
        });
    }

    serde_json::from_value(value).map_err(|source| Error::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `snapshot` into `dir` under its conventional filename.
pub fn write(dir: &Path, snapshot: &Snapshot, captured_at: NaiveDateTime) -> Result<PathBuf> {
    let path = dir.join(file_name(&snapshot.account, captured_at));

    if path.exists() {
        warn!(path = %path.display(), "snapshot file already exists, overwriting");
    }

    let write_err = |source: std::io::Error| Error::Write {
        path: path.clone(),
        source,
    };

    let file = fs::File::create(&path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot).map_err(|e| write_err(e.into()))?;
    writer.write_all(b"\n").map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    info!(
        path = %path.display(),
        bytes = size,
        followers = snapshot.followers.len(),
        following = snapshot.following.len(),
        "snapshot written"
    );

    Ok(path)
}

/// Read a newline-delimited list of usernames.
///
/// Blank lines and `#` comments are skipped; surrounding whitespace and a
/// leading `@` are stripped. Order and duplicates are kept as found.
pub fn read_user_list(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_start_matches('@').to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn captured_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(12, 30, 5))
            .unwrap()
    }

    #[test]
    fn file_name_uses_minute_precision_timestamp() {
        assert_eq!(file_name("demo", captured_at()), "demo_data_202401151230.json");
    }

    #[test]
    fn new_fills_extraction_date_and_stats() {
        let info = AccountInfo {
            is_private: true,
            follower_count: 10,
            following_count: 4,
            full_name: "Demo".to_string(),
        };
        let snap = Snapshot::new(
            "demo",
            vec!["a".into(), "b".into()],
            vec!["c".into()],
            Some(info),
            captured_at(),
        );

        assert_eq!(snap.extraction_date, "2024-01-15 12:30:05");
        let stats = snap.stats.unwrap();
        assert_eq!(stats.total_followers, 2);
        assert_eq!(stats.total_following, 1);
        assert_eq!(stats.expected_followers, 10);
        assert_eq!(stats.expected_following, 4);
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = parse("{not json", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, Error::NotJson { .. }));
        assert!(!err.is_validation());
    }

    #[test]
    fn parse_reports_first_missing_key() {
        let raw = r#"{"account": "demo", "followers": [], "extraction_date": "2024-01-15 12:30:00"}"#;
        let err = parse(raw, Path::new("x.json")).unwrap_err();
        match err {
            Error::MissingKey { key, .. } => assert_eq!(key, "following"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_rejects_wrong_value_types() {
        let raw = r#"{"account": "demo", "followers": "alice", "following": [], "extraction_date": ""}"#;
        let err = parse(raw, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn parse_accepts_minimal_snapshot_and_ignores_unknown_info_keys() {
        let raw = r#"{
            "account": "demo",
            "followers": ["alice", "bob"],
            "following": ["carol"],
            "extraction_date": "2024-01-15 12:30:00",
            "account_info": {"is_private": false, "can_access": true, "full_name": "Demo"}
        }"#;
        let snap = parse(raw, Path::new("x.json")).unwrap();
        assert_eq!(snap.followers, vec!["alice", "bob"]);
        assert!(snap.stats.is_none());

        let info = snap.account_info.unwrap();
        assert_eq!(info.full_name, "Demo");
        assert_eq!(info.follower_count, 0);
    }

    #[test]
    fn write_then_load_preserves_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snap = Snapshot::new(
            "demo",
            vec!["zoë".into(), "alice".into()],
            vec!["bob".into()],
            None,
            captured_at(),
        );

        let path = write(dir.path(), &snap, captured_at()).unwrap();
        assert_eq!(path.file_name().unwrap(), "demo_data_202401151230.json");

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("zoë"), "non-ascii names are written verbatim");

        assert_eq!(load(&path).unwrap(), snap);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn read_user_list_strips_sigils_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("followers.txt");
        fs::write(&path, "# exported list\n@alice\n  bob  \n\n@\ncarol\nalice\n").unwrap();

        let users = read_user_list(&path).unwrap();
        assert_eq!(users, vec!["alice", "bob", "carol", "alice"]);
    }
}
