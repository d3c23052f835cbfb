//! Remote directory listing
//!
//! `ls -lA` on Android is column based, but the set of owner/group columns
//! has drifted between toolbox, toybox and busybox builds, and file names may
//! contain spaces. Lines are split on whitespace runs into at most nine
//! columns, the last one keeping the remainder of the line verbatim.

use crate::device::ParseReport;
use crate::error::{KitError, Result};
use crate::exec::{CommandRunner, Tool};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use tracing::debug;

const MAX_COLUMNS: usize = 9;
const MIN_COLUMNS: usize = 8;
const SYMLINK_ARROW: &str = " -> ";

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Kind of a listed entry, taken from the first permission character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

impl FileType {
    pub fn from_permissions(permissions: &str) -> Self {
        match permissions.chars().next() {
            Some('d') => FileType::Directory,
            Some('l') => FileType::Symlink,
            _ => FileType::File,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileType::File => "File",
            FileType::Directory => "Directory",
            FileType::Symlink => "Symlink",
        };
        f.pad(label)
    }
}

/// One line of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Empty for directories and symlinks
    pub size: String,
    pub permissions: String,
    pub date: String,
    pub time: String,
}

/// Parse the full output of `ls -lA`, keeping line order
pub fn parse_listing(output: &str) -> ParseReport<FileEntry> {
    let mut report = ParseReport::default();

    for raw in output.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("total") {
            continue;
        }

        match parse_line(line) {
            Some(entry) => report.items.push(entry),
            None => report.skipped += 1,
        }
    }

    report
}

fn parse_line(line: &str) -> Option<FileEntry> {
    let parts: Vec<&str> = WHITESPACE_RE.splitn(line, MAX_COLUMNS).collect();
    if parts.len() < MIN_COLUMNS {
        return None;
    }

    let permissions = parts[0].to_string();
    let file_type = FileType::from_permissions(&permissions);
    let size = match file_type {
        FileType::File => parts.get(4).map(|s| s.to_string()).unwrap_or_default(),
        FileType::Directory | FileType::Symlink => String::new(),
    };

    let (mut name, date, time) = name_columns(&parts);
    if file_type == FileType::Symlink {
        if let Some((link, _target)) = name.split_once(SYMLINK_ARROW) {
            name = link.to_string();
        }
    }

    Some(FileEntry {
        name,
        file_type,
        size,
        permissions,
        date,
        time,
    })
}

/// Pick `(name, date, time)` out of the split columns.
///
/// Full rows carry date and time in columns 5 and 6 with the name after
/// them. Shorter rows get progressively less; as a last resort the final
/// column is the name and the two before it are time and date.
fn name_columns(parts: &[&str]) -> (String, String, String) {
    let (mut name, mut date, mut time) = match parts.len() {
        n if n >= 8 => (parts[7..].join(" "), parts[5].to_string(), parts[6].to_string()),
        7 => (parts[6].to_string(), parts[5].to_string(), String::new()),
        6 => (parts[5].to_string(), String::new(), String::new()),
        _ => (String::new(), String::new(), String::new()),
    };

    if name.trim().is_empty() {
        if let Some(last) = parts.last() {
            name = last.to_string();
            if parts.len() >= 3 {
                time = parts[parts.len() - 2].to_string();
                date = parts[parts.len() - 3].to_string();
            }
        }
    }

    (
        name.trim().to_string(),
        date.trim().to_string(),
        time.trim().to_string(),
    )
}

/// Single-quote a path for the remote `sh`
pub(crate) fn quote_remote(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}

/// List a remote directory.
///
/// Pass directories with a trailing `/`: `ls -l` on a symlink such as
/// `/sdcard` prints the link itself, while `/sdcard/` lists its target.
pub async fn list_files<R: CommandRunner>(runner: &R, path: &str) -> Result<Vec<FileEntry>> {
    if path.trim().is_empty() {
        return Err(KitError::InvalidArgument(
            "path cannot be empty".to_string(),
        ));
    }

    let quoted = quote_remote(path);
    let output = runner
        .run(Tool::Adb, &["shell", "ls", "-lA", &quoted])
        .await
        .map_err(KitError::during("failed to list files"))?;

    let report = parse_listing(&output);
    if report.skipped > 0 {
        debug!("Skipped {} short listing line(s) in {}", report.skipped, path);
    }
    Ok(report.into_items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;

    fn only(output: &str) -> FileEntry {
        let mut report = parse_listing(output);
        assert_eq!(report.items.len(), 1, "expected exactly one entry");
        report.items.remove(0)
    }

    #[test]
    fn test_regular_file_with_spaces_in_name() {
        let entry = only("-rw-r--r-- 1 root root 4096 2024-01-15 10:30 my file.txt");
        assert_eq!(entry.file_type, FileType::File);
        assert_eq!(entry.size, "4096");
        assert_eq!(entry.date, "2024-01-15");
        assert_eq!(entry.time, "10:30");
        assert_eq!(entry.name, "my file.txt");
        assert_eq!(entry.permissions, "-rw-r--r--");
    }

    #[test]
    fn test_symlink_drops_target_and_size() {
        let entry = only("lrwxrwxrwx 1 root root 10 2024-01-15 10:30 link.txt -> target.txt");
        assert_eq!(entry.file_type, FileType::Symlink);
        assert_eq!(entry.name, "link.txt");
        assert_eq!(entry.size, "");
    }

    #[test]
    fn test_directory_has_no_size() {
        let entry = only("drwxrwx--x 4 root sdcard_rw 3488 2024-03-02 08:15 Android");
        assert_eq!(entry.file_type, FileType::Directory);
        assert_eq!(entry.name, "Android");
        assert_eq!(entry.size, "");
        assert_eq!(entry.date, "2024-03-02");
    }

    #[test]
    fn test_total_and_blank_lines_are_not_entries() {
        let output = "total 24\n\
                      \n\
                      drwxrwx--x 2 u0_a1 u0_a1 3452 2023-12-01 09:00 Download\n\
                      -rw-rw---- 1 u0_a1 u0_a1  123 2023-12-01 09:01 notes.md\n";
        let report = parse_listing(output);
        assert_eq!(report.skipped, 0);
        let names: Vec<&str> = report.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Download", "notes.md"]);
    }

    #[test]
    fn test_short_lines_are_counted_as_skipped() {
        let output = "-rw-r--r-- 1 root root 12 a.txt\n\
                      ls: /data/secret: Permission denied\n\
                      -rw-r--r-- 1 root root 12 2024-01-01 00:00 b.txt";
        let report = parse_listing(output);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].name, "b.txt");
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_name_columns_short_rows() {
        let seven = ["-rw-r--r--", "1", "root", "root", "5", "2024-01-15", "x.bin"];
        let (name, date, time) = name_columns(&seven);
        assert_eq!(name, "x.bin");
        assert_eq!(date, "2024-01-15");
        assert_eq!(time, "");

        let six = ["-rw-r--r--", "1", "root", "5", "2024", "y.bin"];
        let (name, date, time) = name_columns(&six);
        assert_eq!(name, "y.bin");
        assert!(date.is_empty() && time.is_empty());
    }

    #[test]
    fn test_name_columns_last_resort_uses_tail() {
        let (name, _, _) = name_columns(&["-rw-r--r--", "2024-01-15", "10:30", "z.bin"]);
        assert_eq!(name, "z.bin");
    }

    #[test]
    fn test_quote_remote() {
        assert_eq!(quote_remote("/sdcard/My Music"), "'/sdcard/My Music'");
        assert_eq!(quote_remote("/sdcard/it's"), r"'/sdcard/it'\''s'");
    }

    #[tokio::test]
    async fn test_list_files_quotes_path() {
        let runner = ScriptedRunner::new().reply(
            "adb shell ls -lA '/sdcard/My Music'",
            "total 8\n-rw-rw---- 1 u0_a1 media_rw 5120 2024-02-10 21:04 song one.mp3",
        );

        let entries = list_files(&runner, "/sdcard/My Music").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "song one.mp3");
        assert_eq!(entries[0].size, "5120");
    }

    #[tokio::test]
    async fn test_list_files_follows_symlinked_directory() {
        let runner = ScriptedRunner::new()
            .reply(
                "adb shell ls -lA '/sdcard'",
                "lrw-r--r-- 1 root root 21 2024-01-15 10:30 /sdcard -> /storage/self/primary",
            )
            .reply(
                "adb shell ls -lA '/sdcard/'",
                "total 16\n\
                 drwxrws--- 2 u0_a1 media_rw 3452 2024-01-15 10:30 DCIM\n\
                 drwxrws--- 5 u0_a1 media_rw 3452 2024-01-15 10:31 Download",
            );

        let link = list_files(&runner, "/sdcard").await.unwrap();
        assert_eq!(link.len(), 1);
        assert_eq!(link[0].file_type, FileType::Symlink);

        let entries = list_files(&runner, "/sdcard/").await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["DCIM", "Download"]);
        assert!(entries.iter().all(|e| e.file_type == FileType::Directory));
    }

    #[tokio::test]
    async fn test_list_files_rejects_empty_path() {
        let runner = ScriptedRunner::new();
        let err = list_files(&runner, "  ").await.unwrap_err();
        assert!(matches!(err, KitError::InvalidArgument(_)));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_files_failure_is_labelled() {
        let runner = ScriptedRunner::new().fail(
            "adb shell ls -lA '/data'",
            "",
            "ls: /data: Permission denied",
        );
        let err = list_files(&runner, "/data").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("failed to list files"));
        assert!(msg.contains("Permission denied"));
    }

    #[test]
    fn test_file_entry_serializes_type_label() {
        let entry = only("lrwxrwxrwx 1 root root 21 2024-01-15 10:30 sdcard -> /storage/self/primary");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Symlink");
        assert_eq!(json["name"], "sdcard");
    }
}
