//! Unified diff parser — state machine over {PRE_FILE, HEADERS, HUNK}
//! transitions triggered by line-anchored regexes; headers are
//! line-prefixed and anchored, so no backtracking is needed. Grounded on
//! `original_source/src/gitsafe/git/diff_parser.py`, ported into an
//! index-loop-over-`lazy_static`-regexes idiom.
//!
//! The parser never fails: malformed regions are silently skipped, and
//! `AddedLine.line_no` is always `>= 1`.

use lazy_static::lazy_static;
use regex::Regex;

use super::model::{DiffEvent, FileStatus, SkipReason};

lazy_static! {
    static ref DIFF_HEADER_RE: Regex = Regex::new(r"^diff --git a/(.*) b/(.*)$").unwrap();
    static ref HUNK_HEADER_RE: Regex =
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap();
    static ref BINARY_RE: Regex = Regex::new(r"^Binary files .* and .* differ$").unwrap();
    static ref RENAME_FROM_RE: Regex = Regex::new(r"^rename from (.+)$").unwrap();
    static ref RENAME_TO_RE: Regex = Regex::new(r"^rename to (.+)$").unwrap();
    static ref SUBPROJECT_RE: Regex =
        Regex::new(r"^[+-]?Subproject commit [0-9a-f]+$").unwrap();
    static ref NO_NEWLINE_RE: Regex = Regex::new(r"^\\ No newline at end of file$").unwrap();
    static ref FILE_HEADER_OLD_RE: Regex = Regex::new(r"^--- (?:a/|/dev/null)").unwrap();
    static ref FILE_HEADER_NEW_RE: Regex = Regex::new(r"^\+\+\+ (?:b/|/dev/null)").unwrap();
    static ref SIMILARITY_RE: Regex = Regex::new(r"^similarity index \d+%$").unwrap();
    static ref OLD_MODE_RE: Regex = Regex::new(r"^old mode \d+$").unwrap();
    static ref NEW_MODE_RE: Regex = Regex::new(r"^new mode \d+$").unwrap();
    static ref DELETED_FILE_RE: Regex = Regex::new(r"^deleted file mode \d+$").unwrap();
    static ref NEW_FILE_RE: Regex = Regex::new(r"^new file mode \d+$").unwrap();
    static ref INDEX_RE: Regex = Regex::new(r"^index [0-9a-f]+\.\.[0-9a-f]+").unwrap();
}

/// Parse `diff_text` (produced with context width 0, no colour) into an
/// ordered `DiffEvent` stream.
///
/// Splits on `\n` only (not [`str::lines`]) so a trailing `\r` on a CRLF
/// source line survives byte-for-byte into `AddedLine.content`.
pub fn parse(diff_text: &str) -> Vec<DiffEvent> {
    let lines: Vec<&str> = diff_text.split('\n').collect();
    let total = lines.len();
    let mut events = Vec::new();
    let mut idx = 0usize;

    // Current file context.
    let mut current_file: Option<String> = None;
    let mut line_no: usize = 0;

    while idx < total {
        let raw = lines[idx];

        if let Some(caps) = DIFF_HEADER_RE.captures(raw) {
            let mut old_file = caps[1].to_string();
            let mut new_file = caps[2].to_string();
            idx += 1;

            let mut is_rename = false;
            let mut is_mode_only = false;
            let mut is_deleted = false;
            let mut is_new = false;
            let mut is_binary = false;

            loop {
                if idx >= total {
                    break;
                }
                let sub = lines[idx];
                if INDEX_RE.is_match(sub) {
                    idx += 1;
                    continue;
                }
                if SIMILARITY_RE.is_match(sub) {
                    idx += 1;
                    continue;
                }
                if OLD_MODE_RE.is_match(sub) {
                    is_mode_only = true;
                    idx += 1;
                    continue;
                }
                if NEW_MODE_RE.is_match(sub) {
                    idx += 1;
                    continue;
                }
                if DELETED_FILE_RE.is_match(sub) {
                    is_deleted = true;
                    idx += 1;
                    continue;
                }
                if NEW_FILE_RE.is_match(sub) {
                    is_new = true;
                    idx += 1;
                    continue;
                }
                if let Some(c) = RENAME_FROM_RE.captures(sub) {
                    old_file = c[1].to_string();
                    is_rename = true;
                    idx += 1;
                    continue;
                }
                if let Some(c) = RENAME_TO_RE.captures(sub) {
                    new_file = c[1].to_string();
                    idx += 1;
                    continue;
                }
                if BINARY_RE.is_match(sub) {
                    is_binary = true;
                    idx += 1;
                    continue;
                }
                break;
            }

            if is_binary {
                events.push(DiffEvent::FileSkipped {
                    path: new_file,
                    reason: SkipReason::Binary,
                });
                current_file = None;
                continue;
            }

            if is_mode_only && !has_hunk_ahead(&lines, idx, total) {
                events.push(DiffEvent::FileSkipped {
                    path: new_file,
                    reason: SkipReason::ModeOnly,
                });
                current_file = None;
                continue;
            }

            let status = if is_deleted {
                FileStatus::Deleted
            } else if is_rename {
                FileStatus::Renamed
            } else if is_new {
                FileStatus::Added
            } else {
                FileStatus::Modified
            };

            current_file = Some(new_file.clone());
            events.push(DiffEvent::FileEnter {
                path: new_file,
                old_path: if is_rename { Some(old_file) } else { None },
                status,
            });
            continue;
        }

        if FILE_HEADER_OLD_RE.is_match(raw) || FILE_HEADER_NEW_RE.is_match(raw) {
            idx += 1;
            continue;
        }

        if let Some(caps) = HUNK_HEADER_RE.captures(raw) {
            let new_start: usize = caps[3].parse().unwrap_or(1);
            line_no = new_start;
            idx += 1;
            continue;
        }

        if SUBPROJECT_RE.is_match(raw) {
            idx += 1;
            continue;
        }

        if NO_NEWLINE_RE.is_match(raw) {
            idx += 1;
            continue;
        }

        if let Some(path) = &current_file {
            if let Some(content) = raw.strip_prefix('+') {
                let content = strip_leading_bom(content);
                events.push(DiffEvent::AddedLine {
                    path: path.clone(),
                    line_no,
                    content,
                });
                line_no += 1;
            } else if raw.starts_with('-') {
                // removed line — not scanned.
            } else if raw.starts_with(' ') {
                line_no += 1;
            }
            // Anything else (e.g. a stray '\' marker not matching NO_NEWLINE_RE,
            // or blank separator lines) is silently skipped, per §7: the
            // parser never fails on malformed input.
        }

        idx += 1;
    }

    events
}

/// Lookahead used to disambiguate a pure mode-change block (no hunk follows)
/// from a mode change that precedes real content changes.
fn has_hunk_ahead(lines: &[&str], mut idx: usize, total: usize) -> bool {
    while idx < total {
        let line = lines[idx];
        if DIFF_HEADER_RE.is_match(line) {
            return false;
        }
        if HUNK_HEADER_RE.is_match(line) {
            return true;
        }
        idx += 1;
    }
    false
}

fn strip_leading_bom(s: &str) -> String {
    s.strip_prefix('\u{feff}').unwrap_or(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn added_lines(events: &[DiffEvent]) -> Vec<(&str, usize, &str)> {
        events
            .iter()
            .filter_map(|e| match e {
                DiffEvent::AddedLine {
                    path,
                    line_no,
                    content,
                } => Some((path.as_str(), *line_no, content.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn single_count_hunk_header() {
        let diff = "diff --git a/f.txt b/f.txt\n\
index abc..def 100644\n\
--- a/f.txt\n\
+++ b/f.txt\n\
@@ -1 +1 @@\n\
+replaced line\n";
        let events = parse(diff);
        let lines = added_lines(&events);
        assert_eq!(lines, vec![("f.txt", 1, "replaced line")]);
    }

    #[test]
    fn consecutive_hunks_reset_counter() {
        let diff = "diff --git a/f.py b/f.py\n\
index abc..def 100644\n\
--- a/f.py\n\
+++ b/f.py\n\
@@ -5,0 +5,1 @@\n\
+line at 5\n\
@@ -20,0 +21,1 @@\n\
+line at 21\n";
        let events = parse(diff);
        let lines = added_lines(&events);
        assert_eq!(
            lines,
            vec![("f.py", 5, "line at 5"), ("f.py", 21, "line at 21")]
        );
    }

    #[rstest]
    #[case("@@ -1 +1 @@", 1)]
    #[case("@@ -1,3 +1,3 @@", 1)]
    #[case("@@ -0,0 +1,1 @@", 1)]
    #[case("@@ -5,0 +5,1 @@", 5)]
    #[case("@@ -20,0 +21,1 @@", 21)]
    #[case("@@ -100,2 +142,2 @@", 142)]
    #[case("@@ -1,3 +1,3 @@ fn some_context()", 1)]
    fn hunk_header_sets_line_no_from_new_start(#[case] header: &str, #[case] expected_line_no: usize) {
        let diff = format!(
            "diff --git a/f.txt b/f.txt\n\
index abc..def 100644\n\
--- a/f.txt\n\
+++ b/f.txt\n\
{header}\n\
+added line\n"
        );
        let events = parse(&diff);
        let lines = added_lines(&events);
        assert_eq!(lines, vec![("f.txt", expected_line_no, "added line")]);
    }

    #[test]
    fn deleted_file_yields_no_added_lines() {
        let diff = "diff --git a/old.py b/old.py\n\
deleted file mode 100644\n\
index abc..000 100644\n\
--- a/old.py\n\
+++ /dev/null\n\
@@ -1,3 +0,0 @@\n\
-line one\n\
-line two\n\
-line three\n";
        let events = parse(diff);
        assert!(added_lines(&events).is_empty());
        assert!(matches!(
            events[0],
            DiffEvent::FileEnter {
                status: FileStatus::Deleted,
                ..
            }
        ));
    }

    #[test]
    fn bom_stripped_once() {
        let diff = "diff --git a/bom.txt b/bom.txt\n\
new file mode 100644\n\
index 0000000..abc1234\n\
--- /dev/null\n\
+++ b/bom.txt\n\
@@ -0,0 +1,1 @@\n\
+\u{feff}hello world\n";
        let events = parse(diff);
        let lines = added_lines(&events);
        assert_eq!(lines, vec![("bom.txt", 1, "hello world")]);
    }

    #[test]
    fn file_headers_are_not_content() {
        let diff = "diff --git a/config.py b/config.py\n\
index abc..def 100644\n\
--- a/config.py\n\
+++ b/config.py\n\
@@ -1,0 +2,1 @@\n\
+new line\n";
        let events = parse(diff);
        let lines = added_lines(&events);
        assert_eq!(lines, vec![("config.py", 2, "new line")]);
    }

    #[test]
    fn binary_file_skipped() {
        let diff = "diff --git a/image.png b/image.png\n\
index 111..222 100644\n\
Binary files a/image.png and b/image.png differ\n";
        let events = parse(diff);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            DiffEvent::FileSkipped { path, reason: SkipReason::Binary } if path == "image.png"
        ));
    }

    #[test]
    fn rename_tracked() {
        let diff = "diff --git a/old_name.py b/new_name.py\n\
similarity index 100%\n\
rename from old_name.py\n\
rename to new_name.py\n";
        let events = parse(diff);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            DiffEvent::FileEnter { path, old_path: Some(old), status: FileStatus::Renamed }
                if path == "new_name.py" && old == "old_name.py"
        ));
    }

    #[test]
    fn mode_only_skipped() {
        let diff = "diff --git a/script.sh b/script.sh\n\
old mode 100644\n\
new mode 100755\n";
        let events = parse(diff);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            DiffEvent::FileSkipped { reason: SkipReason::ModeOnly, .. }
        ));
    }

    #[test]
    fn mode_change_with_content_is_not_skipped() {
        let diff = "diff --git a/script.sh b/script.sh\n\
old mode 100644\n\
new mode 100755\n\
index abc..def 100644\n\
--- a/script.sh\n\
+++ b/script.sh\n\
@@ -1,0 +2,1 @@\n\
+echo hi\n";
        let events = parse(diff);
        assert!(matches!(&events[0], DiffEvent::FileEnter { .. }));
        assert_eq!(added_lines(&events), vec![("script.sh", 2, "echo hi")]);
    }

    #[test]
    fn submodule_commit_lines_ignored() {
        let diff = "diff --git a/vendor/lib b/vendor/lib\n\
index abc..def 160000\n\
--- a/vendor/lib\n\
+++ b/vendor/lib\n\
@@ -1 +1 @@\n\
-Subproject commit aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\n\
+Subproject commit bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\n";
        let events = parse(diff);
        assert!(added_lines(&events).is_empty());
    }

    #[test]
    fn no_newline_marker_ignored() {
        let diff = "diff --git a/f.txt b/f.txt\n\
index abc..def 100644\n\
--- a/f.txt\n\
+++ b/f.txt\n\
@@ -1,0 +2,1 @@\n\
+final line without newline\n\
\\ No newline at end of file\n";
        let events = parse(diff);
        assert_eq!(
            added_lines(&events),
            vec![("f.txt", 2, "final line without newline")]
        );
    }

    #[test]
    fn crlf_preserved_byte_for_byte() {
        let diff = "diff --git a/f.txt b/f.txt\n\
index abc..def 100644\n\
--- a/f.txt\n\
+++ b/f.txt\n\
@@ -1,0 +2,1 @@\n\
+windows line\r\n";
        let events = parse(diff);
        let lines = added_lines(&events);
        assert_eq!(lines, vec![("f.txt", 2, "windows line\r")]);
    }
}
