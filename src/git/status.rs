//! Parsing of `git diff --name-only` and `git status --porcelain` output.

use std::path::{MAIN_SEPARATOR_STR, PathBuf};

/// One line of `git status --porcelain` (v1) output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Two-character status code, e.g. `" M"`, `"D "`, `"??"`.
    pub code: String,
    pub path: PathBuf,
}

impl StatusEntry {
    /// Status letter for the index (staged) column.
    pub fn index(&self) -> char {
        self.code.chars().next().unwrap_or(' ')
    }

    /// Status letter for the worktree (unstaged) column.
    pub fn worktree(&self) -> char {
        self.code.chars().nth(1).unwrap_or(' ')
    }

    pub fn has_marker(&self, marker: char) -> bool {
        self.index() == marker || self.worktree() == marker
    }

    /// Conflict left by a merge, rebase or cherry-pick.
    ///
    /// Git reports these as `DD`, `AA`, or any code with `U` in either column.
    /// The working tree copy may hold edits that are not committed anywhere,
    /// so these paths must never be staged, removed or committed on their own.
    pub fn is_unmerged(&self) -> bool {
        self.has_marker('U') || self.code == "DD" || self.code == "AA"
    }

    /// Added to the index and then removed from the working tree (`AD`).
    ///
    /// The path is absent from the last commit, so there is no deletion to
    /// record.
    pub fn is_added_then_removed(&self) -> bool {
        self.index() == 'A' && self.worktree() == 'D'
    }
}

/// Split `git diff --name-only` output into paths, keeping git's order.
///
/// Only line terminators are stripped; git does not quote names that merely
/// begin or end with a space.
pub fn parse_name_only(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| normalize_path(&unquote_path(line)))
        .collect()
}

/// Parse porcelain v1 lines of the form `XY <path>` or `XY <old> -> <new>`.
///
/// Lines too short to carry a path are ignored.
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    output
        .lines()
        .filter_map(|line| {
            let code = line.get(..2)?;
            let rest = line.get(3..)?;
            if rest.is_empty() {
                return None;
            }
            let raw = match split_rename(rest) {
                Some((_, new)) => new,
                None => rest,
            };
            Some(StatusEntry {
                code: code.to_string(),
                path: normalize_path(&unquote_path(raw)),
            })
        })
        .collect()
}

/// Split a rename target `old -> new`, ignoring arrows inside quoted names.
fn split_rename(rest: &str) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    let mut escape_next = false;

    for (idx, ch) in rest.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escape_next = true,
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes && rest[idx..].starts_with(" -> ") => {
                return Some((&rest[..idx], &rest[idx + 4..]));
            }
            _ => {}
        }
    }

    None
}

/// Undo git's C-style quoting of unusual path names.
///
/// Unquoted input is returned unchanged. Octal escapes are decoded as raw
/// bytes so multi-byte UTF-8 names round-trip.
pub fn unquote_path(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
    else {
        return raw.to_string();
    };

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let next = bytes[i + 1];
        match next {
            b'0'..=b'7' => {
                let end = (i + 4).min(bytes.len());
                if let Some(byte) = decode_octal(&bytes[i + 1..end]) {
                    out.push(byte);
                    i = end;
                    continue;
                }
                out.push(next);
            }
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'v' => out.push(0x0b),
            other => out.push(other),
        }
        i += 2;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn decode_octal(digits: &[u8]) -> Option<u8> {
    if digits.len() != 3 || !digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u16, |acc, b| acc * 8 + u16::from(b - b'0'));
    u8::try_from(value).ok()
}

/// Convert git's `/`-separated path into a platform path.
pub fn normalize_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.replace('/', MAIN_SEPARATOR_STR))
}
