//! Fixed texts used around deletions.

use std::path::Path;

/// Text sent to the generator for a deleted file.
pub fn deletion_prompt(path: &Path) -> String {
    format!("File deleted: {}", path.display())
}

/// Message used when the generator cannot describe a deletion.
pub fn deletion_fallback(path: &Path) -> String {
    format!("Delete file: {}", path.display())
}
