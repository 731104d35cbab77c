//! PATH ordering check.

use std::ffi::OsStr;
use std::path::Path;

/// Whether `first` appears in PATH no later than `second`.
///
/// Both must be present as whole entries. Entries compare with any
/// trailing `/` ignored, so `/usr/local/bin/` matches `/usr/local/bin`.
pub fn path_order_ok(path_value: &OsStr, first: &str, second: &str) -> bool {
    let entries: Vec<_> = std::env::split_paths(path_value).collect();
    let position = |dir: &str| {
        let wanted = normalize(Path::new(dir));
        entries.iter().position(|entry| normalize(entry) == wanted)
    };

    match (position(first), position(second)) {
        (Some(a), Some(b)) => a <= b,
        _ => false,
    }
}

fn normalize(path: &Path) -> String {
    let text = path.to_string_lossy();
    let trimmed = text.trim_end_matches('/');
    if trimmed.is_empty() && !text.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
