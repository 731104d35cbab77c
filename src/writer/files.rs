//! Writing rendered configuration files.
//!
//! Writes overwrite unconditionally: last write wins, no merge, no backup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Write `content` to `path`, creating parent directories.
///
/// Executable files get mode 0755 on unix.
pub fn write_file(path: &Path, content: &str, executable: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if executable {
            fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
        }
    }
    #[cfg(not(unix))]
    let _ = executable;

    tracing::debug!(path = %path.display(), bytes = content.len(), executable, "Wrote file");
    Ok(())
}
