//! Atomic publication of a freshly built binary.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Move `staged` to `dest` with a single rename. Both must live on the same
/// filesystem; callers stage inside the cache directory for that reason.
pub fn publish(staged: &Path, dest: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(staged)
            .with_context(|| format!("stat {}", staged.display()))?
            .permissions();
        perms.set_mode(perms.mode() | 0o755);
        fs::set_permissions(staged, perms)
            .with_context(|| format!("chmod {}", staged.display()))?;
    }
    fs::rename(staged, dest)
        .with_context(|| format!("publish {} -> {}", staged.display(), dest.display()))?;
    tracing::debug!(dest = %dest.display(), "published custom binary");
    Ok(())
}
