//! Configuration file location
// (c) 2024 Ross Younger

use anyhow::Result;
use std::path::{MAIN_SEPARATOR, PathBuf};
use std::sync::LazyLock;

static HOME_PREFIX: LazyLock<String> = LazyLock::new(|| format!("~{MAIN_SEPARATOR}"));

fn my_home() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("could not determine home directory"))
}

/// Expands a leading `~` in a path.
///
/// * `~` and `~/...` refer to the current user's home directory
/// * `~someuser/...` refers to that user's home directory
/// * Anything else is returned unchanged
pub fn expand_home_directory(path: &str) -> Result<PathBuf> {
    Ok(match path {
        // bare "~"
        "~" => my_home()?,
        s if s.starts_with(&*HOME_PREFIX) => {
            // "~/..."
            my_home()?.join(&s[2..])
        }
        s if s.starts_with('~') => {
            // "~someuser/..."
            let mut parts = s[1..].splitn(2, MAIN_SEPARATOR);
            let Some(username) = parts.next() else {
                anyhow::bail!("could not extract username from path")
            };
            let pb = homedir::home(username)?
                .ok_or_else(|| anyhow::anyhow!("could not determine home directory for {username}"))?;
            if let Some(path) = parts.next() {
                pb.join(path)
            } else {
                pb
            }
        }
        // default: no modification
        s => PathBuf::from(s),
    })
}
