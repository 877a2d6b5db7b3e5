//! Path utilities: expand `~` in configured database paths.

use std::env;
use std::io;
use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Expand `~` and anchor a relative path at the current working directory.
pub fn absolutize(path: &str) -> io::Result<PathBuf> {
    let p = expand_tilde(path);
    if p.is_absolute() {
        Ok(p)
    } else {
        Ok(env::current_dir()?.join(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(expand_tilde("/var/lib/focus.sqlite"), PathBuf::from("/var/lib/focus.sqlite"));
        assert_eq!(expand_tilde("focus.sqlite"), PathBuf::from("focus.sqlite"));
    }

    #[test]
    fn expands_home_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/focus.sqlite"), home.join("focus.sqlite"));
        }
    }

    #[test]
    fn relative_paths_anchor_at_cwd() {
        let cwd = env::current_dir().unwrap();
        assert_eq!(absolutize("focus.sqlite").unwrap(), cwd.join("focus.sqlite"));
        assert_eq!(
            absolutize("/var/lib/focus.sqlite").unwrap(),
            PathBuf::from("/var/lib/focus.sqlite")
        );
    }
}
