use std::path::{Path, PathBuf};

/// Check if a target must never be emptied.
///
/// The filesystem root is always protected; the home directory is
/// protected unless `protect_home` is off. Paths are canonicalized when
/// possible so `./..` style spellings cannot slip through.
pub fn is_protected(path: &Path, protect_home: bool) -> bool {
    let resolved = resolve(path);

    if resolved.parent().is_none() {
        return true;
    }

    if protect_home {
        if let Some(home) = dirs::home_dir() {
            if resolved == resolve(&home) {
                return true;
            }
        }
    }

    false
}

fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
