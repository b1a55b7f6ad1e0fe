//! Locating stored profiles by name.
//!
//! Search order, first match wins:
//!   1. `name` itself, if it is an existing file
//!   2. the current directory
//!   3. `~/.rival`
//!
//! Inside a directory a file matches when its stem equals `name`
//! (case-insensitive) and its extension is `.yml`, `.yaml`, or absent.

use crate::device::DeviceKind;
use crate::error::{Error, Result};
use crate::profile::{self, Profile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Name of the per-user profile directory under `$HOME`.
pub const USER_PROFILE_DIR: &str = ".rival";

const PROFILE_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Per-user profile directory, if a home directory is known.
pub fn user_profile_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_PROFILE_DIR))
}

/// Directories searched after the literal path, in order.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut search = vec![PathBuf::from(".")];
    search.extend(user_profile_dir());
    search
}

/// Find the file for a named profile using the default search dirs.
pub fn resolve_profile(name: &str) -> Result<PathBuf> {
    resolve_profile_in(name, &default_search_dirs())
}

/// Find the file for a named profile, searching `search_dirs` in order.
pub fn resolve_profile_in(name: &str, search_dirs: &[PathBuf]) -> Result<PathBuf> {
    let literal = Path::new(name);
    if literal.is_file() {
        debug!(path = %literal.display(), "Profile resolved as literal path");
        return Ok(literal.to_path_buf());
    }

    for dir in search_dirs {
        if let Some(path) = find_in_dir(dir, name) {
            debug!(path = %path.display(), "Profile resolved");
            return Ok(path);
        }
    }

    Err(Error::ProfileResolution(format!(
        "no profile named '{name}' found"
    )))
}

fn find_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            trace!(dir = %dir.display(), error = %e, "Skipping unreadable profile directory");
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_profile_file(path, name))
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

fn is_profile_file(path: &Path, name: &str) -> bool {
    let stem_matches = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case(name));
    let extension_ok = match path.extension().and_then(|ext| ext.to_str()) {
        None => true,
        Some(ext) => PROFILE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
    };
    stem_matches && extension_ok
}

/// Resolve a profile by name and load it over the factory defaults of `kind`.
pub fn load_named_profile(name: &str, kind: DeviceKind) -> Result<Profile> {
    let path = resolve_profile(name)?;
    profile::load_profile(&path, &Profile::factory(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Fresh scratch directory under the system temp dir.
    fn scratch_dir() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "rival-storage-test-{}-{n}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(dir: &Path, file: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, "cpi1: 400\n").unwrap();
        path
    }

    #[test]
    fn literal_path_wins() {
        let dir = scratch_dir();
        let path = touch(&dir, "anything.txt");
        let found = resolve_profile_in(path.to_str().unwrap(), &[]).unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn matches_stem_case_insensitively() {
        let dir = scratch_dir();
        let path = touch(&dir, "Gaming.YAML");
        let found = resolve_profile_in("gaming", &[dir.clone()]).unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn accepts_yml_and_bare_names() {
        let dir = scratch_dir();
        let yml = touch(&dir, "work.yml");
        let bare = touch(&dir, "quiet");
        assert_eq!(resolve_profile_in("work", &[dir.clone()]).unwrap(), yml);
        assert_eq!(resolve_profile_in("QUIET", &[dir.clone()]).unwrap(), bare);
    }

    #[test]
    fn ignores_other_extensions() {
        let dir = scratch_dir();
        touch(&dir, "office.json");
        touch(&dir, "office.yaml.bak");
        let err = resolve_profile_in("office", &[dir]).unwrap_err();
        assert!(matches!(err, Error::ProfileResolution(_)));
    }

    #[test]
    fn earlier_directory_wins() {
        let first = scratch_dir();
        let second = scratch_dir();
        touch(&second, "party.yaml");
        let expected = touch(&first, "party.yml");
        let found = resolve_profile_in("party", &[first, second]).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn falls_through_missing_directories() {
        let missing = scratch_dir().join("does-not-exist");
        let dir = scratch_dir();
        let expected = touch(&dir, "lan.yaml");
        let found = resolve_profile_in("lan", &[missing, dir]).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn subdirectories_are_not_profiles() {
        let dir = scratch_dir();
        fs::create_dir_all(dir.join("nested")).unwrap();
        assert!(resolve_profile_in("nested", &[dir]).is_err());
    }

    #[test]
    fn resolved_file_loads_over_factory_defaults() {
        let dir = scratch_dir();
        let path = touch(&dir, "fps.yaml");
        let found = resolve_profile_in("fps", &[dir]).unwrap();
        assert_eq!(found, path);
        let loaded = profile::load_profile(
            &found,
            &Profile::factory(DeviceKind::SecondGeneration),
        )
        .unwrap();
        assert_eq!(loaded.cpi1().get(), 400);
        assert_eq!(loaded.cpi2().get(), 2000);
    }
}
