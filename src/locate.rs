//! Case-insensitive lookup of a game archive under known install roots.
//!
//! Install directories differ in case between Steam versions and file
//! systems, so every path segment is matched against the directory entries
//! ignoring case. Candidate locations are plain data: a root taken from an
//! environment variable plus the segments below it.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LocateError;

/// One place an archive may live: `$root_var/segments[0]/.../segments[n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub root_var: &'static str,
    pub segments: &'static [&'static str],
}

#[cfg(target_os = "linux")]
pub const PLATFORM_CANDIDATES: Option<&[Candidate]> = Some(&[
    Candidate {
        root_var: "HOME",
        segments: &[
            ".local",
            "share",
            "Steam",
            "SteamApps",
            "common",
            "CookServeDelicious",
            "assets",
            "game.unx",
        ],
    },
    Candidate {
        root_var: "HOME",
        segments: &[
            ".steam",
            "Steam",
            "SteamApps",
            "common",
            "CookServeDelicious",
            "assets",
            "game.unx",
        ],
    },
]);

#[cfg(not(target_os = "linux"))]
pub const PLATFORM_CANDIDATES: Option<&[Candidate]> = None;

/// Resolves `segments` below `root`, matching each one case-insensitively.
///
/// Intermediate segments must name directories and the last one a regular
/// file. When several entries match a segment in different case, each is
/// tried in turn.
pub fn find_path_ignore_case(
    root: impl AsRef<Path>,
    segments: &[&str],
) -> Result<PathBuf, LocateError> {
    let root = root.as_ref();
    search(root, segments)?.ok_or_else(|| {
        LocateError::NotFound(format!("{} under {}", segments.join("/"), root.display()))
    })
}

fn search(dir: &Path, segments: &[&str]) -> io::Result<Option<PathBuf>> {
    let Some((current, rest)) = segments.split_first() else {
        return Ok(None);
    };
    let wanted = current.to_lowercase();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    for entry in entries {
        let entry = entry?;
        if entry.file_name().to_string_lossy().to_lowercase() != wanted {
            continue;
        }

        let path = entry.path();
        if rest.is_empty() {
            if path.is_file() {
                return Ok(Some(path));
            }
        } else if path.is_dir() {
            if let Some(found) = search(&path, rest)? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}

/// Tries each candidate in order and returns the first archive found.
/// Candidates whose root variable is unset are skipped.
pub fn find_archive_in<F>(candidates: &[Candidate], lookup_var: F) -> Result<PathBuf, LocateError>
where
    F: Fn(&str) -> Option<OsString>,
{
    for candidate in candidates {
        let Some(root) = lookup_var(candidate.root_var) else {
            debug!(var = candidate.root_var, "root variable unset, skipping candidate");
            continue;
        };

        match find_path_ignore_case(PathBuf::from(root), candidate.segments) {
            Ok(path) => {
                debug!(path = %path.display(), "archive found");
                return Ok(path);
            }
            Err(LocateError::NotFound(what)) => debug!(%what, "candidate not present"),
            Err(e) => return Err(e),
        }
    }

    Err(LocateError::NotFound("game archive not found".into()))
}

/// Looks for the archive in the install locations known for this platform.
pub fn find_archive() -> Result<PathBuf, LocateError> {
    match PLATFORM_CANDIDATES {
        Some(candidates) => find_archive_in(candidates, |var| std::env::var_os(var)),
        None => Err(LocateError::UnsupportedPlatform(std::env::consts::OS)),
    }
}
