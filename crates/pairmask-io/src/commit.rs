//! Writing a finished pair into `final/`.
//!
//! A commit writes up to three files: the merged image under the main side,
//! the untouched other side next to it, and the caption. If any step fails
//! all three targets are removed, so a pair is never left half-committed.

use std::fs;
use std::io;
use std::path::Path;

use pairmask_core::PixelBuffer;
use tracing::{info, warn};

use crate::caption::stored_caption_matches;
use crate::codec::write_rgb;
use crate::layout::PairPaths;
use crate::{IoError, IoResult};

/// What is already on disk for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreState {
    /// Both committed images exist.
    pub images_present: bool,
    /// The committed caption equals the current caption.
    pub caption_matches: bool,
}

/// Writes `merged`, `other` and `caption` to the commit targets in `paths`.
///
/// An empty caption removes any existing caption file.
///
/// # Errors
///
/// Returns [`IoError::Commit`] naming the file that failed. Every target
/// has been removed by then.
pub fn commit_pair(
    paths: &PairPaths,
    merged: &PixelBuffer,
    other: &PixelBuffer,
    caption: &str,
) -> IoResult<()> {
    match write_targets(paths, merged, other, caption) {
        Ok(()) => {
            info!(merged = %paths.merged_store.display(), "Committed pair");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Commit failed, rolling back");
            rollback(paths);
            Err(e)
        }
    }
}

fn write_targets(
    paths: &PairPaths,
    merged: &PixelBuffer,
    other: &PixelBuffer,
    caption: &str,
) -> IoResult<()> {
    write_rgb(&paths.merged_store, merged).map_err(failed_at(&paths.merged_store))?;
    write_rgb(&paths.other_store, other).map_err(failed_at(&paths.other_store))?;
    if caption.is_empty() {
        remove_if_exists(&paths.caption_store).map_err(failed_at(&paths.caption_store))
    } else {
        fs::write(&paths.caption_store, caption)
            .map_err(IoError::from)
            .map_err(failed_at(&paths.caption_store))
    }
}

fn failed_at(path: &Path) -> impl FnOnce(IoError) -> IoError + '_ {
    move |e| IoError::Commit {
        path: path.to_path_buf(),
        source: Box::new(e),
    }
}

fn remove_if_exists(path: &Path) -> IoResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn rollback(paths: &PairPaths) {
    for target in paths.targets() {
        if let Err(e) = remove_if_exists(target) {
            warn!(path = %target.display(), error = %e, "Rollback could not remove file");
        }
    }
}

/// Inspects the commit targets for `paths` against `caption`.
pub fn store_state(paths: &PairPaths, caption: &str) -> IoResult<StoreState> {
    let images_present = paths.merged_store.is_file() && paths.other_store.is_file();
    let caption_matches = stored_caption_matches(&paths.caption_store, caption)?;
    Ok(StoreState {
        images_present,
        caption_matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmask_core::pixel;

    fn paths_in(dir: &Path) -> PairPaths {
        for sub in ["final/base", "final/ref", "final/captions"] {
            fs::create_dir_all(dir.join(sub)).unwrap();
        }
        PairPaths {
            merged_store: dir.join("final/ref/p.png"),
            other_store: dir.join("final/base/p.png"),
            caption_store: dir.join("final/captions/p.txt"),
        }
    }

    #[test]
    fn test_commit_writes_all() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let merged = PixelBuffer::filled(2, 2, pixel::OPAQUE_WHITE);
        let other = PixelBuffer::filled(2, 2, pixel::OPAQUE_BLACK);

        commit_pair(&paths, &merged, &other, "a caption").unwrap();
        assert!(paths.merged_store.is_file());
        assert!(paths.other_store.is_file());
        assert_eq!(fs::read_to_string(&paths.caption_store).unwrap(), "a caption");

        let state = store_state(&paths, "a caption").unwrap();
        assert_eq!(state, StoreState { images_present: true, caption_matches: true });
        assert!(!store_state(&paths, "").unwrap().caption_matches);
    }

    #[test]
    fn test_empty_caption_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let buf = PixelBuffer::new(1, 1);
        commit_pair(&paths, &buf, &buf, "x").unwrap();
        commit_pair(&paths, &buf, &buf, "").unwrap();
        assert!(!paths.caption_store.exists());
        assert!(store_state(&paths, "").unwrap().caption_matches);
    }

    #[test]
    fn test_failure_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = paths_in(dir.path());
        // other store points into a directory that does not exist
        paths.other_store = dir.path().join("missing/dir/p.png");
        let buf = PixelBuffer::new(1, 1);

        let err = commit_pair(&paths, &buf, &buf, "caption").unwrap_err();
        match err {
            IoError::Commit { path, .. } => assert_eq!(path, paths.other_store),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!paths.merged_store.exists());
        assert!(!paths.caption_store.exists());
    }

    #[test]
    fn test_store_state_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let state = store_state(&paths, "").unwrap();
        assert!(!state.images_present);
        assert!(state.caption_matches);
    }
}
