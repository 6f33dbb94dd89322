//! Dataset round trips through the public pairmask-io API.

use std::fs;
use std::path::Path;

use pairmask_core::{pixel, MainSide, PixelBuffer};
use pairmask_io::{codec, commit_pair, store_state, CaptionSet, DatasetLayout, IoError};
use tempfile::tempdir;

fn seed(root: &Path, names: &[&str]) -> DatasetLayout {
    let layout = DatasetLayout::new(root);
    for side in [MainSide::Base, MainSide::Ref] {
        fs::create_dir_all(layout.source_dir(side)).unwrap();
    }
    layout.ensure_dirs().unwrap();
    for name in names {
        let base = PixelBuffer::filled(3, 2, pixel::OPAQUE_BLACK);
        let reference = PixelBuffer::filled(3, 2, pixel::OPAQUE_WHITE);
        codec::write_bgra(layout.source_dir(MainSide::Base).join(name), &base).unwrap();
        codec::write_bgra(layout.source_dir(MainSide::Ref).join(name), &reference).unwrap();
    }
    layout
}

// ============================================================================
// Commit
// ============================================================================

#[test]
fn test_committed_pair_leaves_scan() {
    let dir = tempdir().unwrap();
    let layout = seed(dir.path(), &["one.png", "two.png"]);
    let pairs = layout.scan_pairs().unwrap();
    assert_eq!(pairs.len(), 2);

    let pair = &pairs[0];
    let paths = layout.pair_paths(pair, MainSide::Ref);
    let merged = codec::read_bgra(&pair.ref_file).unwrap();
    let other = codec::read_bgra(&pair.base_file).unwrap();
    commit_pair(&paths, &merged, &other, "street at noon").unwrap();

    let state = store_state(&paths, "street at noon").unwrap();
    assert!(state.images_present && state.caption_matches);
    let stored = codec::read_bgra(&paths.other_store).unwrap();
    assert!(stored.pixels().all(|p| p == pixel::OPAQUE_BLACK));

    let pending: Vec<_> = layout.scan_pairs().unwrap().into_iter().map(|p| p.key).collect();
    assert_eq!(pending, ["two.png"]);
}

#[test]
fn test_failed_commit_leaves_nothing() {
    let dir = tempdir().unwrap();
    let layout = seed(dir.path(), &["one.png"]);
    let pair = &layout.scan_pairs().unwrap()[0];
    let mut paths = layout.pair_paths(pair, MainSide::Base);
    paths.caption_store = dir.path().join("no/such/dir/one.txt");

    let buf = PixelBuffer::new(3, 2);
    let err = commit_pair(&paths, &buf, &buf, "caption").unwrap_err();
    assert!(matches!(err, IoError::Commit { ref path, .. } if *path == paths.caption_store));
    assert!(!paths.merged_store.exists());
    assert!(!paths.other_store.exists());
    assert!(!store_state(&paths, "caption").unwrap().images_present);
    assert_eq!(layout.scan_pairs().unwrap().len(), 1);
}

// ============================================================================
// Discard and captions
// ============================================================================

#[test]
fn test_discarded_pair_moves_to_deleted() {
    let dir = tempdir().unwrap();
    let layout = seed(dir.path(), &["gone.png", "kept.png"]);
    let pairs = layout.scan_pairs().unwrap();
    layout.discard(&pairs[0]).unwrap();

    assert!(layout.deleted_dir(MainSide::Base).join("gone.png").is_file());
    assert!(layout.deleted_dir(MainSide::Ref).join("gone.png").is_file());
    let pending: Vec<_> = layout.scan_pairs().unwrap().into_iter().map(|p| p.key).collect();
    assert_eq!(pending, ["kept.png"]);
}

#[test]
fn test_caption_presets_from_file() {
    let dir = tempdir().unwrap();
    let layout = seed(dir.path(), &[]);
    fs::write(layout.captions_file(), "[NAME:fog] a foggy morning\nplain text\n").unwrap();

    let set = CaptionSet::load_or_init(&layout.captions_file()).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.select(1), "a foggy morning");
    assert_eq!(set.select(2), "plain text");
    assert_eq!(set.select(0), "");
}
