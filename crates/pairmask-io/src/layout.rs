//! Dataset directories and pair discovery.
//!
//! A pair is one file name present in both `base/` and `ref/`. Names are
//! matched case-insensitively; the lower-cased name is the pair's key and
//! its stem names every committed output.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use pairmask_core::MainSide;
use tracing::{debug, info};

use crate::{IoError, IoResult};

/// File extensions recognised as pair images.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Name of the caption preset file in the dataset root.
pub const CAPTIONS_FILE: &str = "captions.txt";

/// Name of the optional configuration file in the dataset root.
pub const CONFIG_FILE: &str = "pairmask.yaml";

const FINAL_DIR: &str = "final";
const DELETED_DIR: &str = "deleted";
const CAPTIONS_DIR: &str = "captions";

/// Paths of a dataset rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: PathBuf,
}

/// One discovered pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairEntry {
    /// Lower-cased file name shared by both sides.
    pub key: String,
    /// Actual path of the base image.
    pub base_file: PathBuf,
    /// Actual path of the ref image.
    pub ref_file: PathBuf,
}

impl PairEntry {
    /// Key without its extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.key)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.key)
    }

    /// Source image for `side`.
    pub fn source(&self, side: MainSide) -> &Path {
        match side {
            MainSide::Base => &self.base_file,
            MainSide::Ref => &self.ref_file,
        }
    }
}

/// Every file touched while working on one pair with a given main side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairPaths {
    /// Where the merged image is committed: `final/<main>/<stem>.png`.
    pub merged_store: PathBuf,
    /// Where the other side is committed: `final/<other>/<stem>.png`.
    pub other_store: PathBuf,
    /// Committed caption: `final/captions/<stem>.txt`.
    pub caption_store: PathBuf,
}

impl PairPaths {
    /// The three commit targets, in write order.
    pub fn targets(&self) -> [&Path; 3] {
        [&self.merged_store, &self.other_store, &self.caption_store]
    }
}

impl DatasetLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Dataset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `base/` or `ref/`.
    pub fn source_dir(&self, side: MainSide) -> PathBuf {
        self.root.join(side.dir_name())
    }

    /// `final/base/` or `final/ref/`.
    pub fn final_dir(&self, side: MainSide) -> PathBuf {
        self.root.join(FINAL_DIR).join(side.dir_name())
    }

    /// `final/captions/`.
    pub fn captions_dir(&self) -> PathBuf {
        self.root.join(FINAL_DIR).join(CAPTIONS_DIR)
    }

    /// `deleted/base/` or `deleted/ref/`.
    pub fn deleted_dir(&self, side: MainSide) -> PathBuf {
        self.root.join(DELETED_DIR).join(side.dir_name())
    }

    /// `captions.txt`.
    pub fn captions_file(&self) -> PathBuf {
        self.root.join(CAPTIONS_FILE)
    }

    /// `pairmask.yaml`.
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Checks that `base/` and `ref/` exist and creates the output tree.
    pub fn ensure_dirs(&self) -> IoResult<()> {
        for side in [MainSide::Base, MainSide::Ref] {
            let dir = self.source_dir(side);
            if !dir.is_dir() {
                return Err(IoError::MissingDirectory(dir));
            }
        }
        for dir in [
            self.final_dir(MainSide::Base),
            self.final_dir(MainSide::Ref),
            self.captions_dir(),
            self.deleted_dir(MainSide::Base),
            self.deleted_dir(MainSide::Ref),
        ] {
            fs::create_dir_all(&dir)?;
        }
        debug!(root = %self.root.display(), "Dataset directories ready");
        Ok(())
    }

    /// Lists pending pairs sorted by key.
    ///
    /// Pairs whose stem already has a committed base image are skipped.
    pub fn scan_pairs(&self) -> IoResult<Vec<PairEntry>> {
        let base = list_images(&self.source_dir(MainSide::Base))?;
        let reference = list_images(&self.source_dir(MainSide::Ref))?;

        let final_base = self.final_dir(MainSide::Base);
        let committed: HashSet<String> = if final_base.is_dir() {
            list_images(&final_base)?
                .into_keys()
                .filter_map(|k| stem_of(&k).map(str::to_owned))
                .collect()
        } else {
            HashSet::new()
        };

        let pairs: Vec<PairEntry> = base
            .into_iter()
            .filter_map(|(key, base_file)| {
                let ref_file = reference.get(&key)?.clone();
                Some(PairEntry {
                    key,
                    base_file,
                    ref_file,
                })
            })
            .filter(|p| !committed.contains(p.stem()))
            .collect();

        info!(
            root = %self.root.display(),
            pending = pairs.len(),
            committed = committed.len(),
            "Scanned dataset"
        );
        Ok(pairs)
    }

    /// Paths for `pair` when `main` is the kept side.
    pub fn pair_paths(&self, pair: &PairEntry, main: MainSide) -> PairPaths {
        let file = format!("{}.png", pair.stem());
        PairPaths {
            merged_store: self.final_dir(main).join(&file),
            other_store: self.final_dir(main.other()).join(&file),
            caption_store: self.captions_dir().join(format!("{}.txt", pair.stem())),
        }
    }

    /// Moves both source files of `pair` into `deleted/`.
    pub fn discard(&self, pair: &PairEntry) -> IoResult<()> {
        for side in [MainSide::Base, MainSide::Ref] {
            let src = pair.source(side);
            let name = src
                .file_name()
                .ok_or_else(|| IoError::MissingPair(src.display().to_string()))?;
            let dir = self.deleted_dir(side);
            fs::create_dir_all(&dir)?;
            fs::rename(src, dir.join(name))?;
        }
        info!(pair = %pair.key, "Moved pair to deleted");
        Ok(())
    }
}

fn stem_of(name: &str) -> Option<&str> {
    Path::new(name).file_stem().and_then(|s| s.to_str())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Image files directly inside `dir`, keyed by lower-cased file name.
fn list_images(dir: &Path) -> IoResult<BTreeMap<String, PathBuf>> {
    if !dir.is_dir() {
        return Err(IoError::MissingDirectory(dir.to_path_buf()));
    }
    let mut out = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !has_image_extension(&path) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            out.entry(name.to_lowercase()).or_insert(path);
        }
    }
    Ok(out)
}
