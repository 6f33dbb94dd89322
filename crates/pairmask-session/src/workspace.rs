//! Dataset navigation around a [`PairSession`].
//!
//! A [`Workspace`] owns the pending pair list of one dataset, the caption
//! presets and the current caption selection. Moving between pairs reloads
//! the session. Pairs that cannot be loaded (unreadable files, sizes that do
//! not match) are skipped with a warning.

use std::path::PathBuf;

use pairmask_core::MainSide;
use pairmask_io::{codec, CaptionSet, DatasetLayout, PairEntry, PairPaths};
use tracing::{debug, info, warn};

use crate::session::{PairSession, SaveStatus};
use crate::{SessionConfig, SessionError, SessionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

impl Step {
    fn advance(self, i: usize, n: usize) -> usize {
        match self {
            Self::Forward => (i + 1) % n,
            Self::Backward => (i + n - 1) % n,
        }
    }
}

/// One dataset opened for editing.
#[derive(Debug)]
pub struct Workspace {
    layout: DatasetLayout,
    pairs: Vec<PairEntry>,
    index: usize,
    captions: CaptionSet,
    caption_index: usize,
    session: PairSession,
}

impl Workspace {
    /// Opens the dataset at `root` with its `pairmask.yaml`, if any.
    pub fn open(root: impl Into<PathBuf>) -> SessionResult<Self> {
        let layout = DatasetLayout::new(root);
        let config = SessionConfig::load_or_default(layout.config_file())?;
        Self::open_with(layout, config)
    }

    /// Opens a dataset with an explicit configuration.
    ///
    /// Creates the output directories and the caption template as needed,
    /// then loads the first loadable pair.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoPairs`] when no pending pair can be loaded.
    pub fn open_with(layout: DatasetLayout, config: SessionConfig) -> SessionResult<Self> {
        layout.ensure_dirs()?;
        let pairs = layout.scan_pairs()?;
        let captions = CaptionSet::load_or_init(&layout.captions_file())?;
        info!(
            root = %layout.root().display(),
            pairs = pairs.len(),
            captions = captions.len(),
            "Opened dataset"
        );

        let mut ws = Self {
            layout,
            pairs,
            index: 0,
            captions,
            caption_index: 0,
            session: PairSession::new(config),
        };
        ws.seek(0, Step::Forward)?;
        Ok(ws)
    }

    /// Dataset layout.
    pub fn layout(&self) -> &DatasetLayout {
        &self.layout
    }

    /// Pending pairs.
    pub fn pairs(&self) -> &[PairEntry] {
        &self.pairs
    }

    /// Index of the current pair.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current pair.
    pub fn current(&self) -> Option<&PairEntry> {
        self.pairs.get(self.index)
    }

    /// The editing session.
    pub fn session(&self) -> &PairSession {
        &self.session
    }

    /// The editing session, mutably.
    pub fn session_mut(&mut self) -> &mut PairSession {
        &mut self.session
    }

    /// Caption presets.
    pub fn captions(&self) -> &CaptionSet {
        &self.captions
    }

    /// Selected caption index; 0 is no caption.
    pub fn caption_index(&self) -> usize {
        self.caption_index
    }

    /// Selects a caption preset. Out-of-range indices clamp to the last one.
    pub fn select_caption(&mut self, index: usize) {
        self.caption_index = self.captions.clamp_index(index);
    }

    /// Text of the selected caption.
    pub fn caption(&self) -> &str {
        self.captions.select(self.caption_index)
    }

    /// Loads the pair at `index`, or the next loadable one after it.
    pub fn load_at(&mut self, index: usize) -> SessionResult<()> {
        self.seek(index, Step::Forward)
    }

    /// Moves to the next loadable pair, wrapping at the end.
    pub fn next(&mut self) -> SessionResult<()> {
        let n = self.pairs.len().max(1);
        self.seek(Step::Forward.advance(self.index, n), Step::Forward)
    }

    /// Moves to the previous loadable pair, wrapping at the start.
    pub fn prev(&mut self) -> SessionResult<()> {
        let n = self.pairs.len().max(1);
        self.seek(Step::Backward.advance(self.index, n), Step::Backward)
    }

    /// Moves the current pair into `deleted/` and loads the next one.
    ///
    /// Returns `false` when no loadable pair is left.
    pub fn delete_current(&mut self) -> SessionResult<bool> {
        self.session.wait_idle()?;
        let Some(entry) = self.current().cloned() else {
            return Ok(false);
        };
        self.layout.discard(&entry)?;
        self.pairs.remove(self.index);
        if self.index >= self.pairs.len() {
            self.index = 0;
        }
        match self.seek(self.index, Step::Forward) {
            Ok(()) => Ok(true),
            Err(SessionError::NoPairs) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Commit paths of the current pair for the current main side.
    pub fn pair_paths(&self) -> SessionResult<PairPaths> {
        let entry = self.current().ok_or(SessionError::NoPairLoaded)?;
        Ok(self.layout.pair_paths(entry, self.session.main_side()))
    }

    /// Commits the current merge and the selected caption.
    pub fn commit(&mut self) -> SessionResult<()> {
        let paths = self.pair_paths()?;
        let caption = self.caption().to_owned();
        self.session.commit(&paths, &caption)
    }

    /// Save status of the current pair against `final/`.
    pub fn save_status(&mut self) -> SessionResult<SaveStatus> {
        let paths = self.pair_paths()?;
        let caption = self.caption().to_owned();
        self.session.analyze_save_status(&paths, &caption)
    }

    fn seek(&mut self, start: usize, step: Step) -> SessionResult<()> {
        let n = self.pairs.len();
        if n == 0 {
            self.session.unload();
            return Err(SessionError::NoPairs);
        }

        let mut i = start % n;
        for _ in 0..n {
            match self.try_load(i) {
                Ok(()) => {
                    self.index = i;
                    return Ok(());
                }
                Err(e) if e.is_skippable() => {
                    warn!(pair = %self.pairs[i].key, error = %e, "Skipping pair");
                }
                Err(e) => return Err(e),
            }
            i = step.advance(i, n);
        }
        self.session.unload();
        Err(SessionError::NoPairs)
    }

    fn try_load(&mut self, i: usize) -> SessionResult<()> {
        let entry = &self.pairs[i];
        let base = codec::read_bgra(entry.source(MainSide::Base))?;
        let reference = codec::read_bgra(entry.source(MainSide::Ref))?;
        debug!(pair = %entry.key, index = i, "Loading pair");
        self.session.load(base, reference)
    }
}
