//! The editing session for one pair.
//!
//! [`PairSession`] owns the loaded images, both masks and the undo/redo
//! history, and is driven from a single coordinating thread. Brush samples
//! are rasterized synchronously. Everything derived from the masks (merged
//! image and difference overlays) is rebuilt on a worker after each
//! completed mutation:
//!
//! ```text
//!  coordinator                      worker (merge-build)
//!  ───────────                      ────────────────────
//!  mutate masks
//!  record history
//!  snapshot masks ──── ticket ────► enter gate
//!                                   composite + overlays
//!                                   publish if newest generation
//!                                   leave gate
//! ```
//!
//! Mask state is copied into the job when it is requested, so a build
//! requested after a mutation always sees it. A build that finishes after a
//! newer one never replaces the newer result.
//!
//! The save-status check runs as a second kind of job under the same
//! [`MutationGate`], so it never reads a half-published merge.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use pairmask_core::{Error, MainSide, MaskPair, PixelBuffer, Rect, Viewport};
use pairmask_io::{commit_pair, store_state, PairPaths};
use pairmask_ops::{
    brush, composite, diff, transfer, History, MutationGate, Operation, TransferMode,
};
use tracing::{debug, info, trace, warn};

use crate::jobs::{self, JobHandle};
use crate::{SessionConfig, SessionError, SessionResult};

/// Buffers rebuilt by a merge-build.
#[derive(Debug, Clone, Default)]
pub struct Derived {
    /// Build generation these buffers belong to; 0 before the first build.
    pub generation: u64,
    /// Pair composited through the masks.
    pub merged: Option<Arc<PixelBuffer>>,
    /// Base against ref.
    pub base_vs_ref: Option<Arc<PixelBuffer>>,
    /// Ref against base.
    pub ref_vs_base: Option<Arc<PixelBuffer>>,
    /// Merged against the other (non-main) source.
    pub merged_vs_other: Option<Arc<PixelBuffer>>,
}

/// Commit state of the current pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveStatus {
    /// Nothing committed for this pair yet.
    Unsaved,
    /// Committed, but the caption or merge has changed since.
    Outdated,
    /// Committed and identical to what is on screen.
    Saved,
}

/// Auto-mask settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoMaskParams {
    /// Minimum region size as a percentage of the image area.
    pub min_region_percentage: f64,
    /// Per-channel tolerance for "different".
    pub color_tolerance: u8,
    /// Region-map colour class transferred into the mask.
    pub mode: TransferMode,
}

impl From<&SessionConfig> for AutoMaskParams {
    fn from(c: &SessionConfig) -> Self {
        Self {
            min_region_percentage: c.min_region_percentage,
            color_tolerance: c.color_tolerance,
            mode: c.transfer_mode,
        }
    }
}

/// Result of an auto-mask pass.
#[derive(Debug, Clone)]
pub struct AutoMask {
    /// Region map the mask was derived from.
    pub region_map: PixelBuffer,
    /// Region size threshold in pixels.
    pub min_region_pixels: usize,
    /// Mask pixels activated.
    pub selected: usize,
}

#[derive(Debug)]
struct LoadedPair {
    base: Arc<PixelBuffer>,
    reference: Arc<PixelBuffer>,
    masks: MaskPair,
}

#[derive(Debug, Clone, Copy)]
struct Stroke {
    side: MainSide,
    dirty: Option<Rect>,
}

/// Single-pair editing state. See the module docs.
#[derive(Debug)]
pub struct PairSession {
    config: SessionConfig,
    main: MainSide,
    diff_threshold: u8,
    pair: Option<LoadedPair>,
    history: History,
    stroke: Option<Stroke>,
    saved: Option<Arc<PixelBuffer>>,
    gate: MutationGate,
    derived: Arc<Mutex<Derived>>,
    generation: Arc<AtomicU64>,
    builds: Vec<JobHandle<()>>,
}

fn lock(derived: &Mutex<Derived>) -> MutexGuard<'_, Derived> {
    derived.lock().unwrap_or_else(|e| e.into_inner())
}

impl Default for PairSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl PairSession {
    /// Creates an empty session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            main: config.main_side,
            diff_threshold: config.diff_threshold,
            history: History::new(config.history_depth),
            config,
            pair: None,
            stroke: None,
            saved: None,
            gate: MutationGate::new(),
            derived: Arc::new(Mutex::new(Derived::default())),
            generation: Arc::new(AtomicU64::new(0)),
            builds: Vec::new(),
        }
    }

    // ---- state ------------------------------------------------------------

    /// Active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns `true` if a pair is loaded.
    pub fn is_loaded(&self) -> bool {
        self.pair.is_some()
    }

    /// Dimensions of the loaded pair.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.pair.as_ref().map(|p| p.base.dimensions())
    }

    /// Current masks.
    pub fn masks(&self) -> Option<&MaskPair> {
        self.pair.as_ref().map(|p| &p.masks)
    }

    /// Side kept by default.
    pub fn main_side(&self) -> MainSide {
        self.main
    }

    /// Overlay threshold.
    pub fn diff_threshold(&self) -> u8 {
        self.diff_threshold
    }

    /// Undo and redo depths.
    pub fn history_depths(&self) -> (usize, usize) {
        (self.history.undo_depth(), self.history.redo_depth())
    }

    /// Latest published derived buffers, without waiting.
    pub fn derived(&self) -> Derived {
        lock(&self.derived).clone()
    }

    /// Waits for all outstanding jobs, then returns the derived buffers.
    pub fn derived_settled(&mut self) -> SessionResult<Derived> {
        self.wait_idle()?;
        Ok(self.derived())
    }

    // ---- lifecycle ----------------------------------------------------------

    /// Replaces the working pair.
    ///
    /// Masks start blank and the history and saved merge are cleared.
    ///
    /// # Errors
    ///
    /// Fails with a dimension mismatch when the images differ in size; the
    /// previous pair is unloaded in that case.
    pub fn load(&mut self, base: PixelBuffer, reference: PixelBuffer) -> SessionResult<()> {
        self.wait_idle()?;
        self.unload();
        base.ensure_same_size(&reference)?;

        let (width, height) = base.dimensions();
        self.pair = Some(LoadedPair {
            masks: MaskPair::blank(width, height),
            base: Arc::new(base),
            reference: Arc::new(reference),
        });
        debug!(width, height, main = %self.main, "Pair loaded");
        self.request_merge()
    }

    /// Drops the working pair and everything derived from it.
    pub fn unload(&mut self) {
        self.pair = None;
        self.stroke = None;
        self.saved = None;
        self.history.clear();
        *lock(&self.derived) = Derived::default();
    }

    // ---- brush ----------------------------------------------------------

    /// Paints one brush sample on `side` in image coordinates.
    ///
    /// Starts a stroke if none is in progress. A stroke in progress on the
    /// other side is finished first, so each stroke records its own history
    /// step. Returns the dirty rectangle of this sample. Without a pair this
    /// does nothing.
    pub fn stroke_to(
        &mut self,
        side: MainSide,
        cx: i32,
        cy: i32,
        radius: u32,
    ) -> SessionResult<Option<Rect>> {
        if self.stroke.as_ref().is_some_and(|s| s.side != side) {
            debug!(from = %side.other(), to = %side, "Stroke switched sides");
            self.end_stroke()?;
        }
        let Some(pair) = self.pair.as_mut() else {
            return Ok(None);
        };
        let stroke = self.stroke.get_or_insert(Stroke { side, dirty: None });
        let Some(dirty) = brush::paint_stroke(pair.masks.side_mut(side), cx, cy, radius) else {
            return Ok(None);
        };
        stroke.dirty = Some(stroke.dirty.map_or(dirty, |d| d.union(&dirty)));
        Ok(Some(dirty))
    }

    /// Paints one brush sample at a display-space position.
    ///
    /// The position and the configured brush diameter are mapped through
    /// `viewport` into image space.
    pub fn stroke_display(
        &mut self,
        side: MainSide,
        viewport: &Viewport,
        x: f64,
        y: f64,
    ) -> SessionResult<Option<Rect>> {
        let Some((w, h)) = self.dimensions() else {
            return Ok(None);
        };
        let (cx, cy) = viewport.to_image(x, y, w, h);
        let radius = viewport.brush_radius(self.config.brush_diameter, w, h);
        self.stroke_to(side, cx, cy, radius)
    }

    /// Finishes the current stroke: records history and rebuilds the merge.
    ///
    /// Returns the union of every sample's dirty rectangle.
    pub fn end_stroke(&mut self) -> SessionResult<Option<Rect>> {
        let Some(stroke) = self.stroke.take() else {
            return Ok(None);
        };
        trace!(side = %stroke.side, dirty = ?stroke.dirty, "Stroke finished");
        self.commit_mutation()?;
        Ok(stroke.dirty)
    }

    // ---- mask operations --------------------------------------------------

    /// Rebuilds the non-main mask from the differences between the two
    /// images.
    ///
    /// Both masks are cleared first. The region map of main against other
    /// is transferred into the non-main mask with `params.mode`. When
    /// `record` is false the result is a preview and is not added to the
    /// history. Without a pair the result is empty.
    pub fn auto_mask(&mut self, params: AutoMaskParams, record: bool) -> SessionResult<AutoMask> {
        let main = self.main;
        let Some(pair) = self.pair.as_mut() else {
            return Ok(AutoMask {
                region_map: PixelBuffer::new(0, 0),
                min_region_pixels: 0,
                selected: 0,
            });
        };
        let (w, h) = pair.base.dimensions();
        let min_region_pixels = diff::min_region_pixels(params.min_region_percentage, w, h);

        pair.masks.clear();
        let (main_img, other_img) = main.select(&pair.base, &pair.reference);
        let region_map = diff::region_map(main_img, other_img, min_region_pixels, params.color_tolerance)?;
        let selected = transfer::transfer(&region_map, pair.masks.side_mut(main.other()), params.mode)?;
        debug!(min_region_pixels, selected, record, mode = %params.mode, "Auto-mask");

        if record {
            self.commit_mutation()?;
        } else {
            self.request_merge()?;
        }
        Ok(AutoMask {
            region_map,
            min_region_pixels,
            selected,
        })
    }

    /// Selects everything the difference overlay does not highlight.
    ///
    /// Both masks are cleared; pixels of `overlay(other, main)` that are not
    /// green become active in the non-main mask. Returns the selected count.
    pub fn inverted_diff_mask(&mut self) -> SessionResult<usize> {
        let main = self.main;
        let threshold = self.diff_threshold;
        let Some(pair) = self.pair.as_mut() else {
            return Ok(0);
        };

        pair.masks.clear();
        let (main_img, other_img) = main.select(&pair.base, &pair.reference);
        let overlay = diff::overlay(other_img, main_img, threshold)?;
        let selected = transfer::transfer(&overlay, pair.masks.side_mut(main.other()), TransferMode::NonGreen)?;
        debug!(selected, threshold, "Inverted diff mask");
        self.commit_mutation()?;
        Ok(selected)
    }

    /// Inverts the mask of `side`.
    pub fn invert_mask(&mut self, side: MainSide) -> SessionResult<()> {
        let Some(pair) = self.pair.as_mut() else {
            return Ok(());
        };
        transfer::invert(pair.masks.side_mut(side));
        self.commit_mutation()
    }

    /// Clears both masks.
    pub fn clear_masks(&mut self) -> SessionResult<()> {
        let Some(pair) = self.pair.as_mut() else {
            return Ok(());
        };
        pair.masks.clear();
        self.commit_mutation()
    }

    /// Restores the previous mask state, or blank masks past the oldest.
    pub fn undo(&mut self) -> SessionResult<()> {
        let Some(pair) = self.pair.as_mut() else {
            return Ok(());
        };
        let (w, h) = pair.base.dimensions();
        pair.masks = self.history.undo(w, h);
        self.stroke = None;
        self.request_merge()
    }

    /// Re-applies the most recently undone mask state.
    pub fn redo(&mut self) -> SessionResult<()> {
        let Some(pair) = self.pair.as_mut() else {
            return Ok(());
        };
        if let Some(state) = self.history.redo() {
            pair.masks = state;
            self.stroke = None;
            self.request_merge()?;
        }
        Ok(())
    }

    /// Chooses the side kept by default. Masks are left untouched.
    pub fn set_main_side(&mut self, side: MainSide) -> SessionResult<()> {
        if side == self.main {
            return Ok(());
        }
        self.main = side;
        debug!(main = %side, "Main side changed");
        self.request_merge()
    }

    /// Swaps the main side.
    pub fn toggle_main_side(&mut self) -> SessionResult<()> {
        self.set_main_side(self.main.other())
    }

    /// Changes the overlay threshold and rebuilds the overlays.
    pub fn set_diff_threshold(&mut self, threshold: u8) -> SessionResult<()> {
        if threshold == self.diff_threshold {
            return Ok(());
        }
        self.diff_threshold = threshold;
        self.request_merge()
    }

    fn commit_mutation(&mut self) -> SessionResult<()> {
        if let Some(pair) = &self.pair {
            self.history.record_if_changed(&pair.masks);
        }
        self.request_merge()
    }

    // ---- jobs -------------------------------------------------------------

    /// Schedules a merge-build of the current state.
    pub fn request_merge(&mut self) -> SessionResult<()> {
        self.reap_finished()?;
        let Some(pair) = &self.pair else {
            return Ok(());
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let job = MergeJob {
            generation,
            base: Arc::clone(&pair.base),
            reference: Arc::clone(&pair.reference),
            masks: pair.masks.clone(),
            main: self.main,
            threshold: self.diff_threshold,
        };
        let ticket = self.gate.ticket(Operation::MergeBuild);
        let derived = Arc::clone(&self.derived);
        let latest = Arc::clone(&self.generation);
        trace!(generation, "Merge requested");

        let handle = jobs::spawn("pairmask-merge", move || {
            let _pass = ticket.enter();
            if latest.load(Ordering::SeqCst) > job.generation {
                trace!(generation = job.generation, "Merge superseded before start");
                return;
            }
            match job.run() {
                Ok(result) => {
                    let mut slot = lock(&derived);
                    if result.generation > slot.generation {
                        *slot = result;
                    }
                }
                Err(e) => warn!(error = %e, generation = job.generation, "Merge build failed"),
            }
        })?;
        self.builds.push(handle);
        Ok(())
    }

    /// Blocks until every issued job has finished.
    pub fn wait_idle(&mut self) -> SessionResult<()> {
        self.gate.wait_idle();
        for job in self.builds.drain(..) {
            job.join()?;
        }
        Ok(())
    }

    fn reap_finished(&mut self) -> SessionResult<()> {
        let (done, running): (Vec<_>, Vec<_>) =
            self.builds.drain(..).partition(JobHandle::<()>::is_finished);
        self.builds = running;
        for job in done {
            job.join()?;
        }
        Ok(())
    }

    /// Starts an equality check of the published merge against the saved one.
    ///
    /// The check runs under the gate and compares whatever merge is
    /// published when it gets there. A size mismatch counts as different.
    pub fn request_equality(&self) -> SessionResult<JobHandle<bool>> {
        let ticket = self.gate.ticket(Operation::EqualityAnalysis);
        let derived = Arc::clone(&self.derived);
        let saved = self.saved.clone();
        jobs::spawn("pairmask-equality", move || {
            let _pass = ticket.enter();
            let merged = lock(&derived).merged.clone();
            match (merged, saved) {
                (Some(current), Some(saved)) => {
                    diff::pixels_equal(&current, &saved).unwrap_or(false)
                }
                _ => false,
            }
        })
    }

    /// Compares the session against what is committed at `paths`.
    ///
    /// Outstanding merge builds are waited for first.
    pub fn analyze_save_status(
        &mut self,
        paths: &PairPaths,
        caption: &str,
    ) -> SessionResult<SaveStatus> {
        self.wait_idle()?;
        let store = store_state(paths, caption)?;
        if !store.images_present {
            return Ok(SaveStatus::Unsaved);
        }
        let identical = self.request_equality()?.join()?;
        let status = if store.caption_matches && identical {
            SaveStatus::Saved
        } else {
            SaveStatus::Outdated
        };
        debug!(?status, caption_matches = store.caption_matches, identical, "Save status");
        Ok(status)
    }

    /// Writes the current merge, the other source and `caption` to `paths`.
    ///
    /// Waits for outstanding jobs first. On success the merge becomes the
    /// saved reference for [`analyze_save_status`](Self::analyze_save_status).
    pub fn commit(&mut self, paths: &PairPaths, caption: &str) -> SessionResult<()> {
        self.wait_idle()?;
        let pair = self.pair.as_ref().ok_or(SessionError::NoPairLoaded)?;
        let merged = lock(&self.derived)
            .merged
            .clone()
            .ok_or(Error::MissingBuffer("merged"))?;
        let (_, other) = self.main.select(&pair.base, &pair.reference);

        commit_pair(paths, &merged, other, caption)?;
        info!(main = %self.main, caption_len = caption.len(), "Pair committed");
        self.saved = Some(merged);
        Ok(())
    }
}

impl Drop for PairSession {
    fn drop(&mut self) {
        if let Err(e) = self.wait_idle() {
            warn!(error = %e, "Worker failed during shutdown");
        }
    }
}

struct MergeJob {
    generation: u64,
    base: Arc<PixelBuffer>,
    reference: Arc<PixelBuffer>,
    masks: MaskPair,
    main: MainSide,
    threshold: u8,
}

impl MergeJob {
    fn run(&self) -> SessionResult<Derived> {
        let merged = composite::composite(
            &self.base,
            &self.reference,
            &self.masks.base,
            &self.masks.reference,
            self.main,
        )?;
        let (_, other) = self.main.select(&self.base, &self.reference);
        let merged_vs_other = diff::overlay(&merged, other, self.threshold)?;
        let base_vs_ref = diff::overlay(&self.base, &self.reference, self.threshold)?;
        let ref_vs_base = diff::overlay(&self.reference, &self.base, self.threshold)?;
        trace!(generation = self.generation, "Merge built");
        Ok(Derived {
            generation: self.generation,
            merged: Some(Arc::new(merged)),
            base_vs_ref: Some(Arc::new(base_vs_ref)),
            ref_vs_base: Some(Arc::new(ref_vs_base)),
            merged_vs_other: Some(Arc::new(merged_vs_other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmask_core::pixel;

    const GREY: [u8; 4] = [1, 1, 1, 255];
    const LIGHT: [u8; 4] = [9, 9, 9, 255];

    fn session(main: MainSide) -> PairSession {
        let mut s = PairSession::new(SessionConfig {
            main_side: main,
            ..SessionConfig::default()
        });
        s.load(PixelBuffer::filled(4, 4, GREY), PixelBuffer::filled(4, 4, LIGHT))
            .unwrap();
        s
    }

    fn merged(s: &mut PairSession) -> Arc<PixelBuffer> {
        s.derived_settled().unwrap().merged.unwrap()
    }

    #[test]
    fn test_initial_merge_is_main() {
        let mut s = session(MainSide::Ref);
        assert!(merged(&mut s).pixels().all(|p| p == LIGHT));
        s.toggle_main_side().unwrap();
        assert!(merged(&mut s).pixels().all(|p| p == GREY));
    }

    #[test]
    fn test_one_pixel_stroke_scenario() {
        let mut s = session(MainSide::Base);
        // radius 1 at (1, 2) covers (1, 1), (0, 2) and (1, 2)
        s.stroke_to(MainSide::Ref, 1, 2, 1).unwrap().unwrap();
        s.end_stroke().unwrap();
        let m = merged(&mut s);
        assert_eq!(m.pixel(1, 1), Some(LIGHT));
        assert_eq!(m.pixels().filter(|p| *p == LIGHT).count(), 3);
        assert_eq!(s.history_depths(), (1, 0));
    }

    #[test]
    fn test_side_switch_splits_stroke() {
        let mut s = session(MainSide::Base);
        s.stroke_to(MainSide::Base, 2, 2, 2).unwrap().unwrap();
        let base_active = s.masks().unwrap().base.count_active();
        s.stroke_to(MainSide::Ref, 0, 0, 1).unwrap().unwrap();
        s.end_stroke().unwrap();

        let masks = s.masks().unwrap();
        assert_eq!(masks.base.count_active(), base_active);
        assert!(masks.reference.is_active(0, 0));
        assert!(!masks.base.is_active(0, 0));
        assert_eq!(s.history_depths(), (2, 0));

        s.undo().unwrap();
        let masks = s.masks().unwrap();
        assert!(masks.reference.is_blank());
        assert_eq!(masks.base.count_active(), base_active);
    }

    #[test]
    fn test_oversized_brush_fills_mask() {
        let mut s = PairSession::new(SessionConfig {
            brush_diameter: 1e12,
            ..SessionConfig::default()
        });
        s.load(PixelBuffer::filled(4, 4, GREY), PixelBuffer::filled(4, 4, LIGHT))
            .unwrap();
        let viewport = Viewport::new(8.0, 8.0);
        s.stroke_display(MainSide::Base, &viewport, 2.0, 2.0).unwrap().unwrap();
        s.end_stroke().unwrap();
        assert_eq!(s.masks().unwrap().base.count_active(), 16);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut s = session(MainSide::Base);
        s.stroke_to(MainSide::Ref, 0, 1, 1).unwrap();
        s.end_stroke().unwrap();
        let s1 = s.masks().unwrap().clone();
        s.invert_mask(MainSide::Base).unwrap();
        let s2 = s.masks().unwrap().clone();

        s.undo().unwrap();
        assert_eq!(s.masks().unwrap(), &s1);
        s.undo().unwrap();
        assert_eq!(s.masks().unwrap(), &MaskPair::blank(4, 4));
        assert!(merged(&mut s).pixels().all(|p| p == GREY));

        s.redo().unwrap();
        s.redo().unwrap();
        assert_eq!(s.masks().unwrap(), &s2);
    }

    #[test]
    fn test_auto_mask_selects_differences() {
        let mut s = PairSession::new(SessionConfig::default());
        let base = PixelBuffer::filled(10, 10, pixel::OPAQUE_BLACK);
        let mut reference = base.clone();
        for y in 2..5 {
            for x in 2..5 {
                reference.set_pixel(x, y, pixel::OPAQUE_WHITE).unwrap();
            }
        }
        reference.set_pixel(8, 8, pixel::OPAQUE_WHITE).unwrap();
        s.load(base, reference).unwrap();

        let params = AutoMaskParams {
            min_region_percentage: 5.0,
            color_tolerance: 0,
            mode: TransferMode::White,
        };
        let result = s.auto_mask(params, false).unwrap();
        assert_eq!(result.min_region_pixels, 5);
        assert_eq!(result.selected, 9);
        // main is ref, so the base mask receives the selection
        let masks = s.masks().unwrap();
        assert_eq!(masks.base.count_active(), 9);
        assert!(masks.reference.is_blank());
        assert_eq!(s.history_depths(), (0, 0));

        s.auto_mask(params, true).unwrap();
        assert_eq!(s.history_depths(), (1, 0));
    }

    #[test]
    fn test_inverted_diff_mask() {
        let mut s = PairSession::new(SessionConfig::default());
        let base = PixelBuffer::filled(3, 3, pixel::OPAQUE_BLACK);
        let mut reference = base.clone();
        reference.set_pixel(1, 1, pixel::OPAQUE_WHITE).unwrap();
        s.load(base, reference).unwrap();

        assert_eq!(s.inverted_diff_mask().unwrap(), 8);
        assert!(!s.masks().unwrap().base.is_active(1, 1));
    }

    #[test]
    fn test_operations_without_pair() {
        let mut s = PairSession::default();
        assert!(s.stroke_to(MainSide::Base, 0, 0, 3).unwrap().is_none());
        assert_eq!(s.end_stroke().unwrap(), None);
        s.undo().unwrap();
        s.clear_masks().unwrap();
        assert_eq!(s.inverted_diff_mask().unwrap(), 0);
        let params = AutoMaskParams::from(s.config());
        let result = s.auto_mask(params, true).unwrap();
        assert_eq!(result.selected, 0);
        assert!(result.region_map.is_empty());
        assert_eq!(s.history_depths(), (0, 0));
        assert!(s.derived().merged.is_none());

        let paths = PairPaths {
            merged_store: "m.png".into(),
            other_store: "o.png".into(),
            caption_store: "c.txt".into(),
        };
        assert!(matches!(s.commit(&paths, ""), Err(SessionError::NoPairLoaded)));
    }

    #[test]
    fn test_mismatched_pair_is_rejected() {
        let mut s = session(MainSide::Ref);
        let err = s.load(PixelBuffer::new(4, 4), PixelBuffer::new(5, 4)).unwrap_err();
        assert!(err.is_skippable());
        assert!(!s.is_loaded());
    }

    #[test]
    fn test_newest_build_wins() {
        let mut s = session(MainSide::Base);
        for i in 0..4 {
            s.stroke_to(MainSide::Ref, i, i, 1).unwrap();
            s.end_stroke().unwrap();
        }
        s.clear_masks().unwrap();
        let d = s.derived_settled().unwrap();
        assert!(d.merged.unwrap().pixels().all(|p| p == GREY));
        assert!(d.generation >= 6);
    }

    #[test]
    fn test_commit_and_status() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["final/base", "final/ref", "final/captions"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        let paths = PairPaths {
            merged_store: dir.path().join("final/ref/p.png"),
            other_store: dir.path().join("final/base/p.png"),
            caption_store: dir.path().join("final/captions/p.txt"),
        };

        let mut s = session(MainSide::Ref);
        assert_eq!(s.analyze_save_status(&paths, "").unwrap(), SaveStatus::Unsaved);

        s.commit(&paths, "hello").unwrap();
        assert_eq!(s.analyze_save_status(&paths, "hello").unwrap(), SaveStatus::Saved);
        assert_eq!(s.analyze_save_status(&paths, "bye").unwrap(), SaveStatus::Outdated);

        s.stroke_to(MainSide::Base, 2, 2, 2).unwrap();
        s.end_stroke().unwrap();
        assert_eq!(s.analyze_save_status(&paths, "hello").unwrap(), SaveStatus::Outdated);

        s.undo().unwrap();
        assert_eq!(s.analyze_save_status(&paths, "hello").unwrap(), SaveStatus::Saved);
    }
}
