//! Caption presets and per-pair caption sidecars.
//!
//! Presets live one per line in `captions.txt`. Blank lines and lines
//! starting with `#` or `/` are skipped. A line may bind a display label:
//!
//! ```text
//! [NAME:sky swap] replace the sky with a sunset
//! ```
//!
//! Unlabelled presets are shown as `Caption #i (<first 30 chars>)`, with
//! ` ...` before the closing parenthesis when the text is longer.
//!
//! Selection index 0 means "no caption"; index `i` picks preset `i - 1`.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::IoResult;

/// Written to `captions.txt` when it is missing or blank.
pub const CAPTIONS_TEMPLATE: &str = "\
# Place your possible captions here separated by new lines.
# Empty lines and trimmed lines that start with '#' or '/' will be ignored.
# Use this when a small set of captions covers every pair in the dataset.
# The selected caption is written next to the pair when it is committed.
# To bind a display name to a caption write it like this:
#        [NAME:YOUR CAPTION NAME HERE] YOUR ACTUAL CAPTION HERE


";

const NAME_PREFIX: &str = "[name:";
const PREVIEW_CHARS: usize = 30;

/// Label shown for the "no caption" choice.
pub const NONE_LABEL: &str = "None";

/// One caption preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionEntry {
    /// Display label.
    pub label: String,
    /// Caption text written on commit.
    pub text: String,
}

impl CaptionEntry {
    fn parse(index: usize, line: &str) -> Self {
        let line = line.trim();
        let named = line
            .get(..NAME_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(NAME_PREFIX));
        if named {
            if let Some(close) = line.find(']') {
                return Self {
                    label: line[NAME_PREFIX.len()..close].trim().to_owned(),
                    text: line[close + 1..].trim().to_owned(),
                };
            }
        }

        let preview: String = line.chars().take(PREVIEW_CHARS).collect();
        let more = if line.chars().count() > PREVIEW_CHARS { " ..." } else { "" };
        Self {
            label: format!("Caption #{index} ({preview}{more})"),
            text: line.to_owned(),
        }
    }
}

/// Parsed caption presets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionSet {
    entries: Vec<CaptionEntry>,
}

impl CaptionSet {
    /// Parses preset text.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('/'))
            .enumerate()
            .map(|(i, l)| CaptionEntry::parse(i, l))
            .collect();
        Self { entries }
    }

    /// Loads `path`, writing the template first when it is missing or blank.
    pub fn load_or_init(path: &Path) -> IoResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(t) if !t.trim().is_empty() => t,
            Ok(_) => init_template(path)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => init_template(path)?,
            Err(e) => return Err(e.into()),
        };
        let set = Self::parse(&text);
        debug!(path = %path.display(), count = set.len(), "Loaded captions");
        Ok(set)
    }

    /// Parsed presets.
    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    /// Number of presets (not counting "None").
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no presets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clamps a selection index to `0..=len`.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.entries.len())
    }

    /// Caption text for a selection index; 0 is the empty caption.
    pub fn select(&self, index: usize) -> &str {
        match self.clamp_index(index) {
            0 => "",
            i => &self.entries[i - 1].text,
        }
    }

    /// Display labels in selection order, starting with [`NONE_LABEL`].
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(NONE_LABEL).chain(self.entries.iter().map(|e| e.label.as_str()))
    }
}

fn init_template(path: &Path) -> IoResult<String> {
    fs::write(path, CAPTIONS_TEMPLATE)?;
    info!(path = %path.display(), "Wrote caption template");
    Ok(CAPTIONS_TEMPLATE.to_owned())
}

/// Whether the committed caption at `path` matches `caption`.
///
/// An empty caption matches only when no caption file exists.
pub fn stored_caption_matches(path: &Path, caption: &str) -> IoResult<bool> {
    match fs::read_to_string(path) {
        Ok(stored) => Ok(stored == caption),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(caption.is_empty()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_no_presets() {
        assert!(CaptionSet::parse(CAPTIONS_TEMPLATE).is_empty());
    }

    #[test]
    fn test_parse_filters_and_labels() {
        let set = CaptionSet::parse(
            "# comment\n\n  // also skipped\nshort one\n  [NAME: Sky ]  swap the sky  \n\
             a caption that is definitely longer than thirty characters\n",
        );
        assert_eq!(set.len(), 3);
        assert_eq!(set.entries()[0].label, "Caption #0 (short one)");
        assert_eq!(set.entries()[1].label, "Sky");
        assert_eq!(set.entries()[1].text, "swap the sky");
        assert_eq!(
            set.entries()[2].label,
            "Caption #2 (a caption that is definitely l ...)"
        );
    }

    #[test]
    fn test_unclosed_name_is_plain() {
        let set = CaptionSet::parse("[name:oops no bracket");
        assert_eq!(set.entries()[0].text, "[name:oops no bracket");
        assert!(set.entries()[0].label.starts_with("Caption #0"));
    }

    #[test]
    fn test_select() {
        let set = CaptionSet::parse("first\nsecond");
        assert_eq!(set.select(0), "");
        assert_eq!(set.select(1), "first");
        assert_eq!(set.select(2), "second");
        assert_eq!(set.select(9), "second");
        let labels: Vec<_> = set.labels().collect();
        assert_eq!(labels[0], NONE_LABEL);
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_load_or_init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captions.txt");
        assert!(CaptionSet::load_or_init(&path).unwrap().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), CAPTIONS_TEMPLATE);

        fs::write(&path, "   \n").unwrap();
        CaptionSet::load_or_init(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CAPTIONS_TEMPLATE);

        fs::write(&path, "hello").unwrap();
        assert_eq!(CaptionSet::load_or_init(&path).unwrap().select(1), "hello");
    }

    #[test]
    fn test_stored_caption_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.txt");
        assert!(stored_caption_matches(&path, "").unwrap());
        assert!(!stored_caption_matches(&path, "a").unwrap());
        fs::write(&path, "a").unwrap();
        assert!(stored_caption_matches(&path, "a").unwrap());
        assert!(!stored_caption_matches(&path, "").unwrap());
    }
}
