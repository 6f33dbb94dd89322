//! Integration tests for pairmask crates.
//!
//! End-to-end checks across codecs, pixel operations and the editing
//! session, on datasets written to temporary directories.
