//! # pairmask-session
//!
//! Interactive editing of one before/after pair, and navigation through a
//! dataset of pairs.
//!
//! - [`PairSession`] - masks, history, background merge builds, commit
//! - [`Workspace`] - pending pairs, caption presets, pair-to-pair navigation
//! - [`SessionConfig`] - tunables read from `pairmask.yaml`
//!
//! # Example
//!
//! ```rust
//! use pairmask_core::{MainSide, PixelBuffer, pixel};
//! use pairmask_session::{PairSession, SessionConfig};
//!
//! let mut session = PairSession::new(SessionConfig::default());
//! session
//!     .load(
//!         PixelBuffer::filled(16, 16, pixel::OPAQUE_BLACK),
//!         PixelBuffer::filled(16, 16, pixel::OPAQUE_WHITE),
//!     )
//!     .unwrap();
//!
//! // keep ref, paint base back in around (8, 8)
//! session.stroke_to(MainSide::Base, 8, 8, 3).unwrap();
//! session.end_stroke().unwrap();
//!
//! let merged = session.derived_settled().unwrap().merged.unwrap();
//! assert_eq!(merged.pixel(8, 8), Some(pixel::OPAQUE_BLACK));
//! assert_eq!(merged.pixel(0, 0), Some(pixel::OPAQUE_WHITE));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod config;
pub mod jobs;
pub mod session;
pub mod workspace;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::{AutoMask, AutoMaskParams, Derived, PairSession, SaveStatus};
pub use workspace::Workspace;
