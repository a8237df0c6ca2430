//! Core library for audioswitch - fuzzy audio output device resolution.
//!
//! The heart of this crate is [`matcher::resolve`]: a pure, deterministic
//! function that maps a noisy user query ("macbok spekers", "hdmi2",
//! "AP Pro") and a list of device labels to a single best match, an
//! ambiguous set, or no match at all. Everything with side effects lives
//! behind the [`directory`] traits and is implemented elsewhere.

pub mod directory;
pub mod error;
pub mod matcher;

pub use directory::{DeviceDirectory, VolumeControl};
pub use error::{Error, Result};
pub use matcher::{resolve, ResolutionResult};
