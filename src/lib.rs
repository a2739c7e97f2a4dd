//! Grid Builder Library
//!
//! A grid-based city builder that can run headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
