//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, one file per key on native)
//! - Keyboard input mapping

pub mod input;
pub mod storage;
