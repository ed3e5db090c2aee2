//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, theme,
//! clock) and pure formatting/validation from page and component logic.

pub mod browser;
pub mod dark_mode;
pub mod dates;
pub mod format;
pub mod ui_persistence;
pub mod validation;
