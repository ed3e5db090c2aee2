//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the console chrome, modals, and widgets. Pages own the
//! state signals and hand them down; shared UI state comes from context.

pub mod bench_gauge;
pub mod confirm_dialog;
pub mod employee_modals;
pub mod field_error;
pub mod file_uploader;
pub mod nav_shell;
pub mod project_wizard;
pub mod team_modal;
