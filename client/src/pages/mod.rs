//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped state and fetches, and delegates rendering
//! details to `components`.

pub mod allocation_report;
pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod project_detail;
pub mod projects;
pub mod talent_lab;
