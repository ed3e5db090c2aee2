//! Client-side state models.
//!
//! DESIGN
//! ======
//! State is split by screen (`wizard`, `team`, `directory`, ...) as plain
//! structs with transition methods. Views hold them in `RwSignal`s and call
//! those methods, so every rule here runs under native `cargo test`.

pub mod bench;
pub mod directory;
pub mod employee_forms;
pub mod reports;
pub mod roles;
pub mod talent;
pub mod team;
pub mod ui;
pub mod uploads;
pub mod wizard;
