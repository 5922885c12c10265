// src/gui/components/mod.rs
pub mod context_panel;
pub mod data_table;
pub mod details;
pub mod log_panel;
pub mod paywall;
pub mod toolbar;
