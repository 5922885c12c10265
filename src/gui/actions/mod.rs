// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy,export,scan,...}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs
mod scan;    // src/gui/actions/scan.rs

pub use copy::copy;
pub use export::{export, open_output_folder};
pub use scan::{reload, scan};
