// src/core/mod.rs

pub mod html;
pub mod locate;
pub mod net;
pub mod sanitize;
