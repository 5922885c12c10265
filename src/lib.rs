// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod model;

pub mod capture;
pub mod extract;
pub mod cache;

pub mod agent;
pub mod bus;
pub mod coordinator;
pub mod store;
pub mod entitlement;

pub mod csv;
pub mod file;
pub mod progress;
pub mod runner;

pub mod cli;
pub mod gui;
