//! Fetch a university course catalog, cache it as a JSON snapshot and
//! filter it interactively.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod fetch;
pub mod session;
pub mod ui;
