//! # Oceanconf
//!
//! A terminal console for reviewing oceanographic instrumentation
//! configuration: loggers, sensors, deck units, platforms, vessels, and the
//! relationships between them, loaded from a catalog document and browsed
//! one table at a time with sortable columns.
//!
//! ## Modules
//!
//! - [`entities`] - Row types mirroring the instrumentation schema
//! - [`catalog`] - Catalog loading, table projection, and sorting
//! - [`widgets`] - Presentational widgets (the sort indicator)
//! - [`components`] - Interface components (table browser, status bar)
//! - [`config`] - Keybindings, palette tokens, and styles
//! - [`app`] - The event/action loop

#![deny(warnings)]

pub mod action;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod entities;
pub mod mode;
pub mod tui;
pub mod utils;
pub mod widgets;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
